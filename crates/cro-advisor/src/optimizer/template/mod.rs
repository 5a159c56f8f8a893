//! Synthesis of an optimized product page from a profile and its findings.
//!
//! The document has a fixed slot layout. Each slot renders in one of three
//! states: the page already satisfies the aspect (rendered as-is), a finding
//! asked for the aspect (suggested block injected), or neither (left out).

mod blocks;

use super::domain::TemplateBlock;
use super::evaluation::Finding;
use super::profile::PageProfile;
use blocks::SlotState;
use serde::Serialize;
use std::collections::BTreeMap;

pub use blocks::escape_html;

pub(crate) const GALLERY_SLOTS: u32 = 4;
pub(crate) const MINIMUM_BENEFITS: usize = 5;

/// Knobs for the synthesized document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynthesisOptions {
    /// Multiplier applied to the current price to propose a compare-at price.
    pub anchor_markup: f64,
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        Self { anchor_markup: 1.2 }
    }
}

/// A block that was added to the synthesized page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InjectedBlock {
    pub rule_id: &'static str,
    pub block: TemplateBlock,
    pub label: &'static str,
}

/// Synthesized HTML plus the profile the new page would have.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizedPage {
    pub html: String,
    pub injected: Vec<InjectedBlock>,
    resulting_profile: PageProfile,
}

impl OptimizedPage {
    /// Profile of the synthesized page: the input profile with every
    /// injected aspect marked satisfied.
    pub fn resulting_profile(&self) -> &PageProfile {
        &self.resulting_profile
    }

    pub fn injected_rule_ids(&self) -> Vec<&'static str> {
        self.injected.iter().map(|entry| entry.rule_id).collect()
    }

    pub fn was_injected(&self, block: TemplateBlock) -> bool {
        self.injected.iter().any(|entry| entry.block == block)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateSynthesizer {
    options: SynthesisOptions,
}

impl TemplateSynthesizer {
    pub fn new(options: SynthesisOptions) -> Self {
        Self { options }
    }

    pub fn synthesize(&self, profile: &PageProfile, findings: &[Finding]) -> OptimizedPage {
        let requested: BTreeMap<TemplateBlock, &'static str> = findings
            .iter()
            .filter_map(|finding| finding.block.map(|block| (block, finding.rule_id)))
            .collect();

        let mut resulting = profile.clone();
        let mut injected = Vec::new();
        let mut inject = |block: TemplateBlock, resulting: &mut PageProfile| -> SlotState {
            if blocks::satisfied(block, profile) {
                return SlotState::Present;
            }
            let Some(rule_id) = requested.get(&block).copied() else {
                return SlotState::Absent;
            };
            if !blocks::can_inject(block, profile) {
                return SlotState::Absent;
            }
            blocks::apply(block, resulting, &self.options);
            injected.push(InjectedBlock {
                rule_id,
                block,
                label: block.label(),
            });
            SlotState::Suggested(rule_id)
        };

        let gallery = inject(TemplateBlock::ImageGallery, &mut resulting);
        let video = inject(TemplateBlock::ProductVideo, &mut resulting);
        let price = inject(TemplateBlock::PriceAnchor, &mut resulting);
        let warranty = inject(TemplateBlock::WarrantyBadge, &mut resulting);
        let trust = inject(TemplateBlock::TrustBadges, &mut resulting);
        let urgency = inject(TemplateBlock::UrgencyBanner, &mut resulting);
        let cta = inject(TemplateBlock::ActionCta, &mut resulting);
        let benefits = inject(TemplateBlock::BenefitList, &mut resulting);
        let reviews = inject(TemplateBlock::ReviewsSection, &mut resulting);
        let specs = inject(TemplateBlock::SpecsTable, &mut resulting);
        let faq = inject(TemplateBlock::FaqSection, &mut resulting);
        let secondary_cta = inject(TemplateBlock::SecondaryCta, &mut resulting);

        let title = profile.title.as_deref().unwrap_or("Product");
        let mut html = String::new();
        blocks::open_document(&mut html, title);
        html.push_str("<div class=\"product-media\">\n");
        blocks::gallery(&mut html, gallery, profile, title);
        blocks::video(&mut html, video);
        html.push_str("</div>\n<div class=\"product-info\">\n");
        blocks::price(&mut html, price, profile, &resulting);
        blocks::badges(&mut html, warranty, trust);
        blocks::urgency(&mut html, urgency);
        blocks::primary_cta(&mut html, cta);
        blocks::benefits(&mut html, benefits, &resulting);
        html.push_str("</div>\n</div>\n");
        blocks::reviews(&mut html, reviews);
        blocks::specs(&mut html, specs);
        blocks::faq(&mut html, faq);
        blocks::secondary_cta(&mut html, secondary_cta);
        blocks::close_document(&mut html);

        OptimizedPage {
            html,
            injected,
            resulting_profile: resulting,
        }
    }
}

pub fn synthesize(profile: &PageProfile, findings: &[Finding]) -> OptimizedPage {
    TemplateSynthesizer::default().synthesize(profile, findings)
}
