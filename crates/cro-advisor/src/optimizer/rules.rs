use super::domain::{Category, ImpactEstimate, ImpactMetric, Priority, TemplateBlock};
use super::profile::PageProfile;
use std::sync::OnceLock;

/// Predicate returning `true` when the page shows the deficiency.
pub type RulePredicate = fn(&PageProfile) -> bool;

/// One static optimization heuristic.
#[derive(Debug, Clone)]
pub struct Rule {
    pub id: &'static str,
    pub category: Category,
    pub priority: Priority,
    pub impact: ImpactEstimate,
    pub title: &'static str,
    pub description: &'static str,
    pub rationale: &'static str,
    pub implementation: &'static str,
    pub code_example: Option<&'static str>,
    pub block: Option<TemplateBlock>,
    pub(crate) fires: RulePredicate,
}

impl Rule {
    pub fn fires(&self, profile: &PageProfile) -> bool {
        (self.fires)(profile)
    }
}

/// Ordered, immutable collection of rules.
#[derive(Debug)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

static STANDARD_RULES: OnceLock<RuleSet> = OnceLock::new();

impl RuleSet {
    /// The process-wide checklist, built on first use.
    pub fn standard() -> &'static RuleSet {
        STANDARD_RULES.get_or_init(|| RuleSet {
            rules: standard_rules(),
        })
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.id == id)
    }

    pub fn rules_for_category(&self, category: Category) -> Vec<&Rule> {
        self.rules
            .iter()
            .filter(|rule| rule.category == category)
            .collect()
    }
}

fn known_true(value: Option<bool>) -> bool {
    value == Some(true)
}

fn standard_rules() -> Vec<Rule> {
    vec![
        Rule {
            id: "trust.warranty",
            category: Category::TrustCredibility,
            priority: Priority::High,
            impact: ImpactEstimate::new(15.0, 25.0, ImpactMetric::ConversionRate),
            title: "Add Prominent Warranty Information",
            description: "No warranty guarantee is visible near the purchase decision.",
            rationale: "Increases customer confidence and reduces purchase anxiety.",
            implementation: "Add a warranty badge near the price and create a dedicated warranty section.",
            code_example: Some(
                r#"<div class="warranty-badge">
    <span>365-Day Warranty</span>
    <small>Full replacement or refund</small>
</div>"#,
            ),
            block: Some(TemplateBlock::WarrantyBadge),
            fires: |profile| !known_true(profile.has_warranty_badge),
        },
        Rule {
            id: "trust.security_badges",
            category: Category::TrustCredibility,
            priority: Priority::Medium,
            impact: ImpactEstimate::new(8.0, 12.0, ImpactMetric::CartAbandonmentReduction),
            title: "Add Security Trust Badges",
            description: "Missing security indicators that build customer trust.",
            rationale: "Reduces cart abandonment due to security concerns.",
            implementation: "Add SSL certificate badges, payment security icons, and trust seals.",
            code_example: None,
            block: Some(TemplateBlock::TrustBadges),
            fires: |profile| !known_true(profile.has_trust_badges),
        },
        Rule {
            id: "ux.product_images",
            category: Category::UserExperience,
            priority: Priority::High,
            impact: ImpactEstimate::new(20.0, 30.0, ImpactMetric::ConversionRate),
            title: "Add More Product Images",
            description: "Limited product images reduce customer confidence in the purchase decision.",
            rationale: "Better product visualization leads to higher conversion rates.",
            implementation: "Add multiple angles, close-ups, and usage demonstration images.",
            code_example: None,
            block: Some(TemplateBlock::ImageGallery),
            fires: |profile| profile.image_count.map_or(true, |count| count < 3),
        },
        Rule {
            id: "ux.product_video",
            category: Category::UserExperience,
            priority: Priority::Medium,
            impact: ImpactEstimate::new(25.0, 40.0, ImpactMetric::ConversionRate),
            title: "Add Product Demo Video",
            description: "No video demonstrates the product in use.",
            rationale: "Shows the product in action and builds confidence.",
            implementation: "Create a 30-60 second product demonstration video.",
            code_example: None,
            block: Some(TemplateBlock::ProductVideo),
            fires: |profile| !known_true(profile.has_video),
        },
        Rule {
            id: "pricing.price_anchoring",
            category: Category::PricingValue,
            priority: Priority::Medium,
            impact: ImpactEstimate::new(10.0, 15.0, ImpactMetric::ConversionRate),
            title: "Improve Price Anchoring",
            description: "The price is shown without a reference price or visible savings.",
            rationale: "Better price perception increases perceived value.",
            implementation: "Show the original price crossed out and highlight the savings amount.",
            code_example: Some(
                r#"<div class="pricing">
    <span class="original-price">$299.00</span>
    <span class="current-price">$249.00</span>
    <span class="savings">Save $50 (17% off)</span>
</div>"#,
            ),
            block: Some(TemplateBlock::PriceAnchor),
            fires: |profile| !profile.has_price_anchor(),
        },
        Rule {
            id: "pricing.value_proposition",
            category: Category::PricingValue,
            priority: Priority::High,
            impact: ImpactEstimate::new(15.0, 25.0, ImpactMetric::ConversionRate),
            title: "Strengthen Value Proposition",
            description: "Too few benefits are listed to justify the price point.",
            rationale: "A clear value proposition increases willingness to pay.",
            implementation: "List at least five specific benefits and use cases.",
            code_example: None,
            block: Some(TemplateBlock::BenefitList),
            fires: |profile| profile.benefit_count() < 5,
        },
        Rule {
            id: "social_proof.reviews",
            category: Category::SocialProof,
            priority: Priority::High,
            impact: ImpactEstimate::new(20.0, 35.0, ImpactMetric::ConversionRate),
            title: "Add Customer Reviews Section",
            description: "Missing customer reviews and testimonials.",
            rationale: "Social proof is crucial for building trust and credibility.",
            implementation: "Add a reviews section with star ratings and customer testimonials.",
            code_example: Some(
                r#"<div class="reviews-section">
    <h3>Customer Reviews</h3>
    <div class="rating">4.8/5 (127 reviews)</div>
    <div class="testimonial">"Easy to use and great quality!" - Verified Buyer</div>
</div>"#,
            ),
            block: Some(TemplateBlock::ReviewsSection),
            fires: |profile| !known_true(profile.has_reviews),
        },
        Rule {
            id: "social_proof.urgency",
            category: Category::SocialProof,
            priority: Priority::Medium,
            impact: ImpactEstimate::new(10.0, 20.0, ImpactMetric::ConversionRate),
            title: "Add Urgency Elements",
            description: "Stock levels and time pressure are not communicated.",
            rationale: "Creates fear of missing out and encourages immediate purchase.",
            implementation: "Add stock indicators, countdown timers, and urgency messaging.",
            code_example: None,
            block: Some(TemplateBlock::UrgencyBanner),
            fires: |profile| !known_true(profile.has_urgency),
        },
        Rule {
            id: "cta.button_copy",
            category: Category::CallToAction,
            priority: Priority::High,
            impact: ImpactEstimate::new(15.0, 25.0, ImpactMetric::ClickThroughRate),
            title: "Optimize CTA Button",
            description: "The primary CTA uses generic wording instead of action-oriented copy.",
            rationale: "Better CTAs lead to higher click-through rates.",
            implementation: "Use action-oriented text, add urgency, and improve button design.",
            code_example: Some(
                r#"<button class="cta-button primary">
    <span class="main-text">Get Yours Now</span>
    <span class="sub-text">Free Shipping | 365-Day Warranty</span>
</button>"#,
            ),
            block: Some(TemplateBlock::ActionCta),
            fires: |profile| !known_true(profile.has_action_oriented_cta),
        },
        Rule {
            id: "cta.multiple",
            category: Category::CallToAction,
            priority: Priority::Medium,
            impact: ImpactEstimate::new(10.0, 15.0, ImpactMetric::ConversionRate),
            title: "Add Multiple CTAs",
            description: "A single CTA may not capture all potential customers.",
            rationale: "Multiple CTAs increase the chances of conversion.",
            implementation: "Add CTAs at different scroll positions and in different formats.",
            code_example: None,
            block: Some(TemplateBlock::SecondaryCta),
            fires: |profile| profile.cta_count.map_or(true, |count| count < 2),
        },
        Rule {
            id: "content.specifications",
            category: Category::ContentQuality,
            priority: Priority::Medium,
            impact: ImpactEstimate::new(8.0, 12.0, ImpactMetric::ConversionRate),
            title: "Add Detailed Specifications",
            description: "Missing technical specifications may reduce customer confidence.",
            rationale: "Detailed specs help customers make informed decisions.",
            implementation: "Add a specifications table with all technical details.",
            code_example: None,
            block: Some(TemplateBlock::SpecsTable),
            fires: |profile| !known_true(profile.has_spec_table),
        },
        Rule {
            id: "content.faq",
            category: Category::ContentQuality,
            priority: Priority::Low,
            impact: ImpactEstimate::new(5.0, 10.0, ImpactMetric::ConversionRate),
            title: "Add FAQ Section",
            description: "No FAQ section addresses common customer concerns.",
            rationale: "Reduces customer service inquiries and builds confidence.",
            implementation: "Add common questions about compatibility, setup, and usage.",
            code_example: None,
            block: Some(TemplateBlock::FaqSection),
            fires: |profile| !known_true(profile.has_faq),
        },
        Rule {
            id: "technical.mobile",
            category: Category::Technical,
            priority: Priority::High,
            impact: ImpactEstimate::new(20.0, 30.0, ImpactMetric::MobileConversionRate),
            title: "Improve Mobile Experience",
            description: "The page is not known to be optimized for mobile visitors.",
            rationale: "Better mobile experience increases mobile conversions.",
            implementation: "Ensure responsive design, fast loading, and mobile-friendly CTAs.",
            code_example: None,
            block: None,
            fires: |profile| !known_true(profile.mobile_optimized),
        },
        Rule {
            id: "technical.page_speed",
            category: Category::Technical,
            priority: Priority::Medium,
            impact: ImpactEstimate::new(10.0, 20.0, ImpactMetric::BounceRateReduction),
            title: "Optimize Page Speed",
            description: "Slow or unmeasured load times increase bounce rates.",
            rationale: "Faster pages lead to better user experience and higher conversions.",
            implementation: "Optimize images, minimize HTTP requests, and use a CDN.",
            code_example: None,
            block: None,
            fires: |profile| profile.load_time_seconds.map_or(true, |seconds| seconds > 3.0),
        },
    ]
}
