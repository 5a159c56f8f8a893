use super::super::domain::TemplateBlock;
use super::super::profile::PageProfile;
use super::{SynthesisOptions, GALLERY_SLOTS, MINIMUM_BENEFITS};

const MAX_RENDERED_IMAGES: u32 = 12;

const STYLESHEET: &str = r#"
        * { margin: 0; padding: 0; box-sizing: border-box; }
        body { font-family: 'Inter', sans-serif; line-height: 1.6; color: #1e293b; background: #f8fafc; }
        .container { max-width: 1200px; margin: 0 auto; padding: 0 20px; }
        .header { background: #0f172a; color: #fff; padding: 24px 0; }
        .product-grid { display: grid; grid-template-columns: 1fr 1fr; gap: 40px; margin: 40px 0; }
        .image-gallery { display: grid; grid-template-columns: repeat(4, 1fr); gap: 10px; }
        .thumb { aspect-ratio: 1; background: #e2e8f0; border-radius: 10px; display: flex; align-items: center; justify-content: center; font-size: 0.8em; }
        .price-section { margin-bottom: 20px; }
        .original-price { text-decoration: line-through; color: #94a3b8; }
        .current-price { font-size: 2em; font-weight: 700; color: #0f172a; }
        .savings { color: #10b981; font-weight: 600; }
        .trust-badges { display: flex; gap: 12px; flex-wrap: wrap; margin: 20px 0; }
        .badge { background: #fff; border: 1px solid #e2e8f0; border-radius: 12px; padding: 10px 14px; }
        .urgency-banner { background: #fef3c7; border-radius: 12px; padding: 12px; margin: 20px 0; }
        .cta-button { width: 100%; background: #2563eb; color: #fff; border: none; border-radius: 14px; padding: 18px; font-size: 1.2em; cursor: pointer; }
        .cta-sub-text { font-size: 0.75em; opacity: 0.85; }
        .benefits { margin-top: 24px; }
        .product-video, .reviews-section, .specs-section, .faq-section { background: #fff; border-radius: 20px; padding: 32px; margin: 32px 0; }
        .specs-table { width: 100%; border-collapse: collapse; }
        .specs-table th, .specs-table td { text-align: left; padding: 10px; border-bottom: 1px solid #e2e8f0; }
        .faq-question { font-weight: 600; }
        .sticky-cta { position: sticky; bottom: 0; background: #fff; box-shadow: 0 -4px 12px rgba(15, 23, 42, 0.1); padding: 12px 0; }
        [data-suggested] { outline: 2px dashed #f59e0b; outline-offset: 4px; }
        @media (max-width: 768px) { .product-grid { grid-template-columns: 1fr; } .image-gallery { grid-template-columns: repeat(2, 1fr); } }
"#;

const GALLERY_PROMPTS: [&str; GALLERY_SLOTS as usize] =
    ["Front view", "Close-up detail", "In use", "What's in the box"];

const SUGGESTED_BENEFITS: [&str; MINIMUM_BENEFITS] = [
    "Fully tested and ready to use out of the box",
    "Everything you need is included in the box",
    "Backed by our satisfaction guarantee",
    "Fast, tracked shipping on every order",
    "Friendly support from real people",
];

const SPEC_ROWS: [&str; 6] = [
    "Model",
    "Dimensions",
    "Weight",
    "Compatibility",
    "Warranty",
    "Package contents",
];

const FAQ_ITEMS: [(&str, &str); 4] = [
    (
        "What's included in the package?",
        "List every item that ships in the box so buyers know they can start right away.",
    ),
    (
        "Is this compatible with my setup?",
        "Describe supported formats, devices, and any adapters required.",
    ),
    (
        "How does shipping and returning work?",
        "State delivery times, shipping costs, and the return window.",
    ),
    (
        "Is there a warranty?",
        "Explain warranty length and how to file a replacement or refund claim.",
    ),
];

/// Rendering state of one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum SlotState {
    Present,
    Suggested(&'static str),
    Absent,
}

pub(super) fn satisfied(block: TemplateBlock, profile: &PageProfile) -> bool {
    let yes = |value: Option<bool>| value == Some(true);
    match block {
        TemplateBlock::ImageGallery => profile.image_count.is_some_and(|count| count >= 3),
        TemplateBlock::ProductVideo => yes(profile.has_video),
        TemplateBlock::PriceAnchor => profile.has_price_anchor(),
        TemplateBlock::WarrantyBadge => yes(profile.has_warranty_badge),
        TemplateBlock::TrustBadges => yes(profile.has_trust_badges),
        TemplateBlock::UrgencyBanner => yes(profile.has_urgency),
        TemplateBlock::ActionCta => yes(profile.has_action_oriented_cta),
        TemplateBlock::BenefitList => profile.benefit_count() >= MINIMUM_BENEFITS,
        TemplateBlock::ReviewsSection => yes(profile.has_reviews),
        TemplateBlock::SpecsTable => yes(profile.has_spec_table),
        TemplateBlock::FaqSection => yes(profile.has_faq),
        TemplateBlock::SecondaryCta => profile.cta_count.is_some_and(|count| count >= 2),
    }
}

/// Whether the block can be built from what the profile knows.
pub(super) fn can_inject(block: TemplateBlock, profile: &PageProfile) -> bool {
    match block {
        TemplateBlock::PriceAnchor => profile.current_price.is_some_and(|price| price > 0.0),
        _ => true,
    }
}

/// Records the effect of an injected block on the resulting profile.
pub(super) fn apply(block: TemplateBlock, profile: &mut PageProfile, options: &SynthesisOptions) {
    match block {
        TemplateBlock::ImageGallery => {
            profile.image_count = Some(profile.image_count.unwrap_or(0).max(GALLERY_SLOTS));
        }
        TemplateBlock::ProductVideo => profile.has_video = Some(true),
        TemplateBlock::PriceAnchor => {
            if let Some(current) = profile.current_price {
                profile.original_price = Some(proposed_anchor(current, options.anchor_markup));
            }
        }
        TemplateBlock::WarrantyBadge => profile.has_warranty_badge = Some(true),
        TemplateBlock::TrustBadges => profile.has_trust_badges = Some(true),
        TemplateBlock::UrgencyBanner => profile.has_urgency = Some(true),
        TemplateBlock::ActionCta => profile.has_action_oriented_cta = Some(true),
        TemplateBlock::BenefitList => {
            let mut benefits = profile.benefits.take().unwrap_or_default();
            for suggestion in SUGGESTED_BENEFITS {
                if benefits.len() >= MINIMUM_BENEFITS {
                    break;
                }
                if !benefits.iter().any(|existing| existing == suggestion) {
                    benefits.push(suggestion.to_string());
                }
            }
            profile.benefits = Some(benefits);
        }
        TemplateBlock::ReviewsSection => profile.has_reviews = Some(true),
        TemplateBlock::SpecsTable => profile.has_spec_table = Some(true),
        TemplateBlock::FaqSection => profile.has_faq = Some(true),
        TemplateBlock::SecondaryCta => {
            profile.cta_count = Some(profile.cta_count.unwrap_or(0).max(1) + 1);
        }
    }
}

/// Compare-at price: current price times markup, rounded up to a whole unit
/// and always strictly above the current price.
pub(crate) fn proposed_anchor(current: f64, markup: f64) -> f64 {
    let anchored = (current * markup.max(1.0)).ceil();
    if anchored > current {
        anchored
    } else {
        current.floor() + 1.0
    }
}

fn suggested_attr(state: SlotState) -> String {
    match state {
        SlotState::Suggested(rule_id) => format!(" data-suggested=\"{}\"", rule_id),
        _ => String::new(),
    }
}

fn money(value: f64) -> String {
    format!("${:.2}", value)
}

pub(super) fn open_document(html: &mut String, title: &str) {
    let title = escape_html(title);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("    <meta charset=\"UTF-8\">\n");
    html.push_str(
        "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    html.push_str(&format!("    <title>{}</title>\n", title));
    html.push_str(&format!("    <style>{}</style>\n", STYLESHEET));
    html.push_str("</head>\n<body>\n");
    html.push_str(&format!(
        "<div class=\"header\"><div class=\"container\"><h1>{}</h1></div></div>\n",
        title
    ));
    html.push_str("<div class=\"container\">\n<div class=\"product-grid\">\n");
}

pub(super) fn close_document(html: &mut String) {
    html.push_str("</div>\n</body>\n</html>\n");
}

pub(super) fn gallery(html: &mut String, state: SlotState, profile: &PageProfile, title: &str) {
    let existing = profile.image_count.unwrap_or(0).min(MAX_RENDERED_IMAGES);
    let alt = escape_html(title);
    html.push_str(&format!(
        "<div class=\"product-images\"{}>\n<div class=\"image-gallery\">\n",
        suggested_attr(state)
    ));
    for index in 0..existing {
        html.push_str(&format!(
            "    <div class=\"thumb\" role=\"img\" aria-label=\"{} image {}\">Image {}</div>\n",
            alt,
            index + 1,
            index + 1
        ));
    }
    if let SlotState::Suggested(_) = state {
        for prompt in GALLERY_PROMPTS.iter().skip(existing as usize) {
            html.push_str(&format!(
                "    <div class=\"thumb suggested\" aria-label=\"{} {}\">{}</div>\n",
                alt, prompt, prompt
            ));
        }
    }
    html.push_str("</div>\n</div>\n");
}

pub(super) fn video(html: &mut String, state: SlotState) {
    match state {
        SlotState::Absent => {}
        SlotState::Present => html.push_str(
            "<section class=\"product-video\"><h3>Product Video</h3></section>\n",
        ),
        SlotState::Suggested(_) => {
            html.push_str(&format!(
                "<section class=\"product-video\"{}>\n    <h3>See It in Action</h3>\n    <div class=\"video-placeholder\">Embed a 30-60 second product demo video here.</div>\n</section>\n",
                suggested_attr(state)
            ));
        }
    }
}

pub(super) fn price(
    html: &mut String,
    state: SlotState,
    profile: &PageProfile,
    resulting: &PageProfile,
) {
    let Some(current) = profile.current_price else {
        return;
    };
    html.push_str(&format!(
        "<div class=\"price-section\"{}>\n",
        suggested_attr(state)
    ));
    let anchor = match state {
        SlotState::Absent => None,
        SlotState::Present => profile.original_price,
        SlotState::Suggested(_) => resulting.original_price,
    };
    if let Some(original) = anchor.filter(|original| *original > current) {
        let savings = original - current;
        let pct = (savings / original * 100.0).round();
        html.push_str(&format!(
            "    <div class=\"original-price\">{}</div>\n",
            money(original)
        ));
        html.push_str(&format!(
            "    <div class=\"current-price\">{}</div>\n",
            money(current)
        ));
        html.push_str(&format!(
            "    <div class=\"savings\">Save {} ({:.0}% off)</div>\n",
            money(savings),
            pct
        ));
    } else {
        html.push_str(&format!(
            "    <div class=\"current-price\">{}</div>\n",
            money(current)
        ));
    }
    html.push_str("</div>\n");
}

pub(super) fn badges(html: &mut String, warranty: SlotState, trust: SlotState) {
    if warranty == SlotState::Absent && trust == SlotState::Absent {
        return;
    }
    html.push_str("<div class=\"trust-badges\">\n");
    if warranty != SlotState::Absent {
        html.push_str(&format!(
            "    <div class=\"badge warranty\"{}><strong>Warranty Included</strong><div>Full replacement or refund</div></div>\n",
            suggested_attr(warranty)
        ));
    }
    if trust != SlotState::Absent {
        html.push_str(&format!(
            "    <div class=\"badge secure\"{}><strong>Secure Checkout</strong><div>SSL encrypted payments</div></div>\n",
            suggested_attr(trust)
        ));
    }
    html.push_str("</div>\n");
}

pub(super) fn urgency(html: &mut String, state: SlotState) {
    match state {
        SlotState::Absent => {}
        SlotState::Present => {
            html.push_str("<div class=\"urgency-banner\">Limited stock available.</div>\n")
        }
        SlotState::Suggested(_) => html.push_str(&format!(
            "<div class=\"urgency-banner\"{}><strong>Limited Stock Available!</strong> Show the remaining quantity here and encourage buyers to order now.</div>\n",
            suggested_attr(state)
        )),
    }
}

pub(super) fn primary_cta(html: &mut String, state: SlotState) {
    match state {
        SlotState::Absent => {
            html.push_str("<button class=\"cta-button\">Add to Cart</button>\n");
        }
        SlotState::Present => {
            html.push_str("<button class=\"cta-button\">Buy Now</button>\n");
        }
        SlotState::Suggested(_) => html.push_str(&format!(
            "<button class=\"cta-button primary\"{}>\n    <div class=\"cta-main-text\">Get Yours Now</div>\n    <div class=\"cta-sub-text\">Free Shipping | Warranty Included | Secure Checkout</div>\n</button>\n",
            suggested_attr(state)
        )),
    }
}

pub(super) fn benefits(html: &mut String, state: SlotState, resulting: &PageProfile) {
    let items = resulting.benefits.as_deref().unwrap_or_default();
    if items.is_empty() {
        return;
    }
    html.push_str(&format!(
        "<div class=\"benefits\"{}>\n    <h3>What You Get:</h3>\n    <ul>\n",
        suggested_attr(state)
    ));
    for item in items {
        html.push_str(&format!("        <li>{}</li>\n", escape_html(item)));
    }
    html.push_str("    </ul>\n</div>\n");
}

pub(super) fn reviews(html: &mut String, state: SlotState) {
    match state {
        SlotState::Absent => {}
        SlotState::Present => html.push_str(
            "<section class=\"reviews-section\"><h3>Customer Reviews</h3></section>\n",
        ),
        SlotState::Suggested(_) => {
            html.push_str(&format!(
                "<section class=\"reviews-section\"{}>\n    <h3>Customer Reviews</h3>\n    <div class=\"rating\">Average rating and review count</div>\n",
                suggested_attr(state)
            ));
            for _ in 0..3 {
                html.push_str(
                    "    <div class=\"testimonial\">Quote a verified buyer's experience here.<br><strong>- Verified Buyer</strong></div>\n",
                );
            }
            html.push_str("</section>\n");
        }
    }
}

pub(super) fn specs(html: &mut String, state: SlotState) {
    match state {
        SlotState::Absent => {}
        SlotState::Present => html.push_str(
            "<section class=\"specs-section\"><h3>Technical Specifications</h3></section>\n",
        ),
        SlotState::Suggested(_) => {
            html.push_str(&format!(
                "<section class=\"specs-section\"{}>\n    <h3>Technical Specifications</h3>\n    <table class=\"specs-table\">\n",
                suggested_attr(state)
            ));
            for row in SPEC_ROWS {
                html.push_str(&format!(
                    "        <tr><th>{}</th><td>Add detail</td></tr>\n",
                    row
                ));
            }
            html.push_str("    </table>\n</section>\n");
        }
    }
}

pub(super) fn faq(html: &mut String, state: SlotState) {
    match state {
        SlotState::Absent => {}
        SlotState::Present => html.push_str(
            "<section class=\"faq-section\"><h3>Frequently Asked Questions</h3></section>\n",
        ),
        SlotState::Suggested(_) => {
            html.push_str(&format!(
                "<section class=\"faq-section\"{}>\n    <h3>Frequently Asked Questions</h3>\n",
                suggested_attr(state)
            ));
            for (question, answer) in FAQ_ITEMS {
                html.push_str(&format!(
                    "    <div class=\"faq-item\"><div class=\"faq-question\">{}</div><div class=\"faq-answer\">{}</div></div>\n",
                    escape_html(question),
                    escape_html(answer)
                ));
            }
            html.push_str("</section>\n");
        }
    }
}

pub(super) fn secondary_cta(html: &mut String, state: SlotState) {
    if state == SlotState::Absent {
        return;
    }
    html.push_str(&format!(
        "<div class=\"sticky-cta\"{}><div class=\"container\"><button class=\"cta-button secondary\">Order Now</button></div></div>\n",
        suggested_attr(state)
    ));
}

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
