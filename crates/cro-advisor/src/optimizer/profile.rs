use serde::{Deserialize, Serialize};

/// Observable attributes of a product page.
///
/// Every field is optional. `None` means the attribute is unknown, which the
/// rule set treats the same as the deficiency being present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_warranty_badge: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_trust_badges: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_video: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub benefits: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_reviews: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_urgency: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_action_oriented_cta: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_spec_table: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_faq: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile_optimized: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_time_seconds: Option<f64>,
}

impl PageProfile {
    /// Identifier used for reports: the URL, then the title.
    pub fn source(&self) -> Option<&str> {
        let present = |value: &&str| !value.trim().is_empty();
        self.url
            .as_deref()
            .filter(present)
            .or_else(|| self.title.as_deref().filter(present))
    }

    pub fn benefit_count(&self) -> usize {
        self.benefits.as_ref().map_or(0, Vec::len)
    }

    /// True only when both prices are known and the original is higher.
    pub fn has_price_anchor(&self) -> bool {
        matches!(
            (self.original_price, self.current_price),
            (Some(original), Some(current)) if original > current
        )
    }

    /// Fills unknown attributes from keywords in the page's raw text.
    ///
    /// Explicit values always win; a keyword can only mark a feature present,
    /// except generic "add to cart" wording, which marks the CTA copy as
    /// not action-oriented when nothing else is known.
    pub fn with_content_signals(mut self, content: &str) -> Self {
        let signals = ContentSignals::scan(content);

        fill(&mut self.has_warranty_badge, signals.warranty);
        fill(&mut self.has_trust_badges, signals.security);
        fill(&mut self.has_video, signals.video);
        fill(&mut self.has_reviews, signals.reviews);
        fill(&mut self.has_urgency, signals.urgency);
        fill(&mut self.has_spec_table, signals.specifications);
        fill(&mut self.has_faq, signals.faq);

        if self.has_action_oriented_cta.is_none() && signals.generic_cta {
            self.has_action_oriented_cta = Some(false);
        }

        self
    }
}

fn fill(slot: &mut Option<bool>, detected: bool) {
    if slot.is_none() && detected {
        *slot = Some(true);
    }
}

#[derive(Debug, Default)]
struct ContentSignals {
    warranty: bool,
    security: bool,
    video: bool,
    reviews: bool,
    urgency: bool,
    generic_cta: bool,
    specifications: bool,
    faq: bool,
}

impl ContentSignals {
    fn scan(content: &str) -> Self {
        let text = content.to_lowercase();
        let any = |needles: &[&str]| needles.iter().any(|needle| text.contains(needle));

        Self {
            warranty: any(&["warranty", "guarantee"]),
            security: any(&["ssl", "secure checkout", "secure payment", "trusted"]),
            video: any(&["video demo", "product video", "watch the video", "<video"]),
            reviews: any(&["customer reviews", "verified buyer", "verified purchase"]),
            urgency: any(&["limited stock", "selling fast", "left in stock"]) || only_n_left(&text),
            generic_cta: text.contains("add to cart"),
            specifications: any(&["specifications", "tech specs"]),
            faq: any(&["faq", "frequently asked"]),
        }
    }
}

// Matches phrases like "only 3 left".
fn only_n_left(text: &str) -> bool {
    let words: Vec<&str> = text.split_whitespace().collect();
    words.windows(3).any(|window| {
        window[0] == "only"
            && window[1].chars().all(|c| c.is_ascii_digit())
            && window[2].starts_with("left")
    })
}

/// Inbound payload: profile attributes plus optional raw page text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageSubmission {
    #[serde(flatten)]
    pub profile: PageProfile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl PageSubmission {
    pub fn into_profile(self) -> PageProfile {
        match self.content {
            Some(content) if !content.trim().is_empty() => {
                self.profile.with_content_signals(&content)
            }
            _ => self.profile,
        }
    }
}

impl From<PageProfile> for PageSubmission {
    fn from(profile: PageProfile) -> Self {
        Self {
            profile,
            content: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_anchor_requires_both_prices() {
        let mut profile = PageProfile {
            current_price: Some(249.0),
            ..PageProfile::default()
        };
        assert!(!profile.has_price_anchor());

        profile.original_price = Some(249.0);
        assert!(!profile.has_price_anchor());

        profile.original_price = Some(299.0);
        assert!(profile.has_price_anchor());
    }

    #[test]
    fn content_signals_fill_unknown_fields_only() {
        let profile = PageProfile {
            has_faq: Some(false),
            ..PageProfile::default()
        }
        .with_content_signals("1 year WARRANTY. Customer Reviews below. See our FAQ.");

        assert_eq!(profile.has_warranty_badge, Some(true));
        assert_eq!(profile.has_reviews, Some(true));
        assert_eq!(profile.has_faq, Some(false));
        assert_eq!(profile.has_video, None);
    }

    #[test]
    fn generic_cta_copy_is_marked_not_action_oriented() {
        let profile = PageProfile::default().with_content_signals("Add to cart");
        assert_eq!(profile.has_action_oriented_cta, Some(false));

        let explicit = PageProfile {
            has_action_oriented_cta: Some(true),
            ..PageProfile::default()
        }
        .with_content_signals("Add to cart");
        assert_eq!(explicit.has_action_oriented_cta, Some(true));
    }

    #[test]
    fn detects_only_n_left_urgency() {
        let profile = PageProfile::default().with_content_signals("Hurry, only 3 left!");
        assert_eq!(profile.has_urgency, Some(true));
        let none = PageProfile::default().with_content_signals("only a few left");
        assert_eq!(none.has_urgency, None);
    }

    #[test]
    fn source_prefers_url_then_title() {
        let profile = PageProfile {
            title: Some("Hi8 camcorder".to_string()),
            ..PageProfile::default()
        };
        assert_eq!(profile.source(), Some("Hi8 camcorder"));
        assert_eq!(PageProfile::default().source(), None);
    }

    #[test]
    fn submission_parses_flattened_profile() {
        let submission: PageSubmission = serde_json::from_value(serde_json::json!({
            "url": "https://shop.example/item",
            "cta_count": 1,
            "has_reviews": false,
            "content": "Technical specifications"
        }))
        .expect("payload parses");

        let profile = submission.into_profile();
        assert_eq!(profile.cta_count, Some(1));
        assert_eq!(profile.has_reviews, Some(false));
        assert_eq!(profile.has_spec_table, Some(true));
    }
}
