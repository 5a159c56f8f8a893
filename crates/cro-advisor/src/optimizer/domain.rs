use serde::{Deserialize, Serialize};

/// Closed set of heuristic families a rule belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    TrustCredibility,
    UserExperience,
    PricingValue,
    SocialProof,
    CallToAction,
    ContentQuality,
    Technical,
}

impl Category {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::TrustCredibility,
            Self::UserExperience,
            Self::PricingValue,
            Self::SocialProof,
            Self::CallToAction,
            Self::ContentQuality,
            Self::Technical,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::TrustCredibility => "Trust & Credibility",
            Self::UserExperience => "User Experience",
            Self::PricingValue => "Pricing & Value",
            Self::SocialProof => "Social Proof",
            Self::CallToAction => "Call-to-Action",
            Self::ContentQuality => "Content Quality",
            Self::Technical => "Technical",
        }
    }
}

/// Urgency bucket. Variant order is the sort order: high sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub const fn ordered() -> [Self; 3] {
        [Self::High, Self::Medium, Self::Low]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    /// Whether findings of this priority feed the aggregate estimate.
    pub const fn counts_toward_aggregate(self) -> bool {
        matches!(self, Self::High | Self::Medium)
    }
}

/// What an impact percentage measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactMetric {
    ConversionRate,
    CartAbandonmentReduction,
    ClickThroughRate,
    MobileConversionRate,
    BounceRateReduction,
}

impl ImpactMetric {
    pub const fn label(self) -> &'static str {
        match self {
            Self::ConversionRate => "increase in conversion rate",
            Self::CartAbandonmentReduction => "reduction in cart abandonment",
            Self::ClickThroughRate => "increase in click-through rate",
            Self::MobileConversionRate => "increase in mobile conversion rate",
            Self::BounceRateReduction => "reduction in bounce rate",
        }
    }
}

/// Low/high percentage pair, serialized as `[low, high]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct ImpactRange {
    pub low: f64,
    pub high: f64,
}

impl ImpactRange {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn describe(&self) -> String {
        format!("{}-{}%", trim_pct(self.low), trim_pct(self.high))
    }
}

impl From<[f64; 2]> for ImpactRange {
    fn from([low, high]: [f64; 2]) -> Self {
        Self { low, high }
    }
}

impl From<ImpactRange> for [f64; 2] {
    fn from(range: ImpactRange) -> Self {
        [range.low, range.high]
    }
}

fn trim_pct(value: f64) -> String {
    if value.fract().abs() < f64::EPSILON {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

/// Static impact estimate attached to a rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactEstimate {
    pub range: ImpactRange,
    pub metric: ImpactMetric,
}

impl ImpactEstimate {
    pub const fn new(low: f64, high: f64, metric: ImpactMetric) -> Self {
        Self {
            range: ImpactRange::new(low, high),
            metric,
        }
    }

    pub fn describe(&self) -> String {
        format!("{} {}", self.range.describe(), self.metric.label())
    }
}

/// Presentational remediation a synthesized page can inject for a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateBlock {
    ImageGallery,
    ProductVideo,
    PriceAnchor,
    WarrantyBadge,
    TrustBadges,
    UrgencyBanner,
    ActionCta,
    BenefitList,
    ReviewsSection,
    SpecsTable,
    FaqSection,
    SecondaryCta,
}

impl TemplateBlock {
    pub const fn label(self) -> &'static str {
        match self {
            Self::ImageGallery => "Product image gallery",
            Self::ProductVideo => "Product demo video",
            Self::PriceAnchor => "Anchored price display",
            Self::WarrantyBadge => "Warranty badge",
            Self::TrustBadges => "Security trust badges",
            Self::UrgencyBanner => "Stock urgency banner",
            Self::ActionCta => "Action-oriented CTA button",
            Self::BenefitList => "Expanded benefit list",
            Self::ReviewsSection => "Customer reviews section",
            Self::SpecsTable => "Specifications table",
            Self::FaqSection => "FAQ section",
            Self::SecondaryCta => "Secondary CTA",
        }
    }
}
