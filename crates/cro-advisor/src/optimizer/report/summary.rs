use super::super::domain::{Category, ImpactRange, Priority};
use super::super::evaluation::Finding;
use super::super::profile::PageProfile;
use super::views::{CategoryGroup, FindingView, OptimizationReport, PriorityCount};
use chrono::{DateTime, Utc};

const QUICK_WIN_LIMIT: usize = 3;

/// Controls how individual impact ranges roll up into one estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregatePolicy {
    /// Upper limit of the aggregate range, in percent.
    pub ceiling_pct: f64,
}

impl Default for AggregatePolicy {
    fn default() -> Self {
        Self { ceiling_pct: 100.0 }
    }
}

/// Compounds the ranges of high and medium findings as independent effects:
/// `1 - Π(1 - p/100)` per bound, rounded to one decimal and then clamped to
/// the policy ceiling. Adding a finding never lowers either bound.
pub fn combine_impacts(findings: &[Finding], policy: &AggregatePolicy) -> ImpactRange {
    let ceiling = policy.ceiling_pct.clamp(0.0, 100.0);
    let (remaining_low, remaining_high) = findings
        .iter()
        .filter(|finding| finding.priority.counts_toward_aggregate())
        .fold((1.0_f64, 1.0_f64), |(low, high), finding| {
            let range = finding.impact.range;
            (
                low * (1.0 - fraction(range.low)),
                high * (1.0 - fraction(range.high)),
            )
        });

    let bound = |remaining: f64| round_tenth((1.0 - remaining) * 100.0).clamp(0.0, ceiling);
    ImpactRange::new(bound(remaining_low), bound(remaining_high))
}

fn fraction(pct: f64) -> f64 {
    (pct / 100.0).clamp(0.0, 1.0)
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Turns an ordered finding list into an exportable report.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportBuilder {
    policy: AggregatePolicy,
}

impl ReportBuilder {
    pub fn new(policy: AggregatePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &AggregatePolicy {
        &self.policy
    }

    pub fn build(&self, findings: &[Finding], profile: &PageProfile) -> OptimizationReport {
        self.build_at(findings, profile, Utc::now())
    }

    pub fn build_at(
        &self,
        findings: &[Finding],
        profile: &PageProfile,
        analyzed_at: DateTime<Utc>,
    ) -> OptimizationReport {
        let views: Vec<FindingView> = findings.iter().map(FindingView::from_finding).collect();

        let priority_distribution = Priority::ordered()
            .into_iter()
            .map(|priority| PriorityCount {
                priority,
                priority_label: priority.label(),
                count: findings
                    .iter()
                    .filter(|finding| finding.priority == priority)
                    .count(),
            })
            .collect();

        let findings_by_category = Category::ordered()
            .into_iter()
            .filter_map(|category| {
                let grouped: Vec<FindingView> = views
                    .iter()
                    .filter(|view| view.category == category)
                    .cloned()
                    .collect();
                if grouped.is_empty() {
                    None
                } else {
                    Some(CategoryGroup {
                        category,
                        category_label: category.label(),
                        findings: grouped,
                    })
                }
            })
            .collect();

        let implementation_order = views.iter().map(|view| view.title).collect();

        let quick_wins = views
            .iter()
            .filter(|view| view.priority == Priority::High)
            .take(QUICK_WIN_LIMIT)
            .cloned()
            .collect();

        OptimizationReport {
            source: profile.source().map(str::to_string),
            page_title: profile.title.clone(),
            analyzed_at,
            total_findings: views.len(),
            aggregate_improvement: combine_impacts(findings, &self.policy),
            aggregate_ceiling: self.policy.ceiling_pct,
            priority_distribution,
            findings: views,
            findings_by_category,
            implementation_order,
            quick_wins,
        }
    }
}
