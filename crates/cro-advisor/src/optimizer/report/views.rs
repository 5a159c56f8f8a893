use super::super::domain::{Category, ImpactMetric, ImpactRange, Priority};
use super::super::evaluation::Finding;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FindingView {
    pub rule_id: &'static str,
    pub title: &'static str,
    pub category: Category,
    pub category_label: &'static str,
    pub priority: Priority,
    pub priority_label: &'static str,
    pub impact_range: ImpactRange,
    pub impact_metric: ImpactMetric,
    pub estimated_improvement: String,
    pub description: &'static str,
    pub rationale: &'static str,
    pub implementation: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_example: Option<&'static str>,
}

impl FindingView {
    pub fn from_finding(finding: &Finding) -> Self {
        Self {
            rule_id: finding.rule_id,
            title: finding.title,
            category: finding.category,
            category_label: finding.category.label(),
            priority: finding.priority,
            priority_label: finding.priority.label(),
            impact_range: finding.impact.range,
            impact_metric: finding.impact.metric,
            estimated_improvement: finding.impact.describe(),
            description: finding.description,
            rationale: finding.rationale,
            implementation: finding.implementation,
            code_example: finding.code_example,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriorityCount {
    pub priority: Priority,
    pub priority_label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryGroup {
    pub category: Category,
    pub category_label: &'static str,
    pub findings: Vec<FindingView>,
}

/// Exportable analysis of one page. Field order is the serialized order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizationReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_title: Option<String>,
    pub analyzed_at: DateTime<Utc>,
    pub total_findings: usize,
    pub aggregate_improvement: ImpactRange,
    pub aggregate_ceiling: f64,
    pub priority_distribution: Vec<PriorityCount>,
    pub findings: Vec<FindingView>,
    pub findings_by_category: Vec<CategoryGroup>,
    pub implementation_order: Vec<&'static str>,
    pub quick_wins: Vec<FindingView>,
}

impl OptimizationReport {
    pub fn count_for(&self, priority: Priority) -> usize {
        self.priority_distribution
            .iter()
            .find(|entry| entry.priority == priority)
            .map_or(0, |entry| entry.count)
    }

    pub fn has_finding(&self, rule_id: &str) -> bool {
        self.findings.iter().any(|finding| finding.rule_id == rule_id)
    }
}
