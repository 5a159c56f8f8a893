use super::domain::{Category, ImpactEstimate, Priority, TemplateBlock};
use super::profile::PageProfile;
use super::rules::{Rule, RuleSet};
use serde::Serialize;

/// A rule that fired for one specific profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Finding {
    pub rule_id: &'static str,
    pub category: Category,
    pub priority: Priority,
    pub impact: ImpactEstimate,
    pub title: &'static str,
    pub description: &'static str,
    pub rationale: &'static str,
    pub implementation: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_example: Option<&'static str>,
    #[serde(skip)]
    pub block: Option<TemplateBlock>,
}

impl Finding {
    fn from_rule(rule: &Rule) -> Self {
        Self {
            rule_id: rule.id,
            category: rule.category,
            priority: rule.priority,
            impact: rule.impact,
            title: rule.title,
            description: rule.description,
            rationale: rule.rationale,
            implementation: rule.implementation,
            code_example: rule.code_example,
            block: rule.block,
        }
    }
}

/// Stateless evaluator that applies a rule set to a profile.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator {
    rules: &'static RuleSet,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(RuleSet::standard())
    }
}

impl Evaluator {
    pub fn new(rules: &'static RuleSet) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &'static RuleSet {
        self.rules
    }

    /// Returns the triggered findings ordered by priority, then by descending
    /// upper impact bound, then by rule declaration order.
    pub fn evaluate(&self, profile: &PageProfile) -> Vec<Finding> {
        let mut findings: Vec<Finding> = self
            .rules
            .rules()
            .iter()
            .filter(|rule| rule.fires(profile))
            .map(Finding::from_rule)
            .collect();

        // Stable sort keeps declaration order for ties.
        findings.sort_by(|a, b| {
            a.priority
                .cmp(&b.priority)
                .then_with(|| b.impact.range.high.total_cmp(&a.impact.range.high))
        });

        findings
    }
}

pub fn evaluate(profile: &PageProfile) -> Vec<Finding> {
    Evaluator::default().evaluate(profile)
}
