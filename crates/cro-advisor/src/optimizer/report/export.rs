use super::views::OptimizationReport;

pub fn to_json_pretty(report: &OptimizationReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

/// Human-readable summary of a report.
pub fn render_markdown(report: &OptimizationReport) -> String {
    let mut out = String::new();
    out.push_str("# Conversion rate optimization report\n\n");
    if let Some(source) = &report.source {
        out.push_str(&format!("- Page: {}\n", source));
    }
    out.push_str(&format!(
        "- Analyzed: {}\n",
        report.analyzed_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    out.push_str(&format!("- Recommendations: {}\n", report.total_findings));
    out.push_str(&format!(
        "- Estimated combined improvement: {}\n",
        report.aggregate_improvement.describe()
    ));
    for entry in &report.priority_distribution {
        out.push_str(&format!("- {} priority: {}\n", entry.priority_label, entry.count));
    }
    out.push('\n');

    if report.findings.is_empty() {
        out.push_str("_No recommendations: every checklist item is satisfied._\n");
        return out;
    }

    if !report.quick_wins.is_empty() {
        out.push_str("## Quick wins\n\n");
        for (i, win) in report.quick_wins.iter().enumerate() {
            out.push_str(&format!(
                "{}. **{}** ({})\n",
                i + 1,
                win.title,
                win.estimated_improvement
            ));
        }
        out.push('\n');
    }

    for group in &report.findings_by_category {
        out.push_str(&format!("## {}\n\n", group.category_label));
        for finding in &group.findings {
            out.push_str(&format!(
                "### {} ({} priority)\n\n",
                finding.title, finding.priority_label
            ));
            out.push_str(&format!("{}\n\n", finding.description));
            out.push_str(&format!("- Impact: {}\n", finding.rationale));
            out.push_str(&format!("- How: {}\n", finding.implementation));
            out.push_str(&format!(
                "- Estimated improvement: {}\n",
                finding.estimated_improvement
            ));
            if let Some(code) = finding.code_example {
                out.push_str(&format!("\n```html\n{}\n```\n", code));
            }
            out.push('\n');
        }
    }

    out
}
