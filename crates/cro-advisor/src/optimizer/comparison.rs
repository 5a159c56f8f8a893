use super::report::OptimizationReport;
use super::template::OptimizedPage;
use chrono::{DateTime, Utc};

pub const OPTIMIZED_PAGE_FILE: &str = "optimized_page.html";
pub const README_FILE: &str = "README.md";

/// Optimized page plus a README that explains how to compare it with the
/// live listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonBundle {
    pub original_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub optimized_html: String,
    pub readme: String,
}

impl ComparisonBundle {
    pub fn new(
        original_url: Option<String>,
        report: &OptimizationReport,
        page: &OptimizedPage,
    ) -> Self {
        let readme = render_readme(original_url.as_deref(), report, page);
        Self {
            original_url,
            created_at: report.analyzed_at,
            optimized_html: page.html.clone(),
            readme,
        }
    }

    /// `(file name, contents)` pairs in write order.
    pub fn files(&self) -> [(&'static str, &str); 2] {
        [
            (OPTIMIZED_PAGE_FILE, self.optimized_html.as_str()),
            (README_FILE, self.readme.as_str()),
        ]
    }
}

fn render_readme(
    original_url: Option<&str>,
    report: &OptimizationReport,
    page: &OptimizedPage,
) -> String {
    let mut out = String::new();
    out.push_str("# Product page comparison\n\n");
    out.push_str(&format!(
        "- Original page: {}\n",
        original_url.unwrap_or("not provided")
    ));
    out.push_str(&format!(
        "- Optimized page: {}\n",
        OPTIMIZED_PAGE_FILE
    ));
    out.push_str(&format!(
        "- Estimated combined improvement: {}\n\n",
        report.aggregate_improvement.describe()
    ));

    out.push_str("## Improvements applied\n\n");
    if page.injected.is_empty() {
        out.push_str("No blocks were added; the page already covers every section.\n");
    } else {
        for block in &page.injected {
            match report.findings.iter().find(|f| f.rule_id == block.rule_id) {
                Some(finding) => out.push_str(&format!(
                    "- **{}** ({}): {}\n",
                    finding.title, block.label, finding.estimated_improvement
                )),
                None => out.push_str(&format!("- {}\n", block.label)),
            }
        }
    }

    out.push_str("\n## How to compare\n\n");
    out.push_str("1. Open the original page and the optimized page side by side.\n");
    out.push_str("2. Blocks outlined with a dashed border are new suggestions.\n");
    out.push_str("3. Check each suggestion against the listing's real content before publishing.\n");
    out.push_str("4. Roll out changes one at a time and measure conversion with an A/B test.\n");
    out
}
