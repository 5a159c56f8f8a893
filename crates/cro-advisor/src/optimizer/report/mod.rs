mod export;
mod summary;
pub mod views;

pub use export::{render_markdown, to_json_pretty};
pub use summary::{combine_impacts, AggregatePolicy, ReportBuilder};
pub use views::{CategoryGroup, FindingView, OptimizationReport, PriorityCount};
