//! Rule-based conversion-rate optimization for product pages.
//!
//! A [`PageProfile`] is run through the static [`RuleSet`] by the
//! [`Evaluator`]; the ordered findings feed the [`ReportBuilder`] and the
//! [`TemplateSynthesizer`]. The core is synchronous and total. Persistence and
//! HTTP live at the edges in [`storage`], [`service`] and [`router`].

pub mod comparison;
pub mod domain;
pub mod evaluation;
pub mod import;
pub mod profile;
pub mod report;
pub mod router;
pub mod rules;
pub mod sample;
pub mod service;
pub mod storage;
pub mod template;

#[cfg(test)]
mod tests;

pub use comparison::ComparisonBundle;
pub use domain::{Category, ImpactEstimate, ImpactMetric, ImpactRange, Priority, TemplateBlock};
pub use evaluation::{evaluate, Evaluator, Finding};
pub use import::{ProfileImportError, ProfileImporter};
pub use profile::{PageProfile, PageSubmission};
pub use report::{
    combine_impacts, render_markdown, to_json_pretty, AggregatePolicy, OptimizationReport,
    ReportBuilder,
};
pub use router::optimizer_router;
pub use rules::{Rule, RuleSet};
pub use service::{Analysis, Comparison, OptimizerService, OptimizerServiceError};
pub use storage::{ArtifactStore, FileArtifactStore, StorageError, StoredArtifact};
pub use template::{
    synthesize, InjectedBlock, OptimizedPage, SynthesisOptions, TemplateSynthesizer,
};
