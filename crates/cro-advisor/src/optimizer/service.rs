use std::sync::Arc;

use super::comparison::ComparisonBundle;
use super::evaluation::{Evaluator, Finding};
use super::profile::{PageProfile, PageSubmission};
use super::report::{AggregatePolicy, OptimizationReport, ReportBuilder};
use super::sample;
use super::storage::{ArtifactStore, StorageError, StoredArtifact};
use super::template::{OptimizedPage, SynthesisOptions, TemplateSynthesizer};

/// One evaluated page: the profile that was judged, its ordered findings and
/// the report built from them.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub profile: PageProfile,
    pub findings: Vec<Finding>,
    pub report: OptimizationReport,
}

#[derive(Debug, Clone)]
pub struct Comparison {
    pub analysis: Analysis,
    pub page: OptimizedPage,
    pub artifact: StoredArtifact,
}

/// Service composing the evaluator, report builder, synthesizer and store.
pub struct OptimizerService<S> {
    evaluator: Evaluator,
    reports: ReportBuilder,
    synthesizer: TemplateSynthesizer,
    store: Arc<S>,
}

impl<S> OptimizerService<S>
where
    S: ArtifactStore + 'static,
{
    pub fn new(store: Arc<S>, policy: AggregatePolicy, synthesis: SynthesisOptions) -> Self {
        Self {
            evaluator: Evaluator::default(),
            reports: ReportBuilder::new(policy),
            synthesizer: TemplateSynthesizer::new(synthesis),
            store,
        }
    }

    pub fn with_defaults(store: Arc<S>) -> Self {
        Self::new(store, AggregatePolicy::default(), SynthesisOptions::default())
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Evaluate a submitted page and build its report.
    pub fn analyze(&self, submission: PageSubmission) -> Analysis {
        let profile = submission.into_profile();
        let findings = self.evaluator.evaluate(&profile);
        let report = self.reports.build(&findings, &profile);
        tracing::info!(
            source = report.source.as_deref().unwrap_or("unnamed"),
            findings = findings.len(),
            rules = self.evaluator.rules().len(),
            aggregate = %report.aggregate_improvement.describe(),
            "page analyzed"
        );
        Analysis {
            profile,
            findings,
            report,
        }
    }

    pub fn sample_analysis(&self) -> Analysis {
        self.analyze(sample::tapeplayers_submission())
    }

    /// Analyze and persist the report through the artifact store.
    pub fn export_report(
        &self,
        submission: PageSubmission,
    ) -> Result<(Analysis, StoredArtifact), OptimizerServiceError> {
        let analysis = self.analyze(submission);
        let artifact = self.store.save_report(&analysis.report)?;
        tracing::debug!(location = %artifact.location, "report exported");
        Ok((analysis, artifact))
    }

    pub fn synthesize(&self, submission: PageSubmission) -> (Analysis, OptimizedPage) {
        let analysis = self.analyze(submission);
        let page = self
            .synthesizer
            .synthesize(&analysis.profile, &analysis.findings);
        tracing::debug!(injected = page.injected.len(), "optimized page synthesized");
        (analysis, page)
    }

    /// Synthesize the optimized page and persist it with a comparison README.
    pub fn compare(&self, submission: PageSubmission) -> Result<Comparison, OptimizerServiceError> {
        let (analysis, page) = self.synthesize(submission);
        let bundle = ComparisonBundle::new(analysis.profile.url.clone(), &analysis.report, &page);
        let artifact = self.store.save_comparison(&bundle)?;
        tracing::info!(
            location = %artifact.location,
            injected = page.injected.len(),
            "comparison bundle stored"
        );
        Ok(Comparison {
            analysis,
            page,
            artifact,
        })
    }
}

/// Error raised by the optimizer service.
#[derive(Debug, thiserror::Error)]
pub enum OptimizerServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}
