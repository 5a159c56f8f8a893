use crate::infra::{ConfiguredStore, InMemoryArtifactStore};
use clap::Args;
use cro_advisor::config::{AnalysisConfig, AppConfig};
use cro_advisor::error::AppError;
use cro_advisor::optimizer::sample::tapeplayers_submission;
use cro_advisor::optimizer::{
    render_markdown, to_json_pretty, Analysis, ArtifactStore, OptimizationReport,
    OptimizerService, PageSubmission, ProfileImporter,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct AnalyzeArgs {
    /// Page profile as JSON (profile fields plus optional `content`)
    #[arg(long, conflicts_with = "csv", required_unless_present = "csv")]
    pub(crate) profile: Option<PathBuf>,
    /// Page audit export as CSV, one page per row
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
    /// Write the synthesized optimized page to this file
    #[arg(long)]
    pub(crate) html: Option<PathBuf>,
    /// Write the report as JSON to this file
    #[arg(long)]
    pub(crate) json: Option<PathBuf>,
    /// Print the report as Markdown instead of the console summary
    #[arg(long)]
    pub(crate) markdown: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Persist the report and comparison bundle to the configured reports directory
    #[arg(long)]
    pub(crate) write_artifacts: bool,
}

pub(crate) fn run_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let AnalyzeArgs {
        profile,
        csv,
        html,
        json,
        markdown,
    } = args;

    let config = AppConfig::load()?;
    let service = optimizer_service(
        Arc::new(InMemoryArtifactStore::default()),
        &config.analysis,
    );

    let submissions = match (profile, csv) {
        (Some(path), _) => vec![load_submission(&path)?],
        (None, Some(path)) => {
            let file = fs::File::open(&path)?;
            ProfileImporter::submissions_from_reader(file)?
        }
        (None, None) => Vec::new(),
    };

    let total = submissions.len();
    for (index, submission) in submissions.into_iter().enumerate() {
        let (analysis, page) = service.synthesize(submission);
        if markdown {
            println!("{}", render_markdown(&analysis.report));
        } else {
            render_report(&analysis.report);
        }

        if let Some(path) = &json {
            let path = numbered(path, index, total);
            let body = to_json_pretty(&analysis.report).map_err(std::io::Error::from)?;
            fs::write(&path, body)?;
            println!("Report written to {}", path.display());
        }
        if let Some(path) = &html {
            let path = numbered(path, index, total);
            fs::write(&path, &page.html)?;
            println!(
                "Optimized page written to {} ({} blocks added)",
                path.display(),
                page.injected.len()
            );
        }
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;

    println!("Conversion rate optimization demo");
    if args.write_artifacts {
        let store = Arc::new(ConfiguredStore::from_config(&config.storage));
        let service = optimizer_service(store, &config.analysis);
        let (analysis, artifact) = service.export_report(tapeplayers_submission())?;
        render_analysis(&analysis);
        println!("\nReport saved to {}", artifact.location);

        let comparison = service.compare(tapeplayers_submission())?;
        println!(
            "Comparison bundle saved to {} ({})",
            comparison.artifact.location,
            comparison.artifact.files.join(", ")
        );
    } else {
        let service = optimizer_service(
            Arc::new(InMemoryArtifactStore::default()),
            &config.analysis,
        );
        let (analysis, page) = service.synthesize(tapeplayers_submission());
        render_analysis(&analysis);

        println!("\nOptimized page preview");
        if page.injected.is_empty() {
            println!("- No blocks added");
        }
        for block in &page.injected {
            println!("- {} ({})", block.label, block.rule_id);
        }
        println!("Run with --write-artifacts to save the report and comparison bundle.");
    }

    Ok(())
}

fn optimizer_service<S>(store: Arc<S>, analysis: &AnalysisConfig) -> OptimizerService<S>
where
    S: ArtifactStore + 'static,
{
    OptimizerService::new(
        store,
        analysis.aggregate_policy(),
        analysis.synthesis_options(),
    )
}

fn load_submission(path: &Path) -> Result<PageSubmission, AppError> {
    let raw = fs::read_to_string(path)?;
    let submission = serde_json::from_str(&raw).map_err(std::io::Error::from)?;
    Ok(submission)
}

/// `page.html` becomes `page-2.html` when several pages are written.
fn numbered(path: &Path, index: usize, total: usize) -> PathBuf {
    if total <= 1 {
        return path.to_path_buf();
    }
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "page".to_string());
    let name = match path.extension() {
        Some(ext) => format!("{}-{}.{}", stem, index + 1, ext.to_string_lossy()),
        None => format!("{}-{}", stem, index + 1),
    };
    path.with_file_name(name)
}

fn render_analysis(analysis: &Analysis) {
    if let Some(source) = &analysis.report.source {
        println!("Page: {}", source);
    }
    render_report(&analysis.report);
}

pub(crate) fn render_report(report: &OptimizationReport) {
    println!("\nAnalysis summary");
    println!("- Total recommendations: {}", report.total_findings);
    println!(
        "- Estimated improvement: {}",
        report.aggregate_improvement.describe()
    );

    println!("\nPriority distribution");
    for entry in &report.priority_distribution {
        println!("- {}: {} recommendations", entry.priority_label, entry.count);
    }

    if report.quick_wins.is_empty() {
        println!("\nQuick wins: none");
    } else {
        println!("\nQuick wins (high priority)");
        for (i, win) in report.quick_wins.iter().enumerate() {
            println!("{}. {}", i + 1, win.title);
            println!("   Impact: {}", win.rationale);
            println!("   Estimated improvement: {}", win.estimated_improvement);
        }
    }

    if report.findings_by_category.is_empty() {
        println!("\nNo recommendations: every checklist item is satisfied.");
        return;
    }

    println!("\nRecommendations by category");
    for group in &report.findings_by_category {
        println!("\n{}", group.category_label.to_uppercase());
        for finding in &group.findings {
            println!("- {} ({} priority)", finding.title, finding.priority_label);
            println!("  Description: {}", finding.description);
            println!("  Implementation: {}", finding.implementation);
            println!("  Estimated improvement: {}", finding.estimated_improvement);
            if finding.code_example.is_some() {
                println!("  Code example: available in the JSON export");
            }
        }
    }

    println!("\nImplementation order");
    for (i, title) in report.implementation_order.iter().enumerate() {
        println!("{}. {}", i + 1, title);
    }
}
