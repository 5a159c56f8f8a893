use super::common::*;
use crate::optimizer::profile::PageSubmission;
use crate::optimizer::sample::SAMPLE_URL;
use crate::optimizer::storage::StorageError;
use crate::optimizer::{OptimizerService, OptimizerServiceError};
use std::sync::Arc;

#[test]
fn analyze_applies_content_signals_before_evaluating() {
    let (service, _) = build_service();
    let submission = PageSubmission {
        profile: example_profile(),
        content: Some("Backed by a 2 year warranty. Read our FAQ.".to_string()),
    };

    let analysis = service.analyze(submission);

    assert_eq!(analysis.profile.has_warranty_badge, Some(true));
    // Explicit `false` is kept even though the text mentions an FAQ.
    assert_eq!(analysis.profile.has_faq, Some(false));
    assert!(!analysis.report.has_finding("trust.warranty"));
    assert!(analysis.report.has_finding("content.faq"));
}

#[test]
fn sample_analysis_reports_on_the_tapeplayers_listing() {
    let (service, _) = build_service();

    let analysis = service.sample_analysis();

    assert_eq!(analysis.report.source.as_deref(), Some(SAMPLE_URL));
    assert_eq!(analysis.report.total_findings, 9);
    assert!(analysis.report.has_finding("social_proof.reviews"));
    assert!(!analysis.report.has_finding("trust.warranty"));
    assert!(!analysis.report.has_finding("ux.product_images"));
    assert!(!analysis.report.has_finding("technical.page_speed"));
}

#[test]
fn export_report_persists_through_the_store() {
    let (service, store) = build_service();

    let (analysis, artifact) = service
        .export_report(PageSubmission::from(example_profile()))
        .expect("export succeeds");

    let saved = store.reports.lock().expect("report mutex poisoned");
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0], analysis.report);
    let file = artifact.primary_file().expect("file recorded");
    assert!(file.starts_with("conversion_optimization_report_"));
    assert!(file.ends_with(".json"));
}

#[test]
fn compare_stores_a_bundle_with_readme() {
    let (service, store) = build_service();

    let comparison = service
        .compare(PageSubmission::from(complete_profile_with_gaps()))
        .expect("comparison succeeds");

    assert_eq!(
        comparison.artifact.files,
        vec!["optimized_page.html".to_string(), "README.md".to_string()]
    );
    let bundles = store.bundles.lock().expect("bundle mutex poisoned");
    let bundle = &bundles[0];
    assert_eq!(bundle.optimized_html, comparison.page.html);
    assert!(bundle.readme.contains("https://shop.example.com/products/deck"));
    assert!(bundle.readme.contains("Customer reviews section"));
    assert!(bundle.readme.contains("FAQ section"));
    assert!(bundle
        .readme
        .contains(&comparison.analysis.report.aggregate_improvement.describe()));
}

#[test]
fn storage_failures_surface_as_service_errors() {
    let service = OptimizerService::with_defaults(Arc::new(UnavailableStore));

    let err = service
        .export_report(PageSubmission::from(example_profile()))
        .expect_err("store is offline");

    assert!(matches!(
        err,
        OptimizerServiceError::Storage(StorageError::Unavailable(_))
    ));
}

fn complete_profile_with_gaps() -> crate::optimizer::PageProfile {
    crate::optimizer::PageProfile {
        has_reviews: Some(false),
        has_faq: None,
        ..complete_profile()
    }
}
