use chrono::{TimeZone, Utc};
use cro_advisor::optimizer::sample::tapeplayers_page;
use cro_advisor::optimizer::{
    evaluate, synthesize, ArtifactStore, ComparisonBundle, FileArtifactStore, ReportBuilder,
};
use tempfile::TempDir;

fn analyzed_sample() -> (
    cro_advisor::optimizer::OptimizationReport,
    cro_advisor::optimizer::OptimizedPage,
) {
    let profile = tapeplayers_page();
    let findings = evaluate(&profile);
    let at = Utc
        .with_ymd_and_hms(2025, 1, 2, 3, 4, 5)
        .single()
        .expect("valid timestamp");
    let report = ReportBuilder::default().build_at(&findings, &profile, at);
    let page = synthesize(&profile, &findings);
    (report, page)
}

#[test]
fn file_store_writes_timestamped_report() {
    let dir = TempDir::new().expect("temp dir");
    let store = FileArtifactStore::new(dir.path().join("reports"));
    let (report, _) = analyzed_sample();

    let artifact = store.save_report(&report).expect("report saved");

    assert_eq!(
        artifact.primary_file(),
        Some("conversion_optimization_report_20250102_030405.json")
    );
    let written = std::fs::read_to_string(&artifact.location).expect("report readable");
    let value: serde_json::Value = serde_json::from_str(&written).expect("valid json");
    assert_eq!(value["total_findings"], report.total_findings);
}

#[test]
fn file_store_writes_comparison_directory() {
    let dir = TempDir::new().expect("temp dir");
    let store = FileArtifactStore::new(dir.path());
    let (report, page) = analyzed_sample();
    let bundle = ComparisonBundle::new(report.source.clone(), &report, &page);

    let artifact = store.save_comparison(&bundle).expect("bundle saved");

    let root = dir.path().join("comparison_20250102_030405");
    assert_eq!(artifact.location, root.display().to_string());
    let html = std::fs::read_to_string(root.join("optimized_page.html")).expect("html written");
    assert!(html.contains("<!DOCTYPE html>"));
    let readme = std::fs::read_to_string(root.join("README.md")).expect("readme written");
    assert!(readme.contains("tapeplayers.com"));
    assert!(readme.contains("## Improvements applied"));
}

#[test]
fn same_second_reports_do_not_overwrite_each_other() {
    let dir = TempDir::new().expect("temp dir");
    let store = FileArtifactStore::new(dir.path());
    let (report, _) = analyzed_sample();

    let first = store.save_report(&report).expect("first report");
    let second = store.save_report(&report).expect("second report");

    assert_eq!(
        second.primary_file(),
        Some("conversion_optimization_report_20250102_030405_2.json")
    );
    assert_ne!(first.location, second.location);
    assert!(std::path::Path::new(&first.location).exists());
    assert!(std::path::Path::new(&second.location).exists());
}

#[test]
fn same_second_comparisons_get_their_own_directory() {
    let dir = TempDir::new().expect("temp dir");
    let store = FileArtifactStore::new(dir.path());
    let (report, page) = analyzed_sample();
    let bundle = ComparisonBundle::new(report.source.clone(), &report, &page);

    store.save_comparison(&bundle).expect("first bundle");
    let second = store.save_comparison(&bundle).expect("second bundle");

    let root = dir.path().join("comparison_20250102_030405_2");
    assert_eq!(second.location, root.display().to_string());
    assert!(root.join("optimized_page.html").exists());
    assert!(root.join("README.md").exists());
}

#[test]
fn file_store_reports_unwritable_root() {
    let dir = TempDir::new().expect("temp dir");
    let blocker = dir.path().join("occupied");
    std::fs::write(&blocker, "not a directory").expect("write blocker");
    let store = FileArtifactStore::new(&blocker);
    let (report, _) = analyzed_sample();

    let err = store.save_report(&report).expect_err("root is a file");
    assert!(err.to_string().contains("occupied"));
}
