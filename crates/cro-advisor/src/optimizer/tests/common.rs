use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::optimizer::comparison::ComparisonBundle;
use crate::optimizer::profile::PageProfile;
use crate::optimizer::report::OptimizationReport;
use crate::optimizer::storage::{ArtifactStore, StorageError, StoredArtifact};
use crate::optimizer::{optimizer_router, OptimizerService};

/// Profile from the product brief: reviews and trust badges missing, no
/// price anchor, a single CTA, no FAQ, but a specification table.
pub(super) fn example_profile() -> PageProfile {
    PageProfile {
        has_reviews: Some(false),
        has_trust_badges: Some(false),
        original_price: Some(249.0),
        current_price: Some(249.0),
        cta_count: Some(1),
        has_faq: Some(false),
        has_spec_table: Some(true),
        ..PageProfile::default()
    }
}

/// A page that satisfies every checklist item.
pub(super) fn complete_profile() -> PageProfile {
    PageProfile {
        url: Some("https://shop.example.com/products/deck".to_string()),
        title: Some("Cassette Deck".to_string()),
        current_price: Some(199.0),
        original_price: Some(249.0),
        has_warranty_badge: Some(true),
        has_trust_badges: Some(true),
        image_count: Some(6),
        has_video: Some(true),
        benefits: Some(
            [
                "Dolby noise reduction",
                "Auto reverse",
                "Serviced belts",
                "Remote included",
                "90 day warranty",
            ]
            .into_iter()
            .map(str::to_string)
            .collect(),
        ),
        has_reviews: Some(true),
        has_urgency: Some(true),
        has_action_oriented_cta: Some(true),
        cta_count: Some(2),
        has_spec_table: Some(true),
        has_faq: Some(true),
        mobile_optimized: Some(true),
        load_time_seconds: Some(1.8),
    }
}

pub(super) fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53)
        .single()
        .expect("valid timestamp")
}

#[derive(Default)]
pub(super) struct MemoryStore {
    pub(super) reports: Mutex<Vec<OptimizationReport>>,
    pub(super) bundles: Mutex<Vec<ComparisonBundle>>,
}

impl ArtifactStore for MemoryStore {
    fn save_report(&self, report: &OptimizationReport) -> Result<StoredArtifact, StorageError> {
        let mut guard = self.reports.lock().expect("report mutex poisoned");
        guard.push(report.clone());
        Ok(StoredArtifact {
            location: format!("memory://reports/{}", guard.len()),
            files: vec![crate::optimizer::storage::report_file_name(report)],
        })
    }

    fn save_comparison(&self, bundle: &ComparisonBundle) -> Result<StoredArtifact, StorageError> {
        let mut guard = self.bundles.lock().expect("bundle mutex poisoned");
        guard.push(bundle.clone());
        Ok(StoredArtifact {
            location: format!("memory://comparisons/{}", guard.len()),
            files: bundle
                .files()
                .iter()
                .map(|(name, _)| name.to_string())
                .collect(),
        })
    }
}

pub(super) struct UnavailableStore;

impl ArtifactStore for UnavailableStore {
    fn save_report(&self, _report: &OptimizationReport) -> Result<StoredArtifact, StorageError> {
        Err(StorageError::Unavailable("disk offline".to_string()))
    }

    fn save_comparison(&self, _bundle: &ComparisonBundle) -> Result<StoredArtifact, StorageError> {
        Err(StorageError::Unavailable("disk offline".to_string()))
    }
}

pub(super) fn build_service() -> (OptimizerService<MemoryStore>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let service = OptimizerService::with_defaults(store.clone());
    (service, store)
}

pub(super) fn router_with_service(service: OptimizerService<MemoryStore>) -> axum::Router {
    optimizer_router(Arc::new(service))
}

pub(super) async fn read_body(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body")
        .to_vec()
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = read_body(response).await;
    serde_json::from_slice(&body).expect("json payload")
}
