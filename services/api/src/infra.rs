use cro_advisor::config::{ArtifactBackend, StorageConfig};
use cro_advisor::optimizer::storage::{
    comparison_dir_candidate, comparison_dir_name, names_exhausted, report_file_candidate,
    report_file_name, MAX_NAME_ATTEMPTS,
};
use cro_advisor::optimizer::{
    to_json_pretty, ArtifactStore, ComparisonBundle, FileArtifactStore, OptimizationReport,
    StorageError, StoredArtifact,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::BTreeMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Keeps exported artifacts in process memory, keyed by location.
#[derive(Default, Clone)]
pub(crate) struct InMemoryArtifactStore {
    files: Arc<Mutex<BTreeMap<String, String>>>,
}

impl InMemoryArtifactStore {
    pub(crate) fn get(&self, location: &str) -> Option<String> {
        self.files
            .lock()
            .ok()
            .and_then(|guard| guard.get(location).cloned())
    }

    /// Stores the entries of the first attempt whose keys are all free and
    /// returns that attempt number.
    fn insert_unique<F>(&self, first: &str, build: F) -> Result<u32, StorageError>
    where
        F: Fn(u32) -> Vec<(String, String)>,
    {
        let mut guard = self
            .files
            .lock()
            .map_err(|_| StorageError::Unavailable("artifact store mutex poisoned".to_string()))?;
        for attempt in 0..MAX_NAME_ATTEMPTS {
            let entries = build(attempt);
            if entries.iter().any(|(key, _)| guard.contains_key(key)) {
                continue;
            }
            guard.extend(entries);
            return Ok(attempt);
        }
        Err(names_exhausted(first))
    }
}

impl ArtifactStore for InMemoryArtifactStore {
    fn save_report(&self, report: &OptimizationReport) -> Result<StoredArtifact, StorageError> {
        let body = to_json_pretty(report)?;
        let location = |attempt| format!("memory://{}", report_file_candidate(report, attempt));
        let attempt = self.insert_unique(&report_file_name(report), |attempt| {
            vec![(location(attempt), body.clone())]
        })?;
        Ok(StoredArtifact {
            location: location(attempt),
            files: vec![report_file_candidate(report, attempt)],
        })
    }

    fn save_comparison(&self, bundle: &ComparisonBundle) -> Result<StoredArtifact, StorageError> {
        let location = |attempt| format!("memory://{}", comparison_dir_candidate(bundle, attempt));
        let attempt = self.insert_unique(&comparison_dir_name(bundle), |attempt| {
            let root = location(attempt);
            bundle
                .files()
                .iter()
                .map(|(name, contents)| (format!("{}/{}", root, name), contents.to_string()))
                .collect()
        })?;
        Ok(StoredArtifact {
            location: location(attempt),
            files: bundle
                .files()
                .iter()
                .map(|(name, _)| name.to_string())
                .collect(),
        })
    }
}

/// Store selected by `APP_ARTIFACT_STORE`.
#[derive(Clone)]
pub(crate) enum ConfiguredStore {
    Filesystem(FileArtifactStore),
    Memory(InMemoryArtifactStore),
}

impl ConfiguredStore {
    pub(crate) fn from_config(config: &StorageConfig) -> Self {
        match config.backend {
            ArtifactBackend::Filesystem => {
                Self::Filesystem(FileArtifactStore::new(config.reports_dir.clone()))
            }
            ArtifactBackend::Memory => Self::Memory(InMemoryArtifactStore::default()),
        }
    }

    pub(crate) fn describe(&self) -> String {
        match self {
            Self::Filesystem(store) => store.root().display().to_string(),
            Self::Memory(_) => "memory".to_string(),
        }
    }
}

impl ArtifactStore for ConfiguredStore {
    fn save_report(&self, report: &OptimizationReport) -> Result<StoredArtifact, StorageError> {
        match self {
            Self::Filesystem(store) => store.save_report(report),
            Self::Memory(store) => store.save_report(report),
        }
    }

    fn save_comparison(&self, bundle: &ComparisonBundle) -> Result<StoredArtifact, StorageError> {
        match self {
            Self::Filesystem(store) => store.save_comparison(bundle),
            Self::Memory(store) => store.save_comparison(bundle),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cro_advisor::optimizer::sample::tapeplayers_page;
    use cro_advisor::optimizer::{evaluate, synthesize, ReportBuilder};
    use std::path::PathBuf;

    fn sample_bundle() -> (OptimizationReport, ComparisonBundle) {
        let profile = tapeplayers_page();
        let findings = evaluate(&profile);
        let report = ReportBuilder::default().build(&findings, &profile);
        let page = synthesize(&profile, &findings);
        let bundle = ComparisonBundle::new(profile.url.clone(), &report, &page);
        (report, bundle)
    }

    #[test]
    fn memory_store_keeps_report_and_bundle_files() {
        let store = InMemoryArtifactStore::default();
        let (report, bundle) = sample_bundle();

        let saved = store.save_report(&report).expect("report saved");
        let body = store.get(&saved.location).expect("report kept");
        assert!(body.contains("\"total_findings\""));

        let saved = store.save_comparison(&bundle).expect("bundle saved");
        let html = store
            .get(&format!("{}/optimized_page.html", saved.location))
            .expect("html kept");
        assert_eq!(html, bundle.optimized_html);
    }

    #[test]
    fn memory_store_keeps_same_second_exports_apart() {
        let store = InMemoryArtifactStore::default();
        let (report, bundle) = sample_bundle();

        let first = store.save_report(&report).expect("first report");
        let second = store.save_report(&report).expect("second report");
        assert_ne!(first.location, second.location);
        assert!(second.location.ends_with("_2.json"));
        assert!(store.get(&first.location).is_some());
        assert!(store.get(&second.location).is_some());

        let first = store.save_comparison(&bundle).expect("first bundle");
        let second = store.save_comparison(&bundle).expect("second bundle");
        assert_eq!(second.location, format!("{}_2", first.location));
    }

    #[test]
    fn configured_store_follows_backend() {
        let memory = ConfiguredStore::from_config(&StorageConfig {
            backend: ArtifactBackend::Memory,
            reports_dir: PathBuf::from("unused"),
        });
        assert_eq!(memory.describe(), "memory");

        let dir = tempfile::TempDir::new().expect("temp dir");
        let filesystem = ConfiguredStore::from_config(&StorageConfig {
            backend: ArtifactBackend::Filesystem,
            reports_dir: dir.path().to_path_buf(),
        });
        let (report, _) = sample_bundle();
        let saved = filesystem.save_report(&report).expect("report saved");
        assert!(std::path::Path::new(&saved.location).exists());
    }
}
