use super::comparison::ComparisonBundle;
use super::report::{to_json_pretty, OptimizationReport};
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const REPORT_EXTENSION: &str = ".json";
/// Artifacts sharing a timestamp get `_2`, `_3`, ... up to this many names.
pub const MAX_NAME_ATTEMPTS: u32 = 1000;

/// Where an artifact ended up and which files make it up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredArtifact {
    pub location: String,
    pub files: Vec<String>,
}

impl StoredArtifact {
    pub fn primary_file(&self) -> Option<&str> {
        self.files.first().map(String::as_str)
    }
}

/// Persistence seam for exported reports and comparison bundles.
pub trait ArtifactStore: Send + Sync {
    fn save_report(&self, report: &OptimizationReport) -> Result<StoredArtifact, StorageError>;
    fn save_comparison(&self, bundle: &ComparisonBundle) -> Result<StoredArtifact, StorageError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("artifact store unavailable: {0}")]
    Unavailable(String),
}

pub fn report_file_name(report: &OptimizationReport) -> String {
    report_file_candidate(report, 0)
}

pub fn comparison_dir_name(bundle: &ComparisonBundle) -> String {
    comparison_dir_candidate(bundle, 0)
}

/// Name for the `attempt`-th report sharing a timestamp. Attempt 0 is the
/// plain name, later attempts carry a `_<n>` suffix starting at 2.
pub fn report_file_candidate(report: &OptimizationReport, attempt: u32) -> String {
    format!(
        "conversion_optimization_report_{}{}{}",
        report.analyzed_at.format(TIMESTAMP_FORMAT),
        collision_suffix(attempt),
        REPORT_EXTENSION
    )
}

pub fn comparison_dir_candidate(bundle: &ComparisonBundle, attempt: u32) -> String {
    format!(
        "comparison_{}{}",
        bundle.created_at.format(TIMESTAMP_FORMAT),
        collision_suffix(attempt)
    )
}

fn collision_suffix(attempt: u32) -> String {
    if attempt == 0 {
        String::new()
    } else {
        format!("_{}", attempt + 1)
    }
}

pub fn names_exhausted(first: &str) -> StorageError {
    StorageError::Unavailable(format!(
        "no free artifact name after {} attempts starting at {}",
        MAX_NAME_ATTEMPTS, first
    ))
}

/// Writes artifacts beneath a root directory, creating it on demand.
#[derive(Debug, Clone)]
pub struct FileArtifactStore {
    root: PathBuf,
}

impl FileArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> StorageError + '_ {
    move |source| StorageError::Io {
        path: path.display().to_string(),
        source,
    }
}

impl ArtifactStore for FileArtifactStore {
    fn save_report(&self, report: &OptimizationReport) -> Result<StoredArtifact, StorageError> {
        fs::create_dir_all(&self.root).map_err(io_error(&self.root))?;
        let body = to_json_pretty(report)?;

        for attempt in 0..MAX_NAME_ATTEMPTS {
            let file_name = report_file_candidate(report, attempt);
            let path = self.root.join(&file_name);
            let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => file,
                Err(err) if err.kind() == ErrorKind::AlreadyExists => continue,
                Err(err) => return Err(io_error(&path)(err)),
            };
            file.write_all(body.as_bytes()).map_err(io_error(&path))?;
            tracing::info!(path = %path.display(), "report written");

            return Ok(StoredArtifact {
                location: path.display().to_string(),
                files: vec![file_name],
            });
        }

        Err(names_exhausted(&report_file_name(report)))
    }

    fn save_comparison(&self, bundle: &ComparisonBundle) -> Result<StoredArtifact, StorageError> {
        fs::create_dir_all(&self.root).map_err(io_error(&self.root))?;

        for attempt in 0..MAX_NAME_ATTEMPTS {
            let dir = self.root.join(comparison_dir_candidate(bundle, attempt));
            match fs::create_dir(&dir) {
                Ok(()) => {}
                Err(err) if err.kind() == ErrorKind::AlreadyExists => continue,
                Err(err) => return Err(io_error(&dir)(err)),
            }

            let mut files = Vec::new();
            for (name, contents) in bundle.files() {
                let path = dir.join(name);
                fs::write(&path, contents).map_err(io_error(&path))?;
                files.push(name.to_string());
            }
            tracing::info!(path = %dir.display(), files = files.len(), "comparison bundle written");

            return Ok(StoredArtifact {
                location: dir.display().to_string(),
                files,
            });
        }

        Err(names_exhausted(&comparison_dir_name(bundle)))
    }
}
