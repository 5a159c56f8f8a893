//! CSV audit exports to page profiles.
//!
//! One row per page. Column names match the profile field names; `benefits`
//! is pipe separated and an optional `content` column carries raw page text
//! used to infer attributes the audit left blank.

mod parser;

use super::profile::{PageProfile, PageSubmission};
use std::io::Read;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ProfileImportError {
    #[error("failed to read page audit export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid page audit CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: column `{column}` has unsupported value '{value}'")]
    InvalidValue {
        line: usize,
        column: &'static str,
        value: String,
    },
}

pub struct ProfileImporter;

impl ProfileImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<PageProfile>, ProfileImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Parses every row, applying content signals where a `content` cell is
    /// present.
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<PageProfile>, ProfileImportError> {
        let submissions = Self::submissions_from_reader(reader)?;
        tracing::debug!(rows = submissions.len(), "parsed page audit export");
        Ok(submissions
            .into_iter()
            .map(PageSubmission::into_profile)
            .collect())
    }

    pub fn submissions_from_reader<R: Read>(
        reader: R,
    ) -> Result<Vec<PageSubmission>, ProfileImportError> {
        parser::parse_submissions(reader)
    }
}
