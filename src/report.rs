use crate::manifest::ManifestDocument;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Aggregate result of one batch. Failures never abort the batch, so
/// `succeeded + failed == attempted` always holds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitOutcome {
    pub output_dir: PathBuf,
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub documents: Vec<ManifestDocument>,
    pub failures: Vec<DocumentFailure>,
    pub manifest_path: Option<PathBuf>,
    pub manifest_error: Option<String>,
}

impl SplitOutcome {
    pub fn all_ok(&self) -> bool {
        self.failed == 0 && self.manifest_error.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentFailure {
    pub document_number: usize,
    pub start_page: u32,
    pub end_page: u32,
    pub filename: String,
    pub error: String,
}
