use crate::util::now_rfc3339;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Summary written next to the split outputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitManifest {
    pub original_file: String,
    pub split_timestamp: String,
    pub total_pages: u32,
    pub documents: Vec<ManifestDocument>,
    pub output_folder: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestDocument {
    pub document_number: usize,
    pub start_page: u32,
    pub end_page: u32,
    pub filename: String,
}

impl SplitManifest {
    pub fn new(source: &Path, total_pages: u32, output_dir: &Path) -> Self {
        Self {
            original_file: source
                .file_name()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default(),
            split_timestamp: now_rfc3339(),
            total_pages,
            documents: Vec::new(),
            output_folder: output_dir.display().to_string(),
        }
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        // serde_json keeps non-ASCII as-is and pretty-prints with two spaces.
        let raw = serde_json::to_string_pretty(self)?;
        std::fs::write(path, raw).with_context(|| format!("writing manifest: {}", path.display()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading manifest: {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("parsing manifest: {}", path.display()))
    }
}

pub fn manifest_path(output_dir: &Path, source_stem: &str, suffix: &str) -> PathBuf {
    output_dir.join(format!("{source_stem}{suffix}"))
}
