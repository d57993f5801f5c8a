use crate::{
    config::Config,
    engine::Engine,
    manifest::{manifest_path, ManifestDocument, SplitManifest},
    naming::sanitize_filename,
    report::{DocumentFailure, SplitOutcome},
    split_plan::{default_name, FinalizedPlan},
    util::{ensure_dir, source_stem},
};
use anyhow::Result;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error, info, warn};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    #[error("PDF has only {page_count} page(s) - no splitting needed")]
    TooFewPages { page_count: u32, min_pages: u32 },

    #[error("No splits defined. PDF remains unchanged.")]
    NoSplits,
}

pub fn check_page_count(cfg: &Config, page_count: u32) -> Result<(), SkipReason> {
    if page_count < cfg.limits.min_pages_to_split {
        return Err(SkipReason::TooFewPages {
            page_count,
            min_pages: cfg.limits.min_pages_to_split,
        });
    }
    Ok(())
}

pub fn should_execute(cfg: &Config, page_count: u32, plan: &FinalizedPlan) -> Result<(), SkipReason> {
    check_page_count(cfg, page_count)?;
    if plan.is_single_document() && !cfg.split.allow_single_document {
        return Err(SkipReason::NoSplits);
    }
    Ok(())
}

// Relative folders resolve against the source PDF's directory.
pub fn resolve_output_dir(cfg: &Config, source: &Path, folder: Option<&Path>) -> PathBuf {
    let folder = folder
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(&cfg.output.default_folder));
    if folder.is_absolute() {
        return folder;
    }
    let parent = source.parent().unwrap_or_else(|| Path::new(""));
    parent.join(folder)
}

pub struct Splitter<E: Engine> {
    cfg: Config,
    engine: E,
}

impl<E: Engine> Splitter<E> {
    pub fn new(cfg: &Config, engine: E) -> Self {
        Self {
            cfg: cfg.clone(),
            engine,
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn run(&self, source: &Path, plan: &FinalizedPlan, output_dir: &Path) -> Result<SplitOutcome> {
        ensure_dir(output_dir)?;
        let stem = source_stem(source);

        info!(
            "splitting {} into {} document(s) -> {}",
            source.display(),
            plan.documents.len(),
            output_dir.display()
        );

        let mut manifest = SplitManifest::new(source, plan.total_pages, output_dir);
        let mut failures = Vec::new();
        let mut seen = HashSet::new();

        for doc in &plan.documents {
            let filename = sanitize_filename(
                &self.cfg,
                &doc.filename,
                &default_name(&stem, doc.index),
            );
            if filename != doc.filename {
                debug!("document {} name {:?} -> {:?}", doc.document_number(), doc.filename, filename);
            }
            if !seen.insert(filename.to_lowercase()) {
                warn!(
                    "document {} reuses filename {}; earlier output will be overwritten",
                    doc.document_number(),
                    filename
                );
            }

            let out_path = output_dir.join(&filename);
            match self.engine.write_range(source, doc.range(), &out_path) {
                Ok(()) => {
                    info!(
                        "created {} (pages {}-{})",
                        out_path.display(),
                        doc.start_page,
                        doc.end_page
                    );
                    manifest.documents.push(ManifestDocument {
                        document_number: doc.document_number(),
                        start_page: doc.start_page,
                        end_page: doc.end_page,
                        filename,
                    });
                }
                Err(err) => {
                    error!(
                        "document {} (pages {}-{}) failed: {:#}",
                        doc.document_number(),
                        doc.start_page,
                        doc.end_page,
                        err
                    );
                    failures.push(DocumentFailure {
                        document_number: doc.document_number(),
                        start_page: doc.start_page,
                        end_page: doc.end_page,
                        filename,
                        error: format!("{err:#}"),
                    });
                }
            }
        }

        let mut manifest_error = None;
        let manifest_path = if self.cfg.output.write_manifest {
            let path = manifest_path(output_dir, &stem, &self.cfg.output.manifest_suffix);
            match manifest.write(&path) {
                Ok(()) => {
                    info!("summary saved: {}", path.display());
                    Some(path)
                }
                Err(err) => {
                    error!("summary not written: {:#}", err);
                    manifest_error = Some(format!("{err:#}"));
                    None
                }
            }
        } else {
            None
        };

        let attempted = plan.documents.len();
        let failed = failures.len();
        if failed > 0 {
            warn!("{} of {} document(s) failed", failed, attempted);
        }

        Ok(SplitOutcome {
            output_dir: output_dir.to_path_buf(),
            attempted,
            succeeded: attempted - failed,
            failed,
            documents: manifest.documents,
            failures,
            manifest_path,
            manifest_error,
        })
    }
}
