//! Stage 1: the per-document ingestion pipeline and the batch driver.
//!
//! One document flows parse → normalize → resolve id → upsert, all
//! synchronous, all or nothing: a document that fails anywhere along the
//! way writes no row at all.
//!
//! The batch driver walks a documents tree for `details.md` files and runs
//! the pipeline on each. Failures are isolated per document: one unreadable
//! file or one refused upsert is recorded and the walk continues, so a bad
//! document can never block the rest of the archive.

use crate::identity::{self, IdentityError};
use crate::parse;
use crate::record;
use crate::store::{Store, StoreError, UpsertOutcome};
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Filename the batch driver scans a documents tree for.
pub const DETAILS_FILENAME: &str = "details.md";

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("file not found: {0}")]
    MissingFile(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("identity error: {0}")]
    Identity(#[from] IdentityError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Result of successfully processing one metadata document.
#[derive(Debug)]
pub struct ProcessedDocument {
    pub id: String,
    pub outcome: UpsertOutcome,
    /// Non-fatal normalization warnings (e.g. an unparseable date).
    pub warnings: Vec<String>,
    /// Count of unrecognized lines the parser dropped.
    pub skipped_lines: usize,
}

/// Run the full pipeline for the document at `path`.
pub fn process_document(path: &Path, store: &Store) -> Result<ProcessedDocument, IngestError> {
    if !path.exists() {
        return Err(IngestError::MissingFile(path.to_path_buf()));
    }

    let text = fs::read_to_string(path)?;
    let parsed = parse::parse(&text);
    let id = identity::resolve(path)?;
    let (document, warnings) = record::normalize(&parsed, &id);
    let outcome = store.upsert(&document)?;

    Ok(ProcessedDocument {
        id,
        outcome,
        warnings,
        skipped_lines: parsed.skipped.len(),
    })
}

/// Summary of one batch run over a documents tree.
#[derive(Debug, Default)]
pub struct IngestSummary {
    pub processed: Vec<ProcessedDocument>,
    pub failures: Vec<(PathBuf, IngestError)>,
}

/// Walk `root` and process every `details.md` found, in path order.
///
/// A failure in one document is recorded in the summary and never aborts
/// the rest of the batch.
pub fn ingest_tree(root: &Path, store: &Store) -> IngestSummary {
    let mut summary = IngestSummary::default();

    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() || entry.file_name() != OsStr::new(DETAILS_FILENAME) {
            continue;
        }
        match process_document(entry.path(), store) {
            Ok(processed) => summary.processed.push(processed),
            Err(err) => summary.failures.push((entry.path().to_path_buf(), err)),
        }
    }

    summary
}
