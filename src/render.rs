//! Static site rendering from the document store.
//!
//! Stage 2 of the pipeline. Reads every stored document once and writes:
//!
//! - `output/document/<id>.html`, one per document
//! - `output/index.html`, the latest-additions front page
//!
//! ## Skip Policy
//!
//! A per-document page that already exists on disk is left untouched,
//! byte for byte, unless the override flag is set. Pages are immutable in
//! the common case (archives grow, they rarely change), so re-rendering
//! the whole site on every run would be wasted work and would churn file
//! mtimes that downstream deploy steps key on. The index page is the
//! opposite: it must always reflect the current top-10, it is one cheap
//! write, and so it is regenerated unconditionally.
//!
//! Markup production lives in [`crate::templates`]; this module only
//! decides which pages to write, and where.

use crate::store::{Store, StoreError};
use crate::templates;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

/// Number of documents shown on the index page.
pub const INDEX_LIMIT: usize = 10;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Directory the site is written to.
    pub output_dir: PathBuf,
    /// Re-render document pages that already exist.
    pub force: bool,
    /// Site title shown on every page.
    pub title: String,
}

/// What one render run wrote and what it left alone.
#[derive(Debug, Default)]
pub struct RenderSummary {
    /// Ids whose pages were written this run.
    pub rendered: Vec<String>,
    /// Ids whose pages already existed and were skipped.
    pub skipped: Vec<String>,
    /// Number of documents on the regenerated index page.
    pub index_entries: usize,
}

/// Render every stored document plus the index page into
/// `options.output_dir`.
pub fn render_site(store: &Store, options: &RenderOptions) -> Result<RenderSummary, RenderError> {
    let document_dir = options.output_dir.join("document");
    fs::create_dir_all(&document_dir)?;

    let mut summary = RenderSummary::default();

    for doc in store.all()? {
        let page_path = document_dir.join(format!("{}.html", doc.record.id));

        if page_path.exists() && !options.force {
            summary.skipped.push(doc.record.id);
            continue;
        }

        let html = templates::document_page(&doc, &options.title);
        fs::write(&page_path, html.into_string())?;
        summary.rendered.push(doc.record.id);
    }

    let latest = store.latest(INDEX_LIMIT)?;
    summary.index_entries = latest.len();
    let html = templates::index_page(&latest, &options.title);
    fs::write(options.output_dir.join("index.html"), html.into_string())?;

    Ok(summary)
}
