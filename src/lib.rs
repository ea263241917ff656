//! # Archivador
//!
//! A minimal static site generator for document archives. Your filesystem is
//! the data source: each document lives in its own directory, carries a
//! `details.md` metadata file, and the directory name is the document's
//! permanent identifier.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! Archivador processes content through two independent stages that meet in
//! a local SQLite database:
//!
//! ```text
//! 1. Ingest    documents/*/details.md  →  archivo.db   (markup → relational record)
//! 2. Render    archivo.db              →  output/      (static HTML site)
//! ```
//!
//! The stages are decoupled on purpose:
//!
//! - **Incremental archives**: documents are added one at a time (often from
//!   CI on every push) without touching the rendered site.
//! - **Idempotence**: re-ingesting a document converges to the same row, and
//!   re-rendering skips pages that already exist.
//! - **Testability**: each stage is exercised against an in-memory database
//!   or a temp directory, no shared global state.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`parse`] | Line scanner turning `details.md` markup into a raw field mapping |
//! | [`record`] | Normalization of raw fields into the canonical document record |
//! | [`identity`] | Slug derivation from the document's containing directory |
//! | [`store`] | Idempotent create-or-update persistence in SQLite |
//! | [`ingest`] | Per-document pipeline plus the batch driver over a documents tree |
//! | [`render`] | Stage 2 — page selection and the skip/override policy |
//! | [`templates`] | Maud HTML templates for document pages and the index |
//! | [`config`] | Optional `archivador.toml` loading and the override switch |
//! | [`output`] | CLI output formatting for all subcommands |
//!
//! # Design Decisions
//!
//! ## Directory Name as Identity
//!
//! A document's id is the name of the directory its `details.md` lives in.
//! No front-matter id, no UUID registry: renaming the directory creates a new
//! document, and two directories with the same name silently collide. That
//! trade-off keeps the archive greppable and the convention enforceable by
//! eye. [`identity::resolve`] documents the collision risk at the interface.
//!
//! ## Permissive Parsing
//!
//! Lines that match neither the `**Label:** value` pattern nor a list item
//! are skipped, not rejected. Contributors write these files by hand; a stray
//! sentence should not block ingestion. Skipped lines are reported back so a
//! typo in a label is visible rather than silent.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/): malformed markup
//! is a compile error, interpolation is auto-escaped, and there is no
//! template directory to ship or get out of sync.
//!
//! ## SQLite as the Hand-Off Point
//!
//! The database is the only contract between the two stages. Ingestion is
//! safe to run from CI on any subset of documents, in any order, any number
//! of times; rendering only ever reads. `created_at` is stamped once at
//! first insertion, which is what keeps "latest additions" on the index page
//! meaningful across re-ingests.

pub mod config;
pub mod identity;
pub mod ingest;
pub mod output;
pub mod parse;
pub mod record;
pub mod render;
pub mod store;
pub mod templates;
