//! Idempotent persistence of document records in SQLite.
//!
//! One table, `documents`, keyed by the directory-derived id. The only
//! write operation exposed is [`Store::upsert`]:
//!
//! - unseen id → insert the full row, stamping `created_at` with the
//!   current time
//! - known id → replace every mutable field in place, leaving `created_at`
//!   untouched
//!
//! Insert and update are separate statements rather than one
//! `INSERT OR REPLACE`, so the write-once `created_at` invariant is
//! enforced by the shape of the code: the update statement simply has no
//! way to mention the column. Each call is a single SQL statement and
//! therefore atomic per document; a failure leaves no partial row.
//!
//! `created_at` is the archive's notion of "when was this added", which
//! drives the latest-additions index page. `created_irl_at` is the
//! document's own real-world date and is just another mutable field.
//!
//! Concurrent writers are not coordinated here. SQLite's own locking is
//! the only protection; the tool assumes a single writer at a time.

use crate::record::DocumentRecord;
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

const SCHEMA: &str = "\
CREATE TABLE IF NOT EXISTS documents (
    id             TEXT PRIMARY KEY,
    name           TEXT NOT NULL,
    type           TEXT NOT NULL,
    files          TEXT NOT NULL,
    created_irl_at INTEGER NOT NULL,
    language       TEXT NOT NULL,
    source         TEXT NOT NULL,
    country        TEXT NOT NULL,
    tags           TEXT NOT NULL,
    uploader       TEXT NOT NULL,
    created_at     INTEGER NOT NULL
)";

/// A row as persisted: the mutable record plus the write-once stamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredDocument {
    pub record: DocumentRecord,
    /// Epoch seconds of first insertion. Never changes on update.
    pub created_at: i64,
}

/// What an upsert did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Updated,
}

/// Handle to the archive database.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open (creating if needed) the database at `path` and ensure the
    /// schema exists.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        Self::from_connection(Connection::open(path)?)
    }

    /// In-memory database, used by tests.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Insert-or-update `record`, keyed by its id. `created_at` is stamped
    /// with the current time on first insertion only.
    pub fn upsert(&self, record: &DocumentRecord) -> Result<UpsertOutcome, StoreError> {
        self.upsert_at(record, Utc::now().timestamp())
    }

    /// [`Store::upsert`] with an explicit clock, for deterministic tests.
    pub fn upsert_at(&self, record: &DocumentRecord, now: i64) -> Result<UpsertOutcome, StoreError> {
        if self.exists(&record.id)? {
            self.update(record)?;
            Ok(UpsertOutcome::Updated)
        } else {
            self.insert(record, now)?;
            Ok(UpsertOutcome::Inserted)
        }
    }

    fn exists(&self, id: &str) -> Result<bool, StoreError> {
        let found = self
            .conn
            .query_row("SELECT id FROM documents WHERE id = ?1", params![id], |_| {
                Ok(())
            })
            .optional()?;
        Ok(found.is_some())
    }

    fn insert(&self, record: &DocumentRecord, created_at: i64) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO documents
                 (id, name, type, files, created_irl_at, language, source,
                  country, tags, uploader, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                record.id,
                record.name,
                record.doc_type,
                record.files,
                record.created_irl_at,
                record.language,
                record.source,
                record.country,
                record.tags,
                record.uploader,
                created_at,
            ],
        )?;
        Ok(())
    }

    // No created_at here: updates cannot touch the write-once stamp.
    fn update(&self, record: &DocumentRecord) -> Result<(), StoreError> {
        self.conn.execute(
            "UPDATE documents SET
                 name = ?1, type = ?2, files = ?3, created_irl_at = ?4,
                 language = ?5, source = ?6, country = ?7, tags = ?8,
                 uploader = ?9
             WHERE id = ?10",
            params![
                record.name,
                record.doc_type,
                record.files,
                record.created_irl_at,
                record.language,
                record.source,
                record.country,
                record.tags,
                record.uploader,
                record.id,
            ],
        )?;
        Ok(())
    }

    /// Fetch one document by id.
    pub fn get(&self, id: &str) -> Result<Option<StoredDocument>, StoreError> {
        let doc = self
            .conn
            .query_row(
                "SELECT id, name, type, files, created_irl_at, language, source,
                        country, tags, uploader, created_at
                 FROM documents WHERE id = ?1",
                params![id],
                row_to_document,
            )
            .optional()?;
        Ok(doc)
    }

    /// Every stored document, in stable insertion order.
    pub fn all(&self) -> Result<Vec<StoredDocument>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, type, files, created_irl_at, language, source,
                    country, tags, uploader, created_at
             FROM documents ORDER BY rowid",
        )?;
        let docs = stmt.query_map([], row_to_document)?;
        Ok(docs.collect::<Result<_, _>>()?)
    }

    /// The `limit` most recently added documents, newest first. Ties on
    /// `created_at` fall back to insertion order so the result is stable.
    pub fn latest(&self, limit: usize) -> Result<Vec<StoredDocument>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, type, files, created_irl_at, language, source,
                    country, tags, uploader, created_at
             FROM documents ORDER BY created_at DESC, rowid LIMIT ?1",
        )?;
        let docs = stmt.query_map(params![limit as i64], row_to_document)?;
        Ok(docs.collect::<Result<_, _>>()?)
    }
}

fn row_to_document(row: &Row<'_>) -> rusqlite::Result<StoredDocument> {
    Ok(StoredDocument {
        record: DocumentRecord {
            id: row.get(0)?,
            name: row.get(1)?,
            doc_type: row.get(2)?,
            files: row.get(3)?,
            created_irl_at: row.get(4)?,
            language: row.get(5)?,
            source: row.get(6)?,
            country: row.get(7)?,
            tags: row.get(8)?,
            uploader: row.get(9)?,
        },
        created_at: row.get(10)?,
    })
}
