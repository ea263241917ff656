//! Normalization of raw metadata into the canonical document record.
//!
//! The mapping from `details.md` labels to record fields is a fixed table:
//!
//! | Label | Field | Default |
//! |-------|-------|---------|
//! | `Nombre` | `name` | empty |
//! | `Tipo` | `doc_type` | empty, lower-cased, `imagen` → `image` |
//! | `Ficheros` | `files` | empty |
//! | `Fecha` | `created_irl_at` | `0`, parsed from `YYYY-MM-DD` |
//! | `Idioma` | `language` | empty |
//! | `Fuente` | `source` | empty |
//! | `País` | `country` | empty |
//! | `Tags` | `tags` | empty, already comma-joined by the parser |
//! | `Autor` | `uploader` | `"Unknown"` |
//!
//! Normalization is a pure function of its inputs. An unparseable `Fecha`
//! is a warning, not an error: the record falls back to the zero sentinel
//! and ingestion continues. Zero is also what "no date supplied" produces,
//! so the two cases are indistinguishable downstream; the warning at ingest
//! time is the only place the difference is visible.

use crate::parse::ParsedDocument;
use chrono::NaiveDate;

/// Sentinel uploader for documents whose `Autor` label is absent.
pub const UNKNOWN_UPLOADER: &str = "Unknown";

/// The accepted `Fecha` format.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// The canonical, normalized form of one archive document.
///
/// This is the mutable portion of a stored row: every field here is fully
/// replaced on each upsert. The write-once `created_at` stamp deliberately
/// lives on [`crate::store::StoredDocument`] instead, so an update cannot
/// touch it even by accident.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRecord {
    /// Stable identifier, derived from the containing directory name.
    pub id: String,
    pub name: String,
    /// Lower-cased category label (`image`, `documento`, ...).
    pub doc_type: String,
    /// Free-form description of the constituent files.
    pub files: String,
    /// Epoch seconds of the document's real-world date, 0 when unknown.
    pub created_irl_at: i64,
    pub language: String,
    pub source: String,
    pub country: String,
    /// Comma-joined tag list, empty when untagged.
    pub tags: String,
    pub uploader: String,
}

/// Map parsed metadata plus a resolved id into a [`DocumentRecord`].
///
/// Returns the record together with any non-fatal warnings (currently only
/// a malformed `Fecha`).
pub fn normalize(parsed: &ParsedDocument, id: &str) -> (DocumentRecord, Vec<String>) {
    let mut warnings = Vec::new();

    let mut doc_type = parsed.field("Tipo").to_lowercase();
    if doc_type == "imagen" {
        doc_type = "image".to_string();
    }

    let date_str = parsed.field("Fecha");
    let created_irl_at = if date_str.is_empty() {
        0
    } else {
        parse_date(date_str).unwrap_or_else(|| {
            warnings.push(format!("invalid date '{date_str}', expected YYYY-MM-DD"));
            0
        })
    };

    let record = DocumentRecord {
        id: id.to_string(),
        name: parsed.field("Nombre").to_string(),
        doc_type,
        files: parsed.field("Ficheros").to_string(),
        created_irl_at,
        language: parsed.field("Idioma").to_string(),
        source: parsed.field("Fuente").to_string(),
        country: parsed.field("País").to_string(),
        tags: parsed.field("Tags").to_string(),
        uploader: parsed.field_or("Autor", UNKNOWN_UPLOADER).to_string(),
    };

    (record, warnings)
}

/// Epoch seconds at UTC midnight for a `YYYY-MM-DD` date string.
///
/// UTC keeps the conversion reproducible across machines: the same date
/// always maps to the same timestamp, and formatting that timestamp back
/// yields the original date.
pub fn parse_date(s: &str) -> Option<i64> {
    let date = NaiveDate::parse_from_str(s, DATE_FORMAT).ok()?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc().timestamp())
}
