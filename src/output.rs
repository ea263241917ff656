//! CLI output formatting for all subcommands.
//!
//! Each subcommand has a `format_*` function returning lines (pure, no
//! I/O, testable) and printing goes through one [`print_lines`] wrapper.
//!
//! ```text
//! added rumasa
//!     Warning: invalid date '23/02/1983', expected YYYY-MM-DD
//!     Skipped 2 unrecognized line(s)
//! ```

use crate::ingest::{IngestSummary, ProcessedDocument};
use crate::record::DocumentRecord;
use crate::render::RenderSummary;
use crate::store::UpsertOutcome;
use crate::templates::format_epoch;

fn outcome_label(outcome: UpsertOutcome) -> &'static str {
    match outcome {
        UpsertOutcome::Inserted => "added",
        UpsertOutcome::Updated => "updated",
    }
}

/// Format the result of processing a single document.
pub fn format_processed(doc: &ProcessedDocument) -> Vec<String> {
    let mut lines = vec![format!("{} {}", outcome_label(doc.outcome), doc.id)];
    for warning in &doc.warnings {
        lines.push(format!("    Warning: {warning}"));
    }
    if doc.skipped_lines > 0 {
        lines.push(format!(
            "    Skipped {} unrecognized line(s)",
            doc.skipped_lines
        ));
    }
    lines
}

/// Format a normalized record for `check`: one indented line per non-empty
/// field, dates shown as calendar dates.
pub fn format_record(record: &DocumentRecord) -> Vec<String> {
    let mut lines = vec![format!("Document {}", record.id)];
    let fields = [
        ("Nombre", record.name.as_str()),
        ("Tipo", record.doc_type.as_str()),
        ("Ficheros", record.files.as_str()),
        ("Idioma", record.language.as_str()),
        ("Fuente", record.source.as_str()),
        ("País", record.country.as_str()),
        ("Tags", record.tags.as_str()),
        ("Autor", record.uploader.as_str()),
    ];
    for (label, value) in fields {
        if !value.is_empty() {
            lines.push(format!("    {label}: {value}"));
        }
    }
    let date = format_epoch(record.created_irl_at);
    if !date.is_empty() {
        lines.push(format!("    Fecha: {date}"));
    }
    lines
}

/// Format the summary of a batch ingest run.
pub fn format_ingest_summary(summary: &IngestSummary) -> Vec<String> {
    let mut lines = Vec::new();
    for doc in &summary.processed {
        lines.extend(format_processed(doc));
    }
    for (path, err) in &summary.failures {
        lines.push(format!("failed {}: {err}", path.display()));
    }
    lines.push(format!(
        "Processed {} document(s), {} failed",
        summary.processed.len(),
        summary.failures.len()
    ));
    lines
}

/// Format the summary of a render run.
pub fn format_render_summary(summary: &RenderSummary) -> Vec<String> {
    let mut lines = Vec::new();
    for id in &summary.rendered {
        lines.push(format!("Rendered document/{id}.html"));
    }
    for id in &summary.skipped {
        lines.push(format!("Skipping document/{id}.html (already exists)"));
    }
    lines.push(format!(
        "Rendered index.html ({} document(s))",
        summary.index_entries
    ));
    lines
}

/// Write lines to stdout.
pub fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn processed(id: &str, outcome: UpsertOutcome) -> ProcessedDocument {
        ProcessedDocument {
            id: id.to_string(),
            outcome,
            warnings: vec![],
            skipped_lines: 0,
        }
    }

    #[test]
    fn processed_inserted_reads_as_added() {
        let lines = format_processed(&processed("rumasa", UpsertOutcome::Inserted));
        assert_eq!(lines, ["added rumasa"]);
    }

    #[test]
    fn processed_shows_warnings_and_skips_indented() {
        let mut doc = processed("rumasa", UpsertOutcome::Updated);
        doc.warnings.push("invalid date 'x'".to_string());
        doc.skipped_lines = 2;

        let lines = format_processed(&doc);
        assert_eq!(lines[0], "updated rumasa");
        assert_eq!(lines[1], "    Warning: invalid date 'x'");
        assert_eq!(lines[2], "    Skipped 2 unrecognized line(s)");
    }

    #[test]
    fn record_omits_empty_fields_and_formats_the_date() {
        let record = DocumentRecord {
            id: "rumasa".to_string(),
            name: "Expediente".to_string(),
            doc_type: "image".to_string(),
            files: String::new(),
            created_irl_at: 1_579_046_400,
            language: String::new(),
            source: String::new(),
            country: String::new(),
            tags: "x,y".to_string(),
            uploader: "Unknown".to_string(),
        };
        let lines = format_record(&record);
        assert_eq!(
            lines,
            [
                "Document rumasa",
                "    Nombre: Expediente",
                "    Tipo: image",
                "    Tags: x,y",
                "    Autor: Unknown",
                "    Fecha: 2020-01-15",
            ]
        );
    }

    #[test]
    fn render_summary_lists_rendered_then_skipped() {
        let summary = RenderSummary {
            rendered: vec!["a".to_string()],
            skipped: vec!["b".to_string()],
            index_entries: 2,
        };
        let lines = format_render_summary(&summary);
        assert_eq!(
            lines,
            [
                "Rendered document/a.html",
                "Skipping document/b.html (already exists)",
                "Rendered index.html (2 document(s))",
            ]
        );
    }

    #[test]
    fn ingest_summary_counts_failures() {
        let summary = IngestSummary {
            processed: vec![processed("a", UpsertOutcome::Inserted)],
            failures: vec![(
                "bad/details.md".into(),
                crate::ingest::IngestError::MissingFile("bad/details.md".into()),
            )],
        };
        let lines = format_ingest_summary(&summary);
        assert_eq!(lines[0], "added a");
        assert!(lines[1].starts_with("failed bad/details.md:"));
        assert_eq!(lines[2], "Processed 1 document(s), 1 failed");
    }
}
