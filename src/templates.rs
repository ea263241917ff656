//! HTML templates for document pages and the index.
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML generation:
//! type-safe interpolation, auto-escaped output, no template files to ship.
//! The stylesheet is embedded at compile time and inlined into every page,
//! so the rendered site is self-contained HTML with zero asset files.
//!
//! These functions are pure: record(s) in, markup out. Which pages get
//! written, and when, is decided by [`crate::render`].

use crate::record::DocumentRecord;
use crate::store::StoredDocument;
use maud::{DOCTYPE, Markup, html};

const CSS: &str = include_str!("../static/style.css");

/// Format epoch seconds as `YYYY-MM-DD`.
///
/// The zero sentinel (no date, or an unparseable one) renders as an empty
/// string rather than 1970-01-01.
pub fn format_epoch(secs: i64) -> String {
    if secs == 0 {
        return String::new();
    }
    match chrono::DateTime::from_timestamp(secs, 0) {
        Some(dt) => dt.format("%Y-%m-%d").to_string(),
        None => String::new(),
    }
}

/// Display name for a document: its title, or the id when untitled.
fn display_name(record: &DocumentRecord) -> &str {
    if record.name.is_empty() {
        &record.id
    } else {
        &record.name
    }
}

/// Base HTML document shell shared by every page.
fn base_document(page_title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="es" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (page_title) }
                style { (CSS) }
            }
            body {
                (content)
            }
        }
    }
}

/// One `dt`/`dd` pair, omitted entirely when the value is empty.
fn field_row(label: &str, value: &str) -> Markup {
    html! {
        @if !value.is_empty() {
            dt { (label) }
            dd { (value) }
        }
    }
}

/// The detail page for a single document.
pub fn document_page(doc: &StoredDocument, site_title: &str) -> Markup {
    let record = &doc.record;
    let name = display_name(record);

    let content = html! {
        header.site-header {
            nav.breadcrumb {
                a href="../index.html" { (site_title) }
            }
        }
        main.document-page {
            h1 { (name) }
            dl.document-fields {
                (field_row("Tipo", &record.doc_type))
                (field_row("Ficheros", &record.files))
                (field_row("Fecha", &format_epoch(record.created_irl_at)))
                (field_row("Idioma", &record.language))
                (field_row("Fuente", &record.source))
                (field_row("País", &record.country))
                (field_row("Autor", &record.uploader))
            }
            @if !record.tags.is_empty() {
                ul.tag-list {
                    @for tag in record.tags.split(',') {
                        li.tag { (tag) }
                    }
                }
            }
            footer.document-meta {
                "Añadido el " (format_epoch(doc.created_at))
            }
        }
    };

    base_document(&format!("{name} — {site_title}"), content)
}

/// The index page listing the latest additions, newest first.
pub fn index_page(docs: &[StoredDocument], site_title: &str) -> Markup {
    let content = html! {
        header.site-header {
            h1 { (site_title) }
        }
        main.index-page {
            @if docs.is_empty() {
                p.empty { "No hay documentos todavía." }
            } @else {
                h2 { "Últimas incorporaciones" }
                ul.document-list {
                    @for doc in docs {
                        li.document-card {
                            a href={ "document/" (doc.record.id) ".html" } {
                                (display_name(&doc.record))
                            }
                            @if !doc.record.doc_type.is_empty() {
                                span.document-type { (doc.record.doc_type) }
                            }
                            span.document-date { (format_epoch(doc.created_at)) }
                        }
                    }
                }
            }
        }
    };

    base_document(site_title, content)
}
