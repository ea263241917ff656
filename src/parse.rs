//! Line scanner for `details.md` metadata documents.
//!
//! ## Input Format
//!
//! A document is UTF-8 text mixing key/value lines with list items:
//!
//! ```text
//! **Nombre:** Expediente Rumasa
//! **Tipo:** Documento
//! **Fecha:** 1983-02-23
//! **Tags:**
//! - expropiación
//! - banca
//! ```
//!
//! A `**Label:** value` line sets the scalar for `Label`, last write wins.
//! A `- item` line belongs to the most recently seen label, but only when
//! that label is the designated list field (`Tags`); under any other label
//! list items are silently ignored. Labels and values are taken verbatim
//! after trimming, there is no escaping syntax.
//!
//! ## Scanner State
//!
//! Which field a list item attaches to is tracked as an explicit two-state
//! machine ([`ListState`]) rather than an ambient "current key" variable:
//! every key/value line moves the scanner to `After(label)`, and items are
//! only accepted from `After("Tags")`.
//!
//! ## Lenient Parsing
//!
//! Lines matching neither pattern are skipped, never an error. They are
//! recorded verbatim in [`ParsedDocument::skipped`] so callers can surface
//! them (a misspelled `*Nombre:**` would otherwise vanish without a trace).

use std::collections::BTreeMap;

/// The one field label whose value may continue across `- item` lines.
pub const LIST_FIELD: &str = "Tags";

/// Raw metadata extracted from one document.
///
/// List fields have already been flattened: items are joined with a comma
/// and no escaping, so a tag containing a comma is not round-trippable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDocument {
    /// Field label → value, lists comma-joined.
    pub fields: BTreeMap<String, String>,
    /// Lines that matched neither pattern, verbatim.
    pub skipped: Vec<String>,
}

impl ParsedDocument {
    /// Value for a label, empty string when absent.
    pub fn field(&self, label: &str) -> &str {
        self.fields.get(label).map(String::as_str).unwrap_or("")
    }

    /// Value for a label, `default` when the label never appeared.
    ///
    /// A label that appeared with an empty value returns the empty string,
    /// not `default`.
    pub fn field_or<'a>(&'a self, label: &str, default: &'a str) -> &'a str {
        self.fields.get(label).map(String::as_str).unwrap_or(default)
    }
}

/// Scanner state: whether a list item on the next line has a field to
/// attach to.
enum ListState {
    /// No key/value line seen yet.
    Idle,
    /// The last key/value line set this label.
    After(String),
}

/// Value of a field while the scan is still running.
enum Value {
    Scalar(String),
    List(Vec<String>),
}

impl Value {
    fn flatten(self) -> String {
        match self {
            Value::Scalar(s) => s,
            Value::List(items) => items.join(","),
        }
    }
}

/// Scan a document into its raw field mapping.
///
/// Blank lines are skipped. Malformed lines are collected, not rejected.
/// Never fails: the worst possible input yields an empty mapping with every
/// line in `skipped`.
pub fn parse(text: &str) -> ParsedDocument {
    let mut fields: BTreeMap<String, Value> = BTreeMap::new();
    let mut skipped = Vec::new();
    let mut state = ListState::Idle;

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if let Some((label, value)) = parse_field_line(line) {
            state = ListState::After(label.clone());
            fields.insert(label, Value::Scalar(value));
        } else if let Some(item) = line.strip_prefix("- ") {
            // Items under any label other than the list field are ignored.
            if let ListState::After(label) = &state
                && label == LIST_FIELD
            {
                push_item(&mut fields, item.trim());
            }
        } else {
            skipped.push(line.to_string());
        }
    }

    ParsedDocument {
        fields: fields.into_iter().map(|(k, v)| (k, v.flatten())).collect(),
        skipped,
    }
}

/// Match a `**Label:** value` line.
///
/// The label is everything up to the first `:**`, trimmed. Both halves are
/// trimmed; the value may be empty. Returns `None` for anything else.
fn parse_field_line(line: &str) -> Option<(String, String)> {
    let rest = line.strip_prefix("**")?;
    let (label, value) = rest.split_once(":**")?;
    if label.is_empty() {
        return None;
    }
    Some((label.trim().to_string(), value.trim().to_string()))
}

/// Append one item to the list field.
///
/// - absent → fresh single-element list
/// - non-empty scalar → two-element list keeping the prior scalar first
/// - empty scalar → the scalar is discarded, fresh single-element list
/// - list → append
fn push_item(fields: &mut BTreeMap<String, Value>, item: &str) {
    let item = item.to_string();
    let value = match fields.remove(LIST_FIELD) {
        None => Value::List(vec![item]),
        Some(Value::Scalar(prior)) if prior.is_empty() => Value::List(vec![item]),
        Some(Value::Scalar(prior)) => Value::List(vec![prior, item]),
        Some(Value::List(mut items)) => {
            items.push(item);
            Value::List(items)
        }
    };
    fields.insert(LIST_FIELD.to_string(), value);
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Key/value lines
    // =========================================================================

    #[test]
    fn key_value_line_sets_scalar() {
        let parsed = parse("**Nombre:** Expediente Rumasa");
        assert_eq!(parsed.field("Nombre"), "Expediente Rumasa");
        assert!(parsed.skipped.is_empty());
    }

    #[test]
    fn values_and_labels_are_trimmed() {
        let parsed = parse("**  Tipo :**   Imagen  ");
        assert_eq!(parsed.field("Tipo"), "Imagen");
    }

    #[test]
    fn last_write_wins_for_repeated_labels() {
        let parsed = parse("**Nombre:** First\n**Nombre:** Second");
        assert_eq!(parsed.field("Nombre"), "Second");
    }

    #[test]
    fn empty_value_is_kept_as_empty_string() {
        let parsed = parse("**Fuente:**");
        assert_eq!(parsed.fields.get("Fuente"), Some(&String::new()));
    }

    #[test]
    fn utf8_labels_pass_through() {
        let parsed = parse("**País:** España");
        assert_eq!(parsed.field("País"), "España");
    }

    #[test]
    fn value_may_contain_the_delimiter() {
        let parsed = parse("**Nota:** ver **Fuente:** abajo");
        assert_eq!(parsed.field("Nota"), "ver **Fuente:** abajo");
    }

    // =========================================================================
    // List accumulation
    // =========================================================================

    #[test]
    fn items_after_empty_tags_start_a_fresh_list() {
        let parsed = parse("**Tags:**\n- a\n- b\n- c");
        assert_eq!(parsed.field("Tags"), "a,b,c");
    }

    #[test]
    fn non_empty_scalar_is_promoted_to_first_item() {
        let parsed = parse("**Tags:** primero\n- segundo");
        assert_eq!(parsed.field("Tags"), "primero,segundo");
    }

    #[test]
    fn single_item_list() {
        let parsed = parse("**Tags:**\n- solo");
        assert_eq!(parsed.field("Tags"), "solo");
    }

    #[test]
    fn items_are_trimmed() {
        let parsed = parse("**Tags:**\n-  spaced  ");
        assert_eq!(parsed.field("Tags"), "spaced");
    }

    #[test]
    fn items_under_other_labels_are_ignored() {
        let parsed = parse("**Ficheros:** docs\n- not-a-tag\n**Tags:**\n- real");
        assert_eq!(parsed.field("Tags"), "real");
        assert_eq!(parsed.field("Ficheros"), "docs");
        // Ignored, not malformed
        assert!(parsed.skipped.is_empty());
    }

    #[test]
    fn item_before_any_label_is_ignored() {
        let parsed = parse("- orphan\n**Nombre:** x");
        assert!(!parsed.fields.contains_key(LIST_FIELD));
        assert!(parsed.skipped.is_empty());
    }

    #[test]
    fn intervening_label_stops_list_accumulation() {
        let parsed = parse("**Tags:**\n- a\n**Idioma:** es\n- b");
        assert_eq!(parsed.field("Tags"), "a");
        assert_eq!(parsed.field("Idioma"), "es");
    }

    #[test]
    fn embedded_commas_are_not_escaped() {
        let parsed = parse("**Tags:**\n- a,b\n- c");
        // Lossy on purpose: "a,b" and "c" flatten the same as "a", "b", "c"
        assert_eq!(parsed.field("Tags"), "a,b,c");
    }

    // =========================================================================
    // Lenient skipping
    // =========================================================================

    #[test]
    fn blank_lines_are_skipped_silently() {
        let parsed = parse("\n\n**Nombre:** x\n\n");
        assert_eq!(parsed.field("Nombre"), "x");
        assert!(parsed.skipped.is_empty());
    }

    #[test]
    fn malformed_lines_are_recorded() {
        let parsed = parse("just prose\n**Nombre:** x\n*Tipo:** typo");
        assert_eq!(parsed.field("Nombre"), "x");
        assert_eq!(parsed.skipped, vec!["just prose", "*Tipo:** typo"]);
    }

    #[test]
    fn label_without_closing_marker_is_malformed() {
        let parsed = parse("**Nombre: x");
        assert!(parsed.fields.is_empty());
        assert_eq!(parsed.skipped.len(), 1);
    }

    #[test]
    fn empty_label_is_malformed() {
        let parsed = parse("**:** value");
        assert!(parsed.fields.is_empty());
        assert_eq!(parsed.skipped.len(), 1);
    }

    #[test]
    fn parse_is_deterministic() {
        let text = "**Nombre:** Foo\n**Tags:**\n- x\n- y\nnoise";
        assert_eq!(parse(text), parse(text));
    }
}
