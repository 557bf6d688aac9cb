//! Searchable and displayable text extraction from cell values

use super::value::CellValue;

/// Extracts the case-folded searchable text of a cell value.
///
/// - `Null` contributes the empty string.
/// - Primitives are stringified and lowercased.
/// - Nested rows and lists concatenate the text of their children with
///   single-space separators; a composite with nothing extractable
///   contributes the empty string (it never matches everything).
///
/// Nested row fields are visited in name-sorted order so extraction is
/// deterministic.
pub fn search_text(value: &CellValue) -> String {
    let mut out = String::new();
    collect(value, &mut out);
    out
}

fn collect(value: &CellValue, out: &mut String) {
    match value {
        CellValue::Null => {}
        CellValue::Bool(b) => push_part(out, &b.to_string()),
        CellValue::Int(i) => push_part(out, &i.to_string()),
        CellValue::Float(f) => push_part(out, &f.to_string()),
        CellValue::String(s) => push_part(out, &s.to_lowercase()),
        CellValue::DateTime(dt) => push_part(out, &dt.to_rfc3339().to_lowercase()),
        CellValue::Nested(row) => {
            for (_, child) in row.fields_sorted() {
                collect(child, out);
            }
        }
        CellValue::List(items) => {
            for item in items {
                collect(item, out);
            }
        }
        CellValue::Json(json) => collect_json(json, out),
    }
}

fn collect_json(json: &serde_json::Value, out: &mut String) {
    match json {
        serde_json::Value::Null => {}
        serde_json::Value::Bool(b) => push_part(out, &b.to_string()),
        serde_json::Value::Number(n) => push_part(out, &n.to_string()),
        serde_json::Value::String(s) => push_part(out, &s.to_lowercase()),
        serde_json::Value::Array(items) => {
            for item in items {
                collect_json(item, out);
            }
        }
        serde_json::Value::Object(map) => {
            for value in map.values() {
                collect_json(value, out);
            }
        }
    }
}

fn push_part(out: &mut String, part: &str) {
    if part.is_empty() {
        return;
    }
    if !out.is_empty() {
        out.push(' ');
    }
    out.push_str(part);
}

/// Plain-text rendering of a cell value.
///
/// Null cells (including swallowed accessor failures) render as the `-`
/// placeholder; zero renders as `0`, not as the placeholder. Composite
/// values render their concatenated text, falling back to the placeholder
/// when nothing is extractable.
pub fn display_text(value: &CellValue) -> String {
    let text = match value {
        CellValue::Null => String::new(),
        CellValue::Bool(b) => b.to_string(),
        CellValue::Int(i) => i.to_string(),
        CellValue::Float(f) => f.to_string(),
        CellValue::String(s) => s.clone(),
        CellValue::DateTime(dt) => dt.to_rfc3339(),
        composite => search_text(composite),
    };
    if text.is_empty() {
        "-".to_string()
    } else {
        text
    }
}
