//! Dynamic rows and cell values

use std::collections::HashMap;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;

/// A dynamic value held in a table cell.
///
/// Rows are opaque mappings, so cells can hold anything the backend sends:
/// primitives, timestamps, nested records (e.g. an expanded `location` with
/// its own fields), lists, or raw JSON the engine does not recognize.
///
/// # Example
///
/// ```
/// use viewkit::table::CellValue;
///
/// let name = CellValue::from("Alpha");
/// let score = CellValue::from(87.5);
/// let empty = CellValue::Null;
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "serde_json::Value")]
pub enum CellValue {
    /// Null/empty cell.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// String value.
    String(String),
    /// Date and time with timezone.
    DateTime(DateTime<Utc>),
    /// Nested row (e.g. an embedded related record).
    Nested(Box<Row>),
    /// List of values (e.g. a multi-valued field).
    List(Vec<CellValue>),
    /// Fallback for JSON the engine has no dedicated variant for.
    Json(serde_json::Value),
}

impl CellValue {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Null => "null",
            CellValue::Bool(_) => "bool",
            CellValue::Int(_) => "int",
            CellValue::Float(_) => "float",
            CellValue::String(_) => "string",
            CellValue::DateTime(_) => "datetime",
            CellValue::Nested(_) => "nested",
            CellValue::List(_) => "list",
            CellValue::Json(_) => "json",
        }
    }

    /// Returns the string content, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Null
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for CellValue {
    fn from(v: bool) -> Self {
        CellValue::Bool(v)
    }
}

impl From<i32> for CellValue {
    fn from(v: i32) -> Self {
        CellValue::Int(v as i64)
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        CellValue::Int(v)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Float(v)
    }
}

impl From<String> for CellValue {
    fn from(v: String) -> Self {
        CellValue::String(v)
    }
}

impl From<&str> for CellValue {
    fn from(v: &str) -> Self {
        CellValue::String(v.to_string())
    }
}

impl From<DateTime<Utc>> for CellValue {
    fn from(v: DateTime<Utc>) -> Self {
        CellValue::DateTime(v)
    }
}

impl From<Row> for CellValue {
    fn from(v: Row) -> Self {
        CellValue::Nested(Box::new(v))
    }
}

impl From<Vec<CellValue>> for CellValue {
    fn from(v: Vec<CellValue>) -> Self {
        CellValue::List(v)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => CellValue::Null,
        }
    }
}

impl From<serde_json::Value> for CellValue {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => CellValue::Null,
            serde_json::Value::Bool(b) => CellValue::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    CellValue::Int(i)
                } else if let Some(f) = n.as_f64() {
                    CellValue::Float(f)
                } else {
                    CellValue::Json(serde_json::Value::Number(n))
                }
            }
            serde_json::Value::String(s) => CellValue::String(s),
            serde_json::Value::Array(items) => {
                CellValue::List(items.into_iter().map(CellValue::from).collect())
            }
            serde_json::Value::Object(map) => {
                let mut row = Row::new();
                for (field, value) in map {
                    row.insert(field, CellValue::from(value));
                }
                CellValue::Nested(Box::new(row))
            }
        }
    }
}

// =============================================================================
// Row
// =============================================================================

/// A single table row: an opaque field-name to value mapping.
///
/// The engine never assumes a fixed shape; columns pull values out via
/// their accessors. Rows deserialize directly from JSON objects.
///
/// # Example
///
/// ```
/// use viewkit::table::{CellValue, Row};
///
/// let row = Row::new()
///     .set("id", 7)
///     .set("name", "Alpha");
///
/// assert_eq!(row.get("name"), Some(&CellValue::from("Alpha")));
/// assert!(row.get("missing").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Row {
    fields: HashMap<String, CellValue>,
}

impl Row {
    /// Creates a new empty row.
    pub fn new() -> Self {
        Self {
            fields: HashMap::new(),
        }
    }

    /// Sets a field value (builder pattern).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Inserts a field value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<CellValue>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, field: &str) -> Option<&CellValue> {
        self.fields.get(field)
    }

    /// Resolves a dotted path (`location.district.name`) through nested rows.
    ///
    /// Returns `None` if any segment is missing or a non-row value is
    /// reached before the final segment.
    pub fn get_path(&self, path: &str) -> Option<&CellValue> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.get(first)?;
        for segment in segments {
            match current {
                CellValue::Nested(row) => current = row.get(segment)?,
                _ => return None,
            }
        }
        Some(current)
    }

    /// Returns `true` if the row has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the number of fields in the row.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Iterates over the fields in a stable (name-sorted) order.
    ///
    /// The underlying map is unordered; search-text extraction and any
    /// other order-sensitive consumer rely on this sorted view.
    pub fn fields_sorted(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        let mut entries: Vec<(&str, &CellValue)> = self
            .fields
            .iter()
            .map(|(name, value)| (name.as_str(), value))
            .collect();
        entries.sort_by_key(|(name, _)| *name);
        entries.into_iter()
    }

    /// Returns the identity of this row for rendering purposes.
    ///
    /// Uses the row's `id` field when present, else the positional index.
    pub fn key(&self, index: usize) -> RowKey {
        match self.get("id") {
            Some(CellValue::Int(id)) => RowKey::Id(id.to_string()),
            Some(CellValue::String(id)) => RowKey::Id(id.clone()),
            _ => RowKey::Index(index),
        }
    }
}

/// Identity of a row within a rendered table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RowKey {
    /// The row's own `id` field.
    Id(String),
    /// Positional index, for rows without an `id` field.
    Index(usize),
}

impl std::fmt::Display for RowKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowKey::Id(id) => write!(f, "{id}"),
            RowKey::Index(index) => write!(f, "#{index}"),
        }
    }
}
