//! Column descriptors and value accessors

use std::sync::Arc;

use super::value::CellValue;
use super::value::Row;

/// Error produced by a derived accessor.
///
/// These never escape the engine: a failing accessor collapses to
/// [`CellValue::Null`] for that cell alone, so one malformed row cannot
/// break search or rendering of the rest of the table.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CellError {
    /// The accessor needed a field the row does not have.
    #[error("field '{field}' not found in row")]
    Missing { field: String },

    /// The accessor could not produce a value from the row.
    #[error("cell extraction failed: {message}")]
    Extraction { message: String },
}

impl CellError {
    /// Creates a new missing field error.
    pub fn missing(field: impl Into<String>) -> Self {
        Self::Missing {
            field: field.into(),
        }
    }

    /// Creates a new extraction error.
    pub fn extraction(message: impl Into<String>) -> Self {
        Self::Extraction {
            message: message.into(),
        }
    }
}

/// A fallible derived-value function.
pub type DerivedFn = Arc<dyn Fn(&Row) -> Result<CellValue, CellError> + Send + Sync>;

/// How a column pulls its value out of a row.
///
/// An explicit discriminant rather than runtime type inspection: a column
/// either names a field (dotted segments traverse nested rows) or computes
/// its value with a function.
#[derive(Clone)]
pub enum Accessor {
    /// Look up a field by name; `a.b.c` walks nested rows.
    Field(String),
    /// Compute the value from the whole row.
    Derived(DerivedFn),
}

impl std::fmt::Debug for Accessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Accessor::Field(name) => f.debug_tuple("Field").field(name).finish(),
            Accessor::Derived(_) => f.debug_tuple("Derived").field(&"<fn>").finish(),
        }
    }
}

/// Column configuration.
///
/// Columns are an ordered sequence; their order is the display order.
/// Every declared column also participates in free-text search.
///
/// # Example
///
/// ```
/// use viewkit::table::{CellValue, Column};
///
/// let columns = vec![
///     Column::field("name", "Name"),
///     Column::field("location.district", "District"),
///     Column::derived("initial", "Initial", |row| {
///         let name = row
///             .get("name")
///             .and_then(|v| v.as_str())
///             .unwrap_or_default();
///         Ok(CellValue::from(&name[..name.len().min(1)]))
///     }),
/// ];
/// ```
#[derive(Debug, Clone)]
pub struct Column {
    /// Stable identifier for the column.
    pub id: String,
    /// Header text shown to the user.
    pub label: String,
    /// How the column resolves its cell value.
    pub accessor: Accessor,
}

impl Column {
    /// Creates a column that reads a (possibly dotted) field name.
    ///
    /// The field name doubles as the column id.
    pub fn field(name: impl Into<String>, label: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: name.clone(),
            label: label.into(),
            accessor: Accessor::Field(name),
        }
    }

    /// Creates a column whose value is computed from the whole row.
    pub fn derived<F>(id: impl Into<String>, label: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Row) -> Result<CellValue, CellError> + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            label: label.into(),
            accessor: Accessor::Derived(Arc::new(f)),
        }
    }

    /// Resolves this column's value for a row.
    ///
    /// Total: a missing field or a failing derived function yields
    /// [`CellValue::Null`] for that cell.
    pub fn value_of(&self, row: &Row) -> CellValue {
        match &self.accessor {
            Accessor::Field(name) => row.get_path(name).cloned().unwrap_or(CellValue::Null),
            Accessor::Derived(f) => match f(row) {
                Ok(value) => value,
                Err(err) => {
                    log::debug!("column '{}' accessor failed: {err}", self.id);
                    CellValue::Null
                }
            },
        }
    }
}
