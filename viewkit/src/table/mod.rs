//! Table engine - searchable, paginated views over dynamic rows.
//!
//! The engine is a pure transform: given a column schema and a row
//! collection, it produces a render-ready page. It supports two modes:
//!
//! - **Client-side**: the full row collection is held locally; every
//!   search-text change filters the collection and re-paginates the
//!   result.
//! - **Server-delegated**: rows are already the current page from the
//!   server; search text and page changes are forwarded to the host as
//!   [`TableIntent`] values and no local filtering happens.
//!
//! # Example
//!
//! ```
//! use viewkit::table::{CellValue, Column, Row, TableState};
//!
//! let columns = vec![
//!     Column::field("name", "Name"),
//!     Column::field("role", "Role"),
//! ];
//! let rows = vec![
//!     Row::new().set("id", 1).set("name", "Alpha").set("role", "ADMIN"),
//!     Row::new().set("id", 2).set("name", "Beta").set("role", "STUDENT"),
//! ];
//!
//! let mut table = TableState::client_side(columns, rows);
//! table.set_query("al");
//!
//! let page = table.page_view();
//! assert_eq!(page.rows.len(), 1);
//! assert_eq!(page.rows[0].get("name"), Some(&CellValue::from("Alpha")));
//! ```

mod column;
mod extract;
mod search;
mod state;
mod value;

pub use column::{Accessor, CellError, Column, DerivedFn};
pub use extract::{display_text, search_text};
pub use search::{page_count, paginate, search};
pub use state::{PageView, RequestToken, TableIntent, TableMode, TableState};
pub use value::{CellValue, Row, RowKey};
