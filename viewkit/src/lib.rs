//! Headless view-model toolkit for data-driven dashboard views.
//!
//! Two components, composable but independent:
//!
//! - [`table`] - a searchable, paginated table engine over dynamic rows.
//!   Pure data transforms: filtering and paging never perform I/O; server
//!   round trips are signaled to the host as [`table::TableIntent`] values.
//! - [`refresh`] - a poll-refresh coordinator that keeps a view's data
//!   fresh on an interval, skips work while the view is hidden, and
//!   distinguishes foreground from background fetches.

pub mod refresh;
pub mod table;

pub use refresh::{FetchKind, RefreshHandle, RefreshSource};
pub use table::{Accessor, CellValue, Column, Row, TableIntent, TableState};
