//! Table state - mode, query, paging, and the stale-response guard

use super::column::Column;
use super::search::{page_count, paginate, search};
use super::value::Row;

/// Default page size when none is configured.
const DEFAULT_PAGE_SIZE: usize = 10;

/// Where filtering and paging happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableMode {
    /// The engine holds the full row collection and filters/pages locally.
    ClientSide,
    /// Rows are already the current server page; search and paging are
    /// forwarded to the host as [`TableIntent`] values.
    ServerDelegated,
}

/// Identifies one server round trip for the stale-response guard.
///
/// Every server-bound intent carries a fresh token; only the most recent
/// token is accepted back by [`TableState::apply_server_page`], so a slow
/// earlier response can never overwrite a faster later one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

/// A fetch the host should perform on the table's behalf.
///
/// The engine never fetches data itself; these values are the notification
/// of intent. Both variants only occur in server-delegated mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableIntent {
    /// Fetch a page for the current query.
    FetchPage {
        /// Zero-based page to fetch.
        page_index: usize,
        /// Rows per page.
        page_size: usize,
        /// Current search term (may be empty).
        query: String,
        /// Token to pass back to [`TableState::apply_server_page`].
        token: RequestToken,
    },
    /// Forward a new search term (always restarts at the first page).
    Search {
        /// The new search term.
        query: String,
        /// Rows per page.
        page_size: usize,
        /// Token to pass back to [`TableState::apply_server_page`].
        token: RequestToken,
    },
}

/// A render-ready page of rows plus pagination metadata.
#[derive(Debug)]
pub struct PageView<'a> {
    /// The rows of the current page, in display order.
    pub rows: Vec<&'a Row>,
    /// Zero-based index of the displayed page.
    pub page_index: usize,
    /// Configured rows per page.
    pub page_size: usize,
    /// Number of pages (minimum 1, even with no rows).
    pub page_count: usize,
    /// Total rows after filtering (client-side) or as reported by the
    /// server (server-delegated).
    pub total_count: usize,
}

impl PageView<'_> {
    /// Returns `true` when there is no earlier page.
    pub fn is_first_page(&self) -> bool {
        self.page_index == 0
    }

    /// Returns `true` when there is no later page.
    pub fn is_last_page(&self) -> bool {
        self.page_index + 1 >= self.page_count
    }
}

/// Per-view table state.
///
/// Owns the column schema, the row collection (full collection in
/// client-side mode, current server page in server-delegated mode), the
/// search query, and the page position. All transforms are synchronous
/// and in-memory.
///
/// # Example
///
/// ```
/// use viewkit::table::{Column, Row, TableIntent, TableState};
///
/// let mut table = TableState::server_delegated(vec![Column::field("name", "Name")]);
///
/// let Some(TableIntent::Search { query, token, .. }) = table.set_query("quiz") else {
///     panic!("server mode forwards searches");
/// };
/// assert_eq!(query, "quiz");
///
/// // ... host fetches, then hands the page back:
/// let applied = table.apply_server_page(token, vec![Row::new().set("name", "Quiz 1")], 14);
/// assert!(applied);
/// assert_eq!(table.page_view().total_count, 14);
/// ```
#[derive(Debug)]
pub struct TableState {
    columns: Vec<Column>,
    rows: Vec<Row>,
    mode: TableMode,
    query: String,
    page_index: usize,
    page_size: usize,
    /// Server-reported total; only meaningful in server-delegated mode.
    total_count: usize,
    /// Monotonic request generation for the stale-response guard.
    generation: u64,
}

impl TableState {
    /// Creates a client-side table holding the full row collection.
    pub fn client_side(columns: Vec<Column>, rows: Vec<Row>) -> Self {
        Self {
            columns,
            rows,
            mode: TableMode::ClientSide,
            query: String::new(),
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
            total_count: 0,
            generation: 0,
        }
    }

    /// Creates a server-delegated table; rows arrive page by page via
    /// [`apply_server_page`](Self::apply_server_page).
    pub fn server_delegated(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            mode: TableMode::ServerDelegated,
            query: String::new(),
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
            total_count: 0,
            generation: 0,
        }
    }

    /// Sets the page size (builder pattern).
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Returns the column schema, in display order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns the table's mode.
    pub fn mode(&self) -> TableMode {
        self.mode
    }

    /// Returns the current search query.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Returns the current zero-based page index.
    pub fn page_index(&self) -> usize {
        self.page_index
    }

    /// Returns the configured page size.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Replaces the row collection of a client-side table.
    ///
    /// Used by refresh loops: prior query and page position are kept, and
    /// a now-out-of-range page simply renders empty.
    pub fn set_rows(&mut self, rows: Vec<Row>) {
        self.rows = rows;
    }

    /// Changes the search query.
    ///
    /// Any change resets the page index to 0 - a new filter invalidates
    /// the old page offset. In server-delegated mode the query is
    /// forwarded to the host via [`TableIntent::Search`]; in client-side
    /// mode filtering happens on the next [`page_view`](Self::page_view).
    pub fn set_query(&mut self, query: impl Into<String>) -> Option<TableIntent> {
        let query = query.into();
        if query == self.query {
            return None;
        }
        self.query = query;
        self.page_index = 0;

        match self.mode {
            TableMode::ClientSide => None,
            TableMode::ServerDelegated => Some(TableIntent::Search {
                query: self.query.clone(),
                page_size: self.page_size,
                token: self.next_token(),
            }),
        }
    }

    /// Jumps to the given page.
    ///
    /// Out-of-range indices are allowed and render as an empty page.
    pub fn set_page(&mut self, page_index: usize) -> Option<TableIntent> {
        self.page_index = page_index;
        self.fetch_current_page()
    }

    /// Moves to the next page, if there is one.
    pub fn next_page(&mut self) -> Option<TableIntent> {
        if self.page_view().is_last_page() {
            return None;
        }
        self.page_index += 1;
        self.fetch_current_page()
    }

    /// Moves to the previous page, if there is one.
    pub fn prev_page(&mut self) -> Option<TableIntent> {
        if self.page_index == 0 {
            return None;
        }
        self.page_index -= 1;
        self.fetch_current_page()
    }

    /// Issues a fetch intent for the current position without changing it.
    ///
    /// For server-delegated tables this is the mount fetch and the refresh
    /// loop's re-fetch: same query, same page, fresh token.
    pub fn begin_request(&mut self) -> TableIntent {
        TableIntent::FetchPage {
            page_index: self.page_index,
            page_size: self.page_size,
            query: self.query.clone(),
            token: self.next_token(),
        }
    }

    /// Accepts a server page if its token is still current.
    ///
    /// Returns `false` (and leaves the displayed page untouched) when the
    /// token has been superseded by a newer request - a stale response is
    /// discarded silently, not treated as a failure.
    pub fn apply_server_page(
        &mut self,
        token: RequestToken,
        rows: Vec<Row>,
        total_count: usize,
    ) -> bool {
        if self.mode != TableMode::ServerDelegated {
            log::debug!("ignoring server page for a client-side table");
            return false;
        }
        if token.0 != self.generation {
            log::debug!(
                "discarding stale page response (token {} superseded by {})",
                token.0,
                self.generation
            );
            return false;
        }
        self.rows = rows;
        self.total_count = total_count;
        true
    }

    /// Produces the render-ready page for the current state.
    pub fn page_view(&self) -> PageView<'_> {
        match self.mode {
            TableMode::ServerDelegated => PageView {
                rows: self.rows.iter().collect(),
                page_index: self.page_index,
                page_size: self.page_size,
                page_count: page_count(self.total_count, self.page_size),
                total_count: self.total_count,
            },
            TableMode::ClientSide => {
                let filtered = search(&self.rows, &self.columns, &self.query);
                let total = filtered.len();
                let rows = paginate(&filtered, self.page_index, self.page_size).to_vec();
                PageView {
                    rows,
                    page_index: self.page_index,
                    page_size: self.page_size,
                    page_count: page_count(total, self.page_size),
                    total_count: total,
                }
            }
        }
    }

    fn fetch_current_page(&mut self) -> Option<TableIntent> {
        match self.mode {
            TableMode::ClientSide => None,
            TableMode::ServerDelegated => Some(self.begin_request()),
        }
    }

    fn next_token(&mut self) -> RequestToken {
        self.generation += 1;
        RequestToken(self.generation)
    }
}
