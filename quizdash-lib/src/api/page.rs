//! Server paging contract

use serde::Deserialize;

/// A request for one page of a server-side collection.
///
/// `page_index * page_size` may point past the end of the collection;
/// the server answers with an empty page, never an error.
///
/// # Example
///
/// ```ignore
/// let request = PageRequest::first(20);
/// let response = client.get("/users/page", &request.query_params()).await?;
/// let page: PageResponse<User> = response.json()?;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Zero-based page index.
    pub page_index: u32,
    /// Rows per page.
    pub page_size: u32,
}

impl PageRequest {
    /// Creates a request for the given page.
    pub fn new(page_index: u32, page_size: u32) -> Self {
        Self {
            page_index,
            page_size,
        }
    }

    /// Creates a request for the first page.
    pub fn first(page_size: u32) -> Self {
        Self::new(0, page_size)
    }

    /// Returns the request for the following page.
    pub fn next(&self) -> Self {
        Self::new(self.page_index + 1, self.page_size)
    }

    /// Returns the row offset this page starts at.
    pub fn offset(&self) -> u64 {
        u64::from(self.page_index) * u64::from(self.page_size)
    }

    /// Query parameters for [`ApiClient::get`](crate::ApiClient::get).
    pub fn query_params(&self) -> [(&'static str, String); 2] {
        [
            ("page", self.page_index.to_string()),
            ("size", self.page_size.to_string()),
        ]
    }
}

/// One page of rows plus the collection's total size.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    /// The rows of this page; at most `page_size` of them.
    pub rows: Vec<T>,
    /// Total rows in the (possibly filtered) collection.
    pub total_count: u64,
}

impl<T> PageResponse<T> {
    /// Returns `true` if this page has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the number of rows in this page.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Number of pages at the given page size, minimum 1 even when empty.
    pub fn page_count(&self, page_size: u32) -> u64 {
        if page_size == 0 {
            return 1;
        }
        self.total_count.div_ceil(u64::from(page_size)).max(1)
    }

    /// Returns `true` if the given request reached the last page.
    pub fn is_last(&self, request: &PageRequest) -> bool {
        u64::from(request.page_index) + 1 >= self.page_count(request.page_size)
    }
}
