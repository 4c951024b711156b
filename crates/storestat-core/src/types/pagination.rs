//! Pagination types for report listings.

use serde::{Deserialize, Serialize};

/// Default page size.
const DEFAULT_PAGE_SIZE: u64 = 10;
/// Maximum page size.
const MAX_PAGE_SIZE: u64 = 100;

/// Request parameters for paginated queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-based).
    #[serde(default = "default_page")]
    pub page: u64,
    /// Number of items per page.
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

impl PageRequest {
    /// Create a new page request.
    pub fn new(page: u64, page_size: u64) -> Self {
        Self::bounded(page, page_size, MAX_PAGE_SIZE)
    }

    /// Create a page request with a caller-supplied page size ceiling.
    pub fn bounded(page: u64, page_size: u64, max_page_size: u64) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.clamp(1, max_page_size.max(1)),
        }
    }

    /// Calculate the SQL `OFFSET` value.
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }

    /// Return the SQL `LIMIT` value.
    pub fn limit(&self) -> u64 {
        self.page_size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// A page of rows together with the size of the full, unsliced result set.
///
/// `total` always counts every matching row, independent of the offset and
/// limit that produced `rows`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountedRows<T> {
    /// Number of rows in the full result set.
    pub total: u64,
    /// Rows of the requested slice.
    pub rows: Vec<T>,
}

impl<T> CountedRows<T> {
    /// Create a counted slice.
    pub fn new(total: u64, rows: Vec<T>) -> Self {
        Self { total, rows }
    }

    /// The empty result: no rows, zero total.
    pub fn empty() -> Self {
        Self {
            total: 0,
            rows: Vec::new(),
        }
    }

    /// Slice an already sorted, complete result set.
    pub fn slice(all: Vec<T>, offset: u64, limit: u64) -> Self {
        let total = all.len() as u64;
        let offset = usize::try_from(offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        let rows = all.into_iter().skip(offset).take(limit).collect();
        Self { total, rows }
    }

    /// Transform every row, keeping the total.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> CountedRows<U> {
        CountedRows {
            total: self.total,
            rows: self.rows.into_iter().map(f).collect(),
        }
    }
}

/// Paginated response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T: Serialize> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Current page number (1-based).
    pub page: u64,
    /// Number of items per page.
    pub page_size: u64,
    /// Total number of items across all pages.
    pub total_items: u64,
    /// Total number of pages.
    pub total_pages: u64,
    /// Whether there is a next page.
    pub has_next: bool,
    /// Whether there is a previous page.
    pub has_previous: bool,
}

impl<T: Serialize> PageResponse<T> {
    /// Create a new paginated response.
    pub fn new(items: Vec<T>, page: u64, page_size: u64, total_items: u64) -> Self {
        let total_pages = if total_items == 0 {
            1
        } else {
            total_items.div_ceil(page_size.max(1))
        };
        Self {
            items,
            page,
            page_size,
            total_items,
            total_pages,
            has_next: page < total_pages,
            has_previous: page > 1,
        }
    }

    /// Build a response from a counted slice fetched for `request`.
    pub fn from_counted(counted: CountedRows<T>, request: &PageRequest) -> Self {
        Self::new(
            counted.rows,
            request.page,
            request.page_size,
            counted.total,
        )
    }
}

fn default_page() -> u64 {
    1
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_and_limit() {
        let page = PageRequest::new(3, 10);
        assert_eq!(page.offset(), 20);
        assert_eq!(page.limit(), 10);
    }

    #[test]
    fn test_page_zero_is_first_page() {
        let page = PageRequest::new(0, 10);
        assert_eq!(page.page, 1);
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn test_huge_page_offset_saturates() {
        let page = PageRequest::bounded(u64::MAX / 2, 10, 100);
        assert_eq!(page.offset(), u64::MAX);

        let last = PageRequest::bounded(u64::MAX, 1, 100);
        assert_eq!(last.offset(), u64::MAX - 1);
    }

    #[test]
    fn test_bounded_clamps_page_size() {
        assert_eq!(PageRequest::bounded(1, 500, 50).page_size, 50);
        assert_eq!(PageRequest::bounded(1, 0, 50).page_size, 1);
    }

    #[test]
    fn test_slice_keeps_full_total() {
        let counted = CountedRows::slice(vec![1, 2, 3, 4, 5], 3, 10);
        assert_eq!(counted.total, 5);
        assert_eq!(counted.rows, vec![4, 5]);

        let past_end = CountedRows::slice(vec![1, 2, 3], 10, 10);
        assert_eq!(past_end.total, 3);
        assert!(past_end.rows.is_empty());
    }

    #[test]
    fn test_page_response_navigation() {
        let request = PageRequest::new(2, 10);
        let counted = CountedRows::new(25, vec!["a"; 10]);
        let response = PageResponse::from_counted(counted, &request);

        assert_eq!(response.total_pages, 3);
        assert!(response.has_next);
        assert!(response.has_previous);
    }

    #[test]
    fn test_empty_response_has_one_page() {
        let response: PageResponse<u8> = PageResponse::new(Vec::new(), 1, 10, 0);
        assert_eq!(response.total_pages, 1);
        assert!(!response.has_next);
    }
}
