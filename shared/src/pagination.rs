//! Pagination types
//!
//! Query-string parameters and the paginated response wrapper shared by
//! every list endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Pagination query parameters (`?page=1&pageSize=10`)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Pagination {
    /// 1-based page number
    #[validate(range(min = 1))]
    pub page: Option<u32>,
    /// Rows per page (1..=100)
    #[serde(rename = "pageSize")]
    #[validate(range(min = 1, max = 100))]
    pub page_size: Option<u32>,
}

impl Pagination {
    /// Default page size when the query omits `pageSize`
    pub const DEFAULT_PAGE_SIZE: u32 = 10;

    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1)
    }

    pub fn page_size(&self) -> u32 {
        self.page_size.unwrap_or(Self::DEFAULT_PAGE_SIZE)
    }

    /// Row offset for the current page
    pub fn offset(&self) -> i64 {
        (self.page() as i64 - 1) * self.page_size() as i64
    }

    pub fn limit(&self) -> i64 {
        self.page_size() as i64
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: None,
            page_size: None,
        }
    }
}

/// One page of results plus totals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total: i64,
    pub page: u32,
    #[serde(rename = "pageSize")]
    pub page_size: u32,
    #[serde(rename = "totalPages")]
    pub total_pages: i64,
}

impl<T> Page<T> {
    /// Build a page; `total_pages` is `ceil(total / page_size)`
    pub fn new(data: Vec<T>, total: i64, pagination: &Pagination) -> Self {
        let page_size = pagination.page_size();
        let total_pages = if total == 0 {
            0
        } else {
            (total + page_size as i64 - 1) / page_size as i64
        };
        Self {
            data,
            total,
            page: pagination.page(),
            page_size,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pagination(page: u32, page_size: u32) -> Pagination {
        Pagination {
            page: Some(page),
            page_size: Some(page_size),
        }
    }

    #[test]
    fn test_offset_and_limit() {
        let p = pagination(2, 10);
        assert_eq!(p.offset(), 10);
        assert_eq!(p.limit(), 10);
    }

    #[test]
    fn test_defaults() {
        let p = Pagination::default();
        assert_eq!(p.page(), 1);
        assert_eq!(p.page_size(), Pagination::DEFAULT_PAGE_SIZE);
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let p = pagination(1, 10);
        let page = Page::new(vec![1, 2, 3], 15, &p);
        assert_eq!(page.total_pages, 2);

        let page = Page::new(Vec::<i32>::new(), 0, &p);
        assert_eq!(page.total_pages, 0);

        let page = Page::new(vec![1], 20, &p);
        assert_eq!(page.total_pages, 2);
    }
}
