//! Pagination types for list endpoints.

use serde::Serialize;
use utoipa::ToSchema;

use crate::config::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::domain::Movie;

/// Normalized page request. Always 1-indexed with a non-zero limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub limit: u64,
}

impl PageRequest {
    /// Build from raw query values. Absent, non-numeric or zero values
    /// fall back to the defaults; the limit is capped. A page whose offset
    /// would not fit a SQL `BIGINT` is treated as invalid too.
    pub fn from_raw(page: Option<&str>, limit: Option<&str>) -> Self {
        let limit = parse_positive(limit)
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .min(MAX_PAGE_SIZE);
        let page = parse_positive(page)
            .filter(|page| checked_offset(*page, limit).is_some())
            .unwrap_or(DEFAULT_PAGE_NUMBER);

        Self { page, limit }
    }

    /// Calculate offset for database query
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }

    /// Zero-based page index (SeaORM paginator convention)
    pub fn index(&self) -> u64 {
        self.page.saturating_sub(1)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE_NUMBER,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Row offset of a page, `None` when it exceeds `i64::MAX`.
fn checked_offset(page: u64, limit: u64) -> Option<u64> {
    page.saturating_sub(1)
        .checked_mul(limit)
        .filter(|offset| i64::try_from(*offset).is_ok())
}

fn parse_positive(raw: Option<&str>) -> Option<u64> {
    raw.and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|v| *v > 0)
}

/// Paginated response envelope
#[derive(Debug, Serialize, ToSchema)]
#[aliases(MoviePage = Page<Movie>)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub current_page: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    /// Create a page, deriving `total_pages = ceil(total / limit)`.
    pub fn new(items: Vec<T>, request: PageRequest, total: u64) -> Self {
        let total_pages = if request.limit > 0 {
            total.div_ceil(request.limit)
        } else {
            0
        };

        Self {
            items,
            current_page: request.page,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_absent() {
        assert_eq!(
            PageRequest::from_raw(None, None),
            PageRequest { page: 1, limit: 10 }
        );
    }

    #[test]
    fn test_defaults_when_not_numeric_or_zero() {
        assert_eq!(
            PageRequest::from_raw(Some("abc"), Some("0")),
            PageRequest { page: 1, limit: 10 }
        );
        assert_eq!(
            PageRequest::from_raw(Some("-2"), Some("x1")),
            PageRequest { page: 1, limit: 10 }
        );
    }

    #[test]
    fn test_limit_is_capped() {
        let request = PageRequest::from_raw(Some("3"), Some("5000"));
        assert_eq!(request.page, 3);
        assert_eq!(request.limit, MAX_PAGE_SIZE);
        assert_eq!(request.offset(), 2 * MAX_PAGE_SIZE);
    }

    #[test]
    fn test_out_of_range_page_falls_back_to_default() {
        let request = PageRequest::from_raw(Some("18446744073709551615"), Some("10"));
        assert_eq!(request, PageRequest { page: 1, limit: 10 });
        assert_eq!(request.offset(), 0);

        let last = i64::MAX as u64 / 100 + 1;
        let request = PageRequest::from_raw(Some(&last.to_string()), Some("100"));
        assert_eq!(request.page, last);
        assert!(request.offset() <= i64::MAX as u64);

        let request = PageRequest::from_raw(Some(&(last + 1).to_string()), Some("100"));
        assert_eq!(request.page, 1);
    }

    #[test]
    fn test_offset_saturates() {
        let request = PageRequest {
            page: u64::MAX,
            limit: MAX_PAGE_SIZE,
        };
        assert_eq!(request.offset(), u64::MAX);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let page: Page<u8> = Page::new(vec![], PageRequest { page: 1, limit: 10 }, 21);
        assert_eq!(page.total_pages, 3);

        let page: Page<u8> = Page::new(vec![], PageRequest { page: 1, limit: 10 }, 20);
        assert_eq!(page.total_pages, 2);
    }

    #[test]
    fn test_empty_page() {
        let page: Page<u8> = Page::new(vec![], PageRequest::default(), 0);
        let json = serde_json::to_value(&page).unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "items": [], "currentPage": 1, "totalPages": 0 })
        );
    }
}
