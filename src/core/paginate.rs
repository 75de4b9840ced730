//! Generic page-windowing over a count + fetch pair.
//!
//! Produces the uniform paginated envelope every listing endpoint returns.
//! The count and fetch queries run concurrently; the window math is done
//! here so storage code only ever sees a ready offset and limit.

use crate::errors::Result;
use serde::{Deserialize, Serialize};
use std::future::Future;

/// Page size used when the caller does not supply one
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Upper bound on page size; larger requests are silently truncated
pub const MAX_PAGE_SIZE: u64 = 100;

/// Caller-supplied page window, both fields optional.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PageRequest {
    /// 1-based page number; values below 1 are clamped to 1
    pub page: Option<u64>,
    /// Page size; clamped to [1, 100], defaults to 10
    pub limit: Option<u64>,
}

impl PageRequest {
    /// Effective page number after clamping.
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    /// Effective page size after clamping.
    pub fn limit(&self) -> u64 {
        self.limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }

    /// Number of rows to skip for this window.
    pub fn offset(&self) -> u64 {
        (self.page() - 1) * self.limit()
    }
}

/// Window metadata attached to every paginated response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// Effective page number
    pub page: u64,
    /// Effective page size
    pub limit: u64,
    /// Total matching rows
    pub total: u64,
    /// Total pages; 0 when there are no rows
    pub total_pages: u64,
    /// Whether a later page exists
    pub has_next: bool,
    /// Whether an earlier page exists
    pub has_prev: bool,
}

/// A page of data plus its window metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Paginated<T> {
    /// Rows for the requested window
    pub data: Vec<T>,
    /// Window metadata
    pub pagination: PageInfo,
}

/// Fetches one page through a count/fetch pair, concurrently.
///
/// `count` returns the total matching rows; `fetch(offset, limit)` returns
/// the window's rows. Both must observe the same filter or the metadata will
/// lie about the data.
pub async fn paginate<T, Fc, Ff, CFut, FFut>(
    count: Fc,
    fetch: Ff,
    request: PageRequest,
) -> Result<Paginated<T>>
where
    Fc: FnOnce() -> CFut,
    CFut: Future<Output = Result<u64>>,
    Ff: FnOnce(u64, u64) -> FFut,
    FFut: Future<Output = Result<Vec<T>>>,
{
    let page = request.page();
    let limit = request.limit();

    let (total, data) = tokio::try_join!(count(), fetch(request.offset(), limit))?;

    let total_pages = total.div_ceil(limit);

    Ok(Paginated {
        data,
        pagination: PageInfo {
            page,
            limit,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        },
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    async fn page_of_numbers(total: u64, request: PageRequest) -> Paginated<u64> {
        paginate(
            || async move { Ok(total) },
            |offset, limit| async move {
                Ok((offset..total.min(offset + limit)).collect::<Vec<_>>())
            },
            request,
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_last_page_window() {
        let result = page_of_numbers(
            25,
            PageRequest {
                page: Some(3),
                limit: Some(10),
            },
        )
        .await;

        assert_eq!(result.data, vec![20, 21, 22, 23, 24]);
        assert_eq!(result.pagination.total, 25);
        assert_eq!(result.pagination.total_pages, 3);
        assert!(!result.pagination.has_next);
        assert!(result.pagination.has_prev);
    }

    #[tokio::test]
    async fn test_first_page_defaults() {
        let result = page_of_numbers(25, PageRequest::default()).await;

        assert_eq!(result.pagination.page, 1);
        assert_eq!(result.pagination.limit, 10);
        assert_eq!(result.data.len(), 10);
        assert!(result.pagination.has_next);
        assert!(!result.pagination.has_prev);
    }

    #[tokio::test]
    async fn test_empty_result_has_no_pages() {
        let result = page_of_numbers(0, PageRequest::default()).await;

        assert_eq!(result.pagination.total_pages, 0);
        assert!(!result.pagination.has_next);
        assert!(!result.pagination.has_prev);
        assert!(result.data.is_empty());
    }

    #[test]
    fn test_request_clamping() {
        let oversized = PageRequest {
            page: Some(0),
            limit: Some(500),
        };
        assert_eq!(oversized.page(), 1);
        assert_eq!(oversized.limit(), MAX_PAGE_SIZE);

        let undersized = PageRequest {
            page: None,
            limit: Some(0),
        };
        assert_eq!(undersized.page(), 1);
        assert_eq!(undersized.limit(), 1);

        let windowed = PageRequest {
            page: Some(3),
            limit: Some(10),
        };
        assert_eq!(windowed.offset(), 20);
    }
}
