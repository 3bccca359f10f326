//! Offset pagination.
//!
//! A [`PageRequest`] turns a 1-based `page` and a `per_page` size into the
//! `skip`/`take` pair used by list queries, and [`PageMeta`] describes the
//! resulting page next to the items in a [`Paginated`] envelope.

use std::future::Future;

use serde::{Deserialize, Serialize};
use thiserror::Error;
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Page used when the caller does not ask for one.
pub const DEFAULT_PAGE: i64 = 1;
/// Page size used when the caller does not ask for one.
pub const DEFAULT_PER_PAGE: i64 = 10;
/// Largest page size a caller may request.
pub const MAX_PER_PAGE: i64 = 100;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PaginationError {
    #[error("page must be a positive integer, got {0}")]
    InvalidPage(i64),
    #[error("perPage must be a positive integer, got {0}")]
    InvalidPerPage(i64),
    #[error("perPage must not exceed {MAX_PER_PAGE}, got {0}")]
    PerPageTooLarge(i64),
}

/// A validated page request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    per_page: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl PageRequest {
    /// Validate optional page parameters, filling in defaults for absent ones.
    pub fn new(page: Option<i64>, per_page: Option<i64>) -> Result<Self, PaginationError> {
        let page = page.unwrap_or(DEFAULT_PAGE);
        let per_page = per_page.unwrap_or(DEFAULT_PER_PAGE);

        if page < 1 {
            return Err(PaginationError::InvalidPage(page));
        }
        if per_page < 1 {
            return Err(PaginationError::InvalidPerPage(per_page));
        }
        if per_page > MAX_PER_PAGE {
            return Err(PaginationError::PerPageTooLarge(per_page));
        }

        Ok(Self { page, per_page })
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn per_page(&self) -> i64 {
        self.per_page
    }

    /// Number of rows to skip (`OFFSET`).
    pub fn skip(&self) -> i64 {
        (self.page - 1).saturating_mul(self.per_page)
    }

    /// Number of rows to fetch (`LIMIT`).
    pub fn take(&self) -> i64 {
        self.per_page
    }
}

/// Metadata describing one page of a listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// Total number of items across all pages.
    pub total: i64,
    /// Number of the last page (0 when there are no items).
    pub last_page: i64,
    pub current_page: i64,
    pub per_page: i64,
    /// Previous page number, if any.
    pub prev: Option<i64>,
    /// Next page number, if any.
    pub next: Option<i64>,
}

impl PageMeta {
    pub fn new(total: i64, request: PageRequest) -> Self {
        let total = total.max(0);
        let last_page = (total + request.per_page - 1) / request.per_page;
        let current_page = request.page;

        Self {
            total,
            last_page,
            current_page,
            per_page: request.per_page,
            prev: (current_page > 1).then(|| current_page - 1),
            next: (current_page < last_page).then(|| current_page + 1),
        }
    }
}

/// A page of items together with its metadata.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, total: i64, request: PageRequest) -> Self {
        Self {
            data,
            meta: PageMeta::new(total, request),
        }
    }
}

/// Run a count query and, when the requested page is not past the end, a
/// list query with the page's `skip`/`take`, and wrap the result.
pub async fn paginate<T, E, C, L, F>(
    request: PageRequest,
    count: C,
    list: L,
) -> Result<Paginated<T>, E>
where
    C: Future<Output = Result<i64, E>>,
    L: FnOnce(i64, i64) -> F,
    F: Future<Output = Result<Vec<T>, E>>,
{
    let total = count.await?;
    let data = if request.skip() >= total {
        Vec::new()
    } else {
        list(request.skip(), request.take()).await?
    };
    Ok(Paginated::new(data, total, request))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_absent() {
        let request = PageRequest::new(None, None).unwrap();
        assert_eq!(request, PageRequest::default());
        assert_eq!(request.skip(), 0);
        assert_eq!(request.take(), DEFAULT_PER_PAGE);
    }

    #[test]
    fn test_skip_is_offset_of_previous_pages() {
        let request = PageRequest::new(Some(3), Some(20)).unwrap();
        assert_eq!(request.skip(), 40);
        assert_eq!(request.take(), 20);
    }

    #[test]
    fn test_rejects_non_positive_values() {
        assert_eq!(
            PageRequest::new(Some(0), None),
            Err(PaginationError::InvalidPage(0))
        );
        assert_eq!(
            PageRequest::new(None, Some(-5)),
            Err(PaginationError::InvalidPerPage(-5))
        );
        assert_eq!(
            PageRequest::new(None, Some(MAX_PER_PAGE + 1)),
            Err(PaginationError::PerPageTooLarge(MAX_PER_PAGE + 1))
        );
    }

    #[test]
    fn test_last_page_is_ceiling_of_total_over_per_page() {
        for per_page in 1..=12 {
            for total in 0..=50 {
                let request = PageRequest::new(Some(1), Some(per_page)).unwrap();
                let meta = PageMeta::new(total, request);
                let expected = (total as f64 / per_page as f64).ceil() as i64;
                assert_eq!(meta.last_page, expected, "total={total} per_page={per_page}");
            }
        }
    }

    #[test]
    fn test_prev_and_next_links() {
        let first = PageMeta::new(25, PageRequest::new(Some(1), Some(10)).unwrap());
        assert_eq!((first.prev, first.next), (None, Some(2)));

        let middle = PageMeta::new(25, PageRequest::new(Some(2), Some(10)).unwrap());
        assert_eq!((middle.prev, middle.next), (Some(1), Some(3)));

        let last = PageMeta::new(25, PageRequest::new(Some(3), Some(10)).unwrap());
        assert_eq!((last.prev, last.next), (Some(2), None));

        let empty = PageMeta::new(0, PageRequest::default());
        assert_eq!(empty.last_page, 0);
        assert_eq!((empty.prev, empty.next), (None, None));
    }

    #[test]
    fn test_meta_serializes_camel_case() {
        let meta = PageMeta::new(11, PageRequest::new(Some(2), Some(5)).unwrap());
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["lastPage"], 3);
        assert_eq!(json["currentPage"], 2);
        assert_eq!(json["perPage"], 5);
        assert_eq!(json["prev"], 1);
        assert_eq!(json["next"], 3);
    }

    #[tokio::test]
    async fn test_paginate_slices_source() {
        let source: Vec<i64> = (1..=23).collect();
        let request = PageRequest::new(Some(3), Some(10)).unwrap();

        let page = paginate(
            request,
            async { Ok::<_, ()>(source.len() as i64) },
            |skip, take| {
                let items: Vec<i64> = source
                    .iter()
                    .skip(skip as usize)
                    .take(take as usize)
                    .copied()
                    .collect();
                async move { Ok(items) }
            },
        )
        .await
        .unwrap();

        assert_eq!(page.data, vec![21, 22, 23]);
        assert!(page.data.len() as i64 <= request.per_page());
        assert_eq!(page.meta.last_page, 3);
        assert_eq!(page.meta.next, None);
    }

    #[tokio::test]
    async fn test_paginate_skips_list_past_the_end() {
        let request = PageRequest::new(Some(5), Some(10)).unwrap();
        // The list query fails if it runs; past the end it must not.
        let page = paginate(request, async { Ok::<_, ()>(12) }, |_, _| async {
            Err::<Vec<i64>, ()>(())
        })
        .await
        .unwrap();

        assert!(page.data.is_empty());
        assert_eq!(page.meta.total, 12);
        assert_eq!(page.meta.prev, Some(4));
    }
}
