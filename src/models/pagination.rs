//! Pagination arithmetic for the listing page

use serde::Deserialize;

/// Offset/limit window for one page of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page number actually used
    pub page: i64,
    pub offset: i64,
    pub limit: i64,
    pub total_pages: i64,
}

/// Compute the window for `page` given `total` records.
///
/// A missing or non-positive page falls back to 1. Pages past the end are
/// allowed and simply select nothing.
pub fn paginate(page: Option<i64>, page_size: i64, total: i64) -> Pagination {
    let page = page.filter(|p| *p > 0).unwrap_or(1);
    let page_size = page_size.max(1);
    let total = total.max(0);

    Pagination {
        page,
        offset: (page - 1).saturating_mul(page_size),
        limit: page_size,
        total_pages: (total + page_size - 1) / page_size,
    }
}

impl Pagination {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Query string of `GET /`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageParams {
    /// Kept as text so `?page=abc` falls back to the first page instead of
    /// being rejected.
    pub page: Option<String>,
}

impl PageParams {
    pub fn page(&self) -> Option<i64> {
        self.page.as_deref().and_then(|p| p.trim().parse().ok())
    }
}
