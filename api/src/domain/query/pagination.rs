//! Page arithmetic and the paginated result envelope

use serde::Serialize;

/// Skip/take pair handed to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub offset: u64,
    pub limit: u64,
}

impl PageWindow {
    /// Window for a 1-based page number
    pub fn new(page: u64, page_size: u64) -> Self {
        Self {
            offset: page.saturating_sub(1).saturating_mul(page_size),
            limit: page_size,
        }
    }
}

/// Pagination metadata returned with every page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationSummary {
    pub current: u64,
    pub page_size: u64,
    pub total: u64,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

/// Compute pagination metadata for `page` given the total match count
pub fn paginate(page: u64, page_size: u64, total: u64) -> PaginationSummary {
    let total_pages = if page_size == 0 {
        0
    } else {
        total.div_ceil(page_size)
    };

    PaginationSummary {
        current: page,
        page_size,
        total,
        total_pages,
        has_next: page < total_pages,
        has_prev: page > 1,
    }
}

/// Records of one page plus the pagination summary
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub pagination: PaginationSummary,
}

impl<T> Page<T> {
    pub fn new(data: Vec<T>, pagination: PaginationSummary) -> Self {
        Self { data, pagination }
    }
}
