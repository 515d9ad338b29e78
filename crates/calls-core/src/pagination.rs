//! Page arithmetic shared by the list view and the pagination control

use serde::{Deserialize, Serialize};

/// Offset/limit window requested from the data source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageWindow {
    /// Number of records to skip
    pub offset: u64,
    /// Maximum number of records to return
    pub limit: u32,
}

impl PageWindow {
    /// Window for a 1-based page number and page size
    ///
    /// A page of 0 is treated as the first page and a size of 0 as 1.
    #[must_use]
    pub fn for_page(page: u32, page_size: u32) -> Self {
        let limit = page_size.max(1);
        Self {
            offset: u64::from(page.saturating_sub(1)) * u64::from(limit),
            limit,
        }
    }
}

/// Number of pages needed for `total_items`, never less than one
#[must_use]
pub fn total_pages(total_items: u64, page_size: u32) -> u32 {
    let per_page = u64::from(page_size.max(1));
    let pages = total_items.div_ceil(per_page).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Pagination metadata rendered by the pagination control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationMeta {
    /// Current page (1-based)
    pub page: u32,

    /// Items per page
    pub per_page: u32,

    /// Total number of items shown as "records"
    pub total: u64,

    /// Total number of pages
    pub total_pages: u32,

    /// Previous page number (if exists)
    pub prev_page: Option<u32>,

    /// Next page number (if exists)
    pub next_page: Option<u32>,
}

impl PaginationMeta {
    /// Create pagination metadata
    #[must_use]
    pub fn new(page: u32, per_page: u32, total: u64) -> Self {
        let page = page.max(1);
        let total_pages = total_pages(total, per_page);

        Self {
            page,
            per_page: per_page.max(1),
            total,
            total_pages,
            prev_page: (page > 1).then(|| page - 1),
            next_page: (page < total_pages).then(|| page + 1),
        }
    }
}
