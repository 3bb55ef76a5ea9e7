//! Pagination for archive listings

use serde::Serialize;

/// Rows per page for every listing endpoint
pub const PAGE_SIZE: i64 = 100;

/// Page metadata included in listing responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Page {
    /// Current page number (1-indexed, clamped to the available pages)
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
    pub total_results: i64,
    /// Row offset for SQL LIMIT/OFFSET
    #[serde(skip)]
    pub offset: i64,
}

impl Page {
    /// Clamp `requested_page` into `[1, total_pages]` and compute the offset
    ///
    /// # Examples
    /// ```
    /// use setlist_web::pagination::Page;
    ///
    /// // 250 events = 3 pages (100 + 100 + 50)
    /// let p = Page::new(250, 2);
    /// assert_eq!(p.total_pages, 3);
    /// assert_eq!(p.offset, 100);
    ///
    /// // Past the end lands on the last page
    /// assert_eq!(Page::new(250, 99).page, 3);
    /// ```
    pub fn new(total_results: i64, requested_page: i64) -> Self {
        let total_pages = (total_results + PAGE_SIZE - 1) / PAGE_SIZE;
        let page = requested_page.clamp(1, total_pages.max(1));

        Self {
            page,
            page_size: PAGE_SIZE,
            total_pages,
            total_results,
            offset: (page - 1) * PAGE_SIZE,
        }
    }
}

pub fn default_page() -> i64 {
    1
}
