use std::ops::Range;

use serde::Serialize;

/// Page window over an already filtered list. Pages are zero-based.
#[derive(Debug, Clone, Serialize)]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub total_items: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

impl Pagination {
    pub fn new(page: u32, page_size: u32, total_items: usize) -> Self {
        let page_size = page_size.max(1);
        let total_pages = (total_items.div_ceil(page_size as usize)).max(1) as u32;
        let page = page.min(total_pages - 1);
        Self {
            page,
            page_size,
            total_pages,
            total_items,
            has_previous: page > 0,
            has_next: page + 1 < total_pages,
        }
    }

    /// Index range of the current page within the full list.
    pub fn range(&self) -> Range<usize> {
        let start = (self.page as usize * self.page_size as usize).min(self.total_items);
        let end = (start + self.page_size as usize).min(self.total_items);
        start..end
    }
}
