//! Page arithmetic for the product grid.
//!
//! ## Page Links
//! ```text
//! total_pages = 10, page = 5
//!
//!   ‹  1  …  4  [5]  6  …  10  ›
//!      │  │  └──┬───┘  │   │
//!      │  │  page ± 1  │   last
//!      │  └ page − 2   └ page + 2
//!      first
//! ```
//!
//! Pages are 1-indexed and never clamped: an out-of-range page is simply
//! empty.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Pagination info for one page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Current page (1-indexed).
    pub page: usize,
    pub per_page: usize,
    /// Total number of results.
    pub total: usize,
    /// `ceil(total / per_page)`, 0 when there are no results.
    pub total_pages: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

/// One entry of the page link bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PageLink {
    Page { number: usize, active: bool },
    Ellipsis,
}

impl Pagination {
    pub fn new(page: usize, per_page: usize, total: usize) -> Self {
        let total_pages = if per_page == 0 { 0 } else { total.div_ceil(per_page) };

        Pagination {
            page,
            per_page,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    /// Index of the first result on this page.
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.per_page)
    }

    /// 1-indexed number of the first result shown, 0 when there are none.
    pub fn start_item(&self) -> usize {
        if self.total == 0 || self.page == 0 {
            0
        } else {
            self.offset().saturating_add(1)
        }
    }

    /// 1-indexed number of the last result shown.
    pub fn end_item(&self) -> usize {
        self.page.saturating_mul(self.per_page).min(self.total)
    }

    /// "Showing 13-24 of 50 results"
    pub fn range_label(&self) -> String {
        format!(
            "Showing {}-{} of {} results",
            self.start_item(),
            self.end_item(),
            self.total
        )
    }

    /// Link bar entries. Empty when everything fits on one page.
    pub fn page_links(&self) -> Vec<PageLink> {
        if self.total_pages <= 1 {
            return Vec::new();
        }

        let mut links = Vec::new();
        for number in 1..=self.total_pages {
            let near = number + 1 >= self.page && number <= self.page.saturating_add(1);
            if number == 1 || number == self.total_pages || near {
                links.push(PageLink::Page {
                    number,
                    active: number == self.page,
                });
            } else if number + 2 == self.page || number == self.page.saturating_add(2) {
                links.push(PageLink::Ellipsis);
            }
        }
        links
    }
}
