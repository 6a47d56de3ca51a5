//! Page links rendered under every list view.

use serde::Serialize;

/// How many page links surround the edges and the current page.
#[derive(Clone, Copy, Debug)]
pub struct PageWindow {
    pub edge: usize,
    pub before_current: usize,
    pub after_current: usize,
}

impl Default for PageWindow {
    fn default() -> Self {
        Self {
            edge: 2,
            before_current: 2,
            after_current: 3,
        }
    }
}

impl PageWindow {
    /// Page numbers to show, with `None` marking an elided gap.
    pub fn pages(&self, current: usize, last: usize) -> Vec<Option<usize>> {
        if last == 0 {
            return Vec::new();
        }
        let current = current.clamp(1, last);

        let mut shown: Vec<usize> = (1..=last)
            .filter(|&page| {
                page <= self.edge
                    || page > last.saturating_sub(self.edge)
                    || (page + self.before_current >= current
                        && page <= current + self.after_current)
            })
            .collect();
        shown.dedup();

        let mut pages = Vec::with_capacity(shown.len() + 2);
        let mut previous = 0;
        for page in shown {
            if page > previous + 1 {
                pages.push(None);
            }
            pages.push(Some(page));
            previous = page;
        }
        pages
    }
}

/// A page of rows with its navigation links.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages: Vec<Option<usize>>,
    pub page: usize,
    pub total: usize,
    pub prev: Option<usize>,
    pub next: Option<usize>,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, current_page: usize, total_pages: usize, total: usize) -> Self {
        let page = current_page.max(1);
        let pages = PageWindow::default().pages(page, total_pages);

        Self {
            items,
            pages,
            page,
            total,
            prev: (page > 1).then(|| page - 1),
            next: (page < total_pages).then(|| page + 1),
        }
    }
}
