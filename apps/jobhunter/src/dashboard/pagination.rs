//! Client-side pagination over an already-fetched result list.
//!
//! Pages are 1-based. Page `p` shows elements `[(p-1)*size, p*size)` clamped to
//! the list length. An empty list still has one (empty) page.

use crate::errors::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
}

impl Paginator {
    pub fn new(page_size: usize) -> Result<Self, ClientError> {
        if page_size == 0 {
            return Err(ClientError::Validation(
                "page size must be greater than zero".to_string(),
            ));
        }
        Ok(Self { page_size })
    }

    /// `ceil(total / size)`, never less than one.
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size).max(1)
    }

    pub fn clamp_page(&self, page: usize, total: usize) -> usize {
        page.clamp(1, self.page_count(total))
    }

    pub fn slice<'a, T>(&self, items: &'a [T], page: usize) -> &'a [T] {
        let page = self.clamp_page(page, items.len());
        let start = ((page - 1) * self.page_size).min(items.len());
        let end = (page * self.page_size).min(items.len());
        &items[start..end]
    }

    pub fn next(&self, page: usize, total: usize) -> usize {
        self.clamp_page(page.saturating_add(1), total)
    }

    pub fn prev(&self, page: usize, total: usize) -> usize {
        self.clamp_page(page.saturating_sub(1), total)
    }
}
