//! Pagination types for directory listings.

use serde::{Deserialize, Serialize};

/// Default page size.
const DEFAULT_PAGE_SIZE: usize = 20;
/// Maximum page size.
const MAX_PAGE_SIZE: usize = 200;

/// Request parameters for paginated listings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-based).
    #[serde(default = "default_page")]
    pub page: usize,
    /// Number of items per page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl PageRequest {
    /// Create a new page request.
    pub fn new(page: usize, page_size: usize) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Index of the first item on this page.
    pub fn offset(&self) -> usize {
        (self.page.saturating_sub(1)) * self.page_size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Paginated response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Current page number (1-based).
    pub page: usize,
    /// Number of items per page.
    pub page_size: usize,
    /// Total number of items across all pages.
    pub total_items: usize,
    /// Total number of pages.
    pub total_pages: usize,
    /// Whether there is a next page.
    pub has_next: bool,
    /// Whether there is a previous page.
    pub has_previous: bool,
}

impl<T> PageResponse<T> {
    /// Create a new paginated response.
    pub fn new(items: Vec<T>, page: usize, page_size: usize, total_items: usize) -> Self {
        let total_pages = if total_items == 0 {
            1
        } else {
            total_items.div_ceil(page_size)
        };
        Self {
            items,
            page,
            page_size,
            total_items,
            total_pages,
            has_next: page < total_pages,
            has_previous: page > 1,
        }
    }

    /// Slice one page out of a fully materialized listing.
    pub fn paginate(all: Vec<T>, request: &PageRequest) -> Self {
        let total_items = all.len();
        let items = all
            .into_iter()
            .skip(request.offset())
            .take(request.page_size)
            .collect();
        Self::new(items, request.page, request.page_size, total_items)
    }
}

fn default_page() -> usize {
    1
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginate_slices() {
        let response = PageResponse::paginate((0..45).collect(), &PageRequest::new(2, 20));
        assert_eq!(response.items, (20..40).collect::<Vec<_>>());
        assert_eq!(response.total_pages, 3);
        assert!(response.has_next);
        assert!(response.has_previous);
    }

    #[test]
    fn test_empty_listing_has_one_page() {
        let response = PageResponse::paginate(Vec::<u8>::new(), &PageRequest::default());
        assert_eq!(response.total_pages, 1);
        assert!(!response.has_next);
    }
}
