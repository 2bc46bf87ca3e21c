//! Pagination types shared by the service and repository layers.

use serde::{Deserialize, Serialize};

use super::Post;

/// Page size used when the caller asks for a non-positive one.
pub const DEFAULT_PAGE_SIZE: u64 = 9;

/// Limit used by `get_recent` when the caller asks for a non-positive one.
pub const DEFAULT_RECENT_LIMIT: u64 = 5;

/// A normalized pagination window.
///
/// Every layer that receives a raw `(page, page_size)` pair goes through
/// [`PageRequest::new`], so the clamping rules live in exactly one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    page_size: u64,
}

impl PageRequest {
    /// Clamp `page` to at least 1 and replace a non-positive `page_size` with the default.
    pub fn new(page: i64, page_size: i64) -> Self {
        let page = u64::try_from(page).ok().filter(|p| *p >= 1).unwrap_or(1);
        let page_size = u64::try_from(page_size)
            .ok()
            .filter(|s| *s >= 1)
            .unwrap_or(DEFAULT_PAGE_SIZE);
        Self { page, page_size }
    }

    /// 1-based page number.
    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Number of matching documents to skip.
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE as i64)
    }
}

/// A normalized, always positive limit for "most recent" queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecentLimit(u64);

impl RecentLimit {
    pub fn new(limit: i64) -> Self {
        Self(
            u64::try_from(limit)
                .ok()
                .filter(|l| *l >= 1)
                .unwrap_or(DEFAULT_RECENT_LIMIT),
        )
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

/// One page of posts, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostPage {
    pub items: Vec<Post>,
    /// Number of posts matching the filter, regardless of the window.
    pub total_count: u64,
    pub page: u64,
    pub page_size: u64,
}

impl PostPage {
    pub fn new(items: Vec<Post>, total_count: u64, request: PageRequest) -> Self {
        Self {
            items,
            total_count,
            page: request.page(),
            page_size: request.page_size(),
        }
    }

    pub fn total_pages(&self) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        self.total_count.div_ceil(self.page_size)
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}
