//! Domain entities - the core business objects.

mod page;
mod post;

pub use page::{DEFAULT_PAGE_SIZE, DEFAULT_RECENT_LIMIT, PageRequest, PostPage, RecentLimit};
pub use post::{CONTENT_MIN_LEN, Post, PostId, TITLE_MAX_LEN, TITLE_MIN_LEN};
