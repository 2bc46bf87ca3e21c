//! Application services - orchestrate domain rules around repository calls.

mod post;

pub use post::PostService;
