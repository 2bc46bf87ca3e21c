use async_trait::async_trait;

use crate::context::RequestContext;
use crate::domain::{Post, PostPage};
use crate::error::RepoError;

/// Post persistence port.
///
/// Identifiers arrive as raw strings; implementations report
/// [`RepoError::InvalidId`] when one is not in the format their store uses.
/// Every call must go through [`RequestContext::run`] so deadlines and
/// cancellation are honoured.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Persist a new post. Fails with `Duplicate` if the id is already taken.
    async fn create(&self, ctx: &RequestContext, post: &mut Post) -> Result<(), RepoError>;

    /// Find a post by its identifier.
    async fn get_by_id(&self, ctx: &RequestContext, id: &str) -> Result<Post, RepoError>;

    /// Write title, content and a fresh `updated_at`. Leaves `id` and `created_at` alone.
    async fn update(&self, ctx: &RequestContext, post: &mut Post) -> Result<(), RepoError>;

    /// Permanently delete a post.
    async fn delete(&self, ctx: &RequestContext, id: &str) -> Result<(), RepoError>;

    /// Every stored post, in no particular order. Meant for small datasets.
    async fn get_all(&self, ctx: &RequestContext) -> Result<Vec<Post>, RepoError>;

    /// The newest posts by `created_at`. A non-positive limit means 5.
    async fn get_recent(&self, ctx: &RequestContext, limit: i64) -> Result<Vec<Post>, RepoError>;

    /// One page of posts, newest first, optionally filtered by a
    /// case-insensitive substring of title or content.
    async fn get_paginated(
        &self,
        ctx: &RequestContext,
        page: i64,
        page_size: i64,
        search: &str,
    ) -> Result<PostPage, RepoError>;
}
