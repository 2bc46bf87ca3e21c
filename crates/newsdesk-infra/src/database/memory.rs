//! In-memory post repository - used by tests and when no document store is configured.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use async_trait::async_trait;
use tokio::sync::RwLock;

use newsdesk_core::domain::{PageRequest, Post, PostId, PostPage, RecentLimit};
use newsdesk_core::ports::PostRepository;
use newsdesk_core::{RepoError, RequestContext};

/// In-memory post store using a HashMap behind an async RwLock.
///
/// Note: Data is lost on process restart.
pub struct InMemoryPostRepository {
    store: RwLock<HashMap<PostId, Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }

    /// Posts matching `search`, newest first, ties broken by id.
    async fn matching(&self, search: &str) -> Vec<Post> {
        let needle = search.to_lowercase();
        let store = self.store.read().await;

        let mut posts: Vec<Post> = store
            .values()
            .filter(|post| matches_search(post, &needle))
            .cloned()
            .collect();
        posts.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        posts
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

/// `needle` must already be lowercase. An empty needle matches everything.
fn matches_search(post: &Post, needle: &str) -> bool {
    needle.is_empty()
        || post.title.to_lowercase().contains(needle)
        || post.content.to_lowercase().contains(needle)
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, ctx: &RequestContext, post: &mut Post) -> Result<(), RepoError> {
        post.validate()?;

        ctx.run(async {
            let mut store = self.store.write().await;
            match store.entry(post.id) {
                Entry::Occupied(_) => Err(RepoError::Duplicate(format!(
                    "post {} already exists",
                    post.id
                ))),
                Entry::Vacant(slot) => {
                    slot.insert(post.clone());
                    Ok(())
                }
            }
        })
        .await
    }

    async fn get_by_id(&self, ctx: &RequestContext, id: &str) -> Result<Post, RepoError> {
        let id: PostId = id.parse()?;

        ctx.run(async {
            let store = self.store.read().await;
            store.get(&id).cloned().ok_or(RepoError::NotFound)
        })
        .await
    }

    async fn update(&self, ctx: &RequestContext, post: &mut Post) -> Result<(), RepoError> {
        ctx.check()?;
        post.validate()?;
        post.touch();

        ctx.run(async {
            let mut store = self.store.write().await;
            let stored = store.get_mut(&post.id).ok_or(RepoError::NotFound)?;

            // Only the mutable fields are written; id and created_at stay as stored.
            stored.title = post.title.clone();
            stored.content = post.content.clone();
            stored.updated_at = post.updated_at;
            Ok(())
        })
        .await
    }

    async fn delete(&self, ctx: &RequestContext, id: &str) -> Result<(), RepoError> {
        let id: PostId = id.parse()?;

        ctx.run(async {
            let mut store = self.store.write().await;
            store.remove(&id).map(|_| ()).ok_or(RepoError::NotFound)
        })
        .await
    }

    async fn get_all(&self, ctx: &RequestContext) -> Result<Vec<Post>, RepoError> {
        ctx.run(async {
            let store = self.store.read().await;
            Ok(store.values().cloned().collect())
        })
        .await
    }

    async fn get_recent(&self, ctx: &RequestContext, limit: i64) -> Result<Vec<Post>, RepoError> {
        let limit = RecentLimit::new(limit);

        ctx.run(async {
            let mut posts = self.matching("").await;
            posts.truncate(usize::try_from(limit.get()).unwrap_or(usize::MAX));
            Ok(posts)
        })
        .await
    }

    async fn get_paginated(
        &self,
        ctx: &RequestContext,
        page: i64,
        page_size: i64,
        search: &str,
    ) -> Result<PostPage, RepoError> {
        let request = PageRequest::new(page, page_size);

        ctx.run(async {
            let posts = self.matching(search).await;
            let total_count = posts.len() as u64;
            let items = posts
                .into_iter()
                .skip(usize::try_from(request.offset()).unwrap_or(usize::MAX))
                .take(usize::try_from(request.page_size()).unwrap_or(usize::MAX))
                .collect();

            Ok(PostPage::new(items, total_count, request))
        })
        .await
    }
}
