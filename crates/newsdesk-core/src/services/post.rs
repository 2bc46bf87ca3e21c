use std::sync::Arc;

use crate::context::RequestContext;
use crate::domain::{PageRequest, Post, PostPage, RecentLimit};
use crate::error::{ErrorKind, RepoError, ServiceError};
use crate::ports::PostRepository;

/// Post use cases.
///
/// Errors are wrapped with what the service was doing, but their
/// [`ErrorKind`] is always the one reported by the domain or repository.
#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    /// Validate and persist a new post.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        title: &str,
        content: &str,
    ) -> Result<Post, ServiceError> {
        let mut post = Post::new(title, content)
            .map_err(|e| ServiceError::validation("failed to create post", e))?;

        self.repo
            .create(ctx, &mut post)
            .await
            .map_err(|e| repo_failure("failed to save post", e))?;

        tracing::info!(post_id = %post.id, "Post created");
        Ok(post)
    }

    pub async fn get_all(&self, ctx: &RequestContext) -> Result<Vec<Post>, ServiceError> {
        self.repo
            .get_all(ctx)
            .await
            .map_err(|e| repo_failure("failed to get posts", e))
    }

    pub async fn get_by_id(&self, ctx: &RequestContext, id: &str) -> Result<Post, ServiceError> {
        tracing::debug!(post_id = %id, "Fetching post");
        self.repo
            .get_by_id(ctx, id)
            .await
            .map_err(|e| repo_failure("failed to get post", e))
    }

    /// Replace a post's title and content.
    ///
    /// Nothing is written unless the post exists and the new pair is valid.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: &str,
        title: &str,
        content: &str,
    ) -> Result<Post, ServiceError> {
        let mut post = self
            .repo
            .get_by_id(ctx, id)
            .await
            .map_err(|e| repo_failure("failed to get post for update", e))?;

        post.update(title, content)
            .map_err(|e| ServiceError::validation("failed to update post", e))?;

        self.repo
            .update(ctx, &mut post)
            .await
            .map_err(|e| repo_failure("failed to save updated post", e))?;

        tracing::info!(post_id = %post.id, "Post updated");
        Ok(post)
    }

    pub async fn delete(&self, ctx: &RequestContext, id: &str) -> Result<(), ServiceError> {
        self.repo
            .delete(ctx, id)
            .await
            .map_err(|e| repo_failure("failed to delete post", e))?;

        tracing::info!(post_id = %id, "Post deleted");
        Ok(())
    }

    pub async fn get_paginated(
        &self,
        ctx: &RequestContext,
        page: i64,
        page_size: i64,
        search: &str,
    ) -> Result<PostPage, ServiceError> {
        let request = PageRequest::new(page, page_size);
        tracing::debug!(
            page = request.page(),
            page_size = request.page_size(),
            search = %search,
            "Fetching post page"
        );

        self.repo
            .get_paginated(
                ctx,
                request.page() as i64,
                request.page_size() as i64,
                search,
            )
            .await
            .map_err(|e| repo_failure("failed to get paginated posts", e))
    }

    pub async fn get_recent(
        &self,
        ctx: &RequestContext,
        limit: i64,
    ) -> Result<Vec<Post>, ServiceError> {
        let limit = RecentLimit::new(limit);
        self.repo
            .get_recent(ctx, limit.get() as i64)
            .await
            .map_err(|e| repo_failure("failed to get recent posts", e))
    }
}

fn repo_failure(context: &'static str, source: RepoError) -> ServiceError {
    if source.kind() == ErrorKind::Storage {
        tracing::warn!(error = %source, "{}", context);
    }
    ServiceError::repository(context, source)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::domain::PostId;
    use crate::error::ValidationError;

    const VALID_CONTENT: &str = "Test content with more than 10 characters";

    /// Records what the service asks of it; page and limit arguments are
    /// stored raw so the tests can see what the service passed down.
    #[derive(Default)]
    struct MockPostRepository {
        posts: Mutex<HashMap<PostId, Post>>,
        writes: AtomicUsize,
        last_page_args: Mutex<Option<(i64, i64, String)>>,
        last_limit: Mutex<Option<i64>>,
        fail_with_query_error: bool,
    }

    impl MockPostRepository {
        fn failing() -> Self {
            Self {
                fail_with_query_error: true,
                ..Default::default()
            }
        }

        fn writes(&self) -> usize {
            self.writes.load(Ordering::SeqCst)
        }

        fn fail(&self) -> Result<(), RepoError> {
            if self.fail_with_query_error {
                Err(RepoError::Query("connection reset".to_string()))
            } else {
                Ok(())
            }
        }

        fn lookup(&self, id: &str) -> Result<Post, RepoError> {
            let id: PostId = id.parse()?;
            self.posts
                .lock()
                .unwrap()
                .get(&id)
                .cloned()
                .ok_or(RepoError::NotFound)
        }
    }

    #[async_trait]
    impl PostRepository for MockPostRepository {
        async fn create(&self, ctx: &RequestContext, post: &mut Post) -> Result<(), RepoError> {
            ctx.check()?;
            self.fail()?;
            post.validate()?;
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.posts.lock().unwrap().insert(post.id, post.clone());
            Ok(())
        }

        async fn get_by_id(&self, ctx: &RequestContext, id: &str) -> Result<Post, RepoError> {
            ctx.check()?;
            self.fail()?;
            self.lookup(id)
        }

        async fn update(&self, ctx: &RequestContext, post: &mut Post) -> Result<(), RepoError> {
            ctx.check()?;
            self.fail()?;
            post.validate()?;
            post.touch();
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.posts.lock().unwrap().insert(post.id, post.clone());
            Ok(())
        }

        async fn delete(&self, ctx: &RequestContext, id: &str) -> Result<(), RepoError> {
            ctx.check()?;
            self.fail()?;
            let id: PostId = id.parse()?;
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.posts
                .lock()
                .unwrap()
                .remove(&id)
                .map(|_| ())
                .ok_or(RepoError::NotFound)
        }

        async fn get_all(&self, ctx: &RequestContext) -> Result<Vec<Post>, RepoError> {
            ctx.check()?;
            self.fail()?;
            Ok(self.posts.lock().unwrap().values().cloned().collect())
        }

        async fn get_recent(
            &self,
            ctx: &RequestContext,
            limit: i64,
        ) -> Result<Vec<Post>, RepoError> {
            ctx.check()?;
            self.fail()?;
            *self.last_limit.lock().unwrap() = Some(limit);
            Ok(Vec::new())
        }

        async fn get_paginated(
            &self,
            ctx: &RequestContext,
            page: i64,
            page_size: i64,
            search: &str,
        ) -> Result<PostPage, RepoError> {
            ctx.check()?;
            self.fail()?;
            *self.last_page_args.lock().unwrap() = Some((page, page_size, search.to_string()));
            Ok(PostPage::new(
                Vec::new(),
                0,
                PageRequest::new(page, page_size),
            ))
        }
    }

    fn service_with(repo: Arc<MockPostRepository>) -> PostService {
        PostService::new(repo)
    }

    fn ctx() -> RequestContext {
        RequestContext::background()
    }

    #[tokio::test]
    async fn test_create_and_get_round_trip() {
        let repo = Arc::new(MockPostRepository::default());
        let service = service_with(repo.clone());

        let created = service
            .create(&ctx(), "Test Title", VALID_CONTENT)
            .await
            .unwrap();
        let found = service
            .get_by_id(&ctx(), &created.id.to_string())
            .await
            .unwrap();

        assert_eq!(found.title, "Test Title");
        assert_eq!(found.content, VALID_CONTENT);
        assert_eq!(found.created_at, found.updated_at);
        assert_eq!(repo.writes(), 1);
    }

    #[tokio::test]
    async fn test_create_invalid_input_never_reaches_storage() {
        let repo = Arc::new(MockPostRepository::default());
        let service = service_with(repo.clone());

        let err = service.create(&ctx(), "A", VALID_CONTENT).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.validation_error(), Some(ValidationError::InvalidTitle));

        let err = service.create(&ctx(), "Test Title", "Short").await.unwrap_err();
        assert_eq!(err.validation_error(), Some(ValidationError::InvalidContent));

        assert_eq!(repo.writes(), 0);
    }

    #[tokio::test]
    async fn test_create_repo_failure() {
        let service = service_with(Arc::new(MockPostRepository::failing()));

        let err = service
            .create(&ctx(), "Test Title", VALID_CONTENT)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Storage);
        assert!(err.to_string().starts_with("failed to save post"));
    }

    #[tokio::test]
    async fn test_update() {
        let repo = Arc::new(MockPostRepository::default());
        let service = service_with(repo.clone());
        let created = service
            .create(&ctx(), "Original Title", VALID_CONTENT)
            .await
            .unwrap();

        let updated = service
            .update(
                &ctx(),
                &created.id.to_string(),
                "Updated Title",
                "Updated content with more than 10 characters",
            )
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "Updated Title");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
        assert_eq!(repo.writes(), 2);
    }

    #[tokio::test]
    async fn test_update_invalid_data_performs_no_write() {
        let repo = Arc::new(MockPostRepository::default());
        let service = service_with(repo.clone());
        let created = service
            .create(&ctx(), "Original Title", VALID_CONTENT)
            .await
            .unwrap();
        let id = created.id.to_string();

        let err = service
            .update(&ctx(), &id, "A", VALID_CONTENT)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(repo.writes(), 1);

        let stored = service.get_by_id(&ctx(), &id).await.unwrap();
        assert_eq!(stored, created);
    }

    #[tokio::test]
    async fn test_update_missing_post() {
        let repo = Arc::new(MockPostRepository::default());
        let service = service_with(repo.clone());

        let err = service
            .update(&ctx(), &PostId::new().to_string(), "Title", VALID_CONTENT)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err = service
            .update(&ctx(), "nonexistent", "Title", VALID_CONTENT)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidId);
        assert_eq!(repo.writes(), 0);
    }

    #[tokio::test]
    async fn test_delete_surfaces_kinds_unchanged() {
        let service = service_with(Arc::new(MockPostRepository::default()));
        let created = service
            .create(&ctx(), "Test Title", VALID_CONTENT)
            .await
            .unwrap();
        let id = created.id.to_string();

        service.delete(&ctx(), &id).await.unwrap();
        assert_eq!(
            service.get_by_id(&ctx(), &id).await.unwrap_err().kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            service.delete(&ctx(), &id).await.unwrap_err().kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            service.delete(&ctx(), "not-an-id").await.unwrap_err().kind(),
            ErrorKind::InvalidId
        );
    }

    #[tokio::test]
    async fn test_get_paginated_normalizes_before_delegating() {
        let repo = Arc::new(MockPostRepository::default());
        let service = service_with(repo.clone());

        let page = service.get_paginated(&ctx(), 0, 0, "news").await.unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, 9);
        assert_eq!(
            *repo.last_page_args.lock().unwrap(),
            Some((1, 9, "news".to_string()))
        );
    }

    #[tokio::test]
    async fn test_get_recent_normalizes_limit() {
        let repo = Arc::new(MockPostRepository::default());
        let service = service_with(repo.clone());

        service.get_recent(&ctx(), -2).await.unwrap();
        assert_eq!(*repo.last_limit.lock().unwrap(), Some(5));

        service.get_recent(&ctx(), 3).await.unwrap();
        assert_eq!(*repo.last_limit.lock().unwrap(), Some(3));
    }

    #[tokio::test]
    async fn test_expired_deadline_is_a_timeout() {
        let repo = Arc::new(MockPostRepository::default());
        let service = service_with(repo.clone());
        let expired = RequestContext::with_timeout(Duration::ZERO);

        let err = service
            .create(&expired, "Test Title", VALID_CONTENT)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Storage);
        assert!(err.is_timeout());
        assert_eq!(repo.writes(), 0);
    }
}
