//! MongoDB post repository.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{Document, doc};
use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};
use mongodb::options::{FindOptions, IndexOptions};
use mongodb::{Collection, Database, IndexModel};

use newsdesk_core::{RepoError, RequestContext};
use newsdesk_core::domain::{PageRequest, Post, PostId, PostPage, RecentLimit};
use newsdesk_core::ports::PostRepository;

use super::connections::POSTS_COLLECTION;
use super::document::PostDocument;

const DUPLICATE_KEY: i32 = 11000;

/// Post repository backed by the `posts` collection.
#[derive(Clone)]
pub struct MongoPostRepository {
    collection: Collection<PostDocument>,
}

impl MongoPostRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(POSTS_COLLECTION),
        }
    }

    /// Create the `created_at` index every listing query sorts on.
    pub async fn ensure_indexes(&self) -> Result<(), RepoError> {
        let index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(
                IndexOptions::builder()
                    .name("created_at_desc".to_string())
                    .build(),
            )
            .build();

        self.collection
            .create_index(index, None)
            .await
            .map_err(map_mongo_error)?;

        tracing::debug!(collection = POSTS_COLLECTION, "Indexes ensured");
        Ok(())
    }

    async fn find_posts(
        &self,
        filter: Document,
        options: Option<FindOptions>,
    ) -> Result<Vec<Post>, RepoError> {
        let cursor = self
            .collection
            .find(filter, options)
            .await
            .map_err(map_mongo_error)?;

        let docs: Vec<PostDocument> = cursor.try_collect().await.map_err(map_mongo_error)?;
        docs.into_iter().map(Post::try_from).collect()
    }
}

/// Filter matching `search` as a case-insensitive substring of title or content.
///
/// The search text is escaped, so it never acts as a regular expression.
pub(crate) fn search_filter(search: &str) -> Document {
    if search.is_empty() {
        return doc! {};
    }

    let pattern = regex::escape(search);
    doc! {
        "$or": [
            { "title": { "$regex": &pattern, "$options": "i" } },
            { "content": { "$regex": &pattern, "$options": "i" } },
        ]
    }
}

/// Newest first; `_id` keeps equal timestamps in a stable order.
pub(crate) fn newest_first() -> Document {
    doc! { "created_at": -1, "_id": 1 }
}

/// The server rejects a skip beyond `i64::MAX`, so the offset is capped there.
pub(crate) fn page_options(request: PageRequest) -> FindOptions {
    FindOptions::builder()
        .sort(newest_first())
        .skip(request.offset().min(i64::MAX as u64))
        .limit(i64::try_from(request.page_size()).unwrap_or(i64::MAX))
        .build()
}

pub(crate) fn recent_options(limit: RecentLimit) -> FindOptions {
    FindOptions::builder()
        .sort(newest_first())
        .limit(i64::try_from(limit.get()).unwrap_or(i64::MAX))
        .build()
}

fn id_filter(id: &PostId) -> Document {
    doc! { "_id": id.to_string() }
}

fn map_mongo_error(err: MongoError) -> RepoError {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write)) if write.code == DUPLICATE_KEY => {
            RepoError::Duplicate(write.message.clone())
        }
        ErrorKind::ServerSelection { .. } | ErrorKind::Io(_) => {
            RepoError::Connection(err.to_string())
        }
        _ => RepoError::Query(err.to_string()),
    }
}

#[async_trait]
impl PostRepository for MongoPostRepository {
    async fn create(&self, ctx: &RequestContext, post: &mut Post) -> Result<(), RepoError> {
        post.validate()?;

        let doc = PostDocument::from(&*post);
        ctx.run(async {
            self.collection
                .insert_one(&doc, None)
                .await
                .map_err(map_mongo_error)
        })
        .await?;

        // Ids are allocated by the domain, so the inserted id is the one we sent.
        tracing::debug!(post_id = %post.id, "Post inserted");
        Ok(())
    }

    async fn get_by_id(&self, ctx: &RequestContext, id: &str) -> Result<Post, RepoError> {
        let id: PostId = id.parse()?;

        let doc = ctx
            .run(async {
                self.collection
                    .find_one(id_filter(&id), None)
                    .await
                    .map_err(map_mongo_error)
            })
            .await?
            .ok_or(RepoError::NotFound)?;

        Post::try_from(doc)
    }

    async fn update(&self, ctx: &RequestContext, post: &mut Post) -> Result<(), RepoError> {
        ctx.check()?;
        post.validate()?;
        post.touch();

        let update = doc! {
            "$set": {
                "title": &post.title,
                "content": &post.content,
                "updated_at": mongodb::bson::DateTime::from_chrono(post.updated_at),
            }
        };

        let result = ctx
            .run(async {
                self.collection
                    .update_one(id_filter(&post.id), update, None)
                    .await
                    .map_err(map_mongo_error)
            })
            .await?;

        if result.matched_count == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn delete(&self, ctx: &RequestContext, id: &str) -> Result<(), RepoError> {
        let id: PostId = id.parse()?;

        let result = ctx
            .run(async {
                self.collection
                    .delete_one(id_filter(&id), None)
                    .await
                    .map_err(map_mongo_error)
            })
            .await?;

        if result.deleted_count == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn get_all(&self, ctx: &RequestContext) -> Result<Vec<Post>, RepoError> {
        ctx.run(self.find_posts(doc! {}, None)).await
    }

    async fn get_recent(&self, ctx: &RequestContext, limit: i64) -> Result<Vec<Post>, RepoError> {
        let options = recent_options(RecentLimit::new(limit));
        ctx.run(self.find_posts(doc! {}, Some(options))).await
    }

    async fn get_paginated(
        &self,
        ctx: &RequestContext,
        page: i64,
        page_size: i64,
        search: &str,
    ) -> Result<PostPage, RepoError> {
        let request = PageRequest::new(page, page_size);
        let filter = search_filter(search);

        let (total_count, items) = ctx
            .run(async {
                let total = self
                    .collection
                    .count_documents(filter.clone(), None)
                    .await
                    .map_err(map_mongo_error)?;
                let items = self.find_posts(filter, Some(page_options(request))).await?;
                Ok((total, items))
            })
            .await?;

        Ok(PostPage::new(items, total_count, request))
    }
}
