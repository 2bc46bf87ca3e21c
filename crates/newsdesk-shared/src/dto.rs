//! Data Transfer Objects - request/response types for the API.

use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};

use newsdesk_core::domain::{Post, PostPage};

/// Request to create a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// Request to replace a post's title and content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// Query string for post listings. Missing values fall back to the service defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListPostsQuery {
    #[serde(default)]
    pub page: i64,
    #[serde(default)]
    pub page_size: i64,
    #[serde(default)]
    pub search: String,
}

/// Query string for the recent-posts listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecentPostsQuery {
    #[serde(default)]
    pub limit: i64,
}

/// A post as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: String,
    pub title: String,
    pub content: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id.to_string(),
            title: post.title,
            content: post.content,
            created_at: post.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            updated_at: post.updated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// One page of posts plus the numbers a pager needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostPageResponse {
    pub items: Vec<PostResponse>,
    pub total_count: u64,
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl From<PostPage> for PostPageResponse {
    fn from(page: PostPage) -> Self {
        let total_pages = page.total_pages();
        let has_next = page.has_next();
        let has_previous = page.has_previous();

        Self {
            items: page.items.into_iter().map(PostResponse::from).collect(),
            total_count: page.total_count,
            page: page.page,
            page_size: page.page_size,
            total_pages,
            has_next,
            has_previous,
        }
    }
}

#[cfg(test)]
mod tests {
    use newsdesk_core::domain::PageRequest;

    use super::*;

    #[test]
    fn test_post_response_timestamps() {
        let post = Post::new("Test Title", "Test content with more than 10 characters").unwrap();
        let id = post.id.to_string();
        let response = PostResponse::from(post);

        assert_eq!(response.id, id);
        assert!(response.created_at.ends_with('Z'));
        assert_eq!(response.created_at, response.updated_at);
    }

    #[test]
    fn test_page_response_pager_fields() {
        let page = PostPage::new(Vec::new(), 15, PageRequest::new(1, 10));
        let response = PostPageResponse::from(page);

        assert_eq!(response.total_pages, 2);
        assert!(response.has_next);
        assert!(!response.has_previous);
    }

    #[test]
    fn test_list_query_defaults() {
        let query: ListPostsQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.page, 0);
        assert_eq!(query.page_size, 0);
        assert!(query.search.is_empty());
    }
}
