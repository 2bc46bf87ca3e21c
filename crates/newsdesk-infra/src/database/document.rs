//! Post document layout for the `posts` collection.

use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};

use newsdesk_core::RepoError;
use newsdesk_core::domain::{Post, PostId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

/// Conversion from Domain Post to a stored document.
impl From<&Post> for PostDocument {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id.to_string(),
            title: post.title.clone(),
            content: post.content.clone(),
            created_at: DateTime::from_chrono(post.created_at),
            updated_at: DateTime::from_chrono(post.updated_at),
        }
    }
}

/// Conversion from a stored document to Domain Post.
impl TryFrom<PostDocument> for Post {
    type Error = RepoError;

    fn try_from(doc: PostDocument) -> Result<Self, Self::Error> {
        let id: PostId = doc
            .id
            .parse()
            .map_err(|_| RepoError::Query(format!("stored post has malformed _id {:?}", doc.id)))?;

        Ok(Self {
            id,
            title: doc.title,
            content: doc.content,
            created_at: doc.created_at.to_chrono(),
            updated_at: doc.updated_at.to_chrono(),
        })
    }
}
