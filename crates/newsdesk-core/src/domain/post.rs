use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{InvalidPostId, ValidationError};

/// Minimum title length, in characters.
pub const TITLE_MIN_LEN: usize = 3;
/// Maximum title length, in characters.
pub const TITLE_MAX_LEN: usize = 200;
/// Minimum content length, in characters.
pub const CONTENT_MIN_LEN: usize = 10;

/// Opaque post identifier.
///
/// Rendered externally as a hyphenated UUID string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(Uuid);

impl PostId {
    /// Allocate a fresh, never-reused identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for PostId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for PostId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for PostId {
    type Err = InvalidPostId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| InvalidPostId(s.to_string()))
    }
}

/// Post entity - a short text item with a title and a body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post, validating title and content first.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let title = title.into();
        let content = content.into();
        validate_post_data(&title, &content)?;

        let now = now();
        Ok(Self {
            id: PostId::new(),
            title,
            content,
            created_at: now,
            updated_at: now,
        })
    }

    /// Replace title and content together.
    ///
    /// On error the post is left exactly as it was.
    pub fn update(
        &mut self,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<(), ValidationError> {
        let title = title.into();
        let content = content.into();
        validate_post_data(&title, &content)?;

        self.title = title;
        self.content = content;
        self.touch();
        Ok(())
    }

    /// Re-check the stored title and content.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_post_data(&self.title, &self.content)
    }

    /// Refresh `updated_at`. The new value is always strictly greater than the old one.
    pub fn touch(&mut self) {
        self.updated_at = next_timestamp(self.updated_at);
    }
}

/// Title is checked before content, so an invalid title wins when both are bad.
fn validate_post_data(title: &str, content: &str) -> Result<(), ValidationError> {
    let title_len = title.chars().count();
    if !(TITLE_MIN_LEN..=TITLE_MAX_LEN).contains(&title_len) {
        return Err(ValidationError::InvalidTitle);
    }
    if content.chars().count() < CONTENT_MIN_LEN {
        return Err(ValidationError::InvalidContent);
    }
    Ok(())
}

/// Current time at millisecond precision, which is what the document store keeps.
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

fn next_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = now();
    if now > previous {
        now
    } else {
        previous + Duration::milliseconds(1)
    }
}
