//! Domain, repository and service error types.

use thiserror::Error;

/// Post data that violates the entity invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("title must be between 3 and 200 characters")]
    InvalidTitle,

    #[error("content must be at least 10 characters")]
    InvalidContent,
}

/// An identifier that is not in the format the store expects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid post id: {0:?}")]
pub struct InvalidPostId(pub String);

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("invalid post: {0}")]
    Validation(#[from] ValidationError),

    #[error("Entity not found")]
    NotFound,

    #[error("Invalid id format: {0}")]
    InvalidId(String),

    #[error("Entity already exists: {0}")]
    Duplicate(String),

    #[error("Operation timed out")]
    Timeout,

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),
}

impl From<InvalidPostId> for RepoError {
    fn from(err: InvalidPostId) -> Self {
        RepoError::InvalidId(err.0)
    }
}

/// Stable, API-facing error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    InvalidId,
    Duplicate,
    /// Store unreachable, timed out, cancelled or otherwise faulty.
    Storage,
}

impl RepoError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RepoError::Validation(_) => ErrorKind::Validation,
            RepoError::NotFound => ErrorKind::NotFound,
            RepoError::InvalidId(_) => ErrorKind::InvalidId,
            RepoError::Duplicate(_) => ErrorKind::Duplicate,
            RepoError::Timeout
            | RepoError::Cancelled
            | RepoError::Connection(_)
            | RepoError::Query(_) => ErrorKind::Storage,
        }
    }
}

/// Service errors: the underlying failure plus what the service was doing.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{context}: {source}")]
    Validation {
        context: &'static str,
        #[source]
        source: ValidationError,
    },

    #[error("{context}: {source}")]
    Repository {
        context: &'static str,
        #[source]
        source: RepoError,
    },
}

impl ServiceError {
    pub(crate) fn validation(context: &'static str, source: ValidationError) -> Self {
        ServiceError::Validation { context, source }
    }

    pub(crate) fn repository(context: &'static str, source: RepoError) -> Self {
        ServiceError::Repository { context, source }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::Validation { .. } => ErrorKind::Validation,
            ServiceError::Repository { source, .. } => source.kind(),
        }
    }

    /// The validation failure, whichever layer reported it.
    pub fn validation_error(&self) -> Option<ValidationError> {
        match self {
            ServiceError::Validation { source, .. }
            | ServiceError::Repository {
                source: RepoError::Validation(source),
                ..
            } => Some(*source),
            ServiceError::Repository { .. } => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            ServiceError::Repository {
                source: RepoError::Timeout | RepoError::Cancelled,
                ..
            }
        )
    }
}
