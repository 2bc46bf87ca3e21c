//! # Newsdesk Core
//!
//! The domain layer of Newsdesk: the post entity and its invariants, the
//! repository port, and the service that ties them together.
//! This crate has no storage or transport dependencies.

pub mod context;
pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use context::RequestContext;
pub use error::{ErrorKind, RepoError, ServiceError, ValidationError};
pub use services::PostService;
