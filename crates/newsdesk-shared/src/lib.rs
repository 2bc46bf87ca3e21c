//! # Newsdesk Shared
//!
//! Wire types for the JSON API: request bodies, post representations and
//! RFC 7807 error bodies.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;
