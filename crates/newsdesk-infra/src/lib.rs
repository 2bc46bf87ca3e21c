//! # Newsdesk Infrastructure
//!
//! Concrete implementations of the ports defined in `newsdesk-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `mongo` - MongoDB document store support

pub mod database;

// Re-exports - In-Memory
pub use database::{DatabaseConfig, InMemoryPostRepository};

// Re-exports - MongoDB
#[cfg(feature = "mongo")]
pub use database::{DatabaseConnections, MongoPostRepository};
