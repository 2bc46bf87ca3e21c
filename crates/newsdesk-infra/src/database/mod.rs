//! Post storage: the document store and an in-memory fallback.

mod connections;
mod memory;

#[cfg(feature = "mongo")]
mod document;
#[cfg(feature = "mongo")]
pub mod mongo_repo;

pub use connections::{DatabaseConfig, POSTS_COLLECTION};
pub use memory::InMemoryPostRepository;

#[cfg(feature = "mongo")]
pub use connections::DatabaseConnections;
#[cfg(feature = "mongo")]
pub use document::PostDocument;
#[cfg(feature = "mongo")]
pub use mongo_repo::MongoPostRepository;
