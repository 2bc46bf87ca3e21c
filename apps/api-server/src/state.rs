//! Application state - shared across all handlers.

use std::sync::Arc;
use std::time::Duration;

use newsdesk_core::ports::PostRepository;
use newsdesk_core::{PostService, RequestContext};
use newsdesk_infra::{DatabaseConfig, InMemoryPostRepository};

#[cfg(feature = "mongo")]
use newsdesk_infra::{DatabaseConnections, MongoPostRepository};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    /// Which store backs the posts, reported by the health check.
    pub storage: &'static str,
    pub request_timeout: Duration,
    #[cfg(feature = "mongo")]
    pub db: Option<DatabaseConnections>,
}

impl AppState {
    /// Build the application state, connecting to the document store when configured.
    pub async fn new(db_config: Option<&DatabaseConfig>, request_timeout: Duration) -> Self {
        #[cfg(feature = "mongo")]
        {
            if let Some(config) = db_config {
                match DatabaseConnections::init(config).await {
                    Ok(connections) => {
                        let repo = MongoPostRepository::new(&connections.main);
                        if let Err(e) = repo.ensure_indexes().await {
                            tracing::warn!("Failed to ensure post indexes: {}", e);
                        }

                        tracing::info!("Application state initialized (mongo)");
                        return Self {
                            posts: PostService::new(Arc::new(repo)),
                            storage: "mongo",
                            request_timeout,
                            db: Some(connections),
                        };
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to document store: {}. Using in-memory fallback.",
                            e
                        );
                    }
                }
            } else {
                tracing::warn!("MONGO_URI not set. Running without database (in-memory mode).");
            }
        }

        #[cfg(not(feature = "mongo"))]
        if db_config.is_some() {
            tracing::warn!("Built without the mongo feature - ignoring MONGO_URI");
        }

        Self::in_memory(request_timeout)
    }

    /// State backed by the in-memory repository.
    pub fn in_memory(request_timeout: Duration) -> Self {
        let repo: Arc<dyn PostRepository> = Arc::new(InMemoryPostRepository::new());
        Self {
            posts: PostService::new(repo),
            storage: "memory",
            request_timeout,
            #[cfg(feature = "mongo")]
            db: None,
        }
    }

    /// A fresh deadline for one request's storage calls.
    pub fn request_context(&self) -> RequestContext {
        RequestContext::with_timeout(self.request_timeout)
    }
}
