use std::time::Duration;

#[cfg(feature = "mongo")]
use mongodb::{Client, Database, bson::doc, options::ClientOptions};

#[cfg(feature = "mongo")]
use newsdesk_core::RepoError;

/// Name of the collection holding one document per post.
pub const POSTS_COLLECTION: &str = "posts";

/// Configuration for the document store.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub uri: String,
    pub database: String,
    /// Bound on connecting and on the initial ping.
    pub connect_timeout: Duration,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            uri: "mongodb://localhost:27017".to_string(),
            database: "newsapp".to_string(),
            connect_timeout: Duration::from_secs(5),
        }
    }
}

/// Document store connection, created once at startup and shared.
///
/// # Example
/// ```ignore
/// let db = DatabaseConnections::init(&config).await?;
/// let repo = MongoPostRepository::new(&db.main);
/// // ... serve requests ...
/// db.shutdown().await;
/// ```
#[cfg(feature = "mongo")]
#[derive(Clone)]
pub struct DatabaseConnections {
    pub client: Client,
    /// Database holding the posts collection.
    pub main: Database,
}

#[cfg(feature = "mongo")]
impl DatabaseConnections {
    /// Connect and ping, giving up after `connect_timeout`.
    pub async fn init(config: &DatabaseConfig) -> Result<Self, RepoError> {
        tracing::info!(database = %config.database, "Connecting to document store...");

        let mut options = ClientOptions::parse(&config.uri)
            .await
            .map_err(|e| RepoError::Connection(e.to_string()))?;
        options.connect_timeout = Some(config.connect_timeout);
        options.server_selection_timeout = Some(config.connect_timeout);
        options.app_name = Some("newsdesk".to_string());

        let client =
            Client::with_options(options).map_err(|e| RepoError::Connection(e.to_string()))?;
        let main = client.database(&config.database);

        // Use timeout to prevent hanging if the server is unreachable
        tokio::time::timeout(
            config.connect_timeout,
            main.run_command(doc! { "ping": 1 }, None),
        )
        .await
        .map_err(|_| RepoError::Connection("Connection timed out".to_string()))?
        .map_err(|e| RepoError::Connection(e.to_string()))?;

        tracing::info!(database = %config.database, "Document store connected");
        Ok(Self { client, main })
    }

    /// Close the client and wait for in-flight operations to finish.
    pub async fn shutdown(self) {
        self.client.shutdown().await;
        tracing::info!("Document store connection closed");
    }
}
