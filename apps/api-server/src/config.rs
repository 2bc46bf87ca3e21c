//! Application configuration loaded from environment variables.

use std::env;
use std::time::Duration;

use newsdesk_infra::DatabaseConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// `None` when `MONGO_URI` is unset; posts are then kept in memory.
    pub database: Option<DatabaseConfig>,
    /// Deadline applied to every request's storage calls.
    pub request_timeout: Duration,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("MONGO_URI").ok().map(|uri| {
            let defaults = DatabaseConfig::default();
            DatabaseConfig {
                uri,
                database: env::var("MONGO_DATABASE").unwrap_or(defaults.database),
                connect_timeout: secs_from_env("MONGO_TIMEOUT_SECS")
                    .unwrap_or(defaults.connect_timeout),
            }
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database,
            request_timeout: secs_from_env("REQUEST_TIMEOUT_SECS")
                .unwrap_or(Duration::from_secs(10)),
        }
    }
}

fn secs_from_env(key: &str) -> Option<Duration> {
    env::var(key)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
}
