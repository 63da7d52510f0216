//! Configuration management for Newsfeed Service
//!
//! Loads configuration from environment variables.

use anyhow::{bail, Context, Result};
use db_pool::env_utils::{parse_with, require_with};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::domain::DEFAULT_FEED_LIMIT;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Feed aggregation settings
    pub feed: FeedConfig,
    /// Media storage settings
    pub storage: StorageConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development, staging, production)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// HTTP port
    pub port: u16,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL
    #[serde(skip_serializing)]
    pub url: String,
    /// Max connections in pool
    pub max_connections: u32,
    /// Min connections in pool
    pub min_connections: u32,
    /// Seconds to wait for a pooled connection
    pub acquire_timeout_secs: u64,
    /// Apply bundled migrations on startup
    pub run_migrations: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Page size when the request does not name one
    pub default_limit: i64,
    /// Requests asking for more are clamped to this
    pub max_limit: i64,
    /// Storage probes in flight per feed request
    pub resolve_concurrency: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_FEED_LIMIT,
            max_limit: DEFAULT_FEED_LIMIT,
            resolve_concurrency: 16,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Base directory for relative storage locators
    pub media_root: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let app = AppConfig {
            env: lookup("APP_ENV").unwrap_or_else(|| "development".to_string()),
            host: lookup("APP_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_with(&lookup, "APP_PORT", 8080)?,
        };

        let database = DatabaseConfig {
            url: require_with(&lookup, "DATABASE_URL")?,
            max_connections: parse_with(&lookup, "DB_MAX_CONNECTIONS", 10)?,
            min_connections: parse_with(&lookup, "DB_MIN_CONNECTIONS", 2)?,
            acquire_timeout_secs: parse_with(&lookup, "DB_ACQUIRE_TIMEOUT_SECS", 5)?,
            run_migrations: parse_with(&lookup, "DB_RUN_MIGRATIONS", true)?,
        };

        let defaults = FeedConfig::default();
        let feed = FeedConfig {
            default_limit: parse_with(&lookup, "FEED_DEFAULT_LIMIT", defaults.default_limit)?,
            max_limit: parse_with(&lookup, "FEED_MAX_LIMIT", defaults.max_limit)?,
            resolve_concurrency: parse_with(
                &lookup,
                "FEED_RESOLVE_CONCURRENCY",
                defaults.resolve_concurrency,
            )?,
        };
        feed.validate().context("Invalid feed configuration")?;

        let storage = StorageConfig {
            media_root: lookup("MEDIA_ROOT")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
        };

        Ok(Config {
            app,
            database,
            feed,
            storage,
        })
    }
}

impl FeedConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_limit < 1 {
            bail!("FEED_MAX_LIMIT must be at least 1, got {}", self.max_limit);
        }
        if self.default_limit < 1 || self.default_limit > self.max_limit {
            bail!(
                "FEED_DEFAULT_LIMIT must be between 1 and {}, got {}",
                self.max_limit,
                self.default_limit
            );
        }
        if self.resolve_concurrency == 0 {
            bail!("FEED_RESOLVE_CONCURRENCY must be at least 1");
        }
        Ok(())
    }
}
