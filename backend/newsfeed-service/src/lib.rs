/// Newsfeed Service Library
///
/// Builds a follower's news feed on read: the accounts they follow, the
/// newest photos those accounts posted, and a resolved storage resource for
/// each photo.
///
/// # Modules
///
/// - `domain`: Identifiers, content entries, resource handles, feed results
/// - `repository`: Follow graph and content store access (PostgreSQL)
/// - `services`: Feed aggregation, store readers, locator resolution
/// - `handlers`: HTTP request handlers
/// - `models`: HTTP response bodies
/// - `error`: Error types and handling
/// - `config`: Configuration management
/// - `metrics`: Observability and metrics collection
pub mod config;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod repository;
pub mod services;

pub use config::Config;
pub use domain::{FeedItem, FeedResult};
pub use error::{AppError, EngineResult, FeedError, Result};
pub use services::{FeedAggregator, ResourceResolver};
