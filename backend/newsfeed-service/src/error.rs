//! Error types for newsfeed-service
//!
//! `FeedError` covers whole-call failures of the aggregation engine,
//! `ResolutionError` covers a single entry's storage locator and never fails a
//! call on its own. `AppError` maps engine failures onto HTTP responses.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Result type for engine operations
pub type EngineResult<T> = std::result::Result<T, FeedError>;

/// Result type for HTTP handlers
pub type Result<T> = std::result::Result<T, AppError>;

/// Which backing store a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreKind {
    FollowGraph,
    ContentStore,
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreKind::FollowGraph => write!(f, "follow graph"),
            StoreKind::ContentStore => write!(f, "content store"),
        }
    }
}

/// Failure reported by a repository implementation.
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Backend unavailable: {0}")]
    Unavailable(String),
}

/// Whole-call failures of the feed engine.
#[derive(Error, Debug)]
pub enum FeedError {
    /// Caller-supplied identifier or limit is out of domain.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The follow graph or content store could not be read for this call.
    #[error("{store} unavailable: {source}")]
    StoreUnavailable {
        store: StoreKind,
        #[source]
        source: RepositoryError,
    },
}

impl FeedError {
    pub fn store(store: StoreKind) -> impl FnOnce(RepositoryError) -> Self {
        move |source| FeedError::StoreUnavailable { store, source }
    }

    /// Whether the serving layer may retry the same request.
    pub fn is_retryable(&self) -> bool {
        matches!(self, FeedError::StoreUnavailable { .. })
    }
}

/// Why a storage locator could not be turned into a readable resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionErrorKind {
    /// Locator is syntactically invalid; points at bad data in the content store.
    MalformedLocator,
    /// Object is missing or unreadable, or the backend is unreachable.
    Unavailable,
}

impl ResolutionErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionErrorKind::MalformedLocator => "malformed_locator",
            ResolutionErrorKind::Unavailable => "unavailable",
        }
    }
}

impl fmt::Display for ResolutionErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} ({locator}): {detail}")]
pub struct ResolutionError {
    pub kind: ResolutionErrorKind,
    pub locator: String,
    pub detail: String,
}

impl ResolutionError {
    pub fn malformed(locator: &str, detail: impl Into<String>) -> Self {
        Self {
            kind: ResolutionErrorKind::MalformedLocator,
            locator: locator.to_string(),
            detail: detail.into(),
        }
    }

    pub fn unavailable(locator: &str, detail: impl Into<String>) -> Self {
        Self {
            kind: ResolutionErrorKind::Unavailable,
            locator: locator.to_string(),
            detail: detail.into(),
        }
    }
}

/// HTTP-facing error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Service temporarily unavailable: {0}")]
    Unavailable(String),
}

impl From<FeedError> for AppError {
    fn from(err: FeedError) -> Self {
        match err {
            FeedError::InvalidArgument(msg) => AppError::InvalidArgument(msg),
            err @ FeedError::StoreUnavailable { .. } => AppError::Unavailable(err.to_string()),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            AppError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let mut builder = HttpResponse::build(status);
        if matches!(self, AppError::Unavailable(_)) {
            builder.insert_header(("Retry-After", "1"));
        }

        builder.json(serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
            "timestamp": chrono::Utc::now().timestamp_millis(),
        }))
    }
}
