use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::FeedError;

/// Limit applied when the caller does not ask for one.
pub const DEFAULT_FEED_LIMIT: i64 = 100;

/// Non-negative account identifier issued by the account directory.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(transparent)]
#[serde(transparent)]
pub struct AccountId(i64);

impl AccountId {
    /// Validate a caller-supplied identifier.
    pub fn new(raw: i64) -> Result<Self, FeedError> {
        if raw < 0 {
            return Err(FeedError::InvalidArgument(format!(
                "account id must be non-negative, got {}",
                raw
            )));
        }
        Ok(Self(raw))
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Upper bound on the number of items in one feed page. Always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct FeedLimit(i64);

impl FeedLimit {
    pub fn new(raw: i64) -> Result<Self, FeedError> {
        if raw < 1 {
            return Err(FeedError::InvalidArgument(format!(
                "limit must be at least 1, got {}",
                raw
            )));
        }
        Ok(Self(raw))
    }

    pub fn get(self) -> i64 {
        self.0
    }

    pub fn as_usize(self) -> usize {
        usize::try_from(self.0).unwrap_or(usize::MAX)
    }
}

impl Default for FeedLimit {
    fn default() -> Self {
        Self(DEFAULT_FEED_LIMIT)
    }
}

/// Directed follow relation: `follower` observes `followed`'s content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::FromRow)]
pub struct FollowEdge {
    pub follower_id: AccountId,
    pub followed_id: AccountId,
}

impl FollowEdge {
    pub fn new(follower_id: AccountId, followed_id: AccountId) -> Self {
        Self {
            follower_id,
            followed_id,
        }
    }
}

/// Location context recorded at upload time. Passed through untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct GeoContext {
    pub user_latitude: i32,
    pub user_longitude: i32,
    pub photo_latitude: i32,
    pub photo_longitude: i32,
}

/// One posted item as committed by content ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ContentEntry {
    pub id: i64,
    pub owner_id: AccountId,
    pub storage_locator: String,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub geo: GeoContext,
    pub created_at: DateTime<Utc>,
}
