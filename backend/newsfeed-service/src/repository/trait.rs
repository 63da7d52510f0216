use crate::domain::{AccountId, ContentEntry, FollowEdge};
use crate::error::RepositoryError;

pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;

/// Read access to the persisted follow relation, keyed by follower.
/// Implementations may return duplicate edges; callers deduplicate.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait FollowGraphRepository: Send + Sync {
    async fn edges_from(&self, follower_id: AccountId) -> RepositoryResult<Vec<FollowEdge>>;

    /// Health check (optional)
    async fn health_check(&self) -> RepositoryResult<()> {
        Ok(())
    }
}

/// Read access to the persisted content relation.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ContentRepository: Send + Sync {
    /// The `k` newest entries owned by any of `owner_ids`, ordered by
    /// `created_at` descending. Entries sharing a timestamp come back in a
    /// fixed order for a fixed data set.
    async fn top_k_by_owners(
        &self,
        owner_ids: &[AccountId],
        k: i64,
    ) -> RepositoryResult<Vec<ContentEntry>>;

    /// Health check (optional)
    async fn health_check(&self) -> RepositoryResult<()> {
        Ok(())
    }
}
