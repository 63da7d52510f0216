use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::debug;

use crate::domain::AccountId;
use crate::error::{EngineResult, FeedError, StoreKind};
use crate::repository::FollowGraphRepository;

/// Resolves the set of accounts a follower observes.
#[derive(Clone)]
pub struct FollowGraphReader {
    repo: Arc<dyn FollowGraphRepository>,
}

impl FollowGraphReader {
    pub fn new(repo: Arc<dyn FollowGraphRepository>) -> Self {
        Self { repo }
    }

    /// Accounts followed by `follower`. Duplicate edges collapse; an empty
    /// set is a normal answer for an account that follows nobody.
    pub async fn followed_accounts(&self, follower: AccountId) -> EngineResult<BTreeSet<AccountId>> {
        let edges = self
            .repo
            .edges_from(follower)
            .await
            .map_err(FeedError::store(StoreKind::FollowGraph))?;

        let edge_count = edges.len();
        let followed: BTreeSet<AccountId> = edges
            .into_iter()
            .filter(|edge| edge.follower_id == follower)
            .map(|edge| edge.followed_id)
            .collect();

        if followed.len() != edge_count {
            debug!(
                follower = %follower,
                edges = edge_count,
                distinct = followed.len(),
                "Collapsed duplicate follow edges"
            );
        }

        Ok(followed)
    }

    pub async fn health_check(&self) -> EngineResult<()> {
        self.repo
            .health_check()
            .await
            .map_err(FeedError::store(StoreKind::FollowGraph))
    }
}
