use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::warn;

use crate::domain::{AccountId, ContentEntry, FeedLimit};
use crate::error::{EngineResult, FeedError, StoreKind};
use crate::repository::ContentRepository;

/// Bounded top-K read across a set of owners.
#[derive(Clone)]
pub struct ContentStoreReader {
    repo: Arc<dyn ContentRepository>,
}

impl ContentStoreReader {
    pub fn new(repo: Arc<dyn ContentRepository>) -> Self {
        Self { repo }
    }

    /// The `limit` newest entries owned by any of `owners`, newest first.
    ///
    /// `owners` is treated as a set: repeating an id does not change the
    /// result. No owners means no content, and the store is not queried.
    pub async fn recent_content<I>(&self, owners: I, limit: FeedLimit) -> EngineResult<Vec<ContentEntry>>
    where
        I: IntoIterator<Item = AccountId>,
    {
        let owners: BTreeSet<AccountId> = owners.into_iter().collect();
        if owners.is_empty() {
            return Ok(Vec::new());
        }

        let owner_ids: Vec<AccountId> = owners.iter().copied().collect();
        let fetched = self
            .repo
            .top_k_by_owners(&owner_ids, limit.get())
            .await
            .map_err(FeedError::store(StoreKind::ContentStore))?;

        let fetched_count = fetched.len();
        let mut entries: Vec<ContentEntry> = fetched
            .into_iter()
            .filter(|entry| owners.contains(&entry.owner_id))
            .collect();

        if entries.len() != fetched_count {
            warn!(
                dropped = fetched_count - entries.len(),
                "Content store returned entries outside the requested owners"
            );
        }

        // Stable: entries sharing a timestamp keep the store's order.
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        entries.truncate(limit.as_usize());
        Ok(entries)
    }

    pub async fn health_check(&self) -> EngineResult<()> {
        self.repo
            .health_check()
            .await
            .map_err(FeedError::store(StoreKind::ContentStore))
    }
}
