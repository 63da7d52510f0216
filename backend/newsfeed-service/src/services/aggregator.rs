//! Fan-out-on-read feed aggregation
//!
//! One call walks: validate -> follow set -> bounded top-K content ->
//! per-entry resource resolution. Nothing is cached between calls and no
//! shared state is mutated, so concurrent calls need no coordination.
//!
//! The top-K bound is global across all followed accounts. A prolific account
//! can fill the whole page; per-owner fairness is not attempted.

use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

use super::content_store::ContentStoreReader;
use super::follow_graph::FollowGraphReader;
use super::resolver::ResourceResolver;
use crate::domain::{
    AccountId, ContentEntry, EmptyReason, FeedItem, FeedLimit, FeedResult, ResourceOutcome,
    DEFAULT_FEED_LIMIT,
};
use crate::error::{EngineResult, FeedError, ResolutionError};
use crate::metrics::feed::{record_request, FEED_ITEMS_RETURNED, FEED_RESOLUTION_FAILURES};
use crate::repository::{ContentRepository, FollowGraphRepository};

const DEFAULT_RESOLVE_CONCURRENCY: usize = 16;

#[derive(Clone)]
pub struct FeedAggregator {
    follow_graph: FollowGraphReader,
    content_store: ContentStoreReader,
    resolver: ResourceResolver,
    resolve_concurrency: usize,
}

impl FeedAggregator {
    pub fn new(
        follow_repo: Arc<dyn FollowGraphRepository>,
        content_repo: Arc<dyn ContentRepository>,
        resolver: ResourceResolver,
    ) -> Self {
        Self {
            follow_graph: FollowGraphReader::new(follow_repo),
            content_store: ContentStoreReader::new(content_repo),
            resolver,
            resolve_concurrency: DEFAULT_RESOLVE_CONCURRENCY,
        }
    }

    /// Upper bound on storage probes in flight for a single call.
    pub fn with_resolve_concurrency(mut self, concurrency: usize) -> Self {
        self.resolve_concurrency = concurrency.max(1);
        self
    }

    /// Feed with the default page size of 100.
    pub async fn default_feed_for(&self, follower: i64) -> EngineResult<FeedResult> {
        self.feed_for(follower, DEFAULT_FEED_LIMIT).await
    }

    /// Recency-ordered feed of content from the accounts `follower` follows.
    ///
    /// Arguments are validated before any store is touched. Store failures
    /// fail the call; a bad storage locator only marks its own entry.
    #[tracing::instrument(skip(self), fields(items = tracing::field::Empty))]
    pub async fn feed_for(&self, follower: i64, limit: i64) -> EngineResult<FeedResult> {
        let started = Instant::now();
        let result = self.aggregate(follower, limit).await;

        let outcome = match &result {
            Ok(FeedResult::Empty { .. }) => "empty",
            Ok(FeedResult::Items(items)) => {
                tracing::Span::current().record("items", items.len());
                FEED_ITEMS_RETURNED.observe(items.len() as f64);
                "items"
            }
            Err(FeedError::InvalidArgument(_)) => "invalid_argument",
            Err(err @ FeedError::StoreUnavailable { .. }) => {
                error!(follower, error = %err, "Feed aggregation failed");
                "store_unavailable"
            }
        };
        record_request(outcome, started.elapsed().as_secs_f64());

        result
    }

    /// Both stores answer their health probes.
    pub async fn health_check(&self) -> EngineResult<()> {
        self.follow_graph.health_check().await?;
        self.content_store.health_check().await
    }

    async fn aggregate(&self, follower: i64, limit: i64) -> EngineResult<FeedResult> {
        let follower = AccountId::new(follower)?;
        let limit = FeedLimit::new(limit)?;

        let followed = self.follow_graph.followed_accounts(follower).await?;
        if followed.is_empty() {
            debug!(follower = %follower, "Follower has no followed accounts");
            return Ok(FeedResult::Empty {
                reason: EmptyReason::NoFollowedAccounts,
            });
        }

        let followed_count = followed.len();
        let entries = self.content_store.recent_content(followed, limit).await?;
        if entries.is_empty() {
            debug!(
                follower = %follower,
                followed = followed_count,
                "Followed accounts have no content"
            );
            return Ok(FeedResult::Empty {
                reason: EmptyReason::NoRecentContent,
            });
        }

        let items = self.resolve_all(entries, limit).await;
        let failures = items.iter().filter(|i| !i.resource.is_found()).count();

        info!(
            follower = %follower,
            followed = followed_count,
            items = items.len(),
            failures,
            "Feed aggregated"
        );

        Ok(FeedResult::Items(items))
    }

    /// Resolve every entry concurrently. `buffered` yields results in input
    /// order, so the newest-first order from the content store is kept.
    async fn resolve_all(&self, mut entries: Vec<ContentEntry>, limit: FeedLimit) -> Vec<FeedItem> {
        entries.truncate(limit.as_usize());

        stream::iter(entries)
            .map(|entry| self.resolve_entry(entry))
            .buffered(self.resolve_concurrency)
            .collect()
            .await
    }

    async fn resolve_entry(&self, entry: ContentEntry) -> FeedItem {
        let resource = match self.resolver.resolve(&entry.storage_locator) {
            Ok(handle) => {
                let probed = handle.probe().await;
                match probed {
                    Err(err) => Self::failed(&entry, err),
                    Ok(status) if !status.exists => Self::failed(
                        &entry,
                        ResolutionError::unavailable(handle.locator(), "object not found"),
                    ),
                    Ok(status) if !status.readable => Self::failed(
                        &entry,
                        ResolutionError::unavailable(handle.locator(), "object is not readable"),
                    ),
                    Ok(status) => ResourceOutcome::Found { handle, status },
                }
            }
            Err(err) => Self::failed(&entry, err),
        };

        FeedItem { entry, resource }
    }

    fn failed(entry: &ContentEntry, err: ResolutionError) -> ResourceOutcome {
        FEED_RESOLUTION_FAILURES
            .with_label_values(&[err.kind.as_str()])
            .inc();
        warn!(
            content_id = entry.id,
            owner = %entry.owner_id,
            kind = %err.kind,
            error = %err,
            "Feed entry could not be resolved"
        );
        ResourceOutcome::Failed(err)
    }
}
