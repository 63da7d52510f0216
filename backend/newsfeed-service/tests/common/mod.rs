#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

use newsfeed_service::domain::{AccountId, ContentEntry, FollowEdge, GeoContext};
use newsfeed_service::error::RepositoryError;
use newsfeed_service::repository::{ContentRepository, FollowGraphRepository, RepositoryResult};
use newsfeed_service::services::{FeedAggregator, ResourceResolver};

pub fn id(raw: i64) -> AccountId {
    AccountId::new(raw).expect("non-negative account id")
}

pub fn at(ts: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(ts, 0).single().expect("valid timestamp")
}

/// Follow relation kept as a plain list, so duplicate edges survive.
#[derive(Default)]
pub struct InMemoryFollowGraph {
    edges: Vec<FollowEdge>,
}

impl InMemoryFollowGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn follow(mut self, follower: i64, followed: i64) -> Self {
        self.edges.push(FollowEdge::new(id(follower), id(followed)));
        self
    }
}

#[async_trait::async_trait]
impl FollowGraphRepository for InMemoryFollowGraph {
    async fn edges_from(&self, follower_id: AccountId) -> RepositoryResult<Vec<FollowEdge>> {
        Ok(self
            .edges
            .iter()
            .filter(|edge| edge.follower_id == follower_id)
            .copied()
            .collect())
    }
}

/// Photo table in memory. Ids follow insertion order.
#[derive(Default)]
pub struct InMemoryContentStore {
    entries: Vec<ContentEntry>,
    queries: Arc<Mutex<Vec<(Vec<AccountId>, i64)>>>,
}

impl InMemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn post(mut self, owner: i64, ts: i64, locator: impl Into<String>) -> Self {
        let next_id = self.entries.len() as i64 + 1;
        self.entries.push(ContentEntry {
            id: next_id,
            owner_id: id(owner),
            storage_locator: locator.into(),
            geo: GeoContext::default(),
            created_at: at(ts),
        });
        self
    }

    /// Owner sets and limits this store was queried with.
    pub fn query_log(&self) -> Arc<Mutex<Vec<(Vec<AccountId>, i64)>>> {
        Arc::clone(&self.queries)
    }
}

#[async_trait::async_trait]
impl ContentRepository for InMemoryContentStore {
    async fn top_k_by_owners(
        &self,
        owner_ids: &[AccountId],
        k: i64,
    ) -> RepositoryResult<Vec<ContentEntry>> {
        self.queries
            .lock()
            .map_err(|_| RepositoryError::Unavailable("query log poisoned".into()))?
            .push((owner_ids.to_vec(), k));

        let mut matching: Vec<ContentEntry> = self
            .entries
            .iter()
            .filter(|entry| owner_ids.contains(&entry.owner_id))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        matching.truncate(k.max(0) as usize);
        Ok(matching)
    }
}

/// Wraps a content store so its first query never completes. Dropping the
/// stalled query raises `abandoned`; later queries go straight through.
pub struct StallingContentStore {
    inner: InMemoryContentStore,
    stall_next: AtomicBool,
    abandoned: Arc<AtomicBool>,
}

struct RaiseOnDrop(Arc<AtomicBool>);

impl Drop for RaiseOnDrop {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

impl StallingContentStore {
    pub fn new(inner: InMemoryContentStore) -> Self {
        Self {
            inner,
            stall_next: AtomicBool::new(true),
            abandoned: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn abandoned(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.abandoned)
    }
}

#[async_trait::async_trait]
impl ContentRepository for StallingContentStore {
    async fn top_k_by_owners(
        &self,
        owner_ids: &[AccountId],
        k: i64,
    ) -> RepositoryResult<Vec<ContentEntry>> {
        if self.stall_next.swap(false, Ordering::SeqCst) {
            let _guard = RaiseOnDrop(Arc::clone(&self.abandoned));
            std::future::pending::<()>().await;
        }
        self.inner.top_k_by_owners(owner_ids, k).await
    }
}

/// A store whose backend is down.
pub struct UnavailableStore;

#[async_trait::async_trait]
impl FollowGraphRepository for UnavailableStore {
    async fn edges_from(&self, _follower_id: AccountId) -> RepositoryResult<Vec<FollowEdge>> {
        Err(RepositoryError::Unavailable("connection refused".into()))
    }

    async fn health_check(&self) -> RepositoryResult<()> {
        Err(RepositoryError::Unavailable("connection refused".into()))
    }
}

#[async_trait::async_trait]
impl ContentRepository for UnavailableStore {
    async fn top_k_by_owners(
        &self,
        _owner_ids: &[AccountId],
        _k: i64,
    ) -> RepositoryResult<Vec<ContentEntry>> {
        Err(RepositoryError::Unavailable("connection refused".into()))
    }

    async fn health_check(&self) -> RepositoryResult<()> {
        Err(RepositoryError::Unavailable("connection refused".into()))
    }
}

/// Write a small file under `dir` and return its absolute path as a locator.
pub fn media_file(dir: &Path, name: &str) -> String {
    let path = dir.join(name);
    std::fs::write(&path, b"jpeg-bytes").expect("write media fixture");
    path.to_string_lossy().into_owned()
}

pub fn media_dir() -> TempDir {
    tempfile::tempdir().expect("create media dir")
}

/// Follower 5 follows 2 and 3 (the 3 edge stored twice). Account 9 posts but
/// is not followed. Follower 7 follows nobody.
pub fn sample_graph() -> InMemoryFollowGraph {
    InMemoryFollowGraph::new()
        .follow(5, 2)
        .follow(5, 3)
        .follow(5, 3)
        .follow(8, 9)
}

pub fn sample_content(dir: &Path) -> InMemoryContentStore {
    InMemoryContentStore::new()
        .post(2, 100, media_file(dir, "2_morning.jpg"))
        .post(3, 200, media_file(dir, "3_evening.jpg"))
        .post(3, 150, media_file(dir, "3_lunch.jpg"))
        .post(9, 300, media_file(dir, "9_party.jpg"))
}

pub fn aggregator<F, C>(follows: F, content: C) -> FeedAggregator
where
    F: FollowGraphRepository + 'static,
    C: ContentRepository + 'static,
{
    FeedAggregator::new(
        Arc::new(follows),
        Arc::new(content),
        ResourceResolver::default(),
    )
}
