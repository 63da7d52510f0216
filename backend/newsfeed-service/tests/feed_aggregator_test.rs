mod common;

use mockall::mock;
use std::path::PathBuf;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use common::*;
use newsfeed_service::domain::{AccountId, ContentEntry, EmptyReason, FeedResult, FollowEdge};
use newsfeed_service::error::{FeedError, ResolutionErrorKind, StoreKind};
use newsfeed_service::repository::{ContentRepository, FollowGraphRepository, RepositoryResult};
use newsfeed_service::services::{FeedAggregator, ResourceResolver};

mock! {
    pub Follows {}

    #[async_trait::async_trait]
    impl FollowGraphRepository for Follows {
        async fn edges_from(&self, follower_id: AccountId) -> RepositoryResult<Vec<FollowEdge>>;
        async fn health_check(&self) -> RepositoryResult<()>;
    }
}

mock! {
    pub Content {}

    #[async_trait::async_trait]
    impl ContentRepository for Content {
        async fn top_k_by_owners(
            &self,
            owner_ids: &[AccountId],
            k: i64,
        ) -> RepositoryResult<Vec<ContentEntry>>;
        async fn health_check(&self) -> RepositoryResult<()>;
    }
}

fn timestamps(feed: &FeedResult) -> Vec<i64> {
    feed.items()
        .iter()
        .map(|item| item.entry.created_at.timestamp())
        .collect()
}

#[tokio::test]
async fn feed_merges_followed_accounts_newest_first() {
    let dir = media_dir();
    let aggregator = aggregator(sample_graph(), sample_content(dir.path()));

    let feed = aggregator.feed_for(5, 10).await.unwrap();

    assert_eq!(timestamps(&feed), vec![200, 150, 100]);
    let owners: Vec<AccountId> = feed.items().iter().map(|i| i.entry.owner_id).collect();
    assert_eq!(owners, vec![id(3), id(3), id(2)]);
    assert_eq!(feed.failure_count(), 0);
}

#[tokio::test]
async fn follower_without_follows_gets_empty_feed() {
    let dir = media_dir();
    let content = sample_content(dir.path());
    let queries = content.query_log();
    let aggregator = aggregator(sample_graph(), content);

    let feed = aggregator.feed_for(7, 10).await.unwrap();

    assert_eq!(
        feed,
        FeedResult::Empty {
            reason: EmptyReason::NoFollowedAccounts
        }
    );
    assert!(queries.lock().unwrap().is_empty());
}

#[tokio::test]
async fn followed_accounts_without_posts_give_empty_feed() {
    let aggregator = aggregator(
        InMemoryFollowGraph::new().follow(5, 2),
        InMemoryContentStore::new(),
    );

    let feed = aggregator.feed_for(5, 10).await.unwrap();
    assert_eq!(feed.empty_reason(), Some(EmptyReason::NoRecentContent));
}

#[tokio::test]
async fn limit_keeps_only_the_newest_entries() {
    let dir = media_dir();
    let mut content = InMemoryContentStore::new();
    for (i, ts) in [10, 50, 30, 40, 20].into_iter().enumerate() {
        content = content.post(2, ts, media_file(dir.path(), &format!("{}.jpg", i)));
    }
    let aggregator = aggregator(InMemoryFollowGraph::new().follow(5, 2), content);

    let feed = aggregator.feed_for(5, 2).await.unwrap();
    assert_eq!(timestamps(&feed), vec![50, 40]);
}

#[tokio::test]
async fn duplicate_edges_do_not_change_the_feed() {
    let dir = media_dir();
    let deduped = InMemoryFollowGraph::new().follow(5, 2).follow(5, 3);

    let with_duplicates = aggregator(sample_graph(), sample_content(dir.path()))
        .feed_for(5, 10)
        .await
        .unwrap();
    let without_duplicates = aggregator(deduped, sample_content(dir.path()))
        .feed_for(5, 10)
        .await
        .unwrap();

    assert_eq!(with_duplicates, without_duplicates);
}

#[tokio::test]
async fn store_is_queried_once_with_distinct_owners() {
    let dir = media_dir();
    let content = sample_content(dir.path());
    let queries = content.query_log();
    let aggregator = aggregator(sample_graph(), content);

    aggregator.feed_for(5, 10).await.unwrap();

    let log = queries.lock().unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0], (vec![id(2), id(3)], 10));
}

#[tokio::test]
async fn feed_length_and_order_hold_for_every_limit() {
    let dir = media_dir();
    let mut content = InMemoryContentStore::new();
    let mut graph = InMemoryFollowGraph::new();
    for owner in 1..=4 {
        graph = graph.follow(5, owner);
        for n in 0..3 {
            let ts = owner * 7 + n * 11;
            content = content.post(
                owner,
                ts,
                media_file(dir.path(), &format!("{}_{}.jpg", owner, n)),
            );
        }
    }
    let aggregator = aggregator(graph, content);

    for limit in 1..=15 {
        let feed = aggregator.feed_for(5, limit).await.unwrap();
        assert_eq!(feed.len(), (limit as usize).min(12), "limit {}", limit);

        let ts = timestamps(&feed);
        assert!(
            ts.windows(2).all(|w| w[0] >= w[1]),
            "limit {} not newest first: {:?}",
            limit,
            ts
        );
    }
}

#[tokio::test]
async fn bad_locators_only_fail_their_own_entry() {
    let dir = media_dir();
    let content = InMemoryContentStore::new()
        .post(2, 100, media_file(dir.path(), "ok_old.jpg"))
        .post(2, 200, "s3://bucket/unsupported.jpg")
        .post(3, 300, dir.path().join("gone.jpg").to_string_lossy().into_owned())
        .post(3, 400, media_file(dir.path(), "ok_new.jpg"));
    let aggregator = aggregator(sample_graph(), content);

    let feed = aggregator.feed_for(5, 10).await.unwrap();

    assert_eq!(timestamps(&feed), vec![400, 300, 200, 100]);
    assert_eq!(feed.failure_count(), 2);

    let items = feed.items();
    assert!(items[0].resource.is_found());
    assert_eq!(
        items[1].resource.failure().map(|e| e.kind),
        Some(ResolutionErrorKind::Unavailable)
    );
    assert_eq!(
        items[2].resource.failure().map(|e| e.kind),
        Some(ResolutionErrorKind::MalformedLocator)
    );
    assert!(items[3].resource.is_found());
}

#[tokio::test]
async fn relative_locators_resolve_under_media_root() {
    let dir = media_dir();
    media_file(dir.path(), "2_relative.jpg");
    let content = InMemoryContentStore::new()
        .post(2, 100, "2_relative.jpg")
        .post(2, 200, "../outside.jpg");

    let aggregator = FeedAggregator::new(
        Arc::new(InMemoryFollowGraph::new().follow(5, 2)),
        Arc::new(content),
        ResourceResolver::new(Some(PathBuf::from(dir.path()))),
    );

    let feed = aggregator.feed_for(5, 10).await.unwrap();
    let items = feed.items();
    assert_eq!(
        items[0].resource.failure().map(|e| e.kind),
        Some(ResolutionErrorKind::MalformedLocator)
    );
    assert!(items[1].resource.is_found());
}

#[tokio::test]
async fn unavailable_follow_graph_fails_the_call() {
    let dir = media_dir();
    let aggregator = aggregator(UnavailableStore, sample_content(dir.path()));

    let err = aggregator.feed_for(5, 10).await.unwrap_err();
    assert!(matches!(
        err,
        FeedError::StoreUnavailable {
            store: StoreKind::FollowGraph,
            ..
        }
    ));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn unavailable_content_store_fails_the_call() {
    let aggregator = aggregator(sample_graph(), UnavailableStore);

    let err = aggregator.feed_for(5, 10).await.unwrap_err();
    assert!(matches!(
        err,
        FeedError::StoreUnavailable {
            store: StoreKind::ContentStore,
            ..
        }
    ));
}

#[tokio::test]
async fn invalid_arguments_never_reach_the_stores() {
    let mut follows = MockFollows::new();
    follows.expect_edges_from().never();
    let mut content = MockContent::new();
    content.expect_top_k_by_owners().never();
    let aggregator = FeedAggregator::new(
        Arc::new(follows),
        Arc::new(content),
        ResourceResolver::default(),
    );

    for (follower, limit) in [(-1, 10), (5, 0), (5, -10)] {
        let err = aggregator.feed_for(follower, limit).await.unwrap_err();
        assert!(matches!(err, FeedError::InvalidArgument(_)));
        assert!(!err.is_retryable());
    }
}

#[tokio::test]
async fn concurrent_calls_see_the_same_feed() {
    let dir = media_dir();
    let aggregator = Arc::new(aggregator(sample_graph(), sample_content(dir.path())));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let aggregator = Arc::clone(&aggregator);
            tokio::spawn(async move { aggregator.feed_for(5, 10).await.unwrap() })
        })
        .collect();

    let baseline = aggregator.feed_for(5, 10).await.unwrap();
    for handle in handles {
        assert_eq!(handle.await.unwrap(), baseline);
    }
}

#[tokio::test]
async fn abandoned_call_does_not_block_later_calls() {
    let dir = media_dir();
    let content = StallingContentStore::new(sample_content(dir.path()));
    let abandoned = content.abandoned();
    let aggregator = aggregator(sample_graph(), content);

    let stalled = tokio::time::timeout(Duration::from_millis(50), aggregator.feed_for(5, 10)).await;
    assert!(stalled.is_err());
    assert!(abandoned.load(Ordering::SeqCst));

    let feed = aggregator.feed_for(5, 10).await.unwrap();
    assert_eq!(timestamps(&feed), vec![200, 150, 100]);
}
