pub mod aggregator;
pub mod content_store;
pub mod follow_graph;
pub mod resolver;

pub use aggregator::FeedAggregator;
pub use content_store::ContentStoreReader;
pub use follow_graph::FollowGraphReader;
pub use resolver::ResourceResolver;
