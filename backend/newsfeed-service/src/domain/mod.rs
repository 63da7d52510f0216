pub mod feed;
pub mod models;
pub mod resource;

pub use feed::{EmptyReason, FeedItem, FeedResult, ResourceOutcome};
pub use models::{AccountId, ContentEntry, FeedLimit, FollowEdge, GeoContext, DEFAULT_FEED_LIMIT};
pub use resource::{ResourceHandle, ResourceStatus};
