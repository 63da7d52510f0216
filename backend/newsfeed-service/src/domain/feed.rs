use serde::Serialize;

use super::models::ContentEntry;
use super::resource::{ResourceHandle, ResourceStatus};
use crate::error::ResolutionError;

/// Why a feed came back with nothing in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyReason {
    /// The follower does not follow anyone.
    NoFollowedAccounts,
    /// Followed accounts exist but none of them has posted.
    NoRecentContent,
}

/// Resolution result for one entry. A failure stays attached to its entry
/// instead of failing the whole feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceOutcome {
    Found {
        handle: ResourceHandle,
        status: ResourceStatus,
    },
    Failed(ResolutionError),
}

impl ResourceOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, ResourceOutcome::Found { .. })
    }

    pub fn failure(&self) -> Option<&ResolutionError> {
        match self {
            ResourceOutcome::Failed(err) => Some(err),
            ResourceOutcome::Found { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItem {
    pub entry: ContentEntry,
    pub resource: ResourceOutcome,
}

/// Outcome of one aggregation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedResult {
    Empty { reason: EmptyReason },
    /// Newest first, never longer than the requested limit.
    Items(Vec<FeedItem>),
}

impl FeedResult {
    pub fn items(&self) -> &[FeedItem] {
        match self {
            FeedResult::Empty { .. } => &[],
            FeedResult::Items(items) => items,
        }
    }

    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    pub fn empty_reason(&self) -> Option<EmptyReason> {
        match self {
            FeedResult::Empty { reason } => Some(*reason),
            FeedResult::Items(_) => None,
        }
    }

    pub fn failure_count(&self) -> usize {
        self.items()
            .iter()
            .filter(|item| !item.resource.is_found())
            .count()
    }
}
