//! Response bodies for the newsfeed HTTP API.

use serde::Serialize;

use crate::domain::{ContentEntry, EmptyReason, FeedItem, FeedResult, ResourceOutcome};
use crate::error::ResolutionErrorKind;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedResponse {
    pub message: &'static str,
    pub follower_id: i64,
    pub photo_count: usize,
    pub photos: Vec<FeedPhoto>,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<EmptyReason>,
}

impl FeedResponse {
    pub fn from_result(follower_id: i64, result: FeedResult) -> Self {
        match result {
            FeedResult::Empty { reason } => Self {
                message: "No photos available in news feed",
                follower_id,
                photo_count: 0,
                photos: Vec::new(),
                status: "empty",
                reason: Some(reason),
            },
            FeedResult::Items(items) => {
                let photos: Vec<FeedPhoto> = items.into_iter().map(FeedPhoto::from).collect();
                Self {
                    message: "News feed retrieved successfully",
                    follower_id,
                    photo_count: photos.len(),
                    photos,
                    status: "success",
                    reason: None,
                }
            }
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedPhoto {
    #[serde(flatten)]
    pub entry: ContentEntry,
    pub resource: ResourceView,
}

impl From<FeedItem> for FeedPhoto {
    fn from(item: FeedItem) -> Self {
        Self {
            entry: item.entry,
            resource: item.resource.into(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResourceView {
    #[serde(rename_all = "camelCase")]
    Found {
        display_name: String,
        content_length: Option<u64>,
    },
    #[serde(rename_all = "camelCase")]
    Failed {
        kind: ResolutionErrorKind,
        detail: String,
    },
}

impl From<ResourceOutcome> for ResourceView {
    fn from(outcome: ResourceOutcome) -> Self {
        match outcome {
            ResourceOutcome::Found { handle, status } => ResourceView::Found {
                display_name: handle.display_name().to_string(),
                content_length: status.content_length,
            },
            ResourceOutcome::Failed(err) => ResourceView::Failed {
                kind: err.kind,
                detail: err.detail,
            },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedCountResponse {
    pub follower_id: i64,
    pub photo_count: usize,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedCheckResponse {
    pub follower_id: i64,
    pub has_photos: bool,
    pub photo_count: usize,
    pub message: &'static str,
}
