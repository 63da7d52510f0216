use actix_web::{get, web, HttpResponse};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

use crate::config::FeedConfig;
use crate::domain::{EmptyReason, FeedResult};
use crate::error::Result;
use crate::models::{FeedCheckResponse, FeedCountResponse, FeedResponse};
use crate::services::FeedAggregator;

#[derive(Debug, Deserialize)]
pub struct FeedQueryParams {
    pub limit: Option<i64>,
}

impl FeedQueryParams {
    /// Missing limit uses the configured default; large limits are clamped.
    /// Non-positive limits pass through so the aggregator rejects them.
    fn effective_limit(&self, config: &FeedConfig) -> i64 {
        self.limit
            .unwrap_or(config.default_limit)
            .min(config.max_limit)
    }
}

pub struct FeedHandlerState {
    pub aggregator: Arc<FeedAggregator>,
    pub config: FeedConfig,
}

#[get("/followed/{follower_id}")]
pub async fn get_feed(
    path: web::Path<i64>,
    query: web::Query<FeedQueryParams>,
    state: web::Data<FeedHandlerState>,
) -> Result<HttpResponse> {
    let follower_id = path.into_inner();
    let limit = query.effective_limit(&state.config);
    debug!(follower = follower_id, limit, "Getting news feed");

    let result = state.aggregator.feed_for(follower_id, limit).await?;
    Ok(HttpResponse::Ok().json(FeedResponse::from_result(follower_id, result)))
}

#[get("/followed/{follower_id}/count")]
pub async fn get_feed_count(
    path: web::Path<i64>,
    state: web::Data<FeedHandlerState>,
) -> Result<HttpResponse> {
    let follower_id = path.into_inner();
    let result = state
        .aggregator
        .feed_for(follower_id, state.config.max_limit)
        .await?;

    let message = match result.empty_reason() {
        Some(EmptyReason::NoFollowedAccounts) => "No followed users found",
        _ => "Photo count retrieved successfully",
    };

    Ok(HttpResponse::Ok().json(FeedCountResponse {
        follower_id,
        photo_count: result.len(),
        message,
    }))
}

#[get("/followed/{follower_id}/check")]
pub async fn check_feed(
    path: web::Path<i64>,
    state: web::Data<FeedHandlerState>,
) -> Result<HttpResponse> {
    let follower_id = path.into_inner();
    let result = state
        .aggregator
        .feed_for(follower_id, state.config.max_limit)
        .await?;

    Ok(HttpResponse::Ok().json(check_response(follower_id, &result)))
}

fn check_response(follower_id: i64, result: &FeedResult) -> FeedCheckResponse {
    let message = match result.empty_reason() {
        Some(EmptyReason::NoFollowedAccounts) => "User is not following anyone",
        _ => "News feed availability checked",
    };

    FeedCheckResponse {
        follower_id,
        has_photos: !result.is_empty(),
        photo_count: result.len(),
        message,
    }
}
