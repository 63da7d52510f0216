use actix_web::{web, HttpResponse};
use std::time::Instant;

use super::feed::FeedHandlerState;

pub async fn liveness_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "service": "newsfeed-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Ready once both the follow graph and the content store answer.
pub async fn readiness_check(state: web::Data<FeedHandlerState>) -> HttpResponse {
    let start = Instant::now();
    let result = state.aggregator.health_check().await;
    let latency_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ready",
            "service": "newsfeed-service",
            "latency_ms": latency_ms
        })),
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            HttpResponse::ServiceUnavailable().json(serde_json::json!({
                "status": "unhealthy",
                "error": e.to_string(),
                "service": "newsfeed-service",
                "latency_ms": latency_ms
            }))
        }
    }
}
