/// HTTP handlers for the newsfeed API
///
/// - Feed: the follower's newest photos, a count, and an availability check
/// - Health: liveness and store readiness
pub mod feed;
pub mod health;

use actix_web::web;

use crate::error::AppError;

pub use feed::{check_feed, get_feed, get_feed_count, FeedHandlerState, FeedQueryParams};
pub use health::{liveness_check, readiness_check};

/// Register every route. Shared by the server and the HTTP tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/metrics", web::get().to(crate::metrics::serve_metrics))
        .route("/health", web::get().to(liveness_check))
        .route("/health/ready", web::get().to(readiness_check))
        .service(
            web::scope("/api/newsfeed")
                .app_data(follower_path_config())
                .service(get_feed)
                .service(get_feed_count)
                .service(check_feed),
        );
}

/// A follower id that is not an integer is a bad argument, not a missing route.
fn follower_path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|err, _req| AppError::InvalidArgument(err.to_string()).into())
}
