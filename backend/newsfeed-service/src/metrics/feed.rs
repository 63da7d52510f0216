use lazy_static::lazy_static;
use prometheus::{
    register_histogram, register_histogram_vec, register_int_counter_vec, Histogram, HistogramVec,
    IntCounterVec,
};

lazy_static! {
    /// Duration of feed aggregation calls by outcome.
    pub static ref FEED_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "newsfeed_request_duration_seconds",
        "Feed aggregation duration segmented by outcome",
        &["outcome"]
    )
    .expect("failed to register newsfeed_request_duration_seconds");

    /// Feed aggregation calls by outcome (items, empty, invalid_argument, store_unavailable).
    pub static ref FEED_REQUEST_TOTAL: IntCounterVec = register_int_counter_vec!(
        "newsfeed_request_total",
        "Total feed aggregation calls segmented by outcome",
        &["outcome"]
    )
    .expect("failed to register newsfeed_request_total");

    /// Items returned per non-empty feed.
    pub static ref FEED_ITEMS_RETURNED: Histogram = register_histogram!(
        "newsfeed_items_returned",
        "Number of items returned per feed",
        vec![1.0, 5.0, 10.0, 25.0, 50.0, 100.0]
    )
    .expect("failed to register newsfeed_items_returned");

    /// Per-entry resolution failures by kind.
    pub static ref FEED_RESOLUTION_FAILURES: IntCounterVec = register_int_counter_vec!(
        "newsfeed_resolution_failures_total",
        "Feed entries whose storage locator could not be resolved",
        &["kind"]
    )
    .expect("failed to register newsfeed_resolution_failures_total");
}

pub fn record_request(outcome: &str, elapsed_secs: f64) {
    FEED_REQUEST_TOTAL.with_label_values(&[outcome]).inc();
    FEED_REQUEST_DURATION_SECONDS
        .with_label_values(&[outcome])
        .observe(elapsed_secs);
}
