//! Prometheus metrics for the travel assistant.
//!
//! Exposes a standard `/metrics` endpoint that Prometheus can scrape.
//! The pipeline records which branch each message took and every point where
//! it degraded to a fallback.

use std::time::Duration;

use once_cell::sync::Lazy;
use prometheus::{
    opts, register_counter_vec, register_histogram_vec, CounterVec, Encoder, HistogramVec,
    TextEncoder,
};

/// All metrics are registered in the global default registry.
pub struct ChatMetrics {
    chat_requests_total: CounterVec,
    fallbacks_total: CounterVec,
    upstream_calls_total: CounterVec,
    token_refreshes_total: CounterVec,
    chat_duration_seconds: HistogramVec,
}

impl ChatMetrics {
    fn new() -> Self {
        let chat_requests_total = register_counter_vec!(
            opts!("travel_chat_requests_total", "Chat messages processed"),
            &["branch", "outcome"]
        )
        .expect("failed to register travel_chat_requests_total");

        let fallbacks_total = register_counter_vec!(
            opts!(
                "travel_chat_fallbacks_total",
                "Times a pipeline stage degraded to its fallback"
            ),
            &["stage"]
        )
        .expect("failed to register travel_chat_fallbacks_total");

        let upstream_calls_total = register_counter_vec!(
            opts!("travel_chat_upstream_calls_total", "Calls to upstream providers"),
            &["endpoint", "outcome"]
        )
        .expect("failed to register travel_chat_upstream_calls_total");

        let token_refreshes_total = register_counter_vec!(
            opts!(
                "travel_chat_token_refreshes_total",
                "OAuth2 client-credentials exchanges"
            ),
            &["outcome"]
        )
        .expect("failed to register travel_chat_token_refreshes_total");

        let chat_duration_seconds = register_histogram_vec!(
            prometheus::histogram_opts!(
                "travel_chat_request_duration_seconds",
                "End-to-end chat latency in seconds",
                // several sequential upstream calls per hotel reply
                vec![0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 20.0, 40.0, 60.0]
            ),
            &["branch"]
        )
        .expect("failed to register travel_chat_request_duration_seconds");

        Self {
            chat_requests_total,
            fallbacks_total,
            upstream_calls_total,
            token_refreshes_total,
            chat_duration_seconds,
        }
    }
}

static METRICS: Lazy<ChatMetrics> = Lazy::new(ChatMetrics::new);

/// `branch` is `hotels` or `conversation`; `outcome` is `ok`, `no_hotels` or `error`.
pub fn record_chat(branch: &str, outcome: &str, elapsed: Duration) {
    METRICS
        .chat_requests_total
        .with_label_values(&[branch, outcome])
        .inc();
    METRICS
        .chat_duration_seconds
        .with_label_values(&[branch])
        .observe(elapsed.as_secs_f64());
}

pub fn record_fallback(stage: &str) {
    METRICS.fallbacks_total.with_label_values(&[stage]).inc();
}

pub fn record_upstream(endpoint: &str, success: bool) {
    let outcome = if success { "ok" } else { "error" };
    METRICS
        .upstream_calls_total
        .with_label_values(&[endpoint, outcome])
        .inc();
}

pub fn record_token_refresh(success: bool) {
    let outcome = if success { "ok" } else { "error" };
    METRICS
        .token_refreshes_total
        .with_label_values(&[outcome])
        .inc();
}

/// Encode all registered metrics as Prometheus text format.
/// Called by the `/metrics` HTTP handler.
pub fn encode_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer).unwrap_or_default();
    String::from_utf8(buffer).unwrap_or_default()
}
