//! Comment-specific metrics.
//!
//! Recorded through the `metrics` facade; the Prometheus recorder installed
//! by `service_core::middleware::metrics::init_metrics` exports them.

use metrics::{counter, histogram};
use std::time::Duration;

/// One classified comment request.
pub fn record_request(mode: &'static str) {
    counter!("comment_requests_total", "mode" => mode).increment(1);
}

/// A failed comment request, by error kind.
pub fn record_error(kind: &'static str) {
    counter!("comment_errors_total", "kind" => kind).increment(1);
}

/// The upstream answered without usable text and the fallback was sent.
pub fn record_fallback() {
    counter!("comment_fallback_total").increment(1);
}

/// Round-trip time of the outbound chat-completion call.
pub fn record_upstream_latency(elapsed: Duration, reached: bool) {
    let outcome = if reached { "response" } else { "network_error" };
    histogram!("upstream_request_duration_seconds", "outcome" => outcome)
        .record(elapsed.as_secs_f64());
}

/// Token usage reported by the chat API.
pub fn record_tokens(model: &str, prompt_tokens: u64, completion_tokens: u64) {
    let model = model.to_string();
    counter!("upstream_tokens_total", "model" => model.clone(), "type" => "input")
        .increment(prompt_tokens);
    counter!("upstream_tokens_total", "model" => model, "type" => "output")
        .increment(completion_tokens);
}
