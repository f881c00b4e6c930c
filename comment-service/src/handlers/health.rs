use crate::startup::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;
use service_core::error::AppError;
use service_core::middleware::metrics::render_metrics;

/// Liveness probe.
///
/// A missing API key reports `degraded` but stays 200: every comment request
/// will fail, yet the process itself is healthy.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let (status, provider) = if state.provider.is_configured() {
        ("ok", "configured")
    } else {
        ("degraded", "not_configured")
    };

    Json(json!({
        "status": status,
        "service": "comment-service",
        "version": env!("CARGO_PKG_VERSION"),
        "provider": provider,
    }))
}

/// Prometheus scrape endpoint.
pub async fn metrics() -> Result<String, AppError> {
    render_metrics()
}
