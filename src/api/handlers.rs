use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::json;

use super::AppState;
use crate::errors::AppError;
use crate::metrics;
use crate::models::{ChatRequest, ChatResponse, HealthStatus};

pub async fn chat(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(req) = payload.map_err(|e| AppError::InvalidRequest(e.body_text()))?;
    let message = req.validated_message(state.config.max_message_chars)?;

    let resp = state.assistant.process_message(message).await?;
    tracing::info!(hotels = resp.hotel_count(), "chat reply ready");
    Ok(Json(resp))
}

/// 200 when a provider token can be obtained, 503 otherwise.
pub async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthStatus>) {
    match state.assistant.health_check().await {
        Ok(()) => (StatusCode::OK, Json(HealthStatus::healthy())),
        Err(e) => {
            tracing::warn!("health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthStatus::unhealthy(e.to_string())),
            )
        }
    }
}

pub async fn root() -> impl IntoResponse {
    Json(json!({
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "languages": ["english", "french", "malagasy"],
        "endpoints": {
            "chat": "POST /api/v1/chat",
            "health": "GET /api/v1/health",
            "metrics": "GET /metrics",
        }
    }))
}

pub async fn prometheus_metrics() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        metrics::encode_metrics(),
    )
}
