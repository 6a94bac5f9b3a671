use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::domain::batch::{BatchService, BatchServiceApi};
use crate::infrastructure::config::Config;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

pub async fn health_ready(
    State((batch_service, config)): State<(Arc<BatchService>, Arc<Config>)>,
) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ready",
            "synthesis_endpoint": config.tts_base_url,
            "run_in_progress": batch_service.is_running(),
        })),
    )
}
