use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::domain::batch::BatchServiceError;
use crate::domain::tts::Credentials;
use crate::error::AppError;
use crate::infrastructure::config::Config;

pub const X_GROUP_ID: &str = "x-group-id";

/// Resolve synthesis credentials for the request.
///
/// `Authorization: Bearer <api key>` and `X-Group-Id` take precedence; each
/// part that is missing or blank falls back to the configured default. The
/// resolved `Credentials` are inserted as a request extension.
pub async fn credentials_middleware(
    State(config): State<Arc<Config>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let headers = request.headers();

    let api_key = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .or_else(|| config.tts_api_key.clone())
        .unwrap_or_default();

    let group_id = headers
        .get(X_GROUP_ID)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .or_else(|| config.tts_group_id.clone())
        .unwrap_or_default();

    let credentials = Credentials::new(api_key, group_id).map_err(BatchServiceError::from)?;

    tracing::debug!(group_id = credentials.group_id(), "Synthesis credentials resolved");
    request.extensions_mut().insert(credentials);

    Ok(next.run(request).await)
}
