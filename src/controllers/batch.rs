use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    Extension, Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{
        batch::{BatchResponse, BatchService, BatchServiceApi, IngestResponse, RunStartedResponse},
        script::RawRecord,
        tts::Credentials,
    },
    error::{AppError, AppResult},
};

pub struct BatchController {
    batch_service: Arc<BatchService>,
}

impl BatchController {
    pub fn new(batch_service: Arc<BatchService>) -> Self {
        Self { batch_service }
    }

    /// POST /api/batch - Load a script, replacing the current batch
    pub async fn load_script(
        State(controller): State<Arc<BatchController>>,
        Json(records): Json<Vec<RawRecord>>,
    ) -> AppResult<(StatusCode, Json<IngestResponse>)> {
        let response = controller.batch_service.load_script(records).await?;
        Ok((StatusCode::CREATED, Json(response)))
    }

    /// GET /api/batch - Items, progress and run state
    pub async fn get_batch(
        State(controller): State<Arc<BatchController>>,
    ) -> Json<BatchResponse> {
        Json(controller.batch_service.snapshot().await)
    }

    /// POST /api/batch/run - Synthesize every pending and failed item
    pub async fn start_run(
        State(controller): State<Arc<BatchController>>,
        Extension(credentials): Extension<Credentials>,
    ) -> AppResult<(StatusCode, Json<RunStartedResponse>)> {
        let run = controller.batch_service.start_run(credentials).await?;

        // The run reports through the batch snapshot; nobody awaits the task
        Ok((
            StatusCode::ACCEPTED,
            Json(RunStartedResponse {
                selected: run.selected,
            }),
        ))
    }

    /// GET /api/batch/items/{itemId}/audio - Download a synthesized clip
    pub async fn download_audio(
        State(controller): State<Arc<BatchController>>,
        Path(item_id): Path<Uuid>,
    ) -> AppResult<(StatusCode, HeaderMap, Body)> {
        let download = controller.batch_service.download(item_id.into()).await?;

        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_str(download.resource.mime_type())
                .map_err(|e| AppError::Internal(format!("Invalid audio MIME type: {}", e)))?,
        );
        headers.insert(
            header::CONTENT_DISPOSITION,
            content_disposition(&download.file_name)?,
        );

        Ok((
            StatusCode::OK,
            headers,
            Body::from(download.resource.bytes().to_vec()),
        ))
    }

    /// DELETE /api/batch - Clear the batch and release its audio
    pub async fn clear(State(controller): State<Arc<BatchController>>) -> AppResult<StatusCode> {
        controller.batch_service.clear().await?;
        Ok(StatusCode::NO_CONTENT)
    }
}

/// `attachment` disposition with an ASCII fallback name and the exact UTF-8
/// name in `filename*`
fn content_disposition(file_name: &str) -> AppResult<HeaderValue> {
    let ascii_fallback: String = file_name
        .chars()
        .map(|c| if c.is_ascii() && c != '"' && c != '\\' { c } else { '_' })
        .collect();

    HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        ascii_fallback,
        urlencoding::encode(file_name)
    ))
    .map_err(|e| AppError::Internal(format!("Invalid download file name: {}", e)))
}
