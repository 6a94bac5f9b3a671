use crate::domain::tts::CredentialsError;
use crate::error::AppError;

/// Batch-level failures. These are raised before any item is processed and
/// block the operation; per-item failures never surface here.
#[derive(Debug, thiserror::Error)]
pub enum BatchServiceError {
    #[error("no valid rows: every row is missing a character, voice_id or text")]
    NoValidRows,
    #[error("no script loaded")]
    EmptyBatch,
    #[error("missing credentials: {0}")]
    MissingCredentials(#[from] CredentialsError),
    #[error("a batch run is already in progress")]
    RunInProgress,
    #[error("work item not found")]
    ItemNotFound,
    #[error("work item has no audio")]
    AudioNotAvailable,
}

impl From<BatchServiceError> for AppError {
    fn from(err: BatchServiceError) -> Self {
        match err {
            BatchServiceError::NoValidRows | BatchServiceError::EmptyBatch => {
                AppError::BadRequest(err.to_string())
            }
            BatchServiceError::MissingCredentials(e) => AppError::Unauthorized(e.to_string()),
            BatchServiceError::RunInProgress => AppError::Conflict(err.to_string()),
            BatchServiceError::ItemNotFound | BatchServiceError::AudioNotAvailable => {
                AppError::NotFound(err.to_string())
            }
        }
    }
}
