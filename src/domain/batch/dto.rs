use super::model::{BatchProgress, ItemId, RunProgress, WorkItem, WorkItemStatus};
use crate::domain::audio::AudioResource;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Response for POST /api/batch
#[derive(Debug, Serialize, Deserialize)]
pub struct IngestResponse {
    pub accepted: usize,
    pub skipped: usize,
}

/// Response for POST /api/batch/run
#[derive(Debug, Serialize, Deserialize)]
pub struct RunStartedResponse {
    pub selected: usize,
}

/// Response for GET /api/batch
#[derive(Debug, Serialize, Deserialize)]
pub struct BatchResponse {
    pub items: Vec<WorkItemResponse>,
    pub progress: BatchProgress,
    pub run: RunProgress,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WorkItemResponse {
    pub id: ItemId,
    pub position: usize,
    pub shot: String,
    pub character: String,
    pub voice_id: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotion: Option<String>,
    pub status: WorkItemStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<&WorkItem> for WorkItemResponse {
    fn from(item: &WorkItem) -> Self {
        let row = item.row();
        Self {
            id: item.id(),
            position: item.position(),
            shot: row.shot.clone(),
            character: row.character.clone(),
            voice_id: row.voice_id.clone(),
            text: row.text.clone(),
            emotion: row.emotion.clone(),
            status: item.status(),
            error: item.error().map(str::to_string),
            audio_url: item
                .audio()
                .map(|_| format!("/api/batch/items/{}/audio", item.id())),
            updated_at: item.updated_at(),
        }
    }
}

/// A clip ready to be served as a download
#[derive(Debug, Clone)]
pub struct AudioDownload {
    pub file_name: String,
    pub resource: AudioResource,
}
