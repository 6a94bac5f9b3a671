use crate::domain::audio::ResourceHandle;
use crate::domain::script::ScriptRow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(Uuid);

impl ItemId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl From<Uuid> for ItemId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkItemStatus {
    Pending,
    InFlight,
    Succeeded,
    Failed,
}

impl WorkItemStatus {
    /// Whether a run should pick this item up
    pub fn is_runnable(self) -> bool {
        matches!(self, WorkItemStatus::Pending | WorkItemStatus::Failed)
    }
}

/// Lifecycle state. Audio only exists on success and a message only on
/// failure, so both live inside their variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ItemState {
    Pending,
    InFlight,
    Succeeded { audio: ResourceHandle },
    Failed { error: String },
}

/// Synthesis lifecycle of one accepted script row
#[derive(Debug, Clone)]
pub struct WorkItem {
    id: ItemId,
    position: usize,
    row: ScriptRow,
    state: ItemState,
    updated_at: DateTime<Utc>,
}

impl WorkItem {
    pub(crate) fn new(position: usize, row: ScriptRow) -> Self {
        Self {
            id: ItemId::generate(),
            position,
            row,
            state: ItemState::Pending,
            updated_at: Utc::now(),
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    /// 0-based position of the row in the ingested script
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn row(&self) -> &ScriptRow {
        &self.row
    }

    pub fn status(&self) -> WorkItemStatus {
        match self.state {
            ItemState::Pending => WorkItemStatus::Pending,
            ItemState::InFlight => WorkItemStatus::InFlight,
            ItemState::Succeeded { .. } => WorkItemStatus::Succeeded,
            ItemState::Failed { .. } => WorkItemStatus::Failed,
        }
    }

    pub fn audio(&self) -> Option<ResourceHandle> {
        match self.state {
            ItemState::Succeeded { audio } => Some(audio),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            ItemState::Failed { error } => Some(error),
            _ => None,
        }
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replace the state, returning the audio handle the item held before
    pub(crate) fn transition(&mut self, state: ItemState) -> Option<ResourceHandle> {
        let previous = self.audio();
        self.state = state;
        self.updated_at = Utc::now();
        previous
    }
}

/// Counts derived from the store at a point in time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchProgress {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Pending plus in-flight
    pub pending: usize,
}

/// Live counters of the current (or last) run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunProgress {
    pub running: bool,
    pub processed: usize,
    pub selected: usize,
}

/// What a finished run did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub selected: usize,
    pub succeeded: usize,
    pub failed: usize,
}
