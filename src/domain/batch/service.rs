use super::dto::{AudioDownload, BatchResponse, IngestResponse, WorkItemResponse};
use super::error::BatchServiceError;
use super::model::{ItemId, RunProgress, RunSummary};
use super::scheduler::BatchScheduler;
use super::store::WorkItemStore;
use crate::domain::audio::{download_file_name, AudioResourceManager};
use crate::domain::script::{ingest, RawRecord};
use crate::domain::tts::Credentials;
use crate::infrastructure::repositories::TtsRepository;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{watch, Mutex, OwnedMutexGuard, RwLock};
use tokio::task::JoinHandle;

/// A run that has been started in the background
pub struct RunHandle {
    pub selected: usize,
    pub task: JoinHandle<RunSummary>,
}

pub struct BatchService {
    store: Arc<RwLock<WorkItemStore>>,
    scheduler: Arc<BatchScheduler>,
    audio: Arc<AudioResourceManager>,
    run_lock: Arc<Mutex<()>>,
    progress: Arc<watch::Sender<RunProgress>>,
}

impl BatchService {
    pub fn new(tts_repo: Arc<dyn TtsRepository>, audio: Arc<AudioResourceManager>) -> Self {
        let (progress, _) = watch::channel(RunProgress::default());
        Self {
            store: Arc::new(RwLock::new(WorkItemStore::new())),
            scheduler: Arc::new(BatchScheduler::new(tts_repo, audio.clone())),
            audio,
            run_lock: Arc::new(Mutex::new(())),
            progress: Arc::new(progress),
        }
    }

    /// Watch run progress as it is published
    pub fn subscribe_progress(&self) -> watch::Receiver<RunProgress> {
        self.progress.subscribe()
    }
}

#[async_trait]
pub trait BatchServiceApi: Send + Sync {
    /// Replace the current batch with the valid rows of `records`.
    ///
    /// When no row is valid the current batch is kept and `NoValidRows` is
    /// returned.
    async fn load_script(&self, records: Vec<RawRecord>) -> Result<IngestResponse, BatchServiceError>;

    /// Items, derived progress and live run counters
    async fn snapshot(&self) -> BatchResponse;

    /// Start synthesizing every Pending and Failed item in the background.
    ///
    /// Only one run may be active at a time.
    async fn start_run(&self, credentials: Credentials) -> Result<RunHandle, BatchServiceError>;

    async fn download(&self, item_id: ItemId) -> Result<AudioDownload, BatchServiceError>;

    /// Drop every item and release its audio
    async fn clear(&self) -> Result<(), BatchServiceError>;

    fn is_running(&self) -> bool;
}

#[async_trait]
impl BatchServiceApi for BatchService {
    async fn load_script(&self, records: Vec<RawRecord>) -> Result<IngestResponse, BatchServiceError> {
        let report = ingest(&records);
        if report.is_empty() {
            tracing::warn!(
                input_rows = records.len(),
                "Script rejected, no valid rows"
            );
            return Err(BatchServiceError::NoValidRows);
        }

        let _guard = self.idle_guard()?;
        let response = IngestResponse {
            accepted: report.accepted(),
            skipped: report.skipped,
        };

        let mut store = self.store.write().await;
        for handle in store.clear() {
            self.audio.release(handle);
        }
        *store = WorkItemStore::from_rows(report.rows);
        self.progress.send_replace(RunProgress::default());

        tracing::info!(
            accepted = response.accepted,
            skipped = response.skipped,
            "Script loaded"
        );

        Ok(response)
    }

    async fn snapshot(&self) -> BatchResponse {
        let store = self.store.read().await;
        BatchResponse {
            items: store.items().iter().map(WorkItemResponse::from).collect(),
            progress: store.progress(),
            run: *self.progress.borrow(),
        }
    }

    async fn start_run(&self, credentials: Credentials) -> Result<RunHandle, BatchServiceError> {
        let guard = self.idle_guard()?;

        let selected = {
            let store = self.store.read().await;
            if store.is_empty() {
                return Err(BatchServiceError::EmptyBatch);
            }
            store.runnable_ids().len()
        };

        self.progress.send_replace(RunProgress {
            running: true,
            processed: 0,
            selected,
        });

        let active = ActiveRun {
            lock: Some(guard),
            progress: self.progress.clone(),
        };
        let store = self.store.clone();
        let scheduler = self.scheduler.clone();
        let progress = self.progress.clone();
        let task = tokio::spawn(async move {
            let _active = active;
            scheduler.run_batch(&store, &credentials, &progress).await
        });

        Ok(RunHandle { selected, task })
    }

    async fn download(&self, item_id: ItemId) -> Result<AudioDownload, BatchServiceError> {
        let store = self.store.read().await;
        let item = store.get(item_id).ok_or(BatchServiceError::ItemNotFound)?;
        let resource = item
            .audio()
            .and_then(|handle| self.audio.get(handle))
            .ok_or(BatchServiceError::AudioNotAvailable)?;

        let row = item.row();
        Ok(AudioDownload {
            file_name: download_file_name(&row.shot, &row.character, resource.extension()),
            resource,
        })
    }

    async fn clear(&self) -> Result<(), BatchServiceError> {
        let _guard = self.idle_guard()?;

        let released = self.store.write().await.clear().len();
        self.audio.release_all();
        self.progress.send_replace(RunProgress::default());

        tracing::info!(released_audio = released, "Batch cleared");
        Ok(())
    }

    fn is_running(&self) -> bool {
        self.progress.borrow().running
    }
}

/// Owned by the run task. Dropping it, on return or on unwind, frees the run
/// lock and marks the run finished.
struct ActiveRun {
    lock: Option<OwnedMutexGuard<()>>,
    progress: Arc<watch::Sender<RunProgress>>,
}

impl Drop for ActiveRun {
    fn drop(&mut self) {
        // Release the run lock before reporting idle
        self.lock.take();
        self.progress.send_modify(|p| p.running = false);
    }
}

impl BatchService {
    /// Claim the run lock, failing when a run is active
    fn idle_guard(&self) -> Result<OwnedMutexGuard<()>, BatchServiceError> {
        self.run_lock
            .clone()
            .try_lock_owned()
            .map_err(|_| BatchServiceError::RunInProgress)
    }
}
