use super::model::{ItemId, RunProgress, RunSummary};
use super::store::WorkItemStore;
use crate::domain::audio::AudioResourceManager;
use crate::domain::tts::Credentials;
use crate::infrastructure::repositories::TtsRepository;
use std::sync::Arc;
use tokio::sync::{watch, RwLock};

/// Runs synthesis over a batch, one item at a time, in row order.
///
/// Only Pending and Failed items are picked up, so running again after a
/// partial failure retries exactly the rows that still need audio. A failing
/// item never stops the run.
pub struct BatchScheduler {
    tts_repo: Arc<dyn TtsRepository>,
    audio: Arc<AudioResourceManager>,
}

impl BatchScheduler {
    pub fn new(tts_repo: Arc<dyn TtsRepository>, audio: Arc<AudioResourceManager>) -> Self {
        Self { tts_repo, audio }
    }

    /// Process every runnable item of `store`.
    ///
    /// The store lock is only held while an item's state changes, never
    /// across a network call. Item N's final state is written before item
    /// N+1 is touched, and `progress.processed` is updated after every item.
    /// The `running` flag belongs to the caller.
    pub async fn run_batch(
        &self,
        store: &RwLock<WorkItemStore>,
        credentials: &Credentials,
        progress: &watch::Sender<RunProgress>,
    ) -> RunSummary {
        let selected = store.read().await.runnable_ids();
        let mut summary = RunSummary {
            selected: selected.len(),
            ..RunSummary::default()
        };

        if selected.is_empty() {
            tracing::info!("Nothing to synthesize, every item already succeeded");
            return summary;
        }

        tracing::info!(selected = selected.len(), "Batch run started");
        progress.send_modify(|p| {
            p.processed = 0;
            p.selected = selected.len();
        });

        for (index, item_id) in selected.iter().copied().enumerate() {
            if self.process_item(store, item_id, credentials).await {
                summary.succeeded += 1;
            } else {
                summary.failed += 1;
            }

            progress.send_modify(|p| p.processed = index + 1);
        }

        tracing::info!(
            selected = summary.selected,
            succeeded = summary.succeeded,
            failed = summary.failed,
            "Batch run finished"
        );

        summary
    }

    /// Synthesize one item and record the outcome. Returns whether it succeeded.
    async fn process_item(
        &self,
        store: &RwLock<WorkItemStore>,
        item_id: ItemId,
        credentials: &Credentials,
    ) -> bool {
        let row = {
            let mut store = store.write().await;
            match store.mark_in_flight(item_id) {
                Some((row, previous)) => {
                    if let Some(previous) = previous {
                        self.audio.release(previous);
                    }
                    row
                }
                None => {
                    tracing::warn!(item_id = %item_id, "Selected item disappeared from the batch");
                    return false;
                }
            }
        };

        let outcome = self
            .tts_repo
            .synthesize(&row.text, &row.voice_id, credentials)
            .await;

        let mut store = store.write().await;
        match outcome {
            Ok(resource) => {
                let handle = self.audio.materialize(item_id, resource);
                if let Some(previous) = store.mark_succeeded(item_id, handle) {
                    self.audio.release(previous);
                }
                tracing::info!(
                    item_id = %item_id,
                    shot = %row.shot,
                    character = %row.character,
                    "Item synthesized"
                );
                true
            }
            Err(e) => {
                tracing::warn!(
                    item_id = %item_id,
                    shot = %row.shot,
                    character = %row.character,
                    error = %e,
                    "Item synthesis failed"
                );
                if let Some(previous) = store.mark_failed(item_id, e.to_string()) {
                    self.audio.release(previous);
                }
                false
            }
        }
    }
}
