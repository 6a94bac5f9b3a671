use super::model::{BatchProgress, ItemId, ItemState, WorkItem, WorkItemStatus};
use crate::domain::audio::ResourceHandle;
use crate::domain::script::ScriptRow;

/// Ordered work items of the current batch.
///
/// Anyone may read. Status changes go through the `mark_*` methods, which are
/// only visible inside the batch module so the scheduler stays the single
/// writer.
#[derive(Debug, Default)]
pub struct WorkItemStore {
    items: Vec<WorkItem>,
}

impl WorkItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<ScriptRow>) -> Self {
        let items = rows
            .into_iter()
            .enumerate()
            .map(|(position, row)| WorkItem::new(position, row))
            .collect();
        Self { items }
    }

    pub fn items(&self) -> &[WorkItem] {
        &self.items
    }

    pub fn get(&self, id: ItemId) -> Option<&WorkItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Ids of Pending and Failed items, in row order
    pub fn runnable_ids(&self) -> Vec<ItemId> {
        self.items
            .iter()
            .filter(|item| item.status().is_runnable())
            .map(WorkItem::id)
            .collect()
    }

    pub fn progress(&self) -> BatchProgress {
        self.items
            .iter()
            .fold(BatchProgress::default(), |mut progress, item| {
                progress.total += 1;
                match item.status() {
                    WorkItemStatus::Succeeded => progress.succeeded += 1,
                    WorkItemStatus::Failed => progress.failed += 1,
                    WorkItemStatus::Pending | WorkItemStatus::InFlight => progress.pending += 1,
                }
                progress
            })
    }

    /// Move an item to InFlight, clearing any earlier error, and hand back
    /// the row to synthesize
    pub(super) fn mark_in_flight(&mut self, id: ItemId) -> Option<(ScriptRow, Option<ResourceHandle>)> {
        let item = self.get_mut(id)?;
        let previous = item.transition(ItemState::InFlight);
        Some((item.row().clone(), previous))
    }

    /// Returns the handle the item held before, which the caller must release
    pub(super) fn mark_succeeded(&mut self, id: ItemId, audio: ResourceHandle) -> Option<ResourceHandle> {
        self.get_mut(id)?
            .transition(ItemState::Succeeded { audio })
            .filter(|previous| *previous != audio)
    }

    /// Returns the handle the item held before, which the caller must release
    pub(super) fn mark_failed(&mut self, id: ItemId, error: String) -> Option<ResourceHandle> {
        self.get_mut(id)?.transition(ItemState::Failed { error })
    }

    /// Drop every item, returning the audio handles they held
    pub(super) fn clear(&mut self) -> Vec<ResourceHandle> {
        self.items.drain(..).filter_map(|item| item.audio()).collect()
    }

    fn get_mut(&mut self, id: ItemId) -> Option<&mut WorkItem> {
        self.items.iter_mut().find(|item| item.id() == id)
    }
}
