use super::resource::AudioResource;
use crate::domain::batch::ItemId;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Opaque reference to audio held by the [`AudioResourceManager`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceHandle(Uuid);

impl ResourceHandle {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for ResourceHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Default)]
struct Registry {
    resources: HashMap<ResourceHandle, (ItemId, AudioResource)>,
    by_owner: HashMap<ItemId, ResourceHandle>,
}

/// Holds decoded audio for succeeded work items and hands out handles to it.
///
/// Each work item owns at most one live resource. Materializing a new one for
/// the same item drops the previous audio.
#[derive(Default)]
pub struct AudioResourceManager {
    registry: Mutex<Registry>,
}

impl AudioResourceManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register audio for `owner` and return its handle
    pub fn materialize(&self, owner: ItemId, resource: AudioResource) -> ResourceHandle {
        let handle = ResourceHandle::generate();
        let size = resource.len();
        let mut registry = self.registry.lock();

        if let Some(previous) = registry.by_owner.insert(owner, handle) {
            registry.resources.remove(&previous);
            tracing::debug!(
                item_id = %owner,
                handle = %previous,
                "Released replaced audio resource"
            );
        }
        registry.resources.insert(handle, (owner, resource));

        tracing::debug!(
            item_id = %owner,
            handle = %handle,
            audio_size = size,
            "Audio resource materialized"
        );

        handle
    }

    /// Drop the audio behind `handle`. Unknown handles are ignored.
    pub fn release(&self, handle: ResourceHandle) {
        let mut registry = self.registry.lock();
        if let Some((owner, _)) = registry.resources.remove(&handle) {
            if registry.by_owner.get(&owner) == Some(&handle) {
                registry.by_owner.remove(&owner);
            }
            tracing::debug!(item_id = %owner, handle = %handle, "Audio resource released");
        }
    }

    pub fn release_all(&self) {
        let mut registry = self.registry.lock();
        let released = registry.resources.len();
        registry.resources.clear();
        registry.by_owner.clear();
        if released > 0 {
            tracing::debug!(released = released, "All audio resources released");
        }
    }

    pub fn get(&self, handle: ResourceHandle) -> Option<AudioResource> {
        self.registry
            .lock()
            .resources
            .get(&handle)
            .map(|(_, resource)| resource.clone())
    }

    pub fn live_count(&self) -> usize {
        self.registry.lock().resources.len()
    }
}
