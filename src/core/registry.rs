//! Arena of mounted strip instances.
//!
//! Each mounted strip owns exactly one [`Instance`] record holding its
//! viewport handle, drag state, derived scroll state and scroll listener.
//! Records live in a flat slot vector and are found through an id index;
//! freed slots are recycled, so indices stay small and stable while the
//! instance is mounted.

use std::collections::HashMap;
use std::fmt;

use super::drag::DragState;
use super::listeners::ListenerGuard;
use super::scroll_state::ScrollState;
use super::surface::{SharedSurface, SurfaceHandle};

/// Stable strip identifier (the category id).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(String);

impl InstanceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl From<&str> for InstanceId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Index into the registry's slot vector.
pub type SlotId = usize;

/// Everything the engine knows about one mounted strip.
#[derive(Debug)]
pub struct Instance {
    pub id: InstanceId,
    pub handle: SurfaceHandle,
    pub(super) drag: DragState,
    /// Written only by the orchestrator's recompute.
    pub(super) scroll: ScrollState,
    /// Native scroll subscription; dropped together with the record.
    pub scroll_listener: Option<ListenerGuard>,
}

impl Instance {
    fn new(id: InstanceId, handle: SurfaceHandle) -> Self {
        Self {
            id,
            handle,
            drag: DragState::Idle,
            scroll: ScrollState::default(),
            scroll_listener: None,
        }
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn scroll_state(&self) -> ScrollState {
        self.scroll
    }

    /// Upgrade the weak handle; `None` once the surface has been dropped.
    pub fn surface(&self) -> Option<SharedSurface> {
        self.handle.upgrade()
    }
}

#[derive(Debug, Default)]
pub struct ViewportRegistry {
    slots: Vec<Option<Instance>>,
    index: HashMap<InstanceId, SlotId>,
    free: Vec<SlotId>,
}

impl ViewportRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or re-mount `id`.  Re-mounting swaps the handle and resets the
    /// per-instance state, since it described the previous surface.
    pub fn register(&mut self, id: InstanceId, handle: SurfaceHandle) -> &mut Instance {
        let record = Instance::new(id.clone(), handle);
        let slot = match self.index.get(&id).copied().or_else(|| self.free.pop()) {
            Some(slot) => slot,
            None => {
                self.slots.push(None);
                self.slots.len() - 1
            }
        };
        self.index.insert(id, slot);
        self.slots[slot].insert(record)
    }

    /// Remove `id`, returning its record.  Unknown ids are a no-op.
    pub fn unregister(&mut self, id: &InstanceId) -> Option<Instance> {
        let slot = self.index.remove(id)?;
        self.free.push(slot);
        self.slots[slot].take()
    }

    /// The live surface for `id`, if registered and still attached.
    pub fn get(&self, id: &InstanceId) -> Option<SharedSurface> {
        self.instance(id).and_then(Instance::surface)
    }

    pub fn instance(&self, id: &InstanceId) -> Option<&Instance> {
        let slot = *self.index.get(id)?;
        self.slots[slot].as_ref()
    }

    pub(super) fn instance_mut(&mut self, id: &InstanceId) -> Option<&mut Instance> {
        let slot = *self.index.get(id)?;
        self.slots[slot].as_mut()
    }

    pub fn contains(&self, id: &InstanceId) -> bool {
        self.index.contains_key(id)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn ids(&self) -> Vec<InstanceId> {
        self.iter().map(|inst| inst.id.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Instance> {
        self.slots.iter().flatten()
    }

    /// Remove every record matching `remove`, returning them.
    pub fn drain_where(&mut self, mut remove: impl FnMut(&Instance) -> bool) -> Vec<Instance> {
        let doomed: Vec<InstanceId> = self
            .iter()
            .filter(|inst| remove(*inst))
            .map(|inst| inst.id.clone())
            .collect();
        doomed.iter().filter_map(|id| self.unregister(id)).collect()
    }

    /// Remove every record.
    pub fn clear(&mut self) -> Vec<Instance> {
        self.index.clear();
        self.free.clear();
        self.slots.drain(..).flatten().collect()
    }
}
