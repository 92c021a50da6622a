//! The terminal's listener table.
//!
//! Tracks which resize/scroll listeners the engine currently holds so the
//! event loop only delivers events somebody subscribed to.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use crate::core::listeners::{ListenerHost, ListenerId, ListenerTarget};
use crate::core::registry::InstanceId;

#[derive(Debug, Default)]
pub struct EventHub {
    next: Cell<u64>,
    listeners: RefCell<HashMap<ListenerId, ListenerTarget>>,
}

impl EventHub {
    pub fn listens_for_resize(&self) -> bool {
        self.listens(&ListenerTarget::Resize)
    }

    pub fn listens_for_scroll(&self, id: &InstanceId) -> bool {
        self.listens(&ListenerTarget::Scroll(id.clone()))
    }

    fn listens(&self, target: &ListenerTarget) -> bool {
        self.listeners.borrow().values().any(|t| t == target)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl ListenerHost for EventHub {
    fn attach(&self, target: ListenerTarget) -> ListenerId {
        let id = ListenerId(self.next.get());
        self.next.set(id.0 + 1);
        tracing::trace!(?id, ?target, "listener attached");
        self.listeners.borrow_mut().insert(id, target);
        id
    }

    fn detach(&self, id: ListenerId) {
        if let Some(target) = self.listeners.borrow_mut().remove(&id) {
            tracing::trace!(?id, ?target, "listener detached");
        }
    }
}
