//! Scoped event-listener subscriptions.
//!
//! Every listener the engine attaches is wrapped in a [`ListenerGuard`]; the
//! guard detaches on drop, so removing an instance record (or tearing down
//! the orchestrator, or unwinding out of setup half-way) always releases it.

use std::rc::Rc;

use super::registry::InstanceId;

/// Opaque subscription token handed out by a [`ListenerHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// What a listener is attached to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ListenerTarget {
    /// Global window resize.
    Resize,
    /// Native scroll of one instance's viewport.
    Scroll(InstanceId),
}

/// The platform's event surface.
pub trait ListenerHost {
    fn attach(&self, target: ListenerTarget) -> ListenerId;
    fn detach(&self, id: ListenerId);
}

/// Holds one attached listener; detaches it when dropped.
pub struct ListenerGuard {
    host: Rc<dyn ListenerHost>,
    id: ListenerId,
}

impl ListenerGuard {
    pub fn attach(host: &Rc<dyn ListenerHost>, target: ListenerTarget) -> Self {
        let id = host.attach(target);
        Self {
            host: Rc::clone(host),
            id,
        }
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.host.detach(self.id);
    }
}

impl std::fmt::Debug for ListenerGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerGuard").field("id", &self.id).finish()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::*;

    /// Host that records which listeners are currently attached.
    #[derive(Default)]
    pub struct RecordingHost {
        next: RefCell<u64>,
        pub attached: RefCell<HashMap<ListenerId, ListenerTarget>>,
    }

    impl RecordingHost {
        pub fn count(&self) -> usize {
            self.attached.borrow().len()
        }

        pub fn has(&self, target: &ListenerTarget) -> bool {
            self.attached.borrow().values().any(|t| t == target)
        }
    }

    impl ListenerHost for RecordingHost {
        fn attach(&self, target: ListenerTarget) -> ListenerId {
            let mut next = self.next.borrow_mut();
            *next += 1;
            let id = ListenerId(*next);
            self.attached.borrow_mut().insert(id, target);
            id
        }

        fn detach(&self, id: ListenerId) {
            self.attached.borrow_mut().remove(&id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::RecordingHost;
    use super::*;

    #[test]
    fn guard_detaches_on_drop() {
        let recorder = Rc::new(RecordingHost::default());
        let host: Rc<dyn ListenerHost> = recorder.clone();
        {
            let _resize = ListenerGuard::attach(&host, ListenerTarget::Resize);
            let _scroll = ListenerGuard::attach(&host, ListenerTarget::Scroll(InstanceId::from("a")));
            assert_eq!(recorder.count(), 2);
        }
        assert_eq!(recorder.count(), 0);
    }

    #[test]
    fn guard_detaches_on_early_return() {
        fn setup(host: &Rc<dyn ListenerHost>) -> Result<ListenerGuard, &'static str> {
            let _guard = ListenerGuard::attach(host, ListenerTarget::Resize);
            Err("layout unavailable")
        }

        let recorder = Rc::new(RecordingHost::default());
        let host: Rc<dyn ListenerHost> = recorder.clone();
        assert!(setup(&host).is_err());
        assert_eq!(recorder.count(), 0);
    }
}
