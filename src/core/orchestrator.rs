//! Carousel orchestration: ties the registry, drag controller, paging and
//! responsive gate to the platform's event surface.
//!
//! All entry points are synchronous and run on the UI loop.  Operations that
//! target an unknown id or a detached surface are silent no-ops; the `bool`
//! results only report whether anything happened.

use std::collections::HashSet;
use std::rc::Rc;

use super::catalog::Category;
use super::drag::{DragController, PointerInput};
use super::listeners::{ListenerGuard, ListenerHost, ListenerTarget};
use super::paging::{self, PageDirection};
use super::registry::{Instance, InstanceId, ViewportRegistry};
use super::responsive::ResponsiveGate;
use super::scroll_state::{self, ScrollState};
use super::surface::SurfaceHandle;

pub struct CarouselOrchestrator {
    registry: ViewportRegistry,
    drag: DragController,
    gate: ResponsiveGate,
    host: Rc<dyn ListenerHost>,
    resize_listener: Option<ListenerGuard>,
    /// Instances whose geometry must be re-measured once layout settles.
    pending: HashSet<InstanceId>,
}

impl CarouselOrchestrator {
    pub fn new(host: Rc<dyn ListenerHost>, drag: DragController, gate: ResponsiveGate) -> Self {
        let resize_listener = Some(ListenerGuard::attach(&host, ListenerTarget::Resize));
        Self {
            registry: ViewportRegistry::new(),
            drag,
            gate,
            host,
            resize_listener,
            pending: HashSet::new(),
        }
    }

    pub fn registry(&self) -> &ViewportRegistry {
        &self.registry
    }

    // ── lifecycle ───────────────────────────────────────────────

    /// Reconcile with fresh catalog data.  Ids that disappeared are
    /// unregistered now; the returned ids still need a surface mounted.
    pub fn sync_catalog(&mut self, catalog: &[Category]) -> Vec<InstanceId> {
        let wanted: HashSet<InstanceId> = catalog.iter().map(Category::instance_id).collect();
        for id in self.registry.ids() {
            if !wanted.contains(&id) {
                self.unregister(&id);
            }
        }
        catalog
            .iter()
            .map(Category::instance_id)
            .filter(|id| !self.registry.contains(id))
            .collect()
    }

    /// Mount `id` on `handle` and subscribe to its native scroll events.
    /// Scroll state is measured on the next frame, after layout.
    pub fn register(&mut self, id: InstanceId, handle: SurfaceHandle) {
        let listener = ListenerGuard::attach(&self.host, ListenerTarget::Scroll(id.clone()));
        let instance = self.registry.register(id.clone(), handle);
        instance.scroll_listener = Some(listener);
        tracing::debug!(%id, "strip registered");
        self.pending.insert(id);
    }

    /// Unmount `id`, detaching its scroll listener.  Unknown ids are ignored.
    pub fn unregister(&mut self, id: &InstanceId) {
        self.pending.remove(id);
        if self.registry.unregister(id).is_some() {
            tracing::debug!(%id, "strip unregistered");
        }
    }

    /// Drop every instance and the global resize listener.
    pub fn teardown(&mut self) {
        self.pending.clear();
        let dropped = self.registry.clear();
        self.resize_listener = None;
        tracing::debug!(instances = dropped.len(), "carousel torn down");
    }

    // ── pointer input ───────────────────────────────────────────

    pub fn on_drag_start(&mut self, id: &InstanceId, input: PointerInput) -> bool {
        let drag = self.drag;
        let Some(instance) = self.registry.instance_mut(id) else {
            return false;
        };
        let Some(surface) = instance.surface() else {
            return false;
        };
        let offset = surface.borrow().geometry().scroll_offset;
        if !drag.start(&mut instance.drag, input, offset) {
            return false;
        }
        surface.borrow_mut().set_gesture_capture(true);
        tracing::debug!(%id, source = ?input.source, x = input.x, offset, "drag start");
        true
    }

    pub fn on_drag_move(&mut self, id: &InstanceId, input: PointerInput) -> bool {
        let Some(instance) = self.registry.instance(id) else {
            return false;
        };
        let Some(target) = self.drag.drag_to(&instance.drag, input) else {
            return false;
        };
        let Some(surface) = instance.surface() else {
            return false;
        };
        tracing::trace!(%id, x = input.x, target, "drag move");
        surface.borrow_mut().set_scroll_offset(target);
        true
    }

    pub fn on_drag_end(&mut self, id: &InstanceId) -> bool {
        self.release(id, "end")
    }

    pub fn on_drag_leave(&mut self, id: &InstanceId) -> bool {
        self.release(id, "leave")
    }

    pub fn on_drag_cancel(&mut self, id: &InstanceId) -> bool {
        self.release(id, "cancel")
    }

    fn release(&mut self, id: &InstanceId, reason: &'static str) -> bool {
        let drag = self.drag;
        let Some(instance) = self.registry.instance_mut(id) else {
            return false;
        };
        if !drag.release(&mut instance.drag) {
            return false;
        }
        if let Some(surface) = instance.surface() {
            surface.borrow_mut().set_gesture_capture(false);
        }
        tracing::debug!(%id, reason, "drag released");
        true
    }

    // ── paging ──────────────────────────────────────────────────

    /// Smooth-scroll `id` by one page.  Refused while that strip is being
    /// dragged.
    pub fn page(&mut self, id: &InstanceId, direction: PageDirection) -> bool {
        let Some(instance) = self.registry.instance(id) else {
            return false;
        };
        if instance.drag.is_active() {
            tracing::debug!(%id, ?direction, "page ignored during drag");
            return false;
        }
        let Some(surface) = instance.surface() else {
            return false;
        };
        let requested = paging::page(&mut *surface.borrow_mut(), direction);
        tracing::debug!(%id, ?direction, ?requested, "page");
        requested.is_some()
    }

    // ── derived state ───────────────────────────────────────────

    /// Last derived flags for `id`; all-false when it is not mounted.
    pub fn scroll_state(&self, id: &InstanceId) -> ScrollState {
        self.registry
            .instance(id)
            .map(Instance::scroll_state)
            .unwrap_or_default()
    }

    pub fn is_paging_visible(&self, viewport_width: f64) -> bool {
        self.gate.visible_at(viewport_width)
    }

    /// Whether the `direction` button for `id` should be drawn.
    pub fn paging_affordance(&self, id: &InstanceId, direction: PageDirection) -> bool {
        self.registry.contains(id) && self.gate.shows_button(self.scroll_state(id), direction)
    }

    pub fn is_dragging(&self, id: &InstanceId) -> bool {
        self.registry
            .instance(id)
            .is_some_and(|instance| instance.drag_state().is_active())
    }

    // ── platform callbacks ──────────────────────────────────────

    /// Window resize: the gate updates now, geometry on the next frame.
    pub fn on_resize(&mut self, viewport_width: f64) {
        let visible = self.gate.update(viewport_width);
        tracing::debug!(viewport_width, visible, "resize");
        self.pending.extend(self.registry.ids());
    }

    /// Native scroll of `id`'s own viewport; the offset is already committed.
    pub fn on_scroll(&mut self, id: &InstanceId) {
        self.recompute(id);
    }

    /// The strip's item set changed; its extent is only known after layout.
    pub fn on_content_changed(&mut self, id: &InstanceId) {
        if self.registry.contains(id) {
            self.pending.insert(id.clone());
        }
    }

    /// Layout has settled: prune detached surfaces, then re-measure every
    /// instance that was waiting on layout.
    pub fn on_frame(&mut self) {
        for gone in self.registry.drain_where(|instance| instance.surface().is_none()) {
            tracing::warn!(id = %gone.id, "surface detached without unregister; dropping instance");
            self.pending.remove(&gone.id);
        }
        let pending: Vec<InstanceId> = self.pending.drain().collect();
        for id in pending {
            self.recompute(&id);
        }
    }

    fn recompute(&mut self, id: &InstanceId) {
        let Some(instance) = self.registry.instance_mut(id) else {
            return;
        };
        let Some(surface) = instance.surface() else {
            return;
        };
        let geometry = surface.borrow().geometry();
        instance.scroll = scroll_state::recompute(geometry);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::core::catalog::parse_catalog;
    use crate::core::drag::DragState;
    use crate::core::listeners::testing::RecordingHost;
    use crate::core::scroll_state::ScrollGeometry;
    use crate::core::surface::{handle_of, ScrollSurface, SharedSurface};

    #[derive(Default)]
    struct FakeSurface {
        offset: f64,
        content: f64,
        viewport: f64,
        captured: bool,
        smooth_requests: Vec<f64>,
        writes: usize,
    }

    impl ScrollSurface for FakeSurface {
        fn geometry(&self) -> ScrollGeometry {
            ScrollGeometry::new(self.offset, self.content, self.viewport)
        }

        fn set_scroll_offset(&mut self, offset: f64) {
            self.writes += 1;
            self.offset = offset.clamp(0.0, (self.content - self.viewport).max(0.0));
        }

        fn smooth_scroll_by(&mut self, delta: f64) {
            self.smooth_requests.push(delta);
        }

        fn set_gesture_capture(&mut self, captured: bool) {
            self.captured = captured;
        }
    }

    struct Fixture {
        host: Rc<RecordingHost>,
        orch: CarouselOrchestrator,
    }

    impl Fixture {
        fn new() -> Self {
            let host = Rc::new(RecordingHost::default());
            let dyn_host: Rc<dyn ListenerHost> = host.clone();
            let orch =
                CarouselOrchestrator::new(dyn_host, DragController::default(), ResponsiveGate::default());
            Self { host, orch }
        }

        fn mount(&mut self, id: &str, offset: f64) -> Rc<RefCell<FakeSurface>> {
            let fake = Rc::new(RefCell::new(FakeSurface {
                offset,
                content: 1000.0,
                viewport: 400.0,
                ..Default::default()
            }));
            let shared: SharedSurface = fake.clone();
            self.orch.register(InstanceId::from(id), handle_of(&shared));
            self.orch.on_frame();
            fake
        }
    }

    fn id(s: &str) -> InstanceId {
        InstanceId::from(s)
    }

    #[test]
    fn mount_measures_after_frame() {
        let mut fx = Fixture::new();
        let fake = Rc::new(RefCell::new(FakeSurface {
            content: 1000.0,
            viewport: 400.0,
            ..Default::default()
        }));
        let shared: SharedSurface = fake.clone();
        fx.orch.register(id("a"), handle_of(&shared));
        assert_eq!(fx.orch.scroll_state(&id("a")), ScrollState::default());

        fx.orch.on_frame();
        let state = fx.orch.scroll_state(&id("a"));
        assert!(state.has_overflow);
        assert!(state.at_start);
        assert!(!state.at_end);
    }

    #[test]
    fn mouse_drag_moves_opposite_to_pointer() {
        let mut fx = Fixture::new();
        let a = fx.mount("a", 100.0);
        assert!(fx.orch.on_drag_start(&id("a"), PointerInput::mouse(50.0, 0)));
        assert!(a.borrow().captured);

        assert!(fx.orch.on_drag_move(&id("a"), PointerInput::mouse(80.0, 0)));
        assert_eq!(a.borrow().offset, 40.0);

        assert!(fx.orch.on_drag_end(&id("a")));
        assert!(!a.borrow().captured);
        assert!(!fx.orch.on_drag_move(&id("a"), PointerInput::mouse(10.0, 0)));
        assert_eq!(a.borrow().offset, 40.0);
    }

    #[test]
    fn touch_drag_uses_documented_convention() {
        let mut fx = Fixture::new();
        let a = fx.mount("a", 100.0);
        assert!(fx.orch.on_drag_start(&id("a"), PointerInput::touch(50.0)));
        fx.orch.on_drag_move(&id("a"), PointerInput::touch(80.0));
        assert_eq!(a.borrow().offset, 40.0);
        assert!(fx.orch.on_drag_cancel(&id("a")));
    }

    #[test]
    fn moves_while_idle_do_nothing() {
        let mut fx = Fixture::new();
        let a = fx.mount("a", 100.0);
        for x in [0.0, 10.0, 500.0, -30.0] {
            assert!(!fx.orch.on_drag_move(&id("a"), PointerInput::mouse(x, 0)));
            assert!(!fx.orch.on_drag_move(&id("a"), PointerInput::touch(x)));
        }
        assert_eq!(a.borrow().offset, 100.0);
        assert_eq!(a.borrow().writes, 0);
    }

    #[test]
    fn non_primary_button_does_not_start() {
        let mut fx = Fixture::new();
        let a = fx.mount("a", 100.0);
        assert!(!fx.orch.on_drag_start(&id("a"), PointerInput::mouse(50.0, 2)));
        assert!(!fx.orch.is_dragging(&id("a")));
        assert!(!a.borrow().captured);
    }

    #[test]
    fn leave_ends_drag_and_idle_leave_is_noop() {
        let mut fx = Fixture::new();
        fx.mount("a", 0.0);
        assert!(!fx.orch.on_drag_leave(&id("a")));
        fx.orch.on_drag_start(&id("a"), PointerInput::mouse(5.0, 0));
        assert!(fx.orch.on_drag_leave(&id("a")));
        assert!(!fx.orch.is_dragging(&id("a")));
    }

    #[test]
    fn dragging_one_instance_leaves_others_alone() {
        let mut fx = Fixture::new();
        let a = fx.mount("a", 100.0);
        let b = fx.mount("b", 300.0);
        let b_state = fx.orch.scroll_state(&id("b"));

        fx.orch.on_drag_start(&id("a"), PointerInput::mouse(50.0, 0));
        for x in [60.0, 90.0, 20.0, 200.0] {
            fx.orch.on_drag_move(&id("a"), PointerInput::mouse(x, 0));
            fx.orch.on_scroll(&id("a"));
        }

        assert_ne!(a.borrow().offset, 100.0);
        assert_eq!(b.borrow().offset, 300.0);
        assert_eq!(b.borrow().writes, 0);
        assert_eq!(fx.orch.scroll_state(&id("b")), b_state);
        assert_eq!(
            fx.orch.registry().instance(&id("b")).map(Instance::drag_state),
            Some(DragState::Idle)
        );
    }

    #[test]
    fn unregistered_ids_are_inert() {
        let mut fx = Fixture::new();
        let a = fx.mount("a", 100.0);
        fx.orch.unregister(&id("a"));
        fx.orch.unregister(&id("a"));

        assert!(!fx.orch.page(&id("a"), PageDirection::Forward));
        assert!(!fx.orch.on_drag_start(&id("a"), PointerInput::mouse(0.0, 0)));
        assert!(!fx.orch.on_drag_move(&id("a"), PointerInput::mouse(80.0, 0)));
        assert!(!fx.orch.on_drag_end(&id("a")));
        fx.orch.on_scroll(&id("a"));
        assert_eq!(fx.orch.scroll_state(&id("a")), ScrollState::default());
        assert!(a.borrow().smooth_requests.is_empty());
        assert_eq!(a.borrow().writes, 0);
    }

    #[test]
    fn paging_requests_one_viewport_and_stops_at_bounds() {
        let mut fx = Fixture::new();
        let a = fx.mount("a", 0.0);
        assert!(!fx.orch.page(&id("a"), PageDirection::Backward));
        assert!(fx.orch.page(&id("a"), PageDirection::Forward));
        assert_eq!(a.borrow().smooth_requests, vec![400.0]);

        a.borrow_mut().offset = 600.0;
        assert!(!fx.orch.page(&id("a"), PageDirection::Forward));
        assert!(fx.orch.page(&id("a"), PageDirection::Backward));
        assert_eq!(a.borrow().smooth_requests, vec![400.0, -400.0]);
    }

    #[test]
    fn paging_is_refused_while_dragging() {
        let mut fx = Fixture::new();
        let a = fx.mount("a", 0.0);
        fx.orch.on_drag_start(&id("a"), PointerInput::mouse(50.0, 0));
        assert!(!fx.orch.page(&id("a"), PageDirection::Forward));
        assert!(a.borrow().smooth_requests.is_empty());

        fx.orch.on_drag_end(&id("a"));
        assert!(fx.orch.page(&id("a"), PageDirection::Forward));
        assert_eq!(a.borrow().smooth_requests, vec![400.0]);
    }

    #[test]
    fn detached_surface_is_noop_then_pruned() {
        let mut fx = Fixture::new();
        let a = fx.mount("a", 100.0);
        drop(a);
        assert!(!fx.orch.page(&id("a"), PageDirection::Forward));
        assert!(!fx.orch.on_drag_start(&id("a"), PointerInput::mouse(0.0, 0)));
        assert_eq!(fx.host.count(), 2);

        fx.orch.on_frame();
        assert!(!fx.orch.registry().contains(&id("a")));
        assert_eq!(fx.host.count(), 1);
    }

    #[test]
    fn scroll_event_recomputes_only_that_instance() {
        let mut fx = Fixture::new();
        let a = fx.mount("a", 0.0);
        let b = fx.mount("b", 0.0);
        a.borrow_mut().offset = 600.0;
        b.borrow_mut().offset = 600.0;

        fx.orch.on_scroll(&id("a"));
        assert!(fx.orch.scroll_state(&id("a")).at_end);
        assert!(!fx.orch.scroll_state(&id("b")).at_end);
    }

    #[test]
    fn resize_updates_gate_now_and_geometry_on_frame() {
        let mut fx = Fixture::new();
        let a = fx.mount("a", 0.0);
        assert!(!fx.orch.paging_affordance(&id("a"), PageDirection::Forward));

        a.borrow_mut().viewport = 1000.0;
        fx.orch.on_resize(1024.0);
        assert!(fx.orch.scroll_state(&id("a")).has_overflow);

        fx.orch.on_frame();
        assert!(!fx.orch.scroll_state(&id("a")).has_overflow);
        assert!(!fx.orch.paging_affordance(&id("a"), PageDirection::Forward));

        a.borrow_mut().viewport = 400.0;
        fx.orch.on_resize(1024.0);
        fx.orch.on_frame();
        assert!(fx.orch.paging_affordance(&id("a"), PageDirection::Forward));
        assert!(!fx.orch.paging_affordance(&id("a"), PageDirection::Backward));

        fx.orch.on_resize(767.0);
        assert!(!fx.orch.paging_affordance(&id("a"), PageDirection::Forward));
    }

    #[test]
    fn responsive_boundary() {
        let fx = Fixture::new();
        assert!(!fx.orch.is_paging_visible(767.0));
        assert!(fx.orch.is_paging_visible(768.0));
    }

    #[test]
    fn content_change_is_measured_after_layout() {
        let mut fx = Fixture::new();
        let a = fx.mount("a", 0.0);
        a.borrow_mut().content = 200.0;
        fx.orch.on_content_changed(&id("a"));
        assert!(fx.orch.scroll_state(&id("a")).has_overflow);
        fx.orch.on_frame();
        assert!(!fx.orch.scroll_state(&id("a")).has_overflow);
    }

    #[test]
    fn sync_catalog_unmounts_vanished_ids() {
        let mut fx = Fixture::new();
        let _a = fx.mount("1", 0.0);
        let _b = fx.mount("2", 0.0);
        assert_eq!(fx.host.count(), 3);

        let catalog = parse_catalog(r#"[{"id": 2, "name": "B"}, {"id": 3, "name": "C"}]"#);
        let to_mount = fx.orch.sync_catalog(&catalog);

        assert_eq!(to_mount, vec![id("3")]);
        assert!(!fx.orch.registry().contains(&id("1")));
        assert!(!fx.host.has(&ListenerTarget::Scroll(id("1"))));
        assert!(fx.host.has(&ListenerTarget::Scroll(id("2"))));
        assert_eq!(fx.host.count(), 2);
    }

    #[test]
    fn teardown_detaches_every_listener() {
        let mut fx = Fixture::new();
        let _a = fx.mount("a", 0.0);
        let _b = fx.mount("b", 0.0);
        assert_eq!(fx.host.count(), 3);
        fx.orch.teardown();
        assert_eq!(fx.host.count(), 0);
        assert!(fx.orch.registry().is_empty());
    }

    #[test]
    fn dropping_orchestrator_detaches_listeners() {
        let mut fx = Fixture::new();
        let _a = fx.mount("a", 0.0);
        let host = Rc::clone(&fx.host);
        drop(fx);
        assert_eq!(host.count(), 0);
    }
}
