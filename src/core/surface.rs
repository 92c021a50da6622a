//! The scrollable element contract.
//!
//! Surfaces are owned by the rendering layer.  The engine only ever holds a
//! [`SurfaceHandle`] (a `Weak`), so a surface can disappear at any time and
//! every consumer must treat a failed upgrade as "detached", not as a fault.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::scroll_state::ScrollGeometry;

/// A horizontally scrollable viewport rendered by the platform.
pub trait ScrollSurface {
    /// Current committed geometry (offset, content and viewport extents).
    fn geometry(&self) -> ScrollGeometry;

    /// Jump to `offset` immediately.  Implementations clamp to their bounds
    /// and emit a native scroll event if the offset actually changed.
    fn set_scroll_offset(&mut self, offset: f64);

    /// Offset the surface is heading to.  Differs from the committed offset
    /// only while a smooth scroll is in flight.
    fn scroll_target(&self) -> f64 {
        self.geometry().scroll_offset
    }

    /// Request an animated scroll by `delta`, relative to [`scroll_target`].
    ///
    /// [`scroll_target`]: ScrollSurface::scroll_target
    fn smooth_scroll_by(&mut self, delta: f64);

    /// While `true`, the platform's own scroll/selection handling for the
    /// active gesture is suppressed so it does not fight the drag.
    fn set_gesture_capture(&mut self, captured: bool);
}

/// Shared ownership form the rendering layer keeps.
pub type SharedSurface = Rc<RefCell<dyn ScrollSurface>>;

/// Non-owning form the engine keeps.
pub type SurfaceHandle = Weak<RefCell<dyn ScrollSurface>>;

/// Downgrade a shared surface into the handle the engine stores.
pub fn handle_of(surface: &SharedSurface) -> SurfaceHandle {
    Rc::downgrade(surface)
}
