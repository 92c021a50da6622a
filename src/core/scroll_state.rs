//! Overflow and boundary flags derived from viewport geometry.
//!
//! Everything here is a pure function of a [`ScrollGeometry`] snapshot, so
//! recomputing is idempotent and can be triggered as often as the platform
//! likes (mount, resize, native scroll, content change).

/// Sub-pixel rounding slack applied to the trailing boundary.
pub const END_EPSILON: f64 = 1.0;

/// Measured geometry of one scrollable strip along its scroll axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollGeometry {
    pub scroll_offset: f64,
    pub content_extent: f64,
    pub viewport_extent: f64,
}

impl ScrollGeometry {
    pub fn new(scroll_offset: f64, content_extent: f64, viewport_extent: f64) -> Self {
        Self {
            scroll_offset,
            content_extent,
            viewport_extent,
        }
    }

    /// Largest reachable offset (`0` when the content fits).
    pub fn max_offset(&self) -> f64 {
        (self.content_extent - self.viewport_extent).max(0.0)
    }
}

/// Derived flags consumed by the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollState {
    pub has_overflow: bool,
    pub at_start: bool,
    pub at_end: bool,
}

/// Derive the scroll flags for `geometry`.
pub fn recompute(geometry: ScrollGeometry) -> ScrollState {
    let ScrollGeometry {
        scroll_offset,
        content_extent,
        viewport_extent,
    } = geometry;

    ScrollState {
        has_overflow: content_extent > viewport_extent,
        at_start: scroll_offset == 0.0,
        at_end: scroll_offset >= content_extent - viewport_extent - END_EPSILON,
    }
}
