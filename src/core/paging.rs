//! One-viewport-width programmatic scrolling.

use super::scroll_state::ScrollGeometry;
use super::surface::ScrollSurface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDirection {
    Backward,
    Forward,
}

impl PageDirection {
    fn sign(self) -> f64 {
        match self {
            PageDirection::Backward => -1.0,
            PageDirection::Forward => 1.0,
        }
    }
}

/// Signed scroll delta for one page from `geometry`, trimmed so the target
/// stays within `[0, content - viewport]`.  Zero at the matching boundary.
pub fn page_delta(geometry: ScrollGeometry, direction: PageDirection) -> f64 {
    let current = geometry.scroll_offset;
    let target = (current + direction.sign() * geometry.viewport_extent)
        .clamp(0.0, geometry.max_offset());
    target - current
}

/// Request a smooth page scroll on `surface`.  The page is measured from
/// where any running animation will land, so repeated requests stack.
/// Returns the requested delta, or `None` when already at the boundary in
/// that direction.
pub fn page(surface: &mut dyn ScrollSurface, direction: PageDirection) -> Option<f64> {
    let geometry = ScrollGeometry {
        scroll_offset: surface.scroll_target(),
        ..surface.geometry()
    };
    let delta = page_delta(geometry, direction);
    if delta == 0.0 {
        return None;
    }
    surface.smooth_scroll_by(delta);
    Some(delta)
}
