//! Terminal-side scroll surface for one category strip.
//!
//! Geometry is kept in pixels (columns × configured cell width) so the
//! engine's pixel constants apply unchanged.  Any committed offset change
//! raises a pending native scroll event that the event loop forwards to
//! whoever is listening.

use crate::core::scroll_state::ScrollGeometry;
use crate::core::surface::ScrollSurface;
use crate::ui::smooth_scroll::SmoothScroll;

/// Card width in columns.
pub const CARD_COLS: u16 = 18;
/// Gap between cards in columns.
pub const CARD_GAP: u16 = 2;

#[derive(Debug)]
pub struct StripSurface {
    item_count: usize,
    viewport_cols: u16,
    cell_width: f64,
    scroll: SmoothScroll,
    captured: bool,
    scrolled: bool,
}

impl StripSurface {
    pub fn new(item_count: usize, cell_width: f64, scroll_speed: f64) -> Self {
        Self {
            item_count,
            viewport_cols: 0,
            cell_width,
            scroll: SmoothScroll::new(scroll_speed),
            captured: false,
            scrolled: false,
        }
    }

    pub fn content_cols(&self) -> u16 {
        let n = self.item_count.min(u16::MAX as usize / (CARD_COLS + CARD_GAP) as usize) as u16;
        (n * (CARD_COLS + CARD_GAP)).saturating_sub(CARD_GAP)
    }

    fn max_offset(&self) -> f64 {
        self.geometry().max_offset()
    }

    /// Replace the item count; returns whether it changed.
    pub fn set_item_count(&mut self, item_count: usize) -> bool {
        if self.item_count == item_count {
            return false;
        }
        self.item_count = item_count;
        self.reclamp();
        true
    }

    /// Commit the laid-out viewport width.
    pub fn set_viewport_cols(&mut self, cols: u16) {
        if self.viewport_cols != cols {
            self.viewport_cols = cols;
            self.reclamp();
        }
    }

    fn reclamp(&mut self) {
        let clamped = self.scroll.current().clamp(0.0, self.max_offset());
        if clamped != self.scroll.current() {
            self.commit(clamped);
        }
    }

    fn commit(&mut self, offset: f64) {
        if offset != self.scroll.current() {
            self.scrolled = true;
        }
        self.scroll.jump_to(offset);
    }

    /// First visible content column.
    pub fn offset_cols(&self) -> u16 {
        (self.scroll.current() / self.cell_width).round() as u16
    }

    /// Wheel scrolling handled by the surface itself.  Suppressed while a
    /// drag holds the gesture.
    pub fn scroll_natively(&mut self, delta_px: f64) {
        if self.captured {
            return;
        }
        let target = (self.scroll.current() + delta_px).clamp(0.0, self.max_offset());
        self.commit(target);
    }

    /// Advance the smooth-scroll animation by one frame.
    pub fn tick(&mut self) {
        if self.scroll.tick() {
            self.scrolled = true;
        }
    }

    pub fn is_animating(&self) -> bool {
        self.scroll.is_animating()
    }

    pub fn is_captured(&self) -> bool {
        self.captured
    }

    /// Consume the pending native scroll event, if any.
    pub fn take_scrolled(&mut self) -> bool {
        std::mem::take(&mut self.scrolled)
    }
}

impl ScrollSurface for StripSurface {
    fn geometry(&self) -> ScrollGeometry {
        ScrollGeometry::new(
            self.scroll.current(),
            f64::from(self.content_cols()) * self.cell_width,
            f64::from(self.viewport_cols) * self.cell_width,
        )
    }

    fn set_scroll_offset(&mut self, offset: f64) {
        let clamped = offset.clamp(0.0, self.max_offset());
        self.commit(clamped);
    }

    fn scroll_target(&self) -> f64 {
        self.scroll.target()
    }

    fn smooth_scroll_by(&mut self, delta: f64) {
        if self.captured {
            return;
        }
        let max = self.max_offset();
        self.scroll.retarget_by(delta, max);
    }

    fn set_gesture_capture(&mut self, captured: bool) {
        self.captured = captured;
    }
}
