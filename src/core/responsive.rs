//! Viewport-width gate for paging affordances.

use super::paging::PageDirection;
use super::scroll_state::ScrollState;

/// Narrowest viewport (px) that still shows paging buttons.
pub const PAGING_BREAKPOINT: f64 = 768.0;

#[derive(Debug, Clone, Copy)]
pub struct ResponsiveGate {
    breakpoint: f64,
    visible: bool,
}

impl Default for ResponsiveGate {
    fn default() -> Self {
        Self::new(PAGING_BREAKPOINT)
    }
}

impl ResponsiveGate {
    /// Starts hidden until the first width is reported.
    pub fn new(breakpoint: f64) -> Self {
        Self {
            breakpoint,
            visible: false,
        }
    }

    pub fn visible_at(&self, viewport_width: f64) -> bool {
        viewport_width >= self.breakpoint
    }

    /// Re-evaluate on resize.  Returns the new flag.
    pub fn update(&mut self, viewport_width: f64) -> bool {
        self.visible = self.visible_at(viewport_width);
        self.visible
    }

    #[cfg(test)]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether the paging button for `direction` should be drawn.
    pub fn shows_button(&self, state: ScrollState, direction: PageDirection) -> bool {
        let blocked = match direction {
            PageDirection::Backward => state.at_start,
            PageDirection::Forward => state.at_end,
        };
        self.visible && state.has_overflow && !blocked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoint_is_inclusive() {
        let gate = ResponsiveGate::default();
        assert!(!gate.visible_at(767.0));
        assert!(gate.visible_at(768.0));
    }

    #[test]
    fn update_tracks_last_width() {
        let mut gate = ResponsiveGate::default();
        assert!(!gate.is_visible());
        assert!(gate.update(1024.0));
        assert!(gate.is_visible());
        assert!(!gate.update(500.0));
        assert!(!gate.is_visible());
    }

    #[test]
    fn buttons_need_gate_overflow_and_open_boundary() {
        let mut gate = ResponsiveGate::default();
        gate.update(1024.0);

        let middle = ScrollState {
            has_overflow: true,
            at_start: false,
            at_end: false,
        };
        assert!(gate.shows_button(middle, PageDirection::Backward));
        assert!(gate.shows_button(middle, PageDirection::Forward));

        let start = ScrollState { at_start: true, ..middle };
        assert!(!gate.shows_button(start, PageDirection::Backward));
        assert!(gate.shows_button(start, PageDirection::Forward));

        let fits = ScrollState {
            has_overflow: false,
            ..middle
        };
        assert!(!gate.shows_button(fits, PageDirection::Forward));

        gate.update(700.0);
        assert!(!gate.shows_button(middle, PageDirection::Forward));
    }
}
