//! Pointer-driven drag scrolling.
//!
//! One [`DragState`] lives inside each registry instance; the
//! [`DragController`] holds only tunables and is shared by every instance,
//! so a drag on one strip can never observe another strip's state.
//!
//! Mouse and touch keep separate sign conventions in [`DragController::target_offset`]:
//!
//! * mouse: `delta = (x - origin_x) * s`, offset `= origin - delta`
//! * touch: `delta = (origin_x - x) * s`, offset `= origin + delta`
//!
//! For equal pointer travel the two formulas land on the same offset.

/// Default multiplier applied to pointer travel.
pub const DRAG_SENSITIVITY: f64 = 2.0;

/// Button code of the primary mouse button.
pub const PRIMARY_BUTTON: u8 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerSource {
    Mouse,
    // Terminals deliver no touch events; kept for touch-capable front ends.
    #[allow(dead_code)]
    Touch,
}

/// A normalised pointer sample.  `button` is only meaningful for mouse
/// input (0 primary, 1 auxiliary, 2 secondary).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    pub source: PointerSource,
    pub x: f64,
    pub button: u8,
}

impl PointerInput {
    pub fn mouse(x: f64, button: u8) -> Self {
        Self {
            source: PointerSource::Mouse,
            x,
            button,
        }
    }

    #[allow(dead_code)]
    pub fn touch(x: f64) -> Self {
        Self {
            source: PointerSource::Touch,
            x,
            button: PRIMARY_BUTTON,
        }
    }
}

/// Per-instance drag state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        origin_pointer_x: f64,
        origin_scroll_offset: f64,
    },
}

impl DragState {
    pub fn is_active(&self) -> bool {
        matches!(self, DragState::Dragging { .. })
    }
}

/// Stateless transition logic for [`DragState`].
#[derive(Debug, Clone, Copy)]
pub struct DragController {
    sensitivity: f64,
}

impl Default for DragController {
    fn default() -> Self {
        Self::new(DRAG_SENSITIVITY)
    }
}

impl DragController {
    pub fn new(sensitivity: f64) -> Self {
        Self { sensitivity }
    }

    /// `Idle -> Dragging`.  Ignored while already dragging, and for mouse
    /// presses of anything but the primary button.  Returns whether the
    /// drag started.
    pub fn start(&self, state: &mut DragState, input: PointerInput, current_offset: f64) -> bool {
        if state.is_active() {
            return false;
        }
        if input.source == PointerSource::Mouse && input.button != PRIMARY_BUTTON {
            return false;
        }
        *state = DragState::Dragging {
            origin_pointer_x: input.x,
            origin_scroll_offset: current_offset,
        };
        true
    }

    /// New scroll offset for a move sample, or `None` when not dragging.
    pub fn drag_to(&self, state: &DragState, input: PointerInput) -> Option<f64> {
        match *state {
            DragState::Idle => None,
            DragState::Dragging {
                origin_pointer_x,
                origin_scroll_offset,
            } => Some(self.target_offset(
                input.source,
                origin_pointer_x,
                origin_scroll_offset,
                input.x,
            )),
        }
    }

    /// `Dragging -> Idle` for end, leave and cancel.  Returns whether a drag
    /// was actually active.
    pub fn release(&self, state: &mut DragState) -> bool {
        let was_active = state.is_active();
        *state = DragState::Idle;
        was_active
    }

    fn target_offset(&self, source: PointerSource, origin_x: f64, origin_offset: f64, x: f64) -> f64 {
        match source {
            PointerSource::Mouse => {
                let delta = (x - origin_x) * self.sensitivity;
                origin_offset - delta
            }
            PointerSource::Touch => {
                let delta = (origin_x - x) * self.sensitivity;
                origin_offset + delta
            }
        }
    }
}
