//! Layout helpers: split the terminal into a stack of strips and a status bar.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Rows per strip: outer border (2) around a four-row card.
pub const STRIP_HEIGHT: u16 = 6;
/// Columns taken by each paging button at the strip's inner edges.
pub const PAGING_BUTTON_COLS: u16 = 3;

/// Which part of a strip a point falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StripZone {
    BackwardButton,
    ForwardButton,
    Body,
}

pub struct AppLayout {
    pub strips_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(STRIP_HEIGHT), // strips
                Constraint::Length(1),         // status bar
            ])
            .split(area);

        Self {
            strips_area: chunks[0],
            status_area: chunks[1],
        }
    }

    /// Inner width of every strip (inside its border).
    pub fn strip_viewport_cols(&self) -> u16 {
        self.strips_area.width.saturating_sub(2)
    }

    pub fn visible_strip_count(&self) -> usize {
        (self.strips_area.height / STRIP_HEIGHT) as usize
    }

    /// Outer rect of the strip drawn in `slot` (0 = topmost visible).
    pub fn strip_rect(&self, slot: usize) -> Option<Rect> {
        if slot >= self.visible_strip_count() {
            return None;
        }
        Some(Rect::new(
            self.strips_area.x,
            self.strips_area.y + slot as u16 * STRIP_HEIGHT,
            self.strips_area.width,
            STRIP_HEIGHT,
        ))
    }

    /// Slot and zone under `(column, row)`, if it hits a strip.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<(usize, StripZone)> {
        let area = self.strips_area;
        if column < area.x || column >= area.right() || row < area.y || row >= area.bottom() {
            return None;
        }
        let slot = ((row - area.y) / STRIP_HEIGHT) as usize;
        let rect = self.strip_rect(slot)?;

        let inner_left = rect.x + 1;
        let inner_right = rect.right().saturating_sub(1);
        let zone = if column >= inner_left && column < inner_left + PAGING_BUTTON_COLS {
            StripZone::BackwardButton
        } else if column < inner_right && column + PAGING_BUTTON_COLS >= inner_right {
            StripZone::ForwardButton
        } else {
            StripZone::Body
        };
        Some((slot, zone))
    }
}
