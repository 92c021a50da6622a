//! Input handling: maps key/mouse events to engine calls and state changes.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::config::Action;
use crate::core::drag::PointerInput;
use crate::core::paging::PageDirection;
use crate::core::registry::InstanceId;
use crate::ui::layout::{AppLayout, StripZone};

use super::state::AppState;

/// Columns scrolled per horizontal wheel notch.
const WHEEL_COLS: f64 = 4.0;

pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    // Ctrl+c always quits.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    let Some(action) = state.config.match_key(key) else {
        return;
    };

    match action {
        Action::Quit => state.should_quit = true,
        Action::PageBackward => page_focused(state, PageDirection::Backward),
        Action::PageForward => page_focused(state, PageDirection::Forward),
        Action::FocusPrev => {
            state.focused = state.focused.saturating_sub(1);
        }
        Action::FocusNext => {
            if state.focused + 1 < state.strips.len() {
                state.focused += 1;
            }
        }
        Action::Reload => state.reload(),
    }
}

fn page_focused(state: &mut AppState, direction: PageDirection) {
    if let Some(id) = state.focused_id().cloned() {
        state.orchestrator.page(&id, direction);
    }
}

/// Strip id and zone under the pointer.
fn hit(state: &AppState, column: u16, row: u16) -> Option<(usize, InstanceId, StripZone)> {
    let layout = AppLayout::from_area(state.terminal_area);
    let (slot, zone) = layout.hit_test(column, row)?;
    let index = state.first_visible + slot;
    let strip = state.strips.get(index)?;
    Some((index, strip.id.clone(), zone))
}

/// Track which strip the pointer is over; leaving one ends its drag.
fn update_hover(state: &mut AppState, now: Option<&InstanceId>) {
    if state.hovered.as_ref() == now {
        return;
    }
    if let Some(previous) = state.hovered.take() {
        state.orchestrator.on_drag_leave(&previous);
    }
    state.hovered = now.cloned();
}

fn button_code(button: MouseButton) -> u8 {
    match button {
        MouseButton::Left => 0,
        MouseButton::Middle => 1,
        MouseButton::Right => 2,
    }
}

pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    let target = hit(state, mouse.column, mouse.row);
    let x = f64::from(mouse.column) * state.config.cell_width;

    match mouse.kind {
        MouseEventKind::Down(button) => {
            update_hover(state, target.as_ref().map(|(_, id, _)| id));
            let Some((index, id, zone)) = target else {
                return;
            };
            state.focused = index;

            let direction = match zone {
                StripZone::BackwardButton => Some(PageDirection::Backward),
                StripZone::ForwardButton => Some(PageDirection::Forward),
                StripZone::Body => None,
            };
            if let Some(direction) = direction {
                if button == MouseButton::Left
                    && state.orchestrator.paging_affordance(&id, direction)
                {
                    state.orchestrator.page(&id, direction);
                    return;
                }
            }
            state
                .orchestrator
                .on_drag_start(&id, PointerInput::mouse(x, button_code(button)));
        }
        MouseEventKind::Drag(_) | MouseEventKind::Moved => {
            update_hover(state, target.as_ref().map(|(_, id, _)| id));
            if let Some(id) = state.hovered.clone() {
                let button = match mouse.kind {
                    MouseEventKind::Drag(b) => button_code(b),
                    _ => 0,
                };
                state.orchestrator.on_drag_move(&id, PointerInput::mouse(x, button));
            }
        }
        MouseEventKind::Up(_) => {
            if let Some(id) = state.hovered.clone() {
                state.orchestrator.on_drag_end(&id);
            }
        }
        MouseEventKind::ScrollLeft => wheel(state, target, -1.0),
        MouseEventKind::ScrollRight => wheel(state, target, 1.0),
        MouseEventKind::ScrollUp if mouse.modifiers.contains(KeyModifiers::SHIFT) => {
            wheel(state, target, -1.0)
        }
        MouseEventKind::ScrollDown if mouse.modifiers.contains(KeyModifiers::SHIFT) => {
            wheel(state, target, 1.0)
        }
        MouseEventKind::ScrollUp => {
            state.focused = state.focused.saturating_sub(1);
        }
        MouseEventKind::ScrollDown => {
            if state.focused + 1 < state.strips.len() {
                state.focused += 1;
            }
        }
    }
}

/// The window lost focus mid-gesture: cancel whatever drag is in flight.
pub fn handle_focus_lost(state: &mut AppState) {
    if let Some(id) = state.hovered.take() {
        state.orchestrator.on_drag_cancel(&id);
    }
}

/// Horizontal wheel: the surface scrolls itself, the engine hears about it
/// through the native scroll event.
fn wheel(state: &mut AppState, target: Option<(usize, InstanceId, StripZone)>, sign: f64) {
    let Some((index, _, _)) = target else {
        return;
    };
    let delta = sign * WHEEL_COLS * state.config.cell_width;
    state.strips[index].surface.borrow_mut().scroll_natively(delta);
}
