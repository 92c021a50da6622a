//! UI / rendering layer: everything that touches Ratatui widgets.
//!
//! Reads the engine's derived state through `AppState`; never mutates it.

pub mod layout;
pub mod smooth_scroll;
pub mod strip_widget;
pub mod theme;

use ratatui::{widgets::Paragraph, Frame};

use crate::app::state::AppState;
use crate::core::paging::PageDirection;

use self::layout::AppLayout;
use self::strip_widget::StripWidget;
use self::theme::Theme;

/// Draw the whole screen.
pub fn render(frame: &mut Frame, state: &AppState) {
    let layout = AppLayout::from_area(frame.area());

    let visible = state.strips.iter().enumerate().skip(state.first_visible);
    for (slot, (index, strip)) in visible.enumerate() {
        let Some(rect) = layout.strip_rect(slot) else {
            break;
        };
        let orch = &state.orchestrator;
        let widget = StripWidget {
            name: &strip.name,
            items: &strip.items,
            has_image: strip.has_image,
            offset_cols: strip.surface.borrow().offset_cols(),
            focused: index == state.focused,
            dragging: orch.is_dragging(&strip.id),
            show_backward: orch.paging_affordance(&strip.id, PageDirection::Backward),
            show_forward: orch.paging_affordance(&strip.id, PageDirection::Forward),
        };
        frame.render_widget(widget, rect);
    }

    if state.orchestrator.registry().is_empty() && state.load_error.is_none() {
        frame.render_widget(
            Paragraph::new("  catalog is empty").style(Theme::empty_strip_style()),
            layout.strips_area,
        );
    }

    let status = match &state.load_error {
        Some(err) => Paragraph::new(format!(" {err}")).style(Theme::error_bar_style()),
        None => {
            let mut hint = state.config.status_bar_hint();
            if !state.orchestrator.is_paging_visible(state.viewport_width_px()) {
                hint.push_str(" | ◀ ▶ hidden: window too narrow");
            }
            let text = match &state.status_message {
                Some(msg) => format!(" {msg} | {hint}"),
                None => format!(" {hint}"),
            };
            Paragraph::new(text).style(Theme::status_bar_style())
        }
    };
    frame.render_widget(status, layout.status_area);
}
