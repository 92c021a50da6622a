//! Custom Ratatui widget that renders one category strip: a bordered row of
//! subitem cards shifted by the strip's horizontal offset, with optional
//! paging buttons at either edge.

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::Style,
    text::Line,
    widgets::{Block, Borders, Widget},
};

use crate::app::strip::{CARD_COLS, CARD_GAP};
use crate::core::catalog::Subitem;

use super::layout::PAGING_BUTTON_COLS;
use super::theme::Theme;

pub struct StripWidget<'a> {
    pub name: &'a str,
    pub items: &'a [Subitem],
    /// The category carries an image.
    pub has_image: bool,
    /// First visible content column.
    pub offset_cols: u16,
    pub focused: bool,
    pub dragging: bool,
    pub show_backward: bool,
    pub show_forward: bool,
}

impl<'a> Widget for StripWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.dragging {
            Theme::dragging_border_style()
        } else if self.focused {
            Theme::focused_border_style()
        } else {
            Theme::border_style()
        };
        let block = Block::default()
            .title(format!(
                " {}{} ({}) ",
                if self.has_image { "▣ " } else { "" },
                self.name,
                self.items.len()
            ))
            .title_style(Theme::title_style())
            .borders(Borders::ALL)
            .border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }
        if self.items.is_empty() {
            buf.set_line(inner.x, inner.y, &Line::styled("no items", Theme::empty_strip_style()), inner.width);
            return;
        }

        let pitch = CARD_COLS + CARD_GAP;
        for dx in 0..inner.width {
            let content_col = self.offset_cols as usize + dx as usize;
            let index = content_col / pitch as usize;
            let within = (content_col % pitch as usize) as u16;
            if index >= self.items.len() || within >= CARD_COLS {
                continue;
            }
            for dy in 0..inner.height.min(4) {
                let (ch, style) = card_cell(&self.items[index], within, dy);
                put(buf, inner.x + dx, inner.y + dy, ch, style);
            }
        }

        let mid = inner.y + inner.height.min(4) / 2;
        if self.show_backward {
            draw_button(buf, inner.x, mid, " ◀ ");
        }
        if self.show_forward && inner.width >= PAGING_BUTTON_COLS {
            draw_button(buf, inner.right() - PAGING_BUTTON_COLS, mid, " ▶ ");
        }
    }
}

/// Character at column `within` / row `row` of `item`'s card.
fn card_cell(item: &Subitem, within: u16, row: u16) -> (char, Style) {
    let last = CARD_COLS - 1;
    let border = Theme::card_border_style();
    match row {
        0 | 3 => {
            let ch = match (row, within) {
                (0, 0) => '┌',
                (0, w) if w == last => '┐',
                (3, 0) => '└',
                (3, w) if w == last => '┘',
                _ => '─',
            };
            (ch, border)
        }
        _ if within == 0 || within == last => ('│', border),
        1 => (text_char(&item.name, within - 1), Theme::card_name_style()),
        _ => {
            let marker = if item.image_url.is_some() { "▣ " } else { "" };
            let label = format!("{marker}#{}", item.id);
            (text_char(&label, within - 1), Theme::card_index_style())
        }
    }
}

/// `n`-th character of `text` padded with spaces; the last slot before the
/// card border shows `…` when the text is cut off.
fn text_char(text: &str, n: u16) -> char {
    let width = (CARD_COLS - 2) as usize;
    let n = n as usize;
    let count = text.chars().count();
    if count > width && n == width - 1 {
        return '…';
    }
    text.chars().nth(n).unwrap_or(' ')
}

fn draw_button(buf: &mut Buffer, x: u16, y: u16, label: &str) {
    for (i, ch) in label.chars().enumerate() {
        put(buf, x + i as u16, y, ch, Theme::paging_button_style());
    }
}

fn put(buf: &mut Buffer, x: u16, y: u16, ch: char, style: Style) {
    if let Some(cell) = buf.cell_mut(Position::new(x, y)) {
        cell.set_char(ch).set_style(style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (buf.area.x..buf.area.right())
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    fn items(names: &[&str]) -> Vec<Subitem> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| Subitem {
                id: i.to_string(),
                name: name.to_string(),
                image_url: (i == 0).then(|| "thumb.png".to_string()),
            })
            .collect()
    }

    #[test]
    fn renders_cards_from_offset() {
        let items = items(&["Apples", "Bananas", "Carrots"]);
        let area = Rect::new(0, 0, 30, 6);
        let mut buf = Buffer::empty(area);
        StripWidget {
            name: "Produce",
            items: &items,
            has_image: false,
            offset_cols: 20,
            focused: false,
            dragging: false,
            show_backward: false,
            show_forward: false,
        }
        .render(area, &mut buf);

        let names = row_text(&buf, 2);
        assert!(names.contains("Bananas"), "{names}");
        assert!(!names.contains("Apples"), "{names}");
        assert!(row_text(&buf, 0).contains("Produce (3)"));
        assert!(row_text(&buf, 3).contains("#1"));
    }

    #[test]
    fn image_markers_show_on_title_and_cards() {
        let items = items(&["Apples", "Bananas"]);
        let area = Rect::new(0, 0, 50, 6);
        let mut buf = Buffer::empty(area);
        StripWidget {
            name: "Produce",
            items: &items,
            has_image: true,
            offset_cols: 0,
            focused: false,
            dragging: false,
            show_backward: false,
            show_forward: false,
        }
        .render(area, &mut buf);

        assert!(row_text(&buf, 0).contains("▣ Produce"));
        let labels = row_text(&buf, 3);
        assert!(labels.contains("▣ #0"), "{labels}");
        assert!(labels.contains("#1"), "{labels}");
    }

    #[test]
    fn paging_buttons_sit_on_inner_edges() {
        let items = items(&["A"; 10]);
        let area = Rect::new(0, 0, 40, 6);
        let mut buf = Buffer::empty(area);
        StripWidget {
            name: "X",
            items: &items,
            has_image: true,
            offset_cols: 0,
            focused: true,
            dragging: false,
            show_backward: true,
            show_forward: true,
        }
        .render(area, &mut buf);

        let row = row_text(&buf, 3);
        let chars: Vec<char> = row.chars().collect();
        assert_eq!(chars[2], '◀');
        assert_eq!(chars[37], '▶');
    }

    #[test]
    fn long_names_are_truncated_with_ellipsis() {
        let name = "Extraordinarily long produce";
        assert_eq!(text_char(name, 0), 'E');
        assert_eq!(text_char(name, CARD_COLS - 3), '…');
        assert_eq!(text_char("Kale", 10), ' ');
    }
}
