use crate::popup::{clear_centered, fit_text};
use crate::theme::{help::KEY_STYLE, BASE_STYLE};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Paragraph, Widget},
};

const KEY_WIDTH: usize = 16;

static KEYS: &[(&str, &str)] = &[
    ("h, LEFT", "Previous day"),
    ("l, RIGHT", "Next day"),
    ("k, UP", "Previous week"),
    ("j, DOWN", "Next week"),
    ("p, PAGE UP", "Previous month"),
    ("n, PAGE DOWN", "Next month"),
    ("0, HOME", "Jump to today"),
    ("g", "Input date to select"),
    ("ENTER", "Show selected day"),
    ("c", "Choose cell color"),
    ("?", "Show this help"),
    ("q, ESC", "Quit"),
];

/// Popup listing the key bindings of the calendar screen
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Help;

impl Help {
    fn to_text() -> Text<'static> {
        let mut lines = KEYS
            .iter()
            .map(|&(key, action)| {
                Line::from_iter([
                    Span::styled(format!("{key:<width$}", width = KEY_WIDTH), KEY_STYLE),
                    Span::raw(action),
                ])
            })
            .collect::<Vec<_>>();
        lines.push(Line::raw(""));
        lines.push(Line::raw("Press the Any Key to dismiss."));
        Text::from(lines)
    }
}

impl Widget for Help {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = Help::to_text();
        let (width, height) = fit_text(&text, 0, area);
        let help_area = clear_centered(area, width, height, buf);
        Paragraph::new(text)
            .block(
                Block::bordered()
                    .title(" Commands ")
                    .title_alignment(Alignment::Center),
            )
            .style(BASE_STYLE)
            .render(help_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render() {
        let area = Rect::new(0, 0, 60, 20);
        let mut buffer = Buffer::empty(area);
        Help.render(area, &mut buffer);
        let lines = (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>();
        // 14 lines of text plus borders, centered in 20 rows
        assert!(lines[2].contains(" Commands "), "{lines:?}");
        assert!(lines[3].contains("h, LEFT         Previous day"), "{lines:?}");
        assert!(lines[12].contains("c               Choose cell color"), "{lines:?}");
        assert!(lines[16].contains("Press the Any Key"), "{lines:?}");
    }
}
