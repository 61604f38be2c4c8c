use crate::theme::BASE_STYLE;
use ratatui::{
    buffer::Buffer,
    layout::{Flex, Layout, Rect},
    text::Text,
    widgets::{Block, Clear, Widget},
};

/// Outer size (borders included) of a bordered popup wrapping `text`, no
/// narrower than `min_width` columns of content and no larger than `area`
pub(crate) fn fit_text(text: &Text<'_>, min_width: u16, area: Rect) -> (u16, u16) {
    let width = u16::try_from(text.width())
        .unwrap_or(u16::MAX)
        .max(min_width)
        .saturating_add(2)
        .min(area.width);
    let height = u16::try_from(text.height())
        .unwrap_or(u16::MAX)
        .saturating_add(2)
        .min(area.height);
    (width, height)
}

/// Blank out a `width`×`height` box in the middle of `area`, plus one column
/// of margin on either side, and return the box for the popup to draw in
pub(crate) fn clear_centered(area: Rect, width: u16, height: u16, buf: &mut Buffer) -> Rect {
    let [popup_area] = Layout::horizontal([width]).flex(Flex::Center).areas(area);
    let [popup_area] = Layout::vertical([height])
        .flex(Flex::Center)
        .areas(popup_area);
    let outer_area = Rect {
        x: popup_area.x.saturating_sub(1),
        width: popup_area.width.saturating_add(2),
        ..popup_area
    }
    .intersection(area);
    Clear.render(outer_area, buf);
    Block::new().style(BASE_STYLE).render(outer_area, buf);
    popup_area
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::text::Line;

    #[test]
    fn test_fit_text() {
        let text = Text::from_iter([Line::raw("abc"), Line::raw("defgh")]);
        let area = Rect::new(0, 0, 40, 10);
        assert_eq!(fit_text(&text, 0, area), (7, 4));
        assert_eq!(fit_text(&text, 10, area), (12, 4));
        assert_eq!(fit_text(&text, 50, area), (40, 4));
    }

    #[test]
    fn test_clear_centered() {
        let area = Rect::new(0, 0, 20, 10);
        let mut buffer = Buffer::filled(area, ratatui::buffer::Cell::new("x"));
        let popup = clear_centered(area, 6, 4, &mut buffer);
        assert_eq!(popup, Rect::new(7, 3, 6, 4));
        assert_eq!(buffer[(6, 3)].symbol(), " ");
        assert_eq!(buffer[(13, 6)].symbol(), " ");
        assert_eq!(buffer[(5, 3)].symbol(), "x");
        assert_eq!(buffer[(7, 2)].symbol(), "x");
    }
}
