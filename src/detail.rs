use crate::popup::{clear_centered, fit_text};
use crate::theme::{BASE_STYLE, TITLE_STYLE};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Text},
    widgets::{Block, Paragraph, Widget, Wrap},
};
use time::Date;

/// Narrowest the popup is drawn, so that short dates don't produce a cramped
/// box
const MIN_WIDTH: u16 = 30;

/// Popup listing the schedule entries for a single selected date
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct DayDetail {
    date: Date,
    events: Vec<String>,
}

impl DayDetail {
    pub(crate) fn new(date: Date, events: Vec<String>) -> DayDetail {
        DayDetail { date, events }
    }

    fn to_text(&self) -> Text<'_> {
        let mut lines = vec![
            Line::styled(format!("Selected date: {}", self.date), TITLE_STYLE),
            Line::raw(""),
        ];
        if self.events.is_empty() {
            lines.push(Line::raw("No schedule entries"));
        } else {
            lines.extend(self.events.iter().map(|ev| Line::raw(format!("• {ev}"))));
        }
        lines.push(Line::raw(""));
        lines.push(Line::raw("Press the Any Key to dismiss."));
        Text::from(lines)
    }
}

impl Widget for &DayDetail {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = self.to_text();
        let (width, height) = fit_text(&text, MIN_WIDTH, area);
        let detail_area = clear_centered(area, width, height, buf);
        Paragraph::new(text)
            .wrap(Wrap { trim: false })
            .block(
                Block::bordered()
                    .title(" Schedule ")
                    .title_alignment(Alignment::Center),
            )
            .style(BASE_STYLE)
            .render(detail_area, buf);
    }
}
