use super::grid::{DayCell, MonthOffset};
use super::view::CalendarView;
use super::yearmonth::DAYS_IN_WEEK;
use crate::theme::{CELL_TEXT, CURSOR_MODIFIER, TITLE_STYLE, TODAY_MODIFIER, WEEKDAY_STYLE};
use ratatui::{prelude::*, widgets::*};
use std::iter::zip;

static WEEKDAYS: [&str; DAYS_IN_WEEK] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

/// Number of lines taken up by the month name above the weekday header
const TITLE_LINES: u16 = 1;

/// Number of lines taken up by the weekday header
const HEADER_LINES: u16 = 1;

/// Columns left blank to the right of each day cell so that cells of the same
/// color remain distinguishable
const CELL_GAP: u16 = 1;

/// Draws the grid of the month currently shown by a [`CalendarView`], one
/// colored block per day
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct MonthCalendar;

impl StatefulWidget for MonthCalendar {
    type State = CalendarView;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let [title_area, header_area, grid_area] = Layout::vertical([
            Constraint::Length(TITLE_LINES),
            Constraint::Length(HEADER_LINES),
            Constraint::Min(0),
        ])
        .areas(area);
        let grid = state.grid();
        Line::styled(grid.month().to_string(), TITLE_STYLE)
            .centered()
            .render(title_area, buf);

        let columns = Layout::horizontal([Constraint::Ratio(1, 7); DAYS_IN_WEEK]);
        for (name, col) in zip(WEEKDAYS, columns.split(header_area).iter()) {
            Line::styled(name, WEEKDAY_STYLE)
                .centered()
                .render(cell_area(*col), buf);
        }

        let week_qty = grid.week_count();
        let ratio = u32::try_from(week_qty).unwrap_or(u32::MAX);
        let rows = Layout::vertical(vec![Constraint::Ratio(1, ratio); week_qty]).split(grid_area);
        for (week, row) in zip(grid.weeks(), rows.iter()) {
            for (cell, col) in zip(week, columns.split(*row).iter()) {
                draw_cell(cell, state, cell_area(*col), buf);
            }
        }
    }
}

fn cell_area(column: Rect) -> Rect {
    Rect {
        width: column.width.saturating_sub(CELL_GAP),
        ..column
    }
}

fn draw_cell(cell: &DayCell, view: &CalendarView, area: Rect, buf: &mut Buffer) {
    let bg = match cell.offset() {
        MonthOffset::Current => view.color(),
        MonthOffset::Previous | MonthOffset::Next => view.color().dimmed(),
    };
    let mut style = Style::new().fg(CELL_TEXT).bg(bg.into());
    if cell.date() == view.today() {
        style = style.add_modifier(TODAY_MODIFIER);
    }
    if cell.date() == view.cursor() {
        style = style.add_modifier(CURSOR_MODIFIER);
    }
    Paragraph::new(cell.label())
        .style(style)
        .wrap(Wrap { trim: true })
        .block(Block::new().padding(Padding::horizontal(1)))
        .render(area, buf);
}
