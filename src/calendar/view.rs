use super::grid::{build_month_grid, MonthGrid};
use super::yearmonth::{OutOfTimeError, YearMonth};
use crate::schedule::EventStore;
use crate::theme::ViewColor;
use thiserror::Error;
use time::{error::ComponentRange, Date, Duration, Month};

/// Everything the month view needs to draw itself: the session's events, the
/// month on display, the highlighted date, and the cell color.
///
/// The grid is rebuilt from scratch whenever the displayed month changes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct CalendarView {
    events: EventStore,
    today: Date,
    shown: YearMonth,
    cursor: Date,
    color: ViewColor,
    grid: MonthGrid,
}

impl CalendarView {
    pub(crate) fn new(today: Date, events: EventStore) -> Result<CalendarView, OutOfTimeError> {
        let shown = YearMonth::from_date(today)?;
        let grid = build_month_grid(shown, events.events());
        Ok(CalendarView {
            events,
            today,
            shown,
            cursor: today,
            color: ViewColor::default(),
            grid,
        })
    }

    /// Open the view on the month containing `date` instead of today's
    pub(crate) fn start_date(mut self, date: Date) -> Result<CalendarView, OutOfTimeError> {
        let ym = YearMonth::from_date(date)?;
        self.show(ym, date);
        Ok(self)
    }

    pub(crate) fn today(&self) -> Date {
        self.today
    }

    #[cfg(test)]
    pub(crate) fn shown(&self) -> YearMonth {
        self.shown
    }

    pub(crate) fn cursor(&self) -> Date {
        self.cursor
    }

    pub(crate) fn color(&self) -> ViewColor {
        self.color
    }

    pub(crate) fn grid(&self) -> &MonthGrid {
        &self.grid
    }

    pub(crate) fn next_month(&mut self) -> Result<(), OutOfTimeError> {
        let ym = self.shown.next().ok_or(OutOfTimeError)?;
        log::info!("Moving to next month: {ym}");
        self.show(ym, self.default_cursor(ym));
        Ok(())
    }

    pub(crate) fn previous_month(&mut self) -> Result<(), OutOfTimeError> {
        let ym = self.shown.previous().ok_or(OutOfTimeError)?;
        log::info!("Moving to previous month: {ym}");
        self.show(ym, self.default_cursor(ym));
        Ok(())
    }

    pub(crate) fn jump_to_today(&mut self) {
        if let Ok(ym) = YearMonth::from_date(self.today) {
            self.show(ym, self.today);
        }
    }

    /// Move the highlighted date by the given number of days, switching to
    /// the new date's month if it leaves the one on display
    pub(crate) fn move_cursor(&mut self, days: i64) -> Result<(), OutOfTimeError> {
        let date = self
            .cursor
            .checked_add(Duration::days(days))
            .ok_or(OutOfTimeError)?;
        self.goto(date)
    }

    /// Validate a year, month number, and day, and make the resulting date
    /// the highlighted one
    pub(crate) fn select_date(
        &mut self,
        year: i32,
        month: u8,
        day: u8,
    ) -> Result<Date, SelectDateError> {
        let m = Month::try_from(month).map_err(|_| SelectDateError::Month(month))?;
        let date = Date::from_calendar_date(year, m, day).map_err(|source| {
            SelectDateError::Date {
                year,
                month,
                day,
                source,
            }
        })?;
        self.goto(date)?;
        log::info!("Selected date {date}");
        Ok(date)
    }

    pub(crate) fn set_view_color(&mut self, color: ViewColor) {
        self.color = color;
    }

    fn goto(&mut self, date: Date) -> Result<(), OutOfTimeError> {
        let ym = YearMonth::from_date(date)?;
        if ym == self.shown {
            self.cursor = date;
        } else {
            self.show(ym, date);
        }
        Ok(())
    }

    fn show(&mut self, ym: YearMonth, cursor: Date) {
        self.shown = ym;
        self.cursor = cursor;
        self.grid = build_month_grid(ym, self.events.events());
    }

    fn default_cursor(&self, ym: YearMonth) -> Date {
        if ym.contains(self.today) {
            self.today
        } else {
            ym.first_day()
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum SelectDateError {
    #[error("{0} is not a valid month")]
    Month(u8),
    #[error("{year}-{month:02}-{day:02} is not a valid date")]
    Date {
        year: i32,
        month: u8,
        day: u8,
        source: ComponentRange,
    },
    #[error(transparent)]
    OutOfTime(#[from] OutOfTimeError),
}
