use super::yearmonth::{YearMonth, DAYS_IN_WEEK};
use crate::schedule::{filter_by_month, ScheduleEvent};
use std::iter::successors;
use std::slice::Chunks;
use time::{Date, Month};

/// The grid always shows at least five weeks so that its height only changes
/// for months that need a sixth.
const MIN_CELLS: usize = 5 * DAYS_IN_WEEK;

/// Which month a displayed day belongs to, relative to the month being viewed
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum MonthOffset {
    Previous,
    Current,
    Next,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct DayCell {
    date: Date,
    offset: MonthOffset,
    events: Vec<String>,
}

impl DayCell {
    pub(crate) fn date(&self) -> Date {
        self.date
    }

    pub(crate) fn offset(&self) -> MonthOffset {
        self.offset
    }

    pub(crate) fn day_number(&self) -> u8 {
        self.date.day()
    }

    pub(crate) fn events(&self) -> &[String] {
        &self.events
    }

    /// The day number, followed by the day's events (if any) separated by
    /// blank lines
    pub(crate) fn label(&self) -> String {
        let mut label = self.day_number().to_string();
        for ev in &self.events {
            label.push_str("\n\n");
            label.push_str(ev);
        }
        label
    }
}

/// The cells of a month view in display order: trailing days of the previous
/// month, every day of the month, then leading days of the next month.
/// The number of cells is always a multiple of seven.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct MonthGrid {
    month: YearMonth,
    cells: Vec<DayCell>,
}

impl MonthGrid {
    pub(crate) fn month(&self) -> YearMonth {
        self.month
    }

    #[cfg(test)]
    pub(crate) fn cells(&self) -> &[DayCell] {
        &self.cells
    }

    pub(crate) fn weeks(&self) -> Chunks<'_, DayCell> {
        self.cells.chunks(DAYS_IN_WEEK)
    }

    pub(crate) fn week_count(&self) -> usize {
        self.cells.len() / DAYS_IN_WEEK
    }

    #[cfg(test)]
    pub(crate) fn leading(&self) -> Vec<&DayCell> {
        self.with_offset(MonthOffset::Previous)
    }

    #[cfg(test)]
    pub(crate) fn current(&self) -> Vec<&DayCell> {
        self.with_offset(MonthOffset::Current)
    }

    #[cfg(test)]
    pub(crate) fn trailing(&self) -> Vec<&DayCell> {
        self.with_offset(MonthOffset::Next)
    }

    #[cfg(test)]
    fn with_offset(&self, offset: MonthOffset) -> Vec<&DayCell> {
        self.cells.iter().filter(|c| c.offset == offset).collect()
    }

    pub(crate) fn position(&self, date: Date) -> Option<usize> {
        self.cells.iter().position(|c| c.date == date)
    }

    pub(crate) fn cell(&self, date: Date) -> Option<&DayCell> {
        self.position(date).map(|i| &self.cells[i])
    }
}

/// Lay out the given month with weeks starting on Sunday, attaching each
/// event to the cell for its date.
///
/// Five weeks are shown unless the month needs six, in which case the grid
/// grows to 42 cells rather than dropping the final days of the month.
pub(crate) fn build_month_grid(month: YearMonth, events: &[ScheduleEvent]) -> MonthGrid {
    let leading = usize::from(month.first_weekday());
    let days = usize::from(month.days_in_month());
    let total = (leading + days).next_multiple_of(DAYS_IN_WEEK).max(MIN_CELLS);
    let first = month.first_day();

    let mut leading_dates = successors(first.previous_day(), |d| d.previous_day())
        .take(leading)
        .collect::<Vec<_>>();
    leading_dates.reverse();
    let current_dates = successors(Some(first), |d| d.next_day()).take(days);
    let trailing_dates =
        successors(month.last_day().next_day(), |d| d.next_day()).take(total - leading - days);

    let mut cells = Vec::with_capacity(total);
    cells.extend(segment(
        leading_dates,
        month.raw_previous(),
        MonthOffset::Previous,
        events,
    ));
    cells.extend(segment(
        current_dates,
        (month.year(), month.month()),
        MonthOffset::Current,
        events,
    ));
    cells.extend(segment(
        trailing_dates,
        month.raw_next(),
        MonthOffset::Next,
        events,
    ));
    assert_eq!(
        cells.len(),
        total,
        "grid for {month} should have {total} cells"
    );
    log::debug!("Built {total}-cell grid for {month}");
    MonthGrid { month, cells }
}

fn segment<I>(
    dates: I,
    (year, month): (i32, Month),
    offset: MonthOffset,
    events: &[ScheduleEvent],
) -> Vec<DayCell>
where
    I: IntoIterator<Item = Date>,
{
    let in_month = filter_by_month(events, year, month);
    dates
        .into_iter()
        .map(|date| DayCell {
            date,
            offset,
            events: in_month
                .iter()
                .filter(|ev| ev.day() == date)
                .map(|ev| ev.value().to_owned())
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn ym(year: i32, month: Month) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    fn sample() -> Vec<ScheduleEvent> {
        vec![
            ScheduleEvent::new(date!(2023 - 12 - 31), "New Year's Eve"),
            ScheduleEvent::new(date!(2024 - 01 - 31), "Rent"),
            ScheduleEvent::new(date!(2024 - 02 - 15), "Meeting"),
            ScheduleEvent::new(date!(2024 - 02 - 15), "Dinner"),
            ScheduleEvent::new(date!(2024 - 02 - 29), "Leap day"),
            ScheduleEvent::new(date!(2024 - 03 - 02), "Spring cleaning"),
            ScheduleEvent::new(date!(2025 - 01 - 01), "Next year"),
        ]
    }

    #[test]
    fn test_every_month_is_covered() {
        for year in [1900, 2000, 2015, 2023, 2024, 2025, 2100] {
            let mut month = Month::January;
            loop {
                let m = ym(year, month);
                let grid = build_month_grid(m, &[]);
                let cells = grid.cells();
                assert_eq!(cells.len() % DAYS_IN_WEEK, 0, "{m}: not whole weeks");
                assert!(matches!(cells.len(), 35 | 42), "{m}: {} cells", cells.len());
                assert_eq!(grid.leading().len(), usize::from(m.first_weekday()), "{m}");
                let current = grid.current();
                assert_eq!(current.len(), usize::from(m.days_in_month()), "{m}");
                for (i, cell) in current.iter().enumerate() {
                    assert_eq!(usize::from(cell.day_number()), i + 1, "{m}");
                    assert_eq!(cell.offset(), MonthOffset::Current, "{m}");
                    assert!(m.contains(cell.date()), "{m}");
                }
                assert!(grid
                    .leading()
                    .iter()
                    .all(|c| c.offset() == MonthOffset::Previous));
                assert!(grid
                    .trailing()
                    .iter()
                    .all(|c| c.offset() == MonthOffset::Next));
                // Consecutive days with no gaps or repeats
                for pair in cells.windows(2) {
                    assert_eq!(pair[0].date().next_day(), Some(pair[1].date()), "{m}");
                }
                assert_eq!(cells[0].date().weekday(), time::Weekday::Sunday, "{m}");
                month = month.next();
                if month == Month::January {
                    break;
                }
            }
        }
    }

    #[test]
    fn test_leap_february() {
        let grid = build_month_grid(ym(2024, Month::February), &sample());
        assert_eq!(grid.current().len(), 29);
        let day29 = grid.cell(date!(2024 - 02 - 29)).unwrap();
        assert_eq!(day29.offset(), MonthOffset::Current);
        assert_eq!(day29.events(), ["Leap day"]);
        let leading = grid
            .leading()
            .iter()
            .map(|c| c.day_number())
            .collect::<Vec<_>>();
        assert_eq!(leading, [28, 29, 30, 31]);
        let trailing = grid
            .trailing()
            .iter()
            .map(|c| c.day_number())
            .collect::<Vec<_>>();
        assert_eq!(trailing, [1, 2]);
        assert_eq!(grid.week_count(), 5);
    }

    #[test]
    fn test_event_with_time_attaches_to_day() {
        let store = crate::schedule::EventStore::from_records([crate::schedule::ScheduleRecord {
            schedule_day: Some("2024-02-15T10:00:00".into()),
            schedule_value: "Meeting".into(),
        }]);
        let grid = build_month_grid(ym(2024, Month::February), store.events());
        let cell = grid.cell(date!(2024 - 02 - 15)).unwrap();
        assert_eq!(cell.offset(), MonthOffset::Current);
        assert_eq!(cell.events(), ["Meeting"]);
        assert_eq!(cell.label(), "15\n\nMeeting");
        let with_events = grid
            .cells()
            .iter()
            .filter(|c| !c.events().is_empty())
            .count();
        assert_eq!(with_events, 1);
    }

    #[test]
    fn test_adjacent_month_events() {
        let grid = build_month_grid(ym(2024, Month::February), &sample());
        let rent = grid.cell(date!(2024 - 01 - 31)).unwrap();
        assert_eq!(rent.offset(), MonthOffset::Previous);
        assert_eq!(rent.events(), ["Rent"]);
        let cleaning = grid.cell(date!(2024 - 03 - 02)).unwrap();
        assert_eq!(cleaning.offset(), MonthOffset::Next);
        assert_eq!(cleaning.events(), ["Spring cleaning"]);
    }

    #[test]
    fn test_multiple_events_label() {
        let grid = build_month_grid(ym(2024, Month::February), &sample());
        let cell = grid.cell(date!(2024 - 02 - 15)).unwrap();
        assert_eq!(cell.label(), "15\n\nMeeting\n\nDinner");
        assert_eq!(grid.cell(date!(2024 - 02 - 16)).unwrap().label(), "16");
    }

    #[test]
    fn test_no_double_counting() {
        let events = sample();
        let grid = build_month_grid(ym(2024, Month::February), &events);
        let shown = grid
            .cells()
            .iter()
            .map(|c| c.events().len())
            .sum::<usize>();
        // Everything but New Year's Eve and Next year is on screen
        assert_eq!(shown, 5);
    }

    #[test]
    fn test_january_reaches_into_previous_year() {
        // 2024-01-01 is a Monday
        let grid = build_month_grid(ym(2024, Month::January), &sample());
        let leading = grid.leading();
        assert_eq!(leading.len(), 1);
        let eve = leading[0];
        assert_eq!(eve.date(), date!(2023 - 12 - 31));
        assert_eq!(eve.events(), ["New Year's Eve"]);
    }

    #[test]
    fn test_december_reaches_into_next_year() {
        // 2024-12-01 is a Sunday
        let grid = build_month_grid(ym(2024, Month::December), &sample());
        assert!(grid.leading().is_empty());
        assert_eq!(grid.cells().len(), 35);
        let trailing = grid.trailing();
        assert_eq!(trailing.len(), 4);
        assert_eq!(trailing[0].date(), date!(2025 - 01 - 01));
        assert_eq!(trailing[0].events(), ["Next year"]);
    }

    #[test]
    fn test_six_week_month() {
        // 2020-08-01 is a Saturday, so August 2020 needs 6 + 31 cells
        let grid = build_month_grid(ym(2020, Month::August), &[]);
        assert_eq!(grid.cells().len(), 42);
        assert_eq!(grid.week_count(), 6);
        assert_eq!(grid.leading().len(), 6);
        assert_eq!(grid.trailing().len(), 5);
        let last = grid.cell(date!(2020 - 08 - 31)).unwrap();
        assert_eq!(last.offset(), MonthOffset::Current);
    }

    #[test]
    fn test_four_week_month_padded_to_five() {
        // 2015-02-01 is a Sunday and February 2015 has exactly 28 days
        let grid = build_month_grid(ym(2015, Month::February), &[]);
        assert!(grid.leading().is_empty());
        assert_eq!(grid.current().len(), 28);
        assert_eq!(grid.trailing().len(), 7);
        assert_eq!(grid.trailing()[6].date(), date!(2015 - 03 - 07));
    }

    #[test]
    fn test_edges_of_time() {
        let grid = build_month_grid(ym(9998, Month::December), &[]);
        assert!(grid
            .trailing()
            .iter()
            .all(|c| c.date().year() == 9999));
        let grid = build_month_grid(ym(-9998, Month::January), &[]);
        assert!(grid
            .leading()
            .iter()
            .all(|c| c.date().year() == -9999));
    }

    #[test]
    fn test_weeks() {
        let grid = build_month_grid(ym(2024, Month::February), &[]);
        let firsts = grid
            .weeks()
            .map(|w| w[0].date())
            .collect::<Vec<_>>();
        assert_eq!(
            firsts,
            [
                date!(2024 - 01 - 28),
                date!(2024 - 02 - 04),
                date!(2024 - 02 - 11),
                date!(2024 - 02 - 18),
                date!(2024 - 02 - 25),
            ]
        );
    }
}
