use std::fmt;
use thiserror::Error;
use time::{Date, Month, Weekday};

/// Earliest year that can be displayed.  The `time` crate stops at year
/// -9999, and the grid for January of a year needs the tail of the previous
/// December.
pub(crate) const MIN_YEAR: i32 = -9998;

/// Latest year that can be displayed, for the same reason as [`MIN_YEAR`]
pub(crate) const MAX_YEAR: i32 = 9998;

pub(crate) const DAYS_IN_WEEK: usize = 7;

pub(crate) trait WeekdayExt {
    /// Column of the weekday in a week that starts on Sunday
    fn index0(&self) -> u16;
}

impl WeekdayExt for Weekday {
    fn index0(&self) -> u16 {
        self.number_days_from_sunday().into()
    }
}

/// A calendar month of a specific year.
///
/// Invariant: `year` is in `MIN_YEAR..=MAX_YEAR`, so the first and last days
/// of this month and of both adjacent months are valid `Date`s.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct YearMonth {
    year: i32,
    month: Month,
}

impl YearMonth {
    pub(crate) fn new(year: i32, month: Month) -> Result<YearMonth, OutOfTimeError> {
        if (MIN_YEAR..=MAX_YEAR).contains(&year) {
            Ok(YearMonth { year, month })
        } else {
            Err(OutOfTimeError)
        }
    }

    pub(crate) fn from_date(date: Date) -> Result<YearMonth, OutOfTimeError> {
        YearMonth::new(date.year(), date.month())
    }

    pub(crate) fn year(&self) -> i32 {
        self.year
    }

    pub(crate) fn month(&self) -> Month {
        self.month
    }

    pub(crate) fn first_day(&self) -> Date {
        Date::from_calendar_date(self.year, self.month, 1)
            .expect("first day of a month in range should be a valid date")
    }

    /// The first day of the following month minus one day
    pub(crate) fn last_day(&self) -> Date {
        let (year, month) = self.raw_next();
        Date::from_calendar_date(year, month, 1)
            .ok()
            .and_then(Date::previous_day)
            .expect("first day of the following month should be representable")
    }

    pub(crate) fn days_in_month(&self) -> u8 {
        self.last_day().day()
    }

    /// Number of days from the start of the week (Sunday) to the first day of
    /// the month
    pub(crate) fn first_weekday(&self) -> u16 {
        self.first_day().weekday().index0()
    }

    pub(crate) fn contains(&self, date: Date) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// The following month, or `None` if it would be past [`MAX_YEAR`]
    pub(crate) fn next(&self) -> Option<YearMonth> {
        let (year, month) = self.raw_next();
        YearMonth::new(year, month).ok()
    }

    /// The preceding month, or `None` if it would be before [`MIN_YEAR`]
    pub(crate) fn previous(&self) -> Option<YearMonth> {
        let (year, month) = self.raw_previous();
        YearMonth::new(year, month).ok()
    }

    /// The following month without the year range check; only used for
    /// computing dates at the edges of the displayed grid
    pub(super) fn raw_next(&self) -> (i32, Month) {
        match self.month {
            Month::December => (self.year + 1, Month::January),
            m => (self.year, m.next()),
        }
    }

    pub(super) fn raw_previous(&self) -> (i32, Month) {
        match self.month {
            Month::January => (self.year - 1, Month::December),
            m => (self.year, m.previous()),
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month, self.year)
    }
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("reached the end of time")]
pub(crate) struct OutOfTimeError;

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn ym(year: i32, month: Month) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    #[test]
    fn test_last_day() {
        assert_eq!(ym(2024, Month::February).last_day(), date!(2024 - 02 - 29));
        assert_eq!(ym(2023, Month::February).last_day(), date!(2023 - 02 - 28));
        assert_eq!(ym(2024, Month::April).last_day(), date!(2024 - 04 - 30));
        assert_eq!(ym(2024, Month::December).last_day(), date!(2024 - 12 - 31));
        assert_eq!(ym(1900, Month::February).days_in_month(), 28);
        assert_eq!(ym(2000, Month::February).days_in_month(), 29);
    }

    #[test]
    fn test_first_weekday() {
        // 2024-02-01 is a Thursday
        assert_eq!(ym(2024, Month::February).first_weekday(), 4);
        // 2023-10-01 is a Sunday
        assert_eq!(ym(2023, Month::October).first_weekday(), 0);
        // 2022-10-01 is a Saturday
        assert_eq!(ym(2022, Month::October).first_weekday(), 6);
    }

    #[test]
    fn test_next_rolls_year() {
        assert_eq!(
            ym(2024, Month::December).next(),
            Some(ym(2025, Month::January))
        );
        assert_eq!(ym(2024, Month::March).next(), Some(ym(2024, Month::April)));
    }

    #[test]
    fn test_previous_rolls_year() {
        assert_eq!(
            ym(2024, Month::January).previous(),
            Some(ym(2023, Month::December))
        );
        assert_eq!(
            ym(2024, Month::March).previous(),
            Some(ym(2024, Month::February))
        );
    }

    #[test]
    fn test_edges_of_time() {
        assert_eq!(ym(MAX_YEAR, Month::December).next(), None);
        assert_eq!(ym(MIN_YEAR, Month::January).previous(), None);
        assert_eq!(YearMonth::new(MAX_YEAR + 1, Month::January), Err(OutOfTimeError));
        assert_eq!(YearMonth::new(MIN_YEAR - 1, Month::June), Err(OutOfTimeError));
        assert_eq!(
            ym(MAX_YEAR, Month::December).last_day(),
            date!(9998 - 12 - 31)
        );
    }

    #[test]
    fn test_contains() {
        let feb = ym(2024, Month::February);
        assert!(feb.contains(date!(2024 - 02 - 29)));
        assert!(!feb.contains(date!(2024 - 03 - 01)));
        assert!(!feb.contains(date!(2023 - 02 - 15)));
    }

    #[test]
    fn test_display() {
        assert_eq!(ym(2024, Month::February).to_string(), "February 2024");
    }
}
