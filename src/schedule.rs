use serde::{Deserialize, Deserializer};
use thiserror::Error;
use time::{format_description::FormatItem, macros::format_description, Date, Month};

static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// Length of the `YYYY-MM-DD` prefix of a `schedule_day` value
const DATE_PREFIX_LEN: usize = 10;

/// A row of the schedule table as returned by the backend
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub(crate) struct ScheduleRecord {
    pub(crate) schedule_day: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub(crate) schedule_value: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode each element of a JSON array of rows on its own, dropping (with a
/// warning) those whose columns have the wrong types so that one bad row
/// does not cost the rest
pub(crate) fn records_from_json(rows: Vec<serde_json::Value>) -> Vec<ScheduleRecord> {
    rows.into_iter()
        .filter_map(|row| match serde_json::from_value::<ScheduleRecord>(row) {
            Ok(rec) => Some(rec),
            Err(e) => {
                log::warn!("Dropping malformed schedule row: {e}");
                None
            }
        })
        .collect()
}

/// A schedule entry whose date has been parsed.  The time of day, if any, is
/// discarded.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub(crate) struct ScheduleEvent {
    day: Date,
    value: String,
}

impl ScheduleEvent {
    pub(crate) fn new<S: Into<String>>(day: Date, value: S) -> ScheduleEvent {
        ScheduleEvent {
            day,
            value: value.into(),
        }
    }

    pub(crate) fn day(&self) -> Date {
        self.day
    }

    pub(crate) fn value(&self) -> &str {
        &self.value
    }
}

impl TryFrom<ScheduleRecord> for ScheduleEvent {
    type Error = BadDayError;

    fn try_from(record: ScheduleRecord) -> Result<ScheduleEvent, BadDayError> {
        let Some(raw) = record.schedule_day else {
            return Err(BadDayError::Missing);
        };
        let Some(prefix) = raw.get(..DATE_PREFIX_LEN) else {
            return Err(BadDayError::TooShort(raw));
        };
        match Date::parse(prefix, &YMD_FMT) {
            Ok(day) => Ok(ScheduleEvent::new(day, record.schedule_value)),
            Err(source) => Err(BadDayError::Unparsable { value: raw, source }),
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum BadDayError {
    #[error("schedule_day is missing")]
    Missing,
    #[error("schedule_day {0:?} is too short to contain a YYYY-MM-DD date")]
    TooShort(String),
    #[error("schedule_day {value:?} does not start with a valid YYYY-MM-DD date")]
    Unparsable {
        value: String,
        source: time::error::Parse,
    },
}

/// Something that can produce the full set of schedule rows in one go
pub(crate) trait EventSource {
    fn fetch_records(&self) -> Result<Vec<ScheduleRecord>, FetchError>;
}

#[derive(Debug, Error)]
pub(crate) enum FetchError {
    #[error("failed to retrieve schedule rows from backend")]
    Http(#[from] reqwest::Error),
    #[error("failed to read schedule rows from {path}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse schedule rows from {path}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

/// All schedule events known for the session, in the order the backend
/// returned them
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct EventStore {
    events: Vec<ScheduleEvent>,
}

impl EventStore {
    pub(crate) fn new(events: Vec<ScheduleEvent>) -> EventStore {
        EventStore { events }
    }

    /// Fetch every row from `source` and keep those with usable dates
    pub(crate) fn fetch_all<S>(source: &S) -> Result<EventStore, FetchError>
    where
        S: EventSource + ?Sized,
    {
        let records = source.fetch_records()?;
        let store = EventStore::from_records(records);
        log::info!("Loaded {} schedule events", store.len());
        Ok(store)
    }

    /// Convert raw rows to events, dropping (with a warning) any row whose
    /// date cannot be parsed
    pub(crate) fn from_records<I>(records: I) -> EventStore
    where
        I: IntoIterator<Item = ScheduleRecord>,
    {
        let events = records
            .into_iter()
            .filter_map(|rec| match ScheduleEvent::try_from(rec) {
                Ok(ev) => Some(ev),
                Err(e) => {
                    log::warn!("Dropping schedule row: {e}");
                    None
                }
            })
            .collect();
        EventStore::new(events)
    }

    pub(crate) fn len(&self) -> usize {
        self.events.len()
    }

    pub(crate) fn events(&self) -> &[ScheduleEvent] {
        &self.events
    }
}

/// Select the events dated within the given month, inclusive of its first and
/// last days.  Months outside the representable range match nothing.
pub(crate) fn filter_by_month(
    events: &[ScheduleEvent],
    year: i32,
    month: Month,
) -> Vec<&ScheduleEvent> {
    let Some((first, last)) = month_bounds(year, month) else {
        return Vec::new();
    };
    let filtered = events
        .iter()
        .filter(|ev| (first..=last).contains(&ev.day))
        .collect::<Vec<_>>();
    log::debug!(
        "{} schedule events fall within {year}-{:02}",
        filtered.len(),
        u8::from(month)
    );
    filtered
}

// Last day is computed as the first day of the next month minus one day.
fn month_bounds(year: i32, month: Month) -> Option<(Date, Date)> {
    let first = Date::from_calendar_date(year, month, 1).ok()?;
    let next_first = match month {
        Month::December => Date::from_calendar_date(year.checked_add(1)?, Month::January, 1),
        m => Date::from_calendar_date(year, m.next(), 1),
    };
    let last = match next_first {
        Ok(d) => d.previous_day()?,
        // December of the final representable year
        Err(_) => Date::from_calendar_date(year, month, 31).ok()?,
    };
    Some((first, last))
}
