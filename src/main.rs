mod app;
mod backend;
mod calendar;
mod colorpick;
mod detail;
mod goto;
mod help;
mod popup;
mod schedule;
mod theme;
use crate::app::App;
use crate::backend::{JsonFileSource, SupabaseConfig, SupabaseSource, DEFAULT_TABLE};
use crate::calendar::CalendarView;
use crate::schedule::{EventSource, EventStore};
use anyhow::Context;
use flexi_logger::{FileSpec, Logger, LoggerHandle};
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::path::{Path, PathBuf};
use time::{format_description::FormatItem, macros::format_description, Date, OffsetDateTime};

static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(RunOptions),
    Help,
    Version,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct RunOptions {
    date: Option<Date>,
    events_file: Option<PathBuf>,
    table: Option<String>,
    log_file: Option<PathBuf>,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut opts = RunOptions::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('e') | Arg::Long("events") => {
                    opts.events_file = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('t') | Arg::Long("table") => {
                    opts.table = Some(parser.value()?.string()?);
                }
                Arg::Long("log-file") => {
                    opts.log_file = Some(PathBuf::from(parser.value()?));
                }
                Arg::Value(value) if opts.date.is_none() => {
                    let value = value.string()?;
                    match Date::parse(&value, &YMD_FMT) {
                        Ok(d) => opts.date = Some(d),
                        Err(e) => {
                            return Err(lexopt::Error::ParsingFailed {
                                value,
                                error: Box::new(e),
                            })
                        }
                    }
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run(opts))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run(opts) => {
                let _logger = start_logging(opts.log_file.as_deref())?;
                let today = OffsetDateTime::now_local()
                    .context("failed to determine local date")?
                    .date();
                let source = opts.event_source()?;
                let events = EventStore::fetch_all(source.as_ref())
                    .context("failed to load schedule events")?;
                let mut view =
                    CalendarView::new(today, events).context("today's date cannot be shown")?;
                if let Some(date) = opts.date {
                    view = view
                        .start_date(date)
                        .with_context(|| format!("cannot show {date}"))?;
                }
                with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    App::new(view).run(terminal)?;
                    Ok(())
                })
            }
            Command::Help => {
                println!("Usage: schedcal [<options>] [YYYY-MM-DD]");
                println!();
                println!("Terminal month calendar showing schedule entries stored in a Supabase table");
                println!();
                println!("Options:");
                println!("  -e, --events <FILE>   Read schedule rows from a JSON file instead of");
                println!("                        the backend");
                println!("  -t, --table <NAME>    Backend table to read [default: {DEFAULT_TABLE}]");
                println!("      --log-file <FILE> Write log messages to the given file");
                println!("  -h, --help            Display this help message and exit");
                println!("  -V, --version         Show the program version and exit");
                println!();
                println!("Environment:");
                println!("  {:<21} Base URL of the Supabase project", backend::URL_VAR);
                println!("  {:<21} API key for the Supabase project", backend::KEY_VAR);
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

impl RunOptions {
    fn event_source(&self) -> anyhow::Result<Box<dyn EventSource>> {
        if let Some(path) = &self.events_file {
            return Ok(Box::new(JsonFileSource::new(path)));
        }
        let table = self
            .table
            .clone()
            .unwrap_or_else(|| String::from(DEFAULT_TABLE));
        let config = SupabaseConfig::from_env(table).context("backend is not configured")?;
        Ok(Box::new(SupabaseSource::new(config)))
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

// The terminal belongs to the calendar, so log messages only go somewhere if
// a log file was requested.
fn start_logging(log_file: Option<&Path>) -> anyhow::Result<LoggerHandle> {
    let logger = Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)
        .context("invalid logging specification")?;
    let logger = match log_file {
        Some(path) => logger.log_to_file(
            FileSpec::try_from(path).context("invalid log file path")?,
        ),
        None => logger.do_not_log(),
    };
    logger.start().context("failed to start logger")
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = func(terminal);
    ratatui::restore();
    r
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use time::macros::date;

    fn parse(args: &[&str]) -> Result<Command, lexopt::Error> {
        let args = args.iter().map(OsString::from).collect::<Vec<_>>();
        Command::from_parser(Parser::from_args(args))
    }

    #[test]
    fn test_no_args() {
        assert_eq!(parse(&[]).unwrap(), Command::Run(RunOptions::default()));
    }

    #[test]
    fn test_all_options() {
        assert_eq!(
            parse(&[
                "--events",
                "rows.json",
                "-t",
                "schedules",
                "--log-file",
                "schedcal.log",
                "2024-02-15",
            ])
            .unwrap(),
            Command::Run(RunOptions {
                date: Some(date!(2024 - 02 - 15)),
                events_file: Some(PathBuf::from("rows.json")),
                table: Some("schedules".into()),
                log_file: Some(PathBuf::from("schedcal.log")),
            })
        );
    }

    #[test]
    fn test_help_and_version() {
        assert_eq!(parse(&["-h"]).unwrap(), Command::Help);
        assert_eq!(parse(&["2024-02-15", "--version"]).unwrap(), Command::Version);
    }

    #[test]
    fn test_bad_date() {
        assert!(parse(&["2024-02-30"]).is_err());
        assert!(parse(&["2024-02-15", "2024-02-16"]).is_err());
    }

    #[test]
    fn test_events_file_source() {
        let opts = RunOptions {
            events_file: Some(PathBuf::from("/nonexistent/rows.json")),
            ..RunOptions::default()
        };
        let source = opts.event_source().unwrap();
        assert!(EventStore::fetch_all(source.as_ref()).is_err());
    }
}
