use crate::schedule::{records_from_json, EventSource, FetchError, ScheduleRecord};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub(crate) const URL_VAR: &str = "SUPABASE_URL";
pub(crate) const KEY_VAR: &str = "SUPABASE_KEY";
pub(crate) const DEFAULT_TABLE: &str = "calendar";

/// Columns requested from the schedule table
const COLUMNS: &str = "schedule_day,schedule_value";

/// Connection details for the Supabase project holding the schedule table
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct SupabaseConfig {
    url: String,
    key: String,
    table: String,
}

impl SupabaseConfig {
    pub(crate) fn from_env(table: String) -> Result<SupabaseConfig, ConfigError> {
        SupabaseConfig::from_lookup(table, |name| std::env::var(name).ok())
    }

    fn from_lookup<F>(table: String, lookup: F) -> Result<SupabaseConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(name))
        };
        Ok(SupabaseConfig {
            url: get(URL_VAR)?,
            key: get(KEY_VAR)?,
            table,
        })
    }

    /// PostgREST endpoint for the table
    fn endpoint(&self) -> String {
        format!("{}/rest/v1/{}", self.url.trim_end_matches('/'), self.table)
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub(crate) enum ConfigError {
    #[error("environment variable {0} must be set")]
    Missing(&'static str),
}

/// Reads the whole schedule table through Supabase's REST interface
#[derive(Debug)]
pub(crate) struct SupabaseSource {
    config: SupabaseConfig,
    client: reqwest::blocking::Client,
}

impl SupabaseSource {
    pub(crate) fn new(config: SupabaseConfig) -> SupabaseSource {
        SupabaseSource {
            config,
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl EventSource for SupabaseSource {
    fn fetch_records(&self) -> Result<Vec<ScheduleRecord>, FetchError> {
        let endpoint = self.config.endpoint();
        log::info!("Fetching schedule rows from {endpoint}");
        let rows = self
            .client
            .get(endpoint)
            .query(&[("select", COLUMNS)])
            .header("apikey", &self.config.key)
            .bearer_auth(&self.config.key)
            .send()?
            .error_for_status()?
            .json::<Vec<serde_json::Value>>()?;
        log::debug!("Backend returned {} rows", rows.len());
        Ok(records_from_json(rows))
    }
}

/// Reads schedule rows from a local JSON file containing an array of objects
/// shaped like the backend's rows
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub(crate) fn new<P: AsRef<Path>>(path: P) -> JsonFileSource {
        JsonFileSource {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl EventSource for JsonFileSource {
    fn fetch_records(&self) -> Result<Vec<ScheduleRecord>, FetchError> {
        let path = self.path.display().to_string();
        log::info!("Reading schedule rows from {path}");
        let src = std::fs::read_to_string(&self.path).map_err(|source| FetchError::Read {
            path: path.clone(),
            source,
        })?;
        parse_records(&src).map_err(|source| FetchError::Parse { path, source })
    }
}

fn parse_records(src: &str) -> Result<Vec<ScheduleRecord>, serde_json::Error> {
    serde_json::from_str::<Vec<serde_json::Value>>(src).map(records_from_json)
}
