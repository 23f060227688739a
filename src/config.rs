//! Run and service configuration.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

use crate::data::Timeslot;
use crate::error::ConfigError;

pub const BIND_ADDR_VAR: &str = "TIMETABLE_BIND_ADDR";
pub const LOG_FILTER_VAR: &str = "TIMETABLE_LOG";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_LOG_FILTER: &str = "info";
const DEFAULT_WEEKDAYS: [&str; 5] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"];
const DEFAULT_SLOTS_PER_DAY: Timeslot = 5;

/// One slot per minute of a day.
pub const MAX_SLOTS_PER_DAY: Timeslot = 24 * 60;

/// Shape of the week a run allocates into.
///
/// Weekdays are searched in the order listed here.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RunConfig {
    pub weekdays: Vec<String>,
    pub slots_per_day: Timeslot,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            weekdays: DEFAULT_WEEKDAYS.iter().map(|d| d.to_string()).collect(),
            slots_per_day: DEFAULT_SLOTS_PER_DAY,
        }
    }
}

impl RunConfig {
    pub fn new<I, S>(weekdays: I, slots_per_day: Timeslot) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            weekdays: weekdays.into_iter().map(Into::into).collect(),
            slots_per_day,
        }
    }

    /// Label for a slot, e.g. `02:00-03:00`.
    pub fn slot_label(slot: Timeslot) -> String {
        format!("{:02}:00-{:02}:00", slot, slot + 1)
    }
}

/// Default env_logger filter; `RUST_LOG` still takes precedence.
pub fn log_filter_from_env() -> String {
    log_filter_from(|key| std::env::var(key).ok())
}

fn log_filter_from(lookup: impl Fn(&str) -> Option<String>) -> String {
    lookup(LOG_FILTER_VAR).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

/// Settings for the HTTP service, read from the environment.
///
/// Only the server reads these; the demo runner never binds a socket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_addr = lookup(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddr(raw_addr.clone()))?;

        Ok(Self { bind_addr })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn server_config_defaults_without_env() {
        let config = ServerConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(log_filter_from(|_| None), "info");
    }

    #[test]
    fn server_config_reads_overrides() {
        let vars: HashMap<&str, &str> =
            HashMap::from([(BIND_ADDR_VAR, "0.0.0.0:9000"), (LOG_FILTER_VAR, "debug")]);
        let config = ServerConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(log_filter_from(|k| vars.get(k).map(|v| v.to_string())), "debug");
    }

    #[test]
    fn server_config_rejects_bad_addr() {
        let err = ServerConfig::from_lookup(|_| Some("not-an-addr".to_string())).unwrap_err();
        assert_eq!(err, ConfigError::InvalidBindAddr("not-an-addr".to_string()));
    }

    #[test]
    fn log_filter_ignores_bad_bind_addr() {
        let vars: HashMap<&str, &str> =
            HashMap::from([(BIND_ADDR_VAR, "not-an-addr"), (LOG_FILTER_VAR, "warn")]);
        assert_eq!(log_filter_from(|k| vars.get(k).map(|v| v.to_string())), "warn");
    }

    #[test]
    fn run_config_deserializes_with_defaults() {
        let config: RunConfig = serde_json::from_str(r#"{"slotsPerDay": 8}"#).unwrap();
        assert_eq!(config.slots_per_day, 8);
        assert_eq!(config.weekdays.len(), 5);
        assert_eq!(config.weekdays[0], "Monday");
    }

    #[test]
    fn slot_labels_are_zero_padded() {
        assert_eq!(RunConfig::slot_label(0), "00:00-01:00");
        assert_eq!(RunConfig::slot_label(9), "09:00-10:00");
    }
}
