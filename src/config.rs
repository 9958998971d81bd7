//! Environment-driven settings.
//!
//! Variables (read after loading an optional `.env`):
//!
//! - `EXPOSURE_CURRENT_YEAR`: calendar year used for latency (default: local clock)
//! - `EXPOSURE_LOG_MODE`: `auto` | `file` | `stderr` (default `auto`)
//! - `EXPOSURE_LOG_FILE`: log path for file mode (default `exposure.log`)

use std::path::PathBuf;

use chrono::{Datelike, Local};

use crate::error::AppError;

pub const ENV_CURRENT_YEAR: &str = "EXPOSURE_CURRENT_YEAR";
pub const ENV_LOG_MODE: &str = "EXPOSURE_LOG_MODE";
pub const ENV_LOG_FILE: &str = "EXPOSURE_LOG_FILE";

const DEFAULT_LOG_FILE: &str = "exposure.log";

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    /// File for the terminal UI, stderr for everything else.
    Auto,
    File,
    Stderr,
}

impl LogMode {
    fn parse(s: &str) -> Result<Self, AppError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "auto" => Ok(LogMode::Auto),
            "file" => Ok(LogMode::File),
            "stderr" | "stdout" => Ok(LogMode::Stderr),
            other => Err(AppError::input(format!(
                "Invalid {ENV_LOG_MODE} '{other}'. Expected one of: auto, file, stderr."
            ))),
        }
    }

    /// Resolve `Auto` for a run that does (or does not) own the terminal.
    pub fn use_file(self, owns_terminal: bool) -> bool {
        match self {
            LogMode::Auto => owns_terminal,
            LogMode::File => true,
            LogMode::Stderr => false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub current_year: i32,
    pub log_mode: LogMode,
    pub log_file: PathBuf,
}

impl Settings {
    /// Load `.env` (if any) and read settings from the process environment.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let current_year = match lookup(ENV_CURRENT_YEAR) {
            Some(raw) => parse_year(&raw)?,
            None => Local::now().year(),
        };

        let log_mode = match lookup(ENV_LOG_MODE) {
            Some(raw) => LogMode::parse(&raw)?,
            None => LogMode::Auto,
        };

        let log_file = lookup(ENV_LOG_FILE)
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

        Ok(Self {
            current_year,
            log_mode,
            log_file,
        })
    }
}

fn parse_year(raw: &str) -> Result<i32, AppError> {
    raw.trim()
        .parse::<i32>()
        .map_err(|e| AppError::input(format!("Invalid {ENV_CURRENT_YEAR} '{raw}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let settings = Settings::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(settings.current_year, Local::now().year());
        assert_eq!(settings.log_mode, LogMode::Auto);
        assert_eq!(settings.log_file, PathBuf::from("exposure.log"));
    }

    #[test]
    fn reads_overrides() {
        let settings = Settings::from_lookup(lookup_from(&[
            (ENV_CURRENT_YEAR, " 2030 "),
            (ENV_LOG_MODE, "STDERR"),
            (ENV_LOG_FILE, "/tmp/x.log"),
        ]))
        .unwrap();
        assert_eq!(settings.current_year, 2030);
        assert_eq!(settings.log_mode, LogMode::Stderr);
        assert_eq!(settings.log_file, PathBuf::from("/tmp/x.log"));
    }

    #[test]
    fn rejects_bad_values() {
        let err = Settings::from_lookup(lookup_from(&[(ENV_CURRENT_YEAR, "soon")])).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(Settings::from_lookup(lookup_from(&[(ENV_LOG_MODE, "syslog")])).is_err());
    }

    #[test]
    fn auto_mode_follows_terminal_ownership() {
        assert!(LogMode::Auto.use_file(true));
        assert!(!LogMode::Auto.use_file(false));
        assert!(LogMode::File.use_file(false));
        assert!(!LogMode::Stderr.use_file(true));
    }
}
