//! Shared bot configuration.
//!
//! Both the GUI and the automation loop read the same flat JSON document,
//! `config.json`, which lives next to the executable so a portable install
//! keeps its settings. Only the GUI (and `shiftgrab config set`) write it.
//! The automation loop re-reads it at every iteration boundary, so edits
//! take effect while a run is in progress.

use crate::error::{Result, ShiftgrabError};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Filename of the shared configuration document.
pub const CONFIG_FILENAME: &str = "config.json";

/// Directory name of the persistent browser profile, kept next to the
/// executable so session cookies survive restarts.
pub const PROFILE_DIR_NAME: &str = "BrowserProfile";

/// User-editable settings for the automation loop.
///
/// The JSON key names are a fixed external interface shared with earlier
/// releases; the Rust field names are the readable versions. Missing keys
/// fall back to the hardcoded defaults below. Unknown keys are preserved
/// across load/save via the flattened `extra` map, but never interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotConfig {
    /// Seconds to idle after the login gate succeeds, before the first scan.
    #[serde(rename = "STALL_AFTER_LOGIN", default = "default_stall_after_login")]
    pub stall_after_login: u64,

    /// Earliest acceptable shift start, 24-hour "HH:MM".
    #[serde(rename = "EARLIEST_TIME", default = "default_earliest_time")]
    pub earliest_time: String,

    /// Latest acceptable shift start, 24-hour "HH:MM".
    #[serde(rename = "LATEST_TIME", default = "default_latest_time")]
    pub latest_time: String,

    /// Maximum acceptable shift duration in hours (fractional allowed).
    #[serde(rename = "LONGEST_SHIFT", default = "default_longest_shift")]
    pub longest_shift: f64,

    /// Weekday names on which shifts may be claimed.
    #[serde(rename = "WEEKDAYS", default = "default_weekdays")]
    pub weekdays: Vec<String>,

    /// Login identifier typed into the portal's username field.
    #[serde(rename = "Amazon_Login", default = "default_login")]
    pub login: String,

    /// Total wall-clock budget for one run, in hours.
    #[serde(rename = "HOURS_TO_RUN", default = "default_hours_to_run")]
    pub hours_to_run: f64,

    /// Pause between calendar scans, in seconds.
    #[serde(
        rename = "SECONDS_BETWEEN_CHECKS",
        default = "default_seconds_between_checks"
    )]
    pub seconds_between_checks: u64,

    /// Keys we don't understand, preserved verbatim on save.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

fn default_stall_after_login() -> u64 {
    2
}

fn default_earliest_time() -> String {
    "18:15".to_string()
}

fn default_latest_time() -> String {
    "18:30".to_string()
}

fn default_longest_shift() -> f64 {
    10.0
}

fn default_weekdays() -> Vec<String> {
    vec![
        "Monday".to_string(),
        "Tuesday".to_string(),
        "Sunday".to_string(),
    ]
}

fn default_login() -> String {
    "jerdix".to_string()
}

fn default_hours_to_run() -> f64 {
    48.0
}

fn default_seconds_between_checks() -> u64 {
    15
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            stall_after_login: default_stall_after_login(),
            earliest_time: default_earliest_time(),
            latest_time: default_latest_time(),
            longest_shift: default_longest_shift(),
            weekdays: default_weekdays(),
            login: default_login(),
            hours_to_run: default_hours_to_run(),
            seconds_between_checks: default_seconds_between_checks(),
            extra: serde_json::Map::new(),
        }
    }
}

impl BotConfig {
    /// Load the configuration from `path`.
    ///
    /// A missing, unreadable, or corrupt file is not an error: the defaults
    /// are returned and the problem is reported on stderr. The automation
    /// loop calls this on every iteration, so a half-written file (the GUI
    /// saves on each keystroke) must never take the bot down.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Error loading config ({}): {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("Error reading config ({}): {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save the configuration as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Set a single key from its JSON name, coercing the raw string value
    /// best-effort. Unknown keys are stored verbatim in the extra map.
    pub fn set_key(&mut self, key: &str, raw: &str) -> Result<()> {
        match key {
            "STALL_AFTER_LOGIN" => self.stall_after_login = parse_number(key, raw)?,
            "EARLIEST_TIME" => self.earliest_time = raw.to_string(),
            "LATEST_TIME" => self.latest_time = raw.to_string(),
            "LONGEST_SHIFT" => self.longest_shift = parse_number(key, raw)?,
            "WEEKDAYS" => {
                self.weekdays = raw
                    .split(',')
                    .map(|d| d.trim().to_string())
                    .filter(|d| !d.is_empty())
                    .collect();
            }
            "Amazon_Login" => self.login = raw.to_string(),
            "HOURS_TO_RUN" => self.hours_to_run = parse_number(key, raw)?,
            "SECONDS_BETWEEN_CHECKS" => self.seconds_between_checks = parse_number(key, raw)?,
            other => {
                self.extra
                    .insert(other.to_string(), serde_json::Value::String(raw.to_string()));
            }
        }
        Ok(())
    }

    /// True if `weekday_label` (as rendered by the portal) matches one of
    /// the configured weekday names. Substring containment, so a label like
    /// "Monday, Jun 2" matches a configured "Monday".
    pub fn allows_weekday(&self, weekday_label: &str) -> bool {
        self.weekdays.iter().any(|day| weekday_label.contains(day))
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| ShiftgrabError::Config(format!("{} expects a number, got {:?}", key, raw)))
}

/// Directory the running executable sits in, falling back to the current
/// directory when the executable path cannot be resolved.
pub fn executable_dir() -> PathBuf {
    env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Path of the shared config file, next to the executable.
pub fn config_path() -> PathBuf {
    executable_dir().join(CONFIG_FILENAME)
}

/// Path of the persistent browser profile directory, next to the executable.
pub fn profile_dir() -> PathBuf {
    executable_dir().join(PROFILE_DIR_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BotConfig::default();
        assert_eq!(config.stall_after_login, 2);
        assert_eq!(config.earliest_time, "18:15");
        assert_eq!(config.latest_time, "18:30");
        assert!((config.longest_shift - 10.0).abs() < f64::EPSILON);
        assert_eq!(config.weekdays, vec!["Monday", "Tuesday", "Sunday"]);
        assert_eq!(config.login, "jerdix");
        assert!((config.hours_to_run - 48.0).abs() < f64::EPSILON);
        assert_eq!(config.seconds_between_checks, 15);
    }

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = BotConfig::load(&dir.path().join("nope.json"));
        assert_eq!(config, BotConfig::default());
    }

    #[test]
    fn test_load_corrupt_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        fs::write(&path, "{not json").unwrap();
        let config = BotConfig::load(&path);
        assert_eq!(config, BotConfig::default());
    }

    #[test]
    fn test_missing_keys_fall_back_individually() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        fs::write(&path, r#"{"EARLIEST_TIME": "06:00", "LONGEST_SHIFT": 4.5}"#).unwrap();

        let config = BotConfig::load(&path);
        assert_eq!(config.earliest_time, "06:00");
        assert!((config.longest_shift - 4.5).abs() < f64::EPSILON);
        // Everything else keeps its default
        assert_eq!(config.latest_time, "18:30");
        assert_eq!(config.seconds_between_checks, 15);
    }

    #[test]
    fn test_unknown_keys_preserved_on_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        fs::write(
            &path,
            r#"{"Amazon_Login": "someone", "FUTURE_SETTING": [1, 2, 3]}"#,
        )
        .unwrap();

        let config = BotConfig::load(&path);
        assert_eq!(config.login, "someone");
        config.save(&path).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["FUTURE_SETTING"], serde_json::json!([1, 2, 3]));
        assert_eq!(raw["Amazon_Login"], "someone");
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);

        let mut config = BotConfig::default();
        config.login = "worker42".to_string();
        config.weekdays = vec!["Friday".to_string()];
        config.save(&path).unwrap();

        let loaded = BotConfig::load(&path);
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_set_key_coerces_numbers() {
        let mut config = BotConfig::default();
        config.set_key("LONGEST_SHIFT", "8.5").unwrap();
        assert!((config.longest_shift - 8.5).abs() < f64::EPSILON);

        config.set_key("SECONDS_BETWEEN_CHECKS", "30").unwrap();
        assert_eq!(config.seconds_between_checks, 30);

        assert!(config.set_key("HOURS_TO_RUN", "lots").is_err());
    }

    #[test]
    fn test_set_key_weekdays_splits_on_commas() {
        let mut config = BotConfig::default();
        config.set_key("WEEKDAYS", "Monday, Friday").unwrap();
        assert_eq!(config.weekdays, vec!["Monday", "Friday"]);
    }

    #[test]
    fn test_set_key_unknown_goes_to_extra() {
        let mut config = BotConfig::default();
        config.set_key("SOMETHING_ELSE", "hello").unwrap();
        assert_eq!(
            config.extra.get("SOMETHING_ELSE"),
            Some(&serde_json::Value::String("hello".to_string()))
        );
    }

    #[test]
    fn test_allows_weekday_uses_substring_match() {
        let config = BotConfig::default();
        assert!(config.allows_weekday("Monday"));
        assert!(config.allows_weekday("Monday, Jun 2"));
        assert!(!config.allows_weekday("Wednesday"));
    }
}
