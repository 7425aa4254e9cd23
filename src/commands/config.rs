//! Config command handlers.
//!
//! `shiftgrab config` prints the resolved configuration and where it came
//! from; `shiftgrab config set KEY VALUE` edits a single key with
//! best-effort type coercion, the same coercion the GUI applies.

use crate::config::{self, BotConfig};
use crate::error::Result;
use crate::output::{BOLD, DIM, RESET};
use std::path::PathBuf;

/// Print the resolved configuration and its path.
pub fn config_show_command(config_file: Option<PathBuf>) -> Result<()> {
    let path = config_file.unwrap_or_else(config::config_path);
    let config = BotConfig::load(&path);

    let state = if path.exists() {
        ""
    } else {
        " (not created yet, showing defaults)"
    };
    println!("{BOLD}Config:{RESET} {}{DIM}{}{RESET}", path.display(), state);
    println!();
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

/// Set one key and save.
pub fn config_set_command(key: &str, value: &str, config_file: Option<PathBuf>) -> Result<()> {
    let path = config_file.unwrap_or_else(config::config_path);
    let mut config = BotConfig::load(&path);
    config.set_key(key, value)?;
    config.save(&path)?;
    println!("Set {BOLD}{}{RESET} = {}", key, value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_set_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        config_set_command("LONGEST_SHIFT", "6", Some(path.clone())).unwrap();

        let config = BotConfig::load(&path);
        assert!((config.longest_shift - 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_config_show_tolerates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        assert!(config_show_command(Some(path)).is_ok());
    }
}
