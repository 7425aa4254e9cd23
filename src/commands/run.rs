//! Run command handler.
//!
//! Builds the tokio runtime and drives one bot run. This is the process
//! the GUI spawns; it talks to the terminal (or the GUI console) through
//! the `output` module only.

use crate::config;
use crate::error::Result;
use crate::output;
use crate::runner::{BotRunner, RunOptions};
use crate::signal::SignalHandler;
use std::path::PathBuf;

/// Run the automation loop until its hour budget is spent.
///
/// # Arguments
///
/// * `webdriver_url` - Address of the local chromedriver.
/// * `config_file` - Config path override; defaults to `config.json` next
///   to the executable.
pub fn run_command(webdriver_url: String, config_file: Option<PathBuf>) -> Result<()> {
    output::print_header();

    let options = RunOptions {
        webdriver_url,
        config_path: config_file.unwrap_or_else(config::config_path),
        profile_dir: config::profile_dir(),
    };

    let signals = SignalHandler::new()?;
    let runner = BotRunner::new(options, signals);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(runner.run())
}
