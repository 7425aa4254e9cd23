//! shiftgrab CLI entry point.
//!
//! Parses command-line arguments and dispatches to the appropriate command
//! handler. With no subcommand the GUI control surface opens; the GUI in
//! turn spawns `shiftgrab run` as its child process.

use clap::{CommandFactory, Parser, Subcommand};
use shiftgrab::commands::{config_set_command, config_show_command, gui_command, run_command};
use shiftgrab::completion::{detect_shell, write_completion_script, SUPPORTED_SHELLS};
use shiftgrab::error::Result;
use shiftgrab::output::print_error;
use std::path::PathBuf;

/// Default chromedriver endpoint. Start it with `chromedriver --port=9515`.
const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:9515";

#[derive(Parser)]
#[command(name = "shiftgrab")]
#[command(
    version,
    about = "Desktop automation tool for claiming open shifts on the A to Z portal",
    after_help = "EXAMPLES:
    # Open the control surface (default)
    shiftgrab
    shiftgrab gui

    # Run the automation loop headless-ish in a terminal
    # (requires a running chromedriver, e.g. `chromedriver --port=9515`)
    shiftgrab run
    shiftgrab run --webdriver-url http://localhost:4444

    # Inspect or edit the shared configuration
    shiftgrab config
    shiftgrab config set LONGEST_SHIFT 8.5
    shiftgrab config set WEEKDAYS \"Monday, Friday\""
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the automation loop until its hour budget is spent
    #[command(after_help = "EXAMPLES:
    shiftgrab run
    shiftgrab run --config ./config.json

BEHAVIOR:
    Connects to chromedriver, logs into the portal (reusing the persistent
    browser profile when possible), then scans the shift calendar every
    SECONDS_BETWEEN_CHECKS seconds for up to HOURS_TO_RUN hours. Config
    edits take effect live, at the next day or poll boundary.")]
    Run {
        /// Address of the local chromedriver
        #[arg(long, default_value = DEFAULT_WEBDRIVER_URL)]
        webdriver_url: String,

        /// Config file override (defaults to config.json next to the executable)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Open the GUI control surface (the default)
    Gui,

    /// View or modify configuration values
    #[command(after_help = "EXAMPLES:
    shiftgrab config                         # Show resolved config and path
    shiftgrab config set EARLIEST_TIME 17:00
    shiftgrab config set WEEKDAYS \"Monday, Tuesday\"

KEYS:
    STALL_AFTER_LOGIN, EARLIEST_TIME, LATEST_TIME, LONGEST_SHIFT,
    WEEKDAYS, Amazon_Login, HOURS_TO_RUN, SECONDS_BETWEEN_CHECKS")]
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,

        /// Config file override
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate for (bash, zsh, fish); auto-detected from $SHELL
        shell: Option<String>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Set a configuration value
    Set {
        /// JSON key name, e.g. LONGEST_SHIFT
        key: String,
        /// New value (best-effort coerced to the key's type)
        value: String,
    },
}

fn completions_command(shell_arg: Option<String>) -> Result<()> {
    let shell = match shell_arg {
        Some(name) => name.parse()?,
        None => detect_shell()?,
    };
    let mut command = Cli::command();
    write_completion_script(shell, &mut command, &mut std::io::stdout());
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Run {
            webdriver_url,
            config,
        }) => run_command(webdriver_url, config),
        Some(Commands::Config { action, config }) => match action {
            Some(ConfigAction::Set { key, value }) => config_set_command(&key, &value, config),
            None => config_show_command(config),
        },
        Some(Commands::Completions { shell }) => completions_command(shell),
        Some(Commands::Gui) | None => gui_command(),
    };

    if let Err(e) = result {
        print_error(&e.to_string());
        if matches!(e, shiftgrab::ShiftgrabError::ShellCompletion(_)) {
            eprintln!("Supported shells: {}", SUPPORTED_SHELLS.join(", "));
        }
        std::process::exit(1);
    }
}
