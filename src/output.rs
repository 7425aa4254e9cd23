//! Console output helpers for the bot process.
//!
//! Everything the bot prints goes through here. The GUI relays this stream
//! line by line into its console view, so helpers favor single-line,
//! immediately flushed output.

use crate::calendar::ScanWindow;
use std::io::Write;
use terminal_size::{terminal_size, Width};

// ANSI color codes
pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";
pub const RED: &str = "\x1b[31m";
pub const GRAY: &str = "\x1b[90m";

const DEFAULT_TERMINAL_WIDTH: usize = 80;
const MIN_BANNER_WIDTH: usize = 20;
const MAX_BANNER_WIDTH: usize = 80;

fn banner_width() -> usize {
    terminal_size()
        .map(|(Width(w), _)| w as usize)
        .unwrap_or(DEFAULT_TERMINAL_WIDTH)
        .clamp(MIN_BANNER_WIDTH, MAX_BANNER_WIDTH)
}

/// Print a `━━━ LABEL ━━━` banner in cyan, width-adapted to the terminal.
pub fn print_banner(label: &str) {
    let width = banner_width();
    let label_with_spaces = format!(" {} ", label);
    let label_len = label_with_spaces.chars().count();
    let remaining = width.saturating_sub(label_len);
    let left = remaining / 2;
    let right = remaining - left;

    println!(
        "{CYAN}{BOLD}{}{}{}{RESET}",
        "━".repeat(left),
        label_with_spaces,
        "━".repeat(right)
    );
    flush();
}

pub fn print_header() {
    println!("{CYAN}{BOLD}shiftgrab v{}{RESET}", env!("CARGO_PKG_VERSION"));
    flush();
}

pub fn print_status(message: &str) {
    println!("{}", message);
    flush();
}

pub fn print_detail(message: &str) {
    println!("{GRAY}{}{RESET}", message);
    flush();
}

pub fn print_warning(message: &str) {
    println!("{YELLOW}{}{RESET}", message);
    flush();
}

pub fn print_error(message: &str) {
    eprintln!("{RED}{BOLD}Error:{RESET} {}", message);
    let _ = std::io::stderr().flush();
}

pub fn print_scan_start(window: &ScanWindow) {
    println!(
        "{BLUE}Checking schedule from {} to {}...{RESET}",
        window.start.format("%b %-d"),
        window.end.format("%b %-d")
    );
    flush();
}

pub fn print_day_checking(position: usize, weekday: &str, date: &str) {
    println!("{BOLD}--- Checking day {}: {}, {} ---{RESET}", position, weekday, date);
    flush();
}

pub fn print_day_skipped(position: usize, reason: &str) {
    println!("{DIM}Day {} skipped: {}{RESET}", position, reason);
    flush();
}

pub fn print_scan_stopped(date: &str) {
    println!("{YELLOW}--- Reached {}, past the scan window. Stopping this pass. ---{RESET}", date);
    flush();
}

pub fn print_match_found(range: &str, duration_hours: f64) {
    println!(
        "    {GREEN}{BOLD}MATCH!{RESET} {:.2}hr shift: {}",
        duration_hours, range
    );
    flush();
}

pub fn print_claim_confirmed() {
    println!("    {GREEN}Shift claimed successfully!{RESET}");
    flush();
}

pub fn print_no_shifts() {
    println!("{DIM}  No shifts found.{RESET}");
    flush();
}

pub fn print_pass_summary(days_checked: usize, shifts_seen: usize, claims: usize) {
    println!(
        "{BLUE}Pass done:{RESET} {} days checked, {} shifts seen, {} claimed",
        days_checked, shifts_seen, claims
    );
    flush();
}

pub fn print_sleeping(seconds: u64) {
    println!("{DIM}Next check in {}s...{RESET}", seconds);
    flush();
}

pub fn print_budget_exhausted(hours: f64) {
    println!("{YELLOW}{BOLD}Run budget of {:.1}h exhausted. Shutting down.{RESET}", hours);
    flush();
}

pub fn print_interrupted() {
    println!();
    println!("{YELLOW}Stopped by user.{RESET}");
    flush();
}

/// Stdout is piped into the GUI; keep lines arriving promptly.
fn flush() {
    let _ = std::io::stdout().flush();
}
