//! The outer automation loop.
//!
//! Owns the session lifecycle: sleep guard, browser connection, login gate,
//! then scan/sleep cycles until the run budget is spent or the user
//! interrupts. The sleep is taken in small increments that re-read the live
//! poll-interval setting, so shrinking `SECONDS_BETWEEN_CHECKS` in the GUI
//! takes effect mid-wait without a restart.
//!
//! Shutdown is checked at iteration and sleep boundaries only; a scan pass
//! already underway runs to completion first.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::config::BotConfig;
use crate::error::Result;
use crate::output;
use crate::portal::{ensure_authenticated, run_scan_pass, PortalSession};
use crate::signal::SignalHandler;
use crate::wake::SleepGuard;

/// Granularity of the between-scans wait.
const SLEEP_INCREMENT: Duration = Duration::from_secs(5);

/// Where to find the world: webdriver endpoint, config file, profile dir.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub webdriver_url: String,
    pub config_path: PathBuf,
    pub profile_dir: PathBuf,
}

/// Drives one bot run from connect to quit.
pub struct BotRunner {
    options: RunOptions,
    signals: SignalHandler,
}

impl BotRunner {
    pub fn new(options: RunOptions, signals: SignalHandler) -> Self {
        Self { options, signals }
    }

    /// Run until the hour budget is exhausted or a shutdown is requested.
    ///
    /// The sleep guard is scoped to this call; every exit path (including
    /// errors and interrupts) releases it. The browser session is closed
    /// best-effort on the way out.
    pub async fn run(&self) -> Result<()> {
        let _sleep_guard = SleepGuard::acquire();
        let started = Instant::now();

        output::print_status("Connecting to browser...");
        let session =
            PortalSession::connect(&self.options.webdriver_url, &self.options.profile_dir).await?;

        let outcome = self.run_authenticated(&session, started).await;
        let _ = session.quit().await;
        outcome
    }

    async fn run_authenticated(&self, session: &PortalSession, started: Instant) -> Result<()> {
        let config = BotConfig::load(&self.options.config_path);
        ensure_authenticated(session, &config.login).await?;

        tokio::time::sleep(Duration::from_secs(config.stall_after_login)).await;

        loop {
            if self.signals.is_shutdown_requested() {
                output::print_interrupted();
                return Ok(());
            }

            let config = BotConfig::load(&self.options.config_path);
            if budget_exhausted(started.elapsed(), config.hours_to_run) {
                output::print_budget_exhausted(config.hours_to_run);
                return Ok(());
            }

            run_scan_pass(session, &self.options.config_path).await?;
            session.back_home().await;

            if self.sleep_between_checks().await {
                output::print_interrupted();
                return Ok(());
            }
        }
    }

    /// Wait out the poll interval in small increments, re-reading the live
    /// setting each time. Returns `true` if a shutdown was requested.
    async fn sleep_between_checks(&self) -> bool {
        let pass_done = Instant::now();
        output::print_sleeping(
            BotConfig::load(&self.options.config_path).seconds_between_checks,
        );
        loop {
            let config = BotConfig::load(&self.options.config_path);
            if pass_done.elapsed() >= Duration::from_secs(config.seconds_between_checks) {
                return false;
            }
            if self.signals.is_shutdown_requested() {
                return true;
            }
            tokio::time::sleep(SLEEP_INCREMENT).await;
        }
    }
}

/// True once the elapsed wall-clock time meets the configured hour budget.
pub fn budget_exhausted(elapsed: Duration, hours_to_run: f64) -> bool {
    elapsed.as_secs_f64() >= hours_to_run * 3600.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_not_exhausted_early() {
        assert!(!budget_exhausted(Duration::from_secs(3599), 1.0));
    }

    #[test]
    fn test_budget_exhausted_at_boundary() {
        assert!(budget_exhausted(Duration::from_secs(3600), 1.0));
    }

    #[test]
    fn test_budget_handles_fractional_hours() {
        assert!(budget_exhausted(Duration::from_secs(1800), 0.5));
        assert!(!budget_exhausted(Duration::from_secs(1799), 0.5));
    }

    #[test]
    fn test_zero_budget_exhausts_immediately() {
        assert!(budget_exhausted(Duration::ZERO, 0.0));
    }
}
