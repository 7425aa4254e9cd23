//! Best-effort sleep prevention for the bot process lifetime.
//!
//! A scan that runs for hours is useless if the machine sleeps between
//! polls. On macOS we hold a `caffeinate -d` child for the duration of the
//! run. Elsewhere this is a logged no-op. Acquisition failures are ignored;
//! release happens on every exit path via `Drop`.

use std::process::Child;

use crate::output;

/// Scoped wake lock. Held by the run loop; dropping it releases the lock.
pub struct SleepGuard {
    keeper: Option<Child>,
}

impl SleepGuard {
    /// Acquire the platform wake lock, best-effort.
    pub fn acquire() -> Self {
        let keeper = spawn_keeper();
        if keeper.is_some() {
            output::print_detail("System sleep prevention enabled.");
        } else {
            output::print_detail("System sleep prevention unavailable on this platform.");
        }
        Self { keeper }
    }

    /// Release the wake lock. Idempotent; also runs on drop.
    pub fn release(&mut self) {
        if let Some(mut child) = self.keeper.take() {
            let _ = child.kill();
            let _ = child.wait();
            output::print_detail("System sleep prevention disabled.");
        }
    }
}

impl Drop for SleepGuard {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(target_os = "macos")]
fn spawn_keeper() -> Option<Child> {
    std::process::Command::new("caffeinate")
        .arg("-d")
        .spawn()
        .ok()
}

#[cfg(not(target_os = "macos"))]
fn spawn_keeper() -> Option<Child> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_is_idempotent() {
        let mut guard = SleepGuard { keeper: None };
        guard.release();
        guard.release();
    }

    #[test]
    fn test_drop_without_keeper_is_noop() {
        let guard = SleepGuard { keeper: None };
        drop(guard);
    }
}
