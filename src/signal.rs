//! Signal handling infrastructure for graceful shutdown.
//!
//! Registers a SIGINT (Ctrl+C) handler that sets an internal flag. The run
//! loop checks the flag at iteration and sleep boundaries without blocking;
//! an in-flight calendar scan runs to completion before the check is seen.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{Result, ShiftgrabError};

/// Handles SIGINT signals for graceful shutdown.
///
/// Clones share the same underlying atomic flag, so a handler can be given
/// to any thread that needs to observe the shutdown request.
#[derive(Clone)]
pub struct SignalHandler {
    shutdown_flag: Arc<AtomicBool>,
}

impl SignalHandler {
    /// Creates a new `SignalHandler` and registers the SIGINT handler.
    ///
    /// # Errors
    ///
    /// Returns an error if the signal handler cannot be registered (ctrlc
    /// only allows one handler per process).
    pub fn new() -> Result<Self> {
        let shutdown_flag = Arc::new(AtomicBool::new(false));
        let flag_clone = Arc::clone(&shutdown_flag);

        ctrlc::set_handler(move || {
            flag_clone.store(true, Ordering::SeqCst);
        })
        .map_err(|e| ShiftgrabError::SignalHandler(e.to_string()))?;

        Ok(Self { shutdown_flag })
    }

    /// Checks if a shutdown has been requested (non-blocking).
    pub fn is_shutdown_requested(&self) -> bool {
        self.shutdown_flag.load(Ordering::SeqCst)
    }

    #[cfg(test)]
    pub fn stub(flag: Arc<AtomicBool>) -> Self {
        Self {
            shutdown_flag: flag,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_shutdown_requested_returns_false_initially() {
        let handler = SignalHandler::stub(Arc::new(AtomicBool::new(false)));
        assert!(!handler.is_shutdown_requested());
    }

    #[test]
    fn test_is_shutdown_requested_returns_true_when_flag_set() {
        let flag = Arc::new(AtomicBool::new(false));
        let handler = SignalHandler::stub(flag.clone());

        flag.store(true, Ordering::SeqCst);

        assert!(handler.is_shutdown_requested());
    }

    #[test]
    fn test_handler_clone_shares_state() {
        let flag = Arc::new(AtomicBool::new(false));
        let handler1 = SignalHandler::stub(flag.clone());
        let handler2 = handler1.clone();

        assert!(!handler1.is_shutdown_requested());
        assert!(!handler2.is_shutdown_requested());

        flag.store(true, Ordering::SeqCst);

        assert!(handler1.is_shutdown_requested());
        assert!(handler2.is_shutdown_requested());
    }
}
