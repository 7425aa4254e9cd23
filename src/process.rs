//! Bot child-process management for the control surface.
//!
//! The GUI runs the automation loop as a child process (`shiftgrab run`)
//! with piped output. One reader thread per pipe forwards lines into a
//! shared channel the UI drains, so stdout and stderr interleave into a
//! single live log. The child handle sits behind a mutex so `stop()` can
//! kill it from the UI thread while the readers are still draining.

use std::io::{BufRead, BufReader};
use std::process::{Child, ChildStderr, ChildStdout, Command, Stdio};
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;

use regex::Regex;

use crate::error::{Result, ShiftgrabError};

/// Something the bot process produced or did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotEvent {
    /// One line of merged stdout/stderr, ANSI colors stripped.
    Line(String),
    /// The process is gone, with its exit code when known.
    Exited(Option<i32>),
}

/// The shared child slot. The generation counter ties each reader thread
/// to the spawn it belongs to, so a stale reader from a previous run can
/// never reap a newer child.
#[derive(Default)]
struct ChildSlot {
    child: Option<Child>,
    generation: u64,
}

/// Handle to the (at most one) running bot child process.
#[derive(Clone)]
pub struct BotProcess {
    slot: Arc<Mutex<ChildSlot>>,
}

impl BotProcess {
    pub fn new() -> Self {
        Self {
            slot: Arc::new(Mutex::new(ChildSlot::default())),
        }
    }

    /// Spawn `shiftgrab run` and start streaming its output into `sender`.
    ///
    /// # Errors
    ///
    /// [`ShiftgrabError::BotAlreadyRunning`] if a previous child is still
    /// alive, or a spawn/pipe error.
    pub fn start(&self, sender: Sender<BotEvent>) -> Result<()> {
        let mut slot = self.lock()?;
        if let Some(child) = slot.child.as_mut() {
            if child.try_wait()?.is_none() {
                return Err(ShiftgrabError::BotAlreadyRunning);
            }
            // Exited but not yet reaped by its reader; reap it here.
            if let Some(mut stale) = slot.child.take() {
                let _ = stale.wait();
            }
        }

        let exe = std::env::current_exe()?;
        let mut child = Command::new(exe)
            .arg("run")
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| ShiftgrabError::BotProcess("Failed to capture stdout".into()))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| ShiftgrabError::BotProcess("Failed to capture stderr".into()))?;

        slot.generation += 1;
        let generation = slot.generation;
        slot.child = Some(child);
        drop(slot);

        spawn_stderr_reader(stderr, sender.clone());
        spawn_stdout_reader(stdout, sender, self.slot.clone(), generation);
        Ok(())
    }

    /// Kill the child if it is running and reap it.
    ///
    /// Safe to call when nothing is running. Returns `Ok(true)` if a
    /// process was killed.
    pub fn stop(&self) -> Result<bool> {
        let mut slot = self.lock()?;
        if let Some(mut child) = slot.child.take() {
            if let Err(e) = child.kill() {
                // Already exited on its own is not an error.
                if e.kind() != std::io::ErrorKind::InvalidInput {
                    return Err(ShiftgrabError::BotProcess(format!(
                        "Failed to kill bot process: {}",
                        e
                    )));
                }
            }
            let _ = child.wait();
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Whether a child is currently alive.
    pub fn is_running(&self) -> bool {
        let mut slot = match self.lock() {
            Ok(slot) => slot,
            Err(_) => return false,
        };
        match slot.child.as_mut() {
            Some(child) => matches!(child.try_wait(), Ok(None)),
            None => false,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, ChildSlot>> {
        self.slot
            .lock()
            .map_err(|e| ShiftgrabError::BotProcess(format!("Process lock poisoned: {}", e)))
    }
}

impl Default for BotProcess {
    fn default() -> Self {
        Self::new()
    }
}

/// The stdout reader owns end-of-life detection: at EOF it takes the child
/// out of the shared slot (unless `stop()` got there first, or a newer
/// generation replaced it), reaps it, and reports the exit.
fn spawn_stdout_reader(
    stdout: ChildStdout,
    sender: Sender<BotEvent>,
    slot: Arc<Mutex<ChildSlot>>,
    generation: u64,
) {
    thread::spawn(move || {
        forward_lines(BufReader::new(stdout), &sender);

        let exit_code = slot
            .lock()
            .ok()
            .and_then(|mut slot| {
                if slot.generation == generation {
                    slot.child.take()
                } else {
                    None
                }
            })
            .and_then(|mut child| child.wait().ok())
            .and_then(|status| status.code());
        let _ = sender.send(BotEvent::Exited(exit_code));
    });
}

fn spawn_stderr_reader(stderr: ChildStderr, sender: Sender<BotEvent>) {
    thread::spawn(move || {
        forward_lines(BufReader::new(stderr), &sender);
    });
}

fn forward_lines<R: BufRead>(reader: R, sender: &Sender<BotEvent>) {
    let ansi = ansi_pattern();
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(_) => break,
        };
        if sender.send(BotEvent::Line(strip_ansi(&ansi, &line))).is_err() {
            break;
        }
    }
}

fn ansi_pattern() -> Regex {
    // Only SGR sequences; that's all the bot emits.
    Regex::new("\x1b\\[[0-9;]*m").unwrap()
}

/// The bot colors its terminal output; the GUI console wants plain text.
fn strip_ansi(pattern: &Regex, line: &str) -> String {
    pattern.replace_all(line, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_running_initially() {
        let bot = BotProcess::new();
        assert!(!bot.is_running());
    }

    #[test]
    fn test_stop_without_child_is_ok() {
        let bot = BotProcess::new();
        assert!(!bot.stop().unwrap());
    }

    #[test]
    fn test_clones_share_the_child_slot() {
        let bot = BotProcess::new();
        let clone = bot.clone();
        assert!(Arc::ptr_eq(&bot.slot, &clone.slot));
    }

    #[test]
    fn test_stale_reader_generation_does_not_match() {
        let bot = BotProcess::new();
        {
            let mut slot = bot.lock().unwrap();
            slot.generation = 2;
        }
        // A reader from generation 1 must not touch the slot.
        let slot = bot.slot.lock().unwrap();
        assert_ne!(slot.generation, 1);
    }

    #[test]
    fn test_strip_ansi_removes_sgr_sequences() {
        let pattern = ansi_pattern();
        assert_eq!(
            strip_ansi(&pattern, "\x1b[32m\x1b[1mMATCH!\x1b[0m 4.75hr"),
            "MATCH! 4.75hr"
        );
    }

    #[test]
    fn test_strip_ansi_leaves_plain_text_alone() {
        let pattern = ansi_pattern();
        assert_eq!(strip_ansi(&pattern, "No shifts found."), "No shifts found.");
    }
}
