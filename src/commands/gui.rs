//! GUI command handler.
//!
//! Launches the native control-surface window using eframe/egui.

use crate::error::Result;
use crate::gui::run_gui;

/// Launch the native GUI application.
///
/// Returns `Ok(())` when the user closes the window.
pub fn gui_command() -> Result<()> {
    run_gui()
}
