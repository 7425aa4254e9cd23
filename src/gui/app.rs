//! GUI application entry point.
//!
//! One window, two panels: configuration on the left (saved to the shared
//! config file on every edit), the run dashboard on the right with
//! start/stop controls and the live bot console.

use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};
use std::time::Duration;

use eframe::egui::{self, Color32, RichText};

use crate::config::{self, BotConfig};
use crate::error::{Result, ShiftgrabError};
use crate::gui::components::{
    lifecycle_line, parse_field_f64, parse_field_u64, selected_weekdays, weekday_flags,
    WEEKDAY_NAMES,
};
use crate::gui::theme::{self, colors, rounding, spacing};
use crate::process::{BotEvent, BotProcess};

/// Default window width in pixels.
const DEFAULT_WIDTH: f32 = 850.0;

/// Default window height in pixels.
const DEFAULT_HEIGHT: f32 = 800.0;

/// Minimum window size in pixels.
const MIN_WIDTH: f32 = 600.0;
const MIN_HEIGHT: f32 = 480.0;

/// Width of the settings panel.
const SETTINGS_PANEL_WIDTH: f32 = 360.0;

/// Console font size.
const CONSOLE_TEXT_SIZE: f32 = 12.0;

/// Repaint cadence while the bot is running, so console lines show up
/// without waiting for user input.
const RUNNING_REPAINT_MS: u64 = 250;

/// Oldest console lines are dropped past this count.
const MAX_LOG_LINES: usize = 2000;

/// The main GUI application state.
pub struct ShiftgrabApp {
    config_path: PathBuf,
    config: BotConfig,

    // Text buffers for the numeric/time fields; coerced best-effort on
    // change so half-typed values never clobber the stored config.
    login_input: String,
    earliest_input: String,
    latest_input: String,
    longest_shift_input: String,
    hours_to_run_input: String,
    seconds_input: String,
    weekday_checks: [bool; 7],

    bot: BotProcess,
    events: Option<Receiver<BotEvent>>,
    log_lines: Vec<String>,
}

impl ShiftgrabApp {
    pub fn new() -> Self {
        Self::with_config_path(config::config_path())
    }

    fn with_config_path(config_path: PathBuf) -> Self {
        let config = BotConfig::load(&config_path);
        Self {
            login_input: config.login.clone(),
            earliest_input: config.earliest_time.clone(),
            latest_input: config.latest_time.clone(),
            longest_shift_input: config.longest_shift.to_string(),
            hours_to_run_input: config.hours_to_run.to_string(),
            seconds_input: config.seconds_between_checks.to_string(),
            weekday_checks: weekday_flags(&config.weekdays),
            config,
            config_path,
            bot: BotProcess::new(),
            events: None,
            log_lines: Vec::new(),
        }
    }

    fn push_log(&mut self, line: String) {
        self.log_lines.push(line);
        if self.log_lines.len() > MAX_LOG_LINES {
            let excess = self.log_lines.len() - MAX_LOG_LINES;
            self.log_lines.drain(..excess);
        }
    }

    fn drain_bot_events(&mut self) {
        let mut pending = Vec::new();
        if let Some(events) = &self.events {
            while let Ok(event) = events.try_recv() {
                pending.push(event);
            }
        }
        for event in pending {
            match event {
                BotEvent::Line(line) => self.push_log(line),
                BotEvent::Exited(code) => {
                    let message = match code {
                        Some(code) => format!("Bot process terminated (exit code {})", code),
                        None => "Bot process terminated".to_string(),
                    };
                    self.push_log(lifecycle_line(&message));
                }
            }
        }
    }

    fn start_bot(&mut self) {
        let (sender, receiver) = channel();
        match self.bot.start(sender) {
            Ok(()) => {
                self.events = Some(receiver);
                self.push_log(lifecycle_line("Bot started"));
            }
            Err(e) => self.push_log(format!("Failed to start bot: {}", e)),
        }
    }

    fn stop_bot(&mut self) {
        match self.bot.stop() {
            Ok(true) => self.push_log(lifecycle_line("Stop signal sent to bot")),
            Ok(false) => self.push_log(lifecycle_line("Bot was not running")),
            Err(e) => self.push_log(format!("Failed to stop bot: {}", e)),
        }
    }

    /// Fold the edit buffers back into the config and save. Unparseable
    /// numeric fields keep their previous value.
    fn apply_edits(&mut self) {
        self.config.login = self.login_input.clone();
        self.config.earliest_time = self.earliest_input.clone();
        self.config.latest_time = self.latest_input.clone();
        if let Some(value) = parse_field_f64(&self.longest_shift_input) {
            self.config.longest_shift = value;
        }
        if let Some(value) = parse_field_f64(&self.hours_to_run_input) {
            self.config.hours_to_run = value;
        }
        if let Some(value) = parse_field_u64(&self.seconds_input) {
            self.config.seconds_between_checks = value;
        }
        self.config.weekdays = selected_weekdays(&self.weekday_checks);

        if let Err(e) = self.config.save(&self.config_path) {
            self.push_log(format!("Error saving settings: {}", e));
        }
    }

    fn render_settings(&mut self, ui: &mut egui::Ui) {
        ui.heading(RichText::new("Configuration").color(colors::ACCENT));
        ui.add_space(spacing::MD);

        let mut changed = false;

        changed |= settings_card(ui, "Execution", |ui| {
            let mut c = false;
            c |= labeled_field(ui, "Hours to run", &mut self.hours_to_run_input);
            c |= labeled_field(ui, "Seconds between checks", &mut self.seconds_input);
            c
        });

        changed |= settings_card(ui, "Login", |ui| {
            labeled_field(ui, "Portal login", &mut self.login_input)
        });

        changed |= settings_card(ui, "Shift preferences", |ui| {
            let mut c = false;
            c |= labeled_field(ui, "Earliest start (HH:MM)", &mut self.earliest_input);
            c |= labeled_field(ui, "Latest start (HH:MM)", &mut self.latest_input);
            c |= labeled_field(ui, "Max shift length (hours)", &mut self.longest_shift_input);
            ui.add_space(spacing::SM);
            ui.label(RichText::new("Active days").color(colors::TEXT_SECONDARY));
            for (i, name) in WEEKDAY_NAMES.iter().enumerate() {
                c |= ui.checkbox(&mut self.weekday_checks[i], *name).changed();
            }
            c
        });

        if changed {
            self.apply_edits();
        }
    }

    fn render_dashboard(&mut self, ui: &mut egui::Ui) {
        ui.heading(RichText::new("Dashboard").color(colors::TEXT_PRIMARY));
        ui.add_space(spacing::MD);

        let running = self.bot.is_running();
        ui.horizontal(|ui| {
            let start = egui::Button::new(RichText::new("Start Automation").color(Color32::WHITE))
                .fill(colors::ACCENT)
                .rounding(rounding::BUTTON);
            if ui.add_enabled(!running, start).clicked() {
                self.start_bot();
            }

            let stop = egui::Button::new(RichText::new("Stop Bot").color(Color32::WHITE))
                .fill(colors::STATUS_ERROR)
                .rounding(rounding::BUTTON);
            if ui.add_enabled(running, stop).clicked() {
                self.stop_bot();
            }

            if running {
                ui.label(RichText::new("● running").color(colors::STATUS_RUNNING));
            }
        });

        ui.add_space(spacing::LG);
        ui.label(RichText::new("Live console").color(colors::TEXT_SECONDARY));
        ui.add_space(spacing::XS);

        egui::Frame::none()
            .fill(colors::CONSOLE)
            .rounding(rounding::CARD)
            .inner_margin(egui::Margin::same(spacing::MD))
            .show(ui, |ui| {
                egui::ScrollArea::vertical()
                    .stick_to_bottom(true)
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        for line in &self.log_lines {
                            ui.label(
                                RichText::new(line)
                                    .monospace()
                                    .size(CONSOLE_TEXT_SIZE)
                                    .color(colors::TEXT_PRIMARY),
                            );
                        }
                    });
            });
    }
}

impl eframe::App for ShiftgrabApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_bot_events();

        if self.bot.is_running() {
            ctx.request_repaint_after(Duration::from_millis(RUNNING_REPAINT_MS));
        }

        egui::SidePanel::left("settings")
            .exact_width(SETTINGS_PANEL_WIDTH)
            .resizable(false)
            .frame(
                egui::Frame::none()
                    .fill(colors::BACKGROUND)
                    .inner_margin(egui::Margin::same(spacing::XL)),
            )
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.render_settings(ui);
                });
            });

        egui::CentralPanel::default()
            .frame(
                egui::Frame::none()
                    .fill(colors::BACKGROUND)
                    .inner_margin(egui::Margin::same(spacing::XL)),
            )
            .show(ctx, |ui| {
                self.render_dashboard(ui);
            });
    }
}

impl Drop for ShiftgrabApp {
    fn drop(&mut self) {
        // Window closed with the bot still running: take it down too.
        let _ = self.bot.stop();
    }
}

fn settings_card(
    ui: &mut egui::Ui,
    title: &str,
    add_contents: impl FnOnce(&mut egui::Ui) -> bool,
) -> bool {
    let mut changed = false;
    egui::Frame::none()
        .fill(colors::SURFACE)
        .rounding(rounding::CARD)
        .inner_margin(egui::Margin::same(spacing::LG))
        .show(ui, |ui| {
            ui.label(RichText::new(title).strong());
            ui.add_space(spacing::SM);
            changed = add_contents(ui);
        });
    ui.add_space(spacing::MD);
    changed
}

fn labeled_field(ui: &mut egui::Ui, label: &str, buffer: &mut String) -> bool {
    ui.label(RichText::new(label).color(colors::TEXT_SECONDARY));
    let changed = ui
        .add(egui::TextEdit::singleline(buffer).desired_width(f32::INFINITY))
        .changed();
    ui.add_space(spacing::XS);
    changed
}

/// Launch the native GUI application.
///
/// Returns when the user closes the window. A bot child still running at
/// that point is terminated.
pub fn run_gui() -> Result<()> {
    let viewport = egui::ViewportBuilder::default()
        .with_title("shiftgrab")
        .with_inner_size([DEFAULT_WIDTH, DEFAULT_HEIGHT])
        .with_min_inner_size([MIN_WIDTH, MIN_HEIGHT]);

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "shiftgrab",
        options,
        Box::new(|cc| {
            theme::init(&cc.egui_ctx);
            Ok(Box::new(ShiftgrabApp::new()))
        }),
    )
    .map_err(|e| ShiftgrabError::Gui(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app() -> (tempfile::TempDir, ShiftgrabApp) {
        let dir = tempfile::tempdir().unwrap();
        let app = ShiftgrabApp::with_config_path(dir.path().join("config.json"));
        (dir, app)
    }

    #[test]
    fn test_new_app_seeds_buffers_from_config() {
        let (_dir, app) = test_app();
        assert_eq!(app.earliest_input, "18:15");
        assert_eq!(app.latest_input, "18:30");
        assert_eq!(app.login_input, "jerdix");
        // Monday, Tuesday, Sunday checked by default
        assert_eq!(
            app.weekday_checks,
            [true, true, false, false, false, false, true]
        );
    }

    #[test]
    fn test_apply_edits_ignores_partial_numeric_input() {
        let (_dir, mut app) = test_app();
        app.longest_shift_input = "8.".to_string();
        app.apply_edits();
        // Previous value survives the half-typed edit
        assert!((app.config.longest_shift - 10.0).abs() < f64::EPSILON);

        app.longest_shift_input = "8.5".to_string();
        app.apply_edits();
        assert!((app.config.longest_shift - 8.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_apply_edits_saves_weekdays_from_checks() {
        let (_dir, mut app) = test_app();
        app.weekday_checks = [false, false, false, false, true, false, false];
        app.apply_edits();
        assert_eq!(app.config.weekdays, vec!["Friday"]);
    }

    #[test]
    fn test_push_log_caps_line_count() {
        let (_dir, mut app) = test_app();
        for i in 0..(MAX_LOG_LINES + 50) {
            app.push_log(format!("line {}", i));
        }
        assert_eq!(app.log_lines.len(), MAX_LOG_LINES);
        assert_eq!(app.log_lines[0], "line 50");
    }
}
