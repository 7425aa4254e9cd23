//! Theme and color system for the GUI.
//!
//! Dark palette with the product's orange accent. Spacing and rounding
//! constants keep the layout on a consistent rhythm; use these instead of
//! arbitrary pixel values.

use eframe::egui::{self, Color32, Visuals};

/// Spacing scale for consistent layout throughout the application.
pub mod spacing {
    /// Tight spacing between related elements (4px).
    pub const XS: f32 = 4.0;

    /// Standard spacing between related elements (8px).
    pub const SM: f32 = 8.0;

    /// Spacing between sections within a component (12px).
    pub const MD: f32 = 12.0;

    /// Component padding, gaps between cards (16px).
    pub const LG: f32 = 16.0;

    /// Spacing between major sections (24px).
    pub const XL: f32 = 24.0;
}

/// Corner rounding values for consistent UI elements.
pub mod rounding {
    /// Rounding for cards and panels (8px).
    pub const CARD: f32 = 8.0;

    /// Rounding for buttons and inputs (4px).
    pub const BUTTON: f32 = 4.0;
}

/// Semantic color palette (dark).
pub mod colors {
    use super::Color32;

    /// Primary window background.
    pub const BACKGROUND: Color32 = Color32::from_rgb(18, 18, 18);

    /// Surface color for cards and panels.
    pub const SURFACE: Color32 = Color32::from_rgb(30, 30, 30);

    /// Input field background.
    pub const INPUT: Color32 = Color32::from_rgb(44, 44, 44);

    /// Console background, darker than the surrounding panel.
    pub const CONSOLE: Color32 = Color32::from_rgb(10, 10, 10);

    /// Hairline borders between panels.
    pub const SEPARATOR: Color32 = Color32::from_rgb(51, 51, 51);

    /// Primary text.
    pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(224, 224, 224);

    /// De-emphasized text.
    pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(140, 140, 140);

    /// Brand accent (orange). Start button, headings, selections.
    pub const ACCENT: Color32 = Color32::from_rgb(255, 153, 0);

    /// Stop button and error lines.
    pub const STATUS_ERROR: Color32 = Color32::from_rgb(211, 80, 70);

    /// Running indicator.
    pub const STATUS_RUNNING: Color32 = Color32::from_rgb(94, 174, 96);
}

/// Apply the theme to the egui context. Called once from the creation
/// closure in `run_gui`.
pub fn init(ctx: &egui::Context) {
    let mut visuals = Visuals::dark();
    visuals.panel_fill = colors::BACKGROUND;
    visuals.window_fill = colors::SURFACE;
    visuals.override_text_color = Some(colors::TEXT_PRIMARY);
    visuals.widgets.inactive.bg_fill = colors::INPUT;
    visuals.widgets.hovered.bg_fill = colors::SEPARATOR;
    visuals.selection.bg_fill = colors::ACCENT.linear_multiply(0.4);
    ctx.set_visuals(visuals);
}
