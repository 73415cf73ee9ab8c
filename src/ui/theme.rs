// ToolFusion - ui/theme.rs
//
// Colour scheme and layout constants.
// No dependencies on app state or business logic.

use egui::Color32;

/// Colour for a panel activity-log line. Error lines are detected by their
/// conventional prefixes so the services stay free of UI concerns.
pub fn log_line_colour(line: &str) -> Color32 {
    if line.starts_with("Error") || line.starts_with("Skipped") {
        ERROR
    } else {
        Color32::from_rgb(209, 213, 219) // Gray 300
    }
}

/// Accent colour for each tab's primary action button.
pub const ACCENT: Color32 = Color32::from_rgb(34, 197, 94); // Green 500

/// Error text colour.
pub const ERROR: Color32 = Color32::from_rgb(239, 68, 68); // Red 500

/// Warning text colour.
pub const WARNING: Color32 = Color32::from_rgb(217, 119, 6); // Amber 600

/// Muted text colour for hints and completed tasks.
pub const MUTED: Color32 = Color32::from_rgb(107, 114, 128); // Gray 500

/// Layout constants.
pub const PANEL_SPACING: f32 = 10.0;
pub const LOG_HEIGHT: f32 = 140.0;
pub const PREVIEW_HEIGHT: f32 = 200.0;
pub const STATUS_BAR_HEIGHT: f32 = 28.0;
