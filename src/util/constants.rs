// ToolFusion - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "ToolFusion";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "ToolFusion";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Image conversion
// =============================================================================

/// Default target width in pixels for image resizing.
pub const DEFAULT_IMAGE_WIDTH: u32 = 800;

/// Default target height in pixels for image resizing.
pub const DEFAULT_IMAGE_HEIGHT: u32 = 600;

/// Minimum accepted target dimension in pixels.
pub const MIN_IMAGE_DIMENSION: u32 = 1;

/// Maximum accepted target dimension in pixels.
/// Prevents accidental multi-gigabyte allocations from a typo in the spinner.
pub const MAX_IMAGE_DIMENSION: u32 = 10_000;

/// JPEG re-encode quality (0-100).
pub const JPEG_QUALITY: u8 = 85;

/// Maximum number of input files accepted for a single batch conversion.
pub const MAX_BATCH_FILES: usize = 1_000;

// =============================================================================
// PDF operations
// =============================================================================

/// Maximum number of PDFs accepted for a single merge.
pub const MAX_MERGE_INPUTS: usize = 200;

/// Upper bound for the page-range spinners before a real page count is known.
pub const MAX_PAGE_SPINNER: u32 = 10_000;

// =============================================================================
// OCR
// =============================================================================

/// Default filename of the text-detection model in the data directory.
pub const OCR_DETECTION_MODEL_FILE: &str = "text-detection.rten";

/// Default filename of the text-recognition model in the data directory.
pub const OCR_RECOGNITION_MODEL_FILE: &str = "text-recognition.rten";

/// Filename of the last captured screenshot in the data directory.
pub const SCREENSHOT_FILE_NAME: &str = "screenshot.png";

// =============================================================================
// Task list
// =============================================================================

/// Default task-list filename in the data directory.
pub const TASKS_FILE_NAME: &str = "tasks.txt";

/// Maximum number of tasks held in the list.
/// Prevents the list from growing without bound from a corrupt task file.
pub const MAX_TASKS: usize = 10_000;

/// Maximum length in characters of a single task's text.
pub const MAX_TASK_TEXT_LEN: usize = 1_000;

// =============================================================================
// Password generator
// =============================================================================

/// Default generated password length.
pub const DEFAULT_PASSWORD_LENGTH: usize = 12;

/// Minimum user-configurable password length.
pub const MIN_PASSWORD_LENGTH: usize = 1;

/// Maximum user-configurable password length.
pub const MAX_PASSWORD_LENGTH: usize = 128;

// =============================================================================
// Per-frame UI message budgets
// =============================================================================

/// Maximum number of job-progress messages processed by the UI update loop
/// per frame.  Any remaining messages are left in the channel and processed
/// on subsequent frames, preventing a burst from stalling the render loop.
pub const MAX_JOB_MESSAGES_PER_FRAME: usize = 200;

/// Maximum number of log lines retained per panel activity log.
/// Oldest lines are dropped once the cap is reached.
pub const MAX_PANEL_LOG_LINES: usize = 1_000;

// =============================================================================
// UI defaults
// =============================================================================

/// Default UI body font size in points.
pub const DEFAULT_FONT_SIZE: f32 = 14.5;

/// Minimum user-configurable UI font size (points).
pub const MIN_FONT_SIZE: f32 = 10.0;

/// Maximum user-configurable UI font size (points).
pub const MAX_FONT_SIZE: f32 = 24.0;

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
