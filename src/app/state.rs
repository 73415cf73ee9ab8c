// ToolFusion - app/state.rs
//
// Application state management. Holds all per-panel state, the request
// flags panels use to hand work to gui.rs, and the resolved platform
// paths. Owned by the eframe::App implementation and passed explicitly
// to each panel's render function; there are no ambient globals.

use crate::core::model::{OutputFormat, PasswordPolicy};
use crate::core::ocr::ModelPaths;
use crate::core::tasks::TaskList;
use crate::platform::config::{AppConfig, PlatformPaths};
use crate::util::constants;
use image::RgbaImage;
use std::path::PathBuf;

/// The five tool tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Images,
    Pdf,
    Ocr,
    Tasks,
    Password,
}

impl Tab {
    /// All tabs in display order.
    pub fn all() -> &'static [Tab] {
        &[Tab::Images, Tab::Pdf, Tab::Ocr, Tab::Tasks, Tab::Password]
    }

    /// Tab strip label.
    pub fn label(&self) -> &'static str {
        match self {
            Tab::Images => "\u{1f5bc} Images",
            Tab::Pdf => "\u{1f4c4} PDF",
            Tab::Ocr => "\u{1f4f7} Screenshot & OCR",
            Tab::Tasks => "\u{2611} To-Do List",
            Tab::Password => "\u{1f511} Passwords",
        }
    }
}

/// A bounded per-panel activity log (newest last).
#[derive(Debug, Default)]
pub struct ActivityLog {
    lines: Vec<String>,
}

impl ActivityLog {
    pub fn push(&mut self, line: impl Into<String>) {
        if self.lines.len() >= constants::MAX_PANEL_LOG_LINES {
            self.lines.remove(0);
        }
        self.lines.push(line.into());
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

/// Image converter panel state.
pub struct ImagePanelState {
    /// Selected source files, processed in order.
    pub inputs: Vec<PathBuf>,
    /// Target output format.
    pub format: OutputFormat,
    /// Whether resizing is applied at all.
    pub resize_enabled: bool,
    /// Target width in pixels.
    pub width: u32,
    /// Target height in pixels.
    pub height: u32,
    /// Fit within the box keeping aspect ratio vs exact resize.
    pub preserve_aspect: bool,
    /// Output directory chosen by the user.
    pub output_dir: Option<PathBuf>,
    /// Per-file results and errors.
    pub log: ActivityLog,
}

impl Default for ImagePanelState {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            format: OutputFormat::Png,
            resize_enabled: true,
            width: constants::DEFAULT_IMAGE_WIDTH,
            height: constants::DEFAULT_IMAGE_HEIGHT,
            preserve_aspect: true,
            output_dir: None,
            log: ActivityLog::default(),
        }
    }
}

/// PDF panel state (merge and split sections).
pub struct PdfPanelState {
    /// Files queued for merging, in merge order.
    pub merge_inputs: Vec<PathBuf>,
    /// File selected for splitting.
    pub split_input: Option<PathBuf>,
    /// Page count of `split_input`, read when the file is selected.
    pub split_page_count: Option<usize>,
    /// Split all pages (true) vs an explicit range (false).
    pub split_all: bool,
    /// 1-based inclusive range start.
    pub range_start: u32,
    /// 1-based inclusive range end.
    pub range_end: u32,
    /// Output directory for split files.
    pub output_dir: Option<PathBuf>,
    /// Operation results and errors.
    pub log: ActivityLog,
}

impl Default for PdfPanelState {
    fn default() -> Self {
        Self {
            merge_inputs: Vec::new(),
            split_input: None,
            split_page_count: None,
            split_all: true,
            range_start: 1,
            range_end: 1,
            output_dir: None,
            log: ActivityLog::default(),
        }
    }
}

/// Screenshot & OCR panel state.
#[derive(Default)]
pub struct OcrPanelState {
    /// The captured screenshot, held for the session.
    pub captured: Option<RgbaImage>,
    /// egui texture of the capture for the preview.
    pub preview: Option<egui::TextureHandle>,
    /// Extracted text from the last OCR run.
    pub extracted_text: String,
    /// Capture/OCR results and errors.
    pub log: ActivityLog,
}

/// To-do list panel state.
#[derive(Default)]
pub struct TasksPanelState {
    /// The ordered task list.
    pub tasks: TaskList,
    /// Text field for a new task.
    pub input: String,
    /// Currently selected row.
    pub selected: Option<usize>,
    /// Save/load results and errors.
    pub log: ActivityLog,
}

/// Password generator panel state.
pub struct PasswordPanelState {
    /// Character-class selection and length.
    pub policy: PasswordPolicy,
    /// The last generated password ("" until one is generated).
    pub generated: String,
    /// Validation message shown in place of a password.
    pub error: Option<String>,
}

impl Default for PasswordPanelState {
    fn default() -> Self {
        Self {
            policy: PasswordPolicy::default(),
            generated: String::new(),
            error: None,
        }
    }
}

/// Top-level application state.
pub struct AppState {
    /// Currently visible tab.
    pub active_tab: Tab,

    /// Per-panel state.
    pub images: ImagePanelState,
    pub pdf: PdfPanelState,
    pub ocr: OcrPanelState,
    pub tasks: TasksPanelState,
    pub password: PasswordPanelState,

    /// Whether a background job is running (job buttons disabled while true).
    pub job_in_progress: bool,

    /// The tab that started the running (or most recent) job. Progress log
    /// lines are routed here even if the user switches tabs mid-job.
    pub job_tab: Option<Tab>,

    /// Progress of the running job as (completed, total), for the progress bar.
    pub job_progress: Option<(usize, usize)>,

    /// Status message for the status bar.
    pub status_message: String,

    /// Non-fatal warnings accumulated at startup (config validation).
    pub warnings: Vec<String>,

    /// Whether to show the About dialog.
    pub show_about: bool,

    /// Whether debug mode is enabled.
    pub debug_mode: bool,

    // ---- Resolved locations ----
    /// Task file save/load target.
    pub tasks_file: PathBuf,

    /// Where the captured screenshot PNG is written.
    pub screenshot_file: PathBuf,

    /// OCR model locations.
    pub model_paths: ModelPaths,

    // ---- Request flags consumed by gui.rs each frame ----
    /// A panel requested a background job.
    pub pending_job: Option<crate::app::jobs::JobRequest>,

    /// A panel requested the running job be cancelled.
    pub request_cancel: bool,

    /// A panel requested an immediate screen capture.
    pub request_capture: bool,

    /// The split input changed; gui.rs should read its page count and
    /// clamp the range spinners.
    pub request_split_preflight: bool,

    /// A panel requested text be written to the OS clipboard.
    pub clipboard_request: Option<String>,

    /// A panel requested the task list be saved.
    pub request_save_tasks: bool,

    /// A panel requested the task list be loaded.
    pub request_load_tasks: bool,
}

impl AppState {
    /// Create initial state from the validated config and platform paths.
    pub fn new(config: &AppConfig, paths: &PlatformPaths, debug_mode: bool) -> Self {
        let tasks_file = config
            .tasks_file
            .clone()
            .unwrap_or_else(|| paths.default_tasks_file());
        let model_paths = ModelPaths {
            detection: config
                .detection_model
                .clone()
                .unwrap_or_else(|| paths.default_detection_model()),
            recognition: config
                .recognition_model
                .clone()
                .unwrap_or_else(|| paths.default_recognition_model()),
        };

        let mut password = PasswordPanelState::default();
        password.policy.length = config.default_password_length;

        Self {
            active_tab: Tab::Images,
            images: ImagePanelState::default(),
            pdf: PdfPanelState::default(),
            ocr: OcrPanelState::default(),
            tasks: TasksPanelState::default(),
            password,
            job_in_progress: false,
            job_tab: None,
            job_progress: None,
            status_message: "Ready.".to_string(),
            warnings: Vec::new(),
            show_about: false,
            debug_mode,
            tasks_file,
            screenshot_file: paths.screenshot_file(),
            model_paths,
            pending_job: None,
            request_cancel: false,
            request_capture: false,
            request_split_preflight: false,
            clipboard_request: None,
            request_save_tasks: false,
            request_load_tasks: false,
        }
    }

    /// The activity log of the tab that started the running job.
    /// Falls back to the active tab when no job tab is recorded.
    pub fn job_log(&mut self) -> &mut ActivityLog {
        let tab = self.job_tab.unwrap_or(self.active_tab);
        match tab {
            Tab::Images => &mut self.images.log,
            Tab::Pdf => &mut self.pdf.log,
            Tab::Ocr => &mut self.ocr.log,
            // Tasks and Password start no background jobs; the tasks log is
            // a harmless sink if a message ever lands here.
            Tab::Tasks | Tab::Password => &mut self.tasks.log,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activity_log_is_bounded() {
        let mut log = ActivityLog::default();
        for i in 0..(constants::MAX_PANEL_LOG_LINES + 10) {
            log.push(format!("line {i}"));
        }
        assert_eq!(log.lines().len(), constants::MAX_PANEL_LOG_LINES);
        // Oldest lines were dropped.
        assert_eq!(log.lines()[0], "line 10");
    }

    #[test]
    fn state_prefers_config_overrides() {
        let config = AppConfig {
            tasks_file: Some(PathBuf::from("/tmp/override.txt")),
            default_password_length: 42,
            ..Default::default()
        };
        let paths = PlatformPaths {
            config_dir: PathBuf::from("/tmp/cfg"),
            data_dir: PathBuf::from("/tmp/data"),
        };
        let state = AppState::new(&config, &paths, false);
        assert_eq!(state.tasks_file, PathBuf::from("/tmp/override.txt"));
        assert_eq!(state.password.policy.length, 42);
        assert_eq!(
            state.model_paths.detection,
            PathBuf::from("/tmp/data").join(constants::OCR_DETECTION_MODEL_FILE)
        );
    }
}
