// ToolFusion - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.
//
// These types are the shared vocabulary across all layers.

use std::path::PathBuf;
use std::time::Duration;

// =============================================================================
// Task list
// =============================================================================

/// A single to-do item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// Task description as entered by the user.
    pub text: String,

    /// Whether the task has been marked complete.
    pub completed: bool,
}

impl Task {
    /// Create a new incomplete task.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            completed: false,
        }
    }
}

// =============================================================================
// Password policy
// =============================================================================

/// Character-class selection controlling one password generation request.
///
/// Transient: exists only for the duration of a single generate() call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordPolicy {
    /// Number of characters to generate.
    pub length: usize,

    /// Include A-Z.
    pub include_upper: bool,

    /// Include a-z.
    pub include_lower: bool,

    /// Include 0-9.
    pub include_digits: bool,

    /// Include ASCII punctuation.
    pub include_symbols: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            length: crate::util::constants::DEFAULT_PASSWORD_LENGTH,
            include_upper: true,
            include_lower: true,
            include_digits: true,
            include_symbols: true,
        }
    }
}

// =============================================================================
// Image conversion jobs
// =============================================================================

/// Supported output formats for image conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Jpeg,
    Png,
    Bmp,
    Gif,
    WebP,
}

impl OutputFormat {
    /// All variants in display order.
    pub fn all() -> &'static [OutputFormat] {
        &[
            OutputFormat::Jpeg,
            OutputFormat::Png,
            OutputFormat::Bmp,
            OutputFormat::Gif,
            OutputFormat::WebP,
        ]
    }

    /// Human-readable label for the format combo box.
    pub fn label(&self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "JPEG",
            OutputFormat::Png => "PNG",
            OutputFormat::Bmp => "BMP",
            OutputFormat::Gif => "GIF",
            OutputFormat::WebP => "WebP",
        }
    }

    /// File extension used for derived output names.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpeg",
            OutputFormat::Png => "png",
            OutputFormat::Bmp => "bmp",
            OutputFormat::Gif => "gif",
            OutputFormat::WebP => "webp",
        }
    }

    /// The corresponding `image` crate format.
    pub fn image_format(&self) -> image::ImageFormat {
        match self {
            OutputFormat::Jpeg => image::ImageFormat::Jpeg,
            OutputFormat::Png => image::ImageFormat::Png,
            OutputFormat::Bmp => image::ImageFormat::Bmp,
            OutputFormat::Gif => image::ImageFormat::Gif,
            OutputFormat::WebP => image::ImageFormat::WebP,
        }
    }
}

/// Optional resize applied before re-encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeSpec {
    /// Target width in pixels.
    pub width: u32,

    /// Target height in pixels.
    pub height: u32,

    /// When true, fit within width x height keeping the aspect ratio
    /// (thumbnail semantics). When false, resize to exactly width x height.
    pub preserve_aspect: bool,
}

/// Per-file conversion parameters shared across a batch.
#[derive(Debug, Clone)]
pub struct ImageParams {
    /// Target output format.
    pub format: OutputFormat,

    /// Optional resize; None converts at the source dimensions.
    pub resize: Option<ResizeSpec>,

    /// Directory the derived output file is written to.
    pub output_dir: PathBuf,
}

/// A user-triggered batch image conversion request.
#[derive(Debug, Clone)]
pub struct ImageJob {
    /// Source files, processed in order.
    pub inputs: Vec<PathBuf>,

    /// Shared conversion parameters.
    pub params: ImageParams,
}

// =============================================================================
// PDF jobs
// =============================================================================

/// Which pages a split operation extracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitMode {
    /// One single-page output file per page.
    AllPages,

    /// One output file covering the inclusive 1-based range.
    Range { start: u32, end: u32 },
}

/// A user-triggered PDF operation.
#[derive(Debug, Clone)]
pub enum PdfJob {
    /// Concatenate all pages of `inputs` in list order into `output`.
    Merge {
        inputs: Vec<PathBuf>,
        output: PathBuf,
    },

    /// Extract pages from `input` into `output_dir`.
    Split {
        input: PathBuf,
        mode: SplitMode,
        output_dir: PathBuf,
    },
}

// =============================================================================
// Background job progress
// =============================================================================

/// Progress messages streamed from a background job thread to the UI.
#[derive(Debug)]
pub enum JobProgress {
    /// The job started; `total` is the number of steps (files or pages).
    Started { total: usize },

    /// One step finished. `detail` is a human-readable log line.
    Step {
        completed: usize,
        total: usize,
        detail: String,
    },

    /// A single file failed; the batch continues with the next file.
    FileFailed { path: PathBuf, message: String },

    /// The job completed (possibly with per-file failures).
    Finished { report: JobReport },

    /// The job aborted with a fatal error; no report is produced.
    Failed { error: String },

    /// The job observed the cancel flag and stopped.
    Cancelled,
}

/// Summary of a completed background job.
#[derive(Debug, Default)]
pub struct JobReport {
    /// Number of steps that succeeded.
    pub succeeded: usize,

    /// Number of steps that failed (skip-and-report batches only).
    pub failed: usize,

    /// Files written by the job.
    pub outputs: Vec<PathBuf>,

    /// Wall-clock duration of the job.
    pub duration: Duration,

    /// Text extracted by an OCR job. None for image and PDF jobs.
    pub extracted_text: Option<String>,
}
