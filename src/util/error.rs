// ToolFusion - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation; every error keeps its causal chain
// for diagnostic logging and user-visible messages.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all ToolFusion operations.
/// Errors are categorised by the tool that produced them.
#[derive(Debug)]
pub enum ToolFusionError {
    /// Image decode, resize, or encode failed.
    Image(ImageError),

    /// PDF merge or split failed.
    Pdf(PdfError),

    /// Screen capture failed.
    Capture(CaptureError),

    /// OCR model loading or recognition failed.
    Ocr(OcrError),

    /// Password generation rejected the policy.
    Password(PasswordError),

    /// Task list persistence failed.
    Task(TaskError),

    /// Configuration loading or validation failed.
    Config(ConfigError),

    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for ToolFusionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Image(e) => write!(f, "Image error: {e}"),
            Self::Pdf(e) => write!(f, "PDF error: {e}"),
            Self::Capture(e) => write!(f, "Capture error: {e}"),
            Self::Ocr(e) => write!(f, "OCR error: {e}"),
            Self::Password(e) => write!(f, "Password error: {e}"),
            Self::Task(e) => write!(f, "Task list error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for ToolFusionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Image(e) => Some(e),
            Self::Pdf(e) => Some(e),
            Self::Capture(e) => Some(e),
            Self::Ocr(e) => Some(e),
            Self::Password(e) => Some(e),
            Self::Task(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Image errors
// ---------------------------------------------------------------------------

/// Errors from the image conversion service.
#[derive(Debug)]
pub enum ImageError {
    /// The input file could not be opened or decoded.
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },

    /// Re-encoding in the target format failed.
    Encode {
        path: PathBuf,
        format: &'static str,
        source: image::ImageError,
    },

    /// The derived output path would overwrite the input file.
    WouldOverwriteInput { path: PathBuf },

    /// Target dimensions outside the accepted range.
    InvalidDimensions { width: u32, height: u32 },

    /// The input path has no usable file stem to derive an output name from.
    NoFileStem { path: PathBuf },

    /// I/O error writing the converted file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decode { path, source } => {
                write!(f, "Cannot decode '{}': {source}", path.display())
            }
            Self::Encode {
                path,
                format,
                source,
            } => write!(
                f,
                "Cannot encode '{}' as {format}: {source}",
                path.display()
            ),
            Self::WouldOverwriteInput { path } => write!(
                f,
                "Output '{}' would overwrite the input file; choose a different \
                 output folder or target format",
                path.display()
            ),
            Self::InvalidDimensions { width, height } => {
                write!(f, "Target dimensions {width}x{height} are out of range")
            }
            Self::NoFileStem { path } => {
                write!(f, "'{}' has no file name to derive output from", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "I/O error writing '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ImageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Decode { source, .. } => Some(source),
            Self::Encode { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ImageError> for ToolFusionError {
    fn from(e: ImageError) -> Self {
        Self::Image(e)
    }
}

// ---------------------------------------------------------------------------
// PDF errors
// ---------------------------------------------------------------------------

/// Errors from the PDF merge/split service.
#[derive(Debug)]
pub enum PdfError {
    /// A PDF could not be loaded or parsed.
    Load {
        path: PathBuf,
        source: lopdf::Error,
    },

    /// The PDF is encrypted; page-level operations are refused.
    Encrypted { path: PathBuf },

    /// The PDF contains no pages.
    NoPages { path: PathBuf },

    /// The requested page range is invalid for the document.
    InvalidRange {
        start: u32,
        end: u32,
        page_count: u32,
    },

    /// No input documents were supplied for a merge.
    NoInputs,

    /// Saving the output document failed.
    Save {
        path: PathBuf,
        source: lopdf::Error,
    },

    /// The merged documents contained no page tree to rebuild.
    MissingPageTree,
}

impl fmt::Display for PdfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Load { path, source } => {
                write!(f, "Cannot read PDF '{}': {source}", path.display())
            }
            Self::Encrypted { path } => write!(
                f,
                "'{}' is encrypted; decrypt it before merging or splitting",
                path.display()
            ),
            Self::NoPages { path } => {
                write!(f, "'{}' contains no pages", path.display())
            }
            Self::InvalidRange {
                start,
                end,
                page_count,
            } => write!(
                f,
                "Page range {start}-{end} is invalid for a {page_count}-page document"
            ),
            Self::NoInputs => write!(f, "No PDF files were added for merging"),
            Self::Save { path, source } => {
                write!(f, "Cannot save PDF '{}': {source}", path.display())
            }
            Self::MissingPageTree => {
                write!(f, "Input documents contain no page tree; nothing to merge")
            }
        }
    }
}

impl std::error::Error for PdfError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Load { source, .. } => Some(source),
            Self::Save { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<PdfError> for ToolFusionError {
    fn from(e: PdfError) -> Self {
        Self::Pdf(e)
    }
}

// ---------------------------------------------------------------------------
// Capture errors
// ---------------------------------------------------------------------------

/// Errors from the screen-capture service.
#[derive(Debug)]
pub enum CaptureError {
    /// Monitor enumeration failed (missing permission, headless session).
    NoMonitors { reason: String },

    /// The capture call itself failed.
    Capture { monitor: String, reason: String },

    /// Writing the captured PNG to the data directory failed.
    Save { path: PathBuf, source: io::Error },
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoMonitors { reason } => write!(
                f,
                "No capturable monitors found: {reason}. \
                 Check screen-recording permissions for ToolFusion."
            ),
            Self::Capture { monitor, reason } => {
                write!(f, "Screen capture of '{monitor}' failed: {reason}")
            }
            Self::Save { path, source } => {
                write!(f, "Cannot save screenshot '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for CaptureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Save { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<CaptureError> for ToolFusionError {
    fn from(e: CaptureError) -> Self {
        Self::Capture(e)
    }
}

// ---------------------------------------------------------------------------
// OCR errors
// ---------------------------------------------------------------------------

/// Errors from the OCR service.
#[derive(Debug)]
pub enum OcrError {
    /// A required model file is not present on disk.
    ModelMissing { path: PathBuf },

    /// A model file exists but could not be loaded.
    ModelLoad { path: PathBuf, reason: String },

    /// The engine rejected the input image or failed during recognition.
    Engine { reason: String },

    /// OCR was requested with no captured screenshot in the session.
    NoCapture,
}

impl fmt::Display for OcrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ModelMissing { path } => write!(
                f,
                "OCR model '{}' not found. Download the ocrs text-detection and \
                 text-recognition models and place them in the ToolFusion data \
                 directory (see README).",
                path.display()
            ),
            Self::ModelLoad { path, reason } => {
                write!(f, "Cannot load OCR model '{}': {reason}", path.display())
            }
            Self::Engine { reason } => write!(f, "OCR engine failure: {reason}"),
            Self::NoCapture => {
                write!(f, "No screenshot available. Take a screenshot first.")
            }
        }
    }
}

impl std::error::Error for OcrError {}

impl From<OcrError> for ToolFusionError {
    fn from(e: OcrError) -> Self {
        Self::Ocr(e)
    }
}

// ---------------------------------------------------------------------------
// Password errors
// ---------------------------------------------------------------------------

/// Errors from password policy validation.
#[derive(Debug)]
pub enum PasswordError {
    /// No character class was selected.
    EmptyPool,

    /// Requested length is zero.
    ZeroLength,

    /// Requested length exceeds the maximum.
    LengthTooLarge { length: usize, max: usize },
}

impl fmt::Display for PasswordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPool => write!(f, "Select at least one character set"),
            Self::ZeroLength => write!(f, "Password length must be at least 1"),
            Self::LengthTooLarge { length, max } => {
                write!(f, "Password length {length} exceeds maximum of {max}")
            }
        }
    }
}

impl std::error::Error for PasswordError {}

impl From<PasswordError> for ToolFusionError {
    fn from(e: PasswordError) -> Self {
        Self::Password(e)
    }
}

// ---------------------------------------------------------------------------
// Task errors
// ---------------------------------------------------------------------------

/// Errors from task list persistence.
#[derive(Debug)]
pub enum TaskError {
    /// The task file does not exist (load before any save).
    FileNotFound { path: PathBuf },

    /// The task file holds more tasks than the in-memory cap allows.
    TooManyTasks { count: usize, max: usize },

    /// I/O error reading or writing the task file.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for TaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileNotFound { path } => {
                write!(f, "No saved tasks found at '{}'", path.display())
            }
            Self::TooManyTasks { count, max } => {
                write!(f, "Task file holds {count} tasks, exceeds maximum of {max}")
            }
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "Cannot {operation} task file '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for TaskError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<TaskError> for ToolFusionError {
    fn from(e: TaskError) -> Self {
        Self::Task(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for ToolFusionError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for ToolFusion results.
pub type Result<T> = std::result::Result<T, ToolFusionError>;
