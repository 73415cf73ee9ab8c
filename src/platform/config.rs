// ToolFusion - platform/config.rs
//
// Platform-specific configuration, data directory resolution, and config.toml
// loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::util::constants;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for ToolFusion data and configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/toolfusion/ or %APPDATA%\ToolFusion\)
    pub config_dir: PathBuf,

    /// Data directory: task file, last screenshot, OCR models.
    pub data_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            let data_dir = proj_dirs.data_dir().to_path_buf();

            tracing::debug!(
                config = %config_dir.display(),
                data = %data_dir.display(),
                "Platform paths resolved"
            );

            Self {
                config_dir,
                data_dir,
            }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            let fallback = PathBuf::from(".");
            Self {
                config_dir: fallback.clone(),
                data_dir: fallback,
            }
        }
    }

    /// Default task file location in the data directory.
    pub fn default_tasks_file(&self) -> PathBuf {
        self.data_dir.join(constants::TASKS_FILE_NAME)
    }

    /// Location the last captured screenshot is written to.
    pub fn screenshot_file(&self) -> PathBuf {
        self.data_dir.join(constants::SCREENSHOT_FILE_NAME)
    }

    /// Default OCR text-detection model location in the data directory.
    pub fn default_detection_model(&self) -> PathBuf {
        self.data_dir.join(constants::OCR_DETECTION_MODEL_FILE)
    }

    /// Default OCR text-recognition model location in the data directory.
    pub fn default_recognition_model(&self) -> PathBuf {
        self.data_dir.join(constants::OCR_RECOGNITION_MODEL_FILE)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility -- a newer
/// config file can be used with an older binary without crashing.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[tasks]` section.
    pub tasks: TasksSection,
    /// `[ocr]` section.
    pub ocr: OcrSection,
    /// `[password]` section.
    pub password: PasswordSection,
    /// `[ui]` section.
    pub ui: UiSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[tasks]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct TasksSection {
    /// Task file path override.
    pub file: Option<String>,
}

/// `[ocr]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct OcrSection {
    /// Text-detection model path override.
    pub detection_model: Option<String>,
    /// Text-recognition model path override.
    pub recognition_model: Option<String>,
}

/// `[password]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct PasswordSection {
    /// Default generated password length.
    pub default_length: Option<usize>,
}

/// `[ui]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct UiSection {
    /// Theme: "dark" or "light".
    pub theme: Option<String>,
    /// Body font size in points.
    pub font_size: Option<f32>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// All values are validated against named constants at load time.
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    // -- Tasks --
    /// Task file path override (None = data dir default).
    pub tasks_file: Option<PathBuf>,

    // -- OCR --
    /// Text-detection model override (None = data dir default).
    pub detection_model: Option<PathBuf>,
    /// Text-recognition model override (None = data dir default).
    pub recognition_model: Option<PathBuf>,

    // -- Password --
    /// Default generated password length.
    pub default_password_length: usize,

    // -- UI --
    /// Dark mode (true) or light mode (false).
    pub dark_mode: bool,
    /// Body font size in points.
    pub font_size: f32,

    // -- Logging --
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tasks_file: None,
            detection_model: None,
            recognition_model: None,
            default_password_length: constants::DEFAULT_PASSWORD_LENGTH,
            dark_mode: true,
            font_size: constants::DEFAULT_FONT_SIZE,
            log_level: None,
        }
    }
}

/// Load and validate `config.toml` from the given config directory.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// If the file does not exist, returns defaults with no warnings (first-run).
/// If the file is unparseable, returns defaults with an error warning -- the
/// application still starts but the user is informed.
pub fn load_config(config_dir: &Path) -> (AppConfig, Vec<String>) {
    let config_path = config_dir.join(constants::CONFIG_FILE_NAME);

    let mut warnings: Vec<String> = Vec::new();

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), warnings);
    }

    let content = match std::fs::read_to_string(&config_path) {
        Ok(c) => c,
        Err(e) => {
            let msg = format!(
                "Could not read config file '{}': {e}. Using defaults.",
                config_path.display()
            );
            tracing::warn!("{}", msg);
            warnings.push(msg);
            return (AppConfig::default(), warnings);
        }
    };

    let raw: RawConfig = match toml::from_str(&content) {
        Ok(r) => r,
        Err(e) => {
            let msg = format!(
                "Failed to parse config file '{}': {e}. Using defaults. \
                 See config.example.toml for the expected format.",
                config_path.display()
            );
            tracing::warn!("{}", msg);
            warnings.push(msg);
            return (AppConfig::default(), warnings);
        }
    };

    tracing::info!(path = %config_path.display(), "Loaded config.toml");

    // Validate each field against named constants, accumulating all warnings.
    let mut config = AppConfig::default();

    // -- Tasks: file --
    if let Some(ref file) = raw.tasks.file {
        if file.is_empty() {
            warnings.push("[tasks] file is empty. Using the default location.".to_string());
        } else {
            config.tasks_file = Some(PathBuf::from(file));
        }
    }

    // -- OCR: model overrides --
    if let Some(ref path) = raw.ocr.detection_model {
        if !path.is_empty() {
            config.detection_model = Some(PathBuf::from(path));
        }
    }
    if let Some(ref path) = raw.ocr.recognition_model {
        if !path.is_empty() {
            config.recognition_model = Some(PathBuf::from(path));
        }
    }

    // -- Password: default_length --
    if let Some(length) = raw.password.default_length {
        if (constants::MIN_PASSWORD_LENGTH..=constants::MAX_PASSWORD_LENGTH).contains(&length) {
            config.default_password_length = length;
        } else {
            warnings.push(format!(
                "[password] default_length = {length} is out of range ({}-{}). Using default ({}).",
                constants::MIN_PASSWORD_LENGTH,
                constants::MAX_PASSWORD_LENGTH,
                constants::DEFAULT_PASSWORD_LENGTH,
            ));
        }
    }

    // -- UI: theme --
    if let Some(ref theme) = raw.ui.theme {
        match theme.to_lowercase().as_str() {
            "dark" => config.dark_mode = true,
            "light" => config.dark_mode = false,
            other => {
                warnings.push(format!(
                    "[ui] theme = \"{other}\" is not recognised. Expected \"dark\" or \"light\". Using default (dark).",
                ));
            }
        }
    }

    // -- UI: font_size --
    if let Some(size) = raw.ui.font_size {
        if (constants::MIN_FONT_SIZE..=constants::MAX_FONT_SIZE).contains(&size) {
            config.font_size = size;
        } else {
            warnings.push(format!(
                "[ui] font_size = {size} is out of range ({}-{}). Using default ({}).",
                constants::MIN_FONT_SIZE,
                constants::MAX_FONT_SIZE,
                constants::DEFAULT_FONT_SIZE,
            ));
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.clone());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default (info).",
            ));
        }
    }

    if !warnings.is_empty() {
        tracing::warn!(
            count = warnings.len(),
            "Config validation produced warnings"
        );
    }

    (config, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_yields_defaults_without_warnings() {
        let dir = tempfile::tempdir().unwrap();
        let (config, warnings) = load_config(dir.path());
        assert!(warnings.is_empty());
        assert_eq!(
            config.default_password_length,
            constants::DEFAULT_PASSWORD_LENGTH
        );
        assert!(config.dark_mode);
    }

    #[test]
    fn valid_values_are_applied() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(constants::CONFIG_FILE_NAME),
            r#"
[tasks]
file = "/tmp/my-tasks.txt"

[password]
default_length = 20

[ui]
theme = "light"
"#,
        )
        .unwrap();

        let (config, warnings) = load_config(dir.path());
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
        assert_eq!(config.tasks_file, Some(PathBuf::from("/tmp/my-tasks.txt")));
        assert_eq!(config.default_password_length, 20);
        assert!(!config.dark_mode);
    }

    #[test]
    fn out_of_range_values_warn_and_fall_back() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(constants::CONFIG_FILE_NAME),
            r#"
[password]
default_length = 100000

[ui]
theme = "solarized"
font_size = 4.0
"#,
        )
        .unwrap();

        let (config, warnings) = load_config(dir.path());
        assert_eq!(warnings.len(), 3, "warnings: {warnings:?}");
        assert_eq!(
            config.default_password_length,
            constants::DEFAULT_PASSWORD_LENGTH
        );
        assert!(config.dark_mode);
        assert_eq!(config.font_size, constants::DEFAULT_FONT_SIZE);
    }

    #[test]
    fn unparseable_toml_warns_and_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(constants::CONFIG_FILE_NAME),
            "this is not = [valid toml",
        )
        .unwrap();

        let (config, warnings) = load_config(dir.path());
        assert_eq!(warnings.len(), 1);
        assert!(config.tasks_file.is_none());
    }
}
