// ToolFusion - platform/capture.rs
//
// Full-screen capture of the primary monitor via xcap.
// The captured image is returned in memory; persisting it to the data
// directory is a separate step so a failed disk write does not lose the
// capture for the current session.

use crate::util::error::CaptureError;
use image::RgbaImage;
use std::path::Path;

/// Capture an immediate full-screen snapshot of the primary monitor.
///
/// Falls back to the first enumerated monitor when none is flagged primary
/// (some X11 setups report no primary).
pub fn capture_primary() -> Result<RgbaImage, CaptureError> {
    let monitors = xcap::Monitor::all().map_err(|e| CaptureError::NoMonitors {
        reason: e.to_string(),
    })?;

    if monitors.is_empty() {
        return Err(CaptureError::NoMonitors {
            reason: "monitor list is empty".to_string(),
        });
    }

    let monitor = monitors
        .iter()
        .find(|m| m.is_primary())
        .unwrap_or(&monitors[0]);

    let name = monitor.name().to_string();
    let image = monitor
        .capture_image()
        .map_err(|e| CaptureError::Capture {
            monitor: name.clone(),
            reason: e.to_string(),
        })?;

    tracing::info!(
        monitor = %name,
        width = image.width(),
        height = image.height(),
        "Screenshot captured"
    );
    Ok(image)
}

/// Write a captured image to `path` as PNG, creating parent directories.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<(), CaptureError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| CaptureError::Save {
            path: path.to_path_buf(),
            source: e,
        })?;
    }
    image.save(path).map_err(|e| CaptureError::Save {
        path: path.to_path_buf(),
        source: std::io::Error::other(e),
    })?;
    tracing::debug!(path = %path.display(), "Screenshot saved");
    Ok(())
}
