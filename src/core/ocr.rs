// ToolFusion - core/ocr.rs
//
// Text recognition over a captured screenshot using the pure-Rust ocrs
// engine with rten models. Models are loaded from disk at job time (they
// are not bundled with the binary); a missing model file is a
// user-actionable error, not a crash.

use crate::util::error::OcrError;
use image::RgbaImage;
use std::path::{Path, PathBuf};

/// Filesystem locations of the two rten models the engine needs.
#[derive(Debug, Clone)]
pub struct ModelPaths {
    /// Text-detection model (finds word boxes).
    pub detection: PathBuf,

    /// Text-recognition model (reads the boxes).
    pub recognition: PathBuf,
}

/// A loaded OCR engine. Construction is the expensive step (model
/// deserialisation), so it happens on the background job thread.
pub struct TextRecognizer {
    engine: ocrs::OcrEngine,
}

impl TextRecognizer {
    /// Load both models and build the engine.
    pub fn load(models: &ModelPaths) -> Result<Self, OcrError> {
        let detection = load_model(&models.detection)?;
        let recognition = load_model(&models.recognition)?;

        let engine = ocrs::OcrEngine::new(ocrs::OcrEngineParams {
            detection_model: Some(detection),
            recognition_model: Some(recognition),
            ..Default::default()
        })
        .map_err(|e| OcrError::Engine {
            reason: e.to_string(),
        })?;

        tracing::debug!(
            detection = %models.detection.display(),
            recognition = %models.recognition.display(),
            "OCR engine loaded"
        );
        Ok(Self { engine })
    }

    /// Run recognition over an RGBA image and return the extracted text,
    /// one recognised line per output line.
    pub fn recognize(&self, image: &RgbaImage) -> Result<String, OcrError> {
        let source = ocrs::ImageSource::from_bytes(image.as_raw(), image.dimensions())
            .map_err(|e| OcrError::Engine {
                reason: e.to_string(),
            })?;

        let input = self
            .engine
            .prepare_input(source)
            .map_err(|e| OcrError::Engine {
                reason: e.to_string(),
            })?;

        let text = self.engine.get_text(&input).map_err(|e| OcrError::Engine {
            reason: e.to_string(),
        })?;

        tracing::debug!(chars = text.len(), "OCR complete");
        Ok(text.trim_end().to_string())
    }
}

/// Load one rten model file, mapping a missing file to `ModelMissing`.
fn load_model(path: &Path) -> Result<rten::Model, OcrError> {
    if !path.exists() {
        return Err(OcrError::ModelMissing {
            path: path.to_path_buf(),
        });
    }
    rten::Model::load_file(path).map_err(|e| OcrError::ModelLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_model_is_reported_with_its_path() {
        let dir = tempfile::tempdir().unwrap();
        let models = ModelPaths {
            detection: dir.path().join("absent-detection.rten"),
            recognition: dir.path().join("absent-recognition.rten"),
        };
        match TextRecognizer::load(&models) {
            Err(OcrError::ModelMissing { path }) => {
                assert_eq!(path, dir.path().join("absent-detection.rten"));
            }
            Err(other) => panic!("expected ModelMissing, got {other:?}"),
            Ok(_) => panic!("expected ModelMissing, got a loaded engine"),
        }
    }

    #[test]
    fn garbage_model_file_is_a_load_error_not_a_panic() {
        let dir = tempfile::tempdir().unwrap();
        let det = dir.path().join("text-detection.rten");
        std::fs::write(&det, b"not a model").unwrap();
        let models = ModelPaths {
            detection: det,
            recognition: dir.path().join("text-recognition.rten"),
        };
        assert!(matches!(
            TextRecognizer::load(&models),
            Err(OcrError::ModelLoad { .. })
        ));
    }
}
