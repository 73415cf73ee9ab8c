// ToolFusion - core/image_convert.rs
//
// Single-file image conversion: decode, optional resize, re-encode.
// The batch driver (skip-and-report per-file failures, progress messages)
// lives in app/jobs.rs; this module converts exactly one file.

use crate::core::model::{ImageParams, ResizeSpec};
use crate::util::constants::{JPEG_QUALITY, MAX_IMAGE_DIMENSION, MIN_IMAGE_DIMENSION};
use crate::util::error::ImageError;
use image::DynamicImage;
use std::path::{Path, PathBuf};

/// Validate a resize spec against the accepted dimension range.
pub fn validate_resize(resize: &ResizeSpec) -> Result<(), ImageError> {
    let in_range = |v: u32| (MIN_IMAGE_DIMENSION..=MAX_IMAGE_DIMENSION).contains(&v);
    if in_range(resize.width) && in_range(resize.height) {
        Ok(())
    } else {
        Err(ImageError::InvalidDimensions {
            width: resize.width,
            height: resize.height,
        })
    }
}

/// Derive the output path for `input` under the params' output directory:
/// `<output_dir>/<stem>.<target extension>`.
pub fn output_path(input: &Path, params: &ImageParams) -> Result<PathBuf, ImageError> {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| ImageError::NoFileStem {
            path: input.to_path_buf(),
        })?;
    Ok(params
        .output_dir
        .join(format!("{stem}.{}", params.format.extension())))
}

/// Convert one image file: decode, optional resize, encode, write.
///
/// Returns the written output path together with the dimensions actually
/// encoded (after any resize). Refuses to write over the input file, which
/// can happen when the output directory is the source directory and the
/// target format matches the source extension.
pub fn convert_one(
    input: &Path,
    params: &ImageParams,
) -> Result<(PathBuf, u32, u32), ImageError> {
    let output = output_path(input, params)?;

    // Same-file check by path equality; good enough for the picker-driven
    // paths this receives (both sides come from the same dialogs un-normalised).
    if output == input {
        return Err(ImageError::WouldOverwriteInput { path: output });
    }

    let mut img = image::ImageReader::open(input)
        .map_err(|e| ImageError::Decode {
            path: input.to_path_buf(),
            source: image::ImageError::IoError(e),
        })?
        .decode()
        .map_err(|e| ImageError::Decode {
            path: input.to_path_buf(),
            source: e,
        })?;

    if let Some(resize) = &params.resize {
        validate_resize(resize)?;
        img = if resize.preserve_aspect {
            // Thumbnail semantics: fit within the bounding box, never upscale
            // beyond it, keep aspect ratio.
            img.thumbnail(resize.width, resize.height)
        } else {
            img.resize_exact(
                resize.width,
                resize.height,
                image::imageops::FilterType::Lanczos3,
            )
        };
    }

    // JPEG has no alpha channel; convert to RGB8 before encoding.
    if params.format == crate::core::model::OutputFormat::Jpeg {
        img = DynamicImage::ImageRgb8(img.to_rgb8());
    }

    let (width, height) = (img.width(), img.height());
    write_image(&img, &output, params)?;

    tracing::debug!(
        input = %input.display(),
        output = %output.display(),
        width,
        height,
        "Image converted"
    );
    Ok((output, width, height))
}

/// Encode `img` to `output` in the params' target format.
fn write_image(img: &DynamicImage, output: &Path, params: &ImageParams) -> Result<(), ImageError> {
    use crate::core::model::OutputFormat;

    match params.format {
        OutputFormat::Jpeg => {
            // Explicit encoder so the quality setting is applied.
            let file = std::fs::File::create(output).map_err(|e| ImageError::Io {
                path: output.to_path_buf(),
                source: e,
            })?;
            let mut writer = std::io::BufWriter::new(file);
            let encoder =
                image::codecs::jpeg::JpegEncoder::new_with_quality(&mut writer, JPEG_QUALITY);
            img.write_with_encoder(encoder)
                .map_err(|e| ImageError::Encode {
                    path: output.to_path_buf(),
                    format: "JPEG",
                    source: e,
                })?;
        }
        _ => {
            img.save_with_format(output, params.format.image_format())
                .map_err(|e| ImageError::Encode {
                    path: output.to_path_buf(),
                    format: params.format.label(),
                    source: e,
                })?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{ImageParams, OutputFormat, ResizeSpec};
    use image::RgbImage;

    fn params(dir: &Path, format: OutputFormat, resize: Option<ResizeSpec>) -> ImageParams {
        ImageParams {
            format,
            resize,
            output_dir: dir.to_path_buf(),
        }
    }

    /// Write a small solid-colour PNG fixture.
    fn write_png(path: &Path, w: u32, h: u32) {
        let img = RgbImage::from_pixel(w, h, image::Rgb([120, 30, 200]));
        img.save(path).unwrap();
    }

    #[test]
    fn derives_output_name_from_stem_and_format() {
        let p = params(Path::new("/out"), OutputFormat::WebP, None);
        let out = output_path(Path::new("/in/photo.JPG"), &p).unwrap();
        assert_eq!(out, PathBuf::from("/out/photo.webp"));
    }

    #[test]
    fn converts_png_without_resize() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("fixture.png");
        write_png(&input, 8, 6);
        let out_dir = dir.path().join("out");
        std::fs::create_dir(&out_dir).unwrap();

        let (out, w, h) =
            convert_one(&input, &params(&out_dir, OutputFormat::Bmp, None)).unwrap();
        assert_eq!(out, out_dir.join("fixture.bmp"));
        assert_eq!((w, h), (8, 6));
        assert!(out.exists());
    }

    #[test]
    fn exact_resize_matches_requested_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("fixture.png");
        write_png(&input, 40, 20);

        let resize = ResizeSpec {
            width: 10,
            height: 10,
            preserve_aspect: false,
        };
        let (_, w, h) = convert_one(
            &input,
            &params(dir.path(), OutputFormat::Jpeg, Some(resize)),
        )
        .unwrap();
        assert_eq!((w, h), (10, 10));
    }

    #[test]
    fn aspect_preserving_resize_fits_bounding_box() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("fixture.png");
        write_png(&input, 40, 20);
        let out_dir = dir.path().join("out");
        std::fs::create_dir(&out_dir).unwrap();

        let resize = ResizeSpec {
            width: 10,
            height: 10,
            preserve_aspect: true,
        };
        let (_, w, h) = convert_one(
            &input,
            &params(&out_dir, OutputFormat::Png, Some(resize)),
        )
        .unwrap();
        assert!(w <= 10 && h <= 10, "got {w}x{h}");
        // 2:1 source keeps its aspect ratio.
        assert_eq!(w, h * 2);
    }

    #[test]
    fn refuses_to_overwrite_the_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("fixture.png");
        write_png(&input, 4, 4);

        // Same output dir + same format derives the input path itself.
        let result = convert_one(&input, &params(dir.path(), OutputFormat::Png, None));
        assert!(matches!(result, Err(ImageError::WouldOverwriteInput { .. })));
    }

    #[test]
    fn corrupt_input_reports_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("broken.png");
        std::fs::write(&input, b"not an image at all").unwrap();

        let result = convert_one(&input, &params(dir.path(), OutputFormat::Bmp, None));
        assert!(matches!(result, Err(ImageError::Decode { .. })));
    }

    #[test]
    fn rejects_out_of_range_dimensions() {
        let resize = ResizeSpec {
            width: 0,
            height: 600,
            preserve_aspect: false,
        };
        assert!(matches!(
            validate_resize(&resize),
            Err(ImageError::InvalidDimensions { .. })
        ));
    }
}
