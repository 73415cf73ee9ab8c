// ToolFusion - ui/panels/images.rs
//
// Image Resizer/Converter tab.
//
// The panel collects inputs, target format, resize options, and an output
// directory, then hands the batch to gui.rs via `state.pending_job`.
// Validation errors (no inputs, no output folder) are reported to the
// panel's activity log and no job is started.

use crate::app::jobs::JobRequest;
use crate::app::state::AppState;
use crate::core::model::{ImageJob, ImageParams, OutputFormat, ResizeSpec};
use crate::ui::theme;
use crate::util::constants::{MAX_BATCH_FILES, MAX_IMAGE_DIMENSION, MIN_IMAGE_DIMENSION};

/// Render the Images tab.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("Image Resizer/Converter");
    ui.label(
        egui::RichText::new(
            "Select images, adjust dimensions and format, choose an output \
             folder, then click Convert. Files that fail are skipped and \
             reported; the rest of the batch continues.",
        )
        .small()
        .weak(),
    );
    ui.add_space(theme::PANEL_SPACING);

    // ---- Input selection ----
    ui.horizontal(|ui| {
        if ui.button("Select Images\u{2026}").clicked() {
            if let Some(files) = rfd::FileDialog::new()
                .add_filter("Images", &["png", "jpg", "jpeg", "bmp", "gif", "webp"])
                .pick_files()
            {
                let mut files = files;
                files.truncate(MAX_BATCH_FILES);
                state.images.log.push(format!("Selected {} file(s).", files.len()));
                state.images.inputs = files;
            }
        }
        if !state.images.inputs.is_empty() && ui.button("Clear").clicked() {
            state.images.inputs.clear();
        }
        ui.label(format!("{} file(s) selected", state.images.inputs.len()));
    });

    if !state.images.inputs.is_empty() {
        egui::ScrollArea::vertical()
            .id_salt("image_inputs")
            .max_height(120.0)
            .show(ui, |ui| {
                for input in &state.images.inputs {
                    ui.label(
                        egui::RichText::new(input.display().to_string()).monospace().small(),
                    );
                }
            });
    }

    ui.add_space(theme::PANEL_SPACING);

    // ---- Format and resize options ----
    ui.horizontal(|ui| {
        ui.label("Target format:");
        egui::ComboBox::from_id_salt("image_format")
            .selected_text(state.images.format.label())
            .show_ui(ui, |ui| {
                for format in OutputFormat::all() {
                    ui.selectable_value(&mut state.images.format, *format, format.label());
                }
            });
    });

    ui.horizontal(|ui| {
        ui.checkbox(&mut state.images.resize_enabled, "Resize");
        ui.add_enabled_ui(state.images.resize_enabled, |ui| {
            ui.label("Width:");
            ui.add(
                egui::DragValue::new(&mut state.images.width)
                    .range(MIN_IMAGE_DIMENSION..=MAX_IMAGE_DIMENSION),
            );
            ui.label("Height:");
            ui.add(
                egui::DragValue::new(&mut state.images.height)
                    .range(MIN_IMAGE_DIMENSION..=MAX_IMAGE_DIMENSION),
            );
            ui.checkbox(&mut state.images.preserve_aspect, "Maintain aspect ratio");
        });
    });

    // ---- Output directory ----
    ui.horizontal(|ui| {
        if ui.button("Output Folder\u{2026}").clicked() {
            if let Some(dir) = rfd::FileDialog::new().pick_folder() {
                state.images.output_dir = Some(dir);
            }
        }
        match &state.images.output_dir {
            Some(dir) => {
                ui.label(egui::RichText::new(dir.display().to_string()).monospace());
            }
            None => {
                ui.label(egui::RichText::new("no output folder selected").weak());
            }
        }
    });

    ui.add_space(theme::PANEL_SPACING);

    // ---- Convert ----
    ui.add_enabled_ui(!state.job_in_progress, |ui| {
        if ui
            .button(egui::RichText::new("Convert/Resize Images").strong().color(theme::ACCENT))
            .clicked()
        {
            start_batch(state);
        }
    });

    // Progress bar for the running batch.
    if state.job_in_progress {
        if let Some((completed, total)) = state.job_progress {
            let fraction = completed as f32 / total.max(1) as f32;
            ui.add(
                egui::ProgressBar::new(fraction).text(format!("{completed}/{total}")),
            );
        }
    }

    ui.add_space(theme::PANEL_SPACING);
    render_log(ui, state);
}

/// Validate the panel state and queue the batch job.
fn start_batch(state: &mut AppState) {
    if state.images.inputs.is_empty() {
        state.images.log.push("Error: No images selected.");
        return;
    }
    let output_dir = match &state.images.output_dir {
        Some(dir) => dir.clone(),
        None => {
            state.images.log.push("Error: Please select an output folder.");
            return;
        }
    };
    if !output_dir.is_dir() {
        state
            .images
            .log
            .push(format!("Error: '{}' is not a directory.", output_dir.display()));
        return;
    }

    let resize = state.images.resize_enabled.then_some(ResizeSpec {
        width: state.images.width,
        height: state.images.height,
        preserve_aspect: state.images.preserve_aspect,
    });

    state.pending_job = Some(JobRequest::ImageBatch(ImageJob {
        inputs: state.images.inputs.clone(),
        params: ImageParams {
            format: state.images.format,
            resize,
            output_dir,
        },
    }));
}

/// Activity log: per-file results, newest at the bottom.
fn render_log(ui: &mut egui::Ui, state: &mut AppState) {
    egui::ScrollArea::vertical()
        .id_salt("image_log")
        .max_height(theme::LOG_HEIGHT)
        .stick_to_bottom(true)
        .show(ui, |ui| {
            for line in state.images.log.lines() {
                ui.label(
                    egui::RichText::new(line)
                        .small()
                        .color(theme::log_line_colour(line)),
                );
            }
        });
}
