// ToolFusion - ui/panels/ocr.rs
//
// Screenshot & OCR tab.
//
// Capture and OCR are two independent user-triggered steps: the capture
// happens immediately (gui.rs consumes `request_capture`), OCR runs as a
// background job over the capture held in this session. The OCR button is
// disabled until a capture exists.

use crate::app::jobs::JobRequest;
use crate::app::state::AppState;
use crate::ui::theme;

/// Render the Screenshot & OCR tab.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("Screenshot & OCR");
    ui.label(
        egui::RichText::new(
            "Take a full-screen screenshot of the primary monitor, then \
             extract its text. The screenshot is also saved to the ToolFusion \
             data folder.",
        )
        .small()
        .weak(),
    );
    ui.add_space(theme::PANEL_SPACING);

    ui.horizontal(|ui| {
        if ui.button("Take Screenshot").clicked() {
            state.request_capture = true;
        }

        let can_ocr = state.ocr.captured.is_some() && !state.job_in_progress;
        ui.add_enabled_ui(can_ocr, |ui| {
            let button = ui
                .button(egui::RichText::new("Perform OCR").strong().color(theme::ACCENT))
                .on_disabled_hover_text("Take a screenshot first");
            if button.clicked() {
                if let Some(image) = state.ocr.captured.clone() {
                    state.pending_job = Some(JobRequest::Ocr {
                        image,
                        models: state.model_paths.clone(),
                    });
                }
            }
        });

        if !state.ocr.extracted_text.is_empty() && ui.button("Copy Text").clicked() {
            state.clipboard_request = Some(state.ocr.extracted_text.clone());
        }
    });

    ui.add_space(theme::PANEL_SPACING);

    // ---- Capture preview ----
    match &state.ocr.preview {
        Some(texture) => {
            let size = texture.size_vec2();
            let scale = (theme::PREVIEW_HEIGHT / size.y).min(1.0);
            ui.image((texture.id(), size * scale));
        }
        None => {
            ui.label(egui::RichText::new("Screenshot preview").weak());
        }
    }

    if state.job_in_progress {
        if let Some((completed, total)) = state.job_progress {
            let fraction = completed as f32 / total.max(1) as f32;
            ui.add(egui::ProgressBar::new(fraction).text("Recognising text\u{2026}"));
        }
    }

    ui.add_space(theme::PANEL_SPACING);

    // ---- Extracted text ----
    if !state.ocr.extracted_text.is_empty() {
        ui.label(egui::RichText::new("OCR Result").strong());
        egui::ScrollArea::vertical()
            .id_salt("ocr_text")
            .max_height(theme::LOG_HEIGHT)
            .show(ui, |ui| {
                ui.add(
                    egui::TextEdit::multiline(&mut state.ocr.extracted_text.as_str())
                        .font(egui::TextStyle::Monospace)
                        .desired_width(f32::INFINITY),
                );
            });
    }

    ui.add_space(theme::PANEL_SPACING);
    egui::ScrollArea::vertical()
        .id_salt("ocr_log")
        .max_height(theme::LOG_HEIGHT)
        .stick_to_bottom(true)
        .show(ui, |ui| {
            for line in state.ocr.log.lines() {
                ui.label(
                    egui::RichText::new(line)
                        .small()
                        .color(theme::log_line_colour(line)),
                );
            }
        });
}
