// ToolFusion - gui.rs
//
// Top-level eframe::App implementation.
// Wires together all tool panels and manages the background job lifecycle.
// Panels never perform long work themselves; they set request fields on
// AppState, and this file consumes them each frame.

use crate::app::jobs::{JobManager, JobRequest};
use crate::app::state::{AppState, Tab};
use crate::core::model::JobProgress;
use crate::core::pdf_ops;
use crate::platform::{capture, clipboard};
use crate::ui;

/// The ToolFusion application.
pub struct ToolFusionApp {
    pub state: AppState,
    pub job_manager: JobManager,
}

impl ToolFusionApp {
    /// Create a new application instance with the given state.
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            job_manager: JobManager::new(),
        }
    }

    /// Drain and apply pending job-progress messages.
    fn handle_job_progress(&mut self, ctx: &egui::Context) {
        let messages = self.job_manager.poll_progress();
        let had_messages = !messages.is_empty();

        for msg in messages {
            match msg {
                JobProgress::Started { total } => {
                    self.state.job_progress = Some((0, total));
                }
                JobProgress::Step {
                    completed,
                    total,
                    detail,
                } => {
                    self.state.job_progress = Some((completed, total));
                    self.state.status_message = format!("Working\u{2026} ({completed}/{total})");
                    self.state.job_log().push(detail);
                }
                JobProgress::FileFailed { path, message } => {
                    self.state
                        .job_log()
                        .push(format!("Error processing {}: {message}", path.display()));
                }
                JobProgress::Finished { report } => {
                    self.state.job_in_progress = false;
                    self.state.job_progress = None;

                    if let Some(text) = report.extracted_text {
                        self.state.ocr.log.push(format!(
                            "OCR complete: {} characters in {:.1}s.",
                            text.chars().count(),
                            report.duration.as_secs_f64()
                        ));
                        self.state.ocr.extracted_text = text;
                        self.state.status_message = "OCR complete.".to_string();
                    } else {
                        let summary = if report.failed > 0 {
                            format!(
                                "Done: {} succeeded, {} failed in {:.1}s.",
                                report.succeeded,
                                report.failed,
                                report.duration.as_secs_f64()
                            )
                        } else {
                            format!(
                                "Done: {} file(s) in {:.1}s.",
                                report.outputs.len().max(report.succeeded),
                                report.duration.as_secs_f64()
                            )
                        };
                        self.state.job_log().push(summary.clone());
                        self.state.status_message = summary;
                    }
                }
                JobProgress::Failed { error } => {
                    self.state.job_in_progress = false;
                    self.state.job_progress = None;
                    self.state.job_log().push(format!("Error: {error}"));
                    self.state.status_message = format!("Operation failed: {error}");
                }
                JobProgress::Cancelled => {
                    self.state.job_in_progress = false;
                    self.state.job_progress = None;
                    self.state.status_message = "Operation cancelled.".to_string();
                }
            }
        }

        // Repaint while a job is active so progress updates appear promptly.
        if had_messages || self.state.job_in_progress {
            ctx.request_repaint();
        }
    }

    /// Consume the request flags panels set during the previous frame.
    fn handle_requests(&mut self, ctx: &egui::Context) {
        // pending_job: a panel queued a background operation.
        if let Some(request) = self.state.pending_job.take() {
            if self.state.job_in_progress {
                // Buttons are disabled while a job runs; this is a safety net.
                self.state.status_message =
                    "Another operation is already running.".to_string();
            } else {
                self.state.job_tab = Some(match &request {
                    JobRequest::ImageBatch(_) => Tab::Images,
                    JobRequest::Pdf(_) => Tab::Pdf,
                    JobRequest::Ocr { .. } => Tab::Ocr,
                });
                self.state.job_in_progress = true;
                self.state.status_message = format!("Starting {}\u{2026}", request.label());
                self.job_manager.start(request);
            }
        }

        // request_cancel: a panel or the status bar requested cancellation.
        if self.state.request_cancel {
            self.state.request_cancel = false;
            self.job_manager.cancel();
        }

        // request_capture: immediate full-screen snapshot.
        if self.state.request_capture {
            self.state.request_capture = false;
            self.take_screenshot(ctx);
        }

        // request_split_preflight: read the real page count for the spinners.
        if self.state.request_split_preflight {
            self.state.request_split_preflight = false;
            if let Some(input) = self.state.pdf.split_input.clone() {
                match pdf_ops::page_count(&input) {
                    Ok(pages) => {
                        self.state.pdf.split_page_count = Some(pages);
                        self.state.pdf.range_start = 1;
                        self.state.pdf.range_end = pages as u32;
                        self.state
                            .pdf
                            .log
                            .push(format!("Selected PDF for splitting: {}", input.display()));
                    }
                    Err(e) => {
                        self.state.pdf.split_input = None;
                        self.state.pdf.log.push(format!("Error reading PDF: {e}"));
                    }
                }
            }
        }

        // request_save_tasks / request_load_tasks: explicit persistence.
        if self.state.request_save_tasks {
            self.state.request_save_tasks = false;
            match self.state.tasks.tasks.save(&self.state.tasks_file) {
                Ok(()) => self.state.tasks.log.push("Tasks saved successfully."),
                Err(e) => self.state.tasks.log.push(format!("Error saving tasks: {e}")),
            }
        }
        if self.state.request_load_tasks {
            self.state.request_load_tasks = false;
            match self.state.tasks.tasks.load(&self.state.tasks_file) {
                Ok(count) => {
                    self.state.tasks.selected = None;
                    self.state
                        .tasks
                        .log
                        .push(format!("Loaded {count} task(s)."));
                }
                Err(e) => self.state.tasks.log.push(format!("Error loading tasks: {e}")),
            }
        }

        // clipboard_request: OS clipboard write.
        if let Some(text) = self.state.clipboard_request.take() {
            match clipboard::set_text(&text) {
                Ok(()) => {
                    self.state.status_message = "Copied to clipboard.".to_string();
                }
                Err(e) => {
                    self.state.status_message = e;
                }
            }
        }
    }

    /// Capture the primary monitor, persist the PNG, and build the preview
    /// texture. A failed disk write keeps the in-memory capture usable.
    fn take_screenshot(&mut self, ctx: &egui::Context) {
        match capture::capture_primary() {
            Ok(image) => {
                if let Err(e) = capture::save_png(&image, &self.state.screenshot_file) {
                    tracing::warn!(error = %e, "Screenshot could not be saved");
                    self.state
                        .ocr
                        .log
                        .push(format!("Warning: screenshot not saved to disk: {e}"));
                } else {
                    self.state.ocr.log.push(format!(
                        "Screenshot taken and saved to {}.",
                        self.state.screenshot_file.display()
                    ));
                }

                let size = [image.width() as usize, image.height() as usize];
                let colour_image =
                    egui::ColorImage::from_rgba_unmultiplied(size, image.as_raw());
                self.state.ocr.preview = Some(ctx.load_texture(
                    "screenshot_preview",
                    colour_image,
                    egui::TextureOptions::LINEAR,
                ));
                self.state.ocr.captured = Some(image);
                self.state.status_message = "Screenshot captured.".to_string();
            }
            Err(e) => {
                self.state.ocr.log.push(format!("Error taking screenshot: {e}"));
                self.state.status_message = format!("Screenshot failed: {e}");
            }
        }
    }
}

impl eframe::App for ToolFusionApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_job_progress(ctx);
        self.handle_requests(ctx);

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Save Tasks").clicked() {
                        self.state.request_save_tasks = true;
                        ui.close_menu();
                    }
                    if ui.button("Load Tasks").clicked() {
                        self.state.request_load_tasks = true;
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.menu_button("Help", |ui| {
                    if ui.button("About ToolFusion").clicked() {
                        self.state.show_about = true;
                        ui.close_menu();
                    }
                });
            });
        });

        // Tab strip
        egui::TopBottomPanel::top("tab_strip").show(ctx, |ui| {
            ui.horizontal(|ui| {
                for tab in Tab::all() {
                    let selected = self.state.active_tab == *tab;
                    if ui.selectable_label(selected, tab.label()).clicked() {
                        self.state.active_tab = *tab;
                    }
                }
            });
        });

        // Status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::STATUS_BAR_HEIGHT)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    if self.state.job_in_progress {
                        ui.label(
                            egui::RichText::new(" \u{25cf} BUSY ")
                                .strong()
                                .color(ui::theme::WARNING),
                        );
                        ui.separator();
                    }
                    ui.label(&self.state.status_message);
                    // Cancel button visible only while a job is running.
                    if self.state.job_in_progress && ui.small_button("Cancel").clicked() {
                        self.state.request_cancel = true;
                    }
                    ui.with_layout(
                        egui::Layout::right_to_left(egui::Align::Center),
                        |ui| {
                            if let Some((completed, total)) = self.state.job_progress {
                                ui.label(format!("{completed}/{total}"));
                            }
                        },
                    );
                });
            });

        // Startup warnings (config validation) until dismissed.
        if !self.state.warnings.is_empty() {
            egui::TopBottomPanel::bottom("warnings_bar").show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new(format!(
                            "\u{26a0} {}",
                            self.state.warnings.join("  \u{00b7}  ")
                        ))
                        .color(ui::theme::WARNING)
                        .small(),
                    );
                    if ui.small_button("Dismiss").clicked() {
                        self.state.warnings.clear();
                    }
                });
            });
        }

        // Central panel: the active tool tab.
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .id_salt("active_panel")
                .auto_shrink([false; 2])
                .show(ui, |ui| match self.state.active_tab {
                    Tab::Images => ui::panels::images::render(ui, &mut self.state),
                    Tab::Pdf => ui::panels::pdf::render(ui, &mut self.state),
                    Tab::Ocr => ui::panels::ocr::render(ui, &mut self.state),
                    Tab::Tasks => ui::panels::tasks::render(ui, &mut self.state),
                    Tab::Password => ui::panels::password::render(ui, &mut self.state),
                });
        });

        // About dialog (modal-ish)
        ui::panels::about::render(ctx, &mut self.state);
    }
}
