// ToolFusion - ui/panels/pdf.rs
//
// PDF Merger/Splitter tab.
//
// Merge: ordered file list + save-file dialog, queued as a background job.
// Split: one input, all-pages or an explicit range; selecting the input
// sets `state.request_split_preflight` so gui.rs can read the real page
// count and clamp the range spinners (no I/O in this panel).

use crate::app::jobs::JobRequest;
use crate::app::state::AppState;
use crate::core::model::{PdfJob, SplitMode};
use crate::ui::theme;
use crate::util::constants::{MAX_MERGE_INPUTS, MAX_PAGE_SPINNER};

/// Render the PDF tab.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("PDF Merger/Splitter");
    ui.label(
        egui::RichText::new(
            "To merge, add PDFs in order and click Merge. To split, select a \
             PDF, choose all pages or a range, then click Split. An encrypted \
             or unreadable PDF aborts the whole operation.",
        )
        .small()
        .weak(),
    );
    ui.add_space(theme::PANEL_SPACING);

    render_merge_section(ui, state);
    ui.separator();
    render_split_section(ui, state);

    // Progress bar for the running job.
    if state.job_in_progress {
        if let Some((completed, total)) = state.job_progress {
            let fraction = completed as f32 / total.max(1) as f32;
            ui.add(egui::ProgressBar::new(fraction).text(format!("{completed}/{total}")));
        }
    }

    ui.add_space(theme::PANEL_SPACING);
    egui::ScrollArea::vertical()
        .id_salt("pdf_log")
        .max_height(theme::LOG_HEIGHT)
        .stick_to_bottom(true)
        .show(ui, |ui| {
            for line in state.pdf.log.lines() {
                ui.label(
                    egui::RichText::new(line)
                        .small()
                        .color(theme::log_line_colour(line)),
                );
            }
        });
}

fn render_merge_section(ui: &mut egui::Ui, state: &mut AppState) {
    ui.label(egui::RichText::new("Merge PDFs").strong());

    ui.horizontal(|ui| {
        if ui.button("Add PDFs\u{2026}").clicked() {
            if let Some(files) = rfd::FileDialog::new()
                .add_filter("PDF Files", &["pdf"])
                .pick_files()
            {
                for file in files {
                    if state.pdf.merge_inputs.len() >= MAX_MERGE_INPUTS {
                        state.pdf.log.push(format!(
                            "Error: merge list is full (max {MAX_MERGE_INPUTS} files)."
                        ));
                        break;
                    }
                    state.pdf.merge_inputs.push(file);
                }
            }
        }
        if !state.pdf.merge_inputs.is_empty() && ui.button("Clear").clicked() {
            state.pdf.merge_inputs.clear();
        }

        ui.add_enabled_ui(!state.job_in_progress, |ui| {
            if ui
                .button(egui::RichText::new("Merge PDFs").strong().color(theme::ACCENT))
                .clicked()
            {
                start_merge(state);
            }
        });
    });

    if !state.pdf.merge_inputs.is_empty() {
        egui::ScrollArea::vertical()
            .id_salt("pdf_merge_list")
            .max_height(100.0)
            .show(ui, |ui| {
                // Collect removal clicks first; mutating the list while
                // iterating it would fight the borrow checker.
                let mut remove: Option<usize> = None;
                for (idx, input) in state.pdf.merge_inputs.iter().enumerate() {
                    ui.horizontal(|ui| {
                        if ui.small_button("\u{2715}").clicked() {
                            remove = Some(idx);
                        }
                        ui.label(
                            egui::RichText::new(format!("{}. {}", idx + 1, input.display()))
                                .monospace()
                                .small(),
                        );
                    });
                }
                if let Some(idx) = remove {
                    state.pdf.merge_inputs.remove(idx);
                }
            });
    }
}

fn start_merge(state: &mut AppState) {
    if state.pdf.merge_inputs.is_empty() {
        state.pdf.log.push("Error: No PDF files added for merging.");
        return;
    }
    let Some(output) = rfd::FileDialog::new()
        .add_filter("PDF Files", &["pdf"])
        .set_file_name("merged.pdf")
        .save_file()
    else {
        return;
    };
    state.pending_job = Some(JobRequest::Pdf(PdfJob::Merge {
        inputs: state.pdf.merge_inputs.clone(),
        output,
    }));
}

fn render_split_section(ui: &mut egui::Ui, state: &mut AppState) {
    ui.label(egui::RichText::new("Split PDF").strong());

    ui.horizontal(|ui| {
        if ui.button("Select PDF\u{2026}").clicked() {
            if let Some(file) = rfd::FileDialog::new()
                .add_filter("PDF Files", &["pdf"])
                .pick_file()
            {
                state.pdf.split_input = Some(file);
                state.pdf.split_page_count = None;
                state.request_split_preflight = true;
            }
        }
        match (&state.pdf.split_input, state.pdf.split_page_count) {
            (Some(input), Some(pages)) => {
                ui.label(
                    egui::RichText::new(format!("{} ({pages} pages)", input.display()))
                        .monospace(),
                );
            }
            (Some(input), None) => {
                ui.label(egui::RichText::new(input.display().to_string()).monospace());
            }
            (None, _) => {
                ui.label(egui::RichText::new("no PDF selected").weak());
            }
        }
    });

    let max_page = state
        .pdf
        .split_page_count
        .map(|n| n as u32)
        .unwrap_or(MAX_PAGE_SPINNER);

    ui.horizontal(|ui| {
        ui.checkbox(&mut state.pdf.split_all, "Split all pages");
        ui.add_enabled_ui(!state.pdf.split_all, |ui| {
            ui.label("Start page:");
            ui.add(egui::DragValue::new(&mut state.pdf.range_start).range(1..=max_page));
            ui.label("End page:");
            ui.add(egui::DragValue::new(&mut state.pdf.range_end).range(1..=max_page));
        });
    });

    ui.horizontal(|ui| {
        if ui.button("Output Folder\u{2026}").clicked() {
            if let Some(dir) = rfd::FileDialog::new().pick_folder() {
                state.pdf.output_dir = Some(dir);
            }
        }
        match &state.pdf.output_dir {
            Some(dir) => {
                ui.label(egui::RichText::new(dir.display().to_string()).monospace());
            }
            None => {
                ui.label(egui::RichText::new("no output folder selected").weak());
            }
        }

        ui.add_enabled_ui(!state.job_in_progress, |ui| {
            if ui
                .button(egui::RichText::new("Split PDF").strong().color(theme::ACCENT))
                .clicked()
            {
                start_split(state);
            }
        });
    });
}

fn start_split(state: &mut AppState) {
    let Some(input) = state.pdf.split_input.clone() else {
        state.pdf.log.push("Error: No PDF file selected for splitting.");
        return;
    };
    let Some(output_dir) = state.pdf.output_dir.clone() else {
        state
            .pdf
            .log
            .push("Error: Please select an output folder for split PDFs.");
        return;
    };

    let mode = if state.pdf.split_all {
        SplitMode::AllPages
    } else {
        if state.pdf.range_start > state.pdf.range_end {
            state.pdf.log.push(format!(
                "Error: start page {} is after end page {}.",
                state.pdf.range_start, state.pdf.range_end
            ));
            return;
        }
        SplitMode::Range {
            start: state.pdf.range_start,
            end: state.pdf.range_end,
        }
    };

    state.pending_job = Some(JobRequest::Pdf(PdfJob::Split {
        input,
        mode,
        output_dir,
    }));
}
