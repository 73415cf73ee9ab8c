// ToolFusion - ui/panels/tasks.rs
//
// To-Do List tab.
//
// List mutation (add/toggle/remove) is synchronous in-memory work and
// happens directly here; save/load touch the filesystem and are handed to
// gui.rs via request flags.

use crate::app::state::AppState;
use crate::ui::theme;

/// Render the To-Do List tab.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("To-Do List Manager");
    ui.label(
        egui::RichText::new(format!(
            "Tasks are saved to '{}' when you click Save.",
            state.tasks_file.display()
        ))
        .small()
        .weak(),
    );
    ui.add_space(theme::PANEL_SPACING);

    // ---- New task input ----
    ui.horizontal(|ui| {
        let response = ui.add(
            egui::TextEdit::singleline(&mut state.tasks.input)
                .hint_text("Enter a new task")
                .desired_width(300.0),
        );
        let submitted =
            response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if ui.button("Add Task").clicked() || submitted {
            let text = state.tasks.input.clone();
            if state.tasks.tasks.add(&text) {
                state.tasks.log.push(format!("Added task: {}", text.trim()));
                state.tasks.input.clear();
                response.request_focus();
            }
        }
    });

    ui.add_space(theme::PANEL_SPACING);

    // ---- Task list ----
    // Collect the click target first; mutating the list while iterating it
    // would fight the borrow checker.
    let mut clicked: Option<usize> = None;
    egui::ScrollArea::vertical()
        .id_salt("task_list")
        .max_height(220.0)
        .auto_shrink([false, true])
        .show(ui, |ui| {
            for (idx, task) in state.tasks.tasks.tasks().iter().enumerate() {
                let selected = state.tasks.selected == Some(idx);
                let text = if task.completed {
                    egui::RichText::new(&task.text)
                        .strikethrough()
                        .color(theme::MUTED)
                } else {
                    egui::RichText::new(&task.text)
                };
                if ui.selectable_label(selected, text).clicked() {
                    clicked = Some(idx);
                }
            }
        });
    if let Some(idx) = clicked {
        state.tasks.selected = if state.tasks.selected == Some(idx) {
            None
        } else {
            Some(idx)
        };
    }

    ui.add_space(theme::PANEL_SPACING);

    // ---- Actions ----
    ui.horizontal(|ui| {
        let has_selection = state.tasks.selected.is_some();
        ui.add_enabled_ui(has_selection, |ui| {
            if ui.button("Toggle Complete").clicked() {
                if let Some(idx) = state.tasks.selected {
                    if state.tasks.tasks.toggle(idx) {
                        let task = &state.tasks.tasks.tasks()[idx];
                        let what = if task.completed { "complete" } else { "incomplete" };
                        state.tasks.log.push(format!("Marked as {what}: {}", task.text));
                    }
                }
            }
            if ui.button("Remove Selected").clicked() {
                if let Some(idx) = state.tasks.selected {
                    if let Some(task) = state.tasks.tasks.tasks().get(idx).cloned() {
                        state.tasks.tasks.remove(idx);
                        state.tasks.log.push(format!("Removed task: {}", task.text));
                        state.tasks.selected = None;
                    }
                }
            }
        });

        ui.separator();

        if ui.button("Save Tasks").clicked() {
            state.request_save_tasks = true;
        }
        if ui.button("Load Tasks").clicked() {
            state.request_load_tasks = true;
        }
    });

    ui.add_space(theme::PANEL_SPACING);
    egui::ScrollArea::vertical()
        .id_salt("task_log")
        .max_height(theme::LOG_HEIGHT)
        .stick_to_bottom(true)
        .show(ui, |ui| {
            for line in state.tasks.log.lines() {
                ui.label(
                    egui::RichText::new(line)
                        .small()
                        .color(theme::log_line_colour(line)),
                );
            }
        });
}
