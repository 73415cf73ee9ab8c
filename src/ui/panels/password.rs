// ToolFusion - ui/panels/password.rs
//
// Password Generator tab.
//
// Generation is pure computation and runs directly here; the clipboard
// write is handed to gui.rs via `state.clipboard_request`.

use crate::app::state::AppState;
use crate::core::password;
use crate::ui::theme;
use crate::util::constants::{MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};

/// Render the Password Generator tab.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("Password Generator");
    ui.label(
        egui::RichText::new(
            "Choose a length and which character sets to include, then click \
             Generate. The password is sampled uniformly from the selected sets.",
        )
        .small()
        .weak(),
    );
    ui.add_space(theme::PANEL_SPACING);

    ui.horizontal(|ui| {
        ui.label("Password length:");
        ui.add(
            egui::DragValue::new(&mut state.password.policy.length)
                .range(MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH),
        );
    });

    ui.checkbox(
        &mut state.password.policy.include_upper,
        "Include uppercase letters (A-Z)",
    );
    ui.checkbox(
        &mut state.password.policy.include_lower,
        "Include lowercase letters (a-z)",
    );
    ui.checkbox(
        &mut state.password.policy.include_digits,
        "Include numbers (0-9)",
    );
    ui.checkbox(
        &mut state.password.policy.include_symbols,
        "Include symbols (!@#\u{2026})",
    );

    ui.add_space(theme::PANEL_SPACING);

    ui.horizontal(|ui| {
        if ui
            .button(egui::RichText::new("Generate Password").strong().color(theme::ACCENT))
            .clicked()
        {
            match password::generate(&state.password.policy) {
                Ok(generated) => {
                    state.password.generated = generated;
                    state.password.error = None;
                }
                Err(e) => {
                    state.password.generated.clear();
                    state.password.error = Some(e.to_string());
                }
            }
        }

        ui.add_enabled_ui(!state.password.generated.is_empty(), |ui| {
            if ui.button("Copy to Clipboard").clicked() {
                state.clipboard_request = Some(state.password.generated.clone());
            }
        });
    });

    ui.add_space(theme::PANEL_SPACING);

    if let Some(error) = &state.password.error {
        ui.label(egui::RichText::new(format!("Error: {error}")).color(theme::ERROR));
    } else if !state.password.generated.is_empty() {
        ui.add(
            egui::TextEdit::singleline(&mut state.password.generated.as_str())
                .font(egui::TextStyle::Monospace)
                .desired_width(f32::INFINITY),
        );
    }
}
