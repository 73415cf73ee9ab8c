// ToolFusion - ui/mod.rs
//
// UI layer: presentation only.
// Dependencies: app (state), core (read-only models), egui, rfd (pickers).
// Long-running or I/O work is handed to gui.rs via AppState request flags.

pub mod panels;
pub mod theme;
