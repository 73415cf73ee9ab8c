// ToolFusion - app/mod.rs
//
// Application layer: state management and background job orchestration.
// Dependencies: core layer, platform config types.
// Must NOT depend on: ui.

pub mod jobs;
pub mod state;
