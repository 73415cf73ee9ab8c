// ToolFusion - platform/mod.rs
//
// Platform abstraction layer: config/data directories, screen capture,
// OS clipboard.
// Dependencies: standard library, directories, xcap, arboard, image.
// Must NOT depend on: core, app, ui.

pub mod capture;
pub mod clipboard;
pub mod config;
