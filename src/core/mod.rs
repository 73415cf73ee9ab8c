// ToolFusion - core/mod.rs
//
// Core service layer: one pure module per tool.
// Dependencies: the delegated libraries (image, lopdf, ocrs, rand) only.
// Must NOT depend on: ui, platform, or app.

pub mod image_convert;
pub mod model;
pub mod ocr;
pub mod password;
pub mod pdf_ops;
pub mod tasks;
