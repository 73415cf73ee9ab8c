// ToolFusion - ui/panels/mod.rs

pub mod about;
pub mod images;
pub mod ocr;
pub mod password;
pub mod pdf;
pub mod tasks;
