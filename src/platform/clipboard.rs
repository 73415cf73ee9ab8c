// ToolFusion - platform/clipboard.rs
//
// OS clipboard writes via arboard. Uses a fresh Clipboard handle per write;
// a long-lived handle would hold the X11 selection connection open for the
// whole application lifetime.

/// Write `text` to the OS clipboard. Returns a user-displayable error
/// message on failure.
pub fn set_text(text: &str) -> Result<(), String> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| format!("Clipboard unavailable: {e}"))?;
    clipboard
        .set_text(text.to_string())
        .map_err(|e| format!("Clipboard write failed: {e}"))?;
    tracing::debug!(chars = text.len(), "Text copied to clipboard");
    Ok(())
}
