const TRUNCATED_MARKER: &str = "...";
pub const MAX_PREVIEW_CHARS: usize = 800;

/// Shortens extracted text for display, keeping the first
/// `MAX_PREVIEW_CHARS` characters and appending a marker when cut.
pub fn prepare_preview(text: &str) -> String {
    match text.char_indices().nth(MAX_PREVIEW_CHARS) {
        None => text.to_string(),
        Some((end, _)) => format!("{}{TRUNCATED_MARKER}", &text[..end]),
    }
}
