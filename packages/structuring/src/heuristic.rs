//! Heuristic structurer - the guaranteed last-resort strategy.
//!
//! Builds a minimal document draft from the raw text alone: a best-effort
//! title, a truncated summary, and empty keyword/emotion sets. This path
//! cannot fail, which is what lets the pipeline promise a structured
//! document for every valid capture.

use crate::types::{DocumentDraft, StructuringConfig};

/// Fallback title when the text has no usable line.
pub const UNTITLED: &str = "Untitled";

/// Marker appended to a summary cut from the raw text.
const TRUNCATION_MARKER: &str = "...";

/// Label recognized at the start of a line as an explicit title.
const TITLE_LABEL: &str = "Title:";

/// Best-effort title: the content of a `Title:` line if one exists, else
/// the first non-empty line, else [`UNTITLED`]. Always truncated to
/// `max_chars`.
pub fn extract_title(text: &str, max_chars: usize) -> String {
    let title = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .find(|line| line.starts_with(TITLE_LABEL))
        .and_then(|line| line.strip_prefix(TITLE_LABEL))
        .map(|rest| rest.trim().to_string())
        .or_else(|| {
            text.lines()
                .find(|line| !line.trim().is_empty())
                .map(|line| line.trim().to_string())
        })
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| UNTITLED.to_string());

    truncate_chars(&title, max_chars).to_string()
}

/// Leading excerpt of the raw text with a truncation marker appended.
pub fn excerpt_summary(text: &str, config: &StructuringConfig) -> String {
    let excerpt = truncate_chars(text, config.summary_excerpt_chars).trim();
    format!("{}{}", excerpt, TRUNCATION_MARKER)
}

/// Build the full fallback draft for a capture.
pub fn structure(text: &str, config: &StructuringConfig) -> DocumentDraft {
    DocumentDraft {
        title: Some(extract_title(text, config.title_max_chars)),
        summary: Some(excerpt_summary(text, config)),
        raw_excerpt: Some(truncate_chars(text, config.raw_excerpt_chars).to_string()),
        ..DocumentDraft::default()
    }
}

/// Slice the leading `max` chars of a string on a character boundary.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
