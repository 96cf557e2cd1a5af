//! Completion text cleanup.

const FENCE: &str = "```";

/// Trim a completion and, when `strip_fences` is set, remove one surrounding
/// markdown code fence (with or without a language tag).
///
/// Whitespace-only input yields an empty string.
#[must_use]
pub fn normalize_completion(text: &str, strip_fences: bool) -> String {
    let trimmed = text.trim();
    if strip_fences {
        if let Some(inner) = strip_fence(trimmed) {
            return inner.trim().to_string();
        }
    }
    trimmed.to_string()
}

fn strip_fence(text: &str) -> Option<&str> {
    let body = text.strip_prefix(FENCE)?.strip_suffix(FENCE)?;

    // Drop an info string such as `json` on the opening line
    match body.split_once('\n') {
        Some((info, rest)) if is_info_string(info) => Some(rest),
        // A one-line fence holding only a language tag is empty
        None if is_language_tag(body) => Some(""),
        _ => Some(body),
    }
}

fn is_info_string(line: &str) -> bool {
    line.trim()
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+'))
}

fn is_language_tag(text: &str) -> bool {
    let text = text.trim();
    text.starts_with(|c: char| c.is_ascii_alphabetic()) && is_info_string(text)
}
