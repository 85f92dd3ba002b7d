// src/util/text.rs
use crate::constants::LIST_PREVIEW_LEN;

/// One-line preview of memo content for list output.
///
/// Takes the first non-empty line and truncates it to the configured
/// preview length, appending an ellipsis when shortened.
///
/// # Examples
///
/// ```
/// use timenotes::util::text::preview;
///
/// let content = "\nBuy milk\nand eggs";
/// assert_eq!(preview(content), "Buy milk");
/// ```
pub fn preview(content: &str) -> String {
    let first_line = content
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("");

    if first_line.chars().count() <= LIST_PREVIEW_LEN {
        return first_line.to_string();
    }
    let truncated: String = first_line.chars().take(LIST_PREVIEW_LEN).collect();
    format!("{truncated}…")
}
