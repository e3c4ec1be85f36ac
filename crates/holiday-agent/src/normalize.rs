//! Removes the code fence models like to wrap JSON answers in.

const OPEN_FENCE: &str = "```json";
const CLOSE_FENCE: &str = "```";

/// Trims `raw`, drops a leading "```json" and a trailing "```" when present
/// (exact, case-sensitive), and trims what is left. Repeats until nothing
/// changes, so the result never starts with "```json" or ends with "```".
/// The text is not checked for being JSON.
pub fn normalize(raw: &str) -> &str {
    let mut text = raw.trim();
    loop {
        let stripped = text.strip_prefix(OPEN_FENCE).unwrap_or(text);
        let stripped = stripped.strip_suffix(CLOSE_FENCE).unwrap_or(stripped).trim();
        if stripped.len() == text.len() {
            return text;
        }
        text = stripped;
    }
}
