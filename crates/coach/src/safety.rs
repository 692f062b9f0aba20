//! Banned-topic filter for generated lines.
//!
//! A light heuristic; the system prompts carry most of the safety weight.
//! Pure and deterministic: no state, no I/O.

/// Case-insensitive substrings that disqualify a line.
const BANNED_TOPICS: &[&str] = &["politic", "election", "religion", "sex ", "nsfw", "violence", "illegal"];

/// Whether a line touches a banned topic.
pub fn is_unsafe(text: &str) -> bool {
    let lower = text.to_lowercase();

    BANNED_TOPICS.iter().any(|topic| lower.contains(topic))
}

/// Split a raw multi-line block into trimmed, non-empty, safe lines,
/// preserving their relative order.
pub fn filter_sparks(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| !is_unsafe(line))
        .map(str::to_string)
        .collect()
}
