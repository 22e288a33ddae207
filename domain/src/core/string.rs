//! String utilities for the domain layer.

/// The first `max_chars` characters of `s`.
///
/// Counts characters rather than bytes so multi-byte text never splits.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

/// Collapse every run of whitespace into a single space and trim both ends.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
