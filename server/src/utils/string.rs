//! String utility functions

/// Parse a comma-separated query value into a list of slugs.
///
/// Handles `a,b,c` and `a, b, c`; empty segments are dropped.
pub fn parse_slug_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
