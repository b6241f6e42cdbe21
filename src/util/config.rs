//! Configuration file parsing utilities.
//!
//! This module provides helpers for parsing configuration files with common
//! patterns like comment skipping and key-value parsing.

/// What: Check if a line should be skipped (empty or comment).
///
/// Inputs:
/// - `line`: Line to check
///
/// Output:
/// - `true` if the line should be skipped, `false` otherwise
///
/// Details:
/// - Skips empty lines and lines starting with `#`, `//`, or `;`
pub fn skip_comment_or_empty(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty()
        || trimmed.starts_with('#')
        || trimmed.starts_with("//")
        || trimmed.starts_with(';')
}

/// What: Parse a key-value pair from a line.
///
/// Inputs:
/// - `line`: Line containing key=value format
///
/// Output:
/// - `Some((key, value))` if parsing succeeds, `None` otherwise
///
/// Details:
/// - Splits on the first `=` character
/// - Trims whitespace from both key and value
pub fn parse_key_value(line: &str) -> Option<(String, String)> {
    let trimmed = line.trim();
    if !trimmed.contains('=') {
        return None;
    }
    let mut parts = trimmed.splitn(2, '=');
    let key = parts.next()?.trim().to_string();
    let value = parts.next()?.trim().to_string();
    Some((key, value))
}

/// What: Strip trailing comments from a config value.
///
/// Inputs:
/// - `s`: Raw value text (right of `=`).
///
/// Output:
/// - Comment-free, trimmed substring of the input.
///
/// Details:
/// - Strips trailing `//` sections and any `#` not at the start of the value.
pub fn strip_inline_comment(mut s: &str) -> &str {
    if let Some(i) = s.find("//").filter(|i| !s[..*i].ends_with(':')) {
        s = &s[..i];
    }
    if let Some(i) = s.get(1..).and_then(|rest| rest.find('#')).map(|j| j + 1) {
        s = &s[..i];
    }
    s.trim()
}

#[cfg(test)]
mod tests {
    use super::{parse_key_value, skip_comment_or_empty, strip_inline_comment};

    #[test]
    /// What: Comments and blank lines are skipped; values keep URLs intact.
    ///
    /// Inputs:
    /// - Comment styles, a URL value, a value with a trailing comment.
    ///
    /// Output:
    /// - Skips detected; URL preserved; comment removed.
    fn comments_and_values() {
        assert!(skip_comment_or_empty("   "));
        assert!(skip_comment_or_empty("# note"));
        assert!(skip_comment_or_empty("; note"));
        assert!(!skip_comment_or_empty("a = b"));
        assert_eq!(
            parse_key_value(" quran_url = https://api.alquran.cloud/v1 "),
            Some(("quran_url".into(), "https://api.alquran.cloud/v1".into()))
        );
        assert_eq!(
            strip_inline_comment("https://api.alquran.cloud/v1"),
            "https://api.alquran.cloud/v1"
        );
        assert_eq!(strip_inline_comment("Africa/Cairo # local"), "Africa/Cairo");
        assert_eq!(strip_inline_comment("mpv // player"), "mpv");
    }
}
