//! Small helpers shared by the engines and the UI.

pub mod config;

/// Rank how well `name` matches `query` using fzf-style fuzzy matching with a provided matcher.
///
/// Inputs:
/// - `name`: Text to match against
/// - `query`: Query string
/// - `matcher`: `SkimMatcherV2` instance reused across calls
///
/// Output:
/// - `Some(score)` if the query matches (higher is better), `None` otherwise or for a blank query
#[must_use]
pub fn fuzzy_match_rank_with_matcher(
    name: &str,
    query: &str,
    matcher: &fuzzy_matcher::skim::SkimMatcherV2,
) -> Option<i64> {
    use fuzzy_matcher::FuzzyMatcher;

    if query.trim().is_empty() {
        return None;
    }

    matcher.fuzzy_match(name, query)
}

/// What: Truncate `s` to at most `max` characters, appending `…` when cut.
#[must_use]
pub fn ellipsize(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use fuzzy_matcher::skim::SkimMatcherV2;

    use super::{ellipsize, fuzzy_match_rank_with_matcher};

    #[test]
    /// What: Blank queries never match; subsequences do.
    ///
    /// Inputs:
    /// - `"Al-Baqara"` with `"bqr"` and `"  "`.
    ///
    /// Output:
    /// - A score for the subsequence; `None` for blank.
    fn fuzzy_rank_basics() {
        let m = SkimMatcherV2::default();
        assert!(fuzzy_match_rank_with_matcher("2 Al-Baqara", "bqr", &m).is_some());
        assert!(fuzzy_match_rank_with_matcher("2 Al-Baqara", "  ", &m).is_none());
        assert!(fuzzy_match_rank_with_matcher("2 Al-Baqara", "zzz", &m).is_none());
    }

    #[test]
    /// What: Long text is cut with an ellipsis, short text is untouched.
    fn ellipsize_bounds() {
        assert_eq!(ellipsize("abc", 5), "abc");
        assert_eq!(ellipsize("abcdef", 4), "abc…");
    }
}
