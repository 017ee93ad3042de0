//! Fuzzy matching for the leaderboard filter.

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

/// Case-insensitive fuzzy matcher.
///
/// Wraps the skim algorithm so the rest of the code only sees `matches`.
pub struct Matcher {
    inner: SkimMatcherV2,
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Matcher {
    pub fn new() -> Self {
        Self {
            inner: SkimMatcherV2::default().ignore_case(),
        }
    }

    /// Whether the characters of `pattern` appear in `text`, in order.
    pub fn matches(&self, text: &str, pattern: &str) -> bool {
        self.inner.fuzzy_match(text, pattern).is_some()
    }

    /// Whether any of the texts matches.
    pub fn matches_any<'a>(&self, texts: impl IntoIterator<Item = &'a str>, pattern: &str) -> bool {
        texts.into_iter().any(|text| self.matches(text, pattern))
    }
}
