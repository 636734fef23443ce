//! Wildcard path pattern compilation.
//!
//! A pattern is a literal path string in which `*` matches any run of
//! characters, including none and including `/`. Patterns are compiled once
//! at registration time into anchored regexes; compilation cannot fail
//! because every character is escaped before the wildcard is substituted.

use regex::Regex;

/// An immutable path pattern and its compiled matcher.
///
/// Equality and conflict detection operate on the literal source string, not
/// on the expanded regex: `/a/*` and `/a/b` are different patterns even
/// though their match sets overlap.
#[derive(Debug, Clone)]
pub struct PathPattern {
    source: String,
    matcher: Regex,
}

impl PathPattern {
    /// Compile a wildcard pattern into an anchored matcher.
    ///
    /// Every regex metacharacter in the source is escaped, then each escaped
    /// `*` becomes a greedy `.*`. Consecutive or trailing wildcards are legal
    /// and collapse to the same behavior as a single one.
    #[must_use]
    pub fn compile(source: &str) -> Self {
        let expr = format!("^{}$", regex::escape(source).replace("\\*", ".*"));
        #[allow(clippy::expect_used)]
        let matcher = Regex::new(&expr).expect("escaped wildcard pattern is always a valid regex");
        Self {
            source: source.to_string(),
            matcher,
        }
    }

    /// The literal pattern string as registered.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Whether the pattern fully matches a request path, start to end.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        self.matcher.is_match(path)
    }
}
