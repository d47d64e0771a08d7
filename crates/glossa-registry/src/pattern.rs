//! Validated URL patterns
//!
//! Patterns are compiled once, when the descriptor is built, so a plugin
//! author sees the compilation error at registration time instead of a
//! skipped dimension at every resolution.

use glossa_domain::error::{Error, Result};
use regex::Regex;

/// A URL-matching expression compiled at descriptor build time
#[derive(Debug, Clone)]
pub struct UrlPattern {
    raw: String,
    regex: Regex,
}

impl UrlPattern {
    /// Compile `pattern`, attributing a failure to the provider `owner_id`
    pub fn compile(owner_id: &str, pattern: impl Into<String>) -> Result<Self> {
        let raw = pattern.into();
        match Regex::new(&raw) {
            Ok(regex) => Ok(Self { raw, regex }),
            Err(source) => Err(Error::InvalidPattern {
                id: owner_id.to_string(),
                pattern: raw,
                source,
            }),
        }
    }

    /// Test a URL against this pattern
    pub fn is_match(&self, url: &str) -> bool {
        self.regex.is_match(url)
    }

    /// The pattern as written by the provider author
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiles_and_matches() {
        let pattern = UrlPattern::compile("yt", r"youtube\.com/watch").unwrap();
        assert!(pattern.is_match("https://www.youtube.com/watch?v=abc"));
        assert!(!pattern.is_match("https://example.org"));
    }

    #[test]
    fn rejects_malformed_pattern_with_owner_id() {
        let err = UrlPattern::compile("bad-plugin", "[unclosed").unwrap_err();
        match err {
            Error::InvalidPattern { id, pattern, .. } => {
                assert_eq!(id, "bad-plugin");
                assert_eq!(pattern, "[unclosed");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
