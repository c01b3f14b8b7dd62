//! # Compiled Pattern

use core::{fmt, ops::Range};

/// A spec pattern which failed to compile.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum PatternError {
    /// Rejected by `regex`.
    Basic(Box<regex::Error>),

    /// Rejected by `fancy_regex`.
    Fancy(Box<fancy_regex::Error>),
}

impl From<regex::Error> for PatternError {
    fn from(err: regex::Error) -> Self {
        Self::Basic(Box::new(err))
    }
}

impl From<fancy_regex::Error> for PatternError {
    fn from(err: fancy_regex::Error) -> Self {
        Self::Fancy(Box::new(err))
    }
}

impl fmt::Display for PatternError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Basic(err) => write!(f, "{err}"),
            Self::Fancy(err) => write!(f, "{err}"),
        }
    }
}

impl core::error::Error for PatternError {}

/// A compiled spec pattern, on either engine.
#[derive(Debug, Clone)]
pub enum CompiledPattern {
    /// Compiled by `regex`.
    Basic(regex::Regex),

    /// Compiled by `fancy_regex`.
    Fancy(fancy_regex::Regex),
}

impl CompiledPattern {
    /// Did this need the backtracking engine?
    pub fn is_fancy(&self) -> bool {
        matches!(self, Self::Fancy(_))
    }

    /// Byte range of the first match.
    ///
    /// A `fancy_regex` runtime error (backtrack limit) counts as no match.
    pub fn find(
        &self,
        haystack: &str,
    ) -> Option<Range<usize>> {
        match self {
            Self::Basic(re) => re.find(haystack).map(|m| m.range()),
            Self::Fancy(re) => match re.find(haystack) {
                Ok(m) => m.map(|m| m.range()),
                Err(err) => {
                    log::debug!("pattern {:?} gave up on {haystack:?}: {err}", re.as_str());
                    None
                }
            },
        }
    }

    /// Text of capture `group` in the first match, if it took part.
    pub fn capture<'h>(
        &self,
        haystack: &'h str,
        group: usize,
    ) -> Option<&'h str> {
        match self {
            Self::Basic(re) => re.captures(haystack)?.get(group).map(|m| m.as_str()),
            Self::Fancy(re) => re
                .captures(haystack)
                .ok()??
                .get(group)
                .map(|m| m.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::patterns::{RegexDialect, SpecPattern};

    #[test]
    fn test_find_and_capture_on_both_engines() {
        for dialect in [RegexDialect::Basic, RegexDialect::Fancy] {
            let re = SpecPattern::new(dialect, r"^@(\S+)@$").compile().unwrap();
            assert_eq!(re.is_fancy(), dialect == RegexDialect::Fancy);
            assert_eq!(re.find("@-@"), Some(0..3));
            assert_eq!(re.capture("@-@", 1), Some("-"));
            assert_eq!(re.capture("@-", 1), None);
            assert_eq!(re.find("plain"), None);
        }
    }
}
