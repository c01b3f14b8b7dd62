//! # Spec Pattern

use crate::patterns::{CompiledPattern, PatternError};

/// The regex engine a pattern was written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RegexDialect {
    /// Plain `regex` syntax.
    Basic,

    /// Needs backtracking extensions, such as lookaround.
    Fancy,

    /// Not known; try `Basic`, then `Fancy`.
    #[default]
    Unknown,
}

/// A regex source, labeled with its dialect.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SpecPattern {
    dialect: RegexDialect,
    source: String,
}

impl<S: AsRef<str>> From<S> for SpecPattern {
    fn from(source: S) -> Self {
        Self::new(RegexDialect::Unknown, source.as_ref())
    }
}

impl SpecPattern {
    /// Label `source` with `dialect`.
    pub fn new<S: Into<String>>(
        dialect: RegexDialect,
        source: S,
    ) -> Self {
        Self {
            dialect,
            source: source.into(),
        }
    }

    /// A pattern in plain `regex` syntax.
    pub fn basic<S: Into<String>>(source: S) -> Self {
        Self::new(RegexDialect::Basic, source)
    }

    /// Get the dialect.
    pub fn dialect(&self) -> RegexDialect {
        self.dialect
    }

    /// Get the pattern source.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Only match at the start of a haystack.
    pub fn anchored_start(&self) -> Self {
        Self::new(self.dialect, format!("^(?:{})", self.source))
    }

    /// Only match at the end of a haystack.
    pub fn anchored_end(&self) -> Self {
        Self::new(self.dialect, format!("(?:{})$", self.source))
    }

    /// Compile with the engine the dialect calls for.
    ///
    /// An `Unknown` pattern which neither engine accepts reports the
    /// `fancy_regex` error.
    pub fn compile(&self) -> Result<CompiledPattern, PatternError> {
        let basic = || regex::Regex::new(&self.source).map(CompiledPattern::Basic);
        let fancy = || fancy_regex::Regex::new(&self.source).map(CompiledPattern::Fancy);
        match self.dialect {
            RegexDialect::Basic => basic().map_err(PatternError::from),
            RegexDialect::Fancy => fancy().map_err(PatternError::from),
            RegexDialect::Unknown => basic().or_else(|_| fancy().map_err(PatternError::from)),
        }
    }
}
