//! # Error Types

use crate::patterns::PatternError;

/// Errors from syntaxgym operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SyntaxGymError {
    /// Region content has boundary or repeated whitespace.
    #[error("region content {content:?} {reason}; this is not allowed")]
    RegionSpacing {
        /// The offending content.
        content: String,

        /// What is wrong with it.
        reason: &'static str,
    },

    /// A requested metric name is not registered.
    #[error("unknown metrics: {names:?}")]
    UnknownMetric {
        /// The unknown names, in request order.
        names: Vec<String>,
    },

    /// Mismatched shapes between suite, tokens, and surprisal data.
    #[error("shape error: {0}")]
    Shape(String),

    /// An aligned token does not equal the observed token at that position.
    #[error("tokens {expected:?} and {found:?} do not match (token {position} of sentence {sentence})")]
    TokenMismatch {
        /// The token produced by region alignment.
        expected: String,

        /// The token found in the surprisal table.
        found: String,

        /// The 1-based sentence id.
        sentence: usize,

        /// The 0-based token position in the sentence.
        position: usize,
    },

    /// A token could not be matched against region content.
    #[error("token {token:?} at position {position} does not match region {region_number} content {content:?}")]
    Desync {
        /// The unmatched token.
        token: String,

        /// The 0-based token position.
        position: usize,

        /// The region which was current.
        region_number: u32,

        /// The unconsumed region content.
        content: String,
    },

    /// Alignment dropped or duplicated tokens.
    #[error("token conservation violated: {0}")]
    TokenConservation(String),

    /// An error occurred while processing one sentence.
    #[error("error while processing item {item_number}, condition {condition_name:?}: {source}")]
    Sentence {
        /// The item number.
        item_number: u32,

        /// The condition name.
        condition_name: String,

        /// The underlying error.
        #[source]
        source: Box<SyntaxGymError>,
    },

    /// A prediction formula could not be parsed.
    #[error("invalid formula expression {formula:?}: {reason}")]
    PredictionParse {
        /// The formula source.
        formula: String,

        /// What went wrong.
        reason: String,
    },

    /// A prediction has an unsupported `type`.
    #[error("unknown prediction type {0:?}")]
    UnknownPredictionType(String),

    /// A formula references a region with no aggregated value.
    #[error("no {metric} value for region {region_number} of condition {condition_name:?}")]
    MissingRegionValue {
        /// The referenced condition.
        condition_name: String,

        /// The referenced region.
        region_number: u32,

        /// The metric used for lookup.
        metric: String,
    },

    /// A formula references a condition the item does not have.
    #[error("item has no condition {0:?}")]
    MissingCondition(String),

    /// A regex pattern from a model spec failed to compile.
    #[error("invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        /// The pattern source.
        pattern: String,

        /// The compile error.
        #[source]
        source: PatternError,
    },

    /// The model spec is inconsistent.
    #[error("invalid model spec: {0}")]
    InvalidSpec(String),

    /// I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Tabular data error.
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl SyntaxGymError {
    /// Wrap an error with the item and condition it occurred in.
    pub fn in_sentence(
        self,
        item_number: u32,
        condition_name: &str,
    ) -> Self {
        Self::Sentence {
            item_number,
            condition_name: condition_name.to_string(),
            source: Box::new(self),
        }
    }
}

/// Result type for syntaxgym operations.
pub type SGResult<T> = core::result::Result<T, SyntaxGymError>;
