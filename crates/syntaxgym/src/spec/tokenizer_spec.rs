//! # Tokenizer Spec

use serde::{Deserialize, Serialize};

/// The tokenizer granularity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenizerKind {
    /// Whole words.
    #[default]
    Word,

    /// Word pieces.
    Subword,

    /// Single characters.
    Character,
}

/// Where a sentinel marker appears in a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentinelPosition {
    /// Marks word-initial pieces, e.g. `▁word`.
    Initial,

    /// Marks word-internal pieces, e.g. `##ing`.
    Medial,

    /// Marks word-final pieces, e.g. `word</w>`.
    Final,
}

/// Extra tokenizer behaviors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenizerBehavior {
    /// Moses-style split markers: `@-@` stands for `-`.
    Moses,

    /// A behavior this library does not handle.
    #[serde(other)]
    Other,
}

fn default_cased() -> bool {
    true
}

/// Tokenizer conventions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenizerSpec {
    /// Are tokens case-sensitive?
    #[serde(default = "default_cased")]
    pub cased: bool,

    /// The tokenizer granularity.
    #[serde(rename = "type", default)]
    pub kind: TokenizerKind,

    /// Text the tokenizer drops; matched at fragment starts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drop_token_pattern: Option<String>,

    /// Subword sentinel marker pattern.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentinel_pattern: Option<String>,

    /// Where `sentinel_pattern` applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentinel_position: Option<SentinelPosition>,

    /// Literal word-boundary marker prefix, e.g. `Ġ` or `▁`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metaspace: Option<String>,

    /// Extra behaviors.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub behaviors: Vec<TokenizerBehavior>,
}

impl Default for TokenizerSpec {
    fn default() -> Self {
        Self {
            cased: true,
            kind: TokenizerKind::Word,
            drop_token_pattern: None,
            sentinel_pattern: None,
            sentinel_position: None,
            metaspace: None,
            behaviors: Vec::new(),
        }
    }
}

impl TokenizerSpec {
    /// Set case sensitivity.
    pub fn with_cased(
        mut self,
        cased: bool,
    ) -> Self {
        self.cased = cased;
        self
    }

    /// Set the tokenizer granularity.
    pub fn with_kind(
        mut self,
        kind: TokenizerKind,
    ) -> Self {
        self.kind = kind;
        self
    }

    /// Set the drop pattern.
    pub fn with_drop_token_pattern<S: Into<String>>(
        mut self,
        pattern: S,
    ) -> Self {
        self.drop_token_pattern = Some(pattern.into());
        self
    }

    /// Set the sentinel pattern and its position.
    pub fn with_sentinel<S: Into<String>>(
        mut self,
        pattern: S,
        position: SentinelPosition,
    ) -> Self {
        self.sentinel_pattern = Some(pattern.into());
        self.sentinel_position = Some(position);
        self
    }

    /// Set the metaspace marker.
    pub fn with_metaspace<S: Into<String>>(
        mut self,
        metaspace: S,
    ) -> Self {
        self.metaspace = Some(metaspace.into());
        self
    }

    /// Add a behavior.
    pub fn with_behavior(
        mut self,
        behavior: TokenizerBehavior,
    ) -> Self {
        self.behaviors.push(behavior);
        self
    }

    /// Is Moses marker handling enabled?
    pub fn is_moses(&self) -> bool {
        self.behaviors.contains(&TokenizerBehavior::Moses)
    }
}
