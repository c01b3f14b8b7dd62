//! # Model Spec

use std::{fs::File, io::BufReader, path::Path};

use serde::{Deserialize, Serialize};

use crate::{errors::SGResult, spec::TokenizerSpec};

/// Special vocabulary of a model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VocabularySpec {
    /// Tokens standing in for out-of-vocabulary text.
    #[serde(default)]
    pub unk_types: Vec<String>,

    /// Tokens the model prepends to every sentence.
    #[serde(default)]
    pub prefix_types: Vec<String>,

    /// Tokens the model appends to every sentence.
    #[serde(default)]
    pub suffix_types: Vec<String>,

    /// Tokens that carry no text, and are skipped.
    #[serde(default)]
    pub special_types: Vec<String>,

    /// The full vocabulary, when known.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<String>,
}

/// A model tokenization specification.
///
/// Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelSpec {
    /// The model name, recorded in the suite metadata after aggregation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// The special vocabulary.
    #[serde(default)]
    pub vocabulary: VocabularySpec,

    /// The tokenizer conventions.
    #[serde(default)]
    pub tokenizer: TokenizerSpec,
}

impl ModelSpec {
    /// Parse a spec from a JSON string.
    pub fn from_json_str(json: &str) -> SGResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a spec from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> SGResult<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Set the model name.
    pub fn with_name<S: Into<String>>(
        mut self,
        name: S,
    ) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the UNK types.
    pub fn with_unk_types<S: ToString>(
        mut self,
        types: &[S],
    ) -> Self {
        self.vocabulary.unk_types = types.iter().map(ToString::to_string).collect();
        self
    }

    /// Set the prefix types.
    pub fn with_prefix_types<S: ToString>(
        mut self,
        types: &[S],
    ) -> Self {
        self.vocabulary.prefix_types = types.iter().map(ToString::to_string).collect();
        self
    }

    /// Set the suffix types.
    pub fn with_suffix_types<S: ToString>(
        mut self,
        types: &[S],
    ) -> Self {
        self.vocabulary.suffix_types = types.iter().map(ToString::to_string).collect();
        self
    }

    /// Set the special types.
    pub fn with_special_types<S: ToString>(
        mut self,
        types: &[S],
    ) -> Self {
        self.vocabulary.special_types = types.iter().map(ToString::to_string).collect();
        self
    }

    /// Set the tokenizer spec.
    pub fn with_tokenizer(
        mut self,
        tokenizer: TokenizerSpec,
    ) -> Self {
        self.tokenizer = tokenizer;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{SentinelPosition, TokenizerBehavior, TokenizerKind};

    #[test]
    fn test_parse_full_spec() {
        let spec = ModelSpec::from_json_str(
            r#"{
                "name": "bert-base",
                "image": "ignored",
                "vocabulary": {
                    "unk_types": ["[UNK]"],
                    "prefix_types": ["[CLS]"],
                    "suffix_types": ["[SEP]"],
                    "special_types": []
                },
                "tokenizer": {
                    "type": "subword",
                    "cased": false,
                    "sentinel_position": "medial",
                    "sentinel_pattern": "^##",
                    "behaviors": ["moses", "something-new"]
                }
            }"#,
        )
        .unwrap();

        assert_eq!(spec.name.as_deref(), Some("bert-base"));
        assert_eq!(spec.vocabulary.unk_types, vec!["[UNK]"]);
        assert!(spec.vocabulary.items.is_empty());
        assert_eq!(spec.tokenizer.kind, TokenizerKind::Subword);
        assert!(!spec.tokenizer.cased);
        assert_eq!(spec.tokenizer.sentinel_position, Some(SentinelPosition::Medial));
        assert_eq!(
            spec.tokenizer.behaviors,
            vec![TokenizerBehavior::Moses, TokenizerBehavior::Other]
        );
    }

    #[test]
    fn test_defaults() {
        let spec = ModelSpec::from_json_str("{}").unwrap();
        assert_eq!(spec, ModelSpec::default());
        assert!(spec.tokenizer.cased);
        assert_eq!(spec.tokenizer.kind, TokenizerKind::Word);
    }

    #[test]
    fn test_builders() {
        let spec = ModelSpec::default()
            .with_name("gpt2")
            .with_unk_types(&["<unk>"])
            .with_suffix_types(&["<eos>"]);
        assert_eq!(spec.vocabulary.unk_types, vec!["<unk>".to_string()]);
        assert_eq!(spec.vocabulary.suffix_types, vec!["<eos>".to_string()]);
        assert!(spec.vocabulary.prefix_types.is_empty());
    }
}
