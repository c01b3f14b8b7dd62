//! # Model Specifications
//!
//! A [`ModelSpec`] describes how a model tokenizes text: its special
//! vocabulary, and the tokenizer conventions alignment must undo.

pub mod model_spec;
pub mod tokenizer_spec;

#[doc(inline)]
pub use model_spec::{ModelSpec, VocabularySpec};
#[doc(inline)]
pub use tokenizer_spec::{SentinelPosition, TokenizerBehavior, TokenizerKind, TokenizerSpec};
