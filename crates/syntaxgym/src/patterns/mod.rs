//! # Spec Patterns
//!
//! Model specs carry regexes (dropped tokens, subword sentinels) written
//! for whatever engine the model's tokenizer used; some need lookaround.
//!
//! A [`SpecPattern`] records which dialect its source was written for.
//! Patterns of unknown dialect compile with [`regex`] when they can and
//! fall back to [`fancy_regex`] otherwise. Either way the result is a
//! [`CompiledPattern`], which exposes the two queries alignment needs.

mod compiled_pattern;
mod spec_pattern;

#[doc(inline)]
pub use compiled_pattern::{CompiledPattern, PatternError};
#[doc(inline)]
pub use spec_pattern::{RegexDialect, SpecPattern};
