//! # `syntaxgym` Targeted Syntactic Evaluation
//!
//! This library scores language models against hand-authored syntactic
//! test suites.
//!
//! A [`suite::Suite`] splits sentences into human-meaningful regions. Given
//! a model's tokens and per-token surprisals for every sentence, this crate:
//! * re-aligns the model's tokens with the regions ([`alignment`]);
//! * reduces token surprisals into per-region values ([`surprisals`], [`metrics`]);
//! * evaluates the suite's prediction formulas over those values ([`prediction`]).
//!
//! How a model tokenizes text is described by a [`spec::ModelSpec`].
//!
//! ## Crate Features
//!
#![doc = document_features::document_features!()]
//!
//! ## Example
//!
//! ```rust,ignore
//! use syntaxgym::spec::ModelSpec;
//! use syntaxgym::suite::Suite;
//! use syntaxgym::surprisals::{SurprisalTable, aggregate_surprisals};
//!
//! let suite = Suite::from_path("subordination.json")?;
//! let spec = ModelSpec::from_path("gpt2.spec.json")?;
//! let table = SurprisalTable::from_path("surprisals.tsv")?;
//!
//! let tokens = table.token_lists();
//! let out = aggregate_surprisals(&suite, &table, &tokens, &spec, &Default::default())?;
//! for result in out.suite.evaluate_predictions()? {
//!     println!("{} {} {}", result.prediction_id, result.item_number, result.result);
//! }
//! ```
#![warn(missing_docs, unused)]

pub mod alignment;
pub mod errors;
pub mod metrics;
pub mod patterns;
pub mod prediction;
pub mod spec;
pub mod suite;
pub mod surprisals;

#[doc(inline)]
pub use errors::{SGResult, SyntaxGymError};
