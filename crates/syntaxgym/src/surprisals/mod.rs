//! # Surprisals
//!
//! Per-token surprisal data, and its aggregation into region values.

pub mod aggregate;
pub mod surprisal_table;

#[doc(inline)]
pub use aggregate::{
    AggregateOptions,
    AggregateOutput,
    SentenceDiagnostic,
    aggregate_surprisals,
    aggregate_surprisals_by_offsets,
};
#[doc(inline)]
pub use surprisal_table::{SurprisalRow, SurprisalTable};
