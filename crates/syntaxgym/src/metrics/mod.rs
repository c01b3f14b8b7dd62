//! # Region Metrics
//!
//! Per-region reductions of token surprisals.
//!
//! * [`Metric`] - the closed set of registered reductions.
//! * [`MetricSelection`] - the ``meta.metric`` field of a suite:
//!   ``"all"``, a single name, or a list of names.

pub mod metric;
pub mod metric_selection;

#[doc(inline)]
pub use metric::Metric;
#[doc(inline)]
pub use metric_selection::MetricSelection;
