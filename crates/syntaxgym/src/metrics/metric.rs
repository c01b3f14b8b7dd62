//! # Metric

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::errors::{SGResult, SyntaxGymError};

/// A registered reduction over a region's token surprisals.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::EnumString,
    strum_macros::EnumIter,
    strum_macros::Display,
    strum_macros::IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Metric {
    /// Total surprisal.
    Sum,

    /// Arithmetic mean.
    Mean,

    /// Median; the mean of the middle pair for even counts.
    Median,

    /// `max - min`.
    Range,

    /// Largest surprisal.
    Max,

    /// Smallest surprisal.
    Min,
}

impl Metric {
    /// All registered metrics, in declaration order.
    pub fn all() -> Vec<Metric> {
        Metric::iter().collect()
    }

    /// Get the metric name.
    pub fn name(&self) -> &'static str {
        self.into()
    }

    /// Parse a list of metric names.
    ///
    /// Every unknown name is reported, not just the first.
    pub fn parse_names<S: AsRef<str>>(names: &[S]) -> SGResult<Vec<Metric>> {
        let mut metrics = Vec::with_capacity(names.len());
        let mut unknown = Vec::new();
        for name in names {
            match name.as_ref().parse::<Metric>() {
                Ok(metric) => metrics.push(metric),
                Err(_) => unknown.push(name.as_ref().to_string()),
            }
        }
        if !unknown.is_empty() {
            return Err(SyntaxGymError::UnknownMetric { names: unknown });
        }
        Ok(metrics)
    }

    /// Reduce a region's surprisal values.
    ///
    /// ## Returns
    /// `None` for an empty region, except for `Sum`, which is `0.0`.
    pub fn reduce(
        &self,
        values: &[f64],
    ) -> Option<f64> {
        if values.is_empty() {
            return match self {
                Self::Sum => Some(0.0),
                _ => None,
            };
        }

        let max = || values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = || values.iter().copied().fold(f64::INFINITY, f64::min);

        Some(match self {
            Self::Sum => values.iter().sum(),
            Self::Mean => values.iter().sum::<f64>() / values.len() as f64,
            Self::Median => {
                let mut sorted = values.to_vec();
                sorted.sort_by(f64::total_cmp);
                let mid = sorted.len() / 2;
                if sorted.len() % 2 == 0 {
                    (sorted[mid - 1] + sorted[mid]) / 2.0
                } else {
                    sorted[mid]
                }
            }
            Self::Range => max() - min(),
            Self::Max => max(),
            Self::Min => min(),
        })
    }
}
