//! # Metric Selection

use serde::{Deserialize, Serialize};

use crate::{
    errors::{SGResult, SyntaxGymError},
    metrics::Metric,
};

const ALL_METRICS: &str = "all";

/// The metrics a suite requests.
///
/// Names are validated when the suite is parsed, not when values are
/// computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawMetricSelection", into = "RawMetricSelection")]
pub enum MetricSelection {
    /// Every registered metric.
    All,

    /// A single metric, written as a bare string.
    One(Metric),

    /// A list of metrics.
    Many(Vec<Metric>),
}

impl Default for MetricSelection {
    fn default() -> Self {
        Self::One(Metric::Sum)
    }
}

impl MetricSelection {
    /// The selected metrics, in request order.
    pub fn metrics(&self) -> Vec<Metric> {
        match self {
            Self::All => Metric::all(),
            Self::One(metric) => vec![*metric],
            Self::Many(metrics) => metrics.clone(),
        }
    }

    /// The metric used when a single value per region is needed.
    ///
    /// This is the first selected metric.
    pub fn primary(&self) -> Metric {
        match self {
            Self::All => Metric::Sum,
            Self::One(metric) => *metric,
            Self::Many(metrics) => metrics.first().copied().unwrap_or(Metric::Sum),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawMetricSelection {
    One(String),
    Many(Vec<String>),
}

impl TryFrom<RawMetricSelection> for MetricSelection {
    type Error = SyntaxGymError;

    fn try_from(raw: RawMetricSelection) -> SGResult<Self> {
        match raw {
            RawMetricSelection::One(name) if name == ALL_METRICS => Ok(Self::All),
            RawMetricSelection::One(name) => {
                let mut metrics = Metric::parse_names(&[name])?;
                Ok(Self::One(metrics.remove(0)))
            }
            RawMetricSelection::Many(names) => Ok(Self::Many(Metric::parse_names(&names)?)),
        }
    }
}

impl From<MetricSelection> for RawMetricSelection {
    fn from(selection: MetricSelection) -> Self {
        match selection {
            MetricSelection::All => Self::One(ALL_METRICS.to_string()),
            MetricSelection::One(metric) => Self::One(metric.to_string()),
            MetricSelection::Many(metrics) => {
                Self::Many(metrics.iter().map(|m| m.to_string()).collect())
            }
        }
    }
}
