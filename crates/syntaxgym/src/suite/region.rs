//! # Region

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    errors::{SGResult, SyntaxGymError},
    metrics::Metric,
};

/// One human-authored span of a test sentence.
///
/// Content never has leading/trailing whitespace, nor runs of whitespace;
/// this is checked on construction and on deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRegion")]
pub struct Region {
    /// Position of the region in its sentence; unique per condition.
    pub region_number: u32,

    content: String,

    /// Aggregated surprisal values, by metric.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric_value: Option<BTreeMap<Metric, f64>>,

    /// Out-of-vocabulary words attributed to this region.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oovs: Option<Vec<String>>,
}

#[derive(Deserialize)]
struct RawRegion {
    region_number: u32,

    #[serde(default)]
    content: String,

    #[serde(default)]
    metric_value: Option<BTreeMap<Metric, f64>>,

    #[serde(default)]
    oovs: Option<Vec<String>>,
}

impl TryFrom<RawRegion> for Region {
    type Error = SyntaxGymError;

    fn try_from(raw: RawRegion) -> SGResult<Self> {
        let mut region = Region::new(raw.region_number, raw.content)?;
        region.metric_value = raw.metric_value;
        region.oovs = raw.oovs;
        Ok(region)
    }
}

/// Check region content spacing.
pub fn validate_content(content: &str) -> SGResult<()> {
    let reason = if content.starts_with(char::is_whitespace) || content.ends_with(char::is_whitespace)
    {
        Some("has leading and/or trailing space")
    } else if content
        .chars()
        .zip(content.chars().skip(1))
        .any(|(a, b)| a.is_whitespace() && b.is_whitespace())
    {
        Some("has multiple consecutive spaces")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(SyntaxGymError::RegionSpacing {
            content: content.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

impl Region {
    /// Create a new region.
    ///
    /// ## Arguments
    /// * `region_number` - The region number.
    /// * `content` - The region text.
    ///
    /// ## Returns
    /// The region, or `RegionSpacing` if the content is badly spaced.
    pub fn new<S: Into<String>>(
        region_number: u32,
        content: S,
    ) -> SGResult<Self> {
        let content = content.into();
        validate_content(&content)?;
        Ok(Self {
            region_number,
            content,
            metric_value: None,
            oovs: None,
        })
    }

    /// Get the region text.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Is the region text empty?
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Look up an aggregated value.
    pub fn value(
        &self,
        metric: Metric,
    ) -> Option<f64> {
        self.metric_value
            .as_ref()
            .and_then(|values| values.get(&metric).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_spaces_rejected() {
        for content in ["test ", " test", " ", "two  spaces", "tab\t\tspaces", "a \tb"] {
            match Region::new(1, content) {
                Err(SyntaxGymError::RegionSpacing { content: c, .. }) => assert_eq!(c, content),
                other => panic!("{content:?}: {other:?}"),
            }
        }
    }

    #[test]
    fn test_region_ok() {
        let region = Region::new(2, "who a friend had helped").unwrap();
        assert_eq!(region.content(), "who a friend had helped");
        assert!(!region.is_empty());
        assert!(Region::new(3, "").unwrap().is_empty());
        assert_eq!(region.value(Metric::Sum), None);
    }

    #[test]
    fn test_deserialize_validates() {
        let region: Region = serde_json::from_str(
            r#"{"region_number": 1, "content": "After the man", "metric_value": {"sum": 18.5}}"#,
        )
        .unwrap();
        assert_eq!(region.value(Metric::Sum), Some(18.5));
        assert_eq!(region.oovs, None);

        let err = serde_json::from_str::<Region>(r#"{"region_number": 1, "content": "bad "}"#)
            .unwrap_err();
        assert!(err.to_string().contains("leading and/or trailing"), "{err}");
    }

    #[test]
    fn test_serialize_skips_unset() {
        let mut region = Region::new(4, "shot the bird").unwrap();
        assert_eq!(
            serde_json::to_string(&region).unwrap(),
            r#"{"region_number":4,"content":"shot the bird"}"#
        );

        region.oovs = Some(vec![]);
        region.metric_value = Some([(Metric::Sum, 1.5)].into_iter().collect());
        assert_eq!(
            serde_json::to_string(&region).unwrap(),
            r#"{"region_number":4,"content":"shot the bird","metric_value":{"sum":1.5},"oovs":[]}"#
        );
    }
}
