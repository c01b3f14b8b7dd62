//! # Suite Document
//!
//! The JSON test suite document, and the derived views over it.

use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
};

use serde::{Deserialize, Serialize};

use crate::{
    errors::SGResult,
    metrics::{Metric, MetricSelection},
    prediction::{Prediction, PredictionResult},
    suite::{Item, RegionRow, Sentence},
};

/// Suite metadata.
///
/// Annotations other than `name`, `metric` and `model` are kept verbatim
/// in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuiteMeta {
    /// The suite name.
    pub name: String,

    /// The metrics requested for aggregation.
    #[serde(default)]
    pub metric: MetricSelection,

    /// The model whose surprisals filled in this suite, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Free-form annotations (`comment`, `reference`, `author`, ...).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl SuiteMeta {
    /// Create metadata with the default metric selection.
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            metric: MetricSelection::default(),
            model: None,
            extra: Default::default(),
        }
    }

    /// Set the metric selection.
    pub fn with_metric(
        mut self,
        metric: MetricSelection,
    ) -> Self {
        self.metric = metric;
        self
    }
}

/// A test suite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suite {
    /// Suite metadata.
    pub meta: SuiteMeta,

    /// Display names of regions, by region number.
    #[serde(default)]
    pub region_meta: BTreeMap<u32, String>,

    /// Prediction formulas; the prediction id is the index in this list.
    #[serde(default)]
    pub predictions: Vec<Prediction>,

    /// The items.
    pub items: Vec<Item>,
}

impl Suite {
    /// Parse a suite from a JSON string.
    pub fn from_json_str(json: &str) -> SGResult<Self> {
        let suite: Self = serde_json::from_str(json)?;
        suite.check_predictions()?;
        Ok(suite)
    }

    /// Parse a suite from a JSON reader.
    pub fn from_reader<R: Read>(reader: R) -> SGResult<Self> {
        let suite: Self = serde_json::from_reader(reader)?;
        suite.check_predictions()?;
        Ok(suite)
    }

    /// Check that every item has the conditions each prediction references.
    pub fn check_predictions(&self) -> SGResult<()> {
        for prediction in &self.predictions {
            for item in &self.items {
                prediction.check_conditions(item)?;
            }
        }
        Ok(())
    }

    /// Load a suite from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> SGResult<Self> {
        let reader = BufReader::new(File::open(path)?);
        Self::from_reader(reader)
    }

    /// Render the suite as pretty-printed JSON.
    pub fn to_json_string(&self) -> SGResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the suite as pretty-printed JSON.
    pub fn to_writer<W: Write>(
        &self,
        writer: W,
    ) -> SGResult<()> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Save the suite to a JSON file.
    pub fn save<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> SGResult<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.to_writer(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Condition names, in the order of the first item.
    pub fn condition_names(&self) -> Vec<&str> {
        self.items
            .first()
            .map(|item| {
                item.conditions
                    .iter()
                    .map(|c| c.condition_name.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Region display names, ordered by region number.
    pub fn region_names(&self) -> Vec<&str> {
        self.region_meta.values().map(String::as_str).collect()
    }

    /// Iterate all sentences: items, then conditions, in document order.
    ///
    /// Token and surprisal streams are indexed positionally in this order.
    pub fn sentences(&self) -> impl Iterator<Item = Sentence<'_>> {
        self.items.iter().flat_map(Item::sentences)
    }

    /// The number of sentences in the suite.
    pub fn sentence_count(&self) -> usize {
        self.items.iter().map(|item| item.conditions.len()).sum()
    }

    /// The text of every sentence, in document order.
    pub fn sentence_texts(&self) -> Vec<String> {
        self.sentences().map(|s| s.text()).collect()
    }

    /// Character left edges of every sentence's regions.
    pub fn region_edges(&self) -> Vec<Vec<usize>> {
        self.sentences().map(|s| s.region_edges()).collect()
    }

    /// Evaluate every prediction against every item.
    ///
    /// ## Returns
    /// One row per (prediction, item), prediction-major.
    pub fn evaluate_predictions(&self) -> SGResult<Vec<PredictionResult>> {
        let mut results = Vec::with_capacity(self.predictions.len() * self.items.len());
        for (prediction_id, prediction) in self.predictions.iter().enumerate() {
            for item in &self.items {
                results.push(PredictionResult {
                    suite: self.meta.name.clone(),
                    prediction_id,
                    item_number: item.item_number,
                    result: prediction.evaluate(item)?,
                });
            }
        }
        Ok(results)
    }

    /// Flatten the suite into one row per region.
    ///
    /// ## Arguments
    /// * `metric` - The metric to report; defaults to the primary selected metric.
    pub fn region_rows(
        &self,
        metric: Option<Metric>,
    ) -> Vec<RegionRow> {
        let metric = metric.unwrap_or_else(|| self.meta.metric.primary());
        self.sentences()
            .flat_map(|sentence| {
                sentence.regions().iter().map(move |region| RegionRow {
                    item_number: sentence.item_number(),
                    condition_name: sentence.condition_name().to_string(),
                    region_number: region.region_number,
                    content: region.content().to_string(),
                    metric_value: region.value(metric),
                    oovs: region
                        .oovs
                        .as_ref()
                        .map(|oovs| oovs.join(","))
                        .unwrap_or_default(),
                })
            })
            .collect()
    }
}
