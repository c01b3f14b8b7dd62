//! # Prediction Results

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::errors::SGResult;

/// The outcome of one prediction on one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// The suite name.
    pub suite: String,

    /// The prediction's index in the suite.
    pub prediction_id: usize,

    /// The item number.
    pub item_number: u32,

    /// Did the prediction hold?
    pub result: bool,
}

/// Write results as TSV, with a header row.
pub fn write_prediction_results<W: Write>(
    results: &[PredictionResult],
    writer: W,
) -> SGResult<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_writer(writer);
    for result in results {
        writer.serialize(result)?;
    }
    writer.flush()?;
    Ok(())
}

/// The fraction of results which hold, or `None` for no results.
pub fn accuracy(results: &[PredictionResult]) -> Option<f64> {
    if results.is_empty() {
        return None;
    }
    let passed = results.iter().filter(|r| r.result).count();
    Some(passed as f64 / results.len() as f64)
}
