//! # Region Table
//!
//! A flat, tab-separated view of a suite with one row per region.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::errors::SGResult;

/// One region of one sentence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionRow {
    /// The item number.
    pub item_number: u32,

    /// The condition name.
    pub condition_name: String,

    /// The region number.
    pub region_number: u32,

    /// The region text.
    pub content: String,

    /// The reported metric value; empty when unset.
    pub metric_value: Option<f64>,

    /// Comma-joined OOV words.
    pub oovs: String,
}

/// Write region rows as TSV, with a header.
pub fn write_region_table<W: Write>(
    rows: &[RegionRow],
    writer: W,
) -> SGResult<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_writer(writer);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
