//! # Surprisal Table
//!
//! `sentence_id token_id token surprisal` rows, grouped by sentence in
//! document order. Sentence ids are 1-based. Tables are written with tabs,
//! and read with any mix of tabs and spaces.

use std::{
    fs::File,
    io::{Read, Write},
    ops::Range,
    path::Path,
};

use serde::{Deserialize, Serialize};

use crate::errors::{SGResult, SyntaxGymError};

/// One token's surprisal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurprisalRow {
    /// 1-based sentence id.
    pub sentence_id: usize,

    /// 0-based token position in the sentence.
    pub token_id: usize,

    /// The token.
    pub token: String,

    /// The token surprisal, in bits.
    pub surprisal: f64,
}

/// Surprisal rows, indexed by sentence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurprisalTable {
    rows: Vec<SurprisalRow>,
    sentences: Vec<Range<usize>>,
}

impl SurprisalTable {
    /// Build a table from rows.
    ///
    /// Rows must be grouped by sentence, with sentence ids `1, 2, 3, ...`.
    pub fn from_rows(rows: Vec<SurprisalRow>) -> SGResult<Self> {
        let mut sentences: Vec<Range<usize>> = Vec::new();
        for (idx, row) in rows.iter().enumerate() {
            let current = sentences.len();
            if row.sentence_id == current && current > 0 {
                if let Some(range) = sentences.last_mut() {
                    range.end = idx + 1;
                }
            } else if row.sentence_id == current + 1 {
                sentences.push(idx..idx + 1);
            } else {
                return Err(SyntaxGymError::Shape(format!(
                    "surprisal row {idx} has sentence_id {} after sentence {current}; \
                     rows must be grouped by consecutive 1-based sentence ids",
                    row.sentence_id
                )));
            }
        }
        Ok(Self { rows, sentences })
    }

    /// Build a table from per-sentence `(token, surprisal)` lists.
    pub fn from_sentences<S: ToString>(sentences: &[Vec<(S, f64)>]) -> SGResult<Self> {
        let rows = sentences
            .iter()
            .enumerate()
            .flat_map(|(s_idx, sentence)| {
                sentence
                    .iter()
                    .enumerate()
                    .map(move |(t_idx, (token, surprisal))| SurprisalRow {
                        sentence_id: s_idx + 1,
                        token_id: t_idx,
                        token: token.to_string(),
                        surprisal: *surprisal,
                    })
            })
            .collect();
        Self::from_rows(rows)
    }

    /// Read a table with a header row.
    ///
    /// Columns are separated by tabs or by runs of spaces; the two may be
    /// mixed within a row.
    pub fn from_reader<R: Read>(reader: R) -> SGResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .flexible(true)
            .quoting(false)
            .from_reader(reader);

        let headers = split_columns(reader.headers()?);
        let mut rows = Vec::new();
        for (idx, record) in reader.records().enumerate() {
            let record = split_columns(&record?);
            if record.is_empty() {
                continue;
            }
            if record.len() != headers.len() {
                return Err(SyntaxGymError::Shape(format!(
                    "surprisal row {} has {} columns, but the header has {}",
                    idx + 1,
                    record.len(),
                    headers.len()
                )));
            }
            rows.push(record.deserialize::<SurprisalRow>(Some(&headers))?);
        }
        Self::from_rows(rows)
    }

    /// Load a table from a TSV file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> SGResult<Self> {
        Self::from_reader(File::open(path)?)
    }

    /// Write the table as TSV, with a header row.
    pub fn to_writer<W: Write>(
        &self,
        writer: W,
    ) -> SGResult<()> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .quote_style(csv::QuoteStyle::Never)
            .from_writer(writer);
        for row in &self.rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// All rows, in order.
    pub fn rows(&self) -> &[SurprisalRow] {
        &self.rows
    }

    /// The number of sentences.
    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    /// The rows of the sentence at 0-based index `idx`.
    pub fn sentence(
        &self,
        idx: usize,
    ) -> &[SurprisalRow] {
        match self.sentences.get(idx) {
            Some(range) => &self.rows[range.clone()],
            None => &[],
        }
    }

    /// The token lists of every sentence.
    pub fn token_lists(&self) -> Vec<Vec<String>> {
        (0..self.sentence_count())
            .map(|idx| self.sentence(idx).iter().map(|r| r.token.clone()).collect())
            .collect()
    }
}

/// Re-split a tab-delimited record on every whitespace run.
fn split_columns(record: &csv::StringRecord) -> csv::StringRecord {
    record.iter().flat_map(str::split_whitespace).collect()
}
