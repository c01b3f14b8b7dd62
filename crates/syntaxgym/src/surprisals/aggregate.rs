//! # Surprisal Aggregation
//!
//! Aligns every sentence of a suite with its token stream, then reduces
//! each region's token surprisals into the suite's requested metrics.
//!
//! Sentences are indexed positionally in document order (items, then
//! conditions); token lists and surprisal-table sentences must follow the
//! same order.

use core::fmt;
use std::collections::{BTreeMap, HashSet};

use crate::{
    alignment::{Alignment, AlignmentDiagnostic, AlignmentOptions, RegionAligner, align_by_offsets},
    errors::{SGResult, SyntaxGymError},
    metrics::Metric,
    spec::ModelSpec,
    suite::{Region, Sentence, Suite},
    surprisals::{SurprisalRow, SurprisalTable},
};

/// Options for [`aggregate_surprisals`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregateOptions {
    /// Options for the alignment step.
    pub alignment: AlignmentOptions,

    /// Align sentences in parallel.
    ///
    /// Only has an effect with the `rayon` feature.
    pub parallel: bool,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            alignment: AlignmentOptions::default(),
            parallel: true,
        }
    }
}

impl AggregateOptions {
    /// Set the alignment options.
    pub fn with_alignment(
        mut self,
        alignment: AlignmentOptions,
    ) -> Self {
        self.alignment = alignment;
        self
    }

    /// Set whether to align in parallel.
    pub fn with_parallel(
        mut self,
        parallel: bool,
    ) -> Self {
        self.parallel = parallel;
        self
    }
}

/// An alignment diagnostic, with the sentence it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceDiagnostic {
    /// The item number.
    pub item_number: u32,

    /// The condition name.
    pub condition_name: String,

    /// The diagnostic.
    pub diagnostic: AlignmentDiagnostic,
}

impl fmt::Display for SentenceDiagnostic {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(
            f,
            "item {}, condition {:?}: {}",
            self.item_number, self.condition_name, self.diagnostic
        )
    }
}

/// The result of [`aggregate_surprisals`].
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateOutput {
    /// A copy of the input suite with `metric_value` and `oovs` filled in.
    pub suite: Suite,

    /// Every alignment diagnostic, in document order.
    pub diagnostics: Vec<SentenceDiagnostic>,
}

/// Aggregate token surprisals into region values.
///
/// The input suite and table are not modified.
///
/// ## Arguments
/// * `suite` - The test suite.
/// * `table` - Surprisals, one table sentence per suite sentence.
/// * `tokens` - Token streams, one per suite sentence.
/// * `spec` - The model's tokenization spec.
/// * `options` - Aggregation options.
///
/// ## Returns
/// The augmented suite copy and all diagnostics; or the first error.
pub fn aggregate_surprisals<S: AsRef<str> + Sync>(
    suite: &Suite,
    table: &SurprisalTable,
    tokens: &[Vec<S>],
    spec: &ModelSpec,
    options: &AggregateOptions,
) -> SGResult<AggregateOutput> {
    let aligner = RegionAligner::new(spec)?.with_options(options.alignment);
    aggregate_with(
        suite,
        table,
        tokens,
        spec,
        &SentenceAligner::Heuristic(aligner),
        options,
    )
}

/// Aggregate token surprisals, placing tokens by their character offsets.
///
/// For tokenizers which report where each token starts in the sentence
/// text (see [`align_by_offsets`]). The spec's tokenization conventions are
/// not consulted; only its name is recorded.
///
/// ## Arguments
/// * `offsets` - The character start offset of every token, one list per
///   suite sentence.
pub fn aggregate_surprisals_by_offsets<S: AsRef<str> + Sync>(
    suite: &Suite,
    table: &SurprisalTable,
    tokens: &[Vec<S>],
    offsets: &[Vec<usize>],
    spec: &ModelSpec,
    options: &AggregateOptions,
) -> SGResult<AggregateOutput> {
    let count = suite.sentence_count();
    if offsets.len() != count {
        return Err(SyntaxGymError::Shape(format!(
            "suite has {count} sentences, but {} offset lists were given",
            offsets.len()
        )));
    }
    aggregate_with(
        suite,
        table,
        tokens,
        spec,
        &SentenceAligner::Offsets(offsets),
        options,
    )
}

/// How sentences are aligned.
enum SentenceAligner<'a> {
    Heuristic(RegionAligner),
    Offsets(&'a [Vec<usize>]),
}

impl SentenceAligner<'_> {
    fn align<S: AsRef<str>>(
        &self,
        idx: usize,
        sentence: &Sentence<'_>,
        tokens: &[S],
    ) -> SGResult<Alignment> {
        match self {
            Self::Heuristic(aligner) => aligner.align_sentence(sentence, tokens),
            Self::Offsets(offsets) => align_by_offsets(sentence, tokens, &offsets[idx])
                .map_err(|e| e.in_sentence(sentence.item_number(), sentence.condition_name())),
        }
    }
}

fn aggregate_with<S: AsRef<str> + Sync>(
    suite: &Suite,
    table: &SurprisalTable,
    tokens: &[Vec<S>],
    spec: &ModelSpec,
    aligner: &SentenceAligner<'_>,
    options: &AggregateOptions,
) -> SGResult<AggregateOutput> {
    let metrics = suite.meta.metric.metrics();
    check_shapes(suite, table, tokens)?;

    let sentences: Vec<Sentence<'_>> = suite.sentences().collect();
    let alignments = align_all(aligner, &sentences, tokens, options.parallel)?;

    let mut diagnostics = Vec::new();
    for (sentence, alignment) in sentences.iter().zip(&alignments) {
        for diagnostic in alignment.diagnostics() {
            let diagnostic = SentenceDiagnostic {
                item_number: sentence.item_number(),
                condition_name: sentence.condition_name().to_string(),
                diagnostic: diagnostic.clone(),
            };
            log::warn!("{diagnostic}");
            diagnostics.push(diagnostic);
        }
    }

    let mut out = suite.clone();
    let conditions = out.items.iter_mut().flat_map(|item| item.conditions.iter_mut());
    for (idx, (condition, alignment)) in conditions.zip(&alignments).enumerate() {
        let values = region_surprisals(idx, alignment, table.sentence(idx))?;
        for (region, values) in condition.regions.iter_mut().zip(values) {
            fill_region(region, &metrics, &values);
        }
        let oovs = alignment.regions().iter().map(|r| r.oovs.clone());
        for (region, oovs) in condition.regions.iter_mut().zip(oovs) {
            region.oovs = Some(oovs);
        }
    }

    if let Some(name) = &spec.name {
        out.meta.model = Some(name.clone());
    }

    log::info!(
        "aggregated {} sentences of suite {:?} ({} diagnostics)",
        sentences.len(),
        suite.meta.name,
        diagnostics.len()
    );

    Ok(AggregateOutput {
        suite: out,
        diagnostics,
    })
}

fn check_shapes<S: AsRef<str>>(
    suite: &Suite,
    table: &SurprisalTable,
    tokens: &[Vec<S>],
) -> SGResult<()> {
    let count = suite.sentence_count();
    if tokens.len() != count {
        return Err(SyntaxGymError::Shape(format!(
            "suite has {count} sentences, but {} token lists were given",
            tokens.len()
        )));
    }
    if table.sentence_count() != count {
        return Err(SyntaxGymError::Shape(format!(
            "suite has {count} sentences, but the surprisal table has {}",
            table.sentence_count()
        )));
    }
    for (idx, sentence_tokens) in tokens.iter().enumerate() {
        let rows = table.sentence(idx).len();
        if sentence_tokens.len() != rows {
            return Err(SyntaxGymError::Shape(format!(
                "sentence {} has {} tokens, but {rows} surprisal rows",
                idx + 1,
                sentence_tokens.len()
            )));
        }
    }
    Ok(())
}

fn align_all<S: AsRef<str> + Sync>(
    aligner: &SentenceAligner<'_>,
    sentences: &[Sentence<'_>],
    tokens: &[Vec<S>],
    parallel: bool,
) -> SGResult<Vec<Alignment>> {
    #[cfg(feature = "rayon")]
    if parallel {
        use rayon::prelude::*;

        return sentences
            .par_iter()
            .zip(tokens.par_iter())
            .enumerate()
            .map(|(idx, (sentence, tokens))| aligner.align(idx, sentence, tokens))
            .collect();
    }
    #[cfg(not(feature = "rayon"))]
    let _ = parallel;

    sentences
        .iter()
        .zip(tokens)
        .enumerate()
        .map(|(idx, (sentence, tokens))| aligner.align(idx, sentence, tokens))
        .collect()
}

/// Pair each region's tokens with surprisal rows, in strict stream order.
///
/// Special-token positions are skipped.
fn region_surprisals(
    sentence_idx: usize,
    alignment: &Alignment,
    rows: &[SurprisalRow],
) -> SGResult<Vec<Vec<f64>>> {
    let specials: HashSet<usize> = alignment.special_positions().iter().copied().collect();
    let mut position = 0;
    let mut out = Vec::with_capacity(alignment.regions().len());

    for region in alignment.regions() {
        let mut values = Vec::with_capacity(region.tokens.len());
        for token in &region.tokens {
            while specials.contains(&position) {
                position += 1;
            }
            let row = rows.get(position).ok_or_else(|| {
                SyntaxGymError::Shape(format!(
                    "sentence {} has no surprisal row for token {position}",
                    sentence_idx + 1
                ))
            })?;
            if row.token != *token {
                return Err(SyntaxGymError::TokenMismatch {
                    expected: token.clone(),
                    found: row.token.clone(),
                    sentence: sentence_idx + 1,
                    position,
                });
            }
            values.push(row.surprisal);
            position += 1;
        }
        out.push(values);
    }
    Ok(out)
}

fn fill_region(
    region: &mut Region,
    metrics: &[Metric],
    values: &[f64],
) {
    let metric_value: BTreeMap<Metric, f64> = metrics
        .iter()
        .filter_map(|metric| metric.reduce(values).map(|v| (*metric, v)))
        .collect();
    region.metric_value = Some(metric_value);
}
