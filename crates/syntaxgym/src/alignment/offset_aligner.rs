//! # Offset Alignment
//!
//! Alignment for tokenizers which report the character offset of every
//! token in the sentence text.

use crate::{
    alignment::{Alignment, RegionAlignment},
    errors::{SGResult, SyntaxGymError},
    suite::Sentence,
};

/// Assign tokens to regions by their start offsets.
///
/// A token belongs to the last region whose left edge is at or before the
/// token's start (see [`Sentence::region_edges`]). No OOVs are reported.
///
/// ## Arguments
/// * `sentence` - The sentence the tokens were produced from.
/// * `tokens` - The token stream.
/// * `offsets` - The character start offset of each token.
pub fn align_by_offsets<S: AsRef<str>>(
    sentence: &Sentence<'_>,
    tokens: &[S],
    offsets: &[usize],
) -> SGResult<Alignment> {
    if tokens.len() != offsets.len() {
        return Err(SyntaxGymError::Shape(format!(
            "{} tokens but {} offsets",
            tokens.len(),
            offsets.len()
        )));
    }

    let edges = sentence.region_edges();
    let mut regions: Vec<RegionAlignment> = sentence
        .regions()
        .iter()
        .map(|r| RegionAlignment::new(r.region_number))
        .collect();
    if regions.is_empty() && !tokens.is_empty() {
        return Err(SyntaxGymError::Shape(format!(
            "no regions to align {} tokens with",
            tokens.len()
        )));
    }

    let mut cursor = 0;
    for (token, &start) in tokens.iter().zip(offsets) {
        while cursor + 1 < edges.len() && start >= edges[cursor + 1] {
            cursor += 1;
        }
        regions[cursor].tokens.push(token.as_ref().to_string());
    }

    let alignment = Alignment::new(regions, vec![], vec![]);
    alignment.check_conservation(tokens)?;
    Ok(alignment)
}
