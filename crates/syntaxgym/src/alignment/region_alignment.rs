//! # Alignment Results

use std::collections::{BTreeMap, BTreeSet};

use crate::{
    alignment::AlignmentDiagnostic,
    errors::{SGResult, SyntaxGymError},
};

/// The tokens and OOV words assigned to one region.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionAlignment {
    /// The region number.
    pub region_number: u32,

    /// Assigned tokens, in stream order.
    pub tokens: Vec<String>,

    /// Region words which the model saw as UNK.
    pub oovs: Vec<String>,
}

impl RegionAlignment {
    /// Create an empty region alignment.
    pub fn new(region_number: u32) -> Self {
        Self {
            region_number,
            ..Default::default()
        }
    }
}

/// The alignment of one sentence's token stream with its regions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Alignment {
    regions: Vec<RegionAlignment>,
    special_positions: Vec<usize>,
    diagnostics: Vec<AlignmentDiagnostic>,
}

impl Alignment {
    /// Assemble an alignment.
    pub fn new(
        regions: Vec<RegionAlignment>,
        special_positions: Vec<usize>,
        diagnostics: Vec<AlignmentDiagnostic>,
    ) -> Self {
        Self {
            regions,
            special_positions,
            diagnostics,
        }
    }

    /// Per-region results, in sentence order.
    pub fn regions(&self) -> &[RegionAlignment] {
        &self.regions
    }

    /// Stream positions of special tokens, which belong to no region.
    pub fn special_positions(&self) -> &[usize] {
        &self.special_positions
    }

    /// Diagnostics, in the order they were recorded.
    pub fn diagnostics(&self) -> &[AlignmentDiagnostic] {
        &self.diagnostics
    }

    /// Tokens by region number; every region is present.
    pub fn region_tokens(&self) -> BTreeMap<u32, Vec<String>> {
        self.regions
            .iter()
            .map(|r| (r.region_number, r.tokens.clone()))
            .collect()
    }

    /// OOV words by region number; only regions with OOVs are present.
    pub fn oovs(&self) -> BTreeMap<u32, Vec<String>> {
        self.regions
            .iter()
            .filter(|r| !r.oovs.is_empty())
            .map(|r| (r.region_number, r.oovs.clone()))
            .collect()
    }

    /// Check that this alignment reproduces `tokens` exactly.
    ///
    /// Region token lists in order, with special tokens at their skipped
    /// positions, must equal the stream.
    pub fn check_conservation<S: AsRef<str>>(
        &self,
        tokens: &[S],
    ) -> SGResult<()> {
        let specials: BTreeSet<usize> = self.special_positions.iter().copied().collect();
        let mut aligned = self.regions.iter().flat_map(|r| r.tokens.iter());

        for (position, token) in tokens.iter().enumerate() {
            let token = token.as_ref();
            if specials.contains(&position) {
                continue;
            }
            match aligned.next() {
                Some(a) if a == token => {}
                Some(a) => {
                    return Err(SyntaxGymError::TokenConservation(format!(
                        "token {position} is {token:?}, but alignment has {a:?}"
                    )));
                }
                None => {
                    return Err(SyntaxGymError::TokenConservation(format!(
                        "token {position} ({token:?}) was not assigned to any region"
                    )));
                }
            }
        }
        if let Some(extra) = aligned.next() {
            return Err(SyntaxGymError::TokenConservation(format!(
                "alignment has {extra:?} past the end of the token stream"
            )));
        }
        if let Some(&pos) = specials.range(tokens.len()..).next() {
            return Err(SyntaxGymError::TokenConservation(format!(
                "special position {pos} is past the end of the token stream"
            )));
        }
        Ok(())
    }
}
