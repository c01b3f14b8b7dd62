//! # Token/Region Alignment
//!
//! Maps a model's token stream back onto the human-authored regions of a
//! sentence.
//!
//! [`RegionAligner`] is the heuristic engine: it walks tokens and region
//! text left to right, undoing casing, subword markers, dropped text and
//! Moses splitting, and re-synchronizes after UNK tokens by looking ahead
//! for the next recognizable token.
//!
//! [`align_by_offsets`] is the simple alternative for tokenizers which
//! report character offsets.

pub mod alignment_options;
pub mod diagnostics;
pub mod lookahead;
pub mod offset_aligner;
pub mod region_aligner;
pub mod region_alignment;
pub mod text_matching;

#[doc(inline)]
pub use alignment_options::{AlignmentOptions, DesyncPolicy};
#[doc(inline)]
pub use diagnostics::AlignmentDiagnostic;
#[doc(inline)]
pub use offset_aligner::align_by_offsets;
#[doc(inline)]
pub use region_aligner::RegionAligner;
#[doc(inline)]
pub use region_alignment::{Alignment, RegionAlignment};
