//! # Alignment Diagnostics

use core::fmt;

/// A non-fatal event recorded while aligning one sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlignmentDiagnostic {
    /// Region text was attributed to UNK tokens.
    OovSpan {
        /// The region receiving the OOV words.
        region_number: u32,

        /// Position of the first UNK token.
        position: usize,

        /// The OOV text.
        text: String,
    },

    /// The lookahead for an UNK token needed more than one token.
    ConsecutiveUnks {
        /// The region receiving the window.
        region_number: u32,

        /// Position of the first UNK token.
        position: usize,

        /// The lookahead window size.
        window: usize,
    },

    /// A token matched nothing and was attached best-effort.
    Desync {
        /// The region the token was attached to.
        region_number: u32,

        /// The token position.
        position: usize,

        /// The token.
        token: String,
    },
}

impl fmt::Display for AlignmentDiagnostic {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::OovSpan {
                region_number,
                position,
                text,
            } => write!(
                f,
                "OOV text {text:?} in region {region_number} (token {position})"
            ),
            Self::ConsecutiveUnks {
                region_number,
                position,
                window,
            } => write!(
                f,
                "consecutive UNKs at token {position}: lookahead of {window} tokens in region {region_number}"
            ),
            Self::Desync {
                region_number,
                position,
                token,
            } => write!(
                f,
                "token {token:?} (token {position}) matched no text; attached to region {region_number}"
            ),
        }
    }
}
