//! # UNK Lookahead Text
//!
//! The remaining text of a sentence, flattened so that a search for the
//! next recognizable token may cross region boundaries.

/// One region's slice of a [`LookaheadText`].
#[derive(Debug, Clone, Copy)]
struct Segment<'r> {
    region_idx: usize,
    offset: usize,
    content: &'r str,
}

/// Remaining region text joined with single spaces.
#[derive(Debug, Clone)]
pub struct LookaheadText<'r> {
    text: String,
    segments: Vec<Segment<'r>>,
}

impl<'r> LookaheadText<'r> {
    /// Build the lookahead text.
    ///
    /// ## Arguments
    /// * `current_idx` - The index of the current region.
    /// * `current` - The unconsumed content of the current region.
    /// * `following` - `(index, content)` of the later non-empty regions.
    pub fn new<I>(
        current_idx: usize,
        current: &'r str,
        following: I,
    ) -> Self
    where
        I: IntoIterator<Item = (usize, &'r str)>,
    {
        let mut text = String::from(current);
        let mut segments = vec![Segment {
            region_idx: current_idx,
            offset: 0,
            content: current,
        }];
        for (region_idx, content) in following {
            text.push(' ');
            segments.push(Segment {
                region_idx,
                offset: text.len(),
                content,
            });
            text.push_str(content);
        }
        Self { text, segments }
    }

    /// Get the flattened text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Map a byte offset of [`LookaheadText::text`] back to its region.
    ///
    /// ## Returns
    /// The region index and that region's content from the offset on.
    pub fn locate(
        &self,
        offset: usize,
    ) -> Option<(usize, &'r str)> {
        let segment = self.segments.iter().rev().find(|s| s.offset <= offset)?;
        let local = offset - segment.offset;
        segment
            .content
            .get(local..)
            .map(|rest| (segment.region_idx, rest))
    }
}
