//! # Text Matching
//!
//! Case-folding prefix and search helpers over region text.
//!
//! All offsets are byte offsets into the original (unfolded) haystack, and
//! always fall on character boundaries.

use core::ops::Range;

/// Is `c` part of a word?
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Does `token` start like a word (rather than punctuation)?
pub fn is_word_like(token: &str) -> bool {
    token.chars().next().is_some_and(is_word_char)
}

/// Is `idx` the start of a word in `haystack`?
pub fn at_word_start(
    haystack: &str,
    idx: usize,
) -> bool {
    haystack[..idx]
        .chars()
        .next_back()
        .is_none_or(|c| !is_word_char(c))
}

/// Match `needle` against the start of `haystack`.
///
/// When `cased` is false, both sides are lower-cased character-wise.
///
/// ## Returns
/// The number of haystack bytes the needle covers, or `None`.
pub fn match_prefix(
    haystack: &str,
    needle: &str,
    cased: bool,
) -> Option<usize> {
    if cased {
        return haystack.starts_with(needle).then_some(needle.len());
    }

    let folded = needle.to_lowercase();
    let mut expected = folded.chars().peekable();
    for (idx, c) in haystack.char_indices() {
        if expected.peek().is_none() {
            return Some(idx);
        }
        for lc in c.to_lowercase() {
            if expected.next() != Some(lc) {
                return None;
            }
        }
    }
    expected.peek().is_none().then_some(haystack.len())
}

/// Find the first non-empty occurrence of `needle` at or after `from`.
///
/// ## Arguments
/// * `haystack` - The text to search.
/// * `needle` - The text to find.
/// * `from` - A char-boundary byte offset to start searching at.
/// * `cased` - Whether matching is case-sensitive.
/// * `word_boundary` - Only accept matches at the start of a word.
pub fn find_from(
    haystack: &str,
    needle: &str,
    from: usize,
    cased: bool,
    word_boundary: bool,
) -> Option<Range<usize>> {
    if needle.is_empty() {
        return None;
    }
    haystack[from..].char_indices().find_map(|(idx, _)| {
        let start = from + idx;
        if word_boundary && !at_word_start(haystack, start) {
            return None;
        }
        match_prefix(&haystack[start..], needle, cased)
            .filter(|&len| len > 0)
            .map(|len| start..start + len)
    })
}
