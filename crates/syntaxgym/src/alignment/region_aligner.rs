//! # Region Aligner
//!
//! The heuristic token/region alignment engine.
//!
//! The walk keeps a region cursor and a token cursor. Each token is
//! classified (prefix, suffix, special, ordinary) and, if ordinary, matched
//! against the left edge of the unconsumed region text after stripping
//! whatever subword markers the tokenizer uses.
//!
//! UNK tokens are resolved by looking ahead for the next token which can be
//! found in the remaining text; everything skipped over is reported as OOV
//! text of the region the UNK started in.

use std::collections::HashSet;

use crate::{
    alignment::{
        Alignment,
        AlignmentDiagnostic,
        AlignmentOptions,
        DesyncPolicy,
        RegionAlignment,
        lookahead::LookaheadText,
        text_matching::{find_from, is_word_like, match_prefix},
    },
    errors::{SGResult, SyntaxGymError},
    patterns::{CompiledPattern, SpecPattern},
    spec::{ModelSpec, SentinelPosition, TokenizerKind},
    suite::{Region, Sentence},
};

/// Moses split marker: `@-@` stands for `-`.
pub const MOSES_MARKER_PATTERN: &str = r"^@(\S+)@$";

fn compile(pattern: SpecPattern) -> SGResult<CompiledPattern> {
    let compiled = pattern
        .compile()
        .map_err(|source| SyntaxGymError::InvalidPattern {
            pattern: pattern.source().to_string(),
            source,
        })?;
    if compiled.is_fancy() {
        log::debug!("pattern {:?} needs the backtracking engine", pattern.source());
    }
    Ok(compiled)
}

/// A compiled tokenizer specification, ready to align sentences.
#[derive(Debug, Clone)]
pub struct RegionAligner {
    unk_types: HashSet<String>,
    prefix_types: HashSet<String>,
    suffix_types: HashSet<String>,
    special_types: HashSet<String>,
    cased: bool,
    drop_pattern: Option<CompiledPattern>,
    sentinel: Option<(CompiledPattern, SentinelPosition)>,
    metaspace: Option<String>,
    moses_marker: Option<CompiledPattern>,
    options: AlignmentOptions,
}

impl RegionAligner {
    /// Compile a model spec.
    ///
    /// ## Returns
    /// The aligner, `InvalidPattern` if a spec regex does not compile, or
    /// `InvalidSpec` for inconsistent tokenizer settings.
    pub fn new(spec: &ModelSpec) -> SGResult<Self> {
        let vocab = &spec.vocabulary;
        let tokenizer = &spec.tokenizer;
        let set = |types: &[String]| types.iter().cloned().collect::<HashSet<_>>();

        let has_markers = tokenizer.sentinel_pattern.is_some() || tokenizer.metaspace.is_some();
        if has_markers && tokenizer.kind != TokenizerKind::Subword {
            return Err(SyntaxGymError::InvalidSpec(
                "sentinel_pattern and metaspace need a subword tokenizer".to_string(),
            ));
        }

        let drop_pattern = tokenizer
            .drop_token_pattern
            .as_ref()
            .map(|p| compile(SpecPattern::from(p).anchored_start()))
            .transpose()?;

        let sentinel = match (&tokenizer.sentinel_pattern, tokenizer.sentinel_position) {
            (None, _) => None,
            (Some(_), None) => {
                return Err(SyntaxGymError::InvalidSpec(
                    "sentinel_pattern requires sentinel_position".to_string(),
                ));
            }
            (Some(pattern), Some(position)) => {
                let pattern = SpecPattern::from(pattern);
                let pattern = match position {
                    SentinelPosition::Final => pattern.anchored_end(),
                    SentinelPosition::Initial | SentinelPosition::Medial => {
                        pattern.anchored_start()
                    }
                };
                Some((compile(pattern)?, position))
            }
        };

        if tokenizer.metaspace.as_deref() == Some("") {
            return Err(SyntaxGymError::InvalidSpec(
                "metaspace must not be empty".to_string(),
            ));
        }

        let moses_marker = if tokenizer.is_moses() {
            Some(compile(SpecPattern::basic(MOSES_MARKER_PATTERN))?)
        } else {
            None
        };

        Ok(Self {
            unk_types: set(&vocab.unk_types),
            prefix_types: set(&vocab.prefix_types),
            suffix_types: set(&vocab.suffix_types),
            special_types: set(&vocab.special_types),
            cased: tokenizer.cased,
            drop_pattern,
            sentinel,
            metaspace: tokenizer.metaspace.clone(),
            moses_marker,
            options: AlignmentOptions::default(),
        })
    }

    /// Set the alignment options.
    pub fn with_options(
        mut self,
        options: AlignmentOptions,
    ) -> Self {
        self.options = options;
        self
    }

    /// Get the alignment options.
    pub fn options(&self) -> &AlignmentOptions {
        &self.options
    }

    /// Is `token` a special token, which belongs to no region?
    pub fn is_special(
        &self,
        token: &str,
    ) -> bool {
        self.special_types.contains(token)
    }

    /// Align one sentence, attaching its item and condition to any error.
    pub fn align_sentence<S: AsRef<str>>(
        &self,
        sentence: &Sentence<'_>,
        tokens: &[S],
    ) -> SGResult<Alignment> {
        self.align(tokens, sentence.regions())
            .map_err(|e| e.in_sentence(sentence.item_number(), sentence.condition_name()))
    }

    /// Align a token stream with a sentence's regions.
    ///
    /// ## Arguments
    /// * `tokens` - The sentence's token stream, as the model produced it.
    /// * `regions` - The sentence's regions, in order.
    ///
    /// ## Returns
    /// The alignment; it always satisfies token conservation.
    pub fn align<S: AsRef<str>>(
        &self,
        tokens: &[S],
        regions: &[Region],
    ) -> SGResult<Alignment> {
        if regions.is_empty() {
            return if tokens.iter().all(|t| self.is_special(t.as_ref())) {
                Ok(Alignment::new(vec![], (0..tokens.len()).collect(), vec![]))
            } else {
                Err(SyntaxGymError::Shape(format!(
                    "no regions to align {} tokens with",
                    tokens.len()
                )))
            };
        }

        let mut state = AlignState::new(regions);
        let mut t = 0;
        while t < tokens.len() {
            let token = tokens[t].as_ref();

            if self.prefix_types.contains(token) {
                state.assign(state.idx, token);
                t += 1;
                continue;
            }
            if self.suffix_types.contains(token) {
                let idx = state.idx;
                for (pos, token) in tokens.iter().enumerate().skip(t) {
                    self.place(&mut state, idx, pos, token.as_ref());
                }
                break;
            }
            if self.is_special(token) {
                state.special_positions.push(t);
                t += 1;
                continue;
            }

            if !self.normalize(&mut state) {
                if self.unk_types.contains(token) {
                    state.assign(state.idx, token);
                } else {
                    self.desync(&mut state, t, token)?;
                }
                t += 1;
                continue;
            }

            if let Some(consumed) = self.match_token(state.rest, token) {
                state.assign(state.idx, token);
                state.consume(consumed);
                t += 1;
            } else if self.unk_types.contains(token) {
                t = self.resolve_unk(&mut state, tokens, t);
            } else {
                self.desync(&mut state, t, token)?;
                t += 1;
            }
        }

        let alignment = state.finish();
        alignment.check_conservation(tokens)?;
        Ok(alignment)
    }

    /// Strip leading whitespace and dropped text, moving to the next region
    /// as regions run out.
    ///
    /// ## Returns
    /// `false` once there is no region text left.
    fn normalize(
        &self,
        state: &mut AlignState<'_>,
    ) -> bool {
        loop {
            state.rest = state.rest.trim_start();
            if let Some(re) = &self.drop_pattern {
                let fragment_end = state
                    .rest
                    .find(char::is_whitespace)
                    .unwrap_or(state.rest.len());
                if let Some(m) = re.find(&state.rest[..fragment_end])
                    && m.start == 0
                    && m.end > 0
                {
                    state.rest = &state.rest[m.end..];
                    continue;
                }
            }
            if !state.rest.is_empty() {
                return true;
            }
            if !state.advance() {
                return false;
            }
        }
    }

    fn strip_sentinel<'t>(
        &self,
        token: &'t str,
    ) -> Option<&'t str> {
        let (re, position) = self.sentinel.as_ref()?;
        let m = re.find(token).filter(|m| !m.is_empty())?;
        Some(match position {
            SentinelPosition::Final => &token[..m.start],
            SentinelPosition::Initial | SentinelPosition::Medial => &token[m.end..],
        })
    }

    fn strip_metaspace<'t>(
        &self,
        token: &'t str,
    ) -> Option<&'t str> {
        token.strip_prefix(self.metaspace.as_deref()?)
    }

    fn moses_inner<'t>(
        &self,
        token: &'t str,
    ) -> Option<&'t str> {
        self.moses_marker.as_ref()?.capture(token, 1)
    }

    /// Match a token against the left edge of `rest`.
    ///
    /// ## Returns
    /// The number of bytes of `rest` the token covers; a bare marker
    /// covers nothing.
    fn match_token(
        &self,
        rest: &str,
        token: &str,
    ) -> Option<usize> {
        if let Some(n) = match_prefix(rest, token, self.cased) {
            return Some(n);
        }
        [
            self.strip_sentinel(token),
            self.strip_metaspace(token),
            self.moses_inner(token),
        ]
        .into_iter()
        .flatten()
        .find_map(|surface| {
            if surface.is_empty() {
                Some(0)
            } else {
                match_prefix(rest, surface, self.cased)
            }
        })
    }

    /// The text a token stands for, with markers removed.
    fn surface_form<'t>(
        &self,
        token: &'t str,
    ) -> Option<&'t str> {
        let surface = self
            .moses_inner(token)
            .or_else(|| self.strip_metaspace(token))
            .or_else(|| self.strip_sentinel(token))
            .unwrap_or(token);
        (!surface.is_empty()).then_some(surface)
    }

    fn place(
        &self,
        state: &mut AlignState<'_>,
        region_idx: usize,
        pos: usize,
        token: &str,
    ) {
        if self.is_special(token) {
            state.special_positions.push(pos);
        } else {
            state.assign(region_idx, token);
        }
    }

    fn desync(
        &self,
        state: &mut AlignState<'_>,
        position: usize,
        token: &str,
    ) -> SGResult<()> {
        let region_number = state.region_number();
        match self.options.desync {
            DesyncPolicy::Fail => Err(SyntaxGymError::Desync {
                token: token.to_string(),
                position,
                region_number,
                content: state.rest.to_string(),
            }),
            DesyncPolicy::Resync => {
                state.assign(state.idx, token);
                state.diagnostics.push(AlignmentDiagnostic::Desync {
                    region_number,
                    position,
                    token: token.to_string(),
                });
                if !state.advance() {
                    state.rest = "";
                }
                Ok(())
            }
        }
    }

    /// Resolve the UNK token at `t`.
    ///
    /// Grows a window over the following tokens until one of them is found
    /// in the remaining text (past its first character). The text before
    /// that point is OOV; the window's tokens all go to the current region.
    ///
    /// ## Returns
    /// The next token position.
    fn resolve_unk<S: AsRef<str>>(
        &self,
        state: &mut AlignState<'_>,
        tokens: &[S],
        t: usize,
    ) -> usize {
        let leftmost = state.idx;
        let region_number = state.region_number();
        let lookahead = LookaheadText::new(leftmost, state.rest, state.following());
        let text = lookahead.text();
        let from = text.chars().next().map_or(0, char::len_utf8);

        let mut reacquired = None;
        let mut window = 1;
        while let Some(candidate) = tokens.get(t + window).map(AsRef::as_ref) {
            if self.suffix_types.contains(candidate) {
                break;
            }
            if !self.unk_types.contains(candidate)
                && !self.is_special(candidate)
                && let Some(surface) = self.surface_form(candidate)
                && let Some(m) = find_from(text, surface, from, self.cased, is_word_like(surface))
            {
                reacquired = Some(m.start);
                break;
            }
            window += 1;
        }

        let (oov_end, window) = match reacquired {
            Some(offset) => (offset, window),
            None => (text.len(), tokens.len() - t),
        };

        if window > 1 {
            state.diagnostics.push(AlignmentDiagnostic::ConsecutiveUnks {
                region_number,
                position: t,
                window,
            });
        }

        let oov_text = text[..oov_end].trim();
        if !oov_text.is_empty() {
            log::debug!("UNK at token {t} covers {oov_text:?}");
            state.regions[leftmost]
                .oovs
                .extend(oov_text.split_whitespace().map(String::from));
            state.diagnostics.push(AlignmentDiagnostic::OovSpan {
                region_number,
                position: t,
                text: oov_text.to_string(),
            });
        }

        for (pos, token) in tokens.iter().enumerate().skip(t).take(window) {
            self.place(state, leftmost, pos, token.as_ref());
        }

        match reacquired.and_then(|offset| lookahead.locate(offset)) {
            Some((idx, rest)) => {
                state.idx = idx;
                state.rest = rest;
            }
            None => state.rest = "",
        }

        t + window
    }
}

/// Mutable walk state for one sentence.
struct AlignState<'r> {
    source: &'r [Region],
    idx: usize,
    rest: &'r str,
    regions: Vec<RegionAlignment>,
    special_positions: Vec<usize>,
    diagnostics: Vec<AlignmentDiagnostic>,
}

impl<'r> AlignState<'r> {
    fn new(source: &'r [Region]) -> Self {
        Self {
            source,
            idx: 0,
            rest: source.first().map_or("", Region::content),
            regions: source
                .iter()
                .map(|r| RegionAlignment::new(r.region_number))
                .collect(),
            special_positions: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    fn region_number(&self) -> u32 {
        self.source[self.idx].region_number
    }

    fn assign(
        &mut self,
        region_idx: usize,
        token: &str,
    ) {
        self.regions[region_idx].tokens.push(token.to_string());
    }

    /// Move to the next region, if there is one.
    fn advance(&mut self) -> bool {
        if self.idx + 1 < self.source.len() {
            self.idx += 1;
            self.rest = self.source[self.idx].content();
            true
        } else {
            false
        }
    }

    /// Consume `n` bytes; an exhausted region hands over to the next
    /// non-empty region.
    fn consume(
        &mut self,
        n: usize,
    ) {
        self.rest = &self.rest[n..];
        if !self.rest.trim().is_empty() {
            return;
        }
        if let Some(next) = (self.idx + 1..self.source.len()).find(|&j| !self.source[j].is_empty()) {
            self.idx = next;
            self.rest = self.source[next].content();
        }
    }

    /// Later non-empty regions, as `(index, content)`.
    fn following(&self) -> impl Iterator<Item = (usize, &'r str)> + use<'r> {
        let source = self.source;
        (self.idx + 1..source.len())
            .map(move |j| (j, source[j].content()))
            .filter(|(_, content)| !content.is_empty())
    }

    fn finish(self) -> Alignment {
        Alignment::new(self.regions, self.special_positions, self.diagnostics)
    }
}
