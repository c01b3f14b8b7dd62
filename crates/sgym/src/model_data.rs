use std::{
    fs::File,
    io::{BufRead, BufReader},
};

use syntaxgym::{
    alignment::{AlignmentOptions, DesyncPolicy},
    spec::ModelSpec,
    suite::Suite,
    surprisals::{
        AggregateOptions,
        AggregateOutput,
        SurprisalTable,
        aggregate_surprisals,
        aggregate_surprisals_by_offsets,
    },
};

/// Model output argument group: what the model made of the suite.
#[derive(clap::Args, Debug)]
pub struct ModelDataArgs {
    /// Model spec JSON file.
    #[arg(long)]
    pub spec: String,

    /// Surprisal TSV file (`sentence_id token_id token surprisal`).
    #[arg(long)]
    pub surprisals: String,

    /// Tokens file: one sentence per line, tokens separated by spaces.
    ///
    /// Defaults to the tokens of the surprisal table.
    #[arg(long)]
    pub tokens: Option<String>,

    /// Token offsets file: one sentence per line, the character offset
    /// where each token starts, separated by spaces.
    ///
    /// When given, tokens are placed by offset instead of by matching
    /// their text against the regions.
    #[arg(long)]
    pub offsets: Option<String>,

    /// What to do with a token which matches no region text.
    #[arg(long, default_value = "fail")]
    pub desync: DesyncPolicy,

    /// Align sentences one at a time.
    #[arg(long)]
    pub sequential: bool,
}

impl ModelDataArgs {
    fn options(&self) -> AggregateOptions {
        AggregateOptions::default()
            .with_alignment(AlignmentOptions::default().with_desync(self.desync))
            .with_parallel(!self.sequential)
    }

    /// Aggregate the model's surprisals over `suite`.
    pub fn aggregate(
        &self,
        suite: &Suite,
    ) -> Result<AggregateOutput, Box<dyn std::error::Error>> {
        let spec = ModelSpec::from_path(&self.spec)?;
        let table = SurprisalTable::from_path(&self.surprisals)?;
        log::info!(
            "surprisals: {} rows over {} sentences",
            table.rows().len(),
            table.sentence_count()
        );

        let tokens = match &self.tokens {
            Some(path) => read_token_lists(BufReader::new(File::open(path)?))?,
            None => table.token_lists(),
        };

        let out = match &self.offsets {
            Some(path) => {
                let offsets = read_offset_lists(BufReader::new(File::open(path)?))?;
                aggregate_surprisals_by_offsets(
                    suite,
                    &table,
                    &tokens,
                    &offsets,
                    &spec,
                    &self.options(),
                )?
            }
            None => aggregate_surprisals(suite, &table, &tokens, &spec, &self.options())?,
        };
        if !out.diagnostics.is_empty() {
            log::warn!("{} alignment diagnostics", out.diagnostics.len());
        }
        Ok(out)
    }
}

/// Read one token list per line; tokens are separated by single spaces.
fn read_token_lists<R: BufRead>(reader: R) -> Result<Vec<Vec<String>>, std::io::Error> {
    reader
        .lines()
        .map(|line| {
            line.map(|line| {
                let line = line.trim_end_matches(['\r', '\n']);
                if line.is_empty() {
                    vec![]
                } else {
                    line.split(' ').map(str::to_string).collect()
                }
            })
        })
        .collect()
}

/// Read one offset list per line; offsets are separated by whitespace.
fn read_offset_lists<R: BufRead>(
    reader: R,
) -> Result<Vec<Vec<usize>>, Box<dyn std::error::Error>> {
    let mut lists = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let offsets = line?
            .split_whitespace()
            .map(|offset| {
                offset
                    .parse::<usize>()
                    .map_err(|e| {
                        format!("offsets line {}: bad offset {offset:?}: {e}", idx + 1)
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        lists.push(offsets);
    }
    Ok(lists)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_token_lists() {
        let lists = read_token_lists("The dog\n\nĠa b\r\n".as_bytes()).unwrap();
        assert_eq!(
            lists,
            vec![vec!["The", "dog"], vec![], vec!["Ġa", "b"]]
        );
    }

    #[test]
    fn test_read_offset_lists() {
        let lists = read_offset_lists("0 3 8

0  4
".as_bytes()).unwrap();
        assert_eq!(lists, vec![vec![0, 3, 8], vec![], vec![0, 4]]);

        let err = read_offset_lists("0 x
".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("\"x\""), "{err}");
    }
}
