use std::io::Write;

use log::LevelFilter;

use crate::{
    input_output::{OutputArgs, SuiteArgs},
    logging::LogArgs,
};

/// Args for the sentences command.
#[derive(clap::Args, Debug)]
pub struct SentencesArgs {
    #[command(flatten)]
    suite: SuiteArgs,

    #[command(flatten)]
    output: OutputArgs,

    #[command(flatten)]
    logging: LogArgs,
}

impl SentencesArgs {
    /// Run the sentences command.
    ///
    /// Sentences are written item-major, in condition order; this is the
    /// order a surprisal table must follow.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.init(LevelFilter::Warn)?;

        let suite = self.suite.load_suite()?;
        let mut writer = self.output.open_writer()?;
        for text in suite.sentence_texts() {
            writeln!(writer, "{text}")?;
        }
        writer.flush()?;

        Ok(())
    }
}
