use log::LevelFilter;
use syntaxgym::{metrics::Metric, suite::write_region_table};

use crate::{
    input_output::{OutputArgs, SuiteArgs},
    logging::LogArgs,
};

/// Args for the regions command.
#[derive(clap::Args, Debug)]
pub struct RegionsArgs {
    #[command(flatten)]
    suite: SuiteArgs,

    /// Metric to report; defaults to the suite's primary metric.
    #[arg(long)]
    metric: Option<Metric>,

    #[command(flatten)]
    output: OutputArgs,

    #[command(flatten)]
    logging: LogArgs,
}

impl RegionsArgs {
    /// Run the regions command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.init(LevelFilter::Warn)?;

        let suite = self.suite.load_suite()?;
        let rows = suite.region_rows(self.metric);
        log::debug!("{} region rows", rows.len());

        let writer = self.output.open_writer()?;
        write_region_table(&rows, writer)?;

        Ok(())
    }
}
