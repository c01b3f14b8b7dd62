use std::io::Write;

use log::LevelFilter;

use crate::{
    input_output::{OutputArgs, SuiteArgs},
    logging::LogArgs,
    model_data::ModelDataArgs,
};

/// Args for the aggregate command.
#[derive(clap::Args, Debug)]
pub struct AggregateArgs {
    #[command(flatten)]
    suite: SuiteArgs,

    #[command(flatten)]
    model: ModelDataArgs,

    /// Model name recorded in the output suite.
    #[arg(long)]
    model_name: Option<String>,

    #[command(flatten)]
    output: OutputArgs,

    #[command(flatten)]
    logging: LogArgs,
}

impl AggregateArgs {
    /// Run the aggregate command; writes the suite with region values as JSON.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.init(LevelFilter::Warn)?;

        let suite = self.suite.load_suite()?;
        let mut out = self.model.aggregate(&suite)?;
        if let Some(name) = &self.model_name {
            out.suite.meta.model = Some(name.clone());
        }

        let mut writer = self.output.open_writer()?;
        out.suite.to_writer(&mut writer)?;
        writeln!(writer)?;
        writer.flush()?;

        Ok(())
    }
}
