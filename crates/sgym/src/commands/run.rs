use log::LevelFilter;

use crate::{
    commands::evaluate::evaluate_and_write,
    input_output::{OutputArgs, SuiteArgs},
    logging::LogArgs,
    model_data::ModelDataArgs,
};

/// Args for the run command.
#[derive(clap::Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    suite: SuiteArgs,

    #[command(flatten)]
    model: ModelDataArgs,

    /// Also save the aggregated suite to this path.
    #[arg(long)]
    save_suite: Option<String>,

    #[command(flatten)]
    output: OutputArgs,

    #[command(flatten)]
    logging: LogArgs,
}

impl RunArgs {
    /// Run the run command; writes the prediction results table.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.init(LevelFilter::Info)?;

        let suite = self.suite.load_suite()?;
        let out = self.model.aggregate(&suite)?;

        if let Some(path) = &self.save_suite {
            out.suite.save(path)?;
            log::info!("saved aggregated suite to {path}");
        }

        evaluate_and_write(&out.suite, &self.output)
    }
}
