use std::io::Write;

use log::LevelFilter;
use syntaxgym::{
    prediction::{PredictionResult, accuracy, write_prediction_results},
    suite::Suite,
};

use crate::{
    input_output::{OutputArgs, SuiteArgs},
    logging::LogArgs,
};

/// Args for the evaluate command.
#[derive(clap::Args, Debug)]
pub struct EvaluateArgs {
    #[command(flatten)]
    suite: SuiteArgs,

    #[command(flatten)]
    output: OutputArgs,

    #[command(flatten)]
    logging: LogArgs,
}

impl EvaluateArgs {
    /// Run the evaluate command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.init(LevelFilter::Info)?;

        let suite = self.suite.load_suite()?;
        evaluate_and_write(&suite, &self.output)
    }
}

/// Evaluate every prediction, log per-prediction accuracy, and write the
/// results table.
pub fn evaluate_and_write(
    suite: &Suite,
    output: &OutputArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let results = suite.evaluate_predictions()?;
    report_accuracy(suite, &results);

    let mut writer = output.open_writer()?;
    write_prediction_results(&results, &mut writer)?;
    writer.flush()?;

    Ok(())
}

fn report_accuracy(
    suite: &Suite,
    results: &[PredictionResult],
) {
    for (idx, prediction) in suite.predictions.iter().enumerate() {
        let subset: Vec<PredictionResult> = results
            .iter()
            .filter(|r| r.prediction_id == idx)
            .cloned()
            .collect();
        if let Some(acc) = accuracy(&subset) {
            log::info!(
                "prediction {idx} {:?}: {:.3} over {} items",
                prediction.formula(),
                acc,
                subset.len()
            );
        }
    }
    if let Some(acc) = accuracy(results) {
        log::info!("{}: overall accuracy {acc:.3}", suite.meta.name);
    }
}
