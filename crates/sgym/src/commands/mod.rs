use crate::commands::{
    aggregate::AggregateArgs,
    evaluate::EvaluateArgs,
    regions::RegionsArgs,
    run::RunArgs,
    sentences::SentencesArgs,
};

pub mod aggregate;
pub mod evaluate;
pub mod regions;
pub mod run;
pub mod sentences;

/// Subcommands for sgym
#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Print the sentences of a suite, one per line.
    Sentences(SentencesArgs),

    /// Fold model surprisals into a suite's regions.
    Aggregate(AggregateArgs),

    /// Evaluate the predictions of an aggregated suite.
    Evaluate(EvaluateArgs),

    /// Print one row per region of an aggregated suite.
    Regions(RegionsArgs),

    /// Aggregate, then evaluate.
    Run(RunArgs),
}

impl Commands {
    /// Run the subcommand.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        match self {
            Commands::Sentences(cmd) => cmd.run(),
            Commands::Aggregate(cmd) => cmd.run(),
            Commands::Evaluate(cmd) => cmd.run(),
            Commands::Regions(cmd) => cmd.run(),
            Commands::Run(cmd) => cmd.run(),
        }
    }
}
