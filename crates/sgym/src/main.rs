//! `sgym`: run syntactic test suites against language model output.

mod commands;
mod input_output;
mod logging;
mod model_data;

use clap::Parser;

/// Targeted syntactic evaluation of language models.
#[derive(clap::Parser, Debug)]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: commands::Commands,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    Args::parse().command.run()
}
