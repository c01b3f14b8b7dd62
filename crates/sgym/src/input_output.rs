use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use syntaxgym::suite::Suite;

/// A file argument; missing or `-` means the standard stream.
fn file_arg(arg: &Option<String>) -> Option<&Path> {
    arg.as_deref().filter(|p| *p != "-").map(Path::new)
}

/// The suite to work on.
#[derive(clap::Args, Debug)]
pub struct SuiteArgs {
    /// Suite JSON file; read from stdin when missing or "-".
    #[arg(long)]
    suite: Option<String>,
}

impl SuiteArgs {
    /// Load and summarize the suite.
    pub fn load_suite(&self) -> Result<Suite, Box<dyn std::error::Error>> {
        let suite = match file_arg(&self.suite) {
            Some(path) => Suite::from_path(path)?,
            None => Suite::from_reader(io::stdin().lock())?,
        };
        log::info!(
            "suite {:?}: {} items, {} sentences, {} predictions",
            suite.meta.name,
            suite.items.len(),
            suite.sentence_count(),
            suite.predictions.len()
        );
        Ok(suite)
    }
}

/// Where results go.
#[derive(clap::Args, Debug)]
pub struct OutputArgs {
    /// Output file; written to stdout when missing or "-".
    #[arg(long)]
    output: Option<String>,
}

impl OutputArgs {
    /// Open a buffered writer; callers flush it.
    pub fn open_writer(&self) -> io::Result<Box<dyn Write>> {
        Ok(match file_arg(&self.output) {
            Some(path) => Box::new(BufWriter::new(File::create(path)?)),
            None => Box::new(BufWriter::new(io::stdout().lock())),
        })
    }
}
