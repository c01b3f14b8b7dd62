use log::LevelFilter;
use stderrlog::{LogLevelNum, Timestamp};

const LEVELS: [LevelFilter; 6] = [
    LevelFilter::Off,
    LevelFilter::Error,
    LevelFilter::Warn,
    LevelFilter::Info,
    LevelFilter::Debug,
    LevelFilter::Trace,
];

/// Logging flags shared by every subcommand.
#[derive(clap::Args, Debug)]
pub struct LogArgs {
    /// Only report errors.
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Log more; repeat for more detail (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Prefix log lines with a timestamp.
    #[arg(long)]
    timestamps: bool,
}

impl LogArgs {
    /// The effective level, counting `-v` flags up from `base`.
    fn level(
        &self,
        base: LevelFilter,
    ) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        let base = LEVELS.iter().position(|l| *l == base).unwrap_or(2);
        LEVELS[(base + self.verbose as usize).min(LEVELS.len() - 1)]
    }

    /// Install the stderr logger for the library and the CLI.
    pub fn init(
        &self,
        base: LevelFilter,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let verbosity = match self.level(base) {
            LevelFilter::Off => LogLevelNum::Off,
            LevelFilter::Error => LogLevelNum::Error,
            LevelFilter::Warn => LogLevelNum::Warn,
            LevelFilter::Info => LogLevelNum::Info,
            LevelFilter::Debug => LogLevelNum::Debug,
            LevelFilter::Trace => LogLevelNum::Trace,
        };

        stderrlog::new()
            .module("syntaxgym")
            .module("sgym")
            .verbosity(verbosity)
            .timestamp(match self.timestamps {
                true => Timestamp::Second,
                false => Timestamp::Off,
            })
            .init()?;

        Ok(())
    }
}
