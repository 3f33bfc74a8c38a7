use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "strata",
    version,
    about = "Check that a Python package respects its layered architecture"
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as structured JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Log every step of the analysis to stderr
    #[arg(long, global = true)]
    pub debug: bool,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Check a package against its layer contracts
    Check {
        /// Name of the top level Python package to analyze
        package: String,
        /// Contract file (default: layers.yml in the current directory)
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,
        /// List every module's imports before the contracts
        #[arg(long, short = 'v', action = ArgAction::Count)]
        verbose: u8,
        /// Only print when a contract is broken
        #[arg(long, short = 'q')]
        quiet: bool,
        /// Extra directory to search for the package (repeatable)
        #[arg(long = "path", value_name = "DIR")]
        paths: Vec<PathBuf>,
    },

    /// List the modules a module imports from outside itself
    Imports {
        /// Dotted name of the module
        module: String,
        /// Extra directory to search for the package (repeatable)
        #[arg(long = "path", value_name = "DIR")]
        paths: Vec<PathBuf>,
    },
}
