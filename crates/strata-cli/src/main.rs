//! strata CLI: layered architecture checks for Python packages.
//!
//! `strata check <package>` checks every contract in the contract file and
//! `strata imports <module>` lists what a module depends on. See
//! `strata --help` for usage.

use clap::Parser;
use strata_output::{HumanFormatter, JsonFormatter, ReportFormatter, Verbosity};

mod cli_args;
mod commands;
mod logging;

use cli_args::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.debug);

    let exit_code = match cli.command {
        Commands::Check {
            package,
            config,
            verbose,
            quiet,
            paths,
        } => match Verbosity::from_flags(quiet, verbose) {
            Ok(verbosity) => {
                let formatter = formatter(cli.json, verbosity);
                commands::check::run(&*formatter, &package, config, &paths)
            }
            Err(e) => {
                eprintln!("strata check: {}", e);
                1
            }
        },
        Commands::Imports { module, paths } => {
            let formatter = formatter(cli.json, Verbosity::Normal);
            commands::imports::run(&*formatter, &module, &paths)
        }
    };

    std::process::exit(exit_code);
}

fn formatter(json: bool, verbosity: Verbosity) -> Box<dyn ReportFormatter> {
    if json {
        Box::new(JsonFormatter)
    } else {
        Box::new(HumanFormatter::new(verbosity))
    }
}
