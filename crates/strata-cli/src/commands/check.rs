use std::path::PathBuf;

use strata_core::config::DEFAULT_CONTRACTS_FILE;
use strata_enforce::{load_contracts, LintReport};
use strata_output::ReportFormatter;
use strata_parsers::{build_graph, Diagnostic};
use tracing::debug;

use super::{emit, find_package, scan_exit_code, EXIT_FAILURE, EXIT_INTERNAL, EXIT_OK};

/// Run `strata check <package>`.
pub fn run(
    formatter: &dyn ReportFormatter,
    package_name: &str,
    config: Option<PathBuf>,
    extra_paths: &[PathBuf],
) -> i32 {
    let cwd = match std::env::current_dir() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("strata check: failed to get current directory: {}", e);
            return EXIT_INTERNAL;
        }
    };

    let package = match find_package(&cwd, package_name, extra_paths) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("strata check: {}", e);
            return scan_exit_code(&e);
        }
    };

    let config_path = config.unwrap_or_else(|| cwd.join(DEFAULT_CONTRACTS_FILE));
    let mut contracts = match load_contracts(&config_path, package.name()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("strata check: {}", e);
            return EXIT_FAILURE;
        }
    };

    let build = match build_graph(&package) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("strata check: {}", e);
            return scan_exit_code(&e);
        }
    };
    for path in &build.illegal_filenames {
        eprintln!("warning: skipped module with illegal filename: {}", path.display());
    }
    for (path, reason) in &build.unreadable {
        eprintln!("warning: could not read {}: {}", path.display(), reason);
    }
    for diagnostic in &build.diagnostics {
        match diagnostic {
            Diagnostic::SyntaxError { .. } | Diagnostic::Unreadable { .. } => {
                eprintln!("warning: {}", diagnostic)
            }
            _ => debug!("{}", diagnostic),
        }
    }

    for contract in &mut contracts {
        if let Err(e) = contract.check(&build.graph) {
            eprintln!("strata check: {}", e);
            return EXIT_FAILURE;
        }
    }

    let report = match LintReport::new(&build.graph, &contracts, build.illegal_filenames) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("strata check: {}", e);
            return EXIT_INTERNAL;
        }
    };
    emit(&formatter.format_report(&report));

    if report.all_kept() {
        EXIT_OK
    } else {
        EXIT_FAILURE
    }
}
