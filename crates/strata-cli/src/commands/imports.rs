use std::path::PathBuf;

use strata_core::types::Module;
use strata_enforce::list_imports;
use strata_output::ReportFormatter;
use strata_parsers::build_graph;

use super::{emit, find_package, scan_exit_code, EXIT_FAILURE, EXIT_INTERNAL, EXIT_OK};

/// Run `strata imports <module>`.
pub fn run(formatter: &dyn ReportFormatter, module_name: &str, extra_paths: &[PathBuf]) -> i32 {
    let cwd = match std::env::current_dir() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("strata imports: failed to get current directory: {}", e);
            return EXIT_INTERNAL;
        }
    };

    let module = Module::new(module_name);
    let package = match find_package(&cwd, module.root_name(), extra_paths) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("strata imports: {}", e);
            return scan_exit_code(&e);
        }
    };

    let build = match build_graph(&package) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("strata imports: {}", e);
            return scan_exit_code(&e);
        }
    };

    for (path, reason) in &build.unreadable {
        eprintln!("warning: could not read {}: {}", path.display(), reason);
    }

    match list_imports(&build.graph, &module) {
        Some(listing) => {
            emit(&formatter.format_imports(&listing));
            EXIT_OK
        }
        None => {
            eprintln!(
                "strata imports: no module named '{}' in package '{}'",
                module, package
            );
            EXIT_FAILURE
        }
    }
}
