pub mod check;
pub mod imports;

use std::path::{Path, PathBuf};

use strata_core::types::Module;
use strata_parsers::{locate_package, search_roots, ScanError};

/// Exit code for a clean run.
pub const EXIT_OK: i32 = 0;
/// Exit code for broken contracts and configuration or usage errors.
pub const EXIT_FAILURE: i32 = 1;
/// Exit code for failures unrelated to the user's input.
pub const EXIT_INTERNAL: i32 = 2;

/// Locate `name` from the current directory, `PYTHONPATH` and `extra`.
pub(crate) fn find_package(cwd: &Path, name: &str, extra: &[PathBuf]) -> Result<Module, ScanError> {
    let roots = search_roots(cwd, std::env::var_os("PYTHONPATH"), extra);
    locate_package(name, &roots)
}

pub(crate) fn scan_exit_code(e: &ScanError) -> i32 {
    match e {
        ScanError::DottedPackageName { .. }
        | ScanError::PathLikePackageName { .. }
        | ScanError::PackageNotFound { .. } => EXIT_FAILURE,
        ScanError::NoLocation { .. } | ScanError::Unreadable { .. } => EXIT_INTERNAL,
    }
}

/// Print formatter output, making sure it ends with a newline.
pub(crate) fn emit(output: &str) {
    if output.is_empty() {
        return;
    }
    if output.ends_with('\n') {
        print!("{}", output);
    } else {
        println!("{}", output);
    }
}
