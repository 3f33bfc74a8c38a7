//! Locate an importable package on disk without importing it.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use strata_core::types::{Module, PACKAGE_MARKER};
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("Package name must be the root name, no '.' allowed.")]
    DottedPackageName { name: String },

    #[error("The package name should not be a directory, it should be the name of the importable Python package.")]
    PathLikePackageName { name: String },

    #[error("Could not find package '{name}' in your Python path.")]
    PackageNotFound { name: String },

    #[error("Package '{name}' has no known source location.")]
    NoLocation { name: String },

    #[error("Could not read package directory {}: {reason}", .path.display())]
    Unreadable { path: PathBuf, reason: String },
}

/// Directories searched for packages: `cwd`, then each `PYTHONPATH` entry,
/// then `extra` in the order given.
pub fn search_roots(cwd: &Path, pythonpath: Option<OsString>, extra: &[PathBuf]) -> Vec<PathBuf> {
    let mut roots = vec![cwd.to_path_buf()];
    if let Some(value) = pythonpath {
        roots.extend(std::env::split_paths(&value).filter(|p| !p.as_os_str().is_empty()));
    }
    roots.extend(extra.iter().cloned());
    roots
}

/// Find `<root>/<name>/__init__.py` under the first root that has it.
pub fn locate_package(name: &str, roots: &[PathBuf]) -> Result<Module, ScanError> {
    if name.contains('.') {
        return Err(ScanError::DottedPackageName {
            name: name.to_string(),
        });
    }
    if name.contains('/') || name.contains('\\') {
        return Err(ScanError::PathLikePackageName {
            name: name.to_string(),
        });
    }

    for root in roots {
        let marker = root.join(name).join(PACKAGE_MARKER);
        if marker.is_file() {
            debug!("found package {} at {}", name, marker.display());
            return Ok(Module::with_path(name, marker));
        }
    }
    debug!("package {} not found in {:?}", name, roots);
    Err(ScanError::PackageNotFound {
        name: name.to_string(),
    })
}
