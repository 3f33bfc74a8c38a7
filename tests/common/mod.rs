/// Shared test helpers for all strata integration tests.
///
/// Import from any integration test file with:
///   `#[path = "common/mod.rs"] mod common;`
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use strata_core::types::Module;
use strata_parsers::{build_graph, GraphBuild};
use tempfile::TempDir;

/// Write `files` (relative path, content) under a fresh temporary directory.
///
/// Hold the returned TempDir to keep the directory alive.
#[allow(dead_code)]
pub fn create_project(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (path, content) in files {
        let full_path = dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full_path, content).unwrap();
    }
    dir
}

/// The layered `foo` package used across tests: `three` imports `two`,
/// `two` imports `one`.
#[allow(dead_code)]
pub fn layered_foo_files() -> Vec<(&'static str, &'static str)> {
    vec![
        ("foo/__init__.py", ""),
        ("foo/one/__init__.py", ""),
        ("foo/one/alpha.py", ""),
        ("foo/two/__init__.py", "from . import beta\n"),
        ("foo/two/beta.py", "from foo.one import alpha\n"),
        ("foo/three/__init__.py", ""),
        ("foo/three/gamma.py", "import foo.two.beta\n"),
    ]
}

/// Scan and analyze the package `name` found directly under `root`.
#[allow(dead_code)]
pub fn build(root: &Path, name: &str) -> GraphBuild {
    let package = Module::with_path(name, root.join(name).join("__init__.py"));
    build_graph(&package).unwrap()
}

/// Get path to compiled strata binary.
///
/// Builds the binary if it doesn't exist yet.
#[allow(dead_code)]
pub fn strata_bin() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove 'deps'
    path.push("strata");
    if !path.exists() {
        let status = Command::new("cargo")
            .args(["build", "-p", "strata-cli"])
            .status()
            .expect("Failed to build strata");
        assert!(status.success(), "Failed to build strata binary");
    }
    path
}

/// Run strata in `dir` with `args`, with no inherited PYTHONPATH or log filter.
#[allow(dead_code)]
pub fn run_strata(dir: &Path, args: &[&str]) -> Output {
    Command::new(strata_bin())
        .args(args)
        .current_dir(dir)
        .env_remove("PYTHONPATH")
        .env_remove("STRATA_LOG")
        .output()
        .unwrap()
}
