// Scanning real package trees into graphs.

use strata_core::types::Module;
use strata_parsers::{locate_package, Diagnostic, ScanError};

use super::common;

fn m(name: &str) -> Module {
    Module::new(name)
}

fn successors(build: &strata_parsers::GraphBuild, name: &str) -> Vec<String> {
    build
        .graph
        .successors(&m(name))
        .iter()
        .map(|s| s.to_string())
        .collect()
}

#[test]
fn test_import_forms_resolve_to_scanned_modules() {
    let dir = common::create_project(&[
        ("app/__init__.py", ""),
        ("app/a.py", ""),
        ("app/b.py", ""),
        ("app/pkg/__init__.py", "from . import inner\nfrom .. import a\n"),
        ("app/pkg/inner.py", "def f(): pass\n"),
        (
            "app/main.py",
            "\
from __future__ import annotations
import os
import app.a, app.b as bee
from app.pkg.inner import f
from .pkg import *

def lazy():
    from app import b
",
        ),
    ]);
    let build = common::build(dir.path(), "app");

    assert_eq!(
        successors(&build, "app.main"),
        vec!["app.a", "app.b", "app.pkg", "app.pkg.inner"]
    );
    assert_eq!(successors(&build, "app.pkg"), vec!["app.a", "app.pkg.inner"]);
    assert!(build.diagnostics.is_empty(), "{:?}", build.diagnostics);
}

#[test]
fn test_illegal_filenames_are_skipped_and_reported() {
    let dir = common::create_project(&[
        ("app/__init__.py", ""),
        ("app/good.py", ""),
        ("app/bad-name.py", "import app.good\n"),
        ("app/class.py", ""),
        ("app/migrations/__init__.py", ""),
        ("app/migrations/0001_initial.py", ""),
        ("app/notapackage/loose.py", ""),
    ]);
    let build = common::build(dir.path(), "app");

    let mut names: Vec<String> = build.graph.modules().map(|m| m.to_string()).collect();
    names.sort();
    assert_eq!(names, vec!["app", "app.good"]);

    let mut skipped: Vec<String> = build
        .illegal_filenames
        .iter()
        .filter_map(|p| p.file_name())
        .map(|f| f.to_string_lossy().into_owned())
        .collect();
    skipped.sort();
    assert_eq!(skipped, vec!["bad-name.py", "class.py"]);
}

#[test]
fn test_broken_file_still_contributes_imports() {
    let dir = common::create_project(&[
        ("app/__init__.py", ""),
        ("app/ok.py", ""),
        ("app/broken.py", "import app.ok\n\ndef oops(:\n    pass\n"),
    ]);
    let build = common::build(dir.path(), "app");

    assert_eq!(successors(&build, "app.broken"), vec!["app.ok"]);
    assert!(build
        .diagnostics
        .iter()
        .any(|d| matches!(d, Diagnostic::SyntaxError { module, .. } if module.name() == "app.broken")));
}

#[test]
fn test_missing_submodule_lands_on_nearest_known_ancestor() {
    let dir = common::create_project(&[
        ("app/__init__.py", "from ... import nothing\n"),
        ("app/mod.py", "import app.missing.deeper\nimport requests\n"),
    ]);
    let build = common::build(dir.path(), "app");

    assert_eq!(successors(&build, "app.mod"), vec!["app"]);
    assert_eq!(build.graph.dependency_count(), 1);
    assert!(build
        .diagnostics
        .iter()
        .any(|d| matches!(d, Diagnostic::RelativeImportBeyondRoot { level: 3, .. })));
    assert!(!build
        .diagnostics
        .iter()
        .any(|d| matches!(d, Diagnostic::UnresolvedImport { .. })));
}

#[test]
fn test_locate_searches_roots_in_order() {
    let first = common::create_project(&[("app/__init__.py", "")]);
    let second = common::create_project(&[("app/__init__.py", ""), ("other/__init__.py", "")]);
    let roots = vec![first.path().to_path_buf(), second.path().to_path_buf()];

    let app = locate_package("app", &roots).unwrap();
    assert!(app.path().unwrap().starts_with(first.path()));
    let other = locate_package("other", &roots).unwrap();
    assert!(other.path().unwrap().starts_with(second.path()));

    assert!(matches!(
        locate_package("missing", &roots),
        Err(ScanError::PackageNotFound { .. })
    ));
    assert!(matches!(
        locate_package("app.sub", &roots),
        Err(ScanError::DottedPackageName { .. })
    ));
}
