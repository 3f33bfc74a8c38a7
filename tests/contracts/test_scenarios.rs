// End-to-end contract checks: package on disk, contract file, report.

use strata_enforce::{load_contracts, Contract, ContractError, LintReport};

use super::common;

const FOO_CONTRACT: &str = "\
Foo layers:
  containers:
    - foo
  layers:
    - three
    - two
    - one
";

fn foo_project(extra: &[(&'static str, &'static str)]) -> tempfile::TempDir {
    let mut files = vec![
        ("foo/__init__.py", ""),
        ("foo/one.py", ""),
        ("foo/two.py", "import foo.one\n"),
        ("foo/three.py", "from foo import two\n"),
        ("layers.yml", FOO_CONTRACT),
    ];
    files.extend_from_slice(extra);
    common::create_project(&files)
}

fn check_all(dir: &std::path::Path) -> (Vec<Contract>, LintReport) {
    let build = common::build(dir, "foo");
    let mut contracts = load_contracts(&dir.join("layers.yml"), "foo").unwrap();
    for contract in &mut contracts {
        contract.check(&build.graph).unwrap();
    }
    let report = LintReport::new(&build.graph, &contracts, build.illegal_filenames).unwrap();
    (contracts, report)
}

#[test]
fn test_downward_imports_keep_the_contract() {
    let dir = foo_project(&[]);
    let (contracts, report) = check_all(dir.path());
    assert!(contracts[0].is_kept().unwrap());
    assert_eq!(report.module_count, 4);
    assert_eq!(report.dependency_count, 2);
    assert!(report.all_kept());
}

#[test]
fn test_upward_import_breaks_the_contract() {
    let mut files = common::layered_foo_files();
    files.push(("layers.yml", "Foo layers:\n  containers: [foo]\n  layers: [three, two, one]\n"));
    files.retain(|(p, _)| *p != "foo/one/alpha.py");
    files.push(("foo/one/alpha.py", "from ..two import beta\n"));
    let dir = common::create_project(&files);

    let (contracts, report) = check_all(dir.path());
    let deps = contracts[0].illegal_dependencies().unwrap();
    let paths: Vec<Vec<&str>> = deps
        .iter()
        .map(|d| d.path().iter().map(|m| m.name()).collect())
        .collect();
    assert_eq!(paths, vec![vec!["foo.one.alpha", "foo.two.beta"]]);
    assert_eq!(report.broken_count(), 1);
}

#[test]
fn test_direct_reverse_edge_is_reported_from_importer_to_imported() {
    let dir = common::create_project(&[
        ("foo/__init__.py", ""),
        ("foo/one.py", "import foo.two\n"),
        ("foo/two.py", "import foo.one\n"),
        ("foo/three.py", "import foo.two\n"),
        ("layers.yml", FOO_CONTRACT),
    ]);
    let (contracts, _) = check_all(dir.path());
    let deps = contracts[0].illegal_dependencies().unwrap();
    assert_eq!(deps.len(), 1);
    assert_eq!(deps[0].importer().name(), "foo.one");
    assert_eq!(deps[0].imported().name(), "foo.two");
}

#[test]
fn test_missing_required_layer_fails_the_check() {
    let dir = foo_project(&[(
        "colors.yml",
        "Colors:\n  containers: [foo]\n  layers: [three, yellow, one]\n",
    )]);
    let build = common::build(dir.path(), "foo");
    let mut contracts = load_contracts(&dir.path().join("colors.yml"), "foo").unwrap();
    let err = contracts[0].check(&build.graph).unwrap_err();
    assert!(matches!(err, ContractError::MissingLayer { .. }));
    assert!(err.to_string().contains("foo.yellow does not exist"));
}

#[test]
fn test_layers_repeat_across_containers() {
    let dir = common::create_project(&[
        ("foo/__init__.py", ""),
        ("foo/blue/__init__.py", ""),
        ("foo/blue/high.py", "from . import low\n"),
        ("foo/blue/low.py", ""),
        ("foo/green/__init__.py", ""),
        ("foo/green/high.py", ""),
        ("foo/green/low.py", "from .high import something\n"),
        (
            "layers.yml",
            "Colors:\n  containers: [foo.blue, foo.green]\n  layers: [high, low]\n",
        ),
    ]);
    let (contracts, _) = check_all(dir.path());
    let deps = contracts[0].illegal_dependencies().unwrap();
    assert_eq!(deps.len(), 1);
    assert_eq!(deps[0].importer().name(), "foo.green.low");
    assert_eq!(deps[0].imported().name(), "foo.green.high");
}
