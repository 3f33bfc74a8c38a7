// Whitelists, optional layers and indirect paths through other layers.

use strata_core::types::{ImportPath, Module};
use strata_enforce::{load_contracts, Contract, Layer};

use super::common;

fn m(name: &str) -> Module {
    Module::new(name)
}

fn package(files: &[(&'static str, &'static str)]) -> tempfile::TempDir {
    let mut all = vec![
        ("foo/__init__.py", ""),
        ("foo/high/__init__.py", ""),
        ("foo/mid/__init__.py", ""),
        ("foo/low/__init__.py", ""),
    ];
    all.extend_from_slice(files);
    common::create_project(&all)
}

fn layers(names: &[&str]) -> Vec<Layer> {
    names.iter().map(|n| Layer::parse(n)).collect()
}

#[test]
fn test_whitelisted_path_is_exempt() {
    let dir = package(&[
        ("foo/low/worker.py", "from foo.high import api\n"),
        ("foo/high/api.py", ""),
        (
            "layers.yml",
            "Layers:\n  containers: [foo]\n  layers: [high, mid, low]\n  whitelisted_paths:\n    - foo.low.worker <- foo.high.api\n",
        ),
    ]);
    let build = common::build(dir.path(), "foo");
    let mut contracts = load_contracts(&dir.path().join("layers.yml"), "foo").unwrap();
    contracts[0].check(&build.graph).unwrap();
    assert!(contracts[0].is_kept().unwrap());
    assert_eq!(contracts[0].whitelisted_paths().len(), 1);
}

#[test]
fn test_path_through_middle_layer_is_reported_per_hop() {
    let dir = package(&[
        ("foo/low/worker.py", "from foo.mid import service\n"),
        ("foo/mid/service.py", "from foo.high import api\n"),
        ("foo/high/api.py", ""),
    ]);
    let build = common::build(dir.path(), "foo");
    let mut contract = Contract::new("C", vec![m("foo")], layers(&["high", "mid", "low"]), vec![]);
    contract.check(&build.graph).unwrap();

    let mut pairs: Vec<(String, String)> = contract
        .illegal_dependencies()
        .unwrap()
        .iter()
        .map(|d| (d.importer().to_string(), d.imported().to_string()))
        .collect();
    pairs.sort();
    assert_eq!(
        pairs,
        vec![
            ("foo.low.worker".to_string(), "foo.mid.service".to_string()),
            ("foo.mid.service".to_string(), "foo.high.api".to_string()),
        ]
    );
}

#[test]
fn test_path_through_unlayered_module_is_kept_whole() {
    let dir = package(&[
        ("foo/low/worker.py", "import foo.utils\n"),
        ("foo/utils.py", "import foo.high.api\n"),
        ("foo/high/api.py", ""),
    ]);
    let build = common::build(dir.path(), "foo");
    let mut contract = Contract::new("C", vec![m("foo")], layers(&["high", "mid", "low"]), vec![]);
    contract.check(&build.graph).unwrap();

    let deps = contract.illegal_dependencies().unwrap();
    assert_eq!(deps.len(), 1);
    assert_eq!(deps[0].via(), &[m("foo.utils")]);
}

#[test]
fn test_whitelisting_one_hop_reveals_a_longer_route() {
    let dir = package(&[
        ("foo/low/worker.py", "import foo.high.api\nimport foo.utils\n"),
        ("foo/utils.py", "import foo.high.api\n"),
        ("foo/high/api.py", ""),
    ]);
    let build = common::build(dir.path(), "foo");
    let whitelist = vec![ImportPath::new(m("foo.low.worker"), m("foo.high.api"))];
    let mut contract = Contract::new("C", vec![m("foo")], layers(&["high", "low"]), whitelist);
    contract.check(&build.graph).unwrap();

    let deps = contract.illegal_dependencies().unwrap();
    assert_eq!(deps.len(), 1);
    assert_eq!(
        deps[0].path(),
        &[m("foo.low.worker"), m("foo.utils"), m("foo.high.api")]
    );
}

#[test]
fn test_optional_layer_may_be_absent() {
    let dir = package(&[("foo/low/worker.py", "")]);
    let build = common::build(dir.path(), "foo");
    let mut contract = Contract::new(
        "C",
        vec![m("foo")],
        layers(&["high", "(absent)", "low"]),
        vec![],
    );
    contract.check(&build.graph).unwrap();
    assert!(contract.is_kept().unwrap());
}
