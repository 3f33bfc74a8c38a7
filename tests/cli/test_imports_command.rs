// `strata imports` listings.

use super::common;

#[test]
fn test_lists_imports_of_a_subpackage() {
    let dir = common::create_project(&common::layered_foo_files());
    let output = common::run_strata(dir.path(), &["imports", "foo.two"]);
    assert_eq!(output.status.code(), Some(0));
    let out = String::from_utf8_lossy(&output.stdout);
    assert!(out.contains("Modules imported by foo.two"));
    assert!(out.contains("    - foo.one.alpha (imported by foo.two.beta)\n"));
    assert!(!out.contains("- foo.two.beta"));
}

#[test]
fn test_json_listing() {
    let dir = common::create_project(&common::layered_foo_files());
    let output = common::run_strata(dir.path(), &["--json", "imports", "foo.three"]);
    assert_eq!(output.status.code(), Some(0));
    let listing: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(listing["module"], "foo.three");
    assert_eq!(listing["imports"][0]["imported"], "foo.two.beta");
    assert_eq!(
        listing["imports"][0]["importers"],
        serde_json::json!(["foo.three.gamma"])
    );
}

#[test]
fn test_unknown_module() {
    let dir = common::create_project(&common::layered_foo_files());
    let output = common::run_strata(dir.path(), &["imports", "foo.nine"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("no module named 'foo.nine'"));
}
