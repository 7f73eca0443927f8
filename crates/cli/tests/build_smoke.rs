//! End-to-end smoke tests for the `chunkstream` binary.

use assert_cmd::Command;
use std::fs;
use tempfile::TempDir;

#[test]
fn build_writes_artifacts_and_tree_report() {
    let dir = TempDir::new().unwrap();
    let components = dir.path().join("components");
    fs::create_dir(&components).unwrap();
    fs::write(components.join("IRN00001.txt"), "a\nUSE MRN10001\nb").unwrap();
    fs::write(components.join("MRN10001.txt"), "x").unwrap();

    let output = dir.path().join("chunks");
    let report = dir.path().join("reports/call_tree.txt");

    Command::cargo_bin("chunkstream")
        .unwrap()
        .args(["build", "--components"])
        .arg(&components)
        .arg("--output")
        .arg(&output)
        .arg("--tree-report")
        .arg(&report)
        .assert()
        .success();

    let artifact = fs::read_to_string(output.join("IRN00001.txt")).unwrap();
    assert_eq!(
        artifact,
        "# Start of IRN: IRN00001\na\n# Start of MRN10001\nx\n# End of MRN10001\nb\n# End of IRN: IRN00001"
    );

    let tree = fs::read_to_string(&report).unwrap();
    assert_eq!(tree, "IRN00001\n└── MRN10001");
}

#[test]
fn build_fails_on_missing_component_directory() {
    let dir = TempDir::new().unwrap();

    Command::cargo_bin("chunkstream")
        .unwrap()
        .args(["build", "--components"])
        .arg(dir.path().join("absent"))
        .arg("--output")
        .arg(dir.path().join("chunks"))
        .assert()
        .failure();
}

#[test]
fn clean_listing_writes_cleaned_component() {
    let dir = TempDir::new().unwrap();
    let listing = dir.path().join("MRN10001.txt");
    fs::write(
        &listing,
        "000100 HEADER\n000200 * +--- 01/02/2024 13:45\n000300 * MOVE A TO B\n000400 * ---\n",
    )
    .unwrap();

    let output = dir.path().join("components");
    Command::cargo_bin("chunkstream")
        .unwrap()
        .arg("clean-listing")
        .arg(&listing)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let cleaned = fs::read_to_string(output.join("MRN10001_cleaned.txt")).unwrap();
    assert_eq!(cleaned, "\nMOVE A TO B");
}
