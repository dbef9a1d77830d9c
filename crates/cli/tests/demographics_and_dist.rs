use std::fs;
use std::path::Path;

use predicates::prelude::*;
use tempfile::tempdir;

fn write_roster(root: &Path) {
    let data = root.join("data");
    fs::create_dir_all(&data).unwrap();
    fs::write(
        data.join("mp-info.json"),
        r#"{
  "Alice": {"con": "Tottenham", "parlId": 1},
  "Bob": {"con": "Queen’s Park and Maida Vale"},
  "Carol": {"con": "Cardiff South"}
}"#,
    )
    .unwrap();
}

fn read_demographics(root: &Path) -> serde_json::Value {
    let text = fs::read_to_string(root.join("data/constituency-demographics.json")).unwrap();
    serde_json::from_str(&text).unwrap()
}

#[test]
fn manual_demographics_links_ministers() {
    let dir = tempdir().expect("tempdir");
    let root = dir.path();
    write_roster(root);

    assert_cmd::cargo::cargo_bin_cmd!("powermap")
        .arg("demographics")
        .arg("--root")
        .arg(root)
        .arg("--manual")
        .assert()
        .success()
        .stdout(predicate::str::contains("manual constituency table"))
        .stdout(predicate::str::contains("Minister constituencies: 3"))
        .stdout(predicate::str::contains("Cardiff South"));

    let doc = read_demographics(root);
    assert_eq!(doc["_metadata"]["last_updated"], "2026-02-10");
    assert_eq!(doc["constituencies"]["Tottenham"]["ministers"], serde_json::json!(["Alice"]));
    assert_eq!(doc["constituencies"]["Tottenham"]["nonwhite_pct"], 62.9);
    assert_eq!(
        doc["constituencies"]["Queen's Park and Maida Vale"]["ministers"],
        serde_json::json!(["Bob"])
    );
}

#[test]
fn demographics_is_idempotent() {
    let dir = tempdir().expect("tempdir");
    let root = dir.path();
    write_roster(root);

    let run = || {
        assert_cmd::cargo::cargo_bin_cmd!("powermap")
            .arg("demographics")
            .arg("--root")
            .arg(root)
            .arg("--manual")
            .assert()
            .success();
        fs::read(root.join("data/constituency-demographics.json")).unwrap()
    };
    assert_eq!(run(), run());
}

#[test]
fn explicit_workbook_is_used() {
    let dir = tempdir().expect("tempdir");
    let root = dir.path();
    write_roster(root);
    fs::write(
        root.join("ethnicity.json"),
        r#"{"Broad ethnic groups": [
            ["PCON24CD", "PCON24NM", "White %", "Asian %", "Black %", "Mixed %", "Other %"],
            ["E14001530", "Tottenham", 37.1, 9.0, 31.5, 11.2, 11.2],
            ["E14001000", "Hackney South and Shoreditch", 45.0, 10.0, 20.0, 10.0, 15.0]
        ]}"#,
    )
    .unwrap();

    assert_cmd::cargo::cargo_bin_cmd!("powermap")
        .arg("demographics")
        .arg("--root")
        .arg(root)
        .arg("--excel")
        .arg("ethnicity.json")
        .assert()
        .success()
        .stdout(predicate::str::contains("Loaded 2 constituencies"));

    let doc = read_demographics(root);
    assert_eq!(doc["_metadata"]["coverage"], "2 constituencies");
    assert_eq!(doc["constituencies"]["Tottenham"]["gss_code"], "E14001530");
    assert!(doc["constituencies"]["Hackney South and Shoreditch"].get("ministers").is_none());
}

#[test]
fn explicit_workbook_without_name_column_fails() {
    let dir = tempdir().expect("tempdir");
    let root = dir.path();
    write_roster(root);
    fs::write(root.join("bad.json"), r#"{"Data": [["Code", "White %"], ["E1", 50.0]]}"#).unwrap();

    assert_cmd::cargo::cargo_bin_cmd!("powermap")
        .arg("demographics")
        .arg("--root")
        .arg(root)
        .arg("--excel")
        .arg("bad.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no constituency name column"));
    assert!(!root.join("data/constituency-demographics.json").exists());
}

#[test]
fn unreadable_default_workbook_falls_back_to_manual() {
    let dir = tempdir().expect("tempdir");
    let root = dir.path();
    write_roster(root);
    let sources = root.join("data/sources");
    fs::create_dir_all(&sources).unwrap();
    fs::write(sources.join("constituency-ethnicity.xlsx"), b"not a workbook").unwrap();

    assert_cmd::cargo::cargo_bin_cmd!("powermap")
        .arg("demographics")
        .arg("--root")
        .arg(root)
        .assert()
        .success()
        .stdout(predicate::str::contains("(auto-detected)"));

    let doc = read_demographics(root);
    assert!(doc["constituencies"]["Tottenham"].is_object());
}

#[test]
fn dist_copies_deployables_and_skips_sources_and_debug_files() {
    let dir = tempdir().expect("tempdir");
    let root = dir.path();
    let data = root.join("data");
    fs::create_dir_all(data.join("sources")).unwrap();
    fs::create_dir_all(data.join("issues")).unwrap();
    fs::create_dir_all(root.join("maps")).unwrap();
    fs::write(root.join("index.html"), "<html></html>").unwrap();
    fs::write(data.join("mp-info.json"), "{}").unwrap();
    fs::write(data.join("_debug_changelog.json"), "{a: 'b'}").unwrap();
    fs::write(data.join("sources/constituency-ethnicity.xlsx"), b"raw").unwrap();
    fs::write(data.join("issues/housing.json"), "[]").unwrap();

    // Stale files from an earlier run are cleared.
    fs::create_dir_all(root.join("dist/data")).unwrap();
    fs::write(root.join("dist/data/stale.json"), "{}").unwrap();

    assert_cmd::cargo::cargo_bin_cmd!("powermap")
        .arg("dist")
        .arg("--root")
        .arg(root)
        .assert()
        .success()
        .stdout(predicate::str::contains("with 3 files"));

    let dist = root.join("dist");
    assert!(dist.join("index.html").is_file());
    assert!(dist.join("data/mp-info.json").is_file());
    assert!(dist.join("data/issues/housing.json").is_file());
    assert!(!dist.join("data/_debug_changelog.json").exists());
    assert!(!dist.join("data/sources").exists());
    assert!(!dist.join("data/stale.json").exists());
    assert!(!dist.join("maps").exists());
}

#[test]
fn build_runs_every_phase() {
    let dir = tempdir().expect("tempdir");
    let root = dir.path();
    fs::write(
        root.join("original-index.html"),
        "<script>\nvar MP_INFO = {\"Alice\": {con: \"Tottenham\"}};\n\
         var DEPARTMENTS = [{secretary: {name: \"Alice\"}}];\n</script>",
    )
    .unwrap();

    assert_cmd::cargo::cargo_bin_cmd!("powermap")
        .arg("--verbose")
        .arg("build")
        .arg("--root")
        .arg(root)
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Building dist/ ==="));

    assert!(root.join("dist/data/mp-info.json").is_file());
    assert!(root.join("dist/data/constituency-demographics.json").is_file());
    assert!(!root.join("dist/index.html").exists());
}
