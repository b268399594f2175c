//! Integration tests for the `lctl` binary.

#![allow(deprecated)] // Command::cargo_bin

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;

fn fixture(path: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(path)
}

fn lctl() -> Command {
    Command::cargo_bin("lctl").unwrap()
}

#[test]
fn test_match_without_arguments_prints_usage() {
    lctl()
        .arg("match")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("USAGE: lctl match <input file>"));
}

#[test]
fn test_match_with_too_many_arguments_prints_usage() {
    lctl()
        .args(["match", "a", "b", "c", "d", "e", "f"])
        .assert()
        .success()
        .stdout(predicate::str::contains("USAGE:"));
}

#[test]
fn test_match_copies_files() {
    let out = tempfile::tempdir().unwrap();
    let ltf_match = out.path().join("ltf_match");
    let laf_match = out.path().join("laf_match");
    fs::create_dir_all(&ltf_match).unwrap();
    fs::create_dir_all(&laf_match).unwrap();

    lctl()
        .arg("match")
        .arg(fixture("index.xml"))
        .arg(fixture("split/ltf"))
        .arg(&ltf_match)
        .arg(fixture("split/laf"))
        .arg(&laf_match)
        .assert()
        .success()
        .stdout(predicate::str::contains("4 files copied"));

    assert!(ltf_match.join("A.ltf.xml").is_file());
    assert!(laf_match.join("B.laf.xml").is_file());
}

#[test]
fn test_match_missing_output_dir_fails() {
    let out = tempfile::tempdir().unwrap();

    lctl()
        .arg("match")
        .arg(fixture("index.xml"))
        .arg(fixture("split/ltf"))
        .arg(out.path().join("missing"))
        .arg(fixture("split/laf"))
        .arg(out.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_split_writes_segment_files() {
    let out = tempfile::tempdir().unwrap();

    lctl()
        .arg("split")
        .arg(fixture("ltf"))
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Splitting 1 LTF files"))
        .stdout(predicate::str::contains("3 segment files"));

    for seg in ["segment-0", "segment-1", "segment-2"] {
        assert!(out
            .path()
            .join(format!("HAU_DF_000001_{seg}.ltf.xml"))
            .is_file());
    }
}

#[test]
fn test_split_missing_input_dir_fails() {
    let out = tempfile::tempdir().unwrap();

    lctl()
        .arg("split")
        .arg(out.path().join("missing"))
        .arg(out.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_inspect_prints_yaml() {
    lctl()
        .arg("inspect")
        .arg(fixture("ltf/HAU_DF_000001.ltf.xml"))
        .arg(fixture("ltf/HAU_DF_000001.laf.xml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("kind: ltf"))
        .stdout(predicate::str::contains("kind: laf"))
        .stdout(predicate::str::contains("tokens: 8"))
        .stdout(predicate::str::contains("type: GPE"));
}

#[test]
fn test_inspect_requires_files() {
    lctl().arg("inspect").assert().failure();
}
