//! CLI integration tests driving the binary with assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::io::Read;
use std::path::Path;
use tempfile::TempDir;

fn bin() -> Command {
    Command::cargo_bin("nessus-linker").unwrap()
}

fn seed_csv(base: &Path, name: &str, contents: &str) {
    let incoming = base.join("ScanResults");
    fs::create_dir_all(&incoming).unwrap();
    fs::write(incoming.join(name), contents).unwrap();
}

const SCAN1: &str = "Plugin ID,Host,Severity\n19506,10.0.0.5,Info\n";
const SCAN2: &str = "Plugin ID,Host,Severity\n10881,10.0.0.6,Medium\n";

#[test]
fn help_lists_the_bundling_flags() {
    bin()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--zip"))
        .stdout(predicate::str::contains("--password-protect"))
        .stdout(predicate::str::contains("--base-dir"));
}

#[test]
fn version_reports_the_binary_name() {
    bin()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("nessus-linker"));
}

#[test]
fn password_protect_requires_zip() {
    bin()
        .arg("--password-protect")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("--zip"));
}

#[test]
fn empty_run_sets_up_the_layout_and_exits_cleanly() {
    let base = TempDir::new().unwrap();

    bin()
        .args(["--base-dir", base.path().to_str().unwrap(), "--yes"])
        .assert()
        .success()
        .stderr(predicate::str::contains("No csv files were found"));

    assert!(base.path().join("ScanResults/ModifiedResults").is_dir());
    assert!(base.path().join("ScanResults/OldResults").is_dir());
}

#[test]
fn declining_the_gate_exits_cleanly_without_processing() {
    let base = TempDir::new().unwrap();
    seed_csv(base.path(), "scan1.csv", SCAN1);

    bin()
        .args(["--base-dir", base.path().to_str().unwrap()])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Goodbye"));

    // Nothing was converted or moved.
    assert!(base.path().join("ScanResults/scan1.csv").is_file());
    assert!(!base
        .path()
        .join("ScanResults/ModifiedResults/scan1.xlsx")
        .exists());
}

#[test]
fn converts_and_archives_a_scan() {
    let base = TempDir::new().unwrap();
    seed_csv(base.path(), "scan1.csv", SCAN1);

    bin()
        .args(["--base-dir", base.path().to_str().unwrap(), "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Processing scan1.csv"))
        .stdout(predicate::str::contains("1 csv file(s) converted"));

    assert!(base
        .path()
        .join("ScanResults/ModifiedResults/scan1.xlsx")
        .is_file());
    assert!(!base.path().join("ScanResults/scan1.csv").exists());
    assert!(base.path().join("ScanResults/OldResults/scan1.csv").is_file());
}

#[test]
fn a_bad_file_fails_the_exit_code_but_not_the_batch() {
    let base = TempDir::new().unwrap();
    seed_csv(base.path(), "bad.csv", "Host,Severity\nx,Info\n");
    seed_csv(base.path(), "scan1.csv", SCAN1);

    bin()
        .args(["--base-dir", base.path().to_str().unwrap(), "--yes"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("bad.csv"));

    // The good file still made it through.
    assert!(base
        .path()
        .join("ScanResults/ModifiedResults/scan1.xlsx")
        .is_file());
}

#[test]
fn single_workbook_gets_its_own_bundle() {
    let base = TempDir::new().unwrap();
    seed_csv(base.path(), "scan1.csv", SCAN1);

    bin()
        .args(["--base-dir", base.path().to_str().unwrap(), "--yes", "--zip"])
        .assert()
        .success()
        .stdout(predicate::str::contains("scan1.zip created"));

    assert!(base
        .path()
        .join("ScanResults/ModifiedResults/scan1.zip")
        .is_file());
}

#[test]
fn multiple_workbooks_bundle_under_the_given_name() {
    let base = TempDir::new().unwrap();
    seed_csv(base.path(), "scan1.csv", SCAN1);
    seed_csv(base.path(), "scan2.csv", SCAN2);

    bin()
        .args([
            "--base-dir",
            base.path().to_str().unwrap(),
            "--yes",
            "--zip",
            "--bundle-name",
            "weekly",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("weekly.zip created"));

    let bundle = base.path().join("ScanResults/ModifiedResults/weekly.zip");
    let mut archive = zip::ZipArchive::new(fs::File::open(bundle).unwrap()).unwrap();
    assert_eq!(archive.len(), 2);
    assert!(archive.by_name("scan1.xlsx").is_ok());
}

#[test]
fn passphrase_flag_encrypts_the_bundle_without_prompting() {
    let base = TempDir::new().unwrap();
    seed_csv(base.path(), "scan1.csv", SCAN1);

    bin()
        .args([
            "--base-dir",
            base.path().to_str().unwrap(),
            "--yes",
            "--zip",
            "--password-protect",
            "--passphrase",
            "s3cret",
        ])
        .assert()
        .success();

    let bundle = base.path().join("ScanResults/ModifiedResults/scan1.zip");
    let mut archive = zip::ZipArchive::new(fs::File::open(bundle).unwrap()).unwrap();
    assert!(archive.by_name_decrypt("scan1.xlsx", b"wrong").is_err());
    let mut member = archive.by_name_decrypt("scan1.xlsx", b"s3cret").unwrap();
    let mut extracted = Vec::new();
    member.read_to_end(&mut extracted).unwrap();
    assert!(!extracted.is_empty());
}

#[test]
fn prompted_passphrase_mismatch_then_match_still_bundles() {
    let base = TempDir::new().unwrap();
    seed_csv(base.path(), "scan1.csv", SCAN1);

    bin()
        .args([
            "--base-dir",
            base.path().to_str().unwrap(),
            "--yes",
            "--zip",
            "--password-protect",
        ])
        .write_stdin("first\nsecond\ns3cret\ns3cret\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Passwords don't match"));

    let bundle = base.path().join("ScanResults/ModifiedResults/scan1.zip");
    let mut archive = zip::ZipArchive::new(fs::File::open(bundle).unwrap()).unwrap();
    assert!(archive.by_name_decrypt("scan1.xlsx", b"s3cret").is_ok());
}
