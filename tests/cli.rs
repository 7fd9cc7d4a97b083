use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn paylog(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("paylog").unwrap();
    cmd.env("HOME", home).env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

/// Temp home with an initialized data dir and the demo data loaded.
fn demo_home() -> TempDir {
    let home = tempfile::tempdir().unwrap();
    let data_dir = home.path().join("data");
    paylog(home.path())
        .args(["init", "--data-dir", data_dir.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized paylog"));
    paylog(home.path())
        .arg("demo")
        .assert()
        .success()
        .stdout(predicate::str::contains("Demo data loaded"));
    home
}

#[test]
fn test_areas_lists_demo_areas() {
    let home = demo_home();
    paylog(home.path())
        .arg("areas")
        .assert()
        .success()
        .stdout(predicate::str::contains("North Ward"))
        .stdout(predicate::str::contains("Riverside"));
}

#[test]
fn test_records_by_connection_number() {
    let home = demo_home();
    paylog(home.path())
        .args(["records", "1001"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Jane Doe"))
        .stdout(predicate::str::contains("100.50"))
        .stdout(predicate::str::contains("75.00"))
        .stdout(predicate::str::contains("credit").not());
}

#[test]
fn test_records_within_area_by_name() {
    let home = demo_home();
    paylog(home.path())
        .args(["records", "bo", "--area", "north ward"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(Bob)"));
}

#[test]
fn test_records_unknown_area_fails() {
    let home = demo_home();
    paylog(home.path())
        .args(["records", "1001", "--area", "Atlantis"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown area: Atlantis"));
}

#[test]
fn test_records_no_match() {
    let home = demo_home();
    paylog(home.path())
        .args(["records", "zzz"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No person matches 'zzz'"));
}

#[test]
fn test_persons_search_and_area() {
    let home = demo_home();
    paylog(home.path())
        .args(["persons", "--search", "n-17"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Li Wei"));
    paylog(home.path())
        .args(["persons", "--area", "South Ward"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ama Owusu"))
        .stdout(predicate::str::contains("Jane Doe").not());
}

#[test]
fn test_persons_requires_filter() {
    let home = demo_home();
    paylog(home.path()).arg("persons").assert().failure();
}

#[test]
fn test_demo_is_idempotent() {
    let home = demo_home();
    paylog(home.path())
        .arg("demo")
        .assert()
        .success()
        .stdout(predicate::str::contains("already has areas"));
}

#[test]
fn test_status_counts() {
    let home = demo_home();
    paylog(home.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Areas:      4"))
        .stdout(predicate::str::contains("Persons:    8"))
        .stdout(predicate::str::contains("Records:    56"))
        .stdout(predicate::str::contains("Debits:     48"));
}

#[test]
fn test_records_without_database_fails() {
    let home = tempfile::tempdir().unwrap();
    paylog(home.path())
        .args(["records", "1001"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("paylog init"));
}

#[test]
fn test_persons_in_area_without_database_fails() {
    let home = tempfile::tempdir().unwrap();
    paylog(home.path())
        .args(["persons", "--area", "North Ward"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("paylog init"));
}

#[test]
fn test_load_missing_dir_fails() {
    let home = tempfile::tempdir().unwrap();
    let missing = home.path().join("nowhere");
    paylog(home.path())
        .args(["load", missing.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No database found"));
}

#[test]
fn test_load_switches_data_dir() {
    let home = demo_home();
    let data_dir = home.path().join("data");
    paylog(home.path())
        .args(["load", data_dir.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Switched to"));
}
