use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

#[test]
fn test_lock_and_release_announced() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cli.lock");

    let mut cmd = Command::cargo_bin("exlock").unwrap();
    cmd.arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Lock acquired"))
        .stdout(predicate::str::contains("Lock released"));
}

#[test]
fn test_quiet_suppresses_output() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cli.lock");

    let mut cmd = Command::cargo_bin("exlock").unwrap();
    cmd.arg(&path)
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_conflicting_wait_flags_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cli.lock");

    let mut cmd = Command::cargo_bin("exlock").unwrap();
    cmd.arg(&path).arg("--wait").arg("--no-wait").assert().failure();
}

#[test]
fn test_timeout_conflicts_with_no_wait() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cli.lock");

    let mut cmd = Command::cargo_bin("exlock").unwrap();
    cmd.arg(&path)
        .arg("--no-wait")
        .arg("--timeout")
        .arg("1s")
        .assert()
        .failure();
}

#[test]
fn test_invalid_hold_duration_fails_before_locking() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cli.lock");

    let mut cmd = Command::cargo_bin("exlock").unwrap();
    cmd.arg(&path)
        .arg("--hold")
        .arg("soon")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid duration"))
        .stdout(predicate::str::contains("Lock acquired").not());
}

#[test]
fn test_path_is_required() {
    let mut cmd = Command::cargo_bin("exlock").unwrap();
    cmd.assert().failure();
}
