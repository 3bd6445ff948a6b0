use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn test_cli_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!());
    cmd.arg("tests/fixtures/notifications.csv");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("transaction,message"))
        .stdout(predicate::str::contains("1,Notifications Committed"))
        // Three notifications fit in one default-sized batch
        .stdout(predicate::str::contains("2,").not());

    Ok(())
}

#[test]
fn test_cli_batch_size() {
    let mut cmd = Command::new(cargo_bin!("notification-relay"));
    cmd.arg("tests/fixtures/notifications.csv")
        .arg("--batch-size")
        .arg("2");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("1,Notifications Committed"))
        .stdout(predicate::str::contains("2,Notifications Committed"))
        .stdout(predicate::str::contains("3,").not());
}

#[test]
fn test_cli_rejects_zero_batch_size() {
    let mut cmd = Command::new(cargo_bin!("notification-relay"));
    cmd.arg("tests/fixtures/notifications.csv")
        .arg("--batch-size")
        .arg("0");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("batch size must be at least 1"));
}

#[test]
fn test_cli_empty_input_writes_header_only() {
    let csv = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(csv.path(), "id, payload\n").unwrap();

    let mut cmd = Command::new(cargo_bin!("notification-relay"));
    cmd.arg(csv.path());

    cmd.assert()
        .success()
        .stdout("transaction,message\n");
}
