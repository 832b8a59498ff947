//! End-to-end tests for the canonize binary.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;

fn canonize() -> Command {
    Command::cargo_bin("canonize").expect("binary builds")
}

#[test]
fn ssn_prints_all_three_renderings() {
    canonize()
        .args(["ssn", "123 45 6789"])
        .assert()
        .success()
        .stdout(predicate::str::contains("OK: 123-45-6789"))
        .stdout(predicate::str::contains("machine:    123456789"))
        .stdout(predicate::str::contains("particular: 123456789"));
}

#[test]
fn luhn_failure_exits_nonzero() {
    canonize()
        .args(["credit-card", "4111111111111112"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid input: 4111111111111112"));
}

#[test]
fn email_json_output_carries_the_triple() {
    canonize()
        .args(["--json", "email", "John Doe <john@example.com>"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"input\""))
        .stdout(predicate::str::contains("\"machine\": \"john@example.com\""))
        .stdout(predicate::str::contains("\"common\": \"john@example.com\""));
}

#[test]
fn phone_regularizes_punctuation() {
    canonize()
        .args(["phone", "(212) 555-0100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("OK: +1(212)555-0100"))
        .stdout(predicate::str::contains("particular: (212) 555-0100"));
}

#[test]
fn phone_region_can_come_from_the_environment() {
    canonize()
        .env("CANONIZE_REGION", "GB")
        .args(["phone", "(212) 555-0100"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not supported"));
}

#[test]
fn file_batches_report_each_failure_and_exit_nonzero() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "123-45-6789").expect("write");
    writeln!(file, "12345").expect("write");
    writeln!(file, "078 05 1120").expect("write");

    canonize()
        .arg("ssn")
        .arg("--file")
        .arg(file.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("OK: 123-45-6789"))
        .stdout(predicate::str::contains("OK: 078-05-1120"))
        .stderr(predicate::str::contains("FAIL: 12345"))
        .stderr(predicate::str::contains("1 input(s) failed validation"));
}

#[test]
fn integer_bounds_are_enforced() {
    canonize()
        .args(["integer", "1,500", "--max", "1000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("higher than 1000"));

    canonize()
        .args(["integer", "1,500"])
        .assert()
        .success()
        .stdout(predicate::str::contains("OK: 1,500"));
}

#[test]
fn piped_output_carries_no_escape_sequences() {
    canonize()
        .args(["ssn", "123 45 6789"])
        .assert()
        .success()
        .stdout(predicate::str::contains('\x1b').not());
}

#[test]
fn name_abbreviation_rewrite_can_be_turned_off() {
    canonize()
        .args(["name", "n a s a"])
        .assert()
        .success()
        .stdout(predicate::str::contains("OK: N.A.S.A."));

    canonize()
        .args(["name", "n a s a", "--no-abbreviation"])
        .assert()
        .success()
        .stdout(predicate::str::contains("OK: N A S A"));
}

#[test]
fn missing_config_file_is_an_error() {
    canonize()
        .args(["--config", "/nonexistent/canonize.toml", "info"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load configuration"));
}

#[test]
fn info_lists_the_validators() {
    canonize()
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains("credit-card"))
        .stdout(predicate::str::contains("isbn"));
}
