use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    Command::cargo_bin("newtype-cli").unwrap()
}

#[test]
fn compiles_stdin_to_stdout() {
    cmd()
        .write_stdin("type A = string\n")
        .assert()
        .success()
        .stdout("type A = string\n");
}

#[test]
fn compiles_file_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.nt");
    fs::write(&input, "type T = A (B true) {}\n").unwrap();

    cmd()
        .arg(&input)
        .assert()
        .success()
        .stdout("type T = A<B<true>, {}>\n");
}

#[test]
fn writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.nt");
    let output = dir.path().join("output.ts");
    fs::write(&input, "type Pair a b = [a, b]\n").unwrap();

    cmd()
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout("");
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "type Pair<a, b> = [a, b]\n"
    );
}

#[test]
fn parse_error_sets_exit_code_and_reports_position() {
    cmd()
        .write_stdin("type T =\nstring\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "<stdin>:2:1: error: incorrect indentation (got 1, should be greater than 1)",
        ));
}

#[test]
fn error_report_names_the_input_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("bad.nt");
    fs::write(&input, "type = string\n").unwrap();

    cmd()
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("bad.nt:1:6: error:"));
}

#[test]
fn check_mode_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.nt");
    let output = dir.path().join("output.ts");
    fs::write(&input, "type A = string\n").unwrap();

    cmd()
        .arg(&input)
        .arg("--check")
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout("");
    assert!(!output.exists());
}

#[test]
fn check_mode_still_fails_on_errors() {
    cmd()
        .arg("--check")
        .write_stdin("type = string\n")
        .assert()
        .failure();
}

#[test]
fn missing_input_file_is_an_io_error() {
    cmd()
        .arg("no-such-file.nt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read input file"));
}

#[test]
fn empty_stdin_produces_empty_output() {
    cmd().write_stdin("").assert().success().stdout("");
}
