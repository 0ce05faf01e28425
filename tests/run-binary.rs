use assert_cmd::Command;
use predicates::prelude::*;

fn solver() -> Command {
    Command::cargo_bin("klotski-solver").unwrap()
}

#[test]
fn run_already_solved() {
    solver()
        .arg("boards/solved.txt")
        .arg("--workers")
        .arg("1")
        .assert()
        .success()
        .stdout(predicate::str::contains("Solution found: true"))
        .stdout(predicate::str::contains("already solved"))
        .stdout(predicate::str::contains("Solution length: 0 moves"))
        .stderr("");
}

#[test]
fn run_one_move() {
    solver()
        .arg("boards/one-move.txt")
        .arg("--workers")
        .arg("1")
        .assert()
        .success()
        .stdout(predicate::str::contains("Solution found: true"))
        .stdout(predicate::str::contains("Solution length: 1 moves"))
        .stdout(predicate::str::contains("1. move b down 1"))
        .stderr("");
}

#[test]
fn run_two_move_quiet() {
    // --quiet suppresses the board echo but not the result
    solver()
        .arg("--quiet")
        .arg("boards/two-move.txt")
        .arg("--workers")
        .arg("1")
        .assert()
        .success()
        .stdout(predicate::str::contains("Solving").not())
        .stdout(predicate::str::contains("Solution length: 2 moves"))
        .stderr("");
}

#[test]
fn run_unsolvable() {
    solver()
        .arg("boards/walled-off.txt")
        .assert()
        .success()
        .stdout(predicate::str::contains("Solution found: false"))
        .stdout(predicate::str::contains("search space exhausted"))
        .stderr("");
}

#[test]
fn run_timeout() {
    solver()
        .arg("boards/klotski.txt")
        .arg("--timeout-ms")
        .arg("5")
        .assert()
        .success()
        .stdout(predicate::str::contains("Solution found: false"))
        .stdout(predicate::str::contains("cancelled"))
        .stderr("");
}

#[test]
fn run_missing_file() {
    solver()
        .arg("boards/does-not-exist.txt")
        .assert()
        .failure()
        .stdout("");
}

#[test]
fn run_malformed_board() {
    solver()
        .arg("Cargo.toml")
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("Can't load board"));
}
