//! CLI integration tests.
//!
//! Runs the autograder binary against temporary assignment directories.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const SUCCESS: &str = "Congratulations, your code passed all the autograder tests!";

fn autograder() -> Command {
    let mut cmd = Command::cargo_bin("autograder").expect("binary should build");
    cmd.env_remove("AUTOGRADER_ROOT")
        .env_remove("AUTOGRADER_XML_GENERATOR")
        .env_remove("RUST_LOG")
        .arg("--no-color");
    cmd
}

fn assignment(source: Option<&str>) -> TempDir {
    let dir = tempfile::tempdir().expect("temp dir");
    if let Some(source) = source {
        fs::write(dir.path().join("main.cpp"), source).expect("write candidate");
    }
    dir
}

#[test]
fn test_valid_submission_passes() {
    let dir = assignment(Some("int main() { return 0; }\n"));

    autograder()
        .arg("--root")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("✅ candidate source is readable passed!"))
        .stdout(predicate::str::contains("✅ candidate source is not empty passed!"))
        .stdout(predicate::str::contains(SUCCESS));
}

#[test]
fn test_missing_candidate_aborts_setup() {
    let dir = assignment(None);

    autograder()
        .arg("--root")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("❌ Failed to set up autograder"))
        .stdout(predicate::str::contains(
            "Couldn't find 'main.cpp'. Did you delete it from the starter code?",
        ))
        .stdout(predicate::str::contains("Running test:").not())
        .stdout(predicate::str::contains(SUCCESS).not());
}

#[test]
fn test_empty_candidate_fails_one_part() {
    let dir = assignment(Some("   \n"));

    autograder()
        .arg("--root")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("✅ candidate source is readable passed!"))
        .stdout(predicate::str::contains("❌ candidate source is not empty failed!"))
        .stdout(predicate::str::contains(SUCCESS).not());
}

#[test]
fn test_custom_candidate_name() {
    let dir = tempfile::tempdir().expect("temp dir");
    fs::write(dir.path().join("solution.cpp"), "int main() {}\n").expect("write candidate");

    autograder()
        .arg("--root")
        .arg(dir.path())
        .args(["--candidate", "solution.cpp"])
        .assert()
        .success()
        .stdout(predicate::str::contains(SUCCESS));
}

#[test]
fn test_inspect_with_missing_generator_aborts_setup() {
    let dir = assignment(Some("class StringVector {};\nint main() {}\n"));
    let generator = dir.path().join("no-such-castxml");

    autograder()
        .arg("--root")
        .arg(dir.path())
        .arg("--inspect")
        .arg("--xml-generator")
        .arg(&generator)
        .assert()
        .success()
        .stdout(predicate::str::contains("❌ Failed to set up autograder"))
        .stdout(predicate::str::contains(SUCCESS).not());
}

#[test]
fn test_invalid_root_is_a_usage_error() {
    let dir = tempfile::tempdir().expect("temp dir");

    autograder()
        .arg("--root")
        .arg(dir.path().join("missing"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_version_flag() {
    autograder()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(format!(
            "autograder {}",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn test_unknown_option_is_rejected() {
    autograder().arg("--frobnicate").assert().failure();
}
