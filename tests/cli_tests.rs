//! Integration tests for the CLI interface

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn autopylot() -> Command {
    let mut cmd = Command::cargo_bin("autopylot").unwrap();
    cmd.env_clear();
    if let Ok(path) = std::env::var("PATH") {
        cmd.env("PATH", path);
    }
    cmd
}

#[test]
fn test_cli_help_flag() {
    autopylot()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("--dry-run"));
}

#[test]
fn test_missing_configuration_exits_with_2() {
    let temp = TempDir::new().unwrap();
    autopylot()
        .arg("-C")
        .arg(temp.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("GITHUB_EVENT_NAME"));
}

#[test]
fn test_invalid_check_exits_with_2() {
    let temp = TempDir::new().unwrap();
    autopylot()
        .arg("-C")
        .arg(temp.path())
        .env("GITHUB_EVENT_NAME", "push")
        .env("GITHUB_ACTOR", "octocat")
        .env("GITHUB_REPOSITORY_OWNER", "octocat")
        .env("GITHUB_REPOSITORY", "octocat/notebooks")
        .env("GITHUB_REF", "refs/heads/main")
        .env("INPUT_GITHUB_TOKEN", "token")
        .env("INPUT_CHECK", "sometimes")
        .env("INPUT_INPUT_TYPE", "ipynb")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("sometimes is a wrong value"));
}

#[test]
fn test_foreign_pull_request_is_skipped() {
    let temp = TempDir::new().unwrap();
    autopylot()
        .arg("-C")
        .arg(temp.path())
        .env("GITHUB_EVENT_NAME", "pull_request")
        .env("GITHUB_ACTOR", "fork-author")
        .env("GITHUB_REPOSITORY_OWNER", "octocat")
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipping"));
}

#[test]
fn test_dry_run_plans_conversion() {
    let temp = TempDir::new().unwrap();
    std::fs::create_dir_all(temp.path().join("a")).unwrap();
    std::fs::write(temp.path().join("a/nb1.ipynb"), "{}").unwrap();

    autopylot()
        .arg("-C")
        .arg(temp.path())
        .arg("--dry-run")
        .env("GITHUB_EVENT_NAME", "push")
        .env("GITHUB_ACTOR", "octocat")
        .env("GITHUB_REPOSITORY_OWNER", "octocat")
        .env("GITHUB_REPOSITORY", "octocat/notebooks")
        .env("GITHUB_REF", "refs/heads/main")
        .env("INPUT_GITHUB_TOKEN", "token")
        .env("INPUT_CHECK", "all")
        .env("INPUT_INPUT_TYPE", "ipynb")
        .env("INPUT_OUTPUT_TYPE", "py")
        .assert()
        .success()
        .stdout(predicate::str::contains("autopy-lot/a/nb1.py"))
        .stdout(predicate::str::contains("token").not());

    assert!(!temp.path().join("autopy-lot").exists());
}

#[test]
fn test_empty_check_finishes_without_changes() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("nb.ipynb"), "{}").unwrap();

    autopylot()
        .arg("-C")
        .arg(temp.path())
        .env("GITHUB_EVENT_NAME", "push")
        .env("GITHUB_ACTOR", "octocat")
        .env("GITHUB_REPOSITORY_OWNER", "octocat")
        .env("GITHUB_REPOSITORY", "octocat/notebooks")
        .env("GITHUB_REF", "refs/heads/main")
        .env("INPUT_GITHUB_TOKEN", "token")
        .env("INPUT_CHECK", "")
        .env("INPUT_INPUT_TYPE", "ipynb")
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing modified"));

    assert!(!temp.path().join("autopy-lot").exists());
}
