//! File selection and the "nothing modified" path against a real git repository

use std::path::{Path, PathBuf};

use autopylot::config::{ConfigResolver, MockVarEnv};
use autopylot::select::FileSelector;
use autopylot::subprocess::SubprocessManager;
use autopylot::{ConversionPipeline, RunOutcome};
use tempfile::TempDir;
use tokio::process::Command;

async fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .await
        .unwrap();
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Test helper: Create a temporary git repository
async fn create_temp_git_repo() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    git(temp_dir.path(), &["init"]).await;
    git(temp_dir.path(), &["config", "user.email", "test@example.com"]).await;
    git(temp_dir.path(), &["config", "user.name", "Test User"]).await;
    temp_dir
}

async fn commit_all(dir: &Path, message: &str) {
    git(dir, &["add", "-A"]).await;
    git(dir, &["commit", "-m", message]).await;
}

fn env(check: &str) -> MockVarEnv {
    [
        ("GITHUB_EVENT_NAME", "push"),
        ("GITHUB_ACTOR", "octocat"),
        ("GITHUB_REPOSITORY_OWNER", "octocat"),
        ("GITHUB_REPOSITORY", "octocat/notebooks"),
        ("GITHUB_REF", "refs/heads/main"),
        ("INPUT_GITHUB_TOKEN", "token"),
        ("INPUT_CHECK", check),
        ("INPUT_INPUT_TYPE", "ipynb"),
    ]
    .into_iter()
    .collect()
}

#[tokio::test]
async fn test_latest_returns_existing_matching_files_only() {
    let repo = create_temp_git_repo().await;
    let root = repo.path();

    std::fs::create_dir_all(root.join("nb")).unwrap();
    std::fs::write(root.join("nb/analysis.ipynb"), "{}").unwrap();
    std::fs::write(root.join("nb/gone.ipynb"), "{}").unwrap();
    commit_all(root, "Initial commit").await;

    std::fs::write(root.join("nb/analysis.ipynb"), "{\"cells\": []}").unwrap();
    std::fs::remove_file(root.join("nb/gone.ipynb")).unwrap();
    std::fs::write(root.join("notes.txt"), "notes").unwrap();
    commit_all(root, "Update analysis").await;

    let env = env("latest");
    let config = ConfigResolver::new(&env)
        .with_working_dir(root)
        .resolve()
        .unwrap();
    let subprocess = SubprocessManager::production();
    let git_runner = subprocess.git();

    let files = FileSelector::new(&config, &git_runner).select().await.unwrap();

    assert_eq!(files, vec![PathBuf::from("nb/analysis.ipynb")]);
}

#[tokio::test]
async fn test_latest_nothing_modified_leaves_history_alone() {
    let repo = create_temp_git_repo().await;
    let root = repo.path();

    std::fs::write(root.join("analysis.ipynb"), "{}").unwrap();
    commit_all(root, "Initial commit").await;
    std::fs::write(root.join("README.md"), "# notebooks").unwrap();
    commit_all(root, "Docs only").await;

    let env = env("latest");
    let outcome =
        ConversionPipeline::run_from_env(&env, root, false, SubprocessManager::production())
            .await
            .unwrap();

    assert_eq!(outcome, RunOutcome::NothingModified);
    let log = git(root, &["log", "--oneline"]).await;
    assert_eq!(log.lines().count(), 2);
    assert!(!root.join("autopy-lot").exists());
}

#[tokio::test]
async fn test_latest_keeps_non_ascii_and_spaced_names() {
    let repo = create_temp_git_repo().await;
    let root = repo.path();

    std::fs::write(root.join("README.md"), "# notebooks").unwrap();
    commit_all(root, "Initial commit").await;

    std::fs::write(root.join("café.ipynb"), "{}").unwrap();
    std::fs::write(root.join(" spaced name .ipynb"), "{}").unwrap();
    std::fs::write(root.join("plain.ipynb"), "{}").unwrap();
    commit_all(root, "Add notebooks").await;

    let env = env("latest");
    let config = ConfigResolver::new(&env)
        .with_working_dir(root)
        .resolve()
        .unwrap();
    let subprocess = SubprocessManager::production();
    let git_runner = subprocess.git();

    let mut files = FileSelector::new(&config, &git_runner).select().await.unwrap();
    files.sort();

    let mut expected: Vec<PathBuf> = [" spaced name .ipynb", "café.ipynb", "plain.ipynb"]
        .into_iter()
        .map(PathBuf::from)
        .collect();
    expected.sort();
    assert_eq!(files, expected);
}
