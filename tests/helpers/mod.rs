use gitward::CommitId;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

/// Helper to create a test git repository
pub fn create_test_repo() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let repo_path = temp_dir.path().to_path_buf();

    // Initialize git repo
    Command::new("git")
        .args(["init", "-b", "main"])
        .current_dir(&repo_path)
        .output()
        .expect("Failed to init git repo");

    // Configure git
    Command::new("git")
        .args(["config", "user.name", "Test User"])
        .current_dir(&repo_path)
        .output()
        .expect("Failed to set git user.name");

    Command::new("git")
        .args(["config", "user.email", "test@example.com"])
        .current_dir(&repo_path)
        .output()
        .expect("Failed to set git user.email");

    (temp_dir, repo_path)
}

/// Helper to create a commit on the current branch, returning its id
pub fn create_commit(repo_path: &PathBuf, file: &str, content: &str, message: &str) -> CommitId {
    let file_path = repo_path.join(file);
    fs::write(&file_path, content).expect("Failed to write file");

    Command::new("git")
        .args(["add", file])
        .current_dir(repo_path)
        .output()
        .expect("Failed to add file");

    Command::new("git")
        .args(["commit", "-m", message])
        .current_dir(repo_path)
        .output()
        .expect("Failed to commit");

    head_commit(repo_path)
}

/// Helper to read the current HEAD commit id
pub fn head_commit(repo_path: &PathBuf) -> CommitId {
    let output = Command::new("git")
        .args(["rev-parse", "HEAD"])
        .current_dir(repo_path)
        .output()
        .expect("Failed to rev-parse HEAD");

    CommitId::from_hex(&String::from_utf8_lossy(&output.stdout))
        .expect("Failed to parse HEAD commit id")
}

/// Helper to create and check out a branch, optionally from a start point
pub fn checkout_new_branch(repo_path: &PathBuf, name: &str, start: Option<&CommitId>) {
    let mut args = vec!["checkout".to_string(), "-b".to_string(), name.to_string()];
    if let Some(start) = start {
        args.push(start.to_hex());
    }

    Command::new("git")
        .args(&args)
        .current_dir(repo_path)
        .output()
        .expect("Failed to create branch");
}
