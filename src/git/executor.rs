use crate::error::{GitError, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Result of executing a git command
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    pub success: bool,
}

/// Executes git commands within a repository
#[derive(Debug)]
pub struct GitExecutor {
    repo_path: PathBuf,
}

impl GitExecutor {
    /// Create a new GitExecutor for the given repository path
    pub fn new<P: AsRef<Path>>(repo_path: P) -> Self {
        Self {
            repo_path: repo_path.as_ref().to_path_buf(),
        }
    }

    /// Execute a git command, treating a non-zero exit as an error
    ///
    /// The argument slice should not include the "git" prefix
    /// Example: executor.execute(&["rev-parse", "HEAD"])
    pub fn execute(&self, args: &[&str]) -> Result<CommandOutput> {
        let output = self.query(args)?;

        if !output.success {
            return Err(GitError::CommandFailed(format!(
                "Command 'git {}' failed with exit code {}: {}",
                args.join(" "),
                output.exit_code,
                output.stderr.trim()
            )));
        }

        Ok(output)
    }

    /// Execute a git command and return the raw outcome, leaving the exit
    /// status to the caller
    ///
    /// Some queries answer through their exit code (`merge-base
    /// --is-ancestor` exits 1 for "not an ancestor"), so a non-zero exit is
    /// not an error here. Only a failure to run git at all is.
    pub fn query(&self, args: &[&str]) -> Result<CommandOutput> {
        if args.is_empty() {
            return Err(GitError::CommandFailed("Empty command".to_string()));
        }

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.repo_path)
            .output()
            .map_err(|e| GitError::CommandFailed(format!("Failed to execute git: {}", e)))?;

        Ok(Self::process_output(output))
    }

    /// Process command output into CommandOutput struct
    fn process_output(output: Output) -> CommandOutput {
        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        let exit_code = output.status.code().unwrap_or(-1);
        let success = output.status.success();

        CommandOutput {
            stdout,
            stderr,
            exit_code,
            success,
        }
    }

    /// Get the repository path this executor runs in
    pub fn repo_path(&self) -> &Path {
        &self.repo_path
    }
}
