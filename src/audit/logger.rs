use crate::error::GitError;
use crate::git::{CommitId, Repository};
use crate::rules::Violation;
use chrono::Utc;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

const MAX_LOG_SIZE: u64 = 10 * 1024 * 1024; // 10MB

/// Append-only log of validation decisions
///
/// Every decision is tagged ACCEPT, REJECT, or ERROR. REJECT is the policy
/// working as intended; ERROR is an infrastructure fault that aborted the
/// pass. The two must stay distinguishable when reading the log.
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    /// Create an AuditLogger at the repository's default log path
    pub fn for_repository(repo: &Repository) -> std::io::Result<Self> {
        Self::with_path(repo.path().join(".git").join("gitward").join("audit.log"))
    }

    /// Create an AuditLogger with a custom log path
    pub fn with_path<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let log_path = path.as_ref().to_path_buf();

        // Ensure directory exists
        if let Some(parent) = log_path.parent() {
            fs::create_dir_all(parent)?;
        }

        Ok(Self { log_path })
    }

    /// Record an accepted update
    pub fn log_accept(&self, branch: &str, commit: CommitId) -> std::io::Result<()> {
        self.append(&format!("[ACCEPT] branch={} commit={}", branch, commit))
    }

    /// Record a policy rejection with every violated rule
    pub fn log_violations(
        &self,
        branch: &str,
        commit: CommitId,
        violations: &[Violation],
    ) -> std::io::Result<()> {
        for violation in violations {
            self.append(&format!(
                "[REJECT] branch={} commit={} rule={} reason=\"{}\"",
                branch, commit, violation.rule, violation.message
            ))?;
        }
        Ok(())
    }

    /// Record an aborted validation pass
    pub fn log_failure(
        &self,
        branch: &str,
        commit: CommitId,
        error: &GitError,
    ) -> std::io::Result<()> {
        self.append(&format!(
            "[ERROR] branch={} commit={} cause=\"{}\"",
            branch, commit, error
        ))
    }

    fn append(&self, entry: &str) -> std::io::Result<()> {
        // Check and rotate log if needed
        self.rotate_if_needed()?;

        let timestamp = Utc::now().to_rfc3339();
        let line = format!("[{}] {}\n", timestamp, entry);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)?;

        file.write_all(line.as_bytes())?;
        file.flush()?;

        Ok(())
    }

    /// Rotate log file if it exceeds MAX_LOG_SIZE
    fn rotate_if_needed(&self) -> std::io::Result<()> {
        if !self.log_path.exists() {
            return Ok(());
        }

        let metadata = fs::metadata(&self.log_path)?;
        if metadata.len() > MAX_LOG_SIZE {
            // Rotate: audit.log -> audit.log.1
            let backup_path = self.log_path.with_extension("log.1");
            fs::rename(&self.log_path, backup_path)?;
        }

        Ok(())
    }

    /// Get the path to the log file
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_commit() -> CommitId {
        CommitId::from_bytes([0xc0; 20])
    }

    #[test]
    fn test_create_logger() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("test.log");

        let logger = AuditLogger::with_path(&log_path).unwrap();
        assert_eq!(logger.log_path(), log_path);
    }

    #[test]
    fn test_log_accept() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("test.log");
        let logger = AuditLogger::with_path(&log_path).unwrap();

        logger.log_accept("main", test_commit()).unwrap();

        let content = fs::read_to_string(&log_path).unwrap();
        assert!(content.contains("[ACCEPT]"));
        assert!(content.contains("branch=main"));
        assert!(content.contains(&test_commit().to_hex()));
    }

    #[test]
    fn test_log_violations_one_line_per_rule() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("test.log");
        let logger = AuditLogger::with_path(&log_path).unwrap();

        let violations = vec![
            Violation::new("force_push", "commit is not a descendant of abc"),
            Violation::new("other_rule", "something else"),
        ];
        logger.log_violations("main", test_commit(), &violations).unwrap();

        let content = fs::read_to_string(&log_path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("[REJECT]"));
        assert!(lines[0].contains("rule=force_push"));
        assert!(lines[1].contains("rule=other_rule"));
    }

    #[test]
    fn test_log_failure_tagged_distinctly() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("test.log");
        let logger = AuditLogger::with_path(&log_path).unwrap();

        let error = GitError::UnknownObject("deadbeef".to_string());
        logger.log_failure("main", test_commit(), &error).unwrap();

        let content = fs::read_to_string(&log_path).unwrap();
        assert!(content.contains("[ERROR]"));
        assert!(content.contains("deadbeef"));
        assert!(!content.contains("[REJECT]"));
    }

    #[test]
    fn test_log_rotation() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("test.log");
        let logger = AuditLogger::with_path(&log_path).unwrap();

        // Write a large entry to trigger rotation on the next append
        let large_reason = "x".repeat(MAX_LOG_SIZE as usize + 1);
        let violations = vec![Violation::new("force_push", large_reason)];
        logger.log_violations("main", test_commit(), &violations).unwrap();

        logger.log_accept("main", test_commit()).unwrap();

        let backup_path = log_path.with_extension("log.1");
        assert!(backup_path.exists());

        assert!(log_path.exists());
        let metadata = fs::metadata(&log_path).unwrap();
        assert!(metadata.len() < MAX_LOG_SIZE);
    }
}
