use crate::error::{GitError, Result};
use crate::git::executor::GitExecutor;
use crate::git::oid::{Commit, CommitId};
use std::env;
use std::path::{Path, PathBuf};

/// Read-only handle to a git repository
///
/// Every query shells out to the git binary; nothing here creates objects or
/// moves refs. Branch pointer updates belong to whoever accepted them.
#[derive(Debug)]
pub struct Repository {
    path: PathBuf,
    executor: GitExecutor,
}

impl Repository {
    /// Detect git repository from current working directory
    pub fn discover() -> Result<Self> {
        let current_dir = env::current_dir().map_err(GitError::IoError)?;

        Self::discover_from(&current_dir)
    }

    /// Detect git repository starting from a specific directory
    pub fn discover_from<P: AsRef<Path>>(start_path: P) -> Result<Self> {
        let mut current = start_path.as_ref().to_path_buf();

        loop {
            let git_dir = current.join(".git");
            if git_dir.exists() {
                return Ok(Self::new(current));
            }

            // Move up to parent directory
            if !current.pop() {
                return Err(GitError::NotARepository);
            }
        }
    }

    /// Create a Repository for a known git directory
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let executor = GitExecutor::new(&path);

        Self { path, executor }
    }

    /// Get the repository path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Look up the currently recorded tip of a local branch
    ///
    /// A branch with no recorded tip is `Ok(None)`, not an error; brand-new
    /// branches have no history to protect. `rev-parse --verify --quiet`
    /// exits 1 for a missing ref; any other non-zero exit means the
    /// repository state could not be read and propagates as an error. A
    /// storage fault must never look like a brand-new branch.
    pub fn branch_tip(&self, branch: &str) -> Result<Option<CommitId>> {
        let refname = format!("refs/heads/{}", branch);
        let output = self
            .executor
            .query(&["rev-parse", "--verify", "--quiet", &refname])?;

        match output.exit_code {
            0 => CommitId::from_hex(&output.stdout).map(Some),
            1 => Ok(None),
            _ => {
                let stderr = output.stderr.trim();
                if stderr.contains("Not a valid") || stderr.contains("bad revision") {
                    Err(GitError::UnknownObject(stderr.to_string()))
                } else {
                    Err(GitError::CommandFailed(format!(
                        "rev-parse --verify {} exited {}: {}",
                        refname, output.exit_code, stderr
                    )))
                }
            }
        }
    }

    /// Resolve a commit id to a commit known to this repository
    ///
    /// Fails with `UnknownObject` when the id does not name a commit present
    /// in object storage.
    pub fn find_commit(&self, id: CommitId) -> Result<Commit<'_>> {
        let spec = format!("{}^{{commit}}", id);
        let output = self.executor.query(&["cat-file", "-e", &spec])?;

        if !output.success {
            return Err(GitError::UnknownObject(id.to_hex()));
        }

        Ok(Commit::new(id, self))
    }

    /// Resolve a revision expression (branch name, hash, `HEAD~2`, ...) to a
    /// commit in this repository
    pub fn rev_parse(&self, rev: &str) -> Result<Commit<'_>> {
        let spec = format!("{}^{{commit}}", rev);
        let output = self.executor.query(&["rev-parse", "--verify", "--quiet", &spec])?;

        if !output.success {
            return Err(GitError::UnknownObject(rev.to_string()));
        }

        let id = CommitId::from_hex(&output.stdout)?;
        Ok(Commit::new(id, self))
    }

    /// Whether `ancestor` is reachable from `descendant` by parent links
    ///
    /// Reflexive: every commit is its own ancestor. Delegates to
    /// `git merge-base --is-ancestor`, which answers through its exit code:
    /// 0 means ancestor, 1 means not an ancestor. Any other exit is an
    /// infrastructure failure and propagates as an error; a policy caller
    /// must never read a storage fault as "no".
    pub fn is_ancestor(&self, ancestor: CommitId, descendant: CommitId) -> Result<bool> {
        let ancestor_hex = ancestor.to_hex();
        let descendant_hex = descendant.to_hex();
        let output = self.executor.query(&[
            "merge-base",
            "--is-ancestor",
            &ancestor_hex,
            &descendant_hex,
        ])?;

        match output.exit_code {
            0 => Ok(true),
            1 => Ok(false),
            _ => {
                let stderr = output.stderr.trim();
                if stderr.contains("Not a valid") || stderr.contains("bad revision") {
                    Err(GitError::UnknownObject(stderr.to_string()))
                } else {
                    Err(GitError::CommandFailed(format!(
                        "merge-base --is-ancestor exited {}: {}",
                        output.exit_code, stderr
                    )))
                }
            }
        }
    }

    /// Get the git executor for this repository
    pub fn executor(&self) -> &GitExecutor {
        &self.executor
    }
}
