pub mod audit;
pub mod config;
pub mod error;
pub mod git;
pub mod rules;

// Re-export commonly used types for convenience
pub use audit::AuditLogger;
pub use config::{ConfigPrompter, PolicyConfig, TerminalPrompter};
pub use error::{AppError, AppResult, GitError, Result};
pub use git::{Commit, CommitId, GitVersion, Repository};
pub use rules::{BranchRule, ForcePushRule, RuleError, RuleRegistry, RuleSet, Violation};
