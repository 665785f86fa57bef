pub mod executor;
pub mod oid;
pub mod repository;
pub mod version;

// Re-export commonly used types
pub use executor::{CommandOutput, GitExecutor};
pub use oid::{Commit, CommitId};
pub use repository::Repository;
pub use version::GitVersion;
