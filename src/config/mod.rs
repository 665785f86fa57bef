pub mod policy;
pub mod setup;

pub use policy::{BranchPolicy, ConfigError, PolicyConfig, POLICY_FILE};
pub use setup::{ConfigPrompter, SetupError, TerminalPrompter};
