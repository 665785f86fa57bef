use crate::config::policy::ConfigError;
use crate::config::setup::{ConfigPrompter, SetupError};
use crate::git::Commit;
use crate::rules::{BranchRule, RuleError, Violation};

/// Identifier under which this rule appears in policy files
pub const RULE_NAME: &str = "force_push";

/// Prevents force pushing (non-linear history)
///
/// A proposed branch update is accepted only when the new tip is a
/// descendant of the branch's currently recorded tip, so no commit reachable
/// from the branch is ever discarded. `allow = true` is the explicit,
/// auditable bypass.
#[derive(Debug, Clone)]
pub struct ForcePushRule {
    allow: bool,
}

impl ForcePushRule {
    pub fn new(allow: bool) -> Self {
        Self { allow }
    }

    /// Parse the rule's options from the policy file
    ///
    /// Recognizes one key, `allow` (boolean, default false). Unrecognized
    /// keys are ignored for forward compatibility.
    pub fn from_options(options: &toml::Table) -> Result<Self, ConfigError> {
        let allow = match options.get("allow") {
            None => false,
            Some(toml::Value::Boolean(allow)) => *allow,
            Some(other) => {
                return Err(ConfigError::InvalidValue(format!(
                    "force_push: `allow` must be a boolean, got {}",
                    other.type_str()
                )));
            }
        };

        Ok(Self { allow })
    }

    /// Whether force pushing is permitted on branches under this rule
    pub fn allows_force_push(&self) -> bool {
        self.allow
    }

    /// Author a default config entry for this rule
    ///
    /// Asks one yes/no question and returns the option table to persist
    /// under the `force_push` key. Interactive policy authoring only; plays
    /// no part in validation.
    pub fn setup(prompter: &mut dyn ConfigPrompter) -> Result<toml::Table, SetupError> {
        let allow = prompter.confirm("Allow force pushing to this branch?")?;

        let mut options = toml::Table::new();
        options.insert("allow".to_string(), toml::Value::Boolean(allow));
        Ok(options)
    }
}

impl BranchRule for ForcePushRule {
    fn name(&self) -> &'static str {
        RULE_NAME
    }

    fn validate(&self, commit: Commit<'_>, branch: &str) -> Result<(), RuleError> {
        if self.allow {
            return Ok(());
        }

        let repo = commit.repository();
        let prev_tip = match repo.branch_tip(branch)? {
            Some(tip) => tip,
            // Brand-new branch: nothing recorded yet, nothing to discard
            None => return Ok(()),
        };

        if repo.is_ancestor(prev_tip, commit.id())? {
            Ok(())
        } else {
            Err(Violation::new(
                RULE_NAME,
                format!("commit is not a descendant of {}", prev_tip),
            )
            .into())
        }
    }
}
