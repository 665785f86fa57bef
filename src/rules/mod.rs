pub mod force_push;

pub use force_push::ForcePushRule;

use crate::config::policy::{BranchPolicy, ConfigError};
use crate::error::GitError;
use crate::git::Commit;
use std::collections::HashMap;
use thiserror::Error;

/// A policy rejection produced by a rule
///
/// Constructed only when a proposed update fails a rule's check; the message
/// is what the operator sees and must be actionable on its own.
#[derive(Debug, Clone, Error)]
#[error("{rule}: {message}")]
pub struct Violation {
    pub rule: &'static str,
    pub message: String,
}

impl Violation {
    pub fn new(rule: &'static str, message: impl Into<String>) -> Self {
        Self {
            rule,
            message: message.into(),
        }
    }
}

/// Outcome of a single rule evaluation that did not accept
///
/// A `Violation` is the policy working as intended; a `Git` failure aborts
/// the whole validation pass. Audit output must keep the two apart: an
/// operator should never read "force-push detected" when the real cause was
/// a storage fault.
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("{0}")]
    Violation(#[from] Violation),

    #[error("git error: {0}")]
    Git(#[from] GitError),
}

/// A rule consulted for every proposed branch update
///
/// Rules are pure reads over the repository the commit belongs to; they never
/// move refs or create objects. The repository handle travels inside the
/// commit, so rules carry no ambient state and may be evaluated concurrently.
pub trait BranchRule: Send + Sync {
    /// Stable identifier used in policy files and audit output
    fn name(&self) -> &'static str;

    /// Accept (`Ok`) or reject (`RuleError::Violation`) one proposed update
    /// of `branch` to `commit`
    fn validate(&self, commit: Commit<'_>, branch: &str) -> Result<(), RuleError>;
}

/// Constructor turning a raw option table from the policy file into a rule
pub type RuleConstructor = fn(&toml::Table) -> Result<Box<dyn BranchRule>, ConfigError>;

/// Maps rule-name strings to constructors
pub struct RuleRegistry {
    constructors: HashMap<&'static str, RuleConstructor>,
}

impl RuleRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// Registry with all built-in rules
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(force_push::RULE_NAME, |options| {
            Ok(Box::new(ForcePushRule::from_options(options)?))
        });
        registry
    }

    pub fn register(&mut self, name: &'static str, constructor: RuleConstructor) {
        self.constructors.insert(name, constructor);
    }

    /// Construct a single rule from its raw options
    pub fn build(&self, name: &str, options: &toml::Table) -> Result<Box<dyn BranchRule>, ConfigError> {
        let constructor = self
            .constructors
            .get(name)
            .ok_or_else(|| ConfigError::UnknownRule(name.to_string()))?;
        constructor(options)
    }

    /// Construct the full rule set configured for one branch
    pub fn rule_set(&self, policy: &BranchPolicy) -> Result<RuleSet, ConfigError> {
        let mut rules = Vec::with_capacity(policy.rules.len());
        for (name, options) in &policy.rules {
            rules.push(self.build(name, options)?);
        }
        Ok(RuleSet { rules })
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// The rules configured for one branch, evaluated together
pub struct RuleSet {
    rules: Vec<Box<dyn BranchRule>>,
}

impl RuleSet {
    pub fn new(rules: Vec<Box<dyn BranchRule>>) -> Self {
        Self { rules }
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Evaluate every rule against one proposed update
    ///
    /// Violations are collected so the operator sees them all at once; the
    /// first git failure aborts the pass and propagates untouched.
    pub fn validate(&self, commit: Commit<'_>, branch: &str) -> Result<Vec<Violation>, GitError> {
        let mut violations = Vec::new();

        for rule in &self.rules {
            match rule.validate(commit, branch) {
                Ok(()) => {}
                Err(RuleError::Violation(violation)) => violations.push(violation),
                Err(RuleError::Git(e)) => return Err(e),
            }
        }

        Ok(violations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_unknown_rule() {
        let registry = RuleRegistry::builtin();
        let result = registry.build("no_such_rule", &toml::Table::new());

        assert!(matches!(result, Err(ConfigError::UnknownRule(_))));
    }

    #[test]
    fn test_default_registry_carries_builtin_rules() {
        let registry = RuleRegistry::default();
        assert!(registry.build("force_push", &toml::Table::new()).is_ok());
    }

    #[test]
    fn test_registry_builds_force_push() {
        let registry = RuleRegistry::builtin();
        let rule = registry.build("force_push", &toml::Table::new()).unwrap();

        assert_eq!(rule.name(), "force_push");
    }

    #[test]
    fn test_rule_set_from_branch_policy() {
        let registry = RuleRegistry::builtin();

        let mut rules = std::collections::BTreeMap::new();
        rules.insert("force_push".to_string(), toml::Table::new());
        let policy = BranchPolicy { rules };

        let set = registry.rule_set(&policy).unwrap();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_violation_display() {
        let violation = Violation::new("force_push", "commit is not a descendant of abc123");
        assert_eq!(
            violation.to_string(),
            "force_push: commit is not a descendant of abc123"
        );
    }
}
