use crate::git::Repository;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name of the policy document at the repository root
pub const POLICY_FILE: &str = ".gitward.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read policy file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse policy file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize policy: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Unknown rule: {0}")]
    UnknownRule(String),

    #[error("Invalid config value: {0}")]
    InvalidValue(String),
}

/// The persisted branch-protection policy for one repository
///
/// ```toml
/// [branches."main".rules.force_push]
/// allow = false
/// ```
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct PolicyConfig {
    #[serde(default)]
    pub branches: BTreeMap<String, BranchPolicy>,
}

/// Rules configured for one branch, keyed by rule name
///
/// Option tables stay raw here; each rule parses its own shape when the
/// registry constructs it.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct BranchPolicy {
    #[serde(default)]
    pub rules: BTreeMap<String, toml::Table>,
}

impl PolicyConfig {
    /// Policy file path for a repository
    pub fn path_for(repo: &Repository) -> PathBuf {
        repo.path().join(POLICY_FILE)
    }

    /// Load the policy document from a file
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path.as_ref())?;
        let config: PolicyConfig = toml::from_str(&contents)?;

        Ok(config)
    }

    /// Load a repository's policy; a missing file is an empty policy
    pub fn load_for(repo: &Repository) -> Result<Self, ConfigError> {
        let path = Self::path_for(repo);
        if !path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(path)
    }

    /// Save the policy document to a file
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path.as_ref(), contents)?;

        Ok(())
    }

    /// Rules configured for a branch, if any
    pub fn branch(&self, name: &str) -> Option<&BranchPolicy> {
        self.branches.get(name)
    }

    /// Insert or replace one rule's options for a branch
    pub fn set_rule(&mut self, branch: &str, rule: &str, options: toml::Table) {
        self.branches
            .entry(branch.to_string())
            .or_default()
            .rules
            .insert(rule.to_string(), options);
    }
}
