use crate::error::{GitError, Result};
use crate::git::repository::Repository;
use std::fmt;
use std::str::FromStr;

/// Length of a SHA-1 object id in bytes
pub const ID_LEN: usize = 20;

/// A fixed-length binary commit hash
///
/// Equality and hashing are over the raw bytes; the hex form exists only at
/// the git subprocess boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommitId([u8; ID_LEN]);

impl CommitId {
    /// Construct from raw hash bytes
    pub fn from_bytes(bytes: [u8; ID_LEN]) -> Self {
        Self(bytes)
    }

    /// Parse a 40-character lowercase/uppercase hex string
    pub fn from_hex(hex: &str) -> Result<Self> {
        let hex = hex.trim();
        if hex.len() != ID_LEN * 2 {
            return Err(GitError::ParseError(format!(
                "Invalid object id length: {}",
                hex
            )));
        }

        // Work on raw bytes so multi-byte input cannot slice mid-character
        let mut bytes = [0u8; ID_LEN];
        for (byte, pair) in bytes.iter_mut().zip(hex.as_bytes().chunks_exact(2)) {
            let hi = hex_digit(pair[0])?;
            let lo = hex_digit(pair[1])?;
            *byte = hi << 4 | lo;
        }

        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; ID_LEN] {
        &self.0
    }

    /// Lowercase hex form as passed to git on the command line
    pub fn to_hex(&self) -> String {
        self.to_string()
    }
}

fn hex_digit(byte: u8) -> Result<u8> {
    match byte {
        b'0'..=b'9' => Ok(byte - b'0'),
        b'a'..=b'f' => Ok(byte - b'a' + 10),
        b'A'..=b'F' => Ok(byte - b'A' + 10),
        _ => Err(GitError::ParseError(format!(
            "Invalid hex digit in object id: {}",
            byte as char
        ))),
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl FromStr for CommitId {
    type Err = GitError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

/// A commit identifier tied to the repository that can resolve its history
///
/// Cheap to copy: a hash plus a borrowed repository handle. Two commits are
/// equal iff their hashes are equal.
#[derive(Debug, Clone, Copy)]
pub struct Commit<'r> {
    id: CommitId,
    repo: &'r Repository,
}

impl<'r> Commit<'r> {
    pub fn new(id: CommitId, repo: &'r Repository) -> Self {
        Self { id, repo }
    }

    pub fn id(&self) -> CommitId {
        self.id
    }

    pub fn repository(&self) -> &'r Repository {
        self.repo
    }

    /// Whether this commit is an ancestor of `other` (reflexive)
    pub fn is_ancestor_of(&self, other: &Commit<'_>) -> Result<bool> {
        self.repo.is_ancestor(self.id, other.id)
    }
}

impl PartialEq for Commit<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Commit<'_> {}

impl fmt::Display for Commit<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}
