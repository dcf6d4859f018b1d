//! Protection request domain types.
//!
//! Types identifying what a single enforcement request applies to: a
//! validated repository target, the branch, the configuration, and the
//! execution mode.

use std::fmt;
use std::sync::OnceLock;

use github_client::{EnforcementMode, ProtectionConfig};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::Error;

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;

/// Pattern both segments of an `owner/name` pair must match.
fn segment_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[\w.-]+$").expect("segment pattern is valid"))
}

/// A validated `owner/name` repository reference.
///
/// Both segments are non-empty and restricted to word characters, periods,
/// and hyphens, so a target can always be spliced into an API path without
/// further escaping.
///
/// # Examples
///
/// ```rust
/// use branch_guard_core::RepositoryTarget;
///
/// let target = RepositoryTarget::parse("acme/repo1").unwrap();
/// assert_eq!(target.owner(), "acme");
/// assert_eq!(target.name(), "repo1");
/// assert!(RepositoryTarget::parse("acme").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepositoryTarget {
    owner: String,
    name: String,
}

impl RepositoryTarget {
    /// Creates a target from already-split owner and name segments.
    ///
    /// # Errors
    /// Returns `Error::InvalidInput` if either segment is empty or contains
    /// characters outside `[\w.-]`.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Result<Self, Error> {
        let owner = owner.into();
        let name = name.into();

        if !segment_pattern().is_match(&owner) {
            return Err(Error::InvalidInput(format!(
                "repository owner '{}' must be non-empty and match [\\w.-]+",
                owner
            )));
        }
        if !segment_pattern().is_match(&name) {
            return Err(Error::InvalidInput(format!(
                "repository name '{}' must be non-empty and match [\\w.-]+",
                name
            )));
        }

        Ok(Self { owner, name })
    }

    /// Parses an `owner/name` string.
    ///
    /// # Errors
    /// Returns `Error::InvalidInput` if the string does not split into
    /// exactly two valid segments.
    pub fn parse(value: &str) -> Result<Self, Error> {
        match value.split_once('/') {
            Some((owner, name)) if !name.contains('/') => Self::new(owner, name),
            _ => Err(Error::InvalidInput(format!(
                "repository '{}' is not in owner/name form",
                value
            ))),
        }
    }

    /// The owner (user or organization) segment.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// The repository name segment.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for RepositoryTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// One unit of enforcement work: apply `config` to `branch` of `target`.
///
/// Requests are built by the orchestrator, one per target, and consumed
/// exactly once.
#[derive(Debug, Clone)]
pub struct ProtectionRequest {
    /// Repository the configuration is applied to.
    pub target: RepositoryTarget,
    /// Branch the configuration is applied to.
    pub branch: String,
    /// The protection configuration, shared by every request in a batch.
    pub config: ProtectionConfig,
    /// Apply for real or simulate.
    pub mode: EnforcementMode,
}
