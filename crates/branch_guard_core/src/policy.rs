//! Policy configuration builder.
//!
//! Turns operator-facing tunables into the wire-level [`ProtectionConfig`].
//! Validation is the caller's responsibility (run [`PolicySettings::validate`]
//! before building); the builder itself has no failure path.

use github_client::{ProtectionConfig, RequiredPullRequestReviews, RequiredStatusChecks};
use serde::{Deserialize, Serialize};

use crate::errors::Error;

#[cfg(test)]
#[path = "policy_tests.rs"]
mod tests;

/// Inclusive bounds GitHub accepts for the approving review count.
pub const MIN_REQUIRED_REVIEWERS: u32 = 1;
pub const MAX_REQUIRED_REVIEWERS: u32 = 6;

/// Tunable inputs for the standard protection policy.
///
/// `Default` produces the organization baseline: one required review, stale
/// reviews dismissed, admins included, force pushes and deletions blocked,
/// and no status-check gate.
///
/// # Examples
///
/// ```rust
/// use branch_guard_core::{build_protection_config, PolicySettings};
///
/// let settings = PolicySettings {
///     required_reviewers: 2,
///     required_status_checks: vec!["ci/build".to_string()],
///     ..Default::default()
/// };
/// settings.validate().unwrap();
/// let config = build_protection_config(&settings);
/// assert_eq!(config.required_pull_request_reviews.required_approving_review_count, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicySettings {
    /// Number of approving reviews required before merge (1-6).
    pub required_reviewers: u32,
    /// Require an approval from a designated code owner.
    pub require_code_owner_reviews: bool,
    /// Apply the rules to administrators as well.
    pub enforce_admins: bool,
    /// Permit force pushes to the protected branch.
    pub allow_force_pushes: bool,
    /// Permit deletion of the protected branch.
    pub allow_deletions: bool,
    /// Dismiss stale approvals when new commits arrive.
    pub dismiss_stale_reviews: bool,
    /// Status check contexts that must pass before merge. Empty disables the
    /// status-check gate entirely.
    pub required_status_checks: Vec<String>,
}

impl Default for PolicySettings {
    fn default() -> Self {
        Self {
            required_reviewers: 1,
            require_code_owner_reviews: false,
            enforce_admins: true,
            allow_force_pushes: false,
            allow_deletions: false,
            dismiss_stale_reviews: true,
            required_status_checks: Vec::new(),
        }
    }
}

impl PolicySettings {
    /// Checks that the settings are acceptable to the remote service.
    ///
    /// Must be run before [`build_protection_config`]; a failure here aborts
    /// the batch before any request is issued.
    ///
    /// # Errors
    /// Returns `Error::InvalidInput` when `required_reviewers` falls outside
    /// 1-6.
    pub fn validate(&self) -> Result<(), Error> {
        if !(MIN_REQUIRED_REVIEWERS..=MAX_REQUIRED_REVIEWERS).contains(&self.required_reviewers) {
            return Err(Error::InvalidInput(format!(
                "required reviewer count {} is out of range ({}-{})",
                self.required_reviewers, MIN_REQUIRED_REVIEWERS, MAX_REQUIRED_REVIEWERS
            )));
        }
        Ok(())
    }
}

/// Builds the wire configuration for a set of validated settings.
///
/// Pure and side-effect free. An empty `required_status_checks` list maps to
/// `None` (an explicit `null` on the wire), which disables status-check
/// gating; serializing an empty contexts object instead would tell the server
/// to gate merges on zero checks.
pub fn build_protection_config(settings: &PolicySettings) -> ProtectionConfig {
    let required_status_checks = if settings.required_status_checks.is_empty() {
        None
    } else {
        Some(RequiredStatusChecks {
            strict: true,
            contexts: settings.required_status_checks.clone(),
        })
    };

    ProtectionConfig {
        required_status_checks,
        enforce_admins: settings.enforce_admins,
        required_pull_request_reviews: RequiredPullRequestReviews {
            required_approving_review_count: settings.required_reviewers,
            dismiss_stale_reviews: settings.dismiss_stale_reviews,
            require_code_owner_reviews: settings.require_code_owner_reviews,
        },
        restrictions: None,
        allow_force_pushes: settings.allow_force_pushes,
        allow_deletions: settings.allow_deletions,
        block_creations: true,
        required_linear_history: true,
    }
}
