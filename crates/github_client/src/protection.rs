//! Branch protection wire types.
//!
//! This module contains the types that are serialized into the body of the
//! `PUT /repos/{owner}/{repo}/branches/{branch}/protection` request. The field
//! names are part of the GitHub REST API contract and must not be renamed.
//!
//! See: https://docs.github.com/en/rest/branches/branch-protection

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "protection_tests.rs"]
mod tests;

/// Complete branch protection configuration for one branch.
///
/// GitHub's update-branch-protection endpoint requires every top-level key to
/// be present; nullable settings are sent as explicit `null` rather than being
/// omitted. In particular `required_status_checks: null` disables status-check
/// gating, which is not the same thing as an empty `contexts` list.
///
/// # Examples
///
/// ```rust
/// use github_client::{ProtectionConfig, RequiredPullRequestReviews};
///
/// let config = ProtectionConfig {
///     required_status_checks: None,
///     enforce_admins: true,
///     required_pull_request_reviews: RequiredPullRequestReviews {
///         required_approving_review_count: 2,
///         dismiss_stale_reviews: true,
///         require_code_owner_reviews: false,
///     },
///     restrictions: None,
///     allow_force_pushes: false,
///     allow_deletions: false,
///     block_creations: true,
///     required_linear_history: true,
/// };
/// ```
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct ProtectionConfig {
    /// Status checks that must pass before merging. `None` disables the gate.
    pub required_status_checks: Option<RequiredStatusChecks>,

    /// Whether administrators are also bound by the protection rules.
    pub enforce_admins: bool,

    /// Pull request review requirements for the protected branch.
    pub required_pull_request_reviews: RequiredPullRequestReviews,

    /// Push restrictions limiting who may push to the branch. `None` means
    /// no restrictions beyond the other rules.
    pub restrictions: Option<Restrictions>,

    /// Whether force pushes to the branch are permitted.
    pub allow_force_pushes: bool,

    /// Whether the branch can be deleted.
    pub allow_deletions: bool,

    /// Whether creation of matching branches is blocked.
    pub block_creations: bool,

    /// Whether a linear commit history is required.
    pub required_linear_history: bool,
}

/// Required status check settings.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct RequiredStatusChecks {
    /// Require branches to be up to date before merging.
    pub strict: bool,
    /// Names of the status checks that must report success.
    pub contexts: Vec<String>,
}

/// Pull request review requirements.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct RequiredPullRequestReviews {
    /// Number of approving reviews required before merging (1-6).
    pub required_approving_review_count: u32,
    /// Dismiss stale approvals when new commits are pushed.
    pub dismiss_stale_reviews: bool,
    /// Require an approval from a designated code owner.
    pub require_code_owner_reviews: bool,
}

/// Actors allowed to push to the protected branch.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq, Default)]
pub struct Restrictions {
    /// User logins with push access.
    pub users: Vec<String>,
    /// Team slugs with push access.
    pub teams: Vec<String>,
    /// App slugs with push access.
    pub apps: Vec<String>,
}
