//! # BranchGuard Core
//!
//! This crate provides the batch enforcement engine for BranchGuard, a tool
//! that applies a standardized branch protection policy across a set of
//! GitHub repositories.
//!
//! ## Overview
//!
//! One enforcement run walks an ordered list of repository targets:
//! 1. Validate the policy settings and targets up front
//! 2. Build the protection configuration once
//! 3. Apply it to each target's branch, one request at a time
//! 4. Classify failures and record every outcome in a [`BatchRun`]
//! 5. Persist an audit log and CSV export via [`report::RunReporter`]
//!
//! A failed target never aborts the batch; the run continues and the overall
//! status degrades to [`BatchStatus::PartialFailure`]. Pre-batch validation
//! problems are the only hard errors.
//!
//! ## Examples
//!
//! ```no_run
//! use branch_guard_core::{
//!     enforce_protection, BatchOptions, PolicySettings, RepositoryTarget,
//! };
//! use github_client::GitHubClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GitHubClient::for_token("ghp_...", "https://api.github.com")?;
//! let targets = vec![
//!     RepositoryTarget::parse("acme/repo1")?,
//!     RepositoryTarget::parse("acme/repo2")?,
//! ];
//! let settings = PolicySettings {
//!     required_reviewers: 2,
//!     ..Default::default()
//! };
//! let options = BatchOptions::new("main");
//!
//! let run = enforce_protection(&client, &targets, &settings, &options, |result| {
//!     println!("{}@{}: {:?}", result.target, result.branch, result.outcome);
//! })
//! .await?;
//!
//! println!(
//!     "{} succeeded, {} failed",
//!     run.success_count(),
//!     run.failure_count()
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Concurrency
//!
//! Execution is deliberately sequential: GitHub rate-limits administrative
//! writes per credential, and concurrent protection updates to the same kind
//! of resource do not commute safely. A fixed delay between requests is the
//! only rate limiting; there is no retry and no per-call timeout.

use std::time::Duration;

use tracing::{info, warn};

use github_client::{AppliedProtection, BranchProtectionClient, EnforcementMode};

mod errors;
pub use errors::Error;

/// Batch result accumulation ([`BatchRun`], per-target outcomes).
pub mod batch;

/// Transport failure classification.
pub mod classify;

/// Policy tunables and the configuration builder.
pub mod policy;

/// Run log and CSV reporting.
pub mod report;

/// Target and request domain types.
pub mod request;

pub use batch::{BatchRun, BatchStatus, ProtectionOutcome, ProtectionResult};
pub use classify::{classify, Classification, ErrorKind};
pub use policy::{
    build_protection_config, PolicySettings, MAX_REQUIRED_REVIEWERS, MIN_REQUIRED_REVIEWERS,
};
pub use report::{LogLevel, RunReporter};
pub use request::{ProtectionRequest, RepositoryTarget};

// Reference the tests module in the separate file
#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Default pause between consecutive requests.
pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_millis(500);

/// Per-run parameters shared by every target.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Branch the policy is applied to on every target.
    pub branch: String,
    /// Apply for real or simulate.
    pub mode: EnforcementMode,
    /// Fixed pause inserted between consecutive requests.
    pub delay: Duration,
}

impl BatchOptions {
    /// Options for a real apply run against `branch` with the default delay.
    pub fn new(branch: impl Into<String>) -> Self {
        Self {
            branch: branch.into(),
            mode: EnforcementMode::Apply,
            delay: DEFAULT_REQUEST_DELAY,
        }
    }
}

/// Runs one enforcement batch over `targets` in input order.
///
/// The configuration is built once from `settings` and applied to every
/// target's branch through `client`, one request at a time with
/// `options.delay` between requests. API failures are classified and
/// recorded as `Failed` results; the batch always runs to the last target.
/// `on_result` is invoked once per target as its outcome is known, in input
/// order, so callers can stream progress to a terminal or reporter.
///
/// # Errors
///
/// Returns `Error::InvalidInput` before any request is issued when the
/// settings are out of range, `targets` is empty, or the branch name is
/// blank. Per-target API failures are not errors; they surface in the
/// returned [`BatchRun`].
pub async fn enforce_protection<C, F>(
    client: &C,
    targets: &[RepositoryTarget],
    settings: &PolicySettings,
    options: &BatchOptions,
    mut on_result: F,
) -> Result<BatchRun, Error>
where
    C: BranchProtectionClient + ?Sized,
    F: FnMut(&ProtectionResult),
{
    settings.validate()?;
    if targets.is_empty() {
        return Err(Error::InvalidInput(
            "no repository targets were provided".to_string(),
        ));
    }
    if options.branch.trim().is_empty() {
        return Err(Error::InvalidInput(
            "branch name must not be empty".to_string(),
        ));
    }

    let config = build_protection_config(settings);
    let mut run = BatchRun::new();

    info!(
        target_count = targets.len(),
        branch = %options.branch,
        mode = ?options.mode,
        "Starting branch protection batch"
    );

    for (index, target) in targets.iter().enumerate() {
        let request = ProtectionRequest {
            target: target.clone(),
            branch: options.branch.clone(),
            config: config.clone(),
            mode: options.mode,
        };

        let outcome = match client
            .apply_branch_protection(
                request.target.owner(),
                request.target.name(),
                &request.branch,
                &request.config,
                request.mode,
            )
            .await
        {
            Ok(AppliedProtection::Applied { url }) => {
                info!(target = %request.target, url = %url, "Protection applied");
                ProtectionOutcome::Succeeded { url }
            }
            Ok(AppliedProtection::Skipped) => {
                info!(target = %request.target, "Skipped (dry-run)");
                ProtectionOutcome::Skipped
            }
            Err(github_client::Error::Api { status, message }) => {
                let classification = classify(status);
                warn!(
                    target = %request.target,
                    status,
                    kind = %classification.kind,
                    "Protection update failed, continuing with remaining targets"
                );
                ProtectionOutcome::Failed {
                    kind: classification.kind,
                    message,
                    suggestion: classification.suggestion.to_string(),
                }
            }
            Err(other) => {
                warn!(
                    target = %request.target,
                    error = %other,
                    "Transport failure, continuing with remaining targets"
                );
                ProtectionOutcome::Failed {
                    kind: ErrorKind::Unexpected,
                    message: other.to_string(),
                    suggestion: classify(0).suggestion.to_string(),
                }
            }
        };

        let result = ProtectionResult {
            target: request.target,
            branch: request.branch,
            outcome,
        };
        on_result(&result);
        run.push(result);

        // Crude rate limiting between requests; nothing to pace after the
        // last target.
        if index + 1 < targets.len() && !options.delay.is_zero() {
            tokio::time::sleep(options.delay).await;
        }
    }

    info!(
        succeeded = run.success_count(),
        failed = run.failure_count(),
        skipped = run.skipped_count(),
        "Branch protection batch complete"
    );

    Ok(run)
}
