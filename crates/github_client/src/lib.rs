//! Crate for applying branch protection through the GitHub REST API.
//!
//! This crate provides a client for making authenticated requests to GitHub
//! using a personal access token, along with the wire types for the branch
//! protection endpoint. One client call applies one protection configuration
//! to one repository branch; batching and failure classification live in the
//! caller.

use async_trait::async_trait;
use http::header::{HeaderName, USER_AGENT};
use octocrab::{Octocrab, Result as OctocrabResult};
use tracing::{debug, error, info, instrument};

pub mod errors;
pub use errors::Error;

pub mod protection;
pub use protection::{
    ProtectionConfig, RequiredPullRequestReviews, RequiredStatusChecks, Restrictions,
};

// Reference the tests module in the separate file
#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// API version sent with every request for deterministic server behavior.
const GITHUB_API_VERSION: &str = "2022-11-28";

/// Execution mode for a protection request.
///
/// In `DryRun` mode the client performs no network call and reports the
/// request as skipped, allowing operators to preview a batch before applying
/// it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnforcementMode {
    /// Write the configuration to the remote repository.
    Apply,
    /// Compute the request but do not touch the remote repository.
    DryRun,
}

/// Outcome of a single client call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppliedProtection {
    /// The configuration was written; `url` is the protection resource.
    Applied {
        /// URL of the branch protection resource.
        url: String,
    },
    /// Dry-run mode, nothing was sent to the remote service.
    Skipped,
}

/// Trait for applying branch protection to a repository branch.
///
/// The batch orchestrator depends on this trait rather than on a concrete
/// client so that it can be tested without a network.
#[async_trait]
pub trait BranchProtectionClient: Send + Sync {
    /// Applies `config` to `branch` of `owner/repo`, or skips it in dry-run
    /// mode.
    ///
    /// Applying the same configuration twice converges to the same remote
    /// state, so repeated invocations are safe.
    ///
    /// # Errors
    ///
    /// Returns `Error::Api` when GitHub rejects the request (the status code
    /// and raw message are preserved for classification) and
    /// `Error::Transport` when no response was received. The client never
    /// retries.
    async fn apply_branch_protection(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        config: &ProtectionConfig,
        mode: EnforcementMode,
    ) -> Result<AppliedProtection, Error>;
}

/// A client for the GitHub API, authenticated with a personal access token.
#[derive(Debug)]
pub struct GitHubClient {
    client: Octocrab,
    api_base: String,
}

impl GitHubClient {
    /// Creates a client authenticated with a personal access token.
    ///
    /// The client sends bearer authorization, GitHub's versioned JSON accept
    /// header, the `X-GitHub-Api-Version` header, and an identifying user
    /// agent on every request.
    ///
    /// # Arguments
    ///
    /// * `token` - Personal access token with admin permission on the target
    ///   repositories.
    /// * `api_base` - Base URI of the API, `https://api.github.com` for
    ///   github.com.
    ///
    /// # Errors
    ///
    /// Returns `Error::ClientBuild` if `api_base` cannot be parsed or the
    /// underlying client cannot be constructed.
    #[instrument(skip(token))]
    pub fn for_token(token: &str, api_base: &str) -> Result<Self, Error> {
        let api_base = api_base.trim_end_matches('/').to_string();

        let client = Octocrab::builder()
            .personal_token(token.to_string())
            .base_uri(api_base.as_str())
            .map_err(|e| {
                error!(api_base = %api_base, error = %e, "Invalid API base URI");
                Error::ClientBuild(format!("Invalid API base URI '{}': {}", api_base, e))
            })?
            .add_header(
                HeaderName::from_static("x-github-api-version"),
                GITHUB_API_VERSION.to_string(),
            )
            .add_header(
                USER_AGENT,
                format!("branch-guard/{}", env!("CARGO_PKG_VERSION")),
            )
            .build()
            .map_err(|e| {
                error!(error = %e, "Failed to build Octocrab client");
                Error::ClientBuild(e.to_string())
            })?;

        Ok(Self { client, api_base })
    }

    /// Wraps an already-configured `Octocrab` instance.
    pub fn new(client: Octocrab, api_base: impl Into<String>) -> Self {
        Self {
            client,
            api_base: api_base.into(),
        }
    }
}

#[async_trait]
impl BranchProtectionClient for GitHubClient {
    /// Applies branch protection via
    /// `PUT /repos/{owner}/{repo}/branches/{branch}/protection`.
    ///
    /// In `DryRun` mode no request is issued and `AppliedProtection::Skipped`
    /// is returned immediately.
    #[instrument(skip(self, config), fields(owner = %owner, repo = %repo, branch = %branch, mode = ?mode))]
    async fn apply_branch_protection(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        config: &ProtectionConfig,
        mode: EnforcementMode,
    ) -> Result<AppliedProtection, Error> {
        if mode == EnforcementMode::DryRun {
            info!(
                owner = owner,
                repo = repo,
                branch = branch,
                "Dry-run mode, skipping branch protection update"
            );
            return Ok(AppliedProtection::Skipped);
        }

        let path = format!(
            "/repos/{}/{}/branches/{}/protection",
            owner, repo, branch
        );
        debug!(path = %path, "Sending branch protection update");

        let response: OctocrabResult<serde_json::Value> =
            self.client.put(&path, Some(config)).await;

        match response {
            Ok(body) => {
                // GitHub echoes the protection resource; fall back to the
                // request URL if the body omits it.
                let url = body
                    .get("url")
                    .and_then(|v| v.as_str())
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("{}{}", self.api_base, path));

                info!(
                    owner = owner,
                    repo = repo,
                    branch = branch,
                    url = %url,
                    "Branch protection applied"
                );
                Ok(AppliedProtection::Applied { url })
            }
            Err(e) => Err(map_octocrab_error("Failed to apply branch protection", e)),
        }
    }
}

/// Converts an octocrab error into this crate's error type, logging it.
///
/// API responses keep their status code and message so callers can classify
/// the failure; everything else becomes a transport error.
fn map_octocrab_error(message: &str, e: octocrab::Error) -> Error {
    match e {
        octocrab::Error::GitHub { source, backtrace } => {
            error!(
                status = source.status_code.as_u16(),
                error_message = source.message,
                backtrace = backtrace.to_string(),
                "{}. Received an error from GitHub",
                message
            );
            Error::Api {
                status: source.status_code.as_u16(),
                message: source.message.clone(),
            }
        }
        octocrab::Error::UriParse { source, backtrace } => {
            error!(
                error_message = source.to_string(),
                backtrace = backtrace.to_string(),
                "{}. Failed to parse URI.",
                message
            );
            Error::Transport(source.to_string())
        }
        octocrab::Error::Uri { source, backtrace } => {
            error!(
                error_message = source.to_string(),
                backtrace = backtrace.to_string(),
                "{}. Failed to parse URI.",
                message
            );
            Error::Transport(source.to_string())
        }
        _ => {
            error!(error_message = e.to_string(), "{}", message);
            Error::Transport(e.to_string())
        }
    }
}
