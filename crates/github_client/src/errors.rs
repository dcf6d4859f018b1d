//! Error types for GitHub client operations.
//!
//! This module defines the error types that can occur when applying branch
//! protection through the github_client crate. It provides the status code and
//! raw message of API failures so callers can classify them.

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur during GitHub client operations.
///
/// API failures keep the HTTP status code and the message returned by GitHub;
/// everything the client cannot attribute to an API response (DNS failures,
/// connection resets, malformed responses) is reported as a transport error.
///
/// ## Examples
///
/// ```rust,ignore
/// use github_client::Error;
///
/// match client.apply_branch_protection(owner, repo, branch, &config, mode).await {
///     Ok(applied) => println!("Protection applied: {:?}", applied),
///     Err(Error::Api { status: 404, .. }) => eprintln!("Repository or branch not found"),
///     Err(err) => eprintln!("Other error: {}", err),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The GitHub API rejected the request.
    ///
    /// Carries the HTTP status code and the error message from the response
    /// body. The client performs no retry; classification of the status code
    /// is left to the caller.
    #[error("GitHub API request failed with status {status}: {message}")]
    Api {
        /// HTTP status code of the failed response.
        status: u16,
        /// Raw error message returned by GitHub.
        message: String,
    },

    /// Failed to construct the underlying HTTP client.
    ///
    /// This error occurs when the API base URI cannot be parsed or the
    /// client builder rejects its configuration.
    #[error("Failed to build GitHub client: {0}")]
    ClientBuild(String),

    /// Error deserializing the response from GitHub.
    ///
    /// This error occurs when the GitHub API returns a response that cannot
    /// be parsed into the expected data structure.
    #[error("Failed to deserialize GitHub response: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// The request never produced an API response.
    ///
    /// Covers connection failures, TLS errors, and other conditions where no
    /// HTTP status code is available.
    #[error("Transport failure talking to GitHub: {0}")]
    Transport(String),
}
