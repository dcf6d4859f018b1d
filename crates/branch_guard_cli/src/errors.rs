//! Error types for the BranchGuard CLI application.

use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur in the BranchGuard CLI application.
///
/// Every variant here is fatal before any target has been processed, so they
/// all map to exit code 2 at the process boundary. Per-target failures are
/// not CLI errors; they are reported through the batch result and exit
/// code 1.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid command-line arguments were provided.
    ///
    /// This error is returned when the user provides arguments that pass
    /// clap parsing but fail semantic validation, such as a malformed
    /// `owner/repo` string.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// No token was provided.
    ///
    /// A token must be supplied with `--token` or through the
    /// `GITHUB_TOKEN` environment variable.
    #[error("No GitHub token provided; pass --token or set GITHUB_TOKEN")]
    MissingToken,

    /// The GitHub client could not be constructed.
    #[error(transparent)]
    Client(#[from] github_client::Error),

    /// The enforcement engine aborted before or during the run.
    #[error(transparent)]
    Core(#[from] branch_guard_core::Error),

    /// The report directory could not be created.
    #[error("Failed to create report directory '{path}': {source}")]
    ReportDir {
        /// Directory that could not be created.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}
