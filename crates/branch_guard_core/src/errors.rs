//! Error types for the batch enforcement engine.
//!
//! Per-target API failures are not errors at this level; they are recorded as
//! `Failed` results inside the batch. The variants here abort a run before or
//! outside the per-target loop and map to a fatal exit at the process
//! boundary.

use std::io;

use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that abort a batch run.
#[derive(Error, Debug)]
pub enum Error {
    /// Pre-batch validation failed.
    ///
    /// Returned for malformed `owner/repo` strings, an out-of-range reviewer
    /// count, or an empty target list. No request has been issued when this
    /// error is raised.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A report artifact could not be created or written.
    ///
    /// The log and CSV files are the audit trail of the run, so losing them
    /// is treated as fatal rather than as a per-target failure.
    #[error("Failed to write report artifact: {0}")]
    Report(#[from] io::Error),
}
