//! Batch result accumulation.
//!
//! A [`BatchRun`] is the ordered, append-only record of one enforcement run.
//! Results are appended by the orchestrator as targets complete and never
//! mutated afterwards; the counts are derived, not stored, so the run cannot
//! drift out of sync with its results.

use serde::{Deserialize, Serialize};

use crate::classify::ErrorKind;
use crate::request::RepositoryTarget;

#[cfg(test)]
#[path = "batch_tests.rs"]
mod tests;

/// Terminal outcome of a single protection request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProtectionOutcome {
    /// The configuration was written to the remote repository.
    Succeeded {
        /// URL of the protection resource that was written.
        url: String,
    },
    /// The request failed; the batch continued past it.
    Failed {
        /// Typed failure category.
        kind: ErrorKind,
        /// Raw message from the failed call.
        message: String,
        /// Operator-facing remediation hint.
        suggestion: String,
    },
    /// Dry-run mode; nothing was sent.
    Skipped,
}

/// The outcome of one target, tagged with what it applied to.
///
/// Created exactly once per request and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtectionResult {
    /// Repository the request targeted.
    pub target: RepositoryTarget,
    /// Branch the request targeted.
    pub branch: String,
    /// How the request ended.
    pub outcome: ProtectionOutcome,
}

impl ProtectionResult {
    /// Whether this result counts as a failure.
    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, ProtectionOutcome::Failed { .. })
    }
}

/// Overall status of a completed batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatchStatus {
    /// Every target succeeded (or was skipped in dry-run mode).
    Success,
    /// At least one target failed; others may have succeeded.
    PartialFailure,
}

/// Ordered, append-only record of a batch run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchRun {
    results: Vec<ProtectionResult>,
}

impl BatchRun {
    /// Creates an empty run.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a result. Crate-internal; only the orchestrator writes.
    pub(crate) fn push(&mut self, result: ProtectionResult) {
        self.results.push(result);
    }

    /// Results in the order the targets were processed.
    pub fn results(&self) -> &[ProtectionResult] {
        &self.results
    }

    /// Number of targets that were applied successfully.
    pub fn success_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r.outcome, ProtectionOutcome::Succeeded { .. }))
            .count()
    }

    /// Number of targets that failed.
    pub fn failure_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_failure()).count()
    }

    /// Number of targets skipped by dry-run mode.
    pub fn skipped_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r.outcome, ProtectionOutcome::Skipped))
            .count()
    }

    /// `Success` when nothing failed, otherwise `PartialFailure`.
    pub fn status(&self) -> BatchStatus {
        if self.failure_count() == 0 {
            BatchStatus::Success
        } else {
            BatchStatus::PartialFailure
        }
    }
}
