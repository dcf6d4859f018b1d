//! Run reporting: the append-only log file and the CSV export.
//!
//! Both artifacts are write-once-per-run and named with a shared
//! `yyyyMMdd_HHmmss` timestamp so a run's log and CSV can be matched up
//! later. The engine never reads them back.

use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;
use github_client::EnforcementMode;
use tracing::debug;

use crate::batch::{BatchRun, BatchStatus, ProtectionOutcome, ProtectionResult};
use crate::errors::Error;

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;

/// Prefix shared by both artifact names.
const ARTIFACT_PREFIX: &str = "branch_guard";

/// CSV header row; columns are a stable contract for downstream tooling.
const CSV_HEADER: &str = "repository,branch,status,url_or_error,error_kind,suggestion";

/// Severity tag on each log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warning,
    Error,
    Success,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogLevel::Info => "Info",
            LogLevel::Warning => "Warning",
            LogLevel::Error => "Error",
            LogLevel::Success => "Success",
        };
        f.write_str(name)
    }
}

/// Writes the chronological run log and, at the end of the run, the CSV
/// export.
///
/// Created before the batch starts so the log captures events as they
/// happen; [`RunReporter::finalize`] appends the summary line and writes the
/// CSV in one pass over the completed [`BatchRun`].
#[derive(Debug)]
pub struct RunReporter {
    log_path: PathBuf,
    csv_path: PathBuf,
    log: File,
}

impl RunReporter {
    /// Creates the timestamped log file under `dir` and reserves the CSV
    /// name.
    ///
    /// The directory must already exist; bootstrapping it is the caller's
    /// concern.
    ///
    /// # Errors
    /// Returns `Error::Report` if the log file cannot be created.
    pub fn create(dir: &Path) -> Result<Self, Error> {
        let stamp = Local::now().format("%Y%m%d_%H%M%S");
        let log_path = dir.join(format!("{ARTIFACT_PREFIX}_{stamp}.log"));
        let csv_path = dir.join(format!("{ARTIFACT_PREFIX}_results_{stamp}.csv"));

        let log = File::create(&log_path)?;
        debug!(log_path = %log_path.display(), "Created run log");

        Ok(Self {
            log_path,
            csv_path,
            log,
        })
    }

    /// Path of the log file.
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Path the CSV export will be written to.
    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }

    /// Appends one tagged line to the run log.
    ///
    /// Lines are flushed individually so an interrupted run keeps every
    /// event recorded up to the interrupt point.
    ///
    /// # Errors
    /// Returns `Error::Report` if the write fails.
    pub fn log_event(&mut self, level: LogLevel, message: &str) -> Result<(), Error> {
        writeln!(
            self.log,
            "{} [{}] {}",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            level,
            message
        )?;
        self.log.flush()?;
        Ok(())
    }

    /// Logs the start-of-run event.
    ///
    /// # Errors
    /// Returns `Error::Report` if the write fails.
    pub fn record_start(
        &mut self,
        branch: &str,
        mode: EnforcementMode,
        target_count: usize,
    ) -> Result<(), Error> {
        let mode_label = match mode {
            EnforcementMode::Apply => "apply",
            EnforcementMode::DryRun => "dry-run",
        };
        self.log_event(
            LogLevel::Info,
            &format!(
                "Starting branch protection run: {} target(s), branch '{}', mode {}",
                target_count, branch, mode_label
            ),
        )
    }

    /// Logs one per-target outcome as it completes.
    ///
    /// # Errors
    /// Returns `Error::Report` if the write fails.
    pub fn record_result(&mut self, result: &ProtectionResult) -> Result<(), Error> {
        match &result.outcome {
            ProtectionOutcome::Succeeded { url } => self.log_event(
                LogLevel::Success,
                &format!(
                    "Protected {}@{}: {}",
                    result.target, result.branch, url
                ),
            ),
            ProtectionOutcome::Failed {
                kind,
                message,
                suggestion,
            } => self.log_event(
                LogLevel::Error,
                &format!(
                    "Failed to protect {}@{} ({}): {}. {}",
                    result.target, result.branch, kind, message, suggestion
                ),
            ),
            ProtectionOutcome::Skipped => self.log_event(
                LogLevel::Info,
                &format!(
                    "Skipped {}@{} (dry-run)",
                    result.target, result.branch
                ),
            ),
        }
    }

    /// Logs the summary line and writes the CSV export.
    ///
    /// # Errors
    /// Returns `Error::Report` if either artifact cannot be written.
    pub fn finalize(&mut self, run: &BatchRun) -> Result<BatchStatus, Error> {
        let status = run.status();

        let level = match status {
            BatchStatus::Success => LogLevel::Success,
            BatchStatus::PartialFailure => LogLevel::Warning,
        };
        self.log_event(
            level,
            &format!(
                "Run complete: {} succeeded, {} failed, {} skipped",
                run.success_count(),
                run.failure_count(),
                run.skipped_count()
            ),
        )?;

        self.write_csv(run)?;
        Ok(status)
    }

    fn write_csv(&self, run: &BatchRun) -> Result<(), Error> {
        let mut csv = File::create(&self.csv_path)?;
        writeln!(csv, "{CSV_HEADER}")?;
        for result in run.results() {
            writeln!(csv, "{}", csv_row(result))?;
        }
        csv.flush()?;
        debug!(csv_path = %self.csv_path.display(), "Wrote CSV export");
        Ok(())
    }
}

/// Renders one RFC 4180 row for a result.
fn csv_row(result: &ProtectionResult) -> String {
    let (status, url_or_error, kind, suggestion) = match &result.outcome {
        ProtectionOutcome::Succeeded { url } => {
            ("Succeeded", url.clone(), String::new(), String::new())
        }
        ProtectionOutcome::Failed {
            kind,
            message,
            suggestion,
        } => (
            "Failed",
            message.clone(),
            kind.to_string(),
            suggestion.clone(),
        ),
        ProtectionOutcome::Skipped => ("Skipped", String::new(), String::new(), String::new()),
    };

    [
        result.target.to_string(),
        result.branch.clone(),
        status.to_string(),
        url_or_error,
        kind,
        suggestion,
    ]
    .iter()
    .map(|field| csv_field(field))
    .collect::<Vec<_>>()
    .join(",")
}

/// Quotes a field when it contains a comma, quote, or line break.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
