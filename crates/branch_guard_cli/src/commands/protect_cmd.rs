//! Branch protection enforcement command.
//!
//! Wires the CLI arguments into the core engine: parses and validates the
//! repository list, resolves the token, bootstraps the report directory,
//! builds the client, and streams per-target outcome lines to the terminal
//! while the reporter captures the audit artifacts.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use branch_guard_core::{
    enforce_protection, BatchOptions, BatchStatus, PolicySettings, ProtectionOutcome,
    ProtectionResult, RepositoryTarget, RunReporter,
};
use clap::Args;
use colored::Colorize;
use github_client::{EnforcementMode, GitHubClient};
use tracing::{info, warn};

use crate::errors::Error;

#[cfg(test)]
#[path = "protect_cmd_tests.rs"]
mod tests;

/// Default API base for github.com.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Arguments for the `protect` command.
#[derive(Args, Debug)]
pub struct ProtectArgs {
    /// Repositories to protect, as owner/repo
    #[arg(required = true, value_name = "OWNER/REPO")]
    pub repositories: Vec<String>,

    /// Personal access token; falls back to the GITHUB_TOKEN environment variable
    #[arg(long)]
    pub token: Option<String>,

    /// Branch to protect on every repository
    #[arg(long, default_value = "main")]
    pub branch: String,

    /// Compute and report the batch without applying anything
    #[arg(long)]
    pub dry_run: bool,

    /// Required approving review count (1-6)
    #[arg(long, default_value_t = 1)]
    pub reviewers: u32,

    /// Require an approval from a designated code owner
    #[arg(long)]
    pub require_code_owners: bool,

    /// Exempt administrators from the protection rules
    #[arg(long)]
    pub no_enforce_admins: bool,

    /// Permit force pushes to the protected branch
    #[arg(long)]
    pub allow_force_pushes: bool,

    /// Permit deletion of the protected branch
    #[arg(long)]
    pub allow_deletions: bool,

    /// Keep stale approvals when new commits arrive
    #[arg(long)]
    pub keep_stale_reviews: bool,

    /// Status check context that must pass before merge; repeatable
    #[arg(long = "status-check", value_name = "CONTEXT")]
    pub status_checks: Vec<String>,

    /// Directory for the run log and CSV export
    #[arg(long, default_value = "logs")]
    pub report_dir: PathBuf,

    /// Fixed delay between requests, in milliseconds
    #[arg(long, default_value_t = 500)]
    pub delay_ms: u64,

    /// GitHub API base URL (override for GitHub Enterprise)
    #[arg(long, default_value = DEFAULT_API_BASE)]
    pub api_base: String,
}

/// Parses every `owner/repo` string, rejecting the whole batch on the first
/// malformed entry.
pub fn parse_targets(specs: &[String]) -> Result<Vec<RepositoryTarget>, Error> {
    specs
        .iter()
        .map(|spec| {
            RepositoryTarget::parse(spec).map_err(|e| Error::InvalidArguments(e.to_string()))
        })
        .collect()
}

/// Maps the CLI flags onto policy settings.
pub fn settings_from_args(args: &ProtectArgs) -> PolicySettings {
    PolicySettings {
        required_reviewers: args.reviewers,
        require_code_owner_reviews: args.require_code_owners,
        enforce_admins: !args.no_enforce_admins,
        allow_force_pushes: args.allow_force_pushes,
        allow_deletions: args.allow_deletions,
        dismiss_stale_reviews: !args.keep_stale_reviews,
        required_status_checks: args.status_checks.clone(),
    }
}

/// Resolves the token from the argument or the `GITHUB_TOKEN` environment
/// variable.
pub fn resolve_token(arg: Option<String>) -> Result<String, Error> {
    let token = match arg {
        Some(token) => token,
        None => env::var("GITHUB_TOKEN").map_err(|_| Error::MissingToken)?,
    };
    if token.trim().is_empty() {
        return Err(Error::MissingToken);
    }
    Ok(token)
}

/// Runs the `protect` command end to end and returns the batch status for
/// exit-code mapping.
pub async fn execute(args: &ProtectArgs) -> Result<BatchStatus, Error> {
    let targets = parse_targets(&args.repositories)?;
    let settings = settings_from_args(args);
    settings.validate()?;
    let token = resolve_token(args.token.clone())?;

    fs::create_dir_all(&args.report_dir).map_err(|source| Error::ReportDir {
        path: args.report_dir.display().to_string(),
        source,
    })?;
    let mut reporter = RunReporter::create(&args.report_dir)?;

    let mode = if args.dry_run {
        EnforcementMode::DryRun
    } else {
        EnforcementMode::Apply
    };
    let options = BatchOptions {
        branch: args.branch.clone(),
        mode,
        delay: Duration::from_millis(args.delay_ms),
    };

    let client = GitHubClient::for_token(&token, &args.api_base)?;

    info!(
        target_count = targets.len(),
        branch = %options.branch,
        dry_run = args.dry_run,
        "Starting protection run"
    );
    reporter.record_start(&options.branch, mode, targets.len())?;

    let run = enforce_protection(&client, &targets, &settings, &options, |result| {
        print_outcome(result);
        // A failed log write must not abort the batch mid-run.
        if let Err(e) = reporter.record_result(result) {
            warn!(error = %e, "Failed to append to the run log");
        }
    })
    .await?;

    let status = reporter.finalize(&run)?;
    print_summary(&run, status);
    println!("Log: {}", reporter.log_path().display());
    println!("CSV: {}", reporter.csv_path().display());

    Ok(status)
}

fn print_outcome(result: &ProtectionResult) {
    let where_ = format!("{}@{}", result.target, result.branch);
    match &result.outcome {
        ProtectionOutcome::Succeeded { url } => {
            println!("{} {} -> {}", "protected".green(), where_, url);
        }
        ProtectionOutcome::Failed {
            kind,
            message,
            suggestion,
        } => {
            println!(
                "{} {} ({}): {}\n  {}",
                "failed".red(),
                where_,
                kind,
                message,
                suggestion.yellow()
            );
        }
        ProtectionOutcome::Skipped => {
            println!("{} {} (dry-run)", "skipped".cyan(), where_);
        }
    }
}

fn print_summary(run: &branch_guard_core::BatchRun, status: BatchStatus) {
    let label = match status {
        BatchStatus::Success => "Success".green(),
        BatchStatus::PartialFailure => "PartialFailure".red(),
    };
    println!(
        "\n{}: {} succeeded, {} failed, {} skipped",
        label,
        run.success_count(),
        run.failure_count(),
        run.skipped_count()
    );
}
