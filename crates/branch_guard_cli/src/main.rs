use clap::{Parser, Subcommand};

mod commands;
mod errors;

use branch_guard_core::BatchStatus;
use commands::protect_cmd::{execute, ProtectArgs};
use errors::Error;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;

/// Exit code when every target succeeded (or was skipped in dry-run mode).
const EXIT_SUCCESS: i32 = 0;
/// Exit code when at least one target failed.
const EXIT_PARTIAL_FAILURE: i32 = 1;
/// Exit code for fatal errors before any target was processed.
const EXIT_FATAL: i32 = 2;

/// BranchGuard CLI: enforce a standard branch protection policy across repositories
#[derive(Parser)]
#[command(name = "branch-guard")]
#[command(about = "Apply a standard branch protection policy to GitHub repositories", long_about = None)]
struct Cli {
    /// Log at debug level regardless of BRANCH_GUARD_LOG
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply the protection policy to a batch of repositories
    #[command()]
    Protect(ProtectArgs),

    /// Show the CLI version
    Version,
}

/// Maps a finished (or aborted) run onto the process exit code contract:
/// 0 all succeeded, 1 partial failure, 2 fatal pre-batch error.
fn exit_code_for(outcome: &Result<BatchStatus, Error>) -> i32 {
    match outcome {
        Ok(BatchStatus::Success) => EXIT_SUCCESS,
        Ok(BatchStatus::PartialFailure) => EXIT_PARTIAL_FAILURE,
        Err(_) => EXIT_FATAL,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_env("BRANCH_GUARD_LOG")
    };
    tracing_subscriber::registry()
        .with(fmt::layer().pretty())
        .with(filter)
        .init();

    match &cli.command {
        Commands::Protect(args) => {
            let outcome = execute(args).await;
            if let Err(e) = &outcome {
                error!("Error: {e}");
                eprintln!("Error: {e}");
            }
            std::process::exit(exit_code_for(&outcome));
        }
        Commands::Version => {
            println!(
                "branch-guard version {}",
                option_env!("BRANCH_GUARD_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
            );
            std::process::exit(EXIT_SUCCESS);
        }
    }
}
