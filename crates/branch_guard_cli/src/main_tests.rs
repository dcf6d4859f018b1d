use super::*;

#[test]
fn test_exit_codes_follow_the_batch_contract() {
    assert_eq!(exit_code_for(&Ok(BatchStatus::Success)), 0);
    assert_eq!(exit_code_for(&Ok(BatchStatus::PartialFailure)), 1);
    assert_eq!(
        exit_code_for(&Err(Error::InvalidArguments("bad".to_string()))),
        2
    );
    assert_eq!(exit_code_for(&Err(Error::MissingToken)), 2);
}

#[test]
fn test_cli_parses_protect_command() {
    let cli = Cli::try_parse_from([
        "branch-guard",
        "protect",
        "--token",
        "ghp_x",
        "--branch",
        "main",
        "--reviewers",
        "2",
        "--status-check",
        "ci/build",
        "--dry-run",
        "acme/repo1",
        "acme/repo2",
    ])
    .expect("Arguments should parse");

    match cli.command {
        Commands::Protect(args) => {
            assert_eq!(args.repositories, vec!["acme/repo1", "acme/repo2"]);
            assert_eq!(args.branch, "main");
            assert_eq!(args.reviewers, 2);
            assert_eq!(args.status_checks, vec!["ci/build"]);
            assert!(args.dry_run);
        }
        _ => panic!("Expected the protect command"),
    }
}

#[test]
fn test_cli_requires_at_least_one_repository() {
    let result = Cli::try_parse_from(["branch-guard", "protect", "--token", "ghp_x"]);
    assert!(result.is_err());
}

#[test]
fn test_cli_parses_version_command() {
    let cli = Cli::try_parse_from(["branch-guard", "version"]).expect("Arguments should parse");
    assert!(matches!(cli.command, Commands::Version));
}
