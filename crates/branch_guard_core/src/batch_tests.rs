use super::*;

fn target(spec: &str) -> RepositoryTarget {
    RepositoryTarget::parse(spec).unwrap()
}

fn succeeded(repo: &str) -> ProtectionResult {
    ProtectionResult {
        target: target(repo),
        branch: "main".to_string(),
        outcome: ProtectionOutcome::Succeeded {
            url: format!("https://api.github.com/repos/{repo}/branches/main/protection"),
        },
    }
}

fn failed(repo: &str, kind: ErrorKind) -> ProtectionResult {
    ProtectionResult {
        target: target(repo),
        branch: "main".to_string(),
        outcome: ProtectionOutcome::Failed {
            kind,
            message: "boom".to_string(),
            suggestion: "check something".to_string(),
        },
    }
}

fn skipped(repo: &str) -> ProtectionResult {
    ProtectionResult {
        target: target(repo),
        branch: "main".to_string(),
        outcome: ProtectionOutcome::Skipped,
    }
}

#[test]
fn test_empty_run_is_a_success() {
    let run = BatchRun::new();
    assert_eq!(run.success_count(), 0);
    assert_eq!(run.failure_count(), 0);
    assert_eq!(run.skipped_count(), 0);
    assert_eq!(run.status(), BatchStatus::Success);
}

#[test]
fn test_counts_are_derived_from_results() {
    let mut run = BatchRun::new();
    run.push(succeeded("acme/one"));
    run.push(failed("acme/two", ErrorKind::NotFound));
    run.push(skipped("acme/three"));
    run.push(succeeded("acme/four"));

    assert_eq!(run.results().len(), 4);
    assert_eq!(run.success_count(), 2);
    assert_eq!(run.failure_count(), 1);
    assert_eq!(run.skipped_count(), 1);
}

#[test]
fn test_one_failure_makes_the_batch_a_partial_failure() {
    let mut run = BatchRun::new();
    run.push(succeeded("acme/one"));
    run.push(failed("acme/two", ErrorKind::Forbidden));

    assert_eq!(run.status(), BatchStatus::PartialFailure);
}

#[test]
fn test_all_skipped_is_still_a_success() {
    let mut run = BatchRun::new();
    run.push(skipped("acme/one"));
    run.push(skipped("acme/two"));

    assert_eq!(run.status(), BatchStatus::Success);
}

#[test]
fn test_results_preserve_input_order() {
    let mut run = BatchRun::new();
    run.push(succeeded("acme/one"));
    run.push(failed("acme/two", ErrorKind::NotFound));

    let repos: Vec<String> = run
        .results()
        .iter()
        .map(|r| r.target.to_string())
        .collect();
    assert_eq!(repos, vec!["acme/one", "acme/two"]);
}
