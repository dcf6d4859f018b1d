//! Unit tests for the github_client crate.

use super::*; // Import items from lib.rs
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TEST_TOKEN: &str = "ghp_test_token";

fn test_config(required_reviewers: u32) -> ProtectionConfig {
    ProtectionConfig {
        required_status_checks: None,
        enforce_admins: true,
        required_pull_request_reviews: RequiredPullRequestReviews {
            required_approving_review_count: required_reviewers,
            dismiss_stale_reviews: true,
            require_code_owner_reviews: false,
        },
        restrictions: None,
        allow_force_pushes: false,
        allow_deletions: false,
        block_creations: true,
        required_linear_history: true,
    }
}

#[tokio::test]
async fn test_apply_branch_protection_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/repos/acme/repo1/branches/main/protection"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "url": "https://api.github.com/repos/acme/repo1/branches/main/protection",
            "enforce_admins": { "enabled": true }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = GitHubClient::for_token(TEST_TOKEN, &mock_server.uri())
        .expect("Failed to build client");

    let result = client
        .apply_branch_protection("acme", "repo1", "main", &test_config(2), EnforcementMode::Apply)
        .await;

    match result {
        Ok(AppliedProtection::Applied { url }) => {
            assert_eq!(
                url,
                "https://api.github.com/repos/acme/repo1/branches/main/protection"
            );
        }
        other => panic!("Expected Applied, got {other:?}"),
    }
}

#[tokio::test]
async fn test_apply_sends_wire_body_and_api_version_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/repos/acme/repo2/branches/main/protection"))
        .and(header("x-github-api-version", "2022-11-28"))
        .and(body_partial_json(json!({
            "enforce_admins": true,
            "required_pull_request_reviews": {
                "required_approving_review_count": 2
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "url": "https://api.github.com/repos/acme/repo2/branches/main/protection"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = GitHubClient::for_token(TEST_TOKEN, &mock_server.uri())
        .expect("Failed to build client");

    let result = client
        .apply_branch_protection("acme", "repo2", "main", &test_config(2), EnforcementMode::Apply)
        .await;

    assert!(result.is_ok());

    // The disabled status-check gate must be serialized as an explicit null.
    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert!(body
        .as_object()
        .unwrap()
        .contains_key("required_status_checks"));
    assert!(body["required_status_checks"].is_null());
}

#[tokio::test]
async fn test_apply_branch_protection_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/repos/acme/missing/branches/main/protection"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "Not Found",
            "documentation_url": "https://docs.github.com/rest"
        })))
        .mount(&mock_server)
        .await;

    let client = GitHubClient::for_token(TEST_TOKEN, &mock_server.uri())
        .expect("Failed to build client");

    let result = client
        .apply_branch_protection(
            "acme",
            "missing",
            "main",
            &test_config(1),
            EnforcementMode::Apply,
        )
        .await;

    match result {
        Err(Error::Api { status, message }) => {
            assert_eq!(status, 404);
            assert!(message.contains("Not Found"));
        }
        other => panic!("Expected Error::Api with status 404, got {other:?}"),
    }
}

#[tokio::test]
async fn test_dry_run_performs_no_network_call() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = GitHubClient::for_token(TEST_TOKEN, &mock_server.uri())
        .expect("Failed to build client");

    let result = client
        .apply_branch_protection(
            "acme",
            "repo1",
            "main",
            &test_config(1),
            EnforcementMode::DryRun,
        )
        .await;

    assert_eq!(result.unwrap(), AppliedProtection::Skipped);
}

#[tokio::test]
async fn test_apply_falls_back_to_request_url_when_body_omits_it() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/repos/acme/repo1/branches/develop/protection"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&mock_server)
        .await;

    let client = GitHubClient::for_token(TEST_TOKEN, &mock_server.uri())
        .expect("Failed to build client");

    let result = client
        .apply_branch_protection(
            "acme",
            "repo1",
            "develop",
            &test_config(1),
            EnforcementMode::Apply,
        )
        .await;

    match result {
        Ok(AppliedProtection::Applied { url }) => {
            assert!(url.ends_with("/repos/acme/repo1/branches/develop/protection"));
        }
        other => panic!("Expected Applied, got {other:?}"),
    }
}
