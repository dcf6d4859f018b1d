use super::*;

#[test]
fn test_invalid_arguments_display() {
    let error = Error::InvalidArguments("repository 'nope' is not in owner/name form".to_string());
    assert!(format!("{}", error).starts_with("Invalid arguments:"));
}

#[test]
fn test_missing_token_display_names_both_sources() {
    let display = format!("{}", Error::MissingToken);
    assert!(display.contains("--token"));
    assert!(display.contains("GITHUB_TOKEN"));
}

#[test]
fn test_core_error_is_transparent() {
    let core = branch_guard_core::Error::InvalidInput("bad".to_string());
    let error = Error::from(core);
    assert_eq!(format!("{}", error), "Invalid input: bad");
}
