use super::*;

#[test]
fn test_invalid_input_display() {
    let error = Error::InvalidInput("repository 'acme' is not in owner/name form".to_string());
    let display = format!("{}", error);
    assert!(display.starts_with("Invalid input:"));
    assert!(display.contains("owner/name"));
}

#[test]
fn test_report_error_wraps_io_error() {
    let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "read-only directory");
    let error = Error::from(io_error);
    assert!(matches!(error, Error::Report(_)));
    assert!(format!("{}", error).contains("read-only directory"));
}
