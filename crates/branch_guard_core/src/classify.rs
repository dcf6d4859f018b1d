//! Transport failure classification.
//!
//! Maps the HTTP status code of a failed API call to a typed error kind and
//! an operator-facing remediation hint. Pure and total; unknown codes fall
//! through to [`ErrorKind::Unexpected`].

use std::fmt;

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "classify_tests.rs"]
mod tests;

/// Typed taxonomy of per-target API failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// 401: the token is invalid or expired.
    Unauthorized,
    /// 403: the token lacks admin permission on the repository.
    Forbidden,
    /// 404: the repository or branch does not exist.
    NotFound,
    /// 422: the configuration conflicts with existing settings.
    ValidationFailed,
    /// Anything else, including transport-level failures.
    Unexpected,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Unauthorized => "Unauthorized",
            ErrorKind::Forbidden => "Forbidden",
            ErrorKind::NotFound => "NotFound",
            ErrorKind::ValidationFailed => "ValidationFailed",
            ErrorKind::Unexpected => "Unexpected",
        };
        f.write_str(name)
    }
}

/// An error kind paired with its remediation text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Typed failure category.
    pub kind: ErrorKind,
    /// Suggestion for the operator, printed and exported verbatim.
    pub suggestion: &'static str,
}

/// Classifies an HTTP status code from a failed protection update.
///
/// Never panics; codes outside the known set map to
/// [`ErrorKind::Unexpected`].
pub fn classify(status: u16) -> Classification {
    match status {
        401 => Classification {
            kind: ErrorKind::Unauthorized,
            suggestion: "Token is invalid or expired; verify it has the 'repo' scope",
        },
        403 => Classification {
            kind: ErrorKind::Forbidden,
            suggestion: "Token lacks admin permission on this repository",
        },
        404 => Classification {
            kind: ErrorKind::NotFound,
            suggestion: "Repository or branch does not exist",
        },
        422 => Classification {
            kind: ErrorKind::ValidationFailed,
            suggestion: "Protection configuration conflicts with existing repository settings",
        },
        _ => Classification {
            kind: ErrorKind::Unexpected,
            suggestion: "Check the GitHub status page and retry later",
        },
    }
}
