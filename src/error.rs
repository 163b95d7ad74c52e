// Error types. Fatal conditions stop a run before the first submission;
// per-file conditions are recorded in the report and the run moves on.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Conditions that abort a run before any file is submitted.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("Expected a Bearer Token: none given and no .bearer or bearer.txt found from {}", .0.display())]
    MissingToken(PathBuf),

    #[error("Cannot list test case folder {}: {source}", path.display())]
    Discovery {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// The endpoint answered 200 but the body is not a usable XML document.
#[derive(Debug, Error)]
pub enum MalformedResponseError {
    #[error("response body is not valid UTF-8")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("response body is not well-formed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("response body has no root element")]
    NoRoot,

    #[error("response body ends inside <{0}>")]
    Unclosed(String),

    #[error("response body has more than one root element")]
    MultipleRoots,

    #[error("response body has content outside the root element")]
    ContentOutsideRoot,
}

/// Why a single test case file did not produce a result.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("bearer token is not a valid header value")]
    Token(#[from] reqwest::header::InvalidHeaderValue),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{}", invalid_status_line(*status, message))]
    InvalidStatus { status: u16, message: String },

    #[error("malformed response: {0}")]
    Malformed(#[from] MalformedResponseError),
}

/// `Invalid HTTP Response Code: 500 Internal Server Error`, without the
/// trailing blank when the status has no reason phrase.
pub fn invalid_status_line(status: u16, message: &str) -> String {
    if message.is_empty() {
        format!("Invalid HTTP Response Code: {}", status)
    } else {
        format!("Invalid HTTP Response Code: {} {}", status, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_status_display() {
        let err = FileError::InvalidStatus {
            status: 500,
            message: "Internal Server Error".into(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid HTTP Response Code: 500 Internal Server Error"
        );
    }

    #[test]
    fn test_invalid_status_without_reason() {
        let err = FileError::InvalidStatus {
            status: 599,
            message: String::new(),
        };
        assert_eq!(err.to_string(), "Invalid HTTP Response Code: 599");
    }

    #[test]
    fn test_malformed_wraps_cause() {
        let err = FileError::from(MalformedResponseError::NoRoot);
        assert_eq!(
            err.to_string(),
            "malformed response: response body has no root element"
        );
    }
}
