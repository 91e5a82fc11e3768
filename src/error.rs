//! Error types for ungdoc library.

use std::io;
use thiserror::Error;

/// Result type alias for ungdoc operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while decoding or rendering a document.
///
/// The conversion itself never fails: malformed nodes are skipped. Errors
/// only come from reading input and from serializing output.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The payload is valid JSON but not a document tree.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// The metadata record could not be serialized as YAML frontmatter.
    #[error("Frontmatter error: {0}")]
    Frontmatter(#[from] serde_yaml::Error),

    /// Error during rendering (Markdown, JSON).
    #[error("Rendering error: {0}")]
    Render(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidDocument("expected an object".to_string());
        assert_eq!(err.to_string(), "Invalid document: expected an object");

        let err = Error::Render("broken".to_string());
        assert_eq!(err.to_string(), "Rendering error: broken");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
