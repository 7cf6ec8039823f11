//! Error types for loading and argument handling
//!
//! Scoring and recommendation never fail: malformed words are skipped and a
//! cancelled pass yields `None`. Errors only arise at the edges, when reading
//! word lists or parsing user input.

use crate::core::WordError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading data or parsing input
#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("invalid word: {0}")]
    Word(#[from] WordError),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type alias for fallible advisor operations
pub type Result<T> = std::result::Result<T, AdvisorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_errors_convert() {
        let err: AdvisorError = WordError::InvalidCharacters.into();
        assert_eq!(
            err.to_string(),
            "invalid word: word must contain only the letters a-z"
        );
    }

    #[test]
    fn io_error_names_path() {
        let err = AdvisorError::Io {
            path: PathBuf::from("answers.txt"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.to_string().contains("answers.txt"));
    }
}
