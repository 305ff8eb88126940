//! Error types for flashcard-core.

use thiserror::Error;

/// Result type alias using ParseError.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors that can occur while parsing a deck file.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("missing question at line {line}")]
    MissingQuestion { line: usize },

    #[error("missing answer at line {line}")]
    MissingAnswer { line: usize },

    #[error("invalid ID format at line {line}: {value}")]
    InvalidId { line: usize, value: String },

    #[error("duplicate ID {id} at line {line}")]
    DuplicateId { id: i64, line: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_line() {
        let error = ParseError::MissingAnswer { line: 7 };
        assert_eq!(error.to_string(), "missing answer at line 7");
    }

    #[test]
    fn display_invalid_id() {
        let error = ParseError::InvalidId {
            line: 3,
            value: "abc".to_string(),
        };
        assert_eq!(error.to_string(), "invalid ID format at line 3: abc");
    }
}
