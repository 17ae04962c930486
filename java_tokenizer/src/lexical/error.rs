//! Lexical error type
use crate::logging::codes;
use crate::logging::Code;
use std::path::PathBuf;

/// Fatal scanning failures. Every positional variant reports the start of
/// the token that was being recognized.
#[derive(Debug, thiserror::Error)]
pub enum LexicalError {
    #[error("Unexpected character {ch:?} at line: {line} column: {column}")]
    UnexpectedCharacter { ch: char, line: u32, column: u32 },

    #[error("Invalid comment at line: {line} column: {column}")]
    InvalidComment { line: u32, column: u32 },

    #[error("Empty character literal at line: {line} column: {column}")]
    EmptyCharacterLiteral { line: u32, column: u32 },

    #[error("Unexpected end of input at line: {line} column: {column}")]
    UnexpectedEndOfInput { line: u32, column: u32 },

    #[error("Expected char {expected:?} but got {found:?} at line: {line} column: {column}")]
    ExpectedCharacter {
        expected: char,
        found: char,
        line: u32,
        column: u32,
    },

    #[error("Too many tokens: more than {limit} at line: {line} column: {column}")]
    TooManyTokens { limit: usize, line: u32, column: u32 },

    #[error("Failed to read source '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LexicalError {
    pub fn error_code(&self) -> Code {
        match self {
            LexicalError::UnexpectedCharacter { .. } => codes::lexical::UNEXPECTED_CHARACTER,
            LexicalError::InvalidComment { .. } => codes::lexical::INVALID_COMMENT,
            LexicalError::EmptyCharacterLiteral { .. } => codes::lexical::EMPTY_CHARACTER_LITERAL,
            LexicalError::UnexpectedEndOfInput { .. } => codes::lexical::UNEXPECTED_END_OF_INPUT,
            LexicalError::ExpectedCharacter { .. } => codes::lexical::EXPECTED_CHARACTER,
            LexicalError::TooManyTokens { .. } => codes::lexical::TOO_MANY_TOKENS,
            LexicalError::Io { .. } => codes::lexical::SOURCE_READ_FAILURE,
        }
    }

    /// Line and column of the failing token, if the error has one.
    pub fn location(&self) -> Option<(u32, u32)> {
        match *self {
            LexicalError::UnexpectedCharacter { line, column, .. }
            | LexicalError::InvalidComment { line, column }
            | LexicalError::EmptyCharacterLiteral { line, column }
            | LexicalError::UnexpectedEndOfInput { line, column }
            | LexicalError::ExpectedCharacter { line, column, .. }
            | LexicalError::TooManyTokens { line, column, .. } => Some((line, column)),
            LexicalError::Io { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_position() {
        let err = LexicalError::ExpectedCharacter {
            expected: '\n',
            found: 'x',
            line: 2,
            column: 5,
        };
        assert_eq!(
            err.to_string(),
            "Expected char '\\n' but got 'x' at line: 2 column: 5"
        );
        assert_eq!(err.location(), Some((2, 5)));
        assert_eq!(err.error_code(), codes::lexical::EXPECTED_CHARACTER);

        let err = LexicalError::UnexpectedCharacter {
            ch: '#',
            line: 1,
            column: 3,
        };
        assert_eq!(err.to_string(), "Unexpected character '#' at line: 1 column: 3");
    }

    #[test]
    fn io_error_has_no_location() {
        let err = LexicalError::Io {
            path: PathBuf::from("Missing.java"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(err.location(), None);
        assert_eq!(err.error_code(), codes::lexical::SOURCE_READ_FAILURE);
        assert!(err.to_string().contains("Missing.java"));
    }
}
