//! Lexical analysis
//!
//! [`Tokenizer`] turns one Java 21 compilation unit into positioned tokens.
//! Scanning is fail-fast: the first character no recognizer accepts ends the
//! scan with a [`LexicalError`].

pub mod analyzer;
pub mod chars;
pub mod error;
pub mod text_block;

use crate::config::constants::compile_time::lexical::MAX_TOKEN_COUNT;
use crate::tokens::Token;

pub use analyzer::{LexicalMetrics, Tokenizer, Tokens};
pub use error::LexicalError;
pub use text_block::strip_indent;

/// Tokenize `text` completely. The final token is always end-of-input.
pub fn tokenize(text: &str) -> Result<Vec<Token>, LexicalError> {
    let mut tokenizer = Tokenizer::new(text);
    let mut tokens = Vec::new();
    for token in tokenizer.tokens() {
        let token = token?;
        if tokens.len() >= MAX_TOKEN_COUNT {
            return Err(LexicalError::TooManyTokens {
                limit: MAX_TOKEN_COUNT,
                line: token.line,
                column: token.column,
            });
        }
        tokens.push(token);
    }
    Ok(tokens)
}

/// Check that every lexical code is registered. Called at startup.
pub fn validate_lexical_codes() -> Result<(), String> {
    use crate::logging::codes;

    let lexical_codes = [
        codes::lexical::UNEXPECTED_CHARACTER,
        codes::lexical::UNEXPECTED_END_OF_INPUT,
        codes::lexical::INVALID_COMMENT,
        codes::lexical::EMPTY_CHARACTER_LITERAL,
        codes::lexical::EXPECTED_CHARACTER,
        codes::lexical::SOURCE_READ_FAILURE,
        codes::lexical::TOO_MANY_TOKENS,
    ];

    for code in &lexical_codes {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "Lexical error code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }
    Ok(())
}
