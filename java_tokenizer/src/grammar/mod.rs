//! Lexicon of Java 21: keywords, operators and separators

pub mod keywords;
pub mod operators;

pub use keywords::{is_contextual_keyword, is_reserved_keyword, ContextualKeyword, Keyword};
pub use operators::{leading_separator, longest_operator, OPERATORS};

use crate::tokens::TokenKind;

/// Kind of an identifier-shaped word: reserved set first, then the
/// contextual set, otherwise a plain identifier.
pub fn classify_word(word: &str) -> TokenKind {
    if is_reserved_keyword(word) {
        TokenKind::Keyword
    } else if is_contextual_keyword(word) {
        TokenKind::ContextualKeyword
    } else {
        TokenKind::Identifier
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_word_precedence() {
        assert_eq!(classify_word("while"), TokenKind::Keyword);
        assert_eq!(classify_word("_"), TokenKind::Keyword);
        assert_eq!(classify_word("record"), TokenKind::ContextualKeyword);
        assert_eq!(classify_word("non-sealed"), TokenKind::ContextualKeyword);
        assert_eq!(classify_word("Record"), TokenKind::Identifier);
        assert_eq!(classify_word("__"), TokenKind::Identifier);
        assert_eq!(classify_word("null"), TokenKind::Identifier);
    }
}
