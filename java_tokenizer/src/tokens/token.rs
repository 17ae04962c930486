//! Token values produced by the tokenizer
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lexeme categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TokenKind {
    EndOfInput,
    Keyword,
    ContextualKeyword,
    Identifier,
    Number,
    Character,
    String,
    TextBlock,
    SingleLineComment,
    MultiLineComment,
    Operator,
    Separator,
}

impl TokenKind {
    pub const ALL: [TokenKind; 12] = [
        Self::EndOfInput,
        Self::Keyword,
        Self::ContextualKeyword,
        Self::Identifier,
        Self::Number,
        Self::Character,
        Self::String,
        Self::TextBlock,
        Self::SingleLineComment,
        Self::MultiLineComment,
        Self::Operator,
        Self::Separator,
    ];

    /// Stable upper-case name used in dumps and reports
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EndOfInput => "EOF",
            Self::Keyword => "KEYWORD",
            Self::ContextualKeyword => "CONTEXTUALKEYWORD",
            Self::Identifier => "IDENTIFIER",
            Self::Number => "NUMBER",
            Self::Character => "CHARACTER",
            Self::String => "STRING",
            Self::TextBlock => "TEXTBLOCK",
            Self::SingleLineComment => "SINGLELINECOMMENT",
            Self::MultiLineComment => "MULTILINECOMMENT",
            Self::Operator => "OPERATOR",
            Self::Separator => "SEPARATOR",
        }
    }

    pub const fn is_comment(self) -> bool {
        matches!(self, Self::SingleLineComment | Self::MultiLineComment)
    }

    pub const fn is_literal(self) -> bool {
        matches!(
            self,
            Self::Number | Self::Character | Self::String | Self::TextBlock
        )
    }

    pub const fn is_word(self) -> bool {
        matches!(
            self,
            Self::Keyword | Self::ContextualKeyword | Self::Identifier
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recognized lexeme.
///
/// `text` is the raw source text, except that string and character literals
/// drop their delimiters and text blocks hold the indentation-stripped body.
/// `line` and `column` locate the first character of the lexeme (1-based).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: u32,
    pub column: u32,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
            column,
        }
    }

    pub fn end_of_input(line: u32, column: u32) -> Self {
        Self::new(
            TokenKind::EndOfInput,
            crate::config::compile_time::lexical::EOF_TEXT,
            line,
            column,
        )
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::EndOfInput
    }

    pub fn is(&self, kind: TokenKind, text: &str) -> bool {
        self.kind == kind && self.text == text
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} '{}' at {}:{}",
            self.kind,
            self.text.escape_debug(),
            self.line,
            self.column
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_escapes_control_characters() {
        let token = Token::new(TokenKind::TextBlock, "a\n\tb", 3, 9);
        assert_eq!(token.to_string(), "TEXTBLOCK 'a\\n\\tb' at 3:9");
    }

    #[test]
    fn end_of_input_token() {
        let token = Token::end_of_input(4, 2);
        assert!(token.is_eof());
        assert!(token.text.is_empty());
        assert_eq!(token.to_string(), "EOF '' at 4:2");
    }

    #[test]
    fn kind_groups() {
        let comments: Vec<_> = TokenKind::ALL.iter().filter(|k| k.is_comment()).collect();
        assert_eq!(comments.len(), 2);
        assert!(TokenKind::TextBlock.is_literal());
        assert!(TokenKind::ContextualKeyword.is_word());
        assert!(!TokenKind::Separator.is_word());
    }

    #[test]
    fn serializes_with_kind_name() {
        let token = Token::new(TokenKind::Keyword, "class", 1, 1);
        let json = serde_json::to_value(&token).unwrap();
        assert_eq!(json["kind"], "Keyword");
        assert_eq!(json["text"], "class");
        assert_eq!(json["column"], 1);
    }
}
