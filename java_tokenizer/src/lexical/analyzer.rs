//! Core tokenizer
//!
//! The scanner owns a copy of the whole unit and walks it one character at a
//! time. Each call to [`Tokenizer::next_token`] skips whitespace, freezes the
//! start position and then tries the recognizers in a fixed order: comment,
//! string or text block, character, number, identifier, separator, operator.
//! The first recognizer that matches produces the token; if none does the
//! scan fails.

use std::collections::BTreeMap;
use std::path::Path;

use super::chars::{is_decimal_digit, is_identifier_part, is_identifier_start, is_java_whitespace};
use super::error::LexicalError;
use super::text_block::strip_indent;
use crate::config::runtime::LexicalPreferences;
use crate::grammar::{self, operators};
use crate::tokens::{Token, TokenKind};

type Recognized = Result<Option<Token>, LexicalError>;

const TEXT_BLOCK_DELIMITER: &str = "\"\"\"";
const NON_SEALED_TAIL: &str = "-sealed";

/// Per-scan counters collected by the driver
#[derive(Debug, Default, Clone, serde::Serialize)]
pub struct LexicalMetrics {
    pub total_tokens: usize,
    pub tokens_by_kind: BTreeMap<TokenKind, usize>,
    pub comment_count: usize,
    pub max_string_length: usize,
    pub max_comment_length: usize,
    pub last_line: u32,
}

impl LexicalMetrics {
    pub fn record_token(&mut self, token: &Token, preferences: &LexicalPreferences) {
        if token.kind.is_comment() {
            self.comment_count += 1;
            self.max_comment_length = self.max_comment_length.max(token.text.chars().count());
            if !preferences.include_comments_in_counts {
                return;
            }
        }

        if !token.is_eof() {
            self.total_tokens += 1;
        }
        self.last_line = self.last_line.max(token.line);

        if matches!(token.kind, TokenKind::String | TokenKind::TextBlock) {
            self.max_string_length = self.max_string_length.max(token.text.chars().count());
        }

        if preferences.collect_detailed_metrics {
            *self.tokens_by_kind.entry(token.kind).or_insert(0) += 1;
        }
    }

    pub fn count(&self, kind: TokenKind) -> usize {
        self.tokens_by_kind.get(&kind).copied().unwrap_or(0)
    }
}

/// Scanner over one in-memory source unit
#[derive(Debug, Clone)]
pub struct Tokenizer {
    input: String,
    chars: Vec<char>,
    pos: usize,
    line: u32,
    column: u32,
    start_line: u32,
    start_column: u32,
}

impl Tokenizer {
    pub fn new(input: impl Into<String>) -> Self {
        let input = input.into();
        let chars = input.chars().collect();
        Self {
            input,
            chars,
            pos: 0,
            line: 1,
            column: 1,
            start_line: 1,
            start_column: 1,
        }
    }

    /// Read the whole unit at `path` into memory.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LexicalError> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path).map_err(|source| LexicalError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(input))
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Index of the next unconsumed character (in characters, not bytes).
    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn column(&self) -> u32 {
        self.column
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    /// Produce the next token. Past the end of input this keeps returning
    /// end-of-input tokens.
    pub fn next_token(&mut self) -> Result<Token, LexicalError> {
        self.skip_whitespace()?;
        self.start_line = self.line;
        self.start_column = self.column;

        let Some(current) = self.peek() else {
            return Ok(Token::end_of_input(self.start_line, self.start_column));
        };

        let recognizers: [fn(&mut Self) -> Recognized; 7] = [
            Self::comment,
            Self::string,
            Self::character,
            Self::number,
            Self::identifier,
            Self::separator,
            Self::operator,
        ];
        for recognize in recognizers {
            if let Some(token) = recognize(self)? {
                return Ok(token);
            }
        }

        Err(LexicalError::UnexpectedCharacter {
            ch: current,
            line: self.start_line,
            column: self.start_column,
        })
    }

    /// Iterate tokens up to and including end-of-input. Iteration stops after
    /// the first error.
    pub fn tokens(&mut self) -> Tokens<'_> {
        Tokens {
            tokenizer: self,
            finished: false,
        }
    }

    // ------------------------------------------------------------------
    // Recognizers
    // ------------------------------------------------------------------

    fn comment(&mut self) -> Recognized {
        if self.starts_with("//") {
            let mut text = String::new();
            while let Some(c) = self.peek() {
                if c == '\n' {
                    break;
                }
                text.push(self.bump()?);
            }
            return Ok(Some(self.token(TokenKind::SingleLineComment, text)));
        }

        if self.starts_with("/*") {
            self.eat_str("/*")?;
            let mut text = String::from("/*");
            // The closer cannot share its star with the opener.
            while text.len() < 4 || !text.ends_with("*/") {
                if self.is_at_end() {
                    return Err(LexicalError::InvalidComment {
                        line: self.start_line,
                        column: self.start_column,
                    });
                }
                text.push(self.bump()?);
            }
            return Ok(Some(self.token(TokenKind::MultiLineComment, text)));
        }

        Ok(None)
    }

    fn string(&mut self) -> Recognized {
        if self.starts_with(TEXT_BLOCK_DELIMITER) {
            return self.text_block().map(Some);
        }
        if self.peek() != Some('"') {
            return Ok(None);
        }

        self.eat('"')?;
        let mut text = String::new();
        while let Some(c) = self.peek() {
            match c {
                '"' => break,
                '\\' => self.escape_into(&mut text)?,
                _ => text.push(self.bump()?),
            }
        }
        self.eat('"')?;
        Ok(Some(self.token(TokenKind::String, text)))
    }

    fn text_block(&mut self) -> Result<Token, LexicalError> {
        self.eat_str(TEXT_BLOCK_DELIMITER)?;
        while let Some(c) = self.peek() {
            if c == '\n' || !is_java_whitespace(c) {
                break;
            }
            self.bump()?;
        }
        self.eat('\n')?;

        let mut body = String::new();
        while !self.starts_with(TEXT_BLOCK_DELIMITER) {
            match self.peek() {
                None => break,
                Some('\\') => self.escape_into(&mut body)?,
                Some(_) => body.push(self.bump()?),
            }
        }
        self.eat_str(TEXT_BLOCK_DELIMITER)?;
        Ok(self.token(TokenKind::TextBlock, strip_indent(&body)))
    }

    fn character(&mut self) -> Recognized {
        if self.peek() != Some('\'') {
            return Ok(None);
        }

        self.eat('\'')?;
        let mut text = String::new();
        loop {
            match self.peek() {
                Some('\'') => break,
                Some('\\') => self.escape_into(&mut text)?,
                _ => text.push(self.bump()?),
            }
        }
        self.eat('\'')?;

        if text.is_empty() {
            return Err(LexicalError::EmptyCharacterLiteral {
                line: self.start_line,
                column: self.start_column,
            });
        }
        Ok(Some(self.token(TokenKind::Character, text)))
    }

    fn number(&mut self) -> Recognized {
        let Some(first) = self.peek() else {
            return Ok(None);
        };
        let second = self.peek_at(1);

        if first == '.' && !second.is_some_and(is_decimal_digit) {
            return Ok(None);
        }

        let mut text = String::new();
        if self.starts_with("0b") || self.starts_with("0B") {
            text.push(self.bump()?);
            text.push(self.bump()?);
            self.take_while_in("01_", &mut text)?;
            self.take_one_of("lL", &mut text)?;
        } else if self.starts_with("0x") || self.starts_with("0X") {
            text.push(self.bump()?);
            text.push(self.bump()?);
            self.take_while_in("1234567890abcdefABCDEF._pP+-", &mut text)?;
            self.take_one_of("lLdDfF", &mut text)?;
        } else if first == '0' && second.is_some_and(|c| "01234567_".contains(c)) {
            self.take_while_in("01234567_", &mut text)?;
            self.take_one_of("lL", &mut text)?;
        } else if is_decimal_digit(first) || first == '.' {
            self.take_while_in("0123456789._eE-+", &mut text)?;
            self.take_one_of("lLdDfF", &mut text)?;
        } else {
            return Ok(None);
        }

        Ok(Some(self.token(TokenKind::Number, text)))
    }

    fn identifier(&mut self) -> Recognized {
        if !self.peek().is_some_and(is_identifier_start) {
            return Ok(None);
        }

        let mut text = String::new();
        while let Some(c) = self.peek() {
            if !is_identifier_part(c) {
                break;
            }
            text.push(self.bump()?);
        }

        // `non-sealed` is one token, not `non`, `-`, `sealed`.
        if text == "non" && self.starts_with(NON_SEALED_TAIL) {
            self.eat_str(NON_SEALED_TAIL)?;
            text.push_str(NON_SEALED_TAIL);
        }

        let kind = grammar::classify_word(&text);
        Ok(Some(self.token(kind, text)))
    }

    fn separator(&mut self) -> Recognized {
        let rest = self.remaining(operators::LONGEST_SEPARATOR);
        let Some(separator) = operators::leading_separator(&rest) else {
            return Ok(None);
        };
        self.eat_str(separator)?;
        Ok(Some(self.token(TokenKind::Separator, separator)))
    }

    fn operator(&mut self) -> Recognized {
        let rest = self.remaining(operators::LONGEST_OPERATOR);
        let Some(operator) = operators::longest_operator(&rest) else {
            return Ok(None);
        };
        self.eat_str(operator)?;
        Ok(Some(self.token(TokenKind::Operator, operator)))
    }

    // ------------------------------------------------------------------
    // Cursor primitives
    // ------------------------------------------------------------------

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn starts_with(&self, prefix: &str) -> bool {
        let mut ahead = self.chars[self.pos.min(self.chars.len())..].iter();
        prefix.chars().all(|p| ahead.next() == Some(&p))
    }

    /// Up to `limit` characters from the cursor, without consuming them.
    fn remaining(&self, limit: usize) -> String {
        self.chars.iter().skip(self.pos).take(limit).collect()
    }

    /// Consume `expected`, which must be the character under the cursor.
    fn eat(&mut self, expected: char) -> Result<char, LexicalError> {
        match self.peek() {
            None => Err(self.end_of_input()),
            Some(found) if found != expected => Err(LexicalError::ExpectedCharacter {
                expected,
                found,
                line: self.start_line,
                column: self.start_column,
            }),
            Some(found) => {
                self.pos += 1;
                if found == '\n' {
                    self.line += 1;
                    self.column = 1;
                } else {
                    self.column += 1;
                }
                Ok(found)
            }
        }
    }

    fn eat_str(&mut self, expected: &str) -> Result<(), LexicalError> {
        for c in expected.chars() {
            self.eat(c)?;
        }
        Ok(())
    }

    /// Consume whatever character is under the cursor.
    fn bump(&mut self) -> Result<char, LexicalError> {
        match self.peek() {
            Some(c) => self.eat(c),
            None => Err(self.end_of_input()),
        }
    }

    /// A backslash and the character after it are kept verbatim.
    fn escape_into(&mut self, text: &mut String) -> Result<(), LexicalError> {
        text.push(self.eat('\\')?);
        text.push(self.bump()?);
        Ok(())
    }

    fn take_while_in(&mut self, allowed: &str, text: &mut String) -> Result<(), LexicalError> {
        while let Some(c) = self.peek() {
            if !allowed.contains(c) {
                break;
            }
            text.push(self.bump()?);
        }
        Ok(())
    }

    fn take_one_of(&mut self, allowed: &str, text: &mut String) -> Result<(), LexicalError> {
        if self.peek().is_some_and(|c| allowed.contains(c)) {
            text.push(self.bump()?);
        }
        Ok(())
    }

    fn skip_whitespace(&mut self) -> Result<(), LexicalError> {
        while self.peek().is_some_and(is_java_whitespace) {
            self.bump()?;
        }
        Ok(())
    }

    fn end_of_input(&self) -> LexicalError {
        LexicalError::UnexpectedEndOfInput {
            line: self.start_line,
            column: self.start_column,
        }
    }

    fn token(&self, kind: TokenKind, text: impl Into<String>) -> Token {
        Token::new(kind, text, self.start_line, self.start_column)
    }
}

/// Iterator returned by [`Tokenizer::tokens`]
pub struct Tokens<'a> {
    tokenizer: &'a mut Tokenizer,
    finished: bool,
}

impl Iterator for Tokens<'_> {
    type Item = Result<Token, LexicalError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let result = self.tokenizer.next_token();
        self.finished = match &result {
            Ok(token) => token.is_eof(),
            Err(_) => true,
        };
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn first(input: &str) -> Token {
        Tokenizer::new(input).next_token().unwrap()
    }

    #[test]
    fn new_tokenizer_starts_at_origin() {
        let tokenizer = Tokenizer::new("Hello World\n");
        assert_eq!(tokenizer.input(), "Hello World\n");
        assert_eq!(tokenizer.pos(), 0);
        assert_eq!(tokenizer.line(), 1);
        assert_eq!(tokenizer.column(), 1);
    }

    #[test]
    fn reads_input_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"Hello World\n").unwrap();

        let tokenizer = Tokenizer::from_path(file.path()).unwrap();
        assert_eq!(tokenizer.input(), "Hello World\n");
        assert_eq!(tokenizer.pos(), 0);
        assert_eq!(tokenizer.line(), 1);
        assert_eq!(tokenizer.column(), 1);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Tokenizer::from_path(dir.path().join("Nope.java"));
        assert_matches!(result, Err(LexicalError::Io { .. }));
    }

    #[test]
    fn end_of_input_is_repeated() {
        let mut tokenizer = Tokenizer::new("x");
        assert_eq!(tokenizer.next_token().unwrap().kind, TokenKind::Identifier);
        let eof = tokenizer.next_token().unwrap();
        assert!(eof.is_eof());
        assert_eq!((eof.line, eof.column), (1, 2));
        assert_eq!(tokenizer.next_token().unwrap(), eof);
    }

    #[test]
    fn whitespace_only_input_positions_eof_after_whitespace() {
        let eof = first("  \n\t ");
        assert!(eof.is_eof());
        assert_eq!((eof.line, eof.column), (2, 3));
    }

    #[test]
    fn tokens_after_whitespace_get_their_own_position() {
        let mut tokenizer = Tokenizer::new("class\n  Foo");
        let class = tokenizer.next_token().unwrap();
        let name = tokenizer.next_token().unwrap();
        assert_eq!((class.line, class.column), (1, 1));
        assert_eq!((name.line, name.column), (2, 3));
        assert!(name.is(TokenKind::Identifier, "Foo"));
    }

    #[test]
    fn columns_count_characters() {
        let mut tokenizer = Tokenizer::new("\"Hëllo\" x");
        tokenizer.next_token().unwrap();
        let x = tokenizer.next_token().unwrap();
        assert_eq!(x.column, 9);
    }

    #[test]
    fn iterator_includes_eof_then_stops() {
        let mut tokenizer = Tokenizer::new("a = 1;");
        let kinds: Vec<TokenKind> = tokenizer
            .tokens()
            .map(|t| t.unwrap().kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Identifier,
                TokenKind::Operator,
                TokenKind::Number,
                TokenKind::Separator,
                TokenKind::EndOfInput,
            ]
        );
    }

    #[test]
    fn iterator_stops_after_error() {
        let mut tokenizer = Tokenizer::new("a # b");
        let results: Vec<_> = tokenizer.tokens().collect();
        assert_eq!(results.len(), 2);
        assert_matches!(
            results[1],
            Err(LexicalError::UnexpectedCharacter { ch: '#', line: 1, column: 3 })
        );
    }

    #[test]
    fn unterminated_string_hits_end_of_input() {
        let err = Tokenizer::new("\"abc").next_token().unwrap_err();
        assert_matches!(err, LexicalError::UnexpectedEndOfInput { line: 1, column: 1 });
    }

    #[test]
    fn unterminated_character_hits_end_of_input() {
        let err = Tokenizer::new("'a").next_token().unwrap_err();
        assert_matches!(err, LexicalError::UnexpectedEndOfInput { .. });
    }

    #[test]
    fn text_block_requires_line_terminator() {
        let err = Tokenizer::new("\"\"\"  x\"\"\"").next_token().unwrap_err();
        assert_matches!(
            err,
            LexicalError::ExpectedCharacter { expected: '\n', found: 'x', .. }
        );
    }

    #[test]
    fn slash_star_slash_does_not_close() {
        let err = Tokenizer::new("/*/").next_token().unwrap_err();
        assert_eq!(err.to_string(), "Invalid comment at line: 1 column: 1");
    }

    #[test]
    fn leading_dot_without_digit_is_separator() {
        assert!(first(".x").is(TokenKind::Separator, "."));
        assert!(first(".5f").is(TokenKind::Number, ".5f"));
    }

    #[test]
    fn non_sealed_only_folds_after_non() {
        assert!(first("non-sealed").is(TokenKind::ContextualKeyword, "non-sealed"));

        let mut tokenizer = Tokenizer::new("x-sealed");
        assert!(tokenizer.next_token().unwrap().is(TokenKind::Identifier, "x"));
        assert!(tokenizer.next_token().unwrap().is(TokenKind::Operator, "-"));
        assert!(tokenizer.next_token().unwrap().is(TokenKind::ContextualKeyword, "sealed"));
    }

    #[test]
    fn operators_take_longest_match() {
        let mut tokenizer = Tokenizer::new(">>>=>>");
        assert!(tokenizer.next_token().unwrap().is(TokenKind::Operator, ">>>="));
        assert!(tokenizer.next_token().unwrap().is(TokenKind::Operator, ">>"));
    }

    #[test]
    fn metrics_count_by_kind() {
        let preferences = LexicalPreferences {
            collect_detailed_metrics: true,
            include_comments_in_counts: false,
            dump_tokens_on_failure: false,
        };
        let mut metrics = LexicalMetrics::default();
        let mut tokenizer = Tokenizer::new("// note\nint x = \"abc\";");
        for token in tokenizer.tokens() {
            metrics.record_token(&token.unwrap(), &preferences);
        }

        assert_eq!(metrics.total_tokens, 5);
        assert_eq!(metrics.comment_count, 1);
        assert_eq!(metrics.max_comment_length, 7);
        assert_eq!(metrics.max_string_length, 3);
        assert_eq!(metrics.count(TokenKind::Keyword), 1);
        assert_eq!(metrics.count(TokenKind::SingleLineComment), 0);
        assert_eq!(metrics.count(TokenKind::EndOfInput), 1);
        assert_eq!(metrics.last_line, 2);
    }
}
