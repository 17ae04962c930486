//! Token model
//!
//! A [`Token`] pairs a [`TokenKind`] with the lexeme text and the 1-based
//! line and column of its first character. Tokens are plain values; the
//! tokenizer creates each one once and never touches it again.

pub mod token;

pub use token::{Token, TokenKind};
