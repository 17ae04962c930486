//! Shared source-location primitives used by the tokenizer and the
//! diagnostics layer.

pub mod span;

pub use span::{Position, SourceMap, Span};
