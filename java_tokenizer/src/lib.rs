//! Java 21 tokenizer
//!
//! Splits Java source into positioned tokens, one compilation unit at a
//! time, with a batch driver for whole source trees.

#[macro_use]
pub mod logging;
pub mod batch;
pub mod config;
pub mod file_processor;
pub mod grammar;
pub mod lexical;
pub mod pipeline;
pub mod tokens;
pub mod utils;

// Re-export key types for library consumers
pub use batch::{BatchConfig, BatchError, BatchResults};
pub use lexical::{tokenize, LexicalError, Tokenizer};
pub use pipeline::{PipelineError, PipelineOutput, PipelineResult};
pub use tokens::{Token, TokenKind};
