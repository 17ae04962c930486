//! Configuration for the Java tokenizer
//!
//! Compile-time limits live in [`constants::compile_time`]; runtime
//! preferences come from `JTOK_*` environment variables or a TOML file.

pub mod constants;
pub mod runtime;

pub use constants::compile_time;
pub use runtime::{env_vars, RuntimeConfig};
