//! Per-unit driver: read the unit, run one tokenizer to end-of-input and
//! collect the tokens. A failed scan dumps what was collected so far through
//! the logger before the error is returned.

mod error;
pub mod output;
mod result;
mod validation;

pub use error::PipelineError;
pub use output::PipelineOutput;
pub use result::PipelineResult;
pub use validation::validate_pipeline;

use crate::config::constants::compile_time::lexical::MAX_TOKEN_COUNT;
use crate::config::runtime::{LexicalPreferences, RuntimeConfig};
use crate::file_processor::FileProcessor;
use crate::lexical::{LexicalError, LexicalMetrics, Tokenizer};
use crate::logging::{self, codes};
use crate::tokens::Token;
use crate::utils::{SourceMap, Span};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Tokenize one file with preferences taken from the environment
pub fn process_file(file_path: impl AsRef<Path>) -> Result<PipelineResult, PipelineError> {
    process_file_with_config(file_path, &RuntimeConfig::default(), 0)
}

/// Tokenize one file. `file_id` tags the log events of this unit in batch runs.
pub fn process_file_with_config(
    file_path: impl AsRef<Path>,
    config: &RuntimeConfig,
    file_id: usize,
) -> Result<PipelineResult, PipelineError> {
    let file_path = file_path.as_ref();

    logging::with_file_context(file_path.to_path_buf(), file_id, || {
        let start_time = Instant::now();
        let source_name = file_path.display().to_string();
        log_info!("Starting tokenization", "file" => source_name.as_str());

        let file_result =
            FileProcessor::from_preferences(&config.file_processor).process_file(file_path)?;
        let (tokens, metrics) = scan(&file_result.source, &config.lexical)?;

        let result = PipelineResult {
            source_name,
            tokens,
            metrics,
            metadata: Some(file_result.metadata),
            duration: start_time.elapsed(),
        };
        result.log_success();
        Ok(result)
    })
}

/// Tokenize in-memory text. `name` identifies the unit in logs.
pub fn process_source(name: &str, text: &str) -> Result<PipelineResult, PipelineError> {
    process_source_with_preferences(name, text, &LexicalPreferences::default())
}

pub fn process_source_with_preferences(
    name: &str,
    text: &str,
    preferences: &LexicalPreferences,
) -> Result<PipelineResult, PipelineError> {
    logging::with_file_context(PathBuf::from(name), 0, || {
        let start_time = Instant::now();
        let (tokens, metrics) = scan(text, preferences)?;

        let result = PipelineResult {
            source_name: name.to_string(),
            tokens,
            metrics,
            metadata: None,
            duration: start_time.elapsed(),
        };
        result.log_success();
        Ok(result)
    })
}

/// Drive one tokenizer until end-of-input, inclusive.
fn scan(
    source: &str,
    preferences: &LexicalPreferences,
) -> Result<(Vec<Token>, LexicalMetrics), PipelineError> {
    let mut tokenizer = Tokenizer::new(source);
    let mut tokens = Vec::new();
    let mut metrics = LexicalMetrics::default();

    for next in tokenizer.tokens() {
        let token = match next {
            Ok(token) => token,
            Err(error) => return Err(report_failure(source, &tokens, error, preferences)),
        };

        if tokens.len() >= MAX_TOKEN_COUNT {
            let error = LexicalError::TooManyTokens {
                limit: MAX_TOKEN_COUNT,
                line: token.line,
                column: token.column,
            };
            return Err(report_failure(source, &tokens, error, preferences));
        }

        metrics.record_token(&token, preferences);
        tokens.push(token);
    }

    Ok((tokens, metrics))
}

fn report_failure(
    source: &str,
    collected: &[Token],
    error: LexicalError,
    preferences: &LexicalPreferences,
) -> PipelineError {
    if preferences.dump_tokens_on_failure {
        dump_tokens(collected);
    }

    let message = error.to_string();
    match error.location() {
        Some((line, column)) => {
            let map = SourceMap::new(source.to_string());
            let span = Span::single(map.position_of(line, column));
            log_error!(error.error_code(), &message, span = span);
        }
        None => log_error!(error.error_code(), &message),
    }
    logging::record_current_source(source);

    PipelineError::from(error)
}

/// Log every token produced before a failure, one per line. Warnings pass
/// the log-level floor, so the dump survives an error-only configuration.
fn dump_tokens(collected: &[Token]) {
    let listing = collected
        .iter()
        .map(|token| token.to_string())
        .collect::<Vec<_>>()
        .join("\n");

    log_warning!(code = codes::warnings::TOKEN_DUMP, "Tokens collected before failure",
        "collected" => collected.len(),
        "tokens" => listing);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{LogLevel, LoggingService, MemoryLogger};
    use crate::tokens::TokenKind;
    use assert_matches::assert_matches;
    use std::fs;
    use std::sync::{Arc, OnceLock};
    use tempfile::tempdir;

    /// Memory logger installed as the process-wide logger on first use
    fn memory_logger() -> Arc<MemoryLogger> {
        static MEMORY: OnceLock<Arc<MemoryLogger>> = OnceLock::new();
        MEMORY
            .get_or_init(|| {
                let memory = Arc::new(MemoryLogger::new());
                let service = LoggingService::new(memory.clone(), LogLevel::Debug);
                let _ = logging::init_global_logging_with_service(Arc::new(service));
                memory
            })
            .clone()
    }

    #[test]
    fn validate_pipeline_succeeds() {
        assert!(validate_pipeline().is_ok());
    }

    #[test]
    fn source_is_tokenized_to_eof() {
        let result = process_source("Inline.java", "int x = 0x1F;").unwrap();
        assert_eq!(result.token_count(), 5);
        assert!(result.tokens.last().unwrap().is_eof());
        assert_eq!(result.metrics.count(TokenKind::Number), 1);
        assert!(result.metadata.is_none());
    }

    #[test]
    fn file_is_tokenized_with_metadata() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Point.java");
        fs::write(&path, "record Point(int x, int y) {}\n").unwrap();

        let result = process_file(&path).unwrap();
        assert_eq!(result.tokens[0].kind, TokenKind::ContextualKeyword);
        assert_eq!(result.metadata.as_ref().unwrap().line_count, 1);
        assert_eq!(result.source_name, path.display().to_string());
    }

    #[test]
    fn lexical_failure_propagates() {
        let result = process_source("Broken.java", "class A { char c = ''; }");
        let error = result.unwrap_err();
        assert_matches!(
            error,
            PipelineError::LexicalAnalysis(LexicalError::EmptyCharacterLiteral { line: 1, column: 20 })
        );
        assert_eq!(error.location(), Some((1, 20)));
        assert_eq!(error.error_code(), codes::lexical::EMPTY_CHARACTER_LITERAL);
    }

    #[test]
    fn failed_scan_dumps_every_collected_token() {
        let memory = memory_logger();
        let preferences = LexicalPreferences {
            collect_detailed_metrics: true,
            include_comments_in_counts: true,
            dump_tokens_on_failure: true,
        };
        let source = format!("{}#", "a ".repeat(120));

        let error = process_source_with_preferences("Dump.java", &source, &preferences).unwrap_err();
        assert_matches!(
            error,
            PipelineError::LexicalAnalysis(LexicalError::UnexpectedCharacter {
                ch: '#',
                line: 1,
                column: 241
            })
        );

        let events = memory.get_events();
        let in_unit = |code: logging::Code| {
            events.iter().position(|e| {
                e.code == code && e.context.get("file").map(String::as_str) == Some("Dump.java")
            })
        };
        let dump_at = in_unit(codes::warnings::TOKEN_DUMP).unwrap();
        let error_at = in_unit(codes::lexical::UNEXPECTED_CHARACTER).unwrap();
        assert!(dump_at < error_at);

        let dump = &events[dump_at];
        assert!(dump.is_warning());
        assert_eq!(dump.context["collected"], "120");
        let lines: Vec<&str> = dump.context["tokens"].lines().collect();
        assert_eq!(lines.len(), 120);
        assert_eq!(lines[0], "IDENTIFIER 'a' at 1:1");
        assert_eq!(lines[119], "IDENTIFIER 'a' at 1:239");
    }

    #[test]
    fn missing_file_is_file_processing_error() {
        let dir = tempdir().unwrap();
        let result = process_file(dir.path().join("Gone.java"));
        assert_matches!(result, Err(PipelineError::FileProcessing(_)));
    }

    #[test]
    fn json_output_lists_tokens() {
        let result = process_source("A.java", "a;").unwrap();
        let json = PipelineOutput::new(&result).to_json_pretty().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["source"], "A.java");
        assert_eq!(value["tokens"].as_array().unwrap().len(), 3);
        assert_eq!(value["tokens"][1]["text"], ";");
    }
}
