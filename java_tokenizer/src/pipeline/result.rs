use crate::file_processor::FileMetadata;
use crate::lexical::LexicalMetrics;
use crate::tokens::Token;
use std::time::Duration;

/// Tokens of one unit together with what was measured while producing them
#[derive(Debug, Clone)]
pub struct PipelineResult {
    /// Path or caller-supplied name of the unit
    pub source_name: String,
    pub tokens: Vec<Token>,
    pub metrics: LexicalMetrics,
    /// Present when the unit was read from disk
    pub metadata: Option<FileMetadata>,
    pub duration: Duration,
}

impl PipelineResult {
    /// Tokens excluding the trailing end-of-input marker
    pub fn token_count(&self) -> usize {
        self.tokens.iter().filter(|t| !t.is_eof()).count()
    }

    pub fn tokens_per_second(&self) -> f64 {
        let secs = self.duration.as_secs_f64();
        if secs > 0.0 {
            self.token_count() as f64 / secs
        } else {
            0.0
        }
    }

    pub fn log_success(&self) {
        crate::log_success!(
            crate::logging::codes::success::TOKENIZATION_COMPLETE,
            "Tokenization complete",
            "file" => self.source_name.as_str(),
            "tokens" => self.token_count(),
            "comments" => self.metrics.comment_count,
            "duration_ms" => format!("{:.2}", self.duration.as_secs_f64() * 1000.0),
            "tokens_per_sec" => format!("{:.0}", self.tokens_per_second())
        );
    }
}
