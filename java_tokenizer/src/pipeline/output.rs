use super::PipelineResult;
use crate::lexical::LexicalMetrics;
use crate::tokens::Token;
use serde::Serialize;

/// Serializable view of a pipeline run, printed by `--json`
#[derive(Debug, Serialize)]
pub struct PipelineOutput<'a> {
    pub source: &'a str,
    pub tokens: &'a [Token],
    pub metrics: &'a LexicalMetrics,
}

impl<'a> PipelineOutput<'a> {
    pub fn new(result: &'a PipelineResult) -> Self {
        Self {
            source: &result.source_name,
            tokens: &result.tokens,
            metrics: &result.metrics,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
