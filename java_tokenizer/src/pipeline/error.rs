use crate::file_processor::FileProcessorError;
use crate::lexical::LexicalError;

/// Pipeline processing errors
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("File processing failed: {0}")]
    FileProcessing(#[from] FileProcessorError),

    #[error("Lexical analysis failed: {0}")]
    LexicalAnalysis(#[from] LexicalError),
}

impl PipelineError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            PipelineError::FileProcessing(e) => e.error_code(),
            PipelineError::LexicalAnalysis(e) => e.error_code(),
        }
    }

    /// Line and column of a lexical failure
    pub fn location(&self) -> Option<(u32, u32)> {
        match self {
            PipelineError::LexicalAnalysis(e) => e.location(),
            _ => None,
        }
    }
}
