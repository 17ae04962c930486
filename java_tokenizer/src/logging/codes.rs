//! Error and success codes with their classification metadata
//!
//! Every code the crate emits is declared here together with its category,
//! severity and recovery behaviour.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Code attached to every log event, error or success
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for an error code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub const fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// CODE CONSTANTS
// ============================================================================

pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
    pub const WORKER_THREAD_FAILURE: Code = Code::new("ERR003");
    pub const CONFIGURATION_ERROR: Code = Code::new("ERR004");
}

pub mod file_processing {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E005");
    pub const INVALID_EXTENSION: Code = Code::new("E006");
    pub const FILE_TOO_LARGE: Code = Code::new("E007");
    pub const EMPTY_FILE: Code = Code::new("E008");
    pub const PERMISSION_DENIED: Code = Code::new("E009");
    pub const INVALID_ENCODING: Code = Code::new("E010");
    pub const IO_ERROR: Code = Code::new("E011");
    pub const INVALID_PATH: Code = Code::new("E012");
    pub const TOO_MANY_LINES: Code = Code::new("E013");
}

/// Failures raised by the tokenizer itself
pub mod lexical {
    use super::Code;

    pub const UNEXPECTED_CHARACTER: Code = Code::new("E020");
    pub const UNEXPECTED_END_OF_INPUT: Code = Code::new("E021");
    pub const INVALID_COMMENT: Code = Code::new("E022");
    pub const EMPTY_CHARACTER_LITERAL: Code = Code::new("E023");
    pub const EXPECTED_CHARACTER: Code = Code::new("E024");
    pub const SOURCE_READ_FAILURE: Code = Code::new("E025");
    pub const TOO_MANY_TOKENS: Code = Code::new("E026");
}

pub mod batch {
    use super::Code;

    pub const DIRECTORY_NOT_FOUND: Code = Code::new("E030");
    pub const NO_SOURCE_FILES: Code = Code::new("E031");
    pub const TOO_MANY_FILES: Code = Code::new("E032");
    pub const DISCOVERY_IO_ERROR: Code = Code::new("E033");
}

pub mod warnings {
    use super::Code;

    pub const LARGE_FILE: Code = Code::new("W010");
    pub const EXTENSION_MISMATCH: Code = Code::new("W011");
    pub const TOKEN_DUMP: Code = Code::new("W012");
}

pub mod success {
    use super::Code;

    pub const OPERATION_COMPLETED_SUCCESSFULLY: Code = Code::new("I001");
    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");

    pub const FILE_PROCESSING_SUCCESS: Code = Code::new("I006");
    pub const FILE_VALIDATION_PASSED: Code = Code::new("I007");

    pub const TOKENIZATION_COMPLETE: Code = Code::new("I020");

    pub const BATCH_DISCOVERY_COMPLETE: Code = Code::new("I030");
    pub const BATCH_PROCESSING_COMPLETE: Code = Code::new("I031");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

const REGISTRY_ENTRIES: &[ErrorMetadata] = &[
    // System
    ErrorMetadata::new(
        "ERR001",
        "System",
        Severity::Critical,
        false,
        true,
        "Critical internal error",
        "File a bug report with the input that triggered it",
    ),
    ErrorMetadata::new(
        "ERR002",
        "System",
        Severity::Critical,
        false,
        true,
        "Logging system initialization failure",
        "Check runtime configuration and environment variables",
    ),
    ErrorMetadata::new(
        "ERR003",
        "System",
        Severity::High,
        false,
        true,
        "A batch worker thread panicked",
        "Re-run with --sequential to isolate the failing file",
    ),
    ErrorMetadata::new(
        "ERR004",
        "System",
        Severity::High,
        false,
        true,
        "Runtime configuration could not be loaded",
        "Fix the TOML file named by JTOK_CONFIG_FILE",
    ),
    // File processing
    ErrorMetadata::new(
        "E005",
        "FileProcessing",
        Severity::Medium,
        false,
        true,
        "File not found at specified path",
        "Check file path and ensure file exists",
    ),
    ErrorMetadata::new(
        "E006",
        "FileProcessing",
        Severity::Low,
        true,
        false,
        "File does not have a .java extension",
        "Rename the file or disable JTOK_REQUIRE_JAVA_EXTENSION",
    ),
    ErrorMetadata::new(
        "E007",
        "FileProcessing",
        Severity::Medium,
        false,
        true,
        "File exceeds maximum size limit",
        "Split the compilation unit or raise the size limit",
    ),
    ErrorMetadata::new(
        "E008",
        "FileProcessing",
        Severity::Low,
        true,
        false,
        "File is empty while empty files are rejected",
        "Provide a file with content or disable JTOK_REJECT_EMPTY_FILES",
    ),
    ErrorMetadata::new(
        "E009",
        "FileProcessing",
        Severity::Medium,
        false,
        true,
        "Permission denied accessing file",
        "Check file permissions and user access rights",
    ),
    ErrorMetadata::new(
        "E010",
        "FileProcessing",
        Severity::Medium,
        false,
        true,
        "File is not valid UTF-8",
        "Re-encode the source file as UTF-8",
    ),
    ErrorMetadata::new(
        "E011",
        "FileProcessing",
        Severity::Medium,
        false,
        true,
        "I/O error while reading file",
        "Check the file system and retry",
    ),
    ErrorMetadata::new(
        "E012",
        "FileProcessing",
        Severity::Medium,
        false,
        true,
        "Path is not a regular file",
        "Pass a .java file or a directory",
    ),
    ErrorMetadata::new(
        "E013",
        "FileProcessing",
        Severity::Medium,
        false,
        true,
        "File exceeds maximum line count",
        "Split the compilation unit",
    ),
    // Lexical
    ErrorMetadata::new(
        "E020",
        "Lexical",
        Severity::High,
        false,
        true,
        "Character does not start any token",
        "Check the source compiles; the tokenizer expects valid Java",
    ),
    ErrorMetadata::new(
        "E021",
        "Lexical",
        Severity::High,
        false,
        true,
        "Input ended inside a literal",
        "Close the string, character or text block literal",
    ),
    ErrorMetadata::new(
        "E022",
        "Lexical",
        Severity::High,
        false,
        true,
        "Block comment is never closed",
        "Terminate the comment with */",
    ),
    ErrorMetadata::new(
        "E023",
        "Lexical",
        Severity::High,
        false,
        true,
        "Character literal has no content",
        "Put exactly one character or escape between the quotes",
    ),
    ErrorMetadata::new(
        "E024",
        "Lexical",
        Severity::High,
        false,
        true,
        "Required character missing, e.g. the line break after an opening text block delimiter",
        "Start text block content on the line after the opening delimiter",
    ),
    ErrorMetadata::new(
        "E025",
        "Lexical",
        Severity::Medium,
        false,
        true,
        "Source could not be read for tokenization",
        "Check the path and file permissions",
    ),
    ErrorMetadata::new(
        "E026",
        "Lexical",
        Severity::High,
        false,
        true,
        "File produced more tokens than the configured limit",
        "Split the compilation unit",
    ),
    // Batch
    ErrorMetadata::new(
        "E030",
        "Batch",
        Severity::Medium,
        false,
        true,
        "Directory not found",
        "Check the directory path",
    ),
    ErrorMetadata::new(
        "E031",
        "Batch",
        Severity::Low,
        true,
        false,
        "No .java files found",
        "Point at a directory containing Java sources or drop --no-recursive",
    ),
    ErrorMetadata::new(
        "E032",
        "Batch",
        Severity::Medium,
        false,
        true,
        "Too many files for a single batch",
        "Raise --max-files or process subdirectories separately",
    ),
    ErrorMetadata::new(
        "E033",
        "Batch",
        Severity::Medium,
        false,
        true,
        "I/O error while walking the directory tree",
        "Check directory permissions",
    ),
];

static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        REGISTRY_ENTRIES
            .iter()
            .map(|metadata| (metadata.code, metadata.clone()))
            .collect()
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

pub fn get_severity(code: &str) -> Severity {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

pub fn is_recoverable(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

/// Whether processing of the current file must stop
pub fn requires_halt(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

pub fn get_description(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

pub fn get_action(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

pub fn get_category(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}
