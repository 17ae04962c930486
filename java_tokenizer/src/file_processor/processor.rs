//! Reads one compilation unit into memory and validates it against the
//! compile-time limits before it reaches the tokenizer.

use crate::config::constants::compile_time::file_processing::{
    LARGE_FILE_THRESHOLD, MAX_FILE_SIZE, MAX_LINE_COUNT, SOURCE_EXTENSION,
};
use crate::config::runtime::FileProcessorPreferences;
use crate::logging::codes;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime};

/// File processor specific errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum FileProcessorError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid file extension: expected .java, found {extension:?}")]
    InvalidExtension { extension: Option<String> },

    #[error("File too large: {size} bytes (max: {max_size})")]
    FileTooLarge { size: u64, max_size: u64 },

    #[error("File is empty")]
    EmptyFile,

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("Invalid UTF-8 encoding in file: {path}")]
    InvalidEncoding { path: String },

    #[error("I/O error reading file: {message}")]
    IoError { message: String },

    #[error("Invalid file path: {path}")]
    InvalidPath { path: String },

    #[error("File exceeds maximum line count: {lines} (max: {max_lines})")]
    TooManyLines { lines: usize, max_lines: usize },
}

impl FileProcessorError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            FileProcessorError::FileNotFound { .. } => codes::file_processing::FILE_NOT_FOUND,
            FileProcessorError::InvalidExtension { .. } => {
                codes::file_processing::INVALID_EXTENSION
            }
            FileProcessorError::FileTooLarge { .. } => codes::file_processing::FILE_TOO_LARGE,
            FileProcessorError::EmptyFile => codes::file_processing::EMPTY_FILE,
            FileProcessorError::PermissionDenied { .. } => {
                codes::file_processing::PERMISSION_DENIED
            }
            FileProcessorError::InvalidEncoding { .. } => codes::file_processing::INVALID_ENCODING,
            FileProcessorError::IoError { .. } => codes::file_processing::IO_ERROR,
            FileProcessorError::InvalidPath { .. } => codes::file_processing::INVALID_PATH,
            FileProcessorError::TooManyLines { .. } => codes::file_processing::TOO_MANY_LINES,
        }
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }

    pub fn category(&self) -> &'static str {
        codes::get_category(self.error_code().as_str())
    }

    pub fn is_recoverable(&self) -> bool {
        codes::is_recoverable(self.error_code().as_str())
    }

    fn from_io(path: &Path, error: std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::NotFound => FileProcessorError::FileNotFound {
                path: path.display().to_string(),
            },
            std::io::ErrorKind::PermissionDenied => FileProcessorError::PermissionDenied {
                path: path.display().to_string(),
            },
            std::io::ErrorKind::InvalidData => FileProcessorError::InvalidEncoding {
                path: path.display().to_string(),
            },
            _ => FileProcessorError::IoError {
                message: format!("'{}': {}", path.display(), error),
            },
        }
    }
}

/// File metadata collected during processing
#[derive(Debug, Clone)]
pub struct FileMetadata {
    /// Canonical file path
    pub path: PathBuf,
    pub size: u64,
    /// Lower-cased extension, if any
    pub extension: Option<String>,
    pub line_count: usize,
    pub is_java_file: bool,
    pub modified: Option<SystemTime>,
}

impl FileMetadata {
    pub fn human_readable_size(&self) -> String {
        human_readable(self.size)
    }

    pub fn is_large_file(&self) -> bool {
        self.size > LARGE_FILE_THRESHOLD
    }
}

fn human_readable(size: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut scaled = size as f64;
    let mut unit_index = 0;

    while scaled >= 1024.0 && unit_index < UNITS.len() - 1 {
        scaled /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", size, UNITS[0])
    } else {
        format!("{:.2} {}", scaled, UNITS[unit_index])
    }
}

/// Source text of one unit plus what was learned while reading it
#[derive(Debug, Clone)]
pub struct FileProcessingResult {
    pub source: String,
    pub metadata: FileMetadata,
    pub processing_duration: Duration,
}

impl FileProcessingResult {
    pub fn char_count(&self) -> usize {
        self.source.chars().count()
    }

    /// Characters read per millisecond
    pub fn processing_rate(&self) -> f64 {
        let duration_ms = self.processing_duration.as_secs_f64() * 1000.0;
        if duration_ms > 0.0 {
            self.char_count() as f64 / duration_ms
        } else {
            0.0
        }
    }
}

pub struct FileProcessor {
    pub require_java_extension: bool,
    pub reject_empty_files: bool,
    pub enable_performance_logging: bool,
}

impl FileProcessor {
    pub fn new() -> Self {
        Self {
            require_java_extension: false,
            reject_empty_files: false,
            enable_performance_logging: true,
        }
    }

    pub fn from_preferences(prefs: &FileProcessorPreferences) -> Self {
        Self {
            require_java_extension: prefs.require_java_extension,
            reject_empty_files: prefs.reject_empty_files,
            enable_performance_logging: prefs.enable_performance_logging,
        }
    }

    pub fn with_java_extension_required(mut self, required: bool) -> Self {
        self.require_java_extension = required;
        self
    }

    pub fn with_empty_files_rejected(mut self, rejected: bool) -> Self {
        self.reject_empty_files = rejected;
        self
    }

    /// Read and validate one source unit.
    pub fn process_file(
        &self,
        file_path: impl AsRef<Path>,
    ) -> Result<FileProcessingResult, FileProcessorError> {
        let start_time = Instant::now();
        let file_path = file_path.as_ref();
        let display = file_path.display().to_string();

        log_debug!("Starting file processing", "file" => display.as_str());

        let path = self.validate_path(file_path)?;
        let mut metadata = self.collect_metadata(&path)?;
        self.validate_metadata(&metadata, &display)?;
        let source = self.read_source(&path, &display)?;

        let line_count = source.lines().count();
        if line_count > MAX_LINE_COUNT {
            let error = FileProcessorError::TooManyLines {
                lines: line_count,
                max_lines: MAX_LINE_COUNT,
            };
            log_error!(error.error_code(), "File exceeds maximum line count",
                "file" => display.as_str(),
                "lines" => line_count,
                "max_lines" => MAX_LINE_COUNT);
            return Err(error);
        }
        metadata.line_count = line_count;

        let result = FileProcessingResult {
            source,
            metadata,
            processing_duration: start_time.elapsed(),
        };
        self.log_processing_success(&result, &display);
        Ok(result)
    }

    fn log_processing_success(&self, result: &FileProcessingResult, file_path: &str) {
        let duration_ms = format!("{:.2}", result.processing_duration.as_secs_f64() * 1000.0);

        if self.enable_performance_logging {
            let rate = format!("{:.2}", result.processing_rate());
            log_success!(
                codes::success::FILE_PROCESSING_SUCCESS,
                "File read with performance metrics",
                "file" => file_path,
                "size_bytes" => result.metadata.size,
                "size_human" => result.metadata.human_readable_size(),
                "lines" => result.metadata.line_count,
                "chars" => result.char_count(),
                "duration_ms" => duration_ms,
                "chars_per_ms" => rate
            );
        } else {
            log_success!(
                codes::success::FILE_PROCESSING_SUCCESS,
                "File read",
                "file" => file_path,
                "lines" => result.metadata.line_count,
                "duration_ms" => duration_ms
            );
        }
    }

    fn validate_path(&self, file_path: &Path) -> Result<PathBuf, FileProcessorError> {
        let display = file_path.display().to_string();

        if file_path.as_os_str().is_empty() {
            let error = FileProcessorError::InvalidPath { path: display };
            log_error!(error.error_code(), "Empty file path provided");
            return Err(error);
        }

        if !file_path.exists() {
            let error = FileProcessorError::FileNotFound {
                path: display.clone(),
            };
            log_error!(error.error_code(), "File not found", "path" => display.as_str());
            return Err(error);
        }

        if !file_path.is_file() {
            let error = FileProcessorError::InvalidPath {
                path: display.clone(),
            };
            log_error!(error.error_code(), "Path is not a file", "path" => display.as_str());
            return Err(error);
        }

        file_path.canonicalize().map_err(|e| {
            let error = FileProcessorError::from_io(file_path, e);
            log_error!(error.error_code(), "Failed to resolve path",
                "path" => display.as_str(),
                "reason" => &error);
            error
        })
    }

    fn collect_metadata(&self, path: &Path) -> Result<FileMetadata, FileProcessorError> {
        let metadata = fs::metadata(path).map_err(|e| {
            let error = FileProcessorError::from_io(path, e);
            log_error!(error.error_code(), "Failed to read file metadata",
                "path" => path.display(),
                "reason" => &error);
            error
        })?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|s| s.to_lowercase());
        let is_java_file = extension.as_deref() == Some(SOURCE_EXTENSION);

        let file_metadata = FileMetadata {
            path: path.to_path_buf(),
            size: metadata.len(),
            extension,
            line_count: 0,
            is_java_file,
            modified: metadata.modified().ok(),
        };

        log_debug!("File metadata collected",
            "size_bytes" => file_metadata.size,
            "extension" => file_metadata.extension.as_deref().unwrap_or("none"),
            "is_java" => is_java_file);

        Ok(file_metadata)
    }

    fn validate_metadata(
        &self,
        metadata: &FileMetadata,
        file_path: &str,
    ) -> Result<(), FileProcessorError> {
        if metadata.size > MAX_FILE_SIZE {
            let error = FileProcessorError::FileTooLarge {
                size: metadata.size,
                max_size: MAX_FILE_SIZE,
            };
            log_error!(error.error_code(), "File exceeds maximum size",
                "file" => file_path,
                "size_human" => metadata.human_readable_size(),
                "limit_human" => human_readable(MAX_FILE_SIZE));
            return Err(error);
        }

        if metadata.size == 0 && self.reject_empty_files {
            let error = FileProcessorError::EmptyFile;
            log_error!(error.error_code(), "File is empty", "file" => file_path);
            return Err(error);
        }

        if !metadata.is_java_file {
            let extension = metadata.extension.as_deref().unwrap_or("none");
            if self.require_java_extension {
                let error = FileProcessorError::InvalidExtension {
                    extension: metadata.extension.clone(),
                };
                log_error!(error.error_code(), "File does not have the .java extension",
                    "file" => file_path,
                    "extension" => extension);
                return Err(error);
            }
            log_warning!(code = codes::warnings::EXTENSION_MISMATCH,
                "Tokenizing a file without the .java extension",
                "file" => file_path,
                "extension" => extension);
        }

        if metadata.is_large_file() {
            log_warning!(code = codes::warnings::LARGE_FILE, "Large source file",
                "file" => file_path,
                "size_human" => metadata.human_readable_size());
        }

        Ok(())
    }

    fn read_source(&self, path: &Path, file_path: &str) -> Result<String, FileProcessorError> {
        fs::read_to_string(path).map_err(|e| {
            let error = FileProcessorError::from_io(path, e);
            log_error!(error.error_code(), "Failed to read file",
                "file" => file_path,
                "reason" => &error);
            error
        })
    }
}

impl Default for FileProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use tempfile::tempdir;

    #[test]
    fn reads_java_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("Hello.java");
        let content = "class Hello {\n}\n";
        fs::write(&file_path, content).unwrap();

        let result = FileProcessor::new().process_file(&file_path).unwrap();
        assert_eq!(result.source, content);
        assert_eq!(result.metadata.line_count, 2);
        assert!(result.metadata.is_java_file);
        assert_eq!(result.char_count(), content.chars().count());
    }

    #[test]
    fn missing_file() {
        let dir = tempdir().unwrap();
        let result = FileProcessor::new().process_file(dir.path().join("Nope.java"));
        assert_matches!(result, Err(FileProcessorError::FileNotFound { .. }));
    }

    #[test]
    fn directory_is_not_a_file() {
        let dir = tempdir().unwrap();
        let result = FileProcessor::new().process_file(dir.path());
        assert_matches!(result, Err(FileProcessorError::InvalidPath { .. }));
    }

    #[test]
    fn oversized_file_is_rejected() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("Large.java");
        fs::write(&file_path, "a".repeat((MAX_FILE_SIZE + 1) as usize)).unwrap();

        let result = FileProcessor::new().process_file(&file_path);
        assert_matches!(
            result,
            Err(FileProcessorError::FileTooLarge { max_size, .. }) if max_size == MAX_FILE_SIZE
        );
    }

    #[test]
    fn extension_requirement() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("notes.txt");
        fs::write(&file_path, "class A {}").unwrap();

        let strict = FileProcessor::new().with_java_extension_required(true);
        assert_matches!(
            strict.process_file(&file_path),
            Err(FileProcessorError::InvalidExtension { extension: Some(ext) }) if ext == "txt"
        );

        let lenient = FileProcessor::new();
        let result = lenient.process_file(&file_path).unwrap();
        assert!(!result.metadata.is_java_file);
    }

    #[test]
    fn empty_file_is_allowed_by_default() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("Empty.java");
        fs::write(&file_path, "").unwrap();

        let result = FileProcessor::new().process_file(&file_path).unwrap();
        assert!(result.source.is_empty());
        assert_eq!(result.metadata.line_count, 0);

        let strict = FileProcessor::new().with_empty_files_rejected(true);
        assert_matches!(strict.process_file(&file_path), Err(FileProcessorError::EmptyFile));
    }

    #[test]
    fn too_many_lines() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("Lines.java");
        fs::write(&file_path, "\n".repeat(MAX_LINE_COUNT + 1)).unwrap();

        let result = FileProcessor::new().process_file(&file_path);
        assert_matches!(
            result,
            Err(FileProcessorError::TooManyLines { max_lines, .. }) if max_lines == MAX_LINE_COUNT
        );
    }

    #[test]
    fn invalid_utf8_is_an_encoding_error() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("Latin1.java");
        fs::write(&file_path, [0x63, 0x6c, 0xe9, 0xff]).unwrap();

        let result = FileProcessor::new().process_file(&file_path);
        assert_matches!(result, Err(FileProcessorError::InvalidEncoding { .. }));
    }

    #[test]
    fn human_readable_sizes() {
        assert_eq!(human_readable(512), "512 B");
        assert_eq!(human_readable(1536), "1.50 KB");
        assert_eq!(human_readable(MAX_FILE_SIZE), "10.00 MB");
    }

    #[test]
    fn error_metadata() {
        let error = FileProcessorError::FileNotFound {
            path: "A.java".to_string(),
        };
        assert_eq!(error.error_code().as_str(), "E005");
        assert_eq!(error.category(), "FileProcessing");
        assert!(!error.is_recoverable());
        assert!(error.requires_halt());

        let error = FileProcessorError::TooManyLines {
            lines: 3,
            max_lines: 2,
        };
        assert_eq!(error.error_code(), codes::file_processing::TOO_MANY_LINES);
    }

    #[test]
    fn from_preferences() {
        let prefs = FileProcessorPreferences {
            require_java_extension: true,
            reject_empty_files: true,
            enable_performance_logging: false,
        };
        let processor = FileProcessor::from_preferences(&prefs);
        assert!(processor.require_java_extension);
        assert!(processor.reject_empty_files);
        assert!(!processor.enable_performance_logging);
    }
}
