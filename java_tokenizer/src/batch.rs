//! Batch tokenization of a directory tree
//!
//! Discovers `.java` files and runs the per-unit pipeline on each of them,
//! either sequentially or on worker threads. Every unit gets its own
//! tokenizer, so workers share nothing but the result list.

use crate::config::constants::compile_time::batch_processing::{
    MAX_CHUNK_SIZE, MAX_FILES_PER_BATCH, MAX_WORKER_THREADS, MIN_CHUNK_SIZE,
};
use crate::config::constants::compile_time::file_processing::SOURCE_EXTENSION;
use crate::config::runtime::RuntimeConfig;
use crate::logging::codes;
use crate::pipeline::{self, PipelineError, PipelineResult};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

/// Batch processing configuration
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub max_threads: usize,
    pub recursive: bool,
    pub max_files: Option<usize>,
    pub progress_reporting: bool,
    pub fail_fast: bool,
    /// Preferences handed to every pipeline run
    pub runtime: RuntimeConfig,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_threads: thread::available_parallelism()
                .map(|n| n.get().min(MAX_WORKER_THREADS))
                .unwrap_or(4),
            recursive: true,
            max_files: None,
            progress_reporting: true,
            fail_fast: false,
            runtime: RuntimeConfig::default(),
        }
    }
}

#[derive(Debug)]
pub struct BatchResults {
    pub successful_files: Vec<(PathBuf, PipelineResult)>,
    pub failed_files: Vec<(PathBuf, PipelineError)>,
    pub processing_duration: Duration,
    pub files_processed: usize,
    pub files_discovered: usize,
}

impl BatchResults {
    pub fn new() -> Self {
        Self {
            successful_files: Vec::new(),
            failed_files: Vec::new(),
            processing_duration: Duration::new(0, 0),
            files_processed: 0,
            files_discovered: 0,
        }
    }

    pub fn success_count(&self) -> usize {
        self.successful_files.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failed_files.len()
    }

    pub fn success_rate(&self) -> f64 {
        if self.files_processed == 0 {
            0.0
        } else {
            self.successful_files.len() as f64 / self.files_processed as f64
        }
    }

    /// Tokens over all successful units, end-of-input markers excluded
    pub fn total_tokens(&self) -> usize {
        self.successful_files
            .iter()
            .map(|(_, result)| result.token_count())
            .sum()
    }

    pub fn add_success(&mut self, file_path: PathBuf, result: PipelineResult) {
        self.successful_files.push((file_path, result));
        self.files_processed += 1;
    }

    pub fn add_failure(&mut self, file_path: PathBuf, error: PipelineError) {
        self.failed_files.push((file_path, error));
        self.files_processed += 1;
    }

    pub fn merge(&mut self, other: BatchResults) {
        self.successful_files.extend(other.successful_files);
        self.failed_files.extend(other.failed_files);
        self.files_processed += other.files_processed;
    }

    /// Order results by path; worker threads finish in any order.
    pub fn sort(&mut self) {
        self.successful_files.sort_by(|a, b| a.0.cmp(&b.0));
        self.failed_files.sort_by(|a, b| a.0.cmp(&b.0));
    }

    pub fn summary(&self) -> String {
        format!(
            "Batch tokenization completed: {} files processed, {} successful ({:.1}%), {} failed, {} tokens, {:.2}s total",
            self.files_processed,
            self.success_count(),
            self.success_rate() * 100.0,
            self.failure_count(),
            self.total_tokens(),
            self.processing_duration.as_secs_f64()
        )
    }
}

impl Default for BatchResults {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("No .java files found in directory: {path}")]
    NoFilesFound { path: String },

    #[error("Too many files found: {count} (max: {max})")]
    TooManyFiles { count: usize, max: usize },

    #[error("IO error during directory traversal: {error}")]
    IoError { error: String },

    #[error("Worker thread error: {message}")]
    ThreadError { message: String },
}

impl BatchError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            BatchError::DirectoryNotFound { .. } => codes::batch::DIRECTORY_NOT_FOUND,
            BatchError::NoFilesFound { .. } => codes::batch::NO_SOURCE_FILES,
            BatchError::TooManyFiles { .. } => codes::batch::TOO_MANY_FILES,
            BatchError::IoError { .. } => codes::batch::DISCOVERY_IO_ERROR,
            BatchError::ThreadError { .. } => codes::system::WORKER_THREAD_FAILURE,
        }
    }
}

// ============================================================================
// FILE DISCOVERY
// ============================================================================

/// Collect `.java` files under `dir_path`, sorted by path.
pub fn discover_java_files(
    dir_path: &Path,
    config: &BatchConfig,
) -> Result<Vec<PathBuf>, BatchError> {
    log_info!("Starting file discovery",
        "directory" => dir_path.display(),
        "recursive" => config.recursive
    );

    if !dir_path.is_dir() {
        return Err(BatchError::DirectoryNotFound {
            path: dir_path.display().to_string(),
        });
    }

    let mut files = Vec::new();
    visit_directory(dir_path, &mut files, config)?;

    if files.is_empty() {
        return Err(BatchError::NoFilesFound {
            path: dir_path.display().to_string(),
        });
    }

    files.sort();

    if let Some(max_files) = config.max_files {
        if files.len() > max_files {
            log_warning!("Reached maximum file limit",
                "files_found" => files.len(),
                "limit" => max_files
            );
            files.truncate(max_files);
        }
    }

    if files.len() > MAX_FILES_PER_BATCH {
        return Err(BatchError::TooManyFiles {
            count: files.len(),
            max: MAX_FILES_PER_BATCH,
        });
    }

    log_success!(
        codes::success::BATCH_DISCOVERY_COMPLETE,
        "File discovery completed",
        "files_found" => files.len(),
        "directory" => dir_path.display()
    );

    Ok(files)
}

fn visit_directory(
    dir_path: &Path,
    files: &mut Vec<PathBuf>,
    config: &BatchConfig,
) -> Result<(), BatchError> {
    let entries = fs::read_dir(dir_path).map_err(|e| BatchError::IoError {
        error: format!("{}: {}", dir_path.display(), e),
    })?;

    for entry in entries {
        let path = entry
            .map_err(|e| BatchError::IoError {
                error: e.to_string(),
            })?
            .path();

        if path.is_dir() {
            if config.recursive {
                visit_directory(&path, files, config)?;
            }
        } else if is_java_file(&path) {
            files.push(path);
        }
    }

    Ok(())
}

fn is_java_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(SOURCE_EXTENSION))
}

// ============================================================================
// BATCH PROCESSING
// ============================================================================

pub fn process_directory_sequential(
    dir_path: &Path,
    config: &BatchConfig,
) -> Result<BatchResults, BatchError> {
    let start_time = Instant::now();

    log_info!("Starting sequential batch tokenization",
        "directory" => dir_path.display()
    );

    let files = discover_java_files(dir_path, config)?;
    let mut results = BatchResults::new();
    results.files_discovered = files.len();

    for (file_id, file_path) in files.iter().enumerate() {
        if config.progress_reporting {
            println!(
                "Tokenizing file {} of {}: {}",
                file_id + 1,
                files.len(),
                file_path.display()
            );
        }

        match pipeline::process_file_with_config(file_path, &config.runtime, file_id) {
            Ok(result) => results.add_success(file_path.clone(), result),
            Err(error) => {
                log_debug!("File failed", "file" => file_path.display(), "error" => &error);
                results.add_failure(file_path.clone(), error);
                if config.fail_fast {
                    log_warning!("Fail-fast mode enabled, stopping batch processing");
                    break;
                }
            }
        }
    }

    results.processing_duration = start_time.elapsed();
    log_completion("Sequential batch tokenization completed", &results, 1);
    Ok(results)
}

pub fn process_directory_parallel(
    dir_path: &Path,
    config: &BatchConfig,
) -> Result<BatchResults, BatchError> {
    let start_time = Instant::now();
    let threads = config.max_threads.max(1);

    log_info!("Starting parallel batch tokenization",
        "directory" => dir_path.display(),
        "max_threads" => threads
    );

    let files = discover_java_files(dir_path, config)?;
    let mut results = BatchResults::new();
    results.files_discovered = files.len();

    let chunk_size = calculate_chunk_size(files.len(), threads);
    log_debug!("Parallel processing configuration",
        "total_files" => files.len(),
        "chunk_size" => chunk_size,
        "threads" => threads
    );

    for (chunk_index, chunk) in files.chunks(chunk_size).enumerate() {
        let first_id = chunk_index * chunk_size;
        let chunk_results = process_chunk_parallel(chunk, first_id, threads, config)?;
        results.merge(chunk_results);

        if config.fail_fast && results.failure_count() > 0 {
            log_warning!("Fail-fast mode enabled, stopping batch processing");
            break;
        }
    }

    results.sort();
    results.processing_duration = start_time.elapsed();
    log_completion("Parallel batch tokenization completed", &results, threads);
    Ok(results)
}

/// Split one chunk over up to `threads` workers.
fn process_chunk_parallel(
    files: &[PathBuf],
    first_id: usize,
    threads: usize,
    config: &BatchConfig,
) -> Result<BatchResults, BatchError> {
    let results = Arc::new(Mutex::new(BatchResults::new()));
    let runtime = Arc::new(config.runtime.clone());
    let files_per_thread = files.len().div_ceil(threads);

    let mut handles = Vec::new();
    for (thread_index, thread_files) in files.chunks(files_per_thread.max(1)).enumerate() {
        let thread_files = thread_files.to_vec();
        let start_id = first_id + thread_index * files_per_thread;
        let results = Arc::clone(&results);
        let runtime = Arc::clone(&runtime);

        let handle = thread::Builder::new()
            .name(format!("tokenizer-{}", thread_index))
            .spawn(move || {
                for (offset, file_path) in thread_files.into_iter().enumerate() {
                    let outcome =
                        pipeline::process_file_with_config(&file_path, &runtime, start_id + offset);
                    let mut guard = results.lock().unwrap_or_else(PoisonError::into_inner);
                    match outcome {
                        Ok(result) => guard.add_success(file_path, result),
                        Err(error) => guard.add_failure(file_path, error),
                    }
                }
            })
            .map_err(|e| BatchError::ThreadError {
                message: format!("Failed to spawn worker: {}", e),
            })?;
        handles.push(handle);
    }

    for handle in handles {
        handle.join().map_err(|_| BatchError::ThreadError {
            message: "Worker panicked during tokenization".to_string(),
        })?;
    }

    let results = Arc::try_unwrap(results).map_err(|_| BatchError::ThreadError {
        message: "Failed to collect worker results".to_string(),
    })?;
    Ok(results.into_inner().unwrap_or_else(PoisonError::into_inner))
}

/// Files per chunk, clamped so one chunk never holds too many units in memory
fn calculate_chunk_size(file_count: usize, threads: usize) -> usize {
    file_count
        .div_ceil(threads.max(1))
        .clamp(MIN_CHUNK_SIZE, MAX_CHUNK_SIZE)
}

fn log_completion(message: &str, results: &BatchResults, threads: usize) {
    log_success!(
        codes::success::BATCH_PROCESSING_COMPLETE,
        message,
        "files_processed" => results.files_processed,
        "successful" => results.success_count(),
        "failed" => results.failure_count(),
        "tokens" => results.total_tokens(),
        "threads_used" => threads,
        "duration_ms" => format!("{:.2}", results.processing_duration.as_secs_f64() * 1000.0)
    );
}

// ============================================================================
// PUBLIC API
// ============================================================================

pub fn process_directory(dir_path: &Path) -> Result<BatchResults, BatchError> {
    process_directory_with_config(dir_path, &BatchConfig::default())
}

/// One worker thread means sequential processing.
pub fn process_directory_with_config(
    dir_path: &Path,
    config: &BatchConfig,
) -> Result<BatchResults, BatchError> {
    if config.max_threads <= 1 {
        process_directory_sequential(dir_path, config)
    } else {
        process_directory_parallel(dir_path, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use tempfile::tempdir;

    fn quiet_config(max_threads: usize) -> BatchConfig {
        BatchConfig {
            max_threads,
            progress_reporting: false,
            ..BatchConfig::default()
        }
    }

    fn write_tree(root: &Path) {
        fs::create_dir_all(root.join("com/example")).unwrap();
        fs::write(root.join("Main.java"), "class Main {}\n").unwrap();
        fs::write(root.join("com/example/Util.java"), "final class Util {}\n").unwrap();
        fs::write(root.join("com/example/Bad.java"), "class Bad { # }\n").unwrap();
        fs::write(root.join("README.md"), "# not java").unwrap();
    }

    #[test]
    fn discovery_is_recursive_by_default() {
        let dir = tempdir().unwrap();
        write_tree(dir.path());

        let files = discover_java_files(dir.path(), &quiet_config(1)).unwrap();
        assert_eq!(files.len(), 3);
        assert!(files.iter().all(|f| f.extension().unwrap() == "java"));
        assert!(files.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn discovery_single_level() {
        let dir = tempdir().unwrap();
        write_tree(dir.path());

        let config = BatchConfig {
            recursive: false,
            ..quiet_config(1)
        };
        let files = discover_java_files(dir.path(), &config).unwrap();
        assert_eq!(files, vec![dir.path().join("Main.java")]);
    }

    #[test]
    fn discovery_respects_max_files() {
        let dir = tempdir().unwrap();
        write_tree(dir.path());

        let config = BatchConfig {
            max_files: Some(2),
            ..quiet_config(1)
        };
        assert_eq!(discover_java_files(dir.path(), &config).unwrap().len(), 2);
    }

    #[test]
    fn discovery_errors() {
        let dir = tempdir().unwrap();
        assert_matches!(
            discover_java_files(dir.path(), &quiet_config(1)),
            Err(BatchError::NoFilesFound { .. })
        );

        let missing = dir.path().join("missing");
        let error = discover_java_files(&missing, &quiet_config(1)).unwrap_err();
        assert_matches!(error, BatchError::DirectoryNotFound { .. });
        assert_eq!(error.error_code(), codes::batch::DIRECTORY_NOT_FOUND);
    }

    #[test]
    fn sequential_run_records_failures_and_continues() {
        let dir = tempdir().unwrap();
        write_tree(dir.path());

        let results = process_directory_with_config(dir.path(), &quiet_config(1)).unwrap();
        assert_eq!(results.files_processed, 3);
        assert_eq!(results.success_count(), 2);
        assert_eq!(results.failure_count(), 1);
        assert_eq!(results.failed_files[0].0, dir.path().join("com/example/Bad.java"));
        assert_eq!(results.total_tokens(), 9);
    }

    #[test]
    fn sequential_fail_fast_stops_at_first_failure() {
        let dir = tempdir().unwrap();
        write_tree(dir.path());

        let config = BatchConfig {
            fail_fast: true,
            ..quiet_config(1)
        };
        let results = process_directory_with_config(dir.path(), &config).unwrap();
        // Main.java, then com/example/Bad.java; Util.java is never reached
        assert_eq!(results.files_processed, 2);
        assert_eq!(results.success_count(), 1);
        assert_eq!(results.failure_count(), 1);
    }

    #[test]
    fn parallel_run_matches_sequential() {
        let dir = tempdir().unwrap();
        write_tree(dir.path());

        let results = process_directory_with_config(dir.path(), &quiet_config(4)).unwrap();
        assert_eq!(results.files_processed, 3);
        assert_eq!(results.success_count(), 2);
        assert_eq!(results.failure_count(), 1);
        let paths: Vec<_> = results.successful_files.iter().map(|(p, _)| p.clone()).collect();
        assert_eq!(
            paths,
            vec![dir.path().join("Main.java"), dir.path().join("com/example/Util.java")]
        );
    }

    #[test]
    fn chunk_size_calculation() {
        assert_eq!(calculate_chunk_size(100, 4), 25);
        assert_eq!(calculate_chunk_size(10, 4), 3);
        assert_eq!(calculate_chunk_size(1, 4), 1);
        assert_eq!(calculate_chunk_size(0, 4), 1);
        assert_eq!(calculate_chunk_size(200, 4), 50);
    }

    #[test]
    fn batch_config_default() {
        let config = BatchConfig::default();
        assert!(config.max_threads >= 1 && config.max_threads <= MAX_WORKER_THREADS);
        assert!(config.recursive);
        assert!(!config.fail_fast);
        assert!(config.max_files.is_none());
    }

    #[test]
    fn empty_results() {
        let results = BatchResults::new();
        assert_eq!(results.success_rate(), 0.0);
        assert_eq!(results.total_tokens(), 0);
        assert!(results.summary().contains("0 files processed"));
    }
}
