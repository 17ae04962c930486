//! Per-file event collection with cargo-style rendering
//!
//! Batch runs record every warning and error against the file being
//! processed; the CLI renders the result once all files are done.

use super::events::LogEvent;
use crate::config::compile_time::logging::*;
use crate::utils::SourceMap;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

// ============================================================================
// FILE PROCESSING CONTEXT
// ============================================================================

#[derive(Debug, Clone)]
pub struct FileProcessingContext {
    pub file_path: PathBuf,
    pub file_id: usize,
    pub start_time: Instant,
}

impl FileProcessingContext {
    pub fn new(file_path: PathBuf, file_id: usize) -> Self {
        Self {
            file_path,
            file_id,
            start_time: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

// ============================================================================
// PROCESSING SUMMARY
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct ProcessingSummary {
    pub total_files: usize,
    pub successful_files: usize,
    pub failed_files: usize,
    pub files_with_warnings: usize,
    pub total_errors: usize,
    pub total_warnings: usize,
    pub total_processing_time: Duration,
}

impl ProcessingSummary {
    pub fn has_errors(&self) -> bool {
        self.total_errors > 0
    }

    pub fn has_warnings(&self) -> bool {
        self.total_warnings > 0
    }
}

// ============================================================================
// ERROR COLLECTOR
// ============================================================================

/// Thread-safe collector shared by batch workers
pub struct ErrorCollector {
    file_events: Mutex<BTreeMap<PathBuf, Vec<LogEvent>>>,
    file_contexts: Mutex<BTreeMap<PathBuf, FileProcessingContext>>,
    /// Sources of files that failed, kept for caret rendering
    failed_sources: Mutex<BTreeMap<PathBuf, SourceMap>>,
    processing_start: Instant,
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self {
            file_events: Mutex::new(BTreeMap::new()),
            file_contexts: Mutex::new(BTreeMap::new()),
            failed_sources: Mutex::new(BTreeMap::new()),
            processing_start: Instant::now(),
        }
    }

    /// Record an event for a file. Past the per-file limit a single
    /// truncation warning is appended and further events are dropped.
    pub fn record_event(&self, file_path: &Path, event: LogEvent) {
        let mut events = self.file_events.lock().unwrap_or_else(PoisonError::into_inner);
        let total: usize = events.values().map(|v| v.len()).sum();
        if total >= MAX_ERROR_COLLECTION && event.is_error() {
            return;
        }

        let file_events = events.entry(file_path.to_path_buf()).or_default();

        if file_events.len() < MAX_LOG_EVENTS_PER_FILE {
            file_events.push(event);
        } else if file_events.len() == MAX_LOG_EVENTS_PER_FILE {
            file_events.push(LogEvent::warning(&format!(
                "Too many events for file (limit: {})",
                MAX_LOG_EVENTS_PER_FILE
            )));
        }
    }

    pub fn record_file_context(&self, context: FileProcessingContext) {
        let mut contexts = self.file_contexts.lock().unwrap_or_else(PoisonError::into_inner);
        contexts.insert(context.file_path.clone(), context);
    }

    /// Keep the source of a failed file so its errors render with a caret
    pub fn record_source(&self, file_path: &Path, source: &str) {
        let mut sources = self.failed_sources.lock().unwrap_or_else(PoisonError::into_inner);
        sources.insert(file_path.to_path_buf(), SourceMap::new(source.to_string()));
    }

    pub fn get_file_events(&self, file_path: &Path) -> Vec<LogEvent> {
        let events = self.file_events.lock().unwrap_or_else(PoisonError::into_inner);
        events.get(file_path).cloned().unwrap_or_default()
    }

    pub fn get_file_errors(&self, file_path: &Path) -> Vec<LogEvent> {
        let events = self.file_events.lock().unwrap_or_else(PoisonError::into_inner);
        events
            .get(file_path)
            .map(|events| events.iter().filter(|e| e.is_error()).cloned().collect())
            .unwrap_or_default()
    }

    pub fn file_has_errors(&self, file_path: &Path) -> bool {
        !self.get_file_errors(file_path).is_empty()
    }

    pub fn get_all_file_events(&self) -> BTreeMap<PathBuf, Vec<LogEvent>> {
        self.file_events.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn get_files_with_errors(&self) -> Vec<PathBuf> {
        let events = self.file_events.lock().unwrap_or_else(PoisonError::into_inner);
        events
            .iter()
            .filter(|(_, events)| events.iter().any(|e| e.is_error()))
            .map(|(path, _)| path.clone())
            .collect()
    }

    pub fn get_summary(&self) -> ProcessingSummary {
        let events = self.file_events.lock().unwrap_or_else(PoisonError::into_inner);

        let mut summary = ProcessingSummary {
            total_files: events.len(),
            total_processing_time: self.processing_start.elapsed(),
            ..Default::default()
        };

        for file_events in events.values() {
            let errors = file_events.iter().filter(|e| e.is_error()).count();
            let warnings = file_events.iter().filter(|e| e.is_warning()).count();

            if errors > 0 {
                summary.failed_files += 1;
            } else if warnings > 0 {
                summary.files_with_warnings += 1;
            } else {
                summary.successful_files += 1;
            }

            summary.total_errors += errors;
            summary.total_warnings += warnings;
        }

        summary
    }

    pub fn total_event_count(&self) -> usize {
        let events = self.file_events.lock().unwrap_or_else(PoisonError::into_inner);
        events.values().map(|v| v.len()).sum()
    }

    /// (current, max, fraction) against the global log buffer
    pub fn get_capacity_info(&self) -> (usize, usize, f64) {
        let current = self.total_event_count();
        let max = LOG_BUFFER_SIZE;
        (current, max, current as f64 / max as f64)
    }

    pub fn clear(&self) {
        self.file_events.lock().unwrap_or_else(PoisonError::into_inner).clear();
        self.file_contexts.lock().unwrap_or_else(PoisonError::into_inner).clear();
        self.failed_sources.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }

    fn source_excerpt(&self, file_path: &Path, event: &LogEvent) -> Option<String> {
        let span = event.span.as_ref()?;
        let sources = self.failed_sources.lock().unwrap_or_else(PoisonError::into_inner);
        let map = sources.get(file_path)?;
        let line = map.get_line(span.start.line)?;
        let number = span.start.line.to_string();
        let gutter = " ".repeat(number.len());
        let indent = " ".repeat(span.start.column.saturating_sub(1) as usize);
        Some(format!(
            "{gutter} |\n{number} | {line}\n{gutter} | {indent}^\n"
        ))
    }
}

impl Default for ErrorCollector {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// CARGO-STYLE FORMATTING
// ============================================================================

fn sorted_context(event: &LogEvent) -> Vec<(&String, &String)> {
    let mut context: Vec<_> = event
        .context
        .iter()
        .filter(|(key, _)| key.as_str() != "file" && key.as_str() != "file_id")
        .collect();
    context.sort();
    context
}

/// Render collected warnings and errors grouped by file
pub fn format_cargo_style_errors(collector: &ErrorCollector) -> String {
    let mut output = String::new();

    for (file_path, events) in &collector.get_all_file_events() {
        let error_events: Vec<_> = events.iter().filter(|e| e.is_error()).collect();
        let warning_events: Vec<_> = events.iter().filter(|e| e.is_warning()).collect();

        if error_events.is_empty() && warning_events.is_empty() {
            continue;
        }

        output.push_str(&format!("Checking {}...\n", file_path.display()));

        for event in error_events {
            let location = event
                .span
                .as_ref()
                .map(|s| {
                    format!(
                        "\n  --> {}:{}:{}",
                        file_path.display(),
                        s.start.line,
                        s.start.column
                    )
                })
                .unwrap_or_default();

            output.push_str(&format!(
                "error[{}]: {}{}\n",
                event.code.as_str(),
                event.message,
                location
            ));

            if let Some(excerpt) = collector.source_excerpt(file_path, event) {
                output.push_str(&excerpt);
            }

            output.push_str(&format!(
                "  = severity: {}, category: {}\n",
                event.severity(),
                event.category()
            ));

            for (key, value) in sorted_context(event) {
                output.push_str(&format!("  = {}: {}\n", key, value));
            }

            let action = event.recommended_action();
            if action != "No specific action available" {
                output.push_str(&format!("  = help: {}\n", action));
            }
        }

        for event in warning_events {
            output.push_str(&format!(
                "warning[{}]: {}\n",
                event.code.as_str(),
                event.message
            ));
            for (key, value) in sorted_context(event) {
                output.push_str(&format!("  = {}: {}\n", key, value));
            }
        }

        output.push('\n');
    }

    let summary = collector.get_summary();
    if summary.total_errors > 0 {
        output.push_str(&format!("Total errors: {}\n", summary.total_errors));
    }
    if summary.total_warnings > 0 {
        output.push_str(&format!("Total warnings: {}\n", summary.total_warnings));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::codes;
    use crate::utils::{Position, Span};

    #[test]
    fn test_processing_summary() {
        let collector = ErrorCollector::new();
        let broken = PathBuf::from("Broken.java");
        let large = PathBuf::from("Large.java");
        let clean = PathBuf::from("Clean.java");

        collector.record_event(
            &broken,
            LogEvent::error(codes::lexical::INVALID_COMMENT, "Invalid comment"),
        );
        collector.record_event(&large, LogEvent::warning("Large file"));
        collector.record_event(
            &clean,
            LogEvent::success(codes::success::TOKENIZATION_COMPLETE, "done"),
        );

        let summary = collector.get_summary();
        assert_eq!(summary.total_files, 3);
        assert_eq!(summary.failed_files, 1);
        assert_eq!(summary.files_with_warnings, 1);
        assert_eq!(summary.successful_files, 1);
        assert_eq!(collector.get_files_with_errors(), vec![broken]);
    }

    #[test]
    fn test_per_file_limit_adds_single_truncation_warning() {
        let collector = ErrorCollector::new();
        let path = PathBuf::from("Noisy.java");

        for i in 0..MAX_LOG_EVENTS_PER_FILE + 5 {
            collector.record_event(&path, LogEvent::info(&format!("event {}", i)));
        }

        let events = collector.get_file_events(&path);
        assert_eq!(events.len(), MAX_LOG_EVENTS_PER_FILE + 1);
        assert!(events.last().unwrap().is_warning());
    }

    #[test]
    fn test_cargo_style_output_with_source_excerpt() {
        let collector = ErrorCollector::new();
        let path = PathBuf::from("src/Main.java");
        let source = "class Main {\n  int x = #;\n}\n";
        let start = Position::new(22, 2, 11);

        collector.record_source(&path, source);
        collector.record_event(
            &path,
            LogEvent::error(
                codes::lexical::UNEXPECTED_CHARACTER,
                "Unexpected character '#' at line: 2 column: 11",
            )
            .with_span(Span::single(start)),
        );

        let output = format_cargo_style_errors(&collector);
        assert!(output.starts_with("Checking src/Main.java...\n"));
        assert!(output.contains("error[E020]: Unexpected character '#' at line: 2 column: 11"));
        assert!(output.contains("  --> src/Main.java:2:11\n"));
        assert!(output.contains("2 |   int x = #;\n  |           ^\n"));
        assert!(output.contains("= severity: High, category: Lexical"));
        assert!(output.ends_with("Total errors: 1\n"));
    }

    #[test]
    fn test_clear_resets_everything() {
        let collector = ErrorCollector::new();
        let path = PathBuf::from("A.java");
        collector.record_event(&path, LogEvent::warning("w"));
        collector.record_file_context(FileProcessingContext::new(path.clone(), 0));
        assert_eq!(collector.get_capacity_info().0, 1);

        collector.clear();
        assert_eq!(collector.total_event_count(), 0);
        assert!(!collector.file_has_errors(&path));
    }
}
