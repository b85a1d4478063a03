//! Per-file event collection for batch runs, with cargo-style output

use super::events::LogEvent;
use crate::config::compile_time::logging::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
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

/// Aggregate outcome of all files seen by a collector
#[derive(Debug, Clone, Default)]
pub struct ProcessingSummary {
    pub total_files: usize,
    pub successful_files: usize,
    pub failed_files: usize,
    pub files_with_warnings: usize,
    pub total_errors: usize,
    pub total_warnings: usize,
    pub total_processing_time: Duration,
    pub average_file_time: Duration,
}

impl ProcessingSummary {
    pub fn success_rate(&self) -> f64 {
        if self.total_files == 0 {
            0.0
        } else {
            self.successful_files as f64 / self.total_files as f64
        }
    }

    pub fn has_errors(&self) -> bool {
        self.total_errors > 0
    }
}

// ============================================================================
// ERROR COLLECTOR
// ============================================================================

/// Thread-safe event store keyed by file path
pub struct ErrorCollector {
    file_events: Mutex<BTreeMap<PathBuf, Vec<LogEvent>>>,
    file_contexts: Mutex<BTreeMap<PathBuf, FileProcessingContext>>,
    processing_start: Instant,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self {
            file_events: Mutex::new(BTreeMap::new()),
            file_contexts: Mutex::new(BTreeMap::new()),
            processing_start: Instant::now(),
        }
    }

    /// Record an event; past the per-file limit a single overflow warning is kept
    pub fn record_event(&self, file_path: &Path, event: LogEvent) {
        let mut events = lock(&self.file_events);
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
        lock(&self.file_contexts).insert(context.file_path.clone(), context);
    }

    pub fn get_file_events(&self, file_path: &Path) -> Vec<LogEvent> {
        lock(&self.file_events)
            .get(file_path)
            .cloned()
            .unwrap_or_default()
    }

    pub fn get_all_file_events(&self) -> BTreeMap<PathBuf, Vec<LogEvent>> {
        lock(&self.file_events).clone()
    }

    pub fn get_files_with_errors(&self) -> Vec<PathBuf> {
        lock(&self.file_events)
            .iter()
            .filter(|(_, events)| events.iter().any(|e| e.is_error()))
            .map(|(path, _)| path.clone())
            .collect()
    }

    pub fn get_summary(&self) -> ProcessingSummary {
        let events = lock(&self.file_events);
        let contexts = lock(&self.file_contexts);

        let mut summary = ProcessingSummary {
            total_files: events.len(),
            total_processing_time: self.processing_start.elapsed(),
            ..Default::default()
        };

        let mut total_file_time = Duration::ZERO;
        let mut timed_files: u32 = 0;

        for (file_path, file_events) in events.iter() {
            let has_errors = file_events.iter().any(|e| e.is_error());
            let has_warnings = file_events.iter().any(|e| e.is_warning());

            if has_errors {
                summary.failed_files += 1;
            } else if has_warnings {
                summary.files_with_warnings += 1;
            } else {
                summary.successful_files += 1;
            }

            summary.total_errors += file_events.iter().filter(|e| e.is_error()).count();
            summary.total_warnings += file_events.iter().filter(|e| e.is_warning()).count();

            if let Some(context) = contexts.get(file_path) {
                total_file_time += context.elapsed();
                timed_files += 1;
            }
        }

        if timed_files > 0 {
            summary.average_file_time = total_file_time / timed_files;
        }

        summary
    }

    pub fn total_event_count(&self) -> usize {
        lock(&self.file_events).values().map(|v| v.len()).sum()
    }

    /// (current, max, fraction) against the compile-time buffer size
    pub fn get_capacity_info(&self) -> (usize, usize, f64) {
        let current = self.total_event_count();
        let max = LOG_BUFFER_SIZE;
        let fraction = if max > 0 {
            current as f64 / max as f64
        } else {
            0.0
        };
        (current, max, fraction)
    }

    pub fn clear(&self) {
        lock(&self.file_events).clear();
        lock(&self.file_contexts).clear();
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

fn push_context(output: &mut String, event: &LogEvent) {
    let mut keys: Vec<&String> = event
        .context
        .keys()
        .filter(|key| key.as_str() != "file" && key.as_str() != "file_id")
        .collect();
    keys.sort();
    for key in keys {
        output.push_str(&format!("  = {}: {}\n", key, event.context[key]));
    }
}

/// Render collected errors and warnings grouped by file
pub fn format_cargo_style_errors(collector: &ErrorCollector) -> String {
    let mut output = String::new();

    for (file_path, events) in &collector.get_all_file_events() {
        let errors: Vec<_> = events.iter().filter(|e| e.is_error()).collect();
        let warnings: Vec<_> = events.iter().filter(|e| e.is_warning()).collect();

        if errors.is_empty() && warnings.is_empty() {
            continue;
        }

        output.push_str(&format!("Checking {}...\n", file_path.display()));

        for event in errors {
            let location = event
                .line
                .map(|line| format!(" --> {}:{}", file_path.display(), line))
                .unwrap_or_default();

            output.push_str(&format!(
                "error[{}]: {}{}\n",
                event.code.as_str(),
                event.message,
                location
            ));
            output.push_str(&format!(
                "  = severity: {}, category: {}\n",
                event.severity(),
                event.category()
            ));
            push_context(&mut output, event);

            let action = event.recommended_action();
            if action != "No specific action available" {
                output.push_str(&format!("  = help: {}\n", action));
            }
        }

        for event in warnings {
            let location = event
                .line
                .map(|line| format!(" --> {}:{}", file_path.display(), line))
                .unwrap_or_default();

            output.push_str(&format!(
                "warning[{}]: {}{}\n",
                event.code.as_str(),
                event.message,
                location
            ));
            push_context(&mut output, event);
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

    #[test]
    fn test_summary_counts_per_file() {
        let collector = ErrorCollector::new();
        let good = PathBuf::from("good.tok");
        let bad = PathBuf::from("bad.tok");

        collector.record_event(
            &good,
            LogEvent::success(codes::success::PROGRAM_ACCEPTED, "accepted"),
        );
        collector.record_event(
            &bad,
            LogEvent::error(codes::syntax::UNEXPECTED_TOKEN, "Expected ;").with_line(3),
        );

        let summary = collector.get_summary();
        assert_eq!(summary.total_files, 2);
        assert_eq!(summary.successful_files, 1);
        assert_eq!(summary.failed_files, 1);
        assert_eq!(summary.total_errors, 1);
        assert_eq!(collector.get_files_with_errors(), vec![bad]);
    }

    #[test]
    fn test_per_file_limit_adds_single_overflow_warning() {
        let collector = ErrorCollector::new();
        let path = PathBuf::from("noisy.tok");

        for _ in 0..MAX_LOG_EVENTS_PER_FILE + 5 {
            collector.record_event(&path, LogEvent::info("tick"));
        }

        let events = collector.get_file_events(&path);
        assert_eq!(events.len(), MAX_LOG_EVENTS_PER_FILE + 1);
        assert!(events.last().is_some_and(|e| e.is_warning()));
    }

    #[test]
    fn test_cargo_style_output() {
        let collector = ErrorCollector::new();
        let path = PathBuf::from("prog.tok");

        collector.record_event(
            &path,
            LogEvent::error(codes::syntax::UNEXPECTED_TOKEN, "Expected: ; But got: }")
                .with_line(5)
                .with_context("rule", "statement")
                .with_context("file", "prog.tok"),
        );

        let output = format_cargo_style_errors(&collector);
        assert!(output.contains("Checking prog.tok..."));
        assert!(output.contains("error[E050]: Expected: ; But got: } --> prog.tok:5"));
        assert!(output.contains("  = severity: High, category: Syntax"));
        assert!(output.contains("  = rule: statement"));
        assert!(!output.contains("  = file:"));
        assert!(output.contains("  = help: "));
        assert!(output.contains("Total errors: 1"));
    }

    #[test]
    fn test_clear() {
        let collector = ErrorCollector::new();
        collector.record_event(Path::new("a.tok"), LogEvent::warning("w"));
        collector.clear();
        assert_eq!(collector.total_event_count(), 0);
    }
}
