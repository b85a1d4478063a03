//! Batch processing of token listing directories
//!
//! Sequential and threaded execution over discovered `.tok`/`.txt` files.
//! Every file gets its own parser and cursor; workers share only the results.

use crate::config::compile_time::batch_processing::{MAX_FILES_PER_BATCH, MAX_WORKER_THREADS};
use crate::config::runtime::{FileProcessorPreferences, ParserPreferences};
use crate::file_processor::is_token_file;
use crate::logging::codes;
use crate::pipeline::{self, PipelineError, PipelineResult};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;
use std::time::{Duration, Instant};

/// Worker stack, sized for rule nesting at the compile-time depth limit
const WORKER_STACK_SIZE: usize = 8 * 1024 * 1024;

// ============================================================================
// BATCH PROCESSING TYPES
// ============================================================================

#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub max_threads: usize,
    pub recursive: bool,
    pub max_files: Option<usize>,
    pub progress_reporting: bool,
    pub fail_fast: bool,
    pub file_preferences: FileProcessorPreferences,
    pub parser_preferences: ParserPreferences,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_threads: thread::available_parallelism()
                .map(|n| n.get().min(8))
                .unwrap_or(4),
            recursive: true,
            max_files: None,
            progress_reporting: true,
            fail_fast: false,
            file_preferences: FileProcessorPreferences::default(),
            parser_preferences: ParserPreferences::default(),
        }
    }
}

impl BatchConfig {
    /// Thread count clamped to `1..=MAX_WORKER_THREADS`
    pub fn effective_threads(&self) -> usize {
        self.max_threads.clamp(1, MAX_WORKER_THREADS)
    }

    pub fn file_limit(&self) -> usize {
        self.max_files
            .map_or(MAX_FILES_PER_BATCH, |max| max.min(MAX_FILES_PER_BATCH))
    }
}

#[derive(Debug, Default)]
pub struct BatchResults {
    pub successful_files: Vec<(PathBuf, PipelineResult)>,
    pub failed_files: Vec<(PathBuf, PipelineError)>,
    pub processing_duration: Duration,
    pub files_processed: usize,
    pub files_discovered: usize,
}

impl BatchResults {
    pub fn new() -> Self {
        Self::default()
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

    /// Restore discovery order after threaded runs
    pub fn sort_by_path(&mut self) {
        self.successful_files.sort_by(|a, b| a.0.cmp(&b.0));
        self.failed_files.sort_by(|a, b| a.0.cmp(&b.0));
    }

    pub fn summary(&self) -> String {
        format!(
            "Batch processing completed: {} files processed, {} accepted ({:.1}%), {} rejected, {:.2}s total",
            self.files_processed,
            self.success_count(),
            self.success_rate() * 100.0,
            self.failure_count(),
            self.processing_duration.as_secs_f64()
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("No token files found in directory: {path}")]
    NoFilesFound { path: String },

    #[error("IO error during directory traversal: {error}")]
    IoError { error: String },

    #[error("Thread pool error: {message}")]
    ThreadError { message: String },
}

impl BatchError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            Self::DirectoryNotFound { .. } => codes::file_processing::FILE_NOT_FOUND,
            Self::NoFilesFound { .. } => codes::file_processing::INVALID_EXTENSION,
            Self::IoError { .. } => codes::file_processing::IO_ERROR,
            Self::ThreadError { .. } => codes::system::INTERNAL_ERROR,
        }
    }
}

// ============================================================================
// FILE DISCOVERY
// ============================================================================

/// Discover token listing files in a directory, sorted by path
pub fn discover_token_files(
    dir_path: &Path,
    config: &BatchConfig,
) -> Result<Vec<PathBuf>, BatchError> {
    crate::log_info!("Starting file discovery",
        "directory" => dir_path.display(),
        "recursive" => config.recursive
    );

    if !dir_path.is_dir() {
        return Err(BatchError::DirectoryNotFound {
            path: dir_path.display().to_string(),
        });
    }

    let limit = config.file_limit();
    let mut files = Vec::new();
    visit_directory(dir_path, config.recursive, limit, &mut files)?;

    if files.is_empty() {
        return Err(BatchError::NoFilesFound {
            path: dir_path.display().to_string(),
        });
    }

    files.sort();

    crate::log_info!("File discovery completed",
        "files_found" => files.len(),
        "directory" => dir_path.display()
    );

    Ok(files)
}

fn visit_directory(
    dir_path: &Path,
    recursive: bool,
    limit: usize,
    files: &mut Vec<PathBuf>,
) -> Result<(), BatchError> {
    let entries = fs::read_dir(dir_path).map_err(|e| BatchError::IoError {
        error: e.to_string(),
    })?;

    // Entries sorted so the file limit cuts deterministically
    let mut paths = entries
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| BatchError::IoError {
            error: e.to_string(),
        })?;
    paths.sort();

    for path in paths {
        if files.len() >= limit {
            crate::log_warning!("Reached maximum file limit",
                "files_found" => files.len(),
                "limit" => limit
            );
            return Ok(());
        }

        if path.is_dir() {
            if recursive {
                visit_directory(&path, recursive, limit, files)?;
            }
        } else if path.is_file() && is_token_file(&path) {
            files.push(path);
        }
    }

    Ok(())
}

// ============================================================================
// BATCH PROCESSING
// ============================================================================

fn lock_results(results: &Mutex<BatchResults>) -> MutexGuard<'_, BatchResults> {
    results.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn process_one(file_path: &Path, file_id: usize, config: &BatchConfig) -> Result<PipelineResult, PipelineError> {
    pipeline::process_file_with_preferences(
        file_path,
        file_id,
        &config.file_preferences,
        &config.parser_preferences,
    )
}

pub fn process_directory_sequential(
    dir_path: &Path,
    config: &BatchConfig,
) -> Result<BatchResults, BatchError> {
    let start_time = Instant::now();

    crate::log_info!("Starting sequential batch processing",
        "directory" => dir_path.display()
    );

    let files = discover_token_files(dir_path, config)?;
    let mut results = BatchResults::new();
    results.files_discovered = files.len();

    for (file_id, file_path) in files.iter().enumerate() {
        if config.progress_reporting {
            println!(
                "Processing file {} of {}: {}",
                file_id + 1,
                files.len(),
                file_path.display()
            );
        }

        match process_one(file_path, file_id, config) {
            Ok(result) => results.add_success(file_path.clone(), result),
            Err(error) => {
                results.add_failure(file_path.clone(), error);

                if config.fail_fast {
                    crate::log_warning!("Fail-fast mode enabled, stopping batch processing");
                    break;
                }
            }
        }
    }

    results.processing_duration = start_time.elapsed();
    log_batch_completion("Sequential batch processing completed", &results, 1);

    Ok(results)
}

/// Process files on worker threads, in chunks of at most `MAX_CHUNK_SIZE`
pub fn process_directory_parallel(
    dir_path: &Path,
    config: &BatchConfig,
) -> Result<BatchResults, BatchError> {
    let start_time = Instant::now();
    let threads = config.effective_threads();

    crate::log_info!("Starting parallel batch processing",
        "directory" => dir_path.display(),
        "max_threads" => threads
    );

    let files = discover_token_files(dir_path, config)?;
    let mut results = BatchResults::new();
    results.files_discovered = files.len();

    let chunk_size = calculate_chunk_size(files.len(), threads);

    crate::log_debug!("Parallel processing configuration",
        "total_files" => files.len(),
        "chunk_size" => chunk_size,
        "threads" => threads
    );

    for (chunk_index, chunk) in files.chunks(chunk_size).enumerate() {
        let first_id = chunk_index * chunk_size;
        results.merge(process_chunk_parallel(chunk, first_id, threads, config)?);

        if config.fail_fast && results.failure_count() > 0 {
            crate::log_warning!("Fail-fast mode enabled, stopping batch processing");
            break;
        }
    }

    results.sort_by_path();
    results.processing_duration = start_time.elapsed();
    log_batch_completion("Parallel batch processing completed", &results, threads);

    Ok(results)
}

fn process_chunk_parallel(
    files: &[PathBuf],
    first_id: usize,
    threads: usize,
    config: &BatchConfig,
) -> Result<BatchResults, BatchError> {
    let results = Arc::new(Mutex::new(BatchResults::new()));
    let files_per_thread = files.len().div_ceil(threads);
    let mut handles = Vec::new();
    let mut spawn_error = None;

    for (thread_index, thread_files) in files.chunks(files_per_thread).enumerate() {
        let thread_files = thread_files.to_vec();
        let worker_results = Arc::clone(&results);
        let config = config.clone();
        let base_id = first_id + thread_index * files_per_thread;

        let spawned = thread::Builder::new()
            .name(format!("rdp-worker-{}", thread_index))
            .stack_size(WORKER_STACK_SIZE)
            .spawn(move || {
                for (offset, file_path) in thread_files.into_iter().enumerate() {
                    let outcome = process_one(&file_path, base_id + offset, &config);
                    let mut guard = lock_results(&worker_results);
                    match outcome {
                        Ok(result) => guard.add_success(file_path, result),
                        Err(error) => guard.add_failure(file_path, error),
                    }
                }
            });

        match spawned {
            Ok(handle) => handles.push(handle),
            Err(e) => {
                crate::log_warning!("Failed to spawn batch worker",
                    "worker" => thread_index,
                    "io_error" => e
                );
                spawn_error = Some(BatchError::ThreadError {
                    message: e.to_string(),
                });
                break;
            }
        }
    }

    // Workers already running finish before any error is returned
    join_workers(handles)?;
    if let Some(error) = spawn_error {
        return Err(error);
    }

    let results = Arc::try_unwrap(results).map_err(|_| BatchError::ThreadError {
        message: "Failed to extract results from worker threads".to_string(),
    })?;

    Ok(results
        .into_inner()
        .unwrap_or_else(|poisoned| poisoned.into_inner()))
}

fn join_workers(handles: Vec<thread::JoinHandle<()>>) -> Result<(), BatchError> {
    let mut panicked = 0;
    for handle in handles {
        if handle.join().is_err() {
            panicked += 1;
        }
    }

    if panicked > 0 {
        return Err(BatchError::ThreadError {
            message: format!("{} worker thread(s) panicked during processing", panicked),
        });
    }
    Ok(())
}

fn calculate_chunk_size(file_count: usize, threads: usize) -> usize {
    const MAX_CHUNK_SIZE: usize = 50;

    file_count.div_ceil(threads.max(1)).clamp(1, MAX_CHUNK_SIZE)
}

fn log_batch_completion(message: &str, results: &BatchResults, threads: usize) {
    crate::log_success!(
        codes::success::OPERATION_COMPLETED_SUCCESSFULLY,
        message,
        "files_processed" => results.files_processed,
        "accepted" => results.success_count(),
        "rejected" => results.failure_count(),
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

pub fn process_directory_with_config(
    dir_path: &Path,
    config: &BatchConfig,
) -> Result<BatchResults, BatchError> {
    if config.effective_threads() == 1 {
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

    const ACCEPTED: &str = "Program 1\nID 1\n{ 1\nint 2\nID 2\n; 2\n} 3\n";
    const REJECTED: &str = "Program 1\nID 1\n{ 1\nint 2\nID 2\n";

    fn quiet_config(threads: usize) -> BatchConfig {
        BatchConfig {
            max_threads: threads,
            progress_reporting: false,
            ..BatchConfig::default()
        }
    }

    #[test]
    fn test_file_discovery() {
        let temp_dir = tempdir().unwrap();
        let temp_path = temp_dir.path();

        fs::write(temp_path.join("a.tok"), ACCEPTED).unwrap();
        fs::write(temp_path.join("b.txt"), ACCEPTED).unwrap();
        fs::write(temp_path.join("notes.md"), "not tokens").unwrap();
        fs::create_dir(temp_path.join("nested")).unwrap();
        fs::write(temp_path.join("nested").join("c.tok"), ACCEPTED).unwrap();

        let files = discover_token_files(temp_path, &quiet_config(1)).unwrap();
        assert_eq!(files.len(), 3);

        let config = BatchConfig {
            recursive: false,
            ..quiet_config(1)
        };
        assert_eq!(discover_token_files(temp_path, &config).unwrap().len(), 2);
    }

    #[test]
    fn test_discovery_limit() {
        let temp_dir = tempdir().unwrap();
        for i in 0..5 {
            fs::write(temp_dir.path().join(format!("p{}.tok", i)), ACCEPTED).unwrap();
        }

        let config = BatchConfig {
            max_files: Some(2),
            ..quiet_config(1)
        };
        let files = discover_token_files(temp_dir.path(), &config).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("p0.tok"));
    }

    #[test]
    fn test_discovery_errors() {
        let temp_dir = tempdir().unwrap();
        assert_matches!(
            discover_token_files(temp_dir.path(), &quiet_config(1)),
            Err(BatchError::NoFilesFound { .. })
        );
        assert_matches!(
            discover_token_files(&temp_dir.path().join("missing"), &quiet_config(1)),
            Err(BatchError::DirectoryNotFound { .. })
        );
    }

    #[test]
    fn test_sequential_processing() {
        let temp_dir = tempdir().unwrap();
        fs::write(temp_dir.path().join("good.tok"), ACCEPTED).unwrap();
        fs::write(temp_dir.path().join("bad.tok"), REJECTED).unwrap();

        let results = process_directory_with_config(temp_dir.path(), &quiet_config(1)).unwrap();
        assert_eq!(results.files_processed, 2);
        assert_eq!(results.success_count(), 1);
        assert_eq!(results.failure_count(), 1);
        assert_eq!(
            results.failed_files[0].1.to_string(),
            "Line: 2 Expected: ;, [ But got: <EOF>"
        );
    }

    #[test]
    fn test_sequential_fail_fast() {
        let temp_dir = tempdir().unwrap();
        fs::write(temp_dir.path().join("a_bad.tok"), REJECTED).unwrap();
        fs::write(temp_dir.path().join("b_good.tok"), ACCEPTED).unwrap();

        let config = BatchConfig {
            fail_fast: true,
            ..quiet_config(1)
        };
        let results = process_directory_with_config(temp_dir.path(), &config).unwrap();
        assert_eq!(results.files_processed, 1);
        assert_eq!(results.files_discovered, 2);
    }

    #[test]
    fn test_parallel_processing() {
        let temp_dir = tempdir().unwrap();
        for i in 0..6 {
            let content = if i % 3 == 0 { REJECTED } else { ACCEPTED };
            fs::write(temp_dir.path().join(format!("f{}.tok", i)), content).unwrap();
        }

        let results = process_directory_with_config(temp_dir.path(), &quiet_config(3)).unwrap();
        assert_eq!(results.files_processed, 6);
        assert_eq!(results.success_count(), 4);
        assert_eq!(results.failure_count(), 2);
        assert!(results.failed_files[0].0.ends_with("f0.tok"));
        assert!(results.summary().contains("6 files processed"));
    }

    #[test]
    fn test_join_workers_waits_for_every_handle() {
        let finished = Arc::new(Mutex::new(0));
        let mut handles = Vec::new();
        for _ in 0..3 {
            let finished = Arc::clone(&finished);
            handles.push(thread::spawn(move || {
                thread::sleep(Duration::from_millis(20));
                *finished.lock().unwrap() += 1;
            }));
        }
        handles.push(thread::spawn(|| panic!("worker failure")));

        let error = join_workers(handles).unwrap_err();
        assert_matches!(error, BatchError::ThreadError { ref message } if message.starts_with("1 worker"));
        assert_eq!(*finished.lock().unwrap(), 3);
    }

    #[test]
    fn test_chunk_size_calculation() {
        assert_eq!(calculate_chunk_size(100, 4), 25);
        assert_eq!(calculate_chunk_size(10, 4), 3);
        assert_eq!(calculate_chunk_size(1, 4), 1);
        assert_eq!(calculate_chunk_size(200, 4), 50);
    }

    #[test]
    fn test_batch_config_limits() {
        let config = BatchConfig {
            max_threads: 0,
            max_files: Some(usize::MAX),
            ..BatchConfig::default()
        };
        assert_eq!(config.effective_threads(), 1);
        assert_eq!(config.file_limit(), MAX_FILES_PER_BATCH);
    }

    #[test]
    fn test_batch_results() {
        let results = BatchResults::new();
        assert_eq!(results.success_rate(), 0.0);
        assert_eq!(results.success_count(), 0);
        assert_eq!(results.failure_count(), 0);
    }
}
