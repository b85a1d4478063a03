//! File processor for token listings, bounded by compile-time limits

mod processor;

use crate::config::compile_time::file_processing::{
    LARGE_FILE_THRESHOLD, MAX_FILE_SIZE, MAX_LINE_COUNT,
};
use crate::log_debug;
use crate::logging::codes;
use std::path::Path;

pub use processor::{
    FileMetadata, FileProcessingResult, FileProcessor, FileProcessorError, TOKEN_FILE_EXTENSIONS,
};

/// Process a file with default settings
pub fn process_file(file_path: &Path) -> Result<FileProcessingResult, FileProcessorError> {
    FileProcessor::new().process_file(file_path)
}

/// True for paths carrying a token listing extension
pub fn is_token_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .is_some_and(|ext| TOKEN_FILE_EXTENSIONS.contains(&ext.as_str()))
}

/// Startup check that every file processing code is registered
pub fn init_file_processor_logging() -> Result<(), String> {
    codes::ensure_registered(
        "File processor",
        &[
            codes::file_processing::FILE_NOT_FOUND,
            codes::file_processing::INVALID_EXTENSION,
            codes::file_processing::FILE_TOO_LARGE,
            codes::file_processing::EMPTY_FILE,
            codes::file_processing::PERMISSION_DENIED,
            codes::file_processing::INVALID_ENCODING,
            codes::file_processing::IO_ERROR,
            codes::file_processing::INVALID_PATH,
            codes::success::FILE_PROCESSING_SUCCESS,
        ],
    )?;

    log_debug!("File processor compile-time configuration loaded",
        "max_file_size" => MAX_FILE_SIZE,
        "large_file_threshold" => LARGE_FILE_THRESHOLD,
        "max_line_count" => MAX_LINE_COUNT
    );

    Ok(())
}
