mod error;
pub mod output;
mod result;
mod validation;

pub use error::PipelineError;
pub use output::PipelineOutput;
pub use result::PipelineResult;
pub use validation::validate_pipeline;

use crate::config::runtime::{FileProcessorPreferences, ParserPreferences};
use crate::file_processor::FileProcessor;
use crate::logging;
use crate::syntax::DescentParser;
use crate::tokens::Token;
use std::fs;
use std::path::Path;
use std::time::Instant;

/// Process a single token file (file -> token loading -> syntax)
pub fn process_file(file_path: &Path) -> Result<PipelineResult, PipelineError> {
    process_file_with_preferences(
        file_path,
        0,
        &FileProcessorPreferences::default(),
        &ParserPreferences::default(),
    )
}

/// Process a token file attributed to `file_id` in the error collector
pub fn process_file_with_preferences(
    file_path: &Path,
    file_id: usize,
    file_preferences: &FileProcessorPreferences,
    parser_preferences: &ParserPreferences,
) -> Result<PipelineResult, PipelineError> {
    let start_time = Instant::now();

    logging::with_file_context(file_path.to_path_buf(), file_id, || {
        crate::log_info!("Starting token file parsing pipeline",
            "file" => file_path.display()
        );

        // Stage 1: File processing
        let file_result = FileProcessor::from_preferences(file_preferences).process_file(file_path)?;

        // Stage 2: Token loading
        let tokens = crate::loader::parse_token_listing(&file_result.source)?;

        // Stage 3: Syntax analysis
        let mut result = parse_loaded_tokens(tokens, parser_preferences, start_time)?;
        result.file_metadata = Some(file_result.metadata);

        result.log_success(&file_path.display().to_string());
        Ok(result)
    })
}

/// Load and parse a listing held in memory
pub fn process_source(listing: &str) -> Result<PipelineResult, PipelineError> {
    let start_time = Instant::now();
    let tokens = crate::loader::parse_token_listing(listing)?;
    let result = parse_loaded_tokens(tokens, &ParserPreferences::default(), start_time)?;
    result.log_success("<memory>");
    Ok(result)
}

fn parse_loaded_tokens(
    tokens: Vec<Token>,
    preferences: &ParserPreferences,
    start_time: Instant,
) -> Result<PipelineResult, PipelineError> {
    let token_count = tokens.len();
    let mut parser = DescentParser::new(tokens).with_preferences(preferences.clone());

    match parser.parse_program() {
        Ok(summary) => {
            crate::log_success!(crate::logging::codes::success::PROGRAM_ACCEPTED, "Program accepted",
                "tokens" => summary.tokens_consumed,
                "max_depth" => summary.max_depth
            );
            Ok(PipelineResult::new(summary, None, token_count, start_time.elapsed()))
        }
        Err(error) => {
            crate::log_debug!("Syntax failure context",
                "detail" => parser.create_contextual_error(error.clone()).format_full_error()
            );
            Err(error.into())
        }
    }
}

/// Write the one-line outcome to `path`, or the JSON form for `.json` paths
pub fn write_report(
    path: &Path,
    outcome: &Result<PipelineResult, PipelineError>,
) -> Result<(), PipelineError> {
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let content = if is_json {
        serde_json::to_string_pretty(&PipelineOutput::from_outcome(outcome)).map_err(|e| {
            PipelineError::Report {
                path: path.display().to_string(),
                message: e.to_string(),
            }
        })?
    } else {
        match outcome {
            Ok(result) => result.report_line(),
            Err(error) => error.to_string(),
        }
    };

    fs::write(path, format!("{}\n", content)).map_err(|e| PipelineError::Report {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    crate::log_debug!("Report written", "path" => path.display(), "json" => is_json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::SyntaxError;
    use assert_matches::assert_matches;
    use tempfile::tempdir;

    const SCENARIO_ONE: &str = "Program 1\nID 1\n{ 1\nint 2\nID 2\n; 2\nID 3\n= 3\nNUM 3\n; 3\n} 4\n";

    #[test]
    fn test_validate_pipeline() {
        let _ = crate::logging::init_global_logging();
        assert!(validate_pipeline().is_ok());
    }

    #[test]
    fn test_pipeline_error_creation() {
        let error = PipelineError::pipeline_error("Test error");
        assert_matches!(error, PipelineError::Pipeline { ref message } if message == "Test error");
        assert_eq!(error.error_code().as_str(), "ERR001");
    }

    #[test]
    fn test_process_source_accepts() {
        let result = process_source(SCENARIO_ONE).unwrap();
        assert_eq!(result.token_count, 11);
        assert_eq!(result.summary.last_line, 4);
        assert!(result.file_metadata.is_none());
    }

    #[test]
    fn test_process_source_syntax_error_line() {
        let listing = "Program 1\nID 1\n{ 1\nint 2\nID 2\n; 2\nID 3\n= 3\nNUM 3\n} 4\n";
        let error = process_source(listing).unwrap_err();
        assert_eq!(error.to_string(), "Line: 4 Expected: ; But got: }");
        assert_matches!(error.syntax_error(), Some(SyntaxError::UnexpectedToken { line: 4, .. }));
    }

    #[test]
    fn test_process_source_loader_error() {
        let error = process_source("Program\n").unwrap_err();
        assert_matches!(error, PipelineError::TokenLoading(_));
        assert!(error.syntax_error().is_none());
    }

    #[test]
    fn test_process_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scenario.tok");
        fs::write(&path, SCENARIO_ONE).unwrap();

        let result = process_file(&path).unwrap();
        let metadata = result.file_metadata.as_ref().unwrap();
        assert_eq!(metadata.extension.as_deref(), Some("tok"));
        assert_eq!(result.summary.tokens_consumed, 11);
    }

    #[test]
    fn test_process_missing_file() {
        let dir = tempdir().unwrap();
        let error = process_file(&dir.path().join("missing.tok")).unwrap_err();
        assert_matches!(error, PipelineError::FileProcessing(_));
    }

    #[test]
    fn test_write_text_report() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("parse_file.txt");

        let accepted = process_source(SCENARIO_ONE);
        write_report(&path, &accepted).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("ACCEPTED tokens=11"));

        let rejected = process_source("Program 1\n");
        write_report(&path, &rejected).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "Line: 1 Expected: ID But got: <EOF>\n"
        );
    }

    #[test]
    fn test_write_json_report() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("outcome.json");

        let rejected = process_source("Program 1\nID 1\n{ 1\nwhile 2\n");
        write_report(&path, &rejected).unwrap();

        let output: PipelineOutput =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert!(!output.accepted);
        assert_eq!(output.code.as_deref(), Some("E050"));
        assert_eq!(output.line, Some(2));
        assert_eq!(output.expected, vec!["int", "float"]);
    }

    #[test]
    fn test_write_report_to_missing_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("out.txt");
        let error = write_report(&path, &process_source(SCENARIO_ONE)).unwrap_err();
        assert_matches!(error, PipelineError::Report { .. });
        assert_eq!(error.error_code().as_str(), "E011");
    }
}
