use rdp_parser::batch::{self, BatchConfig, BatchResults};
use rdp_parser::config::runtime::RuntimeConfig;
use rdp_parser::logging;
use rdp_parser::pipeline::{self, PipelineError};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default)]
struct CliOptions {
    batch: BatchConfig,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <tokens-file|directory> [options]", args[0]);
        eprintln!("       {} --help", args[0]);
        std::process::exit(1);
    }

    if args[1] == "--help" {
        print_help(&args[0]);
        return Ok(());
    }

    let mut options = parse_options(&args[2..]);

    let runtime = match &options.config_path {
        Some(path) => RuntimeConfig::load(path)?,
        None => RuntimeConfig::default(),
    };
    options.batch.file_preferences = runtime.file_processor.clone();
    options.batch.parser_preferences = runtime.parser.clone();

    // Preferences must be installed before the logger reads them
    logging::config::init_runtime_preferences(runtime.logging)?;
    logging::init_global_logging()?;
    if let Err(message) = pipeline::validate_pipeline() {
        logging::safe_log_error(logging::codes::system::INITIALIZATION_FAILURE, &message);
        return Err(message.into());
    }

    let input_path = Path::new(&args[1]);

    if input_path.is_file() {
        process_single_file(input_path, &options)?;
    } else if input_path.is_dir() {
        process_directory_batch(input_path, &options)?;
    } else {
        eprintln!("Error: Input must be a token file (.tok, .txt) or directory");
        eprintln!("  File: {}", input_path.display());
        std::process::exit(1);
    }

    Ok(())
}

fn print_help(program_name: &str) {
    println!("rdp_parser v{}", env!("CARGO_PKG_VERSION"));
    println!("Recursive-descent syntax analyzer over pre-tokenized listings");
    println!();
    println!("USAGE:");
    println!("    {} <tokens.tok>                   # Parse one listing", program_name);
    println!("    {} <directory> [options]          # Parse every listing", program_name);
    println!();
    println!("INPUT FORMAT:");
    println!("    One token per line: `<text> <line>` or `<KIND> <text> <line>`");
    println!();
    println!("OPTIONS:");
    println!("    --help              Show this help message");
    println!("    --output <file>     Write the outcome to <file> (JSON for .json)");
    println!("    --config <file>     Load runtime preferences from a TOML file");
    println!("    --sequential        Force sequential processing");
    println!("    --threads N         Set maximum number of threads (default: auto)");
    println!("    --no-recursive      Don't search subdirectories");
    println!("    --max-files N       Limit maximum files to process");
    println!("    --fail-fast         Stop on first rejected file");
    println!("    --quiet             Suppress progress reporting");
    println!();
    println!("OUTPUT:");
    println!("    Success: Parsing Complete");
    println!("    Failure: FAILED: Line: <line> Expected: <e1>, <e2>, ... But got: <found>");
    println!();
    println!("EXAMPLES:");
    println!("    {} prog.tok --output parse_file.txt", program_name);
    println!("    {} listings/ --threads 4 --fail-fast", program_name);
}

fn parse_options(args: &[String]) -> CliOptions {
    let mut options = CliOptions::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--sequential" => options.batch.max_threads = 1,
            "--threads" => {
                match args.get(i + 1).map(|value| value.parse::<usize>()) {
                    Some(Ok(threads)) => options.batch.max_threads = threads.max(1),
                    Some(Err(_)) => {
                        eprintln!("Warning: Invalid thread count '{}', using default", args[i + 1])
                    }
                    None => eprintln!("Warning: --threads requires a number"),
                }
                i += 1;
            }
            "--no-recursive" => options.batch.recursive = false,
            "--max-files" => {
                match args.get(i + 1).map(|value| value.parse::<usize>()) {
                    Some(Ok(max_files)) => options.batch.max_files = Some(max_files),
                    Some(Err(_)) => {
                        eprintln!("Warning: Invalid max files '{}', ignoring", args[i + 1])
                    }
                    None => eprintln!("Warning: --max-files requires a number"),
                }
                i += 1;
            }
            "--fail-fast" => options.batch.fail_fast = true,
            "--quiet" => options.batch.progress_reporting = false,
            "--output" => {
                match args.get(i + 1) {
                    Some(path) => options.output = Some(PathBuf::from(path)),
                    None => eprintln!("Warning: --output requires a file path"),
                }
                i += 1;
            }
            "--config" => {
                match args.get(i + 1) {
                    Some(path) => options.config_path = Some(PathBuf::from(path)),
                    None => eprintln!("Warning: --config requires a file path"),
                }
                i += 1;
            }
            other => eprintln!("Warning: Unknown option '{}'", other),
        }
        i += 1;
    }

    options
}

fn process_single_file(file_path: &Path, options: &CliOptions) -> Result<(), Box<dyn std::error::Error>> {
    println!("Starting Parsing");

    let outcome = pipeline::process_file_with_preferences(
        file_path,
        0,
        &options.batch.file_preferences,
        &options.batch.parser_preferences,
    );

    if let Some(output) = &options.output {
        pipeline::write_report(output, &outcome)?;
    }

    match &outcome {
        Ok(_) => println!("Parsing Complete"),
        Err(error) => {
            eprintln!("FAILED: {}", error);
            print_detailed_error(error);
            std::process::exit(1);
        }
    }

    Ok(())
}

fn process_directory_batch(dir_path: &Path, options: &CliOptions) -> Result<(), Box<dyn std::error::Error>> {
    let config = &options.batch;
    println!("Starting Parsing: {}", dir_path.display());
    println!(
        "Configuration: {} threads, recursive={}, fail_fast={}",
        config.effective_threads(),
        config.recursive,
        config.fail_fast
    );

    if let Some(max_files) = config.max_files {
        println!("File limit: {} files maximum", max_files);
    }

    match batch::process_directory_with_config(dir_path, config) {
        Ok(results) => {
            println!("Parsing Complete");
            print_batch_results(&results);

            if let Some(output) = &options.output {
                fs::write(output, batch_report(&results))?;
            }

            logging::print_cargo_style_summary();

            if results.failure_count() > 0 {
                std::process::exit(1);
            }
        }
        Err(error) => {
            eprintln!("FAILED: {}", error);
            logging::print_cargo_style_summary();
            std::process::exit(1);
        }
    }

    Ok(())
}

/// One `<path>: <outcome>` line per processed file
fn batch_report(results: &BatchResults) -> String {
    let mut lines: Vec<(String, String)> = results
        .successful_files
        .iter()
        .map(|(path, result)| (path.display().to_string(), result.report_line()))
        .chain(
            results
                .failed_files
                .iter()
                .map(|(path, error)| (path.display().to_string(), error.to_string())),
        )
        .collect();
    lines.sort();

    lines
        .into_iter()
        .map(|(path, outcome)| format!("{}: {}\n", path, outcome))
        .collect()
}

fn print_batch_results(results: &BatchResults) {
    println!("Batch Processing Summary:");
    println!("  Files discovered: {}", results.files_discovered);
    println!("  Files processed: {}", results.files_processed);
    println!(
        "  Accepted: {} ({:.1}%)",
        results.success_count(),
        results.success_rate() * 100.0
    );
    println!("  Rejected: {}", results.failure_count());
    println!("  Total time: {:.2}s", results.processing_duration.as_secs_f64());

    let logged = logging::get_processing_summary();
    if logged.total_errors > 0 {
        println!("  Logged errors: {}", logged.total_errors);
    }

    let total_tokens: usize = results
        .successful_files
        .iter()
        .map(|(_, result)| result.token_count)
        .sum();
    let seconds = results.processing_duration.as_secs_f64();
    if total_tokens > 0 && seconds > 0.0 {
        println!("  Processing rate: {:.0} tokens/sec", total_tokens as f64 / seconds);
    }

    if results.failure_count() > 0 {
        println!("\nRejected Files:");
        for (file_path, error) in &results.failed_files {
            println!("  {}: {}", file_path.display(), error);
        }
    }
}

fn print_detailed_error(error: &PipelineError) {
    match error {
        PipelineError::FileProcessing(file_err) => {
            eprintln!("File processing stage failed [{}]", file_err.error_code());
        }
        PipelineError::TokenLoading(loader_err) => {
            eprintln!("Token loading stage failed [{}]", loader_err.error_code());
        }
        PipelineError::SyntaxAnalysis(syntax_err) => {
            eprintln!("Syntax analysis stage failed:");
            eprintln!("  [{}] {}", syntax_err.error_code(), syntax_err.description());
            eprintln!("  Help: {}", syntax_err.recommended_action());
        }
        PipelineError::Report { path, message } => {
            eprintln!("Report could not be written to {}: {}", path, message);
        }
        PipelineError::Pipeline { message } => {
            eprintln!("Pipeline error: {}", message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_parse_options() {
        let options = parse_options(&args(&[
            "--threads",
            "4",
            "--fail-fast",
            "--no-recursive",
            "--output",
            "parse_file.txt",
            "--config",
            "runtime.toml",
        ]));

        assert_eq!(options.batch.max_threads, 4);
        assert!(options.batch.fail_fast);
        assert!(!options.batch.recursive);
        assert_eq!(options.output, Some(PathBuf::from("parse_file.txt")));
        assert_eq!(options.config_path, Some(PathBuf::from("runtime.toml")));
    }

    #[test]
    fn test_parse_options_invalid() {
        let options = parse_options(&args(&["--threads", "invalid", "--unknown-option"]));
        assert_ne!(options.batch.max_threads, 0);
        assert!(options.output.is_none());
    }

    #[test]
    fn test_missing_option_values() {
        let options = parse_options(&args(&["--max-files", "--output"]));
        assert!(options.batch.max_files.is_none());
        // `--output` was consumed as the max-files value
        assert!(options.output.is_none());
    }

    #[test]
    fn test_batch_report_is_sorted() {
        let mut results = BatchResults::new();
        results.add_failure(
            PathBuf::from("b.tok"),
            PipelineError::pipeline_error("broken"),
        );
        results.add_success(
            PathBuf::from("a.tok"),
            pipeline::process_source("Program 1\nID 1\n{ 1\nint 1\nID 1\n; 1\n} 1\n").unwrap(),
        );

        let report = batch_report(&results);
        let lines: Vec<&str> = report.lines().collect();
        assert!(lines[0].starts_with("a.tok: ACCEPTED"));
        assert_eq!(lines[1], "b.tok: Pipeline error: broken");
    }
}
