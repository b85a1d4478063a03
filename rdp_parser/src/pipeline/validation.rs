/// Validate that every pipeline stage is properly configured
pub fn validate_pipeline() -> Result<(), String> {
    crate::log_debug!("Validating complete pipeline configuration");

    crate::file_processor::init_file_processor_logging()?;
    crate::loader::init_loader_logging()?;
    crate::syntax::init_syntax_logging()?;

    crate::log_success!(
        crate::logging::codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Complete pipeline validation succeeded",
        "stages_validated" => 3,
        "file_processing" => true,
        "token_loading" => true,
        "syntax_analysis" => true
    );

    Ok(())
}
