/// Check that every stage has its codes registered
pub fn validate_pipeline() -> Result<(), String> {
    crate::log_debug!("Validating pipeline configuration");

    crate::file_processor::validate_file_processor_codes()?;
    crate::lexical::validate_lexical_codes()?;

    crate::log_success!(
        crate::logging::codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Pipeline validation succeeded",
        "file_processing" => true,
        "lexical_analysis" => true
    );

    Ok(())
}
