use crate::grammar::{standard_productions, NonTerminal, ParsingTable, STANDARD_ENTRIES};
use crate::logging::codes;

/// Validate that every stage is wired to registered codes and the standard
/// grammar builds without conflicts
pub fn validate_pipeline() -> Result<(), String> {
    crate::log_debug!("Validating pipeline configuration");

    crate::file_processor::init_file_processor_logging()?;
    crate::lexical::init_lexical_analysis_logging()?;
    crate::syntax::init_syntax_logging()?;

    ParsingTable::new(NonTerminal::Type, standard_productions(), STANDARD_ENTRIES)
        .map_err(|e| format!("Standard grammar is invalid: {}", e))?;

    let registered = codes::registered_codes();
    if let Some(code) = registered
        .iter()
        .find(|code| codes::get_description(code).is_empty())
    {
        return Err(format!("Code {} has no description", code));
    }

    crate::log_success!(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Pipeline validation succeeded",
        "stages_validated" => 4,
        "registered_codes" => registered.len()
    );

    Ok(())
}
