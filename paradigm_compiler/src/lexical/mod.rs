//! Lexical analysis: character classes, the identifier automaton and the scanner

pub mod analyzer;
pub mod char_class;
pub mod dfa;

use crate::config::compile_time::lexical::*;
use crate::logging::codes;
use crate::tokens::Vocabulary;

pub use analyzer::{LexerError, LexicalMetrics, ScanOutput, Scanner};
pub use char_class::CharacterClass;
pub use dfa::{DfaState, TransitionTable};

/// Scan with the standard vocabulary and transition table
pub fn scan_source(source: &str) -> ScanOutput {
    let vocabulary = Vocabulary::standard();
    let table = TransitionTable::standard();
    Scanner::new(&vocabulary, &table).scan(source)
}

/// Check lexical error codes and limits at startup
pub fn init_lexical_analysis_logging() -> Result<(), String> {
    let required = [
        codes::lexical::INVALID_CHARACTER,
        codes::lexical::INVALID_LEXEME,
        codes::warnings::LONG_IDENTIFIER,
        codes::warnings::LEXICAL_ERROR_LIMIT,
        codes::success::TOKENIZATION_COMPLETE,
    ];

    for code in &required {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "Lexical code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    if MAX_IDENTIFIER_LENGTH == 0 {
        return Err("MAX_IDENTIFIER_LENGTH cannot be zero".to_string());
    }

    crate::log_debug!("Lexical limits initialized",
        "max_identifier_length" => MAX_IDENTIFIER_LENGTH,
        "max_lexical_errors" => MAX_LEXICAL_ERRORS
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_validates_codes() {
        assert!(init_lexical_analysis_logging().is_ok());
    }

    #[test]
    fn test_scan_source_uses_standard_configuration() {
        let output = scan_source("switch (x) { case y: break; }");
        assert!(!output.has_errors());
        assert_eq!(output.symbols.len(), 2);
        assert_eq!(output.metrics.keyword_tokens, 3);
    }
}
