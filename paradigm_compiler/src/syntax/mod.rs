//! Syntax analysis: predictive parsing of token streams

mod error;
mod parser;

pub use error::SyntaxError;
pub use parser::{Acceptance, ParseResult, PredictiveParser};

use crate::config::compile_time::syntax::*;
use crate::config::runtime::SyntaxPreferences;
use crate::grammar::ParsingTable;
use crate::logging::codes;
use crate::tokens::TokenStream;
use crate::{log_debug, log_error, log_success};

/// Parse with logging around the result
pub fn parse_tokens(tokens: &TokenStream, table: &ParsingTable) -> ParseResult {
    parse_tokens_with_preferences(tokens, table, SyntaxPreferences::default())
}

pub fn parse_tokens_with_preferences(
    tokens: &TokenStream,
    table: &ParsingTable,
    preferences: SyntaxPreferences,
) -> ParseResult {
    log_debug!("Starting syntax analysis", "tokens" => tokens.len());

    let result = PredictiveParser::with_preferences(table, preferences).parse(tokens);

    match &result {
        Ok(acceptance) => {
            log_success!(
                codes::success::PARSE_ACCEPTED,
                "Token stream accepted",
                "tokens_consumed" => acceptance.tokens_consumed,
                "productions_applied" => acceptance.applied_productions.len()
            );
        }
        Err(error) => {
            let expected = error
                .expected()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "-".to_string());
            let found = error
                .found()
                .map(|l| l.to_string())
                .unwrap_or_else(|| "-".to_string());
            log_error!(error.error_code(), &error.to_string(),
                span = error.span(),
                "expected" => expected,
                "found" => found
            );
        }
    }

    result
}

/// Check syntax codes and limits at startup
pub fn init_syntax_logging() -> Result<(), String> {
    let required = [
        codes::syntax::UNEXPECTED_TOKEN,
        codes::syntax::NO_PARSING_RULE,
        codes::syntax::TRAILING_INPUT,
        codes::syntax::INVALID_GRAMMAR,
        codes::syntax::STEP_LIMIT_EXCEEDED,
        codes::syntax::STACK_DEPTH_EXCEEDED,
        codes::success::PARSE_ACCEPTED,
    ];

    for code in &required {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "Syntax code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    if MAX_STACK_DEPTH < 2 {
        return Err("MAX_STACK_DEPTH must hold at least the start symbol".to_string());
    }

    log_debug!("Syntax limits initialized",
        "max_parse_steps" => MAX_PARSE_STEPS,
        "max_stack_depth" => MAX_STACK_DEPTH
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::{Keyword, SymbolKind, Token};

    #[test]
    fn test_module_initialization() {
        assert!(init_syntax_logging().is_ok());
    }

    #[test]
    fn test_parse_tokens() {
        let table = ParsingTable::standard();
        let stream = TokenStream::from_tokens([
            Token::Keyword(Keyword::Class),
            Token::Identifier(1),
            Token::Symbol(SymbolKind::LeftBrace),
            Token::Symbol(SymbolKind::RightBrace),
        ]);
        assert!(parse_tokens(&stream, &table).is_ok());

        let stream = TokenStream::from_tokens([Token::Symbol(SymbolKind::Arrow)]);
        assert!(parse_tokens(&stream, &table).is_err());
    }
}
