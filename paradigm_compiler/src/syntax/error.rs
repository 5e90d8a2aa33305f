//! Parse rejections
//!
//! A rejection ends the parse; no classification is produced for it.

use crate::grammar::{GrammarSymbol, Lookahead, NonTerminal};
use crate::logging::{codes, Code};
use crate::utils::Span;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
pub enum SyntaxError {
    #[error("Unexpected token: expected {expected}, found {found} at {span}")]
    UnexpectedToken {
        expected: GrammarSymbol,
        found: Lookahead,
        span: Span,
    },

    #[error("No parsing rule for {nonterminal} on {lookahead} at {span}")]
    NoRule {
        nonterminal: NonTerminal,
        lookahead: Lookahead,
        span: Span,
    },

    #[error("Unexpected input after the end of the structure: {found} at {span}")]
    TrailingInput { found: Lookahead, span: Span },

    #[error("Parse step limit of {limit} exceeded at {span}")]
    StepLimitExceeded { limit: usize, span: Span },

    #[error("Parse stack depth limit of {limit} exceeded at {span}")]
    StackDepthExceeded { limit: usize, span: Span },
}

impl SyntaxError {
    pub fn error_code(&self) -> Code {
        match self {
            Self::UnexpectedToken { .. } => codes::syntax::UNEXPECTED_TOKEN,
            Self::NoRule { .. } => codes::syntax::NO_PARSING_RULE,
            Self::TrailingInput { .. } => codes::syntax::TRAILING_INPUT,
            Self::StepLimitExceeded { .. } => codes::syntax::STEP_LIMIT_EXCEEDED,
            Self::StackDepthExceeded { .. } => codes::syntax::STACK_DEPTH_EXCEEDED,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Self::UnexpectedToken { span, .. }
            | Self::NoRule { span, .. }
            | Self::TrailingInput { span, .. }
            | Self::StepLimitExceeded { span, .. }
            | Self::StackDepthExceeded { span, .. } => *span,
        }
    }

    /// The grammar symbol the parser was trying to satisfy
    pub fn expected(&self) -> Option<GrammarSymbol> {
        match self {
            Self::UnexpectedToken { expected, .. } => Some(*expected),
            Self::NoRule { nonterminal, .. } => Some(GrammarSymbol::NonTerminal(*nonterminal)),
            Self::TrailingInput { .. } => Some(GrammarSymbol::EndMarker),
            Self::StepLimitExceeded { .. } | Self::StackDepthExceeded { .. } => None,
        }
    }

    /// The lookahead the parser actually saw
    pub fn found(&self) -> Option<Lookahead> {
        match self {
            Self::UnexpectedToken { found, .. }
            | Self::TrailingInput { found, .. }
            | Self::NoRule {
                lookahead: found, ..
            } => Some(*found),
            Self::StepLimitExceeded { .. } | Self::StackDepthExceeded { .. } => None,
        }
    }

    /// Resource guard failures rather than genuine rejections of the input
    pub fn is_limit(&self) -> bool {
        matches!(
            self,
            Self::StepLimitExceeded { .. } | Self::StackDepthExceeded { .. }
        )
    }

    pub fn description(&self) -> &'static str {
        codes::get_description(self.error_code().as_str())
    }

    pub fn recommended_action(&self) -> &'static str {
        codes::get_action(self.error_code().as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Terminal;
    use crate::tokens::SymbolKind;
    use crate::utils::Position;

    fn span() -> Span {
        Span::single(Position::new(3, 1, 4))
    }

    #[test]
    fn test_error_code_mapping() {
        let no_rule = SyntaxError::NoRule {
            nonterminal: NonTerminal::Type,
            lookahead: Lookahead::Terminal(Terminal::Symbol(SymbolKind::Semicolon)),
            span: span(),
        };
        assert_eq!(no_rule.error_code(), codes::syntax::NO_PARSING_RULE);

        let trailing = SyntaxError::TrailingInput {
            found: Lookahead::Terminal(Terminal::Identifier),
            span: span(),
        };
        assert_eq!(trailing.error_code(), codes::syntax::TRAILING_INPUT);
        assert_eq!(trailing.expected(), Some(GrammarSymbol::EndMarker));
    }

    #[test]
    fn test_expected_and_found() {
        let err = SyntaxError::UnexpectedToken {
            expected: GrammarSymbol::symbol(SymbolKind::RightParen),
            found: Lookahead::End,
            span: span(),
        };
        assert_eq!(err.expected(), Some(GrammarSymbol::symbol(SymbolKind::RightParen)));
        assert_eq!(err.found(), Some(Lookahead::End));
        assert_eq!(
            err.to_string(),
            "Unexpected token: expected ')', found end of input at 1:4-5"
        );
        assert!(!err.is_limit());
    }

    #[test]
    fn test_limits_have_no_pair() {
        let err = SyntaxError::StepLimitExceeded {
            limit: 10,
            span: span(),
        };
        assert!(err.is_limit());
        assert_eq!(err.expected(), None);
        assert_eq!(err.found(), None);
        assert!(!err.description().is_empty());
    }
}
