//! Table-driven predictive parser
//!
//! The stack starts as `[EndMarker, start]`. A nonterminal on top is replaced
//! by the body of the production the table selects for the current lookahead
//! (pushed in reverse); a terminal on top must match the lookahead, which is
//! then consumed. The parse accepts when `EndMarker` surfaces with the input
//! exhausted.

use super::error::SyntaxError;
use crate::classification::ClassificationFlags;
use crate::config::compile_time::syntax::*;
use crate::config::runtime::SyntaxPreferences;
use crate::grammar::{GrammarSymbol, Lookahead, ParsingTable, ProductionId};
use crate::log_debug;
use crate::tokens::TokenStream;
use serde::Serialize;

pub type ParseResult = Result<Acceptance, SyntaxError>;

/// A successful parse
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Acceptance {
    pub flags: ClassificationFlags,
    /// Productions in firing order; empty when trace recording is disabled
    pub applied_productions: Vec<ProductionId>,
    pub tokens_consumed: usize,
}

/// Step and stack bounds for tables that may not halt on their own
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ParseLimits {
    max_steps: usize,
    max_stack_depth: usize,
}

pub struct PredictiveParser<'a> {
    table: &'a ParsingTable,
    preferences: SyntaxPreferences,
    limits: Option<ParseLimits>,
}

impl<'a> PredictiveParser<'a> {
    pub fn new(table: &'a ParsingTable) -> Self {
        Self::with_preferences(table, SyntaxPreferences::default())
    }

    pub fn with_preferences(table: &'a ParsingTable, preferences: SyntaxPreferences) -> Self {
        // Terminal-led tables are bounded by the input length
        let limits = (!table.is_terminal_led()).then_some(ParseLimits {
            max_steps: MAX_PARSE_STEPS,
            max_stack_depth: MAX_STACK_DEPTH,
        });
        Self {
            table,
            preferences,
            limits,
        }
    }

    /// Enforce guards no looser than the build profile, whatever the table
    pub fn with_limits(mut self, max_steps: usize, max_stack_depth: usize) -> Self {
        self.limits = Some(ParseLimits {
            max_steps: max_steps.min(MAX_PARSE_STEPS),
            max_stack_depth: max_stack_depth.min(MAX_STACK_DEPTH),
        });
        self
    }

    pub fn is_guarded(&self) -> bool {
        self.limits.is_some()
    }

    pub fn table(&self) -> &ParsingTable {
        self.table
    }

    pub fn parse(&self, tokens: &TokenStream) -> ParseResult {
        let mut cursor = tokens.cursor();
        let mut stack = vec![
            GrammarSymbol::EndMarker,
            GrammarSymbol::NonTerminal(self.table.start()),
        ];
        let mut flags = ClassificationFlags::default();
        let mut applied = Vec::new();
        let mut steps = 0usize;

        while let Some(top) = stack.pop() {
            if top == GrammarSymbol::EndMarker {
                break;
            }
            steps += 1;
            if let Some(limits) = self.limits {
                if steps > limits.max_steps {
                    return Err(SyntaxError::StepLimitExceeded {
                        limit: limits.max_steps,
                        span: cursor.current_span(),
                    });
                }
            }

            let current = cursor.current();
            let lookahead = Lookahead::from(&current.value);

            match top {
                GrammarSymbol::Terminal(expected) => {
                    if lookahead != Lookahead::Terminal(expected) {
                        return Err(SyntaxError::UnexpectedToken {
                            expected: top,
                            found: lookahead,
                            span: current.span,
                        });
                    }
                    cursor.advance();
                }
                GrammarSymbol::NonTerminal(nonterminal) => {
                    let production = self.table.lookup(nonterminal, lookahead).ok_or(
                        SyntaxError::NoRule {
                            nonterminal,
                            lookahead,
                            span: current.span,
                        },
                    )?;

                    flags.record(production.effect);
                    if self.preferences.record_production_trace {
                        applied.push(production.id);
                    }
                    if self.preferences.log_applied_productions {
                        log_debug!("Applied production",
                            "production" => production,
                            "lookahead" => lookahead
                        );
                    }

                    stack.extend(production.body.iter().rev().copied());
                    if let Some(limits) = self.limits {
                        if stack.len() > limits.max_stack_depth {
                            return Err(SyntaxError::StackDepthExceeded {
                                limit: limits.max_stack_depth,
                                span: current.span,
                            });
                        }
                    }
                }
                GrammarSymbol::EndMarker => break,
            }
        }

        if !cursor.is_at_end() {
            let leftover = cursor.current();
            return Err(SyntaxError::TrailingInput {
                found: Lookahead::from(&leftover.value),
                span: leftover.span,
            });
        }

        Ok(Acceptance {
            flags,
            applied_productions: applied,
            tokens_consumed: cursor.position(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{NonTerminal, Production, ProductionEffect, Terminal};
    use crate::tokens::{Keyword, SymbolKind, Token};
    use assert_matches::assert_matches;

    fn kw(k: Keyword) -> Token {
        Token::Keyword(k)
    }

    fn sym(s: SymbolKind) -> Token {
        Token::Symbol(s)
    }

    fn trace(acceptance: &Acceptance) -> Vec<u8> {
        acceptance.applied_productions.iter().map(|p| p.0).collect()
    }

    fn parse(tokens: Vec<Token>) -> ParseResult {
        let table = ParsingTable::standard();
        let preferences = SyntaxPreferences {
            record_production_trace: true,
            log_applied_productions: false,
        };
        PredictiveParser::with_preferences(&table, preferences).parse(&TokenStream::from_tokens(tokens))
    }

    #[test]
    fn test_end_marker_only_is_accepted() {
        let acceptance = parse(vec![]).unwrap();
        assert_eq!(acceptance.flags, ClassificationFlags::default());
        assert_eq!(trace(&acceptance), vec![5]);
        assert_eq!(acceptance.tokens_consumed, 0);
    }

    #[test]
    fn test_class_with_block() {
        let acceptance = parse(vec![
            kw(Keyword::Class),
            Token::Identifier(1),
            sym(SymbolKind::LeftBrace),
            sym(SymbolKind::RightBrace),
        ])
        .unwrap();

        assert_eq!(trace(&acceptance), vec![2, 1, 4, 5, 7, 8, 5]);
        assert!(acceptance.flags.class_keyword);
        assert!(acceptance.flags.block_delimiter);
        assert!(acceptance.flags.bare_identifier);
        assert!(!acceptance.flags.paren_delimiter);
        assert_eq!(acceptance.tokens_consumed, 4);
    }

    #[test]
    fn test_paren_then_block() {
        let acceptance = parse(vec![
            Token::Identifier(1),
            sym(SymbolKind::LeftParen),
            sym(SymbolKind::RightParen),
            sym(SymbolKind::LeftBrace),
            sym(SymbolKind::RightBrace),
        ])
        .unwrap();

        assert!(acceptance.flags.paren_delimiter);
        assert!(acceptance.flags.block_delimiter);
        assert!(!acceptance.flags.class_keyword);
    }

    #[test]
    fn test_nested_closers() {
        let acceptance = parse(vec![
            sym(SymbolKind::LeftBrace),
            sym(SymbolKind::LeftParen),
            sym(SymbolKind::RightParen),
            sym(SymbolKind::RightBrace),
        ]);
        assert!(acceptance.is_ok());
    }

    #[test]
    fn test_unbalanced_closers_are_accepted() {
        // CLOSER consumes any run of ')' and '}' after an opener
        let acceptance = parse(vec![
            sym(SymbolKind::LeftParen),
            sym(SymbolKind::RightBrace),
            sym(SymbolKind::RightParen),
        ]);
        assert!(acceptance.is_ok());
    }

    #[test]
    fn test_no_rule_rejection() {
        let err = parse(vec![kw(Keyword::Class), sym(SymbolKind::Semicolon)]).unwrap_err();
        assert_matches!(
            err,
            SyntaxError::NoRule {
                nonterminal: NonTerminal::Type,
                lookahead: Lookahead::Terminal(Terminal::Symbol(SymbolKind::Semicolon)),
                ..
            }
        );
        assert_eq!(err.span().start().line, 2);
    }

    #[test]
    fn test_keyword_outside_grammar_has_no_rule() {
        let err = parse(vec![kw(Keyword::Public)]).unwrap_err();
        assert_matches!(err, SyntaxError::NoRule { .. });
    }

    #[test]
    fn test_trailing_input() {
        let err = parse(vec![sym(SymbolKind::RightParen)]).unwrap_err();
        assert_matches!(
            err,
            SyntaxError::TrailingInput {
                found: Lookahead::Terminal(Terminal::Symbol(SymbolKind::RightParen)),
                ..
            }
        );
        assert_eq!(err.expected(), Some(GrammarSymbol::EndMarker));
    }

    fn paren_table() -> ParsingTable {
        // TYPE -> ( TYPE ) | ε
        let productions = vec![
            Production::new(
                1,
                NonTerminal::Type,
                vec![
                    GrammarSymbol::symbol(SymbolKind::LeftParen),
                    NonTerminal::Type.into(),
                    GrammarSymbol::symbol(SymbolKind::RightParen),
                ],
                ProductionEffect::ParenDelimiter,
            ),
            Production::epsilon(2, NonTerminal::Type),
        ];
        let entries = [
            (
                NonTerminal::Type,
                Lookahead::Terminal(Terminal::Symbol(SymbolKind::LeftParen)),
                1,
            ),
            (
                NonTerminal::Type,
                Lookahead::Terminal(Terminal::Symbol(SymbolKind::RightParen)),
                2,
            ),
            (NonTerminal::Type, Lookahead::End, 2),
        ];
        ParsingTable::new(NonTerminal::Type, productions, &entries).unwrap()
    }

    #[test]
    fn test_terminal_mismatch_names_expected_and_found() {
        let table = paren_table();
        let parser = PredictiveParser::new(&table);

        let err = parser
            .parse(&TokenStream::from_tokens([sym(SymbolKind::LeftParen)]))
            .unwrap_err();

        assert_matches!(err, SyntaxError::UnexpectedToken { .. });
        assert_eq!(
            err.expected(),
            Some(GrammarSymbol::symbol(SymbolKind::RightParen))
        );
        assert_eq!(err.found(), Some(Lookahead::End));

        let ok = parser.parse(&TokenStream::from_tokens([
            sym(SymbolKind::LeftParen),
            sym(SymbolKind::LeftParen),
            sym(SymbolKind::RightParen),
            sym(SymbolKind::RightParen),
        ]));
        assert!(ok.is_ok());
    }

    #[test]
    fn test_stack_depth_guard() {
        let table = paren_table();
        let parser = PredictiveParser::new(&table).with_limits(usize::MAX, 8);
        let tokens = vec![sym(SymbolKind::LeftParen); 10];

        let err = parser.parse(&TokenStream::from_tokens(tokens)).unwrap_err();
        assert_matches!(err, SyntaxError::StackDepthExceeded { limit: 8, .. });
    }

    #[test]
    fn test_step_guard() {
        let table = ParsingTable::standard();
        let parser = PredictiveParser::new(&table).with_limits(3, usize::MAX);
        let tokens = vec![Token::Identifier(1); 5];

        let err = parser.parse(&TokenStream::from_tokens(tokens)).unwrap_err();
        assert_matches!(err, SyntaxError::StepLimitExceeded { limit: 3, .. });
    }

    fn left_recursive_table() -> ParsingTable {
        // TYPE -> TYPE id | ε never consumes on an id lookahead
        let productions = vec![
            Production::new(
                1,
                NonTerminal::Type,
                vec![NonTerminal::Type.into(), GrammarSymbol::Terminal(Terminal::Identifier)],
                ProductionEffect::BareIdentifier,
            ),
            Production::epsilon(2, NonTerminal::Type),
        ];
        let entries = [
            (NonTerminal::Type, Lookahead::Terminal(Terminal::Identifier), 1),
            (NonTerminal::Type, Lookahead::End, 2),
        ];
        ParsingTable::new(NonTerminal::Type, productions, &entries).unwrap()
    }

    #[test]
    fn test_custom_table_without_leading_terminal_is_guarded() {
        let table = left_recursive_table();
        let parser = PredictiveParser::new(&table);
        assert!(parser.is_guarded());

        let err = parser
            .parse(&TokenStream::from_tokens([Token::Identifier(1)]))
            .unwrap_err();
        assert_matches!(
            err,
            SyntaxError::StepLimitExceeded { .. } | SyntaxError::StackDepthExceeded { .. }
        );
    }

    #[test]
    fn test_long_identifier_run_is_accepted() {
        let table = ParsingTable::standard();
        let parser = PredictiveParser::new(&table);
        assert!(!parser.is_guarded());

        let count = MAX_PARSE_STEPS / 2 + 10;
        let acceptance = parser
            .parse(&TokenStream::from_tokens(vec![Token::Identifier(1); count]))
            .unwrap();
        assert_eq!(acceptance.tokens_consumed, count);
        assert!(acceptance.flags.bare_identifier);
    }

    #[test]
    fn test_deep_nesting_is_accepted() {
        let table = ParsingTable::standard();
        let count = MAX_STACK_DEPTH / 3 + 10;
        let acceptance = PredictiveParser::new(&table)
            .parse(&TokenStream::from_tokens(vec![sym(SymbolKind::LeftParen); count]))
            .unwrap();
        assert_eq!(acceptance.tokens_consumed, count);
        assert!(acceptance.flags.paren_delimiter);
    }

    #[test]
    fn test_trace_can_be_disabled() {
        let table = ParsingTable::standard();
        let preferences = SyntaxPreferences {
            record_production_trace: false,
            log_applied_productions: false,
        };
        let acceptance = PredictiveParser::with_preferences(&table, preferences)
            .parse(&TokenStream::from_tokens([Token::Identifier(1)]))
            .unwrap();
        assert!(acceptance.applied_productions.is_empty());
        assert!(acceptance.flags.bare_identifier);
    }
}
