//! Table-driven scanner
//!
//! One left-to-right pass with at most two characters of lookahead. Symbols
//! are matched first (two-character symbols before single ones), silent
//! delimiters are skipped, and everything else goes through the identifier
//! automaton. Lexical errors are collected and scanning always continues.

use super::char_class::CharacterClass;
use super::dfa::{DfaState, TransitionTable};
use crate::config::compile_time::lexical::*;
use crate::config::runtime::LexicalPreferences;
use crate::logging::codes;
use crate::symbols::SymbolTable;
use crate::tokens::{SpannedToken, Token, TokenStream, Vocabulary};
use crate::utils::{Position, Span, Spanned};
use crate::{log_debug, log_error, log_success, log_warning};
use serde::Serialize;

/// Recoverable lexical errors; the scanner reports them and moves on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
pub enum LexerError {
    #[error("Invalid character '{character}'")]
    InvalidCharacter { character: char, span: Span },

    #[error("Invalid lexeme '{lexeme}': identifiers must start with a letter or underscore")]
    InvalidLexeme { lexeme: String, span: Span },
}

impl LexerError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            LexerError::InvalidCharacter { .. } => codes::lexical::INVALID_CHARACTER,
            LexerError::InvalidLexeme { .. } => codes::lexical::INVALID_LEXEME,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            LexerError::InvalidCharacter { span, .. } | LexerError::InvalidLexeme { span, .. } => {
                *span
            }
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct LexicalMetrics {
    pub characters: usize,
    pub keyword_tokens: usize,
    pub symbol_tokens: usize,
    pub identifier_tokens: usize,
    pub identifiers_interned: usize,
    /// Identifiers longer than `MAX_IDENTIFIER_LENGTH`; still tokenized
    pub long_identifiers: usize,
    pub lexical_errors: usize,
}

impl LexicalMetrics {
    fn record_token(&mut self, token: &Token) {
        match token {
            Token::Keyword(_) => self.keyword_tokens += 1,
            Token::Symbol(_) => self.symbol_tokens += 1,
            Token::Identifier(_) => self.identifier_tokens += 1,
            Token::EndOfInput => {}
        }
    }

    pub fn total_tokens(&self) -> usize {
        self.keyword_tokens + self.symbol_tokens + self.identifier_tokens
    }
}

/// Everything one scan produces
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanOutput {
    /// Tokens in source order, without an end marker
    pub tokens: Vec<SpannedToken>,
    pub symbols: SymbolTable,
    pub errors: Vec<LexerError>,
    pub metrics: LexicalMetrics,
}

impl ScanOutput {
    pub fn token_values(&self) -> Vec<Token> {
        self.tokens.iter().map(|t| t.value).collect()
    }

    /// Parser input for these tokens
    pub fn token_stream(&self) -> TokenStream {
        TokenStream::new(self.tokens.clone())
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Scanner over shared, read-only vocabulary and transition table
pub struct Scanner<'a> {
    vocabulary: &'a Vocabulary,
    table: &'a TransitionTable,
    preferences: LexicalPreferences,
}

impl<'a> Scanner<'a> {
    pub fn new(vocabulary: &'a Vocabulary, table: &'a TransitionTable) -> Self {
        Self::with_preferences(vocabulary, table, LexicalPreferences::default())
    }

    pub fn with_preferences(
        vocabulary: &'a Vocabulary,
        table: &'a TransitionTable,
        preferences: LexicalPreferences,
    ) -> Self {
        Self {
            vocabulary,
            table,
            preferences,
        }
    }

    pub fn preferences(&self) -> &LexicalPreferences {
        &self.preferences
    }

    pub fn scan(&self, source: &str) -> ScanOutput {
        let chars: Vec<char> = source.chars().collect();
        let mut output = ScanOutput {
            metrics: LexicalMetrics {
                characters: chars.len(),
                ..Default::default()
            },
            ..Default::default()
        };

        log_debug!("Starting lexical analysis",
            "char_count" => chars.len(),
            "max_identifier_length" => MAX_IDENTIFIER_LENGTH
        );

        let mut pos = Position::start();
        let mut i = 0;

        while i < chars.len() {
            let ch = chars[i];

            if let Some(&next) = chars.get(i + 1) {
                if let Some(kind) = self.vocabulary.two_char_symbol(ch, next) {
                    let end = pos.advance(ch).advance(next);
                    self.push_token(&mut output, Token::Symbol(kind), Span::new(pos, end));
                    pos = end;
                    i += 2;
                    continue;
                }
            }

            if let Some(kind) = self.vocabulary.single_char_symbol(ch) {
                let end = pos.advance(ch);
                self.push_token(&mut output, Token::Symbol(kind), Span::new(pos, end));
                pos = end;
                i += 1;
                continue;
            }

            if CharacterClass::of(ch, self.vocabulary) == CharacterClass::Delimiter {
                pos = pos.advance(ch);
                i += 1;
                continue;
            }

            let start = pos;
            let begin = i;
            let mut state = DfaState::Start;
            while let Some(&c) = chars.get(i) {
                let class = CharacterClass::of(c, self.vocabulary);
                if !class.is_identifier_part() {
                    break;
                }
                state = self.table.next(state, class);
                pos = pos.advance(c);
                i += 1;
            }

            if i == begin {
                // Nothing can start here; skip exactly one character
                let end = pos.advance(ch);
                self.record_error(
                    &mut output,
                    LexerError::InvalidCharacter {
                        character: ch,
                        span: Span::new(start, end),
                    },
                );
                pos = end;
                i += 1;
                continue;
            }

            // The boundary is examined but not consumed
            let boundary = chars
                .get(i)
                .map(|&c| CharacterClass::of(c, self.vocabulary))
                .unwrap_or(CharacterClass::Delimiter);
            state = self.table.next(state, boundary);

            let lexeme: String = chars[begin..i].iter().collect();
            let span = Span::new(start, pos);
            self.finish_lexeme(&mut output, lexeme, state, span);
        }

        output.metrics.identifiers_interned = output.symbols.len();
        output.metrics.lexical_errors = output.errors.len();

        log_success!(codes::success::TOKENIZATION_COMPLETE,
            "Lexical analysis completed",
            "token_count" => output.metrics.total_tokens(),
            "keywords" => output.metrics.keyword_tokens,
            "symbols" => output.metrics.symbol_tokens,
            "identifiers" => output.metrics.identifier_tokens,
            "distinct_identifiers" => output.symbols.len(),
            "lexical_errors" => output.errors.len()
        );

        output
    }

    fn finish_lexeme(&self, output: &mut ScanOutput, lexeme: String, state: DfaState, span: Span) {
        if !self.table.is_accepting(state) {
            self.record_error(output, LexerError::InvalidLexeme { lexeme, span });
            return;
        }

        if let Some(keyword) = self.vocabulary.keyword(&lexeme) {
            self.push_token(output, Token::Keyword(keyword), span);
            return;
        }

        let length = lexeme.chars().count();
        if length > MAX_IDENTIFIER_LENGTH {
            output.metrics.long_identifiers += 1;
            log_warning!(
                codes::warnings::LONG_IDENTIFIER,
                "Identifier exceeds maximum length",
                span = span,
                "length" => length,
                "max" => MAX_IDENTIFIER_LENGTH
            );
        }

        let index = output.symbols.intern(&lexeme);
        self.push_token(output, Token::Identifier(index), span);
    }

    fn push_token(&self, output: &mut ScanOutput, token: Token, span: Span) {
        output.metrics.record_token(&token);
        output.tokens.push(Spanned::new(token, span));
    }

    fn record_error(&self, output: &mut ScanOutput, error: LexerError) {
        let reported = output.errors.len();

        if self.preferences.log_lexical_errors {
            if reported < MAX_LEXICAL_ERRORS {
                let message = if self.preferences.include_position_in_errors {
                    format!("{} at {}", error, error.span().start())
                } else {
                    error.to_string()
                };
                log_error!(error.error_code(), &message, span = error.span());
            } else if reported == MAX_LEXICAL_ERRORS {
                log_warning!(
                    codes::warnings::LEXICAL_ERROR_LIMIT,
                    "Lexical error limit reached; further errors are counted but not logged",
                    "limit" => MAX_LEXICAL_ERRORS
                );
            }
        }

        output.errors.push(error);
    }
}
