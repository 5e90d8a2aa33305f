//! Token sequences handed from the scanner (or the interchange decoder) to the parser
//!
//! A `TokenStream` always ends in exactly one `EndOfInput`, so the parser can
//! treat the end marker as an ordinary lookahead. Reading happens through a
//! `Cursor`, which lets several parses share one immutable stream.

use crate::tokens::token::Token;
use crate::utils::{Position, Span, Spanned};

/// A token with span information
pub type SpannedToken = Spanned<Token>;

#[derive(Debug, Clone, PartialEq)]
pub struct TokenStream {
    tokens: Vec<SpannedToken>,
}

impl TokenStream {
    /// Build a stream, dropping any interior end markers and appending the final one
    pub fn new(tokens: Vec<SpannedToken>) -> Self {
        let end_span = match tokens.iter().rev().find(|t| t.value.is_end()) {
            Some(explicit) => explicit.span,
            None => tokens
                .last()
                .map(|t| Span::single(t.span.end()))
                .unwrap_or_else(|| Span::single(Position::start())),
        };

        let mut tokens: Vec<SpannedToken> =
            tokens.into_iter().filter(|t| !t.value.is_end()).collect();
        tokens.push(Spanned::new(Token::EndOfInput, end_span));

        crate::log_debug!("Token stream built",
            "significant_tokens" => tokens.len() - 1
        );

        Self { tokens }
    }

    /// Stream from bare tokens; spans are synthesised one line per token
    pub fn from_tokens<I>(tokens: I) -> Self
    where
        I: IntoIterator<Item = Token>,
    {
        Self::new(
            tokens
                .into_iter()
                .enumerate()
                .map(|(i, token)| Spanned::new(token, Span::line(i as u32 + 1, 0)))
                .collect(),
        )
    }

    pub fn cursor(&self) -> Cursor<'_> {
        Cursor {
            tokens: &self.tokens,
            position: 0,
        }
    }

    /// All tokens including the final end marker
    pub fn tokens(&self) -> &[SpannedToken] {
        &self.tokens
    }

    /// Tokens before the end marker
    pub fn significant(&self) -> &[SpannedToken] {
        &self.tokens[..self.tokens.len() - 1]
    }

    /// Number of tokens before the end marker
    pub fn len(&self) -> usize {
        self.tokens.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter().map(|t| &t.value)
    }
}

impl From<Vec<SpannedToken>> for TokenStream {
    fn from(tokens: Vec<SpannedToken>) -> Self {
        Self::new(tokens)
    }
}

/// Read position over a `TokenStream`
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    tokens: &'a [SpannedToken],
    position: usize,
}

impl<'a> Cursor<'a> {
    /// Current token; the end marker once the input is exhausted
    pub fn current(&self) -> &'a SpannedToken {
        let last = self.tokens.len() - 1;
        &self.tokens[self.position.min(last)]
    }

    pub fn current_token(&self) -> Token {
        self.current().value
    }

    pub fn current_span(&self) -> Span {
        self.current().span
    }

    /// Move past the current token; stays on the end marker
    pub fn advance(&mut self) -> &'a SpannedToken {
        if !self.is_at_end() {
            self.position += 1;
        }
        self.current()
    }

    pub fn is_at_end(&self) -> bool {
        self.current().value.is_end()
    }

    /// Tokens consumed so far
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn remaining(&self) -> usize {
        self.tokens.len() - 1 - self.position.min(self.tokens.len() - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::{Keyword, SymbolKind};

    #[test]
    fn test_end_marker_appended_once() {
        let stream = TokenStream::from_tokens([Token::Keyword(Keyword::Class), Token::Identifier(1)]);
        assert_eq!(stream.len(), 2);
        assert_eq!(stream.tokens().len(), 3);
        assert!(stream.tokens()[2].value.is_end());

        let stream = TokenStream::from_tokens([
            Token::Identifier(1),
            Token::EndOfInput,
            Token::Symbol(SymbolKind::Dot),
            Token::EndOfInput,
        ]);
        assert_eq!(stream.len(), 2);
        assert_eq!(stream.iter().filter(|t| t.is_end()).count(), 1);
    }

    #[test]
    fn test_empty_stream() {
        let stream = TokenStream::new(Vec::new());
        assert!(stream.is_empty());

        let cursor = stream.cursor();
        assert!(cursor.is_at_end());
        assert_eq!(cursor.current_token(), Token::EndOfInput);
    }

    #[test]
    fn test_cursor_navigation() {
        let stream = TokenStream::from_tokens([
            Token::Symbol(SymbolKind::LeftBrace),
            Token::Symbol(SymbolKind::RightBrace),
        ]);
        let mut cursor = stream.cursor();

        assert_eq!(cursor.current_token(), Token::Symbol(SymbolKind::LeftBrace));
        assert_eq!(cursor.remaining(), 2);
        cursor.advance();
        assert_eq!(cursor.current_token(), Token::Symbol(SymbolKind::RightBrace));
        cursor.advance();
        assert!(cursor.is_at_end());
        cursor.advance();
        assert!(cursor.is_at_end());
        assert_eq!(cursor.position(), 2);
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn test_end_span_follows_last_token() {
        let span = Span::new(Position::new(0, 1, 1), Position::new(5, 1, 6));
        let stream = TokenStream::new(vec![Spanned::new(Token::Identifier(1), span)]);
        let end = stream.tokens()[1].span;
        assert_eq!(end.start(), Position::new(5, 1, 6));
    }
}
