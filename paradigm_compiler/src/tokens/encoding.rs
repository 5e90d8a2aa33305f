//! Textual token interchange
//!
//! One token per line: `<code>` for keywords and symbols, `<26,index>` for
//! identifiers, closed by a `$` line. Anything after the closing `>` is an
//! annotation, which is how the human listing stays decodable.

use crate::logging::codes;
use crate::logging::Code;
use crate::symbols::SymbolTable;
use crate::tokens::token::Token;
use crate::tokens::token_stream::SpannedToken;
use crate::tokens::vocabulary::{Keyword, SymbolKind, IDENTIFIER_CODE};
use crate::utils::{Span, Spanned};
use crate::log_warning;

/// Sentinel line closing an encoded token stream
pub const SENTINEL: &str = "$";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodingError {
    #[error("line {line}: malformed token record '{text}'")]
    Malformed { line: u32, text: String },

    #[error("line {line}: token kind '{text}' is not a number")]
    InvalidKindNumber { line: u32, text: String },

    #[error("line {line}: unknown token kind {kind}")]
    UnknownKind { line: u32, kind: u32 },

    #[error("line {line}: identifier token without a symbol index")]
    MissingIndex { line: u32 },

    #[error("line {line}: token kind {kind} does not take a symbol index")]
    UnexpectedIndex { line: u32, kind: u32 },

    #[error("line {line}: symbol index '{text}' must be a positive integer")]
    ZeroIndex { line: u32, text: String },

    #[error("line {line}: content after the '$' sentinel")]
    ContentAfterSentinel { line: u32 },
}

impl EncodingError {
    pub fn error_code(&self) -> Code {
        match self {
            EncodingError::Malformed { .. } => codes::token_encoding::MALFORMED_TOKEN_LINE,
            EncodingError::InvalidKindNumber { .. } => codes::token_encoding::INVALID_KIND_NUMBER,
            EncodingError::UnknownKind { .. } => codes::token_encoding::UNKNOWN_TOKEN_KIND,
            EncodingError::MissingIndex { .. } => codes::token_encoding::MISSING_SYMBOL_INDEX,
            EncodingError::UnexpectedIndex { .. } => {
                codes::token_encoding::UNEXPECTED_SYMBOL_INDEX
            }
            EncodingError::ZeroIndex { .. } => codes::token_encoding::INVALID_SYMBOL_INDEX,
            EncodingError::ContentAfterSentinel { .. } => {
                codes::token_encoding::CONTENT_AFTER_SENTINEL
            }
        }
    }

    pub fn line(&self) -> u32 {
        match self {
            EncodingError::Malformed { line, .. }
            | EncodingError::InvalidKindNumber { line, .. }
            | EncodingError::UnknownKind { line, .. }
            | EncodingError::MissingIndex { line }
            | EncodingError::UnexpectedIndex { line, .. }
            | EncodingError::ZeroIndex { line, .. }
            | EncodingError::ContentAfterSentinel { line } => *line,
        }
    }
}

/// The `<code>` or `<26,index>` record for one token; `$` for the end marker
pub fn encode_token(token: &Token) -> String {
    match token {
        Token::Identifier(index) => format!("<{},{}>", IDENTIFIER_CODE, index),
        Token::EndOfInput => SENTINEL.to_string(),
        other => match other.code() {
            Some(code) => format!("<{}>", code),
            None => SENTINEL.to_string(),
        },
    }
}

/// Interchange text for a token sequence, always closed by the sentinel
pub fn encode_tokens<'a, I>(tokens: I) -> String
where
    I: IntoIterator<Item = &'a Token>,
{
    let mut output = String::new();
    for token in tokens.into_iter().filter(|t| !t.is_end()) {
        output.push_str(&encode_token(token));
        output.push('\n');
    }
    output.push_str(SENTINEL);
    output.push('\n');
    output
}

/// Human-readable token listing followed by the symbol table
///
/// Each token line starts with a valid record, so the part up to and
/// including `$` decodes. The symbol table after the sentinel does not; the
/// whole listing is rejected with `ContentAfterSentinel`.
pub fn render_token_listing(tokens: &[SpannedToken], symbols: &SymbolTable) -> String {
    let mut output = String::new();

    for spanned in tokens.iter().filter(|t| !t.value.is_end()) {
        let lexeme = match spanned.value {
            Token::Identifier(index) => symbols.lexeme_at(index).unwrap_or("?").to_string(),
            other => other.to_string(),
        };
        output.push_str(&format!("{:<10}{}\n", encode_token(&spanned.value), lexeme));
    }
    output.push_str(SENTINEL);
    output.push('\n');

    output.push_str("\nSymbol table:\n");
    if symbols.is_empty() {
        output.push_str("  (empty)\n");
    }
    for (index, lexeme) in symbols.iter() {
        output.push_str(&format!("  {}: {}\n", index, lexeme));
    }

    output
}

fn decode_record(record: &str, line: u32) -> Result<Token, EncodingError> {
    let malformed = || EncodingError::Malformed {
        line,
        text: record.to_string(),
    };

    let inner = record
        .strip_prefix('<')
        .and_then(|rest| rest.split_once('>'))
        .map(|(inner, _annotation)| inner)
        .ok_or_else(malformed)?;

    let (kind_text, index_text) = match inner.split_once(',') {
        Some((kind, index)) => (kind.trim(), Some(index.trim())),
        None => (inner.trim(), None),
    };

    let kind: u32 = kind_text
        .parse()
        .map_err(|_| EncodingError::InvalidKindNumber {
            line,
            text: kind_text.to_string(),
        })?;

    if kind == IDENTIFIER_CODE {
        let index_text = index_text.ok_or(EncodingError::MissingIndex { line })?;
        let index: usize = index_text.parse().map_err(|_| EncodingError::ZeroIndex {
            line,
            text: index_text.to_string(),
        })?;
        if index == 0 {
            return Err(EncodingError::ZeroIndex {
                line,
                text: index_text.to_string(),
            });
        }
        return Ok(Token::Identifier(index));
    }

    let token = Keyword::from_code(kind)
        .map(Token::Keyword)
        .or_else(|| SymbolKind::from_code(kind).map(Token::Symbol))
        .ok_or(EncodingError::UnknownKind { line, kind })?;

    if index_text.is_some() {
        return Err(EncodingError::UnexpectedIndex { line, kind });
    }

    Ok(token)
}

/// Parse interchange text back into tokens
///
/// The returned sequence ends in `EndOfInput`. A missing sentinel is tolerated
/// and reported as a warning.
pub fn decode_tokens(text: &str) -> Result<Vec<SpannedToken>, EncodingError> {
    let mut tokens = Vec::new();
    let mut sentinel_line: Option<u32> = None;

    for (idx, raw) in text.lines().enumerate() {
        let line = idx as u32 + 1;
        let record = raw.trim();

        if record.is_empty() {
            continue;
        }
        if sentinel_line.is_some() {
            return Err(EncodingError::ContentAfterSentinel { line });
        }

        let span = Span::line(line, raw.len());
        if record == SENTINEL {
            sentinel_line = Some(line);
            tokens.push(Spanned::new(Token::EndOfInput, span));
            continue;
        }

        tokens.push(Spanned::new(decode_record(record, line)?, span));
    }

    if sentinel_line.is_none() {
        log_warning!(
            codes::warnings::MISSING_SENTINEL,
            "Token stream has no '$' sentinel; end of input implied",
            "records" => tokens.len()
        );
        let end_line = text.lines().count() as u32 + 1;
        tokens.push(Spanned::new(Token::EndOfInput, Span::line(end_line, 0)));
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn values(tokens: &[SpannedToken]) -> Vec<Token> {
        tokens.iter().map(|t| t.value).collect()
    }

    #[test]
    fn test_encode() {
        let tokens = [
            Token::Keyword(Keyword::Class),
            Token::Identifier(1),
            Token::Symbol(SymbolKind::LeftBrace),
            Token::Symbol(SymbolKind::RightBrace),
            Token::EndOfInput,
        ];
        assert_eq!(encode_tokens(&tokens), "<1>\n<26,1>\n<17>\n<18>\n$\n");
        assert_eq!(encode_tokens(&[]), "$\n");
    }

    #[test]
    fn test_decode_with_annotations_and_blank_lines() {
        let text = "<1>  class\n\n<26,1>   Engine\n<17> {\n<18>\n$\n\n";
        let tokens = decode_tokens(text).unwrap();
        assert_eq!(
            values(&tokens),
            vec![
                Token::Keyword(Keyword::Class),
                Token::Identifier(1),
                Token::Symbol(SymbolKind::LeftBrace),
                Token::Symbol(SymbolKind::RightBrace),
                Token::EndOfInput,
            ]
        );
        assert_eq!(tokens[1].span.start().line, 3);
    }

    #[test]
    fn test_listing_records_decode_but_symbol_table_does_not() {
        let mut symbols = SymbolTable::new();
        let engine = symbols.intern("Engine");
        let tokens: Vec<SpannedToken> = [
            Token::Keyword(Keyword::Class),
            Token::Identifier(engine),
            Token::Symbol(SymbolKind::DoubleColon),
        ]
        .into_iter()
        .map(|t| Spanned::new(t, Span::default()))
        .collect();

        let listing = render_token_listing(&tokens, &symbols);
        assert!(listing.contains("<26,1>    Engine"));
        assert!(listing.contains("1: Engine"));

        let records: String = listing
            .split("\nSymbol table:")
            .next()
            .unwrap_or_default()
            .to_string();
        let decoded = decode_tokens(&records).unwrap();
        assert_eq!(decoded.len(), 4);
        assert_eq!(decoded[2].value, Token::Symbol(SymbolKind::DoubleColon));

        let sentinel_line = listing.lines().position(|l| l == SENTINEL).unwrap() as u32 + 1;
        assert_matches!(
            decode_tokens(&listing),
            Err(EncodingError::ContentAfterSentinel { line }) if line == sentinel_line + 2
        );
    }

    #[test]
    fn test_missing_sentinel_is_tolerated() {
        let tokens = decode_tokens("<19>\n<20>\n").unwrap();
        assert_eq!(tokens.len(), 3);
        assert!(tokens[2].value.is_end());

        let tokens = decode_tokens("").unwrap();
        assert_eq!(values(&tokens), vec![Token::EndOfInput]);
    }

    #[test]
    fn test_decode_errors() {
        assert_matches!(
            decode_tokens("class\n$"),
            Err(EncodingError::Malformed { line: 1, .. })
        );
        assert_matches!(
            decode_tokens("<1>\n<x>\n$"),
            Err(EncodingError::InvalidKindNumber { line: 2, .. })
        );
        assert_matches!(
            decode_tokens("<99>"),
            Err(EncodingError::UnknownKind { line: 1, kind: 99 })
        );
        assert_matches!(
            decode_tokens("<26>"),
            Err(EncodingError::MissingIndex { line: 1 })
        );
        assert_matches!(
            decode_tokens("<17,2>"),
            Err(EncodingError::UnexpectedIndex { line: 1, kind: 17 })
        );
        assert_matches!(
            decode_tokens("<26,0>"),
            Err(EncodingError::ZeroIndex { line: 1, .. })
        );
        assert_matches!(
            decode_tokens("<26,-3>"),
            Err(EncodingError::ZeroIndex { line: 1, .. })
        );
        assert_matches!(
            decode_tokens("<1>\n$\n<17>"),
            Err(EncodingError::ContentAfterSentinel { line: 3 })
        );
    }

    #[test]
    fn test_error_codes() {
        let err = EncodingError::UnknownKind { line: 4, kind: 40 };
        assert_eq!(err.error_code(), codes::token_encoding::UNKNOWN_TOKEN_KIND);
        assert_eq!(err.line(), 4);
        assert_eq!(err.to_string(), "line 4: unknown token kind 40");
    }
}
