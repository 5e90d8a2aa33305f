use super::vocabulary::{Keyword, SymbolKind, IDENTIFIER_CODE};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A scanned token
///
/// Identifiers carry their 1-based symbol table index rather than the lexeme,
/// so the token stream stays independent of the text it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Token {
    Keyword(Keyword),
    Symbol(SymbolKind),
    Identifier(usize),
    /// End of the token sequence; the `$` sentinel in the interchange encoding
    EndOfInput,
}

impl Token {
    /// Kind code; `None` for the end marker
    pub fn code(&self) -> Option<u32> {
        match self {
            Token::Keyword(k) => Some(k.code()),
            Token::Symbol(s) => Some(s.code()),
            Token::Identifier(_) => Some(IDENTIFIER_CODE),
            Token::EndOfInput => None,
        }
    }

    pub fn symbol_index(&self) -> Option<usize> {
        match self {
            Token::Identifier(index) => Some(*index),
            _ => None,
        }
    }

    pub fn is_end(&self) -> bool {
        matches!(self, Token::EndOfInput)
    }

    pub fn is_keyword(&self) -> bool {
        matches!(self, Token::Keyword(_))
    }

    pub fn is_symbol(&self) -> bool {
        matches!(self, Token::Symbol(_))
    }

    pub fn is_identifier(&self) -> bool {
        matches!(self, Token::Identifier(_))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Keyword(k) => write!(f, "{}", k),
            Token::Symbol(s) => write!(f, "{}", s),
            Token::Identifier(index) => write!(f, "id#{}", index),
            Token::EndOfInput => f.write_str("$"),
        }
    }
}
