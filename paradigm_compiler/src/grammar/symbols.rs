use crate::tokens::{Keyword, SymbolKind, Token};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NonTerminal {
    Type,
    Closer,
}

impl NonTerminal {
    pub fn name(self) -> &'static str {
        match self {
            NonTerminal::Type => "TYPE",
            NonTerminal::Closer => "CLOSER",
        }
    }
}

impl fmt::Display for NonTerminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.name())
    }
}

/// A token kind as seen by the grammar; identifiers match regardless of index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Terminal {
    Keyword(Keyword),
    Symbol(SymbolKind),
    Identifier,
}

impl Terminal {
    pub fn of(token: &Token) -> Option<Self> {
        match token {
            Token::Keyword(k) => Some(Terminal::Keyword(*k)),
            Token::Symbol(s) => Some(Terminal::Symbol(*s)),
            Token::Identifier(_) => Some(Terminal::Identifier),
            Token::EndOfInput => None,
        }
    }
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Terminal::Keyword(k) => write!(f, "'{}'", k),
            Terminal::Symbol(s) => write!(f, "'{}'", s),
            Terminal::Identifier => f.write_str("identifier"),
        }
    }
}

/// Parsing table column: a terminal or the end of input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Lookahead {
    Terminal(Terminal),
    End,
}

impl From<&Token> for Lookahead {
    fn from(token: &Token) -> Self {
        Terminal::of(token)
            .map(Lookahead::Terminal)
            .unwrap_or(Lookahead::End)
    }
}

impl From<Terminal> for Lookahead {
    fn from(terminal: Terminal) -> Self {
        Lookahead::Terminal(terminal)
    }
}

impl fmt::Display for Lookahead {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lookahead::Terminal(t) => write!(f, "{}", t),
            Lookahead::End => f.write_str("end of input"),
        }
    }
}

/// Parse stack entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GrammarSymbol {
    Terminal(Terminal),
    NonTerminal(NonTerminal),
    EndMarker,
}

impl GrammarSymbol {
    pub const fn keyword(keyword: Keyword) -> Self {
        GrammarSymbol::Terminal(Terminal::Keyword(keyword))
    }

    pub const fn symbol(kind: SymbolKind) -> Self {
        GrammarSymbol::Terminal(Terminal::Symbol(kind))
    }

    pub const fn identifier() -> Self {
        GrammarSymbol::Terminal(Terminal::Identifier)
    }
}

impl From<NonTerminal> for GrammarSymbol {
    fn from(nt: NonTerminal) -> Self {
        GrammarSymbol::NonTerminal(nt)
    }
}

impl fmt::Display for GrammarSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrammarSymbol::Terminal(t) => write!(f, "{}", t),
            GrammarSymbol::NonTerminal(nt) => write!(f, "{}", nt),
            GrammarSymbol::EndMarker => f.write_str("$"),
        }
    }
}
