//! Keyword and symbol vocabulary
//!
//! Kind codes are stable and shared by the scanner report, the interchange
//! encoding and the parser: keywords 1-15, symbols 16-25, identifiers 26.
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Kind code written for identifier tokens
pub const IDENTIFIER_CODE: u32 = 26;

/// Reserved words recognised by the scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Keyword {
    Class,
    Virtual,
    Override,
    This,
    Extends,
    Abstract,
    Public,
    Private,
    Protected,
    Switch,
    Case,
    Break,
    Continue,
    Do,
    Void,
}

impl Keyword {
    pub const ALL: [Keyword; 15] = [
        Self::Class,
        Self::Virtual,
        Self::Override,
        Self::This,
        Self::Extends,
        Self::Abstract,
        Self::Public,
        Self::Private,
        Self::Protected,
        Self::Switch,
        Self::Case,
        Self::Break,
        Self::Continue,
        Self::Do,
        Self::Void,
    ];

    /// Exact source spelling (keywords are case-sensitive)
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Virtual => "virtual",
            Self::Override => "override",
            Self::This => "this",
            Self::Extends => "extends",
            Self::Abstract => "abstract",
            Self::Public => "public",
            Self::Private => "private",
            Self::Protected => "protected",
            Self::Switch => "switch",
            Self::Case => "case",
            Self::Break => "break",
            Self::Continue => "continue",
            Self::Do => "do",
            Self::Void => "void",
        }
    }

    pub const fn code(self) -> u32 {
        match self {
            Self::Class => 1,
            Self::Virtual => 2,
            Self::Override => 3,
            Self::This => 4,
            Self::Extends => 5,
            Self::Abstract => 6,
            Self::Public => 7,
            Self::Private => 8,
            Self::Protected => 9,
            Self::Switch => 10,
            Self::Case => 11,
            Self::Break => 12,
            Self::Continue => 13,
            Self::Do => 14,
            Self::Void => 15,
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.code() == code)
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operator and punctuation tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SymbolKind {
    Star,        // *
    LeftBrace,   // {
    RightBrace,  // }
    LeftParen,   // (
    RightParen,  // )
    DoubleColon, // ::
    Dot,         // .
    Semicolon,   // ;
    Arrow,       // ->
    Colon,       // :
}

impl SymbolKind {
    pub const ALL: [SymbolKind; 10] = [
        Self::Star,
        Self::LeftBrace,
        Self::RightBrace,
        Self::LeftParen,
        Self::RightParen,
        Self::DoubleColon,
        Self::Dot,
        Self::Semicolon,
        Self::Arrow,
        Self::Colon,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Star => "*",
            Self::LeftBrace => "{",
            Self::RightBrace => "}",
            Self::LeftParen => "(",
            Self::RightParen => ")",
            Self::DoubleColon => "::",
            Self::Dot => ".",
            Self::Semicolon => ";",
            Self::Arrow => "->",
            Self::Colon => ":",
        }
    }

    pub const fn code(self) -> u32 {
        match self {
            Self::Star => 16,
            Self::LeftBrace => 17,
            Self::RightBrace => 18,
            Self::LeftParen => 19,
            Self::RightParen => 20,
            Self::DoubleColon => 21,
            Self::Dot => 22,
            Self::Semicolon => 23,
            Self::Arrow => 24,
            Self::Colon => 25,
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.code() == code)
    }

    pub fn is_two_char(self) -> bool {
        self.as_str().len() == 2
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lookup tables the scanner consults; built once and shared read-only
#[derive(Debug, Clone)]
pub struct Vocabulary {
    keywords: HashMap<&'static str, Keyword>,
    single_char: HashMap<char, SymbolKind>,
    two_char: HashMap<(char, char), SymbolKind>,
}

impl Vocabulary {
    /// The fifteen keywords and ten symbols
    pub fn standard() -> Self {
        Self::new(&Keyword::ALL, &SymbolKind::ALL)
    }

    /// A vocabulary restricted to the given keywords and symbols
    pub fn new(keywords: &[Keyword], symbols: &[SymbolKind]) -> Self {
        let mut single_char = HashMap::new();
        let mut two_char = HashMap::new();

        for &symbol in symbols {
            let mut chars = symbol.as_str().chars();
            match (chars.next(), chars.next()) {
                (Some(first), Some(second)) => {
                    two_char.insert((first, second), symbol);
                }
                (Some(only), None) => {
                    single_char.insert(only, symbol);
                }
                _ => {}
            }
        }

        Self {
            keywords: keywords.iter().map(|k| (k.as_str(), *k)).collect(),
            single_char,
            two_char,
        }
    }

    pub fn keyword(&self, lexeme: &str) -> Option<Keyword> {
        self.keywords.get(lexeme).copied()
    }

    pub fn single_char_symbol(&self, ch: char) -> Option<SymbolKind> {
        self.single_char.get(&ch).copied()
    }

    pub fn two_char_symbol(&self, first: char, second: char) -> Option<SymbolKind> {
        self.two_char.get(&(first, second)).copied()
    }

    /// Whether `ch` appears anywhere in a configured symbol
    pub fn is_symbol_char(&self, ch: char) -> bool {
        self.single_char.contains_key(&ch)
            || self.two_char.keys().any(|&(a, b)| a == ch || b == ch)
    }

    pub fn keyword_count(&self) -> usize {
        self.keywords.len()
    }

    pub fn symbol_count(&self) -> usize {
        self.single_char.len() + self.two_char.len()
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::standard()
    }
}
