use crate::tokens::Vocabulary;
use serde::{Deserialize, Serialize};

/// Character category driving the identifier automaton
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterClass {
    Letter,
    Digit,
    Underscore,
    Delimiter,
    SpecialSymbol,
    Other,
}

impl CharacterClass {
    pub const COUNT: usize = 6;

    pub const ALL: [CharacterClass; Self::COUNT] = [
        Self::Letter,
        Self::Digit,
        Self::Underscore,
        Self::Delimiter,
        Self::SpecialSymbol,
        Self::Other,
    ];

    /// Classify one character; total over `char`.
    ///
    /// Delimiters are fixed. Special symbols are whatever non-delimiter
    /// characters the vocabulary's symbols are spelled with.
    pub fn of(ch: char, vocabulary: &Vocabulary) -> Self {
        match ch {
            '_' => Self::Underscore,
            ';' | '(' | ')' | '{' | '}' | ':' | '.' | ',' => Self::Delimiter,
            c if c.is_whitespace() => Self::Delimiter,
            c if c.is_ascii_digit() => Self::Digit,
            c if c.is_alphabetic() => Self::Letter,
            c if vocabulary.is_symbol_char(c) => Self::SpecialSymbol,
            _ => Self::Other,
        }
    }

    /// Letters, digits and underscores continue an identifier
    pub fn is_identifier_part(self) -> bool {
        matches!(self, Self::Letter | Self::Digit | Self::Underscore)
    }

    /// Only letters and underscores may open an identifier
    pub fn is_identifier_start(self) -> bool {
        matches!(self, Self::Letter | Self::Underscore)
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::{Keyword, SymbolKind};

    fn of(ch: char) -> CharacterClass {
        CharacterClass::of(ch, &Vocabulary::standard())
    }

    #[test]
    fn test_classification() {
        assert_eq!(of('a'), CharacterClass::Letter);
        assert_eq!(of('Z'), CharacterClass::Letter);
        assert_eq!(of('é'), CharacterClass::Letter);
        assert_eq!(of('7'), CharacterClass::Digit);
        assert_eq!(of('_'), CharacterClass::Underscore);
        assert_eq!(of('#'), CharacterClass::Other);
        assert_eq!(of('@'), CharacterClass::Other);
        assert_eq!(of('+'), CharacterClass::Other);
    }

    #[test]
    fn test_delimiters() {
        for ch in [' ', '\t', '\n', '\r', ';', '(', ')', '{', '}', ':', '.', ','] {
            assert_eq!(of(ch), CharacterClass::Delimiter, "{:?}", ch);
        }
    }

    #[test]
    fn test_special_symbols() {
        for ch in ['*', '-', '>'] {
            assert_eq!(of(ch), CharacterClass::SpecialSymbol);
        }
    }

    #[test]
    fn test_special_symbols_follow_vocabulary() {
        let vocabulary = Vocabulary::new(&[Keyword::Class], &[SymbolKind::Star]);
        assert_eq!(CharacterClass::of('*', &vocabulary), CharacterClass::SpecialSymbol);
        assert_eq!(CharacterClass::of('-', &vocabulary), CharacterClass::Other);
        assert_eq!(CharacterClass::of('>', &vocabulary), CharacterClass::Other);
        // Delimiters do not depend on the symbol set
        assert_eq!(CharacterClass::of(':', &vocabulary), CharacterClass::Delimiter);
    }

    #[test]
    fn test_identifier_predicates() {
        assert!(CharacterClass::Underscore.is_identifier_start());
        assert!(!CharacterClass::Digit.is_identifier_start());
        assert!(CharacterClass::Digit.is_identifier_part());
        assert!(!CharacterClass::SpecialSymbol.is_identifier_part());
    }
}
