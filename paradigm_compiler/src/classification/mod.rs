//! Paradigm classification from production coverage
//!
//! The label is a heuristic over which productions fired during an accepted
//! parse. Parentheses together with blocks read as procedural style, a class
//! keyword with blocks as object-oriented; it is not a semantic analysis.

use crate::grammar::{ParsingTable, ProductionEffect};
use crate::logging::codes;
use crate::syntax::{self, Acceptance, SyntaxError};
use crate::tokens::TokenStream;
use crate::log_success;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Flags set by production effects; reset per parse
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClassificationFlags {
    pub class_keyword: bool,
    pub block_delimiter: bool,
    pub paren_delimiter: bool,
    pub bare_identifier: bool,
}

impl ClassificationFlags {
    pub fn record(&mut self, effect: ProductionEffect) {
        match effect {
            ProductionEffect::None => {}
            ProductionEffect::BareIdentifier => self.bare_identifier = true,
            ProductionEffect::ClassKeyword => self.class_keyword = true,
            ProductionEffect::ParenDelimiter => self.paren_delimiter = true,
            ProductionEffect::BlockDelimiter => self.block_delimiter = true,
        }
    }

    pub fn any(&self) -> bool {
        self.class_keyword || self.block_delimiter || self.paren_delimiter || self.bare_identifier
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Label {
    Hybrid,
    ObjectOriented,
    Procedural,
    BareDeclarations,
    Unclassifiable,
}

impl Label {
    pub const ALL: [Label; 5] = [
        Label::Hybrid,
        Label::ObjectOriented,
        Label::Procedural,
        Label::BareDeclarations,
        Label::Unclassifiable,
    ];

    /// First match wins, in declaration order
    pub fn classify(flags: &ClassificationFlags) -> Self {
        if flags.class_keyword && flags.block_delimiter && flags.paren_delimiter {
            Label::Hybrid
        } else if flags.class_keyword && flags.block_delimiter {
            Label::ObjectOriented
        } else if flags.paren_delimiter && flags.block_delimiter {
            Label::Procedural
        } else if flags.bare_identifier {
            Label::BareDeclarations
        } else {
            Label::Unclassifiable
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Label::Hybrid => "Mixes class declarations with parenthesised and block structure",
            Label::ObjectOriented => "Class declarations with block bodies",
            Label::Procedural => "Parenthesised headers followed by block bodies, no classes",
            Label::BareDeclarations => "Bare identifiers without class or block structure",
            Label::Unclassifiable => "No structural evidence for any paradigm",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Label::Hybrid => "hybrid",
            Label::ObjectOriented => "object-oriented",
            Label::Procedural => "procedural",
            Label::BareDeclarations => "bare declarations",
            Label::Unclassifiable => "unclassifiable",
        };
        f.write_str(name)
    }
}

/// An accepted parse with its label
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub label: Label,
    pub acceptance: Acceptance,
}

impl From<Acceptance> for Classification {
    fn from(acceptance: Acceptance) -> Self {
        Self {
            label: Label::classify(&acceptance.flags),
            acceptance,
        }
    }
}

/// Parse, then classify; a rejection carries no label
pub fn classify_tokens(
    tokens: &TokenStream,
    table: &ParsingTable,
) -> Result<Classification, SyntaxError> {
    classify_tokens_with_preferences(tokens, table, Default::default())
}

pub fn classify_tokens_with_preferences(
    tokens: &TokenStream,
    table: &ParsingTable,
    preferences: crate::config::runtime::SyntaxPreferences,
) -> Result<Classification, SyntaxError> {
    let classification = Classification::from(syntax::parse_tokens_with_preferences(
        tokens,
        table,
        preferences,
    )?);

    log_success!(
        codes::success::CLASSIFICATION_COMPLETE,
        "Paradigm label assigned",
        "label" => classification.label
    );

    Ok(classification)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Lookahead;
    use crate::tokens::{Keyword, SymbolKind, Token};
    use assert_matches::assert_matches;

    fn flags(class: bool, block: bool, paren: bool, bare: bool) -> ClassificationFlags {
        ClassificationFlags {
            class_keyword: class,
            block_delimiter: block,
            paren_delimiter: paren,
            bare_identifier: bare,
        }
    }

    #[test]
    fn test_decision_order() {
        assert_eq!(Label::classify(&flags(true, true, true, true)), Label::Hybrid);
        assert_eq!(Label::classify(&flags(true, true, false, true)), Label::ObjectOriented);
        assert_eq!(Label::classify(&flags(false, true, true, true)), Label::Procedural);
        assert_eq!(Label::classify(&flags(true, false, true, true)), Label::BareDeclarations);
        assert_eq!(Label::classify(&flags(false, false, false, true)), Label::BareDeclarations);
        assert_eq!(Label::classify(&flags(true, false, false, false)), Label::Unclassifiable);
        assert_eq!(Label::classify(&flags(false, false, false, false)), Label::Unclassifiable);
    }

    #[test]
    fn test_record_effects() {
        let mut f = ClassificationFlags::default();
        assert!(!f.any());
        f.record(ProductionEffect::None);
        assert!(!f.any());
        f.record(ProductionEffect::ParenDelimiter);
        f.record(ProductionEffect::ParenDelimiter);
        assert_eq!(f, flags(false, false, true, false));
    }

    #[test]
    fn test_classify_tokens_object_oriented() {
        let table = ParsingTable::standard();
        let stream = TokenStream::from_tokens([
            Token::Keyword(Keyword::Class),
            Token::Identifier(1),
            Token::Symbol(SymbolKind::LeftBrace),
            Token::Symbol(SymbolKind::RightBrace),
        ]);
        let classification = classify_tokens(&stream, &table).unwrap();
        assert_eq!(classification.label, Label::ObjectOriented);
    }

    #[test]
    fn test_classify_tokens_procedural() {
        let table = ParsingTable::standard();
        let stream = TokenStream::from_tokens([
            Token::Symbol(SymbolKind::LeftParen),
            Token::Symbol(SymbolKind::RightParen),
            Token::Symbol(SymbolKind::LeftBrace),
            Token::Symbol(SymbolKind::RightBrace),
        ]);
        let classification = classify_tokens(&stream, &table).unwrap();
        assert_eq!(classification.label, Label::Procedural);
        assert!(!classification.acceptance.flags.class_keyword);
    }

    #[test]
    fn test_classify_tokens_hybrid() {
        let table = ParsingTable::standard();
        let stream = TokenStream::from_tokens([
            Token::Keyword(Keyword::Class),
            Token::Identifier(1),
            Token::Symbol(SymbolKind::LeftParen),
            Token::Symbol(SymbolKind::RightParen),
            Token::Symbol(SymbolKind::LeftBrace),
            Token::Symbol(SymbolKind::RightBrace),
        ]);
        assert_eq!(classify_tokens(&stream, &table).unwrap().label, Label::Hybrid);
    }

    #[test]
    fn test_empty_stream_is_unclassifiable() {
        let table = ParsingTable::standard();
        let classification = classify_tokens(&TokenStream::new(Vec::new()), &table).unwrap();
        assert_eq!(classification.label, Label::Unclassifiable);
    }

    #[test]
    fn test_rejection_has_no_label() {
        let table = ParsingTable::standard();
        let stream = TokenStream::from_tokens([Token::Symbol(SymbolKind::Dot)]);
        let err = classify_tokens(&stream, &table).unwrap_err();
        assert_matches!(err, SyntaxError::NoRule { .. });
        assert_eq!(
            err.found(),
            Some(Lookahead::Terminal(crate::grammar::Terminal::Symbol(
                SymbolKind::Dot
            )))
        );
    }

    #[test]
    fn test_label_text() {
        assert_eq!(Label::ObjectOriented.to_string(), "object-oriented");
        for label in Label::ALL {
            assert!(!label.description().is_empty());
        }
    }
}
