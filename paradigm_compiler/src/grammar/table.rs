//! LL(1) parsing table
//!
//! Maps `(nonterminal, lookahead)` to a production. Tables are validated on
//! construction and immutable afterwards.

use super::production::{Production, ProductionEffect, ProductionId};
use super::symbols::{GrammarSymbol, Lookahead, NonTerminal, Terminal};
use crate::logging::{codes, Code};
use crate::tokens::{Keyword, SymbolKind};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GrammarError {
    #[error("Production {id} is defined more than once")]
    DuplicateProductionId { id: ProductionId },

    #[error("Table entry ({nonterminal}, {lookahead}) names unknown production {id}")]
    UnknownProduction {
        nonterminal: NonTerminal,
        lookahead: Lookahead,
        id: ProductionId,
    },

    #[error("Table entry ({nonterminal}, {lookahead}) uses production {id}, which expands {head}")]
    HeadMismatch {
        nonterminal: NonTerminal,
        lookahead: Lookahead,
        id: ProductionId,
        head: NonTerminal,
    },

    #[error("Grammar is not LL(1): ({nonterminal}, {lookahead}) maps to both {existing} and {conflicting}")]
    ConflictingEntry {
        nonterminal: NonTerminal,
        lookahead: Lookahead,
        existing: ProductionId,
        conflicting: ProductionId,
    },
}

impl GrammarError {
    pub fn error_code(&self) -> Code {
        codes::syntax::INVALID_GRAMMAR
    }
}

/// One row of table input: `(head, lookahead) -> production id`
pub type TableEntry = (NonTerminal, Lookahead, u8);

#[derive(Debug, Clone)]
pub struct ParsingTable {
    start: NonTerminal,
    productions: HashMap<ProductionId, Production>,
    entries: HashMap<(NonTerminal, Lookahead), ProductionId>,
}

impl ParsingTable {
    pub fn new(
        start: NonTerminal,
        productions: Vec<Production>,
        entries: &[TableEntry],
    ) -> Result<Self, GrammarError> {
        let mut by_id = HashMap::new();
        for production in productions {
            let id = production.id;
            if by_id.insert(id, production).is_some() {
                return Err(GrammarError::DuplicateProductionId { id });
            }
        }

        let mut table = HashMap::new();
        for &(nonterminal, lookahead, raw_id) in entries {
            let id = ProductionId(raw_id);
            let production = by_id.get(&id).ok_or(GrammarError::UnknownProduction {
                nonterminal,
                lookahead,
                id,
            })?;

            if production.head != nonterminal {
                return Err(GrammarError::HeadMismatch {
                    nonterminal,
                    lookahead,
                    id,
                    head: production.head,
                });
            }

            match table.get(&(nonterminal, lookahead)) {
                Some(&existing) if existing != id => {
                    return Err(GrammarError::ConflictingEntry {
                        nonterminal,
                        lookahead,
                        existing,
                        conflicting: id,
                    });
                }
                _ => {
                    table.insert((nonterminal, lookahead), id);
                }
            }
        }

        Ok(Self {
            start,
            productions: by_id,
            entries: table,
        })
    }

    /// Table for the TYPE/CLOSER grammar
    pub fn standard() -> Self {
        // Literal, checked by test_standard_table_is_valid
        Self {
            start: NonTerminal::Type,
            productions: standard_productions()
                .into_iter()
                .map(|p| (p.id, p))
                .collect(),
            entries: STANDARD_ENTRIES
                .iter()
                .map(|&(nt, la, id)| ((nt, la), ProductionId(id)))
                .collect(),
        }
    }

    pub fn start(&self) -> NonTerminal {
        self.start
    }

    pub fn lookup(&self, nonterminal: NonTerminal, lookahead: Lookahead) -> Option<&Production> {
        self.entries
            .get(&(nonterminal, lookahead))
            .and_then(|id| self.productions.get(id))
    }

    pub fn production(&self, id: ProductionId) -> Option<&Production> {
        self.productions.get(&id)
    }

    /// Productions ordered by id
    pub fn productions(&self) -> Vec<&Production> {
        let mut productions: Vec<&Production> = self.productions.values().collect();
        productions.sort_by_key(|p| p.id);
        productions
    }

    /// Lookaheads with an entry for `nonterminal`, sorted
    pub fn expected_lookaheads(&self, nonterminal: NonTerminal) -> Vec<Lookahead> {
        let mut lookaheads: Vec<Lookahead> = self
            .entries
            .keys()
            .filter(|(nt, _)| *nt == nonterminal)
            .map(|(_, la)| *la)
            .collect();
        lookaheads.sort();
        lookaheads
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// True when every non-empty body starts with a terminal.
    ///
    /// Each expansion of such a table either consumes a token on the next
    /// step or shrinks the stack, so parsing always halts within a number of
    /// steps linear in the input.
    pub fn is_terminal_led(&self) -> bool {
        self.productions
            .values()
            .all(|p| matches!(p.body.first(), None | Some(GrammarSymbol::Terminal(_))))
    }
}

impl Default for ParsingTable {
    fn default() -> Self {
        Self::standard()
    }
}

const ID: Lookahead = Lookahead::Terminal(Terminal::Identifier);
const CLASS: Lookahead = Lookahead::Terminal(Terminal::Keyword(Keyword::Class));
const LPAREN: Lookahead = Lookahead::Terminal(Terminal::Symbol(SymbolKind::LeftParen));
const RPAREN: Lookahead = Lookahead::Terminal(Terminal::Symbol(SymbolKind::RightParen));
const LBRACE: Lookahead = Lookahead::Terminal(Terminal::Symbol(SymbolKind::LeftBrace));
const RBRACE: Lookahead = Lookahead::Terminal(Terminal::Symbol(SymbolKind::RightBrace));
const END: Lookahead = Lookahead::End;

pub const STANDARD_ENTRIES: &[TableEntry] = &[
    (NonTerminal::Type, ID, 1),
    (NonTerminal::Type, CLASS, 2),
    (NonTerminal::Type, LPAREN, 3),
    (NonTerminal::Type, LBRACE, 4),
    (NonTerminal::Type, RPAREN, 5),
    (NonTerminal::Type, RBRACE, 5),
    (NonTerminal::Type, END, 5),
    (NonTerminal::Closer, ID, 8),
    (NonTerminal::Closer, CLASS, 8),
    (NonTerminal::Closer, LPAREN, 8),
    (NonTerminal::Closer, LBRACE, 8),
    (NonTerminal::Closer, END, 8),
    (NonTerminal::Closer, RPAREN, 6),
    (NonTerminal::Closer, RBRACE, 7),
];

pub fn standard_productions() -> Vec<Production> {
    use GrammarSymbol as G;
    use NonTerminal::{Closer, Type};

    vec![
        Production::new(
            1,
            Type,
            vec![G::identifier(), Type.into()],
            ProductionEffect::BareIdentifier,
        ),
        Production::new(
            2,
            Type,
            vec![G::keyword(Keyword::Class), Type.into()],
            ProductionEffect::ClassKeyword,
        ),
        Production::new(
            3,
            Type,
            vec![
                G::symbol(SymbolKind::LeftParen),
                Type.into(),
                Closer.into(),
                Type.into(),
            ],
            ProductionEffect::ParenDelimiter,
        ),
        Production::new(
            4,
            Type,
            vec![
                G::symbol(SymbolKind::LeftBrace),
                Type.into(),
                Closer.into(),
                Type.into(),
            ],
            ProductionEffect::BlockDelimiter,
        ),
        Production::epsilon(5, Type),
        Production::new(
            6,
            Closer,
            vec![G::symbol(SymbolKind::RightParen), Closer.into()],
            ProductionEffect::None,
        ),
        Production::new(
            7,
            Closer,
            vec![G::symbol(SymbolKind::RightBrace), Closer.into()],
            ProductionEffect::None,
        ),
        Production::epsilon(8, Closer),
    ]
}
