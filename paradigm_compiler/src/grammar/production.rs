use super::symbols::{GrammarSymbol, NonTerminal};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProductionId(pub u8);

impl fmt::Display for ProductionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which classification flag a production sets when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductionEffect {
    None,
    BareIdentifier,
    ClassKeyword,
    ParenDelimiter,
    BlockDelimiter,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Production {
    pub id: ProductionId,
    pub head: NonTerminal,
    /// Empty for an epsilon production
    pub body: Vec<GrammarSymbol>,
    pub effect: ProductionEffect,
}

impl Production {
    pub fn new(
        id: u8,
        head: NonTerminal,
        body: Vec<GrammarSymbol>,
        effect: ProductionEffect,
    ) -> Self {
        Self {
            id: ProductionId(id),
            head,
            body,
            effect,
        }
    }

    pub fn epsilon(id: u8, head: NonTerminal) -> Self {
        Self::new(id, head, Vec::new(), ProductionEffect::None)
    }

    pub fn is_epsilon(&self) -> bool {
        self.body.is_empty()
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {} ->", self.id, self.head)?;
        if self.body.is_empty() {
            return f.write_str(" ε");
        }
        for symbol in &self.body {
            write!(f, " {}", symbol)?;
        }
        Ok(())
    }
}
