//! Structural grammar driving the predictive parser
//!
//! ```text
//! 1. TYPE   -> id TYPE
//! 2. TYPE   -> class TYPE
//! 3. TYPE   -> ( TYPE CLOSER TYPE
//! 4. TYPE   -> { TYPE CLOSER TYPE
//! 5. TYPE   -> ε
//! 6. CLOSER -> ) CLOSER
//! 7. CLOSER -> } CLOSER
//! 8. CLOSER -> ε
//! ```
//!
//! Productions 1-4 carry the classification effect the parser records when
//! they fire.

pub mod production;
pub mod symbols;
pub mod table;

pub use production::{Production, ProductionEffect, ProductionId};
pub use symbols::{GrammarSymbol, Lookahead, NonTerminal, Terminal};
pub use table::{standard_productions, GrammarError, ParsingTable, TableEntry, STANDARD_ENTRIES};
