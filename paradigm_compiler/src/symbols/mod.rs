//! Identifier symbol table populated by the scanner

pub mod table;

pub use table::SymbolTable;
