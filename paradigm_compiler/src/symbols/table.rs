use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Ordered, duplicate-free registry of identifier lexemes
///
/// Indices are 1-based and assigned in first-occurrence order. A table lives
/// for one scan; indices are never shared across inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct SymbolTable {
    lexemes: Vec<String>,
    indices: HashMap<String, usize>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of `lexeme`, appending it when first seen
    pub fn intern(&mut self, lexeme: &str) -> usize {
        if let Some(&index) = self.indices.get(lexeme) {
            return index;
        }

        self.lexemes.push(lexeme.to_string());
        let index = self.lexemes.len();
        self.indices.insert(lexeme.to_string(), index);
        index
    }

    pub fn lexeme_at(&self, index: usize) -> Option<&str> {
        index
            .checked_sub(1)
            .and_then(|i| self.lexemes.get(i))
            .map(String::as_str)
    }

    pub fn index_of(&self, lexeme: &str) -> Option<usize> {
        self.indices.get(lexeme).copied()
    }

    pub fn contains(&self, lexeme: &str) -> bool {
        self.indices.contains_key(lexeme)
    }

    pub fn len(&self) -> usize {
        self.lexemes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lexemes.is_empty()
    }

    /// `(index, lexeme)` pairs in index order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.lexemes
            .iter()
            .enumerate()
            .map(|(i, lexeme)| (i + 1, lexeme.as_str()))
    }

    pub fn lexemes(&self) -> &[String] {
        &self.lexemes
    }
}

impl From<Vec<String>> for SymbolTable {
    fn from(lexemes: Vec<String>) -> Self {
        let mut table = SymbolTable::new();
        for lexeme in &lexemes {
            table.intern(lexeme);
        }
        table
    }
}

impl From<SymbolTable> for Vec<String> {
    fn from(table: SymbolTable) -> Self {
        table.lexemes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_assigns_dense_indices() {
        let mut table = SymbolTable::new();
        assert!(table.is_empty());

        assert_eq!(table.intern("Engine"), 1);
        assert_eq!(table.intern("run"), 2);
        assert_eq!(table.intern("Engine"), 1);
        assert_eq!(table.intern("_tmp"), 3);

        assert_eq!(table.len(), 3);
        assert_eq!(table.lexeme_at(2), Some("run"));
        assert_eq!(table.index_of("_tmp"), Some(3));
    }

    #[test]
    fn test_out_of_range_lookup() {
        let mut table = SymbolTable::new();
        table.intern("x");
        assert_eq!(table.lexeme_at(0), None);
        assert_eq!(table.lexeme_at(2), None);
        assert_eq!(table.index_of("y"), None);
    }

    #[test]
    fn test_case_sensitive_lexemes() {
        let mut table = SymbolTable::new();
        assert_ne!(table.intern("Engine"), table.intern("engine"));
    }

    #[test]
    fn test_iteration_order() {
        let mut table = SymbolTable::new();
        for name in ["b", "a", "b", "c"] {
            table.intern(name);
        }
        let pairs: Vec<(usize, &str)> = table.iter().collect();
        assert_eq!(pairs, vec![(1, "b"), (2, "a"), (3, "c")]);
    }

    #[test]
    fn test_serializes_as_array() {
        let mut table = SymbolTable::new();
        table.intern("Engine");
        table.intern("Wheel");

        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"["Engine","Wheel"]"#);

        let restored: SymbolTable = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, table);
    }
}
