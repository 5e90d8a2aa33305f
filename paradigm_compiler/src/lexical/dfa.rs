//! Transition table for the identifier/keyword automaton
//!
//! The table is plain data: built once, never mutated, and shared by
//! reference across scans.

use super::char_class::CharacterClass;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DfaState {
    Start,
    Accumulating,
    Accept,
    Error,
}

impl DfaState {
    pub const COUNT: usize = 4;

    pub const ALL: [DfaState; Self::COUNT] =
        [Self::Start, Self::Accumulating, Self::Accept, Self::Error];

    fn index(self) -> usize {
        self as usize
    }
}

/// Dense `state x class -> state` table with a set of accepting states
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionTable {
    transitions: [[DfaState; CharacterClass::COUNT]; DfaState::COUNT],
    accepting: [bool; DfaState::COUNT],
}

impl TransitionTable {
    /// Table rejecting everything; fill it in with `set`
    pub fn empty() -> Self {
        Self {
            transitions: [[DfaState::Error; CharacterClass::COUNT]; DfaState::COUNT],
            accepting: [false; DfaState::COUNT],
        }
    }

    /// Identifiers: a letter or underscore, then letters, digits or underscores,
    /// accepted when a terminating character (or end of input) is seen.
    pub fn standard() -> Self {
        use CharacterClass::*;
        use DfaState::*;

        let mut table = Self::empty();

        table.set(Start, Letter, Accumulating);
        table.set(Start, Underscore, Accumulating);

        for from in [Accumulating, Accept] {
            for class in [Letter, Digit, Underscore] {
                table.set(from, class, Accumulating);
            }
            for class in [Delimiter, SpecialSymbol, Other] {
                table.set(from, class, Accept);
            }
        }

        table.accepting[Accept.index()] = true;
        table
    }

    pub fn set(&mut self, from: DfaState, class: CharacterClass, to: DfaState) {
        // Error stays absorbing whatever the caller asks for
        if from != DfaState::Error {
            self.transitions[from.index()][class.index()] = to;
        }
    }

    pub fn next(&self, from: DfaState, class: CharacterClass) -> DfaState {
        self.transitions[from.index()][class.index()]
    }

    pub fn is_accepting(&self, state: DfaState) -> bool {
        self.accepting[state.index()]
    }
}

impl Default for TransitionTable {
    fn default() -> Self {
        Self::standard()
    }
}
