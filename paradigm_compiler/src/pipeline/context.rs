//! Shared, read-only analysis configuration

use crate::config::runtime::{
    FileProcessorPreferences, LexicalPreferences, RuntimeConfig, SyntaxPreferences,
};
use crate::file_processor::FileProcessor;
use crate::grammar::ParsingTable;
use crate::lexical::{Scanner, TransitionTable};
use crate::tokens::Vocabulary;

/// Everything a scan or parse reads. Built once, then only borrowed, so one
/// context can serve any number of threads.
#[derive(Debug, Clone)]
pub struct Context {
    pub vocabulary: Vocabulary,
    pub transitions: TransitionTable,
    pub parsing_table: ParsingTable,
    pub file_processor: FileProcessorPreferences,
    pub lexical: LexicalPreferences,
    pub syntax: SyntaxPreferences,
}

impl Context {
    pub fn standard() -> Self {
        Self::from_config(&RuntimeConfig::default())
    }

    pub fn from_config(config: &RuntimeConfig) -> Self {
        Self {
            vocabulary: Vocabulary::standard(),
            transitions: TransitionTable::standard(),
            parsing_table: ParsingTable::standard(),
            file_processor: config.file_processor.clone(),
            lexical: config.lexical.clone(),
            syntax: config.syntax.clone(),
        }
    }

    pub fn scanner(&self) -> Scanner<'_> {
        Scanner::with_preferences(&self.vocabulary, &self.transitions, self.lexical.clone())
    }

    pub fn file_processor(&self) -> FileProcessor {
        FileProcessor::from_preferences(&self.file_processor)
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::standard()
    }
}
