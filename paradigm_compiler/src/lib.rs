//! Table-driven scanner and LL(1) paradigm classifier
//!
//! Source text is scanned into keyword, symbol and identifier tokens, the
//! tokens are parsed against a small structural grammar, and the productions
//! that fired decide a paradigm label. Every stage reads shared, immutable
//! configuration, so independent inputs can be processed concurrently.

// Internal modules
pub mod batch;
pub mod classification;
pub mod config;
pub mod file_processor;
pub mod grammar;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod pipeline;
pub mod symbols;
pub mod syntax;
pub mod tokens;
pub mod utils;

// Re-export key types for library consumers
pub use batch::{BatchConfig, BatchError, BatchResults};
pub use classification::{Classification, ClassificationFlags, Label};
pub use config::{ConfigError, RuntimeConfig};
pub use lexical::{scan_source, LexerError, ScanOutput, Scanner};
pub use pipeline::output::PipelineOutput;
pub use pipeline::{analyze_source, Analysis, Context, PipelineError, PipelineResult};
pub use symbols::SymbolTable;
pub use syntax::{Acceptance, SyntaxError};
pub use tokens::{Token, TokenStream};

/// Install runtime logging preferences and start the global logger
pub fn init_logging(config: &RuntimeConfig) -> Result<(), String> {
    logging::config::init_runtime_preferences(config.logging.clone())?;
    logging::init_global_logging()
}
