//! Shared source-location types used by the scanner, the token decoder and the parser.

pub mod span;

pub use span::{Position, SourceMap, Span, Spanned};
