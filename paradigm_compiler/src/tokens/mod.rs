//! Token model shared by the scanner and the parser
//!
//! ## Key Components
//!
//! - **[`Keyword`] / [`SymbolKind`]** - the closed keyword and symbol alphabet with stable kind codes
//! - **[`Vocabulary`]** - immutable lookup configuration the scanner is built over
//! - **[`Token`]** - `Keyword | Symbol | Identifier | EndOfInput`
//! - **[`TokenStream`]** - a token sequence guaranteed to end in one end marker
//! - **[`encoding`]** - the `<kind>` / `<kind,index>` line format with a `$` sentinel
//!
//! ## Kind codes
//!
//! | Family     | Codes  |
//! |------------|--------|
//! | Keywords   | 1-15   |
//! | Symbols    | 16-25  |
//! | Identifier | 26     |
//!
//! Identifier tokens carry their 1-based symbol table index; the lexeme lives
//! in the [`SymbolTable`](crate::symbols::SymbolTable) produced by the same scan.

pub mod encoding;
pub mod token;
pub mod token_stream;
pub mod vocabulary;

pub use encoding::{decode_tokens, encode_tokens, render_token_listing, EncodingError};
pub use token::Token;
pub use token_stream::{Cursor, SpannedToken, TokenStream};
pub use vocabulary::{Keyword, SymbolKind, Vocabulary, IDENTIFIER_CODE};

pub use crate::utils::{Position, Span, Spanned};
