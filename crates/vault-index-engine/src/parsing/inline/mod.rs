//! # Inline Extensions
//!
//! Recognizers for the three syntaxes the host Markdown engine does not know:
//! hashtags (`#tag`), wiki links (`[[target|alias]]`) and wiki embeds
//! (`![[target|alias]]`).
//!
//! ## Architecture
//!
//! The host engine reports plain text in runs; [`parse_inline`] scans each
//! run's raw source and, whenever a trigger character appears, hands the
//! cursor to the matching tokenizer:
//!
//! - **`token`**: `Tokenizer` trait, `Action`/`TokenEvent` vocabulary and the
//!   `tokenize` driver that backtracks on failure
//! - **`kinds`**: delimiter-owning types and the tag / wiki state machines
//! - **`builder`**: event stream to `InlineNode`, including alias normalization
//! - **`cursor`**: `Cursor` for character-by-character scanning with offsets
//! - **`parser`**: `parse_inline()` main entry point
//!
//! ## Precedence
//!
//! Backslash escapes, numeric character references and bare URLs win over
//! every trigger. Code blocks and HTML never reach this module because the
//! host engine does not report them as text. A wiki link that opens in a run
//! wins over emphasis, code spans and links that start inside it
//! ([`wiki_extent`]).

pub mod builder;
pub mod cursor;
pub mod kinds;
pub mod parser;
pub mod token;
pub mod types;

pub use parser::{parse_inline, wiki_extent};
pub use types::{InlineNode, WikiRef};
