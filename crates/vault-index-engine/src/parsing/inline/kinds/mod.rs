//! # Inline Kinds
//!
//! Inline-specific types that own their syntax delimiters, plus the
//! tokenizers that recognize them.
//!
//! ## Types
//!
//! - **`Hashtag`**: `MARKER = '#'`, recognized by [`TagTokenizer`]
//! - **`WikiLink`**: `OPEN = "[["`, `CLOSE = "]]"`, `ALIAS = "|"`
//! - **`WikiEmbed`**: `OPEN = "![["`, both recognized by [`WikiTokenizer`]
//!
//! All delimiter constants live here; the scanner never hardcodes `[[` or `#`.

pub mod tag;
pub mod wikilink;

pub use tag::{Hashtag, TagTokenizer};
pub use wikilink::{WikiEmbed, WikiLink, WikiTokenizer};
