//! Indexes Markdown notes: headings, links, embeds, list items, tags and
//! front matter, each with its source position.
//!
//! ```
//! let result = vault_index_engine::parse("# Title\n\nSee [[Other note]] #idea\n").unwrap();
//! assert_eq!(result.headings.unwrap()[0].text, "Title");
//! assert_eq!(result.tags.unwrap()[0].name, "idea");
//! ```

pub mod error;
pub mod index;
pub mod parsing;

pub use error::ParseError;
pub use index::{Indexer, ParseResult};
pub use parsing::ParseOptions;

/// Indexes `source` with every extension enabled.
pub fn parse(source: &str) -> Result<ParseResult, ParseError> {
    Indexer::default().parse(source)
}
