//! # Index
//!
//! Walks a [`SyntaxTree`] and builds the [`ParseResult`] of a document.
//!
//! Each category has its own pass over the tree and none of them depends on
//! another's output:
//!
//! - **`headings`**: text without markup, level, position
//! - **`lists`**: list items with parent encoding and span repair
//! - **`links`**: standard links and images to vault files merged with wiki
//!   links and embeds
//! - **`tags`**: hashtags in document order
//! - **`frontmatter`**: decoded YAML plus wiki-link values
//!
//! Only front-matter decoding can fail; every other pass just contributes
//! fewer entries.

pub mod frontmatter;
pub mod headings;
pub mod invariants;
pub mod links;
pub mod lists;
pub mod tags;
pub mod types;
pub mod walker;

use crate::{
    error::ParseError,
    parsing::{ParseOptions, SyntaxTree, parse_tree},
};

pub use types::*;

/// Turns documents into [`ParseResult`]s.
///
/// Holds only its options, so one indexer can be shared across threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Indexer {
    options: ParseOptions,
}

impl Indexer {
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    pub fn parse(&self, source: &str) -> Result<ParseResult, ParseError> {
        let tree = parse_tree(source, &self.options);
        let result = extract(&tree)?;
        log::debug!(
            "indexed {} bytes: {} headings, {} links, {} embeds, {} list items, {} tags",
            source.len(),
            count(&result.headings),
            count(&result.links),
            count(&result.embeds),
            count(&result.list_items),
            count(&result.tags),
        );
        Ok(result)
    }
}

/// Runs every pass over `tree`.
pub fn extract(tree: &SyntaxTree<'_>) -> Result<ParseResult, ParseError> {
    let mut result = ParseResult::default();

    if let Some(fm) = frontmatter::extract(tree)? {
        result.frontmatter = Some(fm.mapping);
        result.frontmatter_links = non_empty(fm.links);
        result.frontmatter_pos = Some(fm.position);
    }
    result.headings = non_empty(headings::extract(tree));
    result.list_items = non_empty(lists::extract(tree));
    result.links = non_empty(links::extract_links(tree));
    result.embeds = non_empty(links::extract_embeds(tree));
    result.tags = non_empty(tags::extract(tree));

    Ok(result)
}

fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    (!items.is_empty()).then_some(items)
}

fn count<T>(items: &Option<Vec<T>>) -> usize {
    items.as_ref().map_or(0, Vec::len)
}
