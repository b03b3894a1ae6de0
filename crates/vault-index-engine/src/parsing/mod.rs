//! # Parsing
//!
//! Source text to [`SyntaxTree`].
//!
//! Block structure, standard links and images, tables, task markers and the
//! YAML front-matter block come from pulldown-cmark. Its offset-annotated
//! event stream is folded into an owned tree by [`tree::TreeBuilder`], which
//! hands every run of plain text to the [`inline`] scanner so tags, wiki
//! links and wiki embeds land in the same tree.
//!
//! Spans inside the tree are byte ranges; [`SyntaxTree::position`] converts
//! them into the character-based [`Position`] tuple used by the index.

pub mod inline;
pub mod position;
pub mod span;
pub mod tree;

use pulldown_cmark::{Options, Parser};

use position::{LineIndex, Position};
use span::Span;
use tree::{Node, TreeBuilder};

/// Which extension syntaxes the inline scanner recognizes.
///
/// A disabled syntax stays plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// `#tag`
    pub tags: bool,
    /// `[[target|alias]]`
    pub wiki_links: bool,
    /// `![[target|alias]]`
    pub wiki_embeds: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            tags: true,
            wiki_links: true,
            wiki_embeds: true,
        }
    }
}

/// A parsed document: the source it borrows plus the node tree over it.
#[derive(Debug, Clone)]
pub struct SyntaxTree<'a> {
    pub source: &'a str,
    pub root: Node,
    lines: LineIndex,
}

impl<'a> SyntaxTree<'a> {
    pub fn position(&self, span: Span) -> Position {
        self.lines.position(self.source, span)
    }

    /// 1-based line of `byte_offset`.
    pub fn line_of(&self, byte_offset: usize) -> usize {
        self.lines.line_of(byte_offset)
    }

    /// Source text under `span`; empty if the span is out of range.
    pub fn slice(&self, span: Span) -> &'a str {
        self.source.get(span.start..span.end).unwrap_or_default()
    }
}

fn host_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_YAML_STYLE_METADATA_BLOCKS);
    options
}

/// Parses `source` into a [`SyntaxTree`].
pub fn parse_tree<'a>(source: &'a str, options: &ParseOptions) -> SyntaxTree<'a> {
    let mut builder = TreeBuilder::new(source, options);
    for (event, range) in Parser::new_ext(source, host_options()).into_offset_iter() {
        builder.push(event, range);
    }

    SyntaxTree {
        source,
        root: builder.finish(),
        lines: LineIndex::new(source),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::tree::NodeKind;

    #[test]
    fn heading_position_uses_zero_based_lines() {
        let tree = parse_tree("intro\n\n# Title\n", &ParseOptions::default());
        let heading = tree
            .root
            .descendants()
            .find(|n| matches!(n.kind, NodeKind::Heading { .. }))
            .unwrap();
        assert_eq!(tree.position(heading.span), Position(2, 0, 7, 2, 7, 14));
        assert_eq!(tree.slice(heading.span), "# Title");
    }

    #[test]
    fn positions_count_characters() {
        let tree = parse_tree("é #tag", &ParseOptions::default());
        let tag = tree
            .root
            .descendants()
            .find(|n| matches!(n.kind, NodeKind::Tag { .. }))
            .unwrap();
        assert_eq!(tree.position(tag.span), Position(0, 2, 2, 0, 6, 6));
    }

    #[test]
    fn slice_out_of_range_is_empty() {
        let tree = parse_tree("abc", &ParseOptions::default());
        assert_eq!(tree.slice(Span::new(2, 10)), "");
    }
}
