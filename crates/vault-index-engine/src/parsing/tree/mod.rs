//! # Syntax Tree
//!
//! Owned node tree built from the host engine's event stream, with the
//! extension nodes from [`inline`](crate::parsing::inline) spliced in where
//! plain text used to be.
//!
//! Nodes are immutable once built: the index passes compute corrected spans
//! as new values instead of editing the tree.

pub mod builder;

use crate::parsing::{
    inline::InlineNode,
    span::Span,
};

pub use builder::TreeBuilder;

/// The type of a [`Node`], carrying only the fields that kind needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Root,
    /// YAML metadata block; `value` is the raw YAML between the fences.
    FrontMatter { value: String },
    Heading { level: u8 },
    Paragraph,
    BlockQuote,
    CodeBlock,
    HtmlBlock,
    List { ordered: bool },
    /// `checked` is set only for task items.
    ListItem { checked: Option<bool> },
    Table,
    /// Any other block container (table rows and cells, footnotes, ...).
    Block,
    /// Inline formatting container (emphasis, strong, strikethrough).
    Emphasis,
    Link {
        url: String,
        /// Plain text of the label.
        text: String,
        /// `<...>` autolinks are atomic: no extension syntax inside.
        autolink: bool,
    },
    Image { url: String, alt: String },
    Text,
    Code,
    Html,
    Rule,
    /// Inline leaf the index ignores (math, footnote references).
    Other,
    Tag { value: String },
    WikiLink { target: String, alias: String },
    WikiEmbed { target: String, alias: String },
}

impl NodeKind {
    /// Block-level nodes get their trailing whitespace trimmed on close.
    pub fn is_block(&self) -> bool {
        matches!(
            self,
            NodeKind::FrontMatter { .. }
                | NodeKind::Heading { .. }
                | NodeKind::Paragraph
                | NodeKind::BlockQuote
                | NodeKind::CodeBlock
                | NodeKind::HtmlBlock
                | NodeKind::List { .. }
                | NodeKind::ListItem { .. }
                | NodeKind::Table
                | NodeKind::Block
                | NodeKind::Rule
        )
    }

    pub fn is_list(&self) -> bool {
        matches!(self, NodeKind::List { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    /// Byte span in the source.
    pub span: Span,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(kind: NodeKind, span: Span) -> Self {
        Self {
            kind,
            span,
            children: vec![],
        }
    }

    /// Depth-first pre-order iterator over this node and its descendants.
    pub fn descendants(&self) -> impl Iterator<Item = &Node> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }
}

impl From<InlineNode> for Node {
    fn from(inline: InlineNode) -> Self {
        match inline {
            InlineNode::Text(span) => Node::new(NodeKind::Text, span),
            InlineNode::Tag { full, value } => Node::new(NodeKind::Tag { value }, full),
            InlineNode::WikiLink(r) => Node::new(
                NodeKind::WikiLink {
                    target: r.target,
                    alias: r.alias,
                },
                r.full,
            ),
            InlineNode::WikiEmbed(r) => Node::new(
                NodeKind::WikiEmbed {
                    target: r.target,
                    alias: r.alias,
                },
                r.full,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descendants_are_pre_order() {
        let mut root = Node::new(NodeKind::Root, Span::new(0, 10));
        let mut list = Node::new(NodeKind::List { ordered: false }, Span::new(0, 10));
        list.children
            .push(Node::new(NodeKind::ListItem { checked: None }, Span::new(0, 4)));
        list.children
            .push(Node::new(NodeKind::ListItem { checked: None }, Span::new(5, 10)));
        root.children.push(list);

        let spans: Vec<_> = root.descendants().map(|n| n.span).collect();
        assert_eq!(
            spans,
            vec![
                Span::new(0, 10),
                Span::new(0, 10),
                Span::new(0, 4),
                Span::new(5, 10)
            ]
        );
    }
}
