use crate::parsing::span::Span;

/// A parsed inline node with byte spans into the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineNode {
    /// Plain text that isn't part of any extension construct.
    Text(Span),
    /// A hashtag `#name`.
    Tag {
        /// Full span including the `#`.
        full: Span,
        /// Tag name without the marker.
        value: String,
    },
    /// A wiki-style link `[[target]]` or `[[target|alias]]`.
    WikiLink(WikiRef),
    /// A wiki-style embed `![[target]]` or `![[target|alias]]`.
    WikiEmbed(WikiRef),
}

impl InlineNode {
    /// The full span of any inline node variant.
    pub fn span(&self) -> Span {
        match self {
            InlineNode::Text(sp) => *sp,
            InlineNode::Tag { full, .. } => *full,
            InlineNode::WikiLink(r) | InlineNode::WikiEmbed(r) => r.full,
        }
    }
}

/// Normalized fields shared by wiki links and embeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WikiRef {
    /// Full span including the brackets.
    pub full: Span,
    /// Target with trailing backslashes removed.
    pub target: String,
    /// Display text; defaults to the target, with `#` rendered as ` > `.
    pub alias: String,
}
