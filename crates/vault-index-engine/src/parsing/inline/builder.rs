//! Turns tokenizer events into [`InlineNode`]s.
//!
//! The builder keeps a stack of half-built nodes. Entering a node pushes it
//! with empty fields, closing an interior span (tag data, wiki target, wiki
//! alias) writes the captured text onto the top node, and closing the node
//! itself pops it and applies normalization.

use crate::parsing::span::Span;

use super::{
    kinds::Hashtag,
    token::{TokenEvent, TokenKind, WikiFlavor},
    types::{InlineNode, WikiRef},
};

/// Separator written in place of `#` inside wiki aliases (`Note#Heading`).
pub const HEADING_SEPARATOR: &str = " > ";

#[derive(Debug)]
enum Pending {
    Tag {
        start: usize,
        value: Option<String>,
    },
    Wiki {
        flavor: WikiFlavor,
        start: usize,
        target: Option<String>,
        alias: Option<String>,
    },
}

pub struct NodeBuilder<'a> {
    /// Text the events index into.
    s: &'a str,
    /// Absolute offset of `s[0]`.
    base: usize,
    stack: Vec<Pending>,
    /// Open interior spans with their start offsets.
    open: Vec<(TokenKind, usize)>,
    out: Vec<InlineNode>,
}

impl<'a> NodeBuilder<'a> {
    pub fn new(s: &'a str, base: usize) -> Self {
        Self {
            s,
            base,
            stack: vec![],
            open: vec![],
            out: vec![],
        }
    }

    pub fn push(&mut self, event: TokenEvent) {
        match event {
            TokenEvent::Enter { kind, at } => self.enter(kind, at),
            TokenEvent::Exit { kind, at } => self.exit(kind, at),
        }
    }

    pub fn finish(self) -> Vec<InlineNode> {
        self.out
    }

    fn enter(&mut self, kind: TokenKind, at: usize) {
        match kind {
            TokenKind::Tag => self.stack.push(Pending::Tag {
                start: at,
                value: None,
            }),
            TokenKind::Wiki(flavor) => self.stack.push(Pending::Wiki {
                flavor,
                start: at,
                target: None,
                alias: None,
            }),
            TokenKind::TagData | TokenKind::WikiTarget | TokenKind::WikiAlias => {
                self.open.push((kind, at))
            }
            TokenKind::TagMarker
            | TokenKind::WikiMarker
            | TokenKind::WikiData
            | TokenKind::WikiAliasMarker => {}
        }
    }

    fn exit(&mut self, kind: TokenKind, at: usize) {
        match kind {
            TokenKind::TagData | TokenKind::WikiTarget | TokenKind::WikiAlias => {
                let Some((_, start)) = self.open.pop() else {
                    return;
                };
                let captured = self.slice(start, at).to_string();
                match (self.stack.last_mut(), kind) {
                    (Some(Pending::Tag { value, .. }), TokenKind::TagData) => *value = Some(captured),
                    (Some(Pending::Wiki { target, .. }), TokenKind::WikiTarget) => {
                        *target = Some(captured)
                    }
                    (Some(Pending::Wiki { alias, .. }), TokenKind::WikiAlias) => {
                        *alias = Some(captured)
                    }
                    _ => {}
                }
            }
            TokenKind::Tag | TokenKind::Wiki(_) => {
                if let Some(node) = self.stack.pop().and_then(|p| complete(p, at)) {
                    self.out.push(node);
                }
            }
            TokenKind::TagMarker
            | TokenKind::WikiMarker
            | TokenKind::WikiData
            | TokenKind::WikiAliasMarker => {}
        }
    }

    fn slice(&self, start: usize, end: usize) -> &'a str {
        self.s
            .get(start.saturating_sub(self.base)..end.saturating_sub(self.base))
            .unwrap_or_default()
    }
}

fn complete(pending: Pending, end: usize) -> Option<InlineNode> {
    match pending {
        Pending::Tag { start, value } => Some(InlineNode::Tag {
            full: Span::new(start, end),
            value: value?,
        }),
        Pending::Wiki {
            flavor,
            start,
            target,
            alias,
        } => {
            let (target, alias) = normalize_wiki(&target?, alias.as_deref());
            let wiki = WikiRef {
                full: Span::new(start, end),
                target,
                alias,
            };
            Some(match flavor {
                WikiFlavor::Link => InlineNode::WikiLink(wiki),
                WikiFlavor::Embed => InlineNode::WikiEmbed(wiki),
            })
        }
    }
}

/// Normalizes a captured wiki target and alias.
///
/// The alias defaults to the raw target, trailing backslashes are stripped
/// from the target, a leading `#` is dropped from the alias and every other
/// `#` in the alias becomes [`HEADING_SEPARATOR`].
pub fn normalize_wiki(target: &str, alias: Option<&str>) -> (String, String) {
    let alias = alias.filter(|a| !a.is_empty()).unwrap_or(target);
    let target = target.trim_end_matches('\\');
    let alias = alias.strip_prefix(Hashtag::MARKER).unwrap_or(alias);
    let alias = alias.replace(Hashtag::MARKER, HEADING_SEPARATOR);
    (target.to_string(), alias)
}

/// Builds nodes from a complete event sequence over `s`.
pub fn build(s: &str, base: usize, events: impl IntoIterator<Item = TokenEvent>) -> Vec<InlineNode> {
    let mut builder = NodeBuilder::new(s, base);
    for event in events {
        builder.push(event);
    }
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Note", None, "Note", "Note")]
    #[case("Note", Some("Shown"), "Note", "Shown")]
    #[case("Note#Heading", None, "Note#Heading", "Note > Heading")]
    #[case("#Heading", None, "#Heading", "Heading")]
    #[case("Note#A#B", None, "Note#A#B", "Note > A > B")]
    #[case(r"Note\\", None, "Note", r"Note\\")]
    #[case(r"Note\", Some("x#y"), "Note", "x > y")]
    fn normalization(
        #[case] target: &str,
        #[case] alias: Option<&str>,
        #[case] want_target: &str,
        #[case] want_alias: &str,
    ) {
        let (t, a) = normalize_wiki(target, alias);
        assert_eq!(t, want_target);
        assert_eq!(a, want_alias);
    }

    #[test]
    fn builds_tag_from_data_span() {
        let s = "x #idea";
        let nodes = build(
            s,
            0,
            [
                TokenEvent::Enter {
                    kind: TokenKind::Tag,
                    at: 2,
                },
                TokenEvent::Enter {
                    kind: TokenKind::TagMarker,
                    at: 2,
                },
                TokenEvent::Exit {
                    kind: TokenKind::TagMarker,
                    at: 3,
                },
                TokenEvent::Enter {
                    kind: TokenKind::TagData,
                    at: 3,
                },
                TokenEvent::Exit {
                    kind: TokenKind::TagData,
                    at: 7,
                },
                TokenEvent::Exit {
                    kind: TokenKind::Tag,
                    at: 7,
                },
            ],
        );
        assert_eq!(
            nodes,
            vec![InlineNode::Tag {
                full: Span::new(2, 7),
                value: "idea".into()
            }]
        );
    }

    #[test]
    fn builds_embed_with_base_offset() {
        let s = "![[a.png|A]]";
        let base = 100;
        let nodes = build(
            s,
            base,
            [
                TokenEvent::Enter {
                    kind: TokenKind::Wiki(WikiFlavor::Embed),
                    at: 100,
                },
                TokenEvent::Enter {
                    kind: TokenKind::WikiTarget,
                    at: 103,
                },
                TokenEvent::Exit {
                    kind: TokenKind::WikiTarget,
                    at: 108,
                },
                TokenEvent::Enter {
                    kind: TokenKind::WikiAlias,
                    at: 109,
                },
                TokenEvent::Exit {
                    kind: TokenKind::WikiAlias,
                    at: 110,
                },
                TokenEvent::Exit {
                    kind: TokenKind::Wiki(WikiFlavor::Embed),
                    at: 112,
                },
            ],
        );
        assert_eq!(
            nodes,
            vec![InlineNode::WikiEmbed(WikiRef {
                full: Span::new(100, 112),
                target: "a.png".into(),
                alias: "A".into(),
            })]
        );
    }

    #[test]
    fn unbalanced_events_produce_nothing() {
        let nodes = build(
            "abc",
            0,
            [TokenEvent::Exit {
                kind: TokenKind::Tag,
                at: 3,
            }],
        );
        assert!(nodes.is_empty());
    }
}
