use std::ops::Range;

use pulldown_cmark::{CowStr, Event, HeadingLevel, LinkType, MetadataBlockKind, Tag};

use crate::parsing::{
    ParseOptions,
    inline::{parse_inline, wiki_extent},
    span::Span,
};

use super::{Node, NodeKind};

#[derive(Debug)]
struct Frame {
    node: Node,
    /// Paragraph opened by the builder around the bare inline content of a
    /// tight list item; the host engine has no start/end events for it.
    implicit: bool,
}

/// Folds the host engine's `(event, range)` stream into a [`Node`] tree.
///
/// Consecutive text events form a run that is scanned by
/// [`parse_inline`] once the run ends, so extension syntax split across
/// several host text events (`[`, `[`, `Note`, `]`, `]`) is still seen whole.
///
/// Inline events that fall inside a wiki link opened earlier in the run
/// (`[[Note *x*]]`) are folded into the run instead of ending it.
pub struct TreeBuilder<'a> {
    source: &'a str,
    options: &'a ParseOptions,
    stack: Vec<Frame>,
    run: Option<Span>,
    /// Nesting depth of host start/end events.
    depth: usize,
    /// Depths of start events folded into a run; their ends are dropped too.
    folded: Vec<usize>,
    /// End of the wiki construct currently absorbing inline events.
    wiki_end: Option<usize>,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(source: &'a str, options: &'a ParseOptions) -> Self {
        Self {
            source,
            options,
            stack: vec![Frame {
                node: Node::new(NodeKind::Root, Span::new(0, source.len())),
                implicit: false,
            }],
            run: None,
            depth: 0,
            folded: vec![],
            wiki_end: None,
        }
    }

    pub fn push(&mut self, event: Event<'_>, range: Range<usize>) {
        let span = Span::from(range);
        if self.fold_into_run(&event, span) {
            return;
        }
        if let Event::Text(text) = &event {
            self.text(text, span);
            return;
        }

        self.flush_run();
        match event {
            Event::Start(tag) => self.start(tag, span),
            Event::End(_) => self.end(),
            Event::Code(code) => {
                self.inline_leaf(NodeKind::Code, span);
                self.append_label(&code);
            }
            Event::InlineHtml(_) => self.inline_leaf(NodeKind::Html, span),
            Event::InlineMath(_) | Event::DisplayMath(_) | Event::FootnoteReference(_) => {
                self.inline_leaf(NodeKind::Other, span)
            }
            Event::Html(_) => self.add_child(Node::new(NodeKind::Html, span)),
            Event::SoftBreak | Event::HardBreak => self.append_label("\n"),
            Event::Rule => {
                self.close_implicit();
                self.add_child(Node::new(NodeKind::Rule, span.trim_end(self.source)));
            }
            Event::TaskListMarker(checked) => self.mark_task(checked),
            Event::Text(_) => {}
        }
    }

    pub fn finish(mut self) -> Node {
        self.flush_run();
        while self.stack.len() > 1 {
            self.close_top();
        }
        self.stack
            .pop()
            .map(|frame| frame.node)
            .unwrap_or_else(|| Node::new(NodeKind::Root, Span::new(0, self.source.len())))
    }

    fn text(&mut self, text: &CowStr<'_>, span: Span) {
        let raw = match self.top_kind_mut() {
            NodeKind::FrontMatter { value } => {
                value.push_str(text);
                return;
            }
            NodeKind::CodeBlock | NodeKind::HtmlBlock | NodeKind::Link { autolink: true, .. } => {
                true
            }
            _ => false,
        };
        if raw {
            self.add_child(Node::new(NodeKind::Text, span));
            self.append_label(text);
            return;
        }

        self.ensure_paragraph(span.start);
        self.append_label(text);
        self.extend_run(span);
    }

    fn extend_run(&mut self, span: Span) {
        self.run = Some(match self.run {
            Some(run) => run.with_end(run.end.max(span.end)),
            None => span,
        });
    }

    /// Keeps an inline event that lies inside a wiki construct from ending
    /// the pending run. Returns whether the event was consumed.
    fn fold_into_run(&mut self, event: &Event<'_>, span: Span) -> bool {
        match event {
            Event::Start(tag) => {
                self.depth += 1;
                if is_inline(tag) && self.inside_wiki(span) {
                    self.folded.push(self.depth);
                    return true;
                }
                false
            }
            Event::End(_) => {
                let depth = self.depth;
                self.depth = depth.saturating_sub(1);
                if self.folded.last() == Some(&depth) {
                    self.folded.pop();
                    return true;
                }
                false
            }
            Event::Code(code) if self.inside_wiki(span) => {
                self.append_label(code);
                self.extend_run(span);
                true
            }
            Event::InlineHtml(_) | Event::InlineMath(_) | Event::FootnoteReference(_)
                if self.inside_wiki(span) =>
            {
                self.extend_run(span);
                true
            }
            _ => false,
        }
    }

    /// Whether `span` starts inside a wiki construct that opened in the
    /// pending run.
    fn inside_wiki(&mut self, span: Span) -> bool {
        let Some(run) = self.run else {
            return false;
        };
        if self.wiki_end.is_some_and(|end| span.start < end) {
            return true;
        }
        let start = escape_start(self.source, run.start);
        self.wiki_end = wiki_extent(self.source, start, span.start, self.options);
        self.wiki_end.is_some()
    }

    fn start(&mut self, tag: Tag<'_>, span: Span) {
        let kind = match tag {
            Tag::Paragraph => NodeKind::Paragraph,
            Tag::Heading { level, .. } => NodeKind::Heading {
                level: heading_level(level),
            },
            Tag::BlockQuote(..) => NodeKind::BlockQuote,
            Tag::CodeBlock(_) => NodeKind::CodeBlock,
            Tag::HtmlBlock => NodeKind::HtmlBlock,
            Tag::List(first) => NodeKind::List {
                ordered: first.is_some(),
            },
            Tag::Item => NodeKind::ListItem { checked: None },
            Tag::Table(_) => NodeKind::Table,
            Tag::MetadataBlock(MetadataBlockKind::YamlStyle) => NodeKind::FrontMatter {
                value: String::new(),
            },
            Tag::Emphasis | Tag::Strong | Tag::Strikethrough => NodeKind::Emphasis,
            Tag::Link {
                link_type,
                dest_url,
                ..
            } => NodeKind::Link {
                url: link_destination(link_type, &dest_url),
                text: String::new(),
                autolink: matches!(link_type, LinkType::Autolink | LinkType::Email),
            },
            Tag::Image { dest_url, .. } => NodeKind::Image {
                url: dest_url.to_string(),
                alt: String::new(),
            },
            _ => NodeKind::Block,
        };

        if kind.is_block() {
            self.close_implicit();
        } else {
            self.ensure_paragraph(span.start);
        }
        self.stack.push(Frame {
            node: Node::new(kind, span),
            implicit: false,
        });
    }

    fn end(&mut self) {
        self.close_implicit();
        if self.stack.len() > 1 {
            self.close_top();
        }
    }

    fn inline_leaf(&mut self, kind: NodeKind, span: Span) {
        self.ensure_paragraph(span.start);
        self.add_child(Node::new(kind, span));
    }

    /// Opens an implicit paragraph when inline content lands directly in a
    /// list item.
    fn ensure_paragraph(&mut self, start: usize) {
        let in_item = matches!(
            self.stack.last(),
            Some(Frame {
                node: Node {
                    kind: NodeKind::ListItem { .. },
                    ..
                },
                ..
            })
        );
        if in_item {
            self.stack.push(Frame {
                node: Node::new(NodeKind::Paragraph, Span::new(start, start)),
                implicit: true,
            });
        }
    }

    fn close_implicit(&mut self) {
        if self.stack.last().is_some_and(|f| f.implicit) {
            self.close_top();
        }
    }

    fn close_top(&mut self) {
        let Some(Frame { mut node, implicit }) = self.stack.pop() else {
            return;
        };
        if implicit {
            let end = node.children.last().map_or(node.span.start, |c| c.span.end);
            node.span = node.span.with_end(end);
        } else if node.kind.is_block() {
            node.span = node.span.trim_end(self.source);
        }
        self.add_child(node);
    }

    fn add_child(&mut self, node: Node) {
        if let Some(parent) = self.stack.last_mut() {
            parent.node.children.push(node);
        }
    }

    fn top_kind_mut(&mut self) -> &mut NodeKind {
        // the root frame is never popped before `finish`
        let last = self.stack.len() - 1;
        &mut self.stack[last].node.kind
    }

    /// Adds label text to the innermost open link or image.
    fn append_label(&mut self, s: &str) {
        let label = self.stack.iter_mut().rev().find_map(|f| match &mut f.node.kind {
            NodeKind::Link { text, .. } => Some(text),
            NodeKind::Image { alt, .. } => Some(alt),
            _ => None,
        });
        if let Some(label) = label {
            label.push_str(s);
        }
    }

    fn mark_task(&mut self, is_checked: bool) {
        let item = self.stack.iter_mut().rev().find_map(|f| match &mut f.node.kind {
            NodeKind::ListItem { checked } => Some(checked),
            _ => None,
        });
        if let Some(slot) = item {
            *slot = Some(is_checked);
        }
    }

    /// Scans the pending text run for extension syntax.
    fn flush_run(&mut self) {
        let Some(run) = self.run.take() else {
            return;
        };
        let start = escape_start(self.source, run.start);
        match self.source.get(start..run.end) {
            Some(text) => {
                for inline in parse_inline(start, text, self.options) {
                    self.add_child(inline.into());
                }
            }
            None => self.add_child(Node::new(NodeKind::Text, run)),
        }
    }
}

/// Moves a run start back over the backslash of an escape.
///
/// The host engine starts the text of `\#tag` after the backslash; without
/// it the scanner would see `#tag`.
fn escape_start(source: &str, start: usize) -> usize {
    let backslashes = source
        .get(..start)
        .map_or(0, |before| before.bytes().rev().take_while(|&b| b == b'\\').count());
    if backslashes % 2 == 1 { start - 1 } else { start }
}

fn is_inline(tag: &Tag<'_>) -> bool {
    matches!(
        tag,
        Tag::Emphasis | Tag::Strong | Tag::Strikethrough | Tag::Link { .. } | Tag::Image { .. }
    )
}

fn link_destination(link_type: LinkType, dest: &CowStr<'_>) -> String {
    match link_type {
        LinkType::Email => format!("mailto:{}", &**dest),
        _ => dest.to_string(),
    }
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
