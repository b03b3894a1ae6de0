use std::sync::LazyLock;

use regex::Regex;

use crate::parsing::{ParseOptions, span::Span};

use super::{
    builder,
    cursor::Cursor,
    kinds::{Hashtag, TagTokenizer, WikiEmbed, WikiTokenizer},
    token::{WikiFlavor, tokenize},
    types::InlineNode,
};

/// Numeric character reference. The host engine decodes it to a single
/// character, so `&#x23;` is never a tag marker.
static CHAR_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^&#(?:[0-9]{1,7}|[xX][0-9a-fA-F]{1,6});")
        .unwrap_or_else(|e| panic!("invalid character reference pattern: {e}"))
});

/// Bare URL that a GFM host turns into a link (`https://...`, `www....`).
static URL_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i:https?://|www\.)[^\s<]*")
        .unwrap_or_else(|e| panic!("invalid URL literal pattern: {e}"))
});

/// Parses a run of plain text into a sequence of [`InlineNode`]s.
///
/// # Arguments
/// - `base`: Byte offset in the document where `s` begins (for absolute spans)
/// - `s`: Raw source text of the run, escapes included
/// - `options`: Which extension syntaxes are active
///
/// # Literals
/// A backslash before ASCII punctuation makes that character literal, so
/// `\#tag` and `\[[x]]` stay text. Numeric character references and bare
/// URLs are skipped whole: `&#x23;x` and `https://host/page#part` hold no tag.
///
/// # Returns
/// A vector of inline nodes covering the entire input. Text between
/// extension constructs is emitted as `InlineNode::Text`.
pub fn parse_inline(base: usize, s: &str, options: &ParseOptions) -> Vec<InlineNode> {
    let mut cur = Cursor::new(s, base);
    let mut out = vec![];
    let mut text_start = cur.pos();

    // Helper to flush accumulated text as a Text node
    fn flush_text(out: &mut Vec<InlineNode>, start: usize, end: usize) {
        if end > start {
            out.push(InlineNode::Text(Span { start, end }));
        }
    }

    while cur.peek().is_some() {
        if let Some(len) = literal_len(&cur) {
            cur.skip(len);
            continue;
        }
        if let Some(nodes) = try_parse_extension(&mut cur, options) {
            for node in nodes {
                flush_text(&mut out, text_start, node.span().start);
                text_start = node.span().end;
                out.push(node);
            }
            continue;
        }
        cur.bump();
    }

    flush_text(&mut out, text_start, cur.pos());
    out
}

/// End of the first wiki link or embed that opens in `source[start..limit]`
/// and closes past `limit`.
///
/// The host engine ends a text run at emphasis, code spans and links, but a
/// wiki construct binds tighter than all of them, so the tree builder asks
/// this before letting such an event split a run.
pub fn wiki_extent(source: &str, start: usize, limit: usize, options: &ParseOptions) -> Option<usize> {
    let mut cur = Cursor::new(source.get(start..)?, start);

    while cur.pos() < limit {
        if let Some(len) = literal_len(&cur) {
            cur.skip(len);
            continue;
        }
        let c = cur.peek()?;
        let matched = if c == WikiFlavor::Embed.trigger()
            && options.wiki_embeds
            && cur.starts_with(WikiEmbed::OPEN)
        {
            tokenize(&mut WikiTokenizer::embed(), &mut cur)
        } else if c == WikiFlavor::Link.trigger() && options.wiki_links {
            tokenize(&mut WikiTokenizer::link(), &mut cur)
        } else {
            None
        };

        match matched {
            Some(_) if cur.pos() > limit => return Some(cur.pos()),
            Some(_) => {}
            None => {
                cur.bump();
            }
        }
    }
    None
}

/// Byte length of the literal at the cursor, if one starts there.
fn literal_len(cur: &Cursor<'_>) -> Option<usize> {
    match cur.peek()? {
        '\\' if cur.peek_next().is_some_and(|n| n.is_ascii_punctuation()) => Some(2),
        '&' => CHAR_REFERENCE.find(cur.rest()).map(|m| m.end()),
        'h' | 'H' | 'w' | 'W' if !cur.prev().is_some_and(char::is_alphanumeric) => {
            URL_LITERAL.find(cur.rest()).map(|m| m.end())
        }
        _ => None,
    }
}

/// Tries the tokenizer registered for the current character.
///
/// Returns `None` (cursor untouched) when no tokenizer applies or the
/// candidate is rejected.
fn try_parse_extension(cur: &mut Cursor<'_>, options: &ParseOptions) -> Option<Vec<InlineNode>> {
    let c = cur.peek()?;
    let (s, base) = (cur.s, cur.base);

    let events = if c == Hashtag::MARKER && options.tags {
        tokenize(&mut TagTokenizer::new(), cur)?
    } else if c == WikiFlavor::Link.trigger() && options.wiki_links {
        tokenize(&mut WikiTokenizer::link(), cur)?
    } else if c == WikiFlavor::Embed.trigger() && options.wiki_embeds {
        tokenize(&mut WikiTokenizer::embed(), cur)?
    } else {
        return None;
    };

    let nodes = builder::build(s, base, events);
    (!nodes.is_empty()).then_some(nodes)
}
