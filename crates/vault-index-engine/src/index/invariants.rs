use crate::parsing::position::Position;

use super::types::ParseResult;

/// Validates index output invariants.
///
/// Asserts that:
/// - Present categories are non-empty
/// - Every position has `start <= end` and lies within `source`
/// - Links, embeds and list items are sorted by start offset
///
/// # Panics
/// Panics with a descriptive message if any invariant is violated.
pub fn check(source: &str, result: &ParseResult) {
    let chars = source.chars().count();
    let check_pos = |what: &str, p: &Position| {
        assert!(
            p.start_offset() <= p.end_offset() && p.end_offset() <= chars,
            "{what} position out of bounds: {p:?} (source chars: {chars})"
        );
        assert!(
            p.start_line() <= p.end_line(),
            "{what} position ends before it starts: {p:?}"
        );
    };

    if let Some(headings) = &result.headings {
        assert!(!headings.is_empty(), "empty headings emitted");
        headings.iter().for_each(|h| check_pos("heading", &h.position));
    }
    if let Some(tags) = &result.tags {
        assert!(!tags.is_empty(), "empty tags emitted");
        tags.iter().for_each(|t| check_pos("tag", &t.position));
    }
    if let Some(pos) = &result.frontmatter_pos {
        check_pos("front matter", pos);
    }

    for (what, links) in [("link", &result.links), ("embed", &result.embeds)] {
        if let Some(links) = links {
            assert!(!links.is_empty(), "empty {what}s emitted");
            links.iter().for_each(|l| check_pos(what, &l.position));
            assert_sorted(what, links.iter().map(|l| l.position.start_offset()));
        }
    }

    if let Some(items) = &result.list_items {
        assert!(!items.is_empty(), "empty list items emitted");
        items.iter().for_each(|i| check_pos("list item", &i.position));
        assert_sorted("list item", items.iter().map(|i| i.position.start_offset()));
    }
}

fn assert_sorted(what: &str, offsets: impl Iterator<Item = usize>) {
    let offsets: Vec<_> = offsets.collect();
    assert!(
        offsets.windows(2).all(|w| w[0] <= w[1]),
        "{what}s not sorted by start offset: {offsets:?}"
    );
}
