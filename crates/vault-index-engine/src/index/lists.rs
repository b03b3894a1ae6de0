//! List items and their parent encoding.
//!
//! `parent` turns the item hierarchy into a line-keyed forest:
//!
//! - items of a top-level list get `-(line)`, the negated 1-based start line
//!   of their list, so sibling lists never collide and no item id is reused
//! - items of a nested list get the zero-based start line of the node that
//!   encloses the list (its parent item), which is that item's
//!   `position[0]`
//!
//! Consumers rebuild the hierarchy by matching `parent` against
//! `position[0]`.

use crate::parsing::{
    SyntaxTree,
    span::Span,
    tree::{Node, NodeKind},
};

use super::{
    types::{ListItem, Task},
    walker::{Resolved, resolve_nodes},
};

pub fn extract(tree: &SyntaxTree<'_>) -> Vec<ListItem> {
    let mut items = vec![];

    for Resolved {
        node: list,
        level,
        parent_line,
    } in resolve_nodes(tree, NodeKind::is_list)
    {
        let parent = parent_id(level, tree.line_of(list.span.start), parent_line);
        let last = list.children.len().saturating_sub(1);

        for (i, item) in list.children.iter().enumerate() {
            let NodeKind::ListItem { checked } = item.kind else {
                continue;
            };
            let span = if i == last {
                repair_tail(list.span, item.span)
            } else {
                item.span
            };
            let span = clip_nested(item, span);

            items.push(ListItem {
                parent,
                position: tree.position(span),
                task: checked.map(Task::from),
            });
        }
    }

    items.sort_by_key(|item| item.position.start_offset());
    items
}

/// Parent id for the items of a list.
///
/// `list_line` is the list's own 1-based start line and `parent_line` the
/// 1-based start line of the node enclosing it.
pub fn parent_id(level: usize, list_line: usize, parent_line: usize) -> i64 {
    if level == 0 {
        -(list_line as i64)
    } else {
        parent_line as i64 - 1
    }
}

/// Stretches the last item of a list to the list's end when the two
/// disagree.
///
/// Trees from [`parse_tree`](crate::parsing::parse_tree) trim trailing
/// whitespace off every block span, and the host engine ends a list with its
/// last item, so for those trees this returns `last_item` unchanged. It
/// matters for hand-built trees whose list span runs past the last item.
pub fn repair_tail(list: Span, last_item: Span) -> Span {
    if list.end != last_item.end {
        last_item.with_end(list.end)
    } else {
        last_item
    }
}

/// Ends an item where the child before its first nested list ends, unless
/// the nested list is the item's first child.
pub fn clip_nested(item: &Node, span: Span) -> Span {
    match item.children.iter().position(|c| c.kind.is_list()) {
        Some(idx) if idx > 0 => span.with_end(item.children[idx - 1].span.end),
        _ => span,
    }
}
