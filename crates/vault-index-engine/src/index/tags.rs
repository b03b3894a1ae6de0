use crate::parsing::{SyntaxTree, tree::NodeKind};

use super::{types::Tag, walker::resolve_nodes};

/// Tags in document order.
pub fn extract(tree: &SyntaxTree<'_>) -> Vec<Tag> {
    resolve_nodes(tree, |k| matches!(k, NodeKind::Tag { .. }))
        .into_iter()
        .filter_map(|r| match &r.node.kind {
            NodeKind::Tag { value } => Some(Tag {
                name: value.clone(),
                position: tree.position(r.node.span),
            }),
            _ => None,
        })
        .collect()
}
