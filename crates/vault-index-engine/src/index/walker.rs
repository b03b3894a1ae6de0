use crate::parsing::{
    SyntaxTree,
    tree::{Node, NodeKind},
};

/// A node picked out by [`resolve_nodes`].
#[derive(Debug, Clone, Copy)]
pub struct Resolved<'n> {
    pub node: &'n Node,
    /// Number of enclosing nodes of the same kind.
    pub level: usize,
    /// 1-based start line of the node's immediate parent (1 for the root).
    pub parent_line: usize,
}

/// Collects every node matching `wanted`, depth-first in pre-order.
pub fn resolve_nodes<'n>(
    tree: &'n SyntaxTree<'_>,
    wanted: impl Fn(&NodeKind) -> bool,
) -> Vec<Resolved<'n>> {
    let mut out = vec![];
    let mut stack = vec![(&tree.root, 0, 1)];

    while let Some((node, level, parent_line)) = stack.pop() {
        let child_level = if wanted(&node.kind) {
            out.push(Resolved {
                node,
                level,
                parent_line,
            });
            level + 1
        } else {
            level
        };

        let line = tree.line_of(node.span.start);
        stack.extend(
            node.children
                .iter()
                .rev()
                .map(|child| (child, child_level, line)),
        );
    }

    out
}
