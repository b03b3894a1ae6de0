use crate::parsing::{SyntaxTree, tree::NodeKind};

use super::{types::Heading, walker::resolve_nodes};

const MARKER: char = '#';

pub fn extract(tree: &SyntaxTree<'_>) -> Vec<Heading> {
    resolve_nodes(tree, |k| matches!(k, NodeKind::Heading { .. }))
        .into_iter()
        .filter_map(|r| match r.node.kind {
            NodeKind::Heading { level } => Some(Heading {
                text: heading_text(tree.slice(r.node.span)),
                level,
                position: tree.position(r.node.span),
            }),
            _ => None,
        })
        .collect()
}

/// Heading text without its markup.
///
/// ATX headings lose the opening `#` run, setext headings their underline.
/// A closing `#` sequence is content and stays.
pub fn heading_text(raw: &str) -> String {
    let raw = raw.trim();
    match raw.rsplit_once('\n') {
        Some((content, _underline)) => content.trim().to_string(),
        None => raw.trim_start_matches(MARKER).trim().to_string(),
    }
}
