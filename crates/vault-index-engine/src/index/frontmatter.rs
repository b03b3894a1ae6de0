use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::{
    error::ParseError,
    parsing::{SyntaxTree, position::Position, tree::NodeKind},
};

use super::types::{Frontmatter, FrontmatterLink};

/// A whole value written as a wiki link.
static WIKI_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[\[.+\]\]$").unwrap_or_else(|e| panic!("invalid wiki value pattern: {e}"))
});

const ALIAS_SEPARATOR: char = '|';

/// Decoded front matter of a document.
#[derive(Debug, Clone, PartialEq)]
pub struct Extracted {
    pub mapping: Frontmatter,
    pub links: Vec<FrontmatterLink>,
    pub position: Position,
}

/// Decodes the YAML block when it is the document's first node.
///
/// Returns `Ok(None)` for documents without front matter.
pub fn extract(tree: &SyntaxTree<'_>) -> Result<Option<Extracted>, ParseError> {
    let Some(node) = tree.root.children.first() else {
        return Ok(None);
    };
    let NodeKind::FrontMatter { value } = &node.kind else {
        return Ok(None);
    };

    let mapping = parse_yaml_to_json_map(value)?;
    let links = mapping
        .iter()
        .flat_map(|(key, value)| links_in(key, value))
        .collect();

    Ok(Some(Extracted {
        mapping,
        links,
        position: tree.position(node.span),
    }))
}

/// Parses YAML into a JSON object. An empty document is an empty mapping.
pub fn parse_yaml_to_json_map(yaml: &str) -> Result<Frontmatter, ParseError> {
    let mapping = match serde_yaml::from_str::<serde_yaml::Value>(yaml)? {
        serde_yaml::Value::Null => return Ok(Frontmatter::new()),
        serde_yaml::Value::Mapping(mapping) => mapping,
        _ => return Err(ParseError::FrontmatterNotMapping),
    };

    mapping
        .into_iter()
        .map(|(key, value)| -> Result<_, ParseError> {
            Ok((key_string(&key)?, serde_json::to_value(value)?))
        })
        .collect()
}

fn key_string(key: &serde_yaml::Value) -> Result<String, ParseError> {
    Ok(match key {
        serde_yaml::Value::String(s) => s.clone(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Null => "null".to_string(),
        other => serde_yaml::to_string(other)?.trim_end().to_string(),
    })
}

/// Wiki-link values under `key`: the value itself, or string elements of a
/// sequence.
fn links_in(key: &str, value: &Value) -> Vec<FrontmatterLink> {
    match value {
        Value::String(s) => parse_link(key, s).into_iter().collect(),
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .filter_map(|s| parse_link(key, s))
            .collect(),
        _ => vec![],
    }
}

/// Splits `[[link|display]]` on the first separator; without one, link and
/// display text are the same.
pub fn parse_link(key: &str, original: &str) -> Option<FrontmatterLink> {
    let trimmed = original.trim();
    if !WIKI_VALUE.is_match(trimmed) {
        return None;
    }
    let inner = trimmed.get(2..trimmed.len() - 2)?;
    let (link, display_text) = inner.split_once(ALIAS_SEPARATOR).unwrap_or((inner, inner));

    Some(FrontmatterLink {
        key: key.to_string(),
        original: original.to_string(),
        link: link.to_string(),
        display_text: display_text.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::{ParseOptions, parse_tree};
    use pretty_assertions::assert_eq;

    fn extract_str(source: &str) -> Result<Option<Extracted>, ParseError> {
        extract(&parse_tree(source, &ParseOptions::default()))
    }

    #[test]
    fn aliased_link_value() {
        let got = extract_str("---\nkey: \"[[A|B]]\"\n---\n").unwrap().unwrap();
        assert_eq!(
            got.links,
            vec![FrontmatterLink {
                key: "key".into(),
                original: "[[A|B]]".into(),
                link: "A".into(),
                display_text: "B".into(),
            }]
        );
        assert_eq!(got.mapping["key"], Value::String("[[A|B]]".into()));
    }

    #[test]
    fn plain_link_and_sequence_elements() {
        let got = extract_str("---\nup: \"[[Home]]\"\nrelated:\n  - \"[[X]]\"\n  - plain\n  - 3\n---\n")
            .unwrap()
            .unwrap();
        let links: Vec<_> = got
            .links
            .iter()
            .map(|l| (l.key.as_str(), l.link.as_str(), l.display_text.as_str()))
            .collect();
        assert_eq!(links, vec![("up", "Home", "Home"), ("related", "X", "X")]);
    }

    #[test]
    fn original_keeps_surrounding_whitespace() {
        let link = parse_link("k", " [[A|B|C]] ").unwrap();
        assert_eq!(link.original, " [[A|B|C]] ");
        assert_eq!(link.link, "A");
        assert_eq!(link.display_text, "B|C");
    }

    #[test]
    fn non_link_values_are_ignored() {
        assert!(parse_link("k", "[[]]").is_none());
        assert!(parse_link("k", "see [[A]]").is_none());
        assert!(parse_link("k", "[A]").is_none());
    }

    #[test]
    fn keys_keep_document_order() {
        let map = parse_yaml_to_json_map("zeta: 1\nalpha: 2\nmid: 3\n").unwrap();
        let keys: Vec<_> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn non_string_keys_are_stringified() {
        let map = parse_yaml_to_json_map("1: one\ntrue: yes\n").unwrap();
        assert_eq!(map["1"], Value::String("one".into()));
        assert_eq!(map["true"], Value::String("yes".into()));
    }

    #[test]
    fn empty_block_is_empty_mapping() {
        assert!(parse_yaml_to_json_map("").unwrap().is_empty());
        assert!(parse_yaml_to_json_map("# only a comment\n").unwrap().is_empty());
    }

    #[test]
    fn sequence_document_is_rejected() {
        assert!(matches!(
            parse_yaml_to_json_map("- a\n- b\n"),
            Err(ParseError::FrontmatterNotMapping)
        ));
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        assert!(matches!(
            extract_str("---\nkey: [unclosed\n---\n"),
            Err(ParseError::Frontmatter(_))
        ));
    }

    #[test]
    fn no_front_matter_block() {
        assert!(extract_str("# Title\n").unwrap().is_none());
        assert!(extract_str("").unwrap().is_none());
    }
}
