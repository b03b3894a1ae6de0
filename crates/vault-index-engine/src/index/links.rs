use std::sync::LazyLock;

use regex::Regex;

use crate::parsing::{SyntaxTree, tree::NodeKind};

use super::{types::Link, walker::resolve_nodes};

/// Destinations with a URI scheme point outside the vault.
static EXTERNAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[a-z][a-z0-9+\-.]*:").unwrap_or_else(|e| panic!("invalid scheme pattern: {e}"))
});

pub fn is_external(destination: &str) -> bool {
    EXTERNAL.is_match(destination)
}

/// Percent-decodes a destination, keeping it as written when it does not
/// decode to UTF-8.
pub fn decode_destination(destination: &str) -> String {
    match urlencoding::decode(destination) {
        Ok(decoded) => decoded.into_owned(),
        Err(e) => {
            log::warn!("keeping undecodable destination {destination:?}: {e}");
            destination.to_string()
        }
    }
}

/// Standard links to vault documents merged with wiki links.
pub fn extract_links(tree: &SyntaxTree<'_>) -> Vec<Link> {
    collect(tree, |kind| match kind {
        NodeKind::Link { url, text, .. } if !is_external(url) => {
            Some((decode_destination(url), text.clone()))
        }
        NodeKind::WikiLink { target, alias } => Some((target.clone(), alias.clone())),
        _ => None,
    })
}

/// Images of vault files merged with wiki embeds.
///
/// Image destinations are percent-decoded the same way link destinations are.
pub fn extract_embeds(tree: &SyntaxTree<'_>) -> Vec<Link> {
    collect(tree, |kind| match kind {
        NodeKind::Image { url, alt } if !is_external(url) => {
            Some((decode_destination(url), alt.clone()))
        }
        NodeKind::WikiEmbed { target, alias } => Some((target.clone(), alias.clone())),
        _ => None,
    })
}

fn collect(
    tree: &SyntaxTree<'_>,
    pick: impl Fn(&NodeKind) -> Option<(String, String)>,
) -> Vec<Link> {
    let mut links: Vec<Link> = resolve_nodes(tree, |kind| pick(kind).is_some())
        .into_iter()
        .filter_map(|r| {
            let (target, display_text) = pick(&r.node.kind)?;
            Some(Link {
                target,
                display_text,
                position: tree.position(r.node.span),
            })
        })
        .collect();

    links.sort_by_key(|link| link.position.start_offset());
    links
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::{ParseOptions, parse_tree};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn targets(links: &[Link]) -> Vec<(&str, &str)> {
        links
            .iter()
            .map(|l| (l.target.as_str(), l.display_text.as_str()))
            .collect()
    }

    #[rstest]
    #[case("http://example.com", true)]
    #[case("HTTPS://example.com", true)]
    #[case("mailto:a@b.c", true)]
    #[case("obsidian://open", true)]
    #[case("x-custom+v1.2:thing", true)]
    #[case("./note.md", false)]
    #[case("note.md", false)]
    #[case("folder/note%20one.md", false)]
    #[case("1abc:thing", false)]
    fn scheme_detection(#[case] destination: &str, #[case] external: bool) {
        assert_eq!(is_external(destination), external);
    }

    #[rstest]
    #[case("my%20note.md", "my note.md")]
    #[case("plain.md", "plain.md")]
    #[case("caf%C3%A9.md", "café.md")]
    #[case("bad%FF.md", "bad%FF.md")]
    fn destination_decoding(#[case] raw: &str, #[case] want: &str) {
        assert_eq!(decode_destination(raw), want);
    }

    #[test]
    fn external_links_are_dropped_and_wiki_links_merged() {
        let tree = parse_tree(
            "[[Wiki]] [ext](http://example.com) [local](./my%20note.md)",
            &ParseOptions::default(),
        );
        let links = extract_links(&tree);
        assert_eq!(
            targets(&links),
            vec![("Wiki", "Wiki"), ("./my note.md", "local")]
        );
    }

    #[test]
    fn links_sort_by_start_offset() {
        let tree = parse_tree("[a](a.md)\n\n[[b]]\n\n[c](c.md)", &ParseOptions::default());
        let links = extract_links(&tree);
        assert_eq!(
            targets(&links),
            vec![("a.md", "a"), ("b", "b"), ("c.md", "c")]
        );
    }

    #[test]
    fn embeds_merge_images_and_wiki_embeds() {
        let tree = parse_tree(
            "![[img.png|Caption]] ![alt](pics/a%20b.png) ![remote](https://x.y/z.png)",
            &ParseOptions::default(),
        );
        let embeds = extract_embeds(&tree);
        assert_eq!(
            targets(&embeds),
            vec![("img.png", "Caption"), ("pics/a b.png", "alt")]
        );
    }

    #[test]
    fn autolinks_are_external() {
        let tree = parse_tree("<https://example.com> <me@example.com>", &ParseOptions::default());
        assert!(extract_links(&tree).is_empty());
    }
}
