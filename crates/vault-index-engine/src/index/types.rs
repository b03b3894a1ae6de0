use serde::{Deserialize, Serialize};

use crate::parsing::position::Position;

/// Parsed front matter, keys in document order.
pub type Frontmatter = serde_json::Map<String, serde_json::Value>;

/// The index of one document.
///
/// Every category is optional: a category with no entries is `None` and is
/// left out of the serialized form entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headings: Option<Vec<Heading>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<Link>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embeds: Option<Vec<Link>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_items: Option<Vec<ListItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frontmatter: Option<Frontmatter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frontmatter_links: Option<Vec<FrontmatterLink>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frontmatter_pos: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    pub text: String,
    pub level: u8,
    pub position: Position,
}

/// A link or embed; both categories share this shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub target: String,
    pub display_text: String,
    pub position: Position,
}

/// Checkbox state of a task item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Task {
    #[serde(rename = "x")]
    Done,
    #[serde(rename = " ")]
    Open,
}

impl From<bool> for Task {
    fn from(checked: bool) -> Self {
        if checked { Task::Done } else { Task::Open }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    /// Start line of the parent item (see `index::lists` for the encoding).
    pub parent: i64,
    pub position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<Task>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    pub position: Position,
}

/// A front-matter string value written as `[[link|display]]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrontmatterLink {
    pub key: String,
    pub original: String,
    pub link: String,
    pub display_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_result_serializes_to_empty_object() {
        let json = serde_json::to_string(&ParseResult::default()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn task_serializes_as_checkbox_character() {
        let item = ListItem {
            parent: -1,
            position: Position(0, 0, 0, 0, 10, 10),
            task: Some(Task::Done),
        };
        insta::assert_snapshot!(
            serde_json::to_string(&item).unwrap(),
            @r#"{"parent":-1,"position":[0,0,0,0,10,10],"task":"x"}"#
        );

        let plain = ListItem { task: None, ..item };
        insta::assert_snapshot!(
            serde_json::to_string(&plain).unwrap(),
            @r#"{"parent":-1,"position":[0,0,0,0,10,10]}"#
        );
    }
}
