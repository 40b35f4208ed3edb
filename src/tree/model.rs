//! Taxonomy node type and its detail payload.
//!
//! A taxonomy is an immutable, ordered tree supplied by the caller. Each node has:
//! - An id that is unique across the whole tree (the sole identity key)
//! - Display text (name and optional description)
//! - An optional, opaque detail payload (commands and tips)
//! - Ordered children, held behind shared read-only handles

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Opaque detail payload surfaced verbatim when a node is selected.
///
/// The engine never parses or validates these lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxonomyDetails {
    /// Key commands for the concept.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commands: Option<Vec<String>>,
    /// Tips and gotchas for the concept.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tips: Option<Vec<String>>,
}

impl TaxonomyDetails {
    /// Commands, or an empty slice when absent.
    pub fn commands(&self) -> &[String] {
        self.commands.as_deref().unwrap_or_default()
    }

    /// Tips, or an empty slice when absent.
    pub fn tips(&self) -> &[String] {
        self.tips.as_deref().unwrap_or_default()
    }
}

/// A node of the full taxonomy.
///
/// Children are `Rc` handles so that derived structures (pruned trees,
/// visible nodes) can point back at the original node without copying it
/// or becoming a second owner of mutable state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxonomyNode {
    /// Unique id within the whole tree.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Optional one-line description, shown in tooltips.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Optional detail payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<TaxonomyDetails>,
    /// Ordered children. An absent list and an empty list are equivalent.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Rc<TaxonomyNode>>,
}

impl TaxonomyNode {
    /// Create a leaf node.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            details: None,
            children: Vec::new(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the detail payload.
    pub fn with_details(mut self, details: TaxonomyDetails) -> Self {
        self.details = Some(details);
        self
    }

    /// Append children, preserving order.
    pub fn with_children(mut self, children: impl IntoIterator<Item = TaxonomyNode>) -> Self {
        self.children.extend(children.into_iter().map(Rc::new));
        self
    }

    /// Whether the node owns at least one child in the full tree.
    #[inline]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Placeholder root used when a requested taxonomy is unknown.
    pub fn placeholder() -> Self {
        Self::new("root", "No Data")
    }

    /// Tooltip text: `"{name}: {description}"`, or just the name.
    pub fn tooltip_text(&self) -> String {
        match &self.description {
            Some(description) => format!("{}: {}", self.name, description),
            None => self.name.clone(),
        }
    }

    /// Number of nodes in this subtree, including this node.
    pub fn subtree_size(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(|child| child.subtree_size())
            .sum::<usize>()
    }
}

impl fmt::Display for TaxonomyNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_preserves_child_order() {
        let node = TaxonomyNode::new("r", "R").with_children([
            TaxonomyNode::new("b", "B"),
            TaxonomyNode::new("a", "A"),
        ]);

        let ids: Vec<_> = node.children.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
        assert!(node.has_children());
        assert_eq!(node.subtree_size(), 3);
    }

    #[test]
    fn test_tooltip_text() {
        let node = TaxonomyNode::new("images", "Images").with_description("Immutable blueprints");
        assert_eq!(node.tooltip_text(), "Images: Immutable blueprints");
        assert_eq!(TaxonomyNode::new("tags", "Tags").tooltip_text(), "Tags");
    }

    #[test]
    fn test_deserialize_absent_and_empty_children() {
        let absent: TaxonomyNode = serde_json::from_str(r#"{"id":"a","name":"A"}"#).unwrap();
        let empty: TaxonomyNode =
            serde_json::from_str(r#"{"id":"a","name":"A","children":[]}"#).unwrap();

        assert!(!absent.has_children());
        assert!(!empty.has_children());
        assert_eq!(absent, empty);
    }

    #[test]
    fn test_deserialize_details_verbatim() {
        let json = r#"{
            "id": "docker",
            "name": "Docker",
            "description": "Containers",
            "details": { "commands": ["docker version"], "tips": ["Use contexts."] },
            "children": [{ "id": "images", "name": "Images" }]
        }"#;
        let node: TaxonomyNode = serde_json::from_str(json).unwrap();

        let details = node.details.as_ref().unwrap();
        assert_eq!(details.commands(), ["docker version"]);
        assert_eq!(details.tips(), ["Use contexts."]);
        assert_eq!(node.children[0].id, "images");
    }

    #[test]
    fn test_details_missing_lists_are_empty() {
        let details = TaxonomyDetails {
            commands: None,
            tips: Some(vec!["tip".into()]),
        };
        assert!(details.commands().is_empty());
        assert_eq!(details.tips().len(), 1);
    }

    #[test]
    fn test_placeholder() {
        let node = TaxonomyNode::placeholder();
        assert_eq!(node.id, "root");
        assert_eq!(node.name, "No Data");
        assert_eq!(format!("{node}"), "No Data (root)");
    }
}
