//! Per-frame output for renderers.
//!
//! A `Frame` is everything an adapter needs to draw one frame, in a shape
//! that serializes to plain JS objects.

use serde::Serialize;

use crate::interaction::Tooltip;
use crate::layout::{NodeShape, Point, VisibleNode};
use crate::viewport::Viewport;

/// Detail panel content for the selected node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionDetails {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub depth: usize,
    pub has_children: bool,
    /// "has sub-concepts" or "leaf".
    pub kind_label: &'static str,
    /// Commands from the node's details, verbatim.
    pub commands: Vec<String>,
    /// Tips from the node's details, verbatim.
    pub tips: Vec<String>,
}

impl SelectionDetails {
    /// Details for a selected node.
    pub fn from_node(node: &VisibleNode) -> Self {
        let details = node.data.details.as_ref();
        Self {
            id: node.id.clone(),
            name: node.name.clone(),
            description: node.description.clone(),
            depth: node.depth,
            has_children: node.has_children,
            kind_label: kind_label(node.has_children),
            commands: details.map(|d| d.commands().to_vec()).unwrap_or_default(),
            tips: details.map(|d| d.tips().to_vec()).unwrap_or_default(),
        }
    }
}

fn kind_label(has_children: bool) -> &'static str {
    if has_children { "has sub-concepts" } else { "leaf" }
}

/// A visible node with its screen position and shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameNode {
    #[serde(flatten)]
    pub node: VisibleNode,
    /// Node center on screen.
    pub screen: Point,
    /// Bubble and label geometry.
    pub shape: NodeShape,
}

/// A link with its SVG path in layout space.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameLink {
    /// Parent id.
    pub source: String,
    /// Child id.
    pub target: String,
    /// `d` attribute of the link path.
    pub path: String,
}

/// One renderable frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    pub nodes: Vec<FrameNode>,
    pub links: Vec<FrameLink>,
    pub viewport: Viewport,
    /// SVG `transform` for the group holding nodes and links.
    pub transform: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<Tooltip>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovered: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection: Option<SelectionDetails>,
}
