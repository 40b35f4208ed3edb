//! Renderer hints for node shapes: the expand/collapse glyph and the label pill.

use serde::Serialize;

/// Radius of a node bubble.
pub const NODE_RADIUS: f64 = 20.0;
/// Horizontal padding inside a label pill.
pub const LABEL_PADDING_X: f64 = 14.0;
/// Gap between bubble and label pill.
const LABEL_GAP: f64 = 8.0;
/// Minimum text width of a label pill.
const MIN_LABEL_TEXT_WIDTH: f64 = 80.0;
/// Approximate text width per character.
const CHAR_WIDTH: f64 = 8.0;

/// Glyph drawn inside a node bubble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeGlyph {
    /// Children are shown ("–").
    Collapse,
    /// Children exist but are hidden ("+").
    Expand,
    /// No children in the full tree.
    Leaf,
}

impl NodeGlyph {
    /// Glyph for a node given whether it has children and whether they are shown.
    pub fn for_node(has_children: bool, children_shown: bool) -> Self {
        match (has_children, children_shown) {
            (false, _) => Self::Leaf,
            (true, true) => Self::Collapse,
            (true, false) => Self::Expand,
        }
    }

    /// Text to draw, if any.
    pub fn symbol(self) -> Option<&'static str> {
        match self {
            Self::Collapse => Some("–"),
            Self::Expand => Some("+"),
            Self::Leaf => None,
        }
    }
}

/// Bubble and label-pill geometry for one node, relative to the node center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeShape {
    /// Bubble radius.
    pub radius: f64,
    /// Label pill offset from the node center (x).
    pub label_x: f64,
    /// Label pill offset from the node center (y).
    pub label_y: f64,
    /// Label pill width.
    pub label_width: f64,
    /// Label pill height.
    pub label_height: f64,
}

impl NodeShape {
    /// Shape for a node labelled `name`.
    pub fn for_label(name: &str) -> Self {
        let text_width = (name.chars().count() as f64 * CHAR_WIDTH).max(MIN_LABEL_TEXT_WIDTH);
        Self {
            radius: NODE_RADIUS,
            label_x: NODE_RADIUS + LABEL_GAP,
            label_y: -NODE_RADIUS,
            label_width: text_width + LABEL_PADDING_X * 2.0,
            label_height: NODE_RADIUS * 2.0,
        }
    }
}
