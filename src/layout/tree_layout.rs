//! Left-to-right layout of a pruned taxonomy.
//!
//! Runs the tidy tree over the pruned tree, then orients it: the depth axis
//! becomes the horizontal screen axis (shifted right by a fixed margin) and
//! the spread axis becomes the vertical one, centered in the available
//! height. Nodes come out in pre-order; links pair each non-root node with
//! its parent, both resolved by id from the freshly laid-out nodes.

use std::collections::HashMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use super::link::LinkCurve;
use super::shape::NodeGlyph;
use super::tidy_tree::{TidyTreeConfig, TidyTreeLayout};
use crate::error::LayoutError;
use crate::tree::{PrunedNode, TaxonomyNode};

/// What the vertical centering pins to the middle of the available height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SpreadAnchor {
    /// The root node. Expanding a subtree never moves the root.
    #[default]
    Root,
    /// The midpoint of the spread-axis extent of all visible nodes.
    Extent,
}

/// Configuration for orienting the tidy tree on screen.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TreeLayoutConfig {
    /// Tidy tree spacing.
    #[serde(flatten)]
    pub tidy: TidyTreeConfig,
    /// Added to every depth-axis coordinate so the root is not flush left.
    pub left_margin: f64,
    /// Chrome height subtracted from the viewport height.
    pub height_inset: f64,
    /// Lower bound for the available height.
    pub min_height: f64,
    /// Vertical centering anchor.
    pub anchor: SpreadAnchor,
}

impl Default for TreeLayoutConfig {
    fn default() -> Self {
        Self {
            tidy: TidyTreeConfig::default(),
            left_margin: 140.0,
            height_inset: 120.0,
            min_height: 560.0,
            anchor: SpreadAnchor::Root,
        }
    }
}

impl TreeLayoutConfig {
    /// Height the tree is centered in for a given viewport height.
    pub fn available_height(&self, viewport_height: f64) -> f64 {
        (viewport_height - self.height_inset).max(self.min_height)
    }
}

/// A node of the current layout pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibleNode {
    /// Node id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Optional description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Depth in the tree (root = 0).
    pub depth: usize,
    /// Spread-axis (vertical on screen) layout coordinate.
    pub x: f64,
    /// Depth-axis (horizontal on screen) layout coordinate.
    pub y: f64,
    /// Whether the node has children in the full tree.
    pub has_children: bool,
    /// Whether its children are currently shown.
    pub expanded: bool,
    /// Glyph hint for the renderer.
    pub glyph: NodeGlyph,
    /// Read-only handle to the original taxonomy node.
    #[serde(skip)]
    pub data: Rc<TaxonomyNode>,
}

/// A parent → child link.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkEdge {
    /// Parent node.
    pub source: VisibleNode,
    /// Child node.
    pub target: VisibleNode,
    /// Curve geometry in screen axis order.
    pub curve: LinkCurve,
}

/// Output of one layout pass.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TreeLayout {
    /// Visible nodes in pre-order.
    pub nodes: Vec<VisibleNode>,
    /// One link per parent → child relation, in child pre-order.
    pub links: Vec<LinkEdge>,
}

impl TreeLayout {
    /// Number of visible nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether no nodes are visible.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Find a visible node by id.
    pub fn find(&self, id: &str) -> Option<&VisibleNode> {
        self.nodes.iter().find(|node| node.id == id)
    }
}

/// Lay out a pruned tree for a viewport of the given height.
pub fn layout(
    pruned: &PrunedNode,
    viewport_height: f64,
    config: &TreeLayoutConfig,
) -> Result<TreeLayout, LayoutError> {
    // Flatten to pre-order slots
    let mut slots: Vec<(&PrunedNode, Option<usize>)> = Vec::with_capacity(pruned.len());
    let mut children: Vec<Vec<usize>> = Vec::with_capacity(pruned.len());
    flatten(pruned, None, &mut slots, &mut children);

    let tidy = TidyTreeLayout::new(config.tidy.clone()).compute(&children);

    let center = config.available_height(viewport_height) / 2.0;
    let offset = match config.anchor {
        SpreadAnchor::Root => center,
        SpreadAnchor::Extent => {
            let min = tidy.positions_x.iter().copied().fold(f64::INFINITY, f64::min);
            let max = tidy.positions_x.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            center - (min + max) / 2.0
        }
    };

    let nodes: Vec<VisibleNode> = slots
        .iter()
        .enumerate()
        .map(|(slot, (node, _))| {
            let has_children = node.has_children();
            let expanded = !node.children.is_empty();
            VisibleNode {
                id: node.node.id.clone(),
                name: node.node.name.clone(),
                description: node.node.description.clone(),
                depth: tidy.depths[slot],
                x: tidy.positions_x[slot] + offset,
                y: tidy.positions_y[slot] + config.left_margin,
                has_children,
                expanded,
                glyph: NodeGlyph::for_node(has_children, expanded),
                data: Rc::clone(&node.node),
            }
        })
        .collect();

    let mut node_by_id: HashMap<&str, usize> = HashMap::with_capacity(nodes.len());
    for (slot, node) in nodes.iter().enumerate() {
        if node_by_id.insert(node.id.as_str(), slot).is_some() {
            return Err(LayoutError::DuplicateId(node.id.clone()));
        }
    }

    let mut links = Vec::with_capacity(nodes.len().saturating_sub(1));
    for (node, parent_slot) in &slots {
        let Some(parent_slot) = *parent_slot else {
            continue;
        };
        let source = resolve(&node_by_id, &nodes, slots[parent_slot].0.id())?;
        let target = resolve(&node_by_id, &nodes, node.id())?;
        links.push(LinkEdge {
            curve: LinkCurve::between(source.x, source.y, target.x, target.y),
            source: source.clone(),
            target: target.clone(),
        });
    }

    tracing::trace!(nodes = nodes.len(), links = links.len(), "tree layout computed");
    Ok(TreeLayout { nodes, links })
}

fn flatten<'a>(
    node: &'a PrunedNode,
    parent: Option<usize>,
    slots: &mut Vec<(&'a PrunedNode, Option<usize>)>,
    children: &mut Vec<Vec<usize>>,
) {
    let slot = slots.len();
    slots.push((node, parent));
    children.push(Vec::with_capacity(node.children.len()));
    if let Some(parent) = parent {
        children[parent].push(slot);
    }
    for child in &node.children {
        flatten(child, Some(slot), slots, children);
    }
}

fn resolve<'a>(
    node_by_id: &HashMap<&str, usize>,
    nodes: &'a [VisibleNode],
    id: &str,
) -> Result<&'a VisibleNode, LayoutError> {
    node_by_id
        .get(id)
        .map(|&slot| &nodes[slot])
        .ok_or_else(|| LayoutError::MissingEndpoint { id: id.to_owned() })
}
