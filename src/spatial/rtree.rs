//! R-tree based spatial index using the rstar crate.
//!
//! Indexes node centers in layout space, oriented like the screen (depth
//! axis horizontal), so a screen point only needs the inverse viewport
//! transform before it can be queried.

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use crate::layout::VisibleNode;

/// A node center with its position in the layout's node list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodePoint {
    /// Index into `TreeLayout::nodes`.
    pub slot: usize,
    /// Horizontal coordinate (layout depth axis).
    pub x: f64,
    /// Vertical coordinate (layout spread axis).
    pub y: f64,
}

impl NodePoint {
    /// Create a new NodePoint.
    pub fn new(slot: usize, x: f64, y: f64) -> Self {
        Self { slot, x, y }
    }
}

impl RTreeObject for NodePoint {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.x, self.y])
    }
}

impl PointDistance for NodePoint {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.x - point[0];
        let dy = self.y - point[1];
        dx * dx + dy * dy
    }
}

/// Spatial index over the nodes of one layout pass.
#[derive(Debug, Default)]
pub struct SpatialIndex {
    tree: RTree<NodePoint>,
}

impl SpatialIndex {
    /// Create a new empty spatial index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bulk-load the index from laid-out nodes.
    pub fn from_nodes(nodes: &[VisibleNode]) -> Self {
        let points = nodes
            .iter()
            .enumerate()
            .map(|(slot, node)| NodePoint::new(slot, node.y, node.x))
            .collect();
        Self {
            tree: RTree::bulk_load(points),
        }
    }

    /// Slot of the nearest node within `radius` of `(x, y)`, in screen
    /// orientation.
    pub fn nearest_within(&self, x: f64, y: f64, radius: f64) -> Option<usize> {
        let radius_sq = radius * radius;
        self.tree
            .nearest_neighbor(&[x, y])
            .filter(|point| point.distance_2(&[x, y]) <= radius_sq)
            .map(|point| point.slot)
    }

    /// Get the number of nodes in the index.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{TreeLayoutConfig, layout};
    use crate::tree::{ExpansionSet, TaxonomyNode, prune};
    use std::rc::Rc;

    fn nodes() -> Vec<VisibleNode> {
        let tree = Rc::new(TaxonomyNode::new("r", "R").with_children([
            TaxonomyNode::new("a", "A"),
            TaxonomyNode::new("b", "B"),
        ]));
        let pruned = prune(&tree, &ExpansionSet::new(), 0, 1);
        layout(&pruned, 800.0, &TreeLayoutConfig::default())
            .unwrap()
            .nodes
    }

    #[test]
    fn test_nearest_within() {
        let index = SpatialIndex::from_nodes(&nodes());
        assert_eq!(index.len(), 3);

        // Root center is (140, 340) in screen orientation
        assert_eq!(index.nearest_within(140.0, 340.0, 20.0), Some(0));
        assert_eq!(index.nearest_within(150.0, 352.0, 20.0), Some(0));
        // Child "b" sits at (340, 368)
        assert_eq!(index.nearest_within(345.0, 370.0, 20.0), Some(2));
        // Between root and children
        assert_eq!(index.nearest_within(240.0, 340.0, 20.0), None);
    }

    #[test]
    fn test_empty() {
        let index = SpatialIndex::new();
        assert!(index.is_empty());
        assert_eq!(index.nearest_within(0.0, 0.0, 100.0), None);
    }
}
