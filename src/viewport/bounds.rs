//! Axis-aligned bounds of laid-out nodes.

use crate::layout::VisibleNode;

/// Bounding box in layout space.
///
/// `x` is the spread axis (vertical on screen), `y` the depth axis
/// (horizontal on screen).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutBounds {
    /// Smallest spread coordinate.
    pub min_x: f64,
    /// Largest spread coordinate.
    pub max_x: f64,
    /// Smallest depth coordinate.
    pub min_y: f64,
    /// Largest depth coordinate.
    pub max_y: f64,
}

impl LayoutBounds {
    /// Bounds enclosing every node center, or `None` for an empty slice.
    pub fn enclosing(nodes: &[VisibleNode]) -> Option<Self> {
        let (first, rest) = nodes.split_first()?;
        let mut bounds = Self {
            min_x: first.x,
            max_x: first.x,
            min_y: first.y,
            max_y: first.y,
        };
        for node in rest {
            bounds.min_x = bounds.min_x.min(node.x);
            bounds.max_x = bounds.max_x.max(node.x);
            bounds.min_y = bounds.min_y.min(node.y);
            bounds.max_y = bounds.max_y.max(node.y);
        }
        Some(bounds)
    }

    /// Grow the box by `padding` on every side.
    pub fn padded(self, padding: f64) -> Self {
        Self {
            min_x: self.min_x - padding,
            max_x: self.max_x + padding,
            min_y: self.min_y - padding,
            max_y: self.max_y + padding,
        }
    }

    /// Extent along the spread axis (screen height before scaling).
    #[inline]
    pub fn spread_extent(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Extent along the depth axis (screen width before scaling).
    #[inline]
    pub fn depth_extent(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Center as `(spread, depth)`.
    #[inline]
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{TreeLayoutConfig, layout};
    use crate::tree::{ExpansionSet, TaxonomyNode, prune};
    use std::rc::Rc;

    #[test]
    fn test_empty_has_no_bounds() {
        assert_eq!(LayoutBounds::enclosing(&[]), None);
    }

    #[test]
    fn test_enclosing_and_padding() {
        let tree = Rc::new(TaxonomyNode::new("r", "R").with_children([
            TaxonomyNode::new("a", "A"),
            TaxonomyNode::new("b", "B"),
        ]));
        let pruned = prune(&tree, &ExpansionSet::new(), 0, 1);
        let result = layout(&pruned, 800.0, &TreeLayoutConfig::default()).unwrap();

        let bounds = LayoutBounds::enclosing(&result.nodes).unwrap();
        assert_eq!(bounds.min_x, 312.0);
        assert_eq!(bounds.max_x, 368.0);
        assert_eq!(bounds.min_y, 140.0);
        assert_eq!(bounds.max_y, 340.0);

        let padded = bounds.padded(48.0);
        assert_eq!(padded.spread_extent(), 152.0);
        assert_eq!(padded.depth_extent(), 296.0);
        assert_eq!(padded.center(), (340.0, 240.0));
    }
}
