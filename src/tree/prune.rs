//! Visibility pruning.
//!
//! Produces the subset of a taxonomy that is currently drawn: a node's
//! children are kept when the node sits above the always-show depth or its id
//! is in the expansion set, and dropped otherwise. Pruning is a pure function
//! of `(tree, expanded)` and is cheap enough to rerun on every change at
//! documentation-scale tree sizes.

use std::collections::BTreeSet;
use std::rc::Rc;

use super::expansion::ExpansionSet;
use super::model::TaxonomyNode;

/// A node of the pruned tree.
///
/// Holds a read-only handle to the original node plus the children that
/// survived pruning, in their original order.
#[derive(Debug, Clone, PartialEq)]
pub struct PrunedNode {
    /// The original taxonomy node.
    pub node: Rc<TaxonomyNode>,
    /// Visible children (empty when collapsed).
    pub children: Vec<PrunedNode>,
}

impl PrunedNode {
    /// Node id.
    #[inline]
    pub fn id(&self) -> &str {
        &self.node.id
    }

    /// Whether the node has children in the full tree, visible or not.
    #[inline]
    pub fn has_children(&self) -> bool {
        self.node.has_children()
    }

    /// Prune an already-pruned tree again.
    ///
    /// Children hidden by an earlier pass stay absent, so pruning twice with
    /// the same expansion set is a no-op.
    pub fn prune(&self, expanded: &ExpansionSet, depth: usize, always_show_depth: usize) -> PrunedNode {
        let children = if shows_children(&self.node, expanded, depth, always_show_depth) {
            self.children
                .iter()
                .map(|child| child.prune(expanded, depth + 1, always_show_depth))
                .collect()
        } else {
            Vec::new()
        };

        PrunedNode {
            node: Rc::clone(&self.node),
            children,
        }
    }

    /// Ids of all nodes in pre-order.
    pub fn ids(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_ids(&mut out);
        out
    }

    fn collect_ids<'a>(&'a self, out: &mut Vec<&'a str>) {
        out.push(self.id());
        for child in &self.children {
            child.collect_ids(out);
        }
    }

    /// Number of nodes in the pruned tree.
    pub fn len(&self) -> usize {
        1 + self.children.iter().map(PrunedNode::len).sum::<usize>()
    }

    /// Always false: a pruned tree contains at least its root.
    pub fn is_empty(&self) -> bool {
        false
    }
}

#[inline]
fn shows_children(
    node: &TaxonomyNode,
    expanded: &ExpansionSet,
    depth: usize,
    always_show_depth: usize,
) -> bool {
    depth < always_show_depth || expanded.contains(&node.id)
}

/// Build the pruned tree rooted at `node`.
///
/// `depth` is the depth of `node` itself (0 for the taxonomy root).
pub fn prune(
    node: &Rc<TaxonomyNode>,
    expanded: &ExpansionSet,
    depth: usize,
    always_show_depth: usize,
) -> PrunedNode {
    let children = if shows_children(node, expanded, depth, always_show_depth) {
        node.children
            .iter()
            .map(|child| prune(child, expanded, depth + 1, always_show_depth))
            .collect()
    } else {
        Vec::new()
    };

    PrunedNode {
        node: Rc::clone(node),
        children,
    }
}

/// Collect every id that owns at least one child, in one pre-order pass.
pub fn ids_with_children(tree: &TaxonomyNode) -> ExpansionSet {
    let mut out = BTreeSet::new();
    let mut stack = vec![tree];
    while let Some(node) = stack.pop() {
        if node.has_children() {
            out.insert(node.id.clone());
            stack.extend(node.children.iter().rev().map(|child| &**child));
        }
    }
    out.into_iter().collect()
}

/// Find a node by id with a depth-first search of the full tree.
pub fn find_node_by_id<'a>(node: &'a Rc<TaxonomyNode>, id: &str) -> Option<&'a Rc<TaxonomyNode>> {
    if node.id == id {
        return Some(node);
    }
    node.children
        .iter()
        .find_map(|child| find_node_by_id(child, id))
}
