//! Buchheim-Junger-Leipert tidy tree layout algorithm.
//!
//! Implements the O(n) algorithm from "Improving Walker's Algorithm to Run in
//! Linear Time" (Buchheim, Junger, Leipert, 2002) for laying out arbitrary
//! m-ary trees with compact, aesthetically pleasing positioning. The
//! numerics follow d3-hierarchy's `tree()` with a fixed node size, so a
//! taxonomy renders the same way it does in a d3-based front end.
//!
//! The algorithm produces (spread, depth) coordinates per node. Orientation
//! (which screen axis each maps to) is left to the caller.
//!
//! # Algorithm Overview
//!
//! 1. **First walk (bottom-up):** Recursively assign preliminary spread
//!    coordinates to each node by merging subtree contours. Uses threads for
//!    O(1) amortized contour traversal.
//! 2. **Second walk (top-down):** Apply accumulated modifiers to convert
//!    preliminary coordinates to final positions, with the root at 0.
//! 3. **Scaling:** Multiply spread units by the node spacing and depth by the
//!    level separation.

use std::collections::HashSet;

use serde::Deserialize;

/// Configuration for the tidy tree layout.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TidyTreeConfig {
    /// Size of one spread unit in layout space.
    pub node_spacing: f64,
    /// Distance between consecutive tree levels along the depth axis.
    pub level_separation: f64,
    /// Minimum separation, in spread units, between nodes sharing a parent.
    pub sibling_separation: f64,
    /// Minimum separation, in spread units, between adjacent nodes with different parents.
    pub non_sibling_separation: f64,
}

impl Default for TidyTreeConfig {
    fn default() -> Self {
        Self {
            node_spacing: 56.0,
            level_separation: 200.0,
            sibling_separation: 1.0,
            non_sibling_separation: 1.25,
        }
    }
}

/// Internal node data used during the Buchheim algorithm.
#[derive(Debug)]
struct LayoutNode {
    /// Index into the caller's node list.
    slot: usize,
    /// Depth in the tree (root = 0).
    depth: usize,
    /// Parent layout index (None for root).
    parent: Option<usize>,
    /// Children, in caller order.
    children: Vec<usize>,
    /// Preliminary spread coordinate (from first walk).
    prelim: f64,
    /// Modifier for subtree shift (accumulated in first walk, applied in second).
    modifier: f64,
    /// Contour thread for leaves (index into layout nodes).
    thread: Option<usize>,
    /// Ancestor pointer (for the "default ancestor" in apportion).
    ancestor: usize,
    /// Shift value for even spacing of intermediate children.
    shift: f64,
    /// Change value for even spacing of intermediate children.
    change: f64,
    /// Number (left-to-right index among siblings).
    number: usize,
}

/// Result of the tidy tree layout computation.
#[derive(Debug, Clone, PartialEq)]
pub struct TidyTreeResult {
    /// Spread-axis positions, one per input slot.
    pub positions_x: Vec<f64>,
    /// Depth-axis positions, one per input slot.
    pub positions_y: Vec<f64>,
    /// Depth of each input slot (root = 0).
    pub depths: Vec<usize>,
    /// Number of nodes laid out (slots unreachable from the root are skipped).
    pub node_count: usize,
}

/// The tidy tree layout engine.
#[derive(Debug, Clone, Default)]
pub struct TidyTreeLayout {
    config: TidyTreeConfig,
}

impl TidyTreeLayout {
    /// Create a new tidy tree layout with the given configuration.
    pub fn new(config: TidyTreeConfig) -> Self {
        Self { config }
    }

    /// Create a tidy tree layout with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(TidyTreeConfig::default())
    }

    /// Layout configuration.
    pub fn config(&self) -> &TidyTreeConfig {
        &self.config
    }

    /// Compute the tidy tree layout.
    ///
    /// # Arguments
    ///
    /// * `children` - Ordered child slots for every slot; slot 0 is the root
    ///
    /// # Returns
    ///
    /// A `TidyTreeResult` with one position per slot. The root sits at
    /// spread 0 and depth 0. Slots not reachable from the root, out-of-range
    /// child references and repeated visits are skipped and keep (0, 0).
    pub fn compute(&self, children: &[Vec<usize>]) -> TidyTreeResult {
        let slot_count = children.len();
        let mut result = TidyTreeResult {
            positions_x: vec![0.0; slot_count],
            positions_y: vec![0.0; slot_count],
            depths: vec![0; slot_count],
            node_count: 0,
        };

        if slot_count == 0 {
            return result;
        }

        let mut layout_nodes: Vec<LayoutNode> = Vec::with_capacity(slot_count);
        let mut visited: HashSet<usize> = HashSet::with_capacity(slot_count);
        Self::build_layout_tree(0, None, 0, 0, children, &mut layout_nodes, &mut visited);

        // Run Buchheim's algorithm
        self.first_walk(0, None, &mut layout_nodes);

        let mut final_x = vec![0.0; layout_nodes.len()];
        let root_offset = -layout_nodes[0].prelim;
        Self::second_walk_collect(0, root_offset, &layout_nodes, &mut final_x);

        for (layout_idx, node) in layout_nodes.iter().enumerate() {
            result.positions_x[node.slot] = final_x[layout_idx] * self.config.node_spacing;
            result.positions_y[node.slot] = node.depth as f64 * self.config.level_separation;
            result.depths[node.slot] = node.depth;
        }
        result.node_count = layout_nodes.len();
        result
    }

    /// Build the layout tree via DFS from the root slot.
    /// Slots already visited are skipped so malformed input cannot recurse forever.
    fn build_layout_tree(
        slot: usize,
        parent_layout_idx: Option<usize>,
        depth: usize,
        number: usize,
        children: &[Vec<usize>],
        layout_nodes: &mut Vec<LayoutNode>,
        visited: &mut HashSet<usize>,
    ) -> Option<usize> {
        if slot >= children.len() || !visited.insert(slot) {
            return None;
        }

        let layout_idx = layout_nodes.len();
        layout_nodes.push(LayoutNode {
            slot,
            depth,
            parent: parent_layout_idx,
            children: Vec::new(),
            prelim: 0.0,
            modifier: 0.0,
            thread: None,
            ancestor: layout_idx,
            shift: 0.0,
            change: 0.0,
            number,
        });

        let mut child_layout_indices = Vec::with_capacity(children[slot].len());
        for &child_slot in &children[slot] {
            if let Some(child_idx) = Self::build_layout_tree(
                child_slot,
                Some(layout_idx),
                depth + 1,
                child_layout_indices.len(),
                children,
                layout_nodes,
                visited,
            ) {
                child_layout_indices.push(child_idx);
            }
        }
        layout_nodes[layout_idx].children = child_layout_indices;

        Some(layout_idx)
    }

    /// Buchheim first walk: bottom-up assignment of preliminary coordinates.
    fn first_walk(&self, v: usize, left_sibling: Option<usize>, nodes: &mut [LayoutNode]) {
        let children = nodes[v].children.clone();

        if children.is_empty() {
            // Leaf node: position relative to left sibling
            if let Some(w) = left_sibling {
                nodes[v].prelim = nodes[w].prelim + self.separation(v, w, nodes);
            }
            return;
        }

        let mut default_ancestor = children[0];
        for (i, &child) in children.iter().enumerate() {
            let left = i.checked_sub(1).map(|j| children[j]);
            self.first_walk(child, left, nodes);
            default_ancestor = self.apportion(child, left, default_ancestor, nodes);
        }

        // Distribute extra space evenly among intermediate children
        Self::execute_shifts(v, nodes);

        // Center parent over first and last children
        let first_child_prelim = nodes[children[0]].prelim;
        let last_child_prelim = nodes[children[children.len() - 1]].prelim;
        let midpoint = (first_child_prelim + last_child_prelim) / 2.0;

        if let Some(w) = left_sibling {
            nodes[v].prelim = nodes[w].prelim + self.separation(v, w, nodes);
            nodes[v].modifier = nodes[v].prelim - midpoint;
        } else {
            nodes[v].prelim = midpoint;
        }
    }

    /// Separation in spread units between two adjacent nodes on one level.
    fn separation(&self, a: usize, b: usize, nodes: &[LayoutNode]) -> f64 {
        if nodes[a].parent == nodes[b].parent {
            self.config.sibling_separation
        } else {
            self.config.non_sibling_separation
        }
    }

    /// Get the next node on the right contour of a subtree.
    fn next_right(v: usize, nodes: &[LayoutNode]) -> Option<usize> {
        match nodes[v].children.last() {
            Some(&last_child) => Some(last_child),
            None => nodes[v].thread,
        }
    }

    /// Get the next node on the left contour of a subtree.
    fn next_left(v: usize, nodes: &[LayoutNode]) -> Option<usize> {
        match nodes[v].children.first() {
            Some(&first_child) => Some(first_child),
            None => nodes[v].thread,
        }
    }

    /// Apportion: push `v`'s subtree right until it clears the forest of its
    /// left siblings at every level, threading contours as they end.
    /// This is the core of Buchheim's linear-time improvement over Walker's algorithm.
    fn apportion(
        &self,
        v: usize,
        left_sibling: Option<usize>,
        mut default_ancestor: usize,
        nodes: &mut [LayoutNode],
    ) -> usize {
        let Some(w) = left_sibling else {
            return default_ancestor;
        };
        let Some(parent) = nodes[v].parent else {
            return default_ancestor;
        };

        // v_inner_right / v_inner_left: facing contours of the left forest and v
        // v_outer_left: left contour of the leftmost sibling
        // v_outer_right: right contour of v
        let mut v_inner_left = v;
        let mut v_outer_right = v;
        let mut v_inner_right = w;
        let mut v_outer_left = nodes[parent].children[0];

        let mut s_inner_left = nodes[v_inner_left].modifier;
        let mut s_outer_right = nodes[v_outer_right].modifier;
        let mut s_inner_right = nodes[v_inner_right].modifier;
        let mut s_outer_left = nodes[v_outer_left].modifier;

        let mut next_inner_right = Self::next_right(v_inner_right, nodes);
        let mut next_inner_left = Self::next_left(v_inner_left, nodes);

        while let (Some(ir), Some(il)) = (next_inner_right, next_inner_left) {
            v_inner_right = ir;
            v_inner_left = il;
            if let Some(next) = Self::next_left(v_outer_left, nodes) {
                v_outer_left = next;
            }
            if let Some(next) = Self::next_right(v_outer_right, nodes) {
                v_outer_right = next;
            }
            nodes[v_outer_right].ancestor = v;

            let shift = (nodes[v_inner_right].prelim + s_inner_right)
                - (nodes[v_inner_left].prelim + s_inner_left)
                + self.separation(v_inner_right, v_inner_left, nodes);

            if shift > 0.0 {
                let ancestor = Self::next_ancestor(v_inner_right, v, default_ancestor, nodes);
                Self::move_subtree(ancestor, v, shift, nodes);
                s_inner_left += shift;
                s_outer_right += shift;
            }

            s_inner_right += nodes[v_inner_right].modifier;
            s_inner_left += nodes[v_inner_left].modifier;
            s_outer_left += nodes[v_outer_left].modifier;
            s_outer_right += nodes[v_outer_right].modifier;

            next_inner_right = Self::next_right(v_inner_right, nodes);
            next_inner_left = Self::next_left(v_inner_left, nodes);
        }

        // Set threads
        if let Some(ir) = next_inner_right {
            if Self::next_right(v_outer_right, nodes).is_none() {
                nodes[v_outer_right].thread = Some(ir);
                nodes[v_outer_right].modifier += s_inner_right - s_outer_right;
            }
        }

        if let Some(il) = next_inner_left {
            if Self::next_left(v_outer_left, nodes).is_none() {
                nodes[v_outer_left].thread = Some(il);
                nodes[v_outer_left].modifier += s_inner_left - s_outer_left;
                default_ancestor = v;
            }
        }

        default_ancestor
    }

    /// The greatest distinct ancestor of `v_inner_right` that is a sibling of `v`,
    /// falling back to the default ancestor.
    fn next_ancestor(v_inner_right: usize, v: usize, default_ancestor: usize, nodes: &[LayoutNode]) -> usize {
        let candidate = nodes[v_inner_right].ancestor;
        if nodes[candidate].parent == nodes[v].parent {
            candidate
        } else {
            default_ancestor
        }
    }

    /// Move subtree: shift `wr` right and record the spread to distribute over
    /// the siblings between `wl` and `wr`.
    fn move_subtree(wl: usize, wr: usize, shift: f64, nodes: &mut [LayoutNode]) {
        let subtrees = nodes[wr].number.saturating_sub(nodes[wl].number).max(1) as f64;
        let per_subtree = shift / subtrees;

        nodes[wr].change -= per_subtree;
        nodes[wr].shift += shift;
        nodes[wl].change += per_subtree;
        nodes[wr].prelim += shift;
        nodes[wr].modifier += shift;
    }

    /// Execute accumulated shifts for children of node v.
    fn execute_shifts(v: usize, nodes: &mut [LayoutNode]) {
        let children = nodes[v].children.clone();
        let mut shift = 0.0;
        let mut change = 0.0;

        for &child in children.iter().rev() {
            nodes[child].prelim += shift;
            nodes[child].modifier += shift;
            change += nodes[child].change;
            shift += nodes[child].shift + change;
        }
    }

    /// Second walk: apply accumulated modifiers to get final coordinates.
    fn second_walk_collect(v: usize, modifier_sum: f64, nodes: &[LayoutNode], final_x: &mut [f64]) {
        final_x[v] = nodes[v].prelim + modifier_sum;

        for &child in &nodes[v].children {
            Self::second_walk_collect(child, modifier_sum + nodes[v].modifier, nodes, final_x);
        }
    }
}
