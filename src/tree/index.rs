//! TaxonomyIndex - id lookup and ancestry over the full tree.
//!
//! The index stores the taxonomy topology in petgraph's StableGraph, with a
//! map from string ids to graph indices. It validates the unique-id
//! invariant once, when a tree is installed, and then answers the questions
//! the engine asks about the full tree: which ancestors must be expanded to
//! reveal a node, and where a selected node sits after the content changes.

use std::collections::HashMap;
use std::rc::Rc;

use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::{Directed, Direction};

use super::model::TaxonomyNode;
use crate::error::TreeError;

/// Read-only index over one taxonomy.
#[derive(Debug)]
pub struct TaxonomyIndex {
    /// Nodes hold a handle to the original taxonomy node; edges run parent → child.
    graph: StableGraph<Rc<TaxonomyNode>, (), Directed>,

    /// Map from node id to graph index
    id_to_index: HashMap<String, NodeIndex>,
}

impl TaxonomyIndex {
    /// Index a taxonomy, rejecting duplicate ids.
    pub fn build(root: &Rc<TaxonomyNode>) -> Result<Self, TreeError> {
        let capacity = root.subtree_size();
        let mut graph = StableGraph::with_capacity(capacity, capacity.saturating_sub(1));
        let mut id_to_index = HashMap::with_capacity(capacity);

        let root_index = graph.add_node(Rc::clone(root));
        id_to_index.insert(root.id.clone(), root_index);

        let mut stack = vec![(root_index, Rc::clone(root))];
        while let Some((parent_index, parent)) = stack.pop() {
            for child in &parent.children {
                if id_to_index.contains_key(&child.id) {
                    return Err(TreeError::DuplicateId(child.id.clone()));
                }
                let child_index = graph.add_node(Rc::clone(child));
                graph.add_edge(parent_index, child_index, ());
                id_to_index.insert(child.id.clone(), child_index);
                stack.push((child_index, Rc::clone(child)));
            }
        }

        Ok(Self {
            graph,
            id_to_index,
        })
    }

    /// Number of nodes in the taxonomy.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    /// Whether the index is empty (never true for a built index).
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Look up a node by id.
    pub fn get(&self, id: &str) -> Option<&Rc<TaxonomyNode>> {
        self.id_to_index.get(id).map(|&index| &self.graph[index])
    }

    /// Whether the node owns children in the full tree. False for unknown ids.
    pub fn has_children(&self, id: &str) -> bool {
        self.id_to_index
            .get(id)
            .map(|&index| {
                self.graph
                    .neighbors_directed(index, Direction::Outgoing)
                    .next()
                    .is_some()
            })
            .unwrap_or(false)
    }

    /// Ids of all strict ancestors, root first.
    pub fn ancestors(&self, id: &str) -> Result<Vec<String>, TreeError> {
        let &start = self
            .id_to_index
            .get(id)
            .ok_or_else(|| TreeError::UnknownId(id.to_owned()))?;

        let mut chain = Vec::new();
        let mut current = start;
        while let Some(parent) = self
            .graph
            .neighbors_directed(current, Direction::Incoming)
            .next()
        {
            chain.push(self.graph[parent].id.clone());
            current = parent;
        }
        chain.reverse();
        Ok(chain)
    }

    /// Depth of a node (root = 0).
    pub fn depth(&self, id: &str) -> Option<usize> {
        self.ancestors(id).ok().map(|chain| chain.len())
    }
}
