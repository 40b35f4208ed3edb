//! Taxonomy tree model and visibility pruning.
//!
//! The full taxonomy is immutable and caller-owned. This module provides the
//! node type, the expansion set, the pruner that derives the currently
//! visible subset, and an id index over the full tree.

mod catalog;
mod expansion;
mod index;
mod model;
mod prune;

pub use catalog::TaxonomyCatalog;
pub use expansion::ExpansionSet;
pub use index::TaxonomyIndex;
pub use model::{TaxonomyDetails, TaxonomyNode};
pub use prune::{PrunedNode, find_node_by_id, ids_with_children, prune};
