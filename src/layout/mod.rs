//! Layout of the visible taxonomy.
//!
//! - `tidy_tree`: Buchheim tidy tree over an ordered child list
//! - `tree_layout`: orientation, visible nodes and parent/child links
//! - `link`: cubic link curves
//! - `shape`: glyph and label geometry hints for renderers

pub mod link;
pub mod shape;
pub mod tidy_tree;
pub mod tree_layout;

pub use link::{LinkCurve, Point};
pub use shape::{NODE_RADIUS, NodeGlyph, NodeShape};
pub use tidy_tree::{TidyTreeConfig, TidyTreeLayout, TidyTreeResult};
pub use tree_layout::{LinkEdge, SpreadAnchor, TreeLayout, TreeLayoutConfig, VisibleNode, layout};
