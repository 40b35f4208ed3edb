//! Spatial indexing for O(log n) hit testing.
//!
//! This module provides an R-tree based spatial index over the node centers
//! of a layout, used to map pointer positions back to nodes.

mod rtree;

pub use rtree::{NodePoint, SpatialIndex};
