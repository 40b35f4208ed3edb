//! Error types.
//!
//! Every error here is a violated precondition on caller-supplied data (the
//! tree model's unique-id invariant). Degenerate viewports and out-of-range
//! zoom requests are not errors; they are no-ops or clamped.

use thiserror::Error;

/// Problems with a taxonomy supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// Two nodes share the same id.
    #[error("duplicate taxonomy node id `{0}`")]
    DuplicateId(String),
    /// An operation referenced an id that is not in the tree.
    #[error("unknown taxonomy node id `{0}`")]
    UnknownId(String),
}

/// Invariant violations detected while laying out a pruned tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// Two visible nodes share the same id.
    #[error("duplicate visible node id `{0}`")]
    DuplicateId(String),
    /// A link endpoint could not be resolved from the laid-out nodes.
    #[error("link endpoint `{id}` missing from laid-out nodes")]
    MissingEndpoint {
        /// The id that failed to resolve.
        id: String,
    },
}

/// Umbrella error for visualizer operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Tree model error.
    #[error(transparent)]
    Tree(#[from] TreeError),
    /// Layout error.
    #[error(transparent)]
    Layout(#[from] LayoutError),
}
