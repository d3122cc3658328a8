//! Error types for Blueprint operations.
//!
//! Every fallible operation returns [`BlueprintError`]. Errors are raised at
//! the offending call; a failed call never leaves a partially modified scene
//! or a partially written file behind.

use std::io;

use thiserror::Error;

/// The main error type for Blueprint operations.
#[derive(Debug, Error)]
pub enum BlueprintError {
    /// A node with this identifier already exists in the scene.
    #[error("duplicate node id `{0}`")]
    DuplicateId(String),

    /// An edge endpoint references a node that is not in the scene.
    #[error("unknown node `{0}`")]
    UnknownNode(String),

    /// The scene was frozen and can no longer be modified.
    #[error("scene is frozen")]
    SceneFrozen,

    /// An edge endpoint could not be resolved while laying out the scene.
    ///
    /// Scenes built through [`Scene`](crate::Scene) validate references on
    /// insertion, so this indicates an internal inconsistency.
    #[error("edge {edge} references unresolved node `{node}`")]
    UnresolvedEdge { edge: usize, node: String },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid scene: {0}")]
    InvalidScene(String),

    #[error("invalid node `{id}`: {reason}")]
    InvalidNode { id: String, reason: String },

    /// The edge's endpoints resolve to the same point.
    #[error("edge {0} has zero length")]
    DegenerateEdge(usize),

    #[error("export error: {0}")]
    Export(String),

    #[error("configuration error: {0}")]
    Config(String),
}
