//! Structural consistency errors reported by [`crate::VirusGenealogy::validate`].

use thiserror::Error;
use vg_core::{SlotId, VgError};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// The table maps an id to a slot that holds no node.
    #[error("Table entry {id} points at dead slot {slot}")]
    DeadTableEntry { id: String, slot: SlotId },

    /// The node stored under a table key reports a different id.
    #[error("Table key {id} holds virus {actual}")]
    KeyMismatch { id: String, actual: String },

    /// A live node that the table does not know about.
    #[error("Node {id} in slot {slot} is missing from the table")]
    Untracked { id: String, slot: SlotId },

    /// A child entry without the matching parent entry.
    #[error("Edge {parent} -> {child} has no back-reference")]
    MissingBackRef { parent: String, child: String },

    /// A parent entry without the matching child entry.
    #[error("Back-reference {child} -> {parent} has no forward edge")]
    MissingForwardRef { parent: String, child: String },

    /// An edge that points at a slot no longer holding that node.
    #[error("Edge between {from} and {to} points at a dead slot")]
    DanglingEdge { from: String, to: String },

    #[error("Stem {id} has parents")]
    StemHasParents { id: String },

    #[error("Virus {id} has no parents")]
    Orphan { id: String },

    #[error("Virus {id} is not reachable from the stem")]
    Unreachable { id: String },

    /// The recorded back edge count disagrees with the edges present.
    #[error("Back edge count is {recorded}, graph has {actual}")]
    BackEdgeCount { recorded: usize, actual: usize },
}

impl From<GraphError> for VgError {
    fn from(err: GraphError) -> Self {
        VgError::Invariant {
            what: err.to_string(),
        }
    }
}
