//! Topology-specific error types.

use sl_core::CompId;

/// Loop wiring and validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// The topology holds no components.
    Empty,

    /// An id does not refer to a component in this topology.
    UnknownComponent { comp: CompId, len: usize },

    /// A component has no outlet, so the chain ends instead of looping.
    OpenChain { comp: CompId },

    /// Following outlets from `start` does not come back after exactly `len` hops.
    NotClosed { start: CompId, len: usize },
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphError::Empty => write!(f, "Topology has no components"),
            GraphError::UnknownComponent { comp, len } => {
                write!(
                    f,
                    "Component {} does not exist (topology has {})",
                    comp, len
                )
            }
            GraphError::OpenChain { comp } => {
                write!(f, "Component {} has no outlet attached", comp)
            }
            GraphError::NotClosed { start, len } => {
                write!(
                    f,
                    "Following outlets from component {} does not return after {} hops",
                    start, len
                )
            }
        }
    }
}

impl std::error::Error for GraphError {}
