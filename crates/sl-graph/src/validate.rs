//! Loop validation logic.

use sl_core::CompId;

use crate::error::GraphError;
use crate::graph::Topology;

/// Number of outlet hops needed to get from `start` back to `start`.
pub fn hops_to_return(topology: &Topology, start: CompId) -> Result<usize, GraphError> {
    topology.cycle_from(start).map(|order| order.len())
}

/// Validate that the topology is one closed cycle through every component.
///
/// From each component, following outlets must come back to it after exactly
/// `len` hops. A shorter return means the loop skips components.
pub fn validate_closed_cycle(topology: &Topology) -> Result<(), GraphError> {
    if topology.is_empty() {
        return Err(GraphError::Empty);
    }

    for id in topology.ids() {
        let hops = hops_to_return(topology, id)?;
        if hops != topology.len() {
            return Err(GraphError::NotClosed {
                start: id,
                len: topology.len(),
            });
        }

        // outlet/inlet links must agree around the ring
        let next = topology.next(id)?;
        if topology.inlet(next) != Some(id) {
            return Err(GraphError::NotClosed {
                start: id,
                len: topology.len(),
            });
        }
    }

    Ok(())
}
