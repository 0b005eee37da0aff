//! Core topology data structures.

use sl_core::CompId;

use crate::error::GraphError;

/// Upstream and downstream neighbours of one component.
///
/// Both sides start unset; `Topology::attach` fills them in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Link {
    /// Component whose outlet feeds this component.
    pub inlet: Option<CompId>,
    /// Component fed by this component's outlet.
    pub outlet: Option<CompId>,
}

/// Inlet/outlet links for a flat collection of components.
///
/// Component `i` of the owning collection is addressed by `CompId::from_usize(i)`.
/// Links are plain ids, so a closed loop is just a ring of indices with no
/// ownership between components.
#[derive(Debug, Clone, Default)]
pub struct Topology {
    pub(crate) links: Vec<Link>,
}

impl Topology {
    /// Create an empty topology.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a topology with `len` unconnected components.
    pub fn with_len(len: usize) -> Self {
        Self {
            links: vec![Link::default(); len],
        }
    }

    /// Register one more unconnected component and return its id.
    pub fn add(&mut self) -> CompId {
        let id = CompId::from_usize(self.links.len());
        self.links.push(Link::default());
        id
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// All component ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = CompId> + '_ {
        (0..self.links.len()).map(CompId::from_usize)
    }

    /// Get the links of a component (returns None if ID out of bounds).
    pub fn link(&self, id: CompId) -> Option<&Link> {
        self.links.get(id.as_usize())
    }

    pub fn inlet(&self, id: CompId) -> Option<CompId> {
        self.link(id).and_then(|l| l.inlet)
    }

    pub fn outlet(&self, id: CompId) -> Option<CompId> {
        self.link(id).and_then(|l| l.outlet)
    }

    /// Wire the outlet of `from` into the inlet of `to`.
    ///
    /// Attaching again from the same component replaces its previous outlet.
    /// The previous downstream component keeps its stale inlet link; closing a
    /// loop relies on this last-write-wins behaviour.
    pub fn attach(&mut self, from: CompId, to: CompId) -> Result<(), GraphError> {
        self.check(from)?;
        self.check(to)?;
        self.links[from.as_usize()].outlet = Some(to);
        self.links[to.as_usize()].inlet = Some(from);
        Ok(())
    }

    /// Downstream neighbour of `id`, or `OpenChain` if none is attached.
    pub fn next(&self, id: CompId) -> Result<CompId, GraphError> {
        self.check(id)?;
        self.outlet(id).ok_or(GraphError::OpenChain { comp: id })
    }

    /// Components visited by following outlets from `start` until it comes back,
    /// `start` first.
    pub fn cycle_from(&self, start: CompId) -> Result<Vec<CompId>, GraphError> {
        self.check(start)?;
        let mut order = vec![start];
        let mut current = self.next(start)?;
        while current != start {
            if order.len() >= self.len() {
                return Err(GraphError::NotClosed {
                    start,
                    len: self.len(),
                });
            }
            order.push(current);
            current = self.next(current)?;
        }
        Ok(order)
    }

    pub(crate) fn check(&self, id: CompId) -> Result<(), GraphError> {
        if id.as_usize() < self.links.len() {
            Ok(())
        } else {
            Err(GraphError::UnknownComponent {
                comp: id,
                len: self.links.len(),
            })
        }
    }
}
