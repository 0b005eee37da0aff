//! sl-graph: loop topology layer for solarloop.
//!
//! Provides:
//! - Index-based inlet/outlet links between components (`Topology`)
//! - The attach protocol (outlet of one component to inlet of the next)
//! - Closed-cycle validation and traversal
//!
//! Components themselves live elsewhere; the topology only stores which
//! component feeds which, addressed by `CompId`.
//!
//! # Example
//!
//! ```
//! use sl_graph::Topology;
//!
//! let mut topo = Topology::new();
//! let a = topo.add();
//! let b = topo.add();
//! topo.attach(a, b).unwrap();
//! topo.attach(b, a).unwrap();
//!
//! assert_eq!(topo.outlet(a), Some(b));
//! assert_eq!(topo.inlet(a), Some(b));
//! assert!(sl_graph::validate_closed_cycle(&topo).is_ok());
//! ```

pub mod error;
pub mod graph;
pub mod validate;

// Re-exports for ergonomics
pub use error::GraphError;
pub use graph::{Link, Topology};
pub use validate::{hops_to_return, validate_closed_cycle};
