//! Closed-loop simulation of a solar heating circuit.
//!
//! Provides:
//! - `Circuit`: owned components plus their inlet/outlet links
//! - `LoopSimulation`: the single-pump loop with its propagate/integrate cycle
//! - `Observer` hook for reading temperature profiles while running
//! - `SimRecord` of outlet temperatures over time
//!
//! # Example
//!
//! ```
//! use sl_components::{FlowPort, Pipe, Pump, Tank};
//! use sl_core::{LoopConfig, m};
//! use sl_sim::LoopSimulation;
//!
//! let config = LoopConfig { t_max: 10, ..LoopConfig::default() };
//! let components: Vec<Box<dyn FlowPort>> = vec![
//!     Box::new(Pipe::solar_panel("solar", &config).unwrap()),
//!     Box::new(Pump::new("pump", config.flow_rate, config.temp_init).unwrap()),
//!     Box::new(Tank::new("tank", m(0.2), m(50.0), 100, &config).unwrap()),
//! ];
//!
//! let mut sim = LoopSimulation::new(components, config).unwrap();
//! let record = sim.simulate().unwrap();
//! assert_eq!(record.t.len(), 11);
//! ```

pub mod circuit;
pub mod error;
pub mod network;
pub mod observer;
pub mod reference;

pub use circuit::Circuit;
pub use error::{SimError, SimResult};
pub use network::{LoopSimulation, SimOptions, SimRecord};
pub use observer::{Observer, ProfileSnapshot, TracingObserver};
pub use reference::reference_loop;
