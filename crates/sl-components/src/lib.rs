//! sl-components: elements of a closed solar heating loop.
//!
//! Provides models for:
//! - Pipes losing heat to the environment
//! - Solar panels (a pipe held at an equilibrium temperature)
//! - Insulated storage tanks
//! - The circulation pump and a constant source for isolated testing
//!
//! Every component implements `FlowPort`. Components with an internal
//! temperature profile also implement `TimeVarying` and advance it with an
//! implicit upwind scheme solved as a tridiagonal system.
//!
//! # Example
//!
//! ```
//! use sl_components::{ConstantSource, FlowPort, Pipe, TimeVarying};
//! use sl_core::{LoopConfig, m};
//!
//! let config = LoopConfig::default();
//! let source = ConstantSource::new("source", config.temp_init).unwrap();
//! let mut pipe = Pipe::new("pipe", m(10.0), 20, 0.0, &config).unwrap();
//!
//! pipe.on_attach(source.upstream());
//! pipe.time_step(&config).unwrap();
//! assert_eq!(pipe.temperature_profile().len(), 20);
//! ```

pub mod common;
pub mod error;
pub mod pipe;
pub mod pump;
pub mod solar;
pub mod source;
pub mod tank;
pub mod traits;
pub mod tridiagonal;

pub use error::{ComponentError, ComponentResult};
pub use pipe::{BoundaryTemperature, DEFAULT_PIPE_CELLS, DEFAULT_PIPE_LENGTH_M, Pipe};
pub use pump::Pump;
pub use solar::DEFAULT_SOLAR_HEAT_TRANSFER;
pub use source::{ConstantSource, DEFAULT_SOURCE_FLOW_RATE};
pub use tank::Tank;
pub use traits::{ComponentKind, FlowPort, PortState, TimeVarying, Upstream};
pub use tridiagonal::TridiagonalSystem;
