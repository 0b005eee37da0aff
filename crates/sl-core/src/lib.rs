//! sl-core: stable foundation for solarloop.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - numeric (Real + tolerances + float helpers)
//! - ids (stable compact IDs for components in a loop)
//! - config (physical and simulation parameters shared by every component)
//! - error (shared error types)

pub mod config;
pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use config::LoopConfig;
pub use error::{SlError, SlResult};
pub use ids::*;
pub use numeric::*;
pub use units::*;
