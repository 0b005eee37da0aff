//! Solar panel: a pipe heated towards a fixed equilibrium temperature.
//!
//! The panel is assumed to sit in thermal equilibrium (absorbed sunlight
//! balances its losses) and to have a heat capacity far larger than the
//! fluid's, so the panel itself has no temperature gradient. Under those
//! assumptions it behaves exactly like a pipe whose wall temperature is the
//! panel's steady temperature, with a very large transfer coefficient.

use crate::error::ComponentResult;
use crate::pipe::{BoundaryTemperature, DEFAULT_PIPE_CELLS, DEFAULT_PIPE_LENGTH_M, Pipe};
use crate::traits::ComponentKind;
use sl_core::LoopConfig;
use sl_core::numeric::{Real, ensure_finite};
use sl_core::units::{Length, m};

/// Default panel-to-fluid heat transfer coefficient (W/(m²·K)).
pub const DEFAULT_SOLAR_HEAT_TRANSFER: Real = 1.0e6;

impl Pipe {
    /// Create a solar panel channel held at `steady_temperature`.
    pub fn solar(
        name: impl Into<String>,
        length: Length,
        cells: usize,
        steady_temperature: Real,
        heat_transfer: Real,
        config: &LoopConfig,
    ) -> ComponentResult<Self> {
        ensure_finite(steady_temperature, "steady temperature")?;
        Self::with_boundary(
            name,
            "Solar panel",
            ComponentKind::Solar,
            length,
            cells,
            heat_transfer,
            BoundaryTemperature::Fixed(steady_temperature),
            config,
        )
    }

    /// Solar panel with default geometry and coupling, held at
    /// `config.steady_temperature`.
    pub fn solar_panel(name: impl Into<String>, config: &LoopConfig) -> ComponentResult<Self> {
        Self::solar(
            name,
            m(DEFAULT_PIPE_LENGTH_M),
            DEFAULT_PIPE_CELLS,
            config.steady_temperature,
            DEFAULT_SOLAR_HEAT_TRANSFER,
            config,
        )
    }
}
