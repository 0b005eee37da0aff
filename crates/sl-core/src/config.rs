//! Physical and simulation parameters for a heating loop.

use crate::error::SlResult;
use crate::numeric::{Real, ensure_finite, ensure_non_negative, ensure_positive};
use crate::units::{Length, Time, m, s};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Read-only parameter bag handed to every component and to the simulation.
///
/// Defaults describe a water loop with a 0.1 m port radius, run for 800 one-second
/// steps.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LoopConfig {
    /// Fluid heat capacity (J/(kg·K))
    #[cfg_attr(feature = "serde", serde(alias = "Cp"))]
    pub cp: Real,
    /// Fluid density (kg/m³)
    pub rho: Real,
    /// Environment temperature around pipes
    #[cfg_attr(feature = "serde", serde(alias = "T_env"))]
    pub t_env: Real,
    /// Radius shared by every pipe and by the solar panel channel (m)
    pub port_radius: Real,
    /// Time discretization step (s)
    pub dt: Real,
    /// Number of time steps to simulate
    pub t_max: usize,
    /// Equilibrium temperature of the solar panel
    pub steady_temperature: Real,
    /// Initial temperature of the fluid everywhere in the loop
    pub temp_init: Real,
    /// Mass flow rate supplied by the pump (kg/s)
    pub flow_rate: Real,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            cp: 4180.0,
            rho: 1000.0,
            t_env: 280.0,
            port_radius: 0.1,
            dt: 1.0,
            t_max: 800,
            steady_temperature: 600.0,
            temp_init: 400.0,
            flow_rate: 20.0,
        }
    }
}

impl LoopConfig {
    /// Check that every parameter describes a physical setup.
    pub fn validate(&self) -> SlResult<()> {
        ensure_positive(self.cp, "cp")?;
        ensure_positive(self.rho, "rho")?;
        ensure_positive(self.port_radius, "port_radius")?;
        ensure_positive(self.dt, "dt")?;
        ensure_non_negative(self.flow_rate, "flow_rate")?;
        ensure_finite(self.t_env, "t_env")?;
        ensure_finite(self.steady_temperature, "steady_temperature")?;
        ensure_finite(self.temp_init, "temp_init")?;
        Ok(())
    }

    /// Port radius as a length.
    pub fn pipe_radius(&self) -> Length {
        m(self.port_radius)
    }

    /// Simulated time covered by `t_max` steps.
    pub fn duration(&self) -> Time {
        s(self.dt * self.t_max as Real)
    }
}
