//! Pump component model.

use crate::common::check_finite;
use crate::error::ComponentResult;
use crate::traits::{ComponentKind, FlowPort, PortState, Upstream};
use sl_core::numeric::{Real, ensure_non_negative};

/// Circulation pump.
///
/// Zero-dimensional: it has no temperature profile and passes its inlet
/// temperature straight to the outlet. The pump is where the loop's mass
/// flow rate originates, so flow rates arriving from upstream are ignored.
#[derive(Clone, Debug)]
pub struct Pump {
    name: String,
    port: PortState,
}

impl Pump {
    /// Create a pump delivering `flow_rate` (kg/s).
    ///
    /// # Errors
    /// Returns error if the flow rate is negative or either value is not finite.
    pub fn new(name: impl Into<String>, flow_rate: Real, temp_init: Real) -> ComponentResult<Self> {
        ensure_non_negative(flow_rate, "pump flow rate")?;
        check_finite(temp_init, "pump initial temperature")?;
        Ok(Self {
            name: name.into(),
            port: PortState::with_flow_rate(temp_init, flow_rate),
        })
    }
}

impl FlowPort for Pump {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ComponentKind {
        ComponentKind::Pump
    }

    fn port(&self) -> &PortState {
        &self.port
    }

    fn port_mut(&mut self) -> &mut PortState {
        &mut self.port
    }

    fn on_attach(&mut self, upstream: Upstream) {
        self.port.inlet_temperature = Some(upstream.outlet_temperature);
    }

    fn update(&mut self, upstream: Upstream) {
        self.port.inlet_temperature = Some(upstream.outlet_temperature);
        self.port.outlet_temperature = upstream.outlet_temperature;
    }
}
