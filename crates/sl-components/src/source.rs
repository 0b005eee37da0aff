//! Fixed-temperature boundary node.

use crate::common::check_finite;
use crate::error::ComponentResult;
use crate::traits::{ComponentKind, FlowPort, PortState, Upstream};
use sl_core::numeric::{Real, ensure_non_negative};

/// Flow rate of a constant source unless overridden (kg/s).
pub const DEFAULT_SOURCE_FLOW_RATE: Real = 1.0;

/// Feeds a fixed temperature and flow rate into whatever it is attached to.
///
/// Used to drive a single component in isolation. Nothing upstream changes
/// its state.
#[derive(Clone, Debug)]
pub struct ConstantSource {
    name: String,
    port: PortState,
}

impl ConstantSource {
    pub fn new(name: impl Into<String>, temperature: Real) -> ComponentResult<Self> {
        Self::with_flow_rate(name, temperature, DEFAULT_SOURCE_FLOW_RATE)
    }

    pub fn with_flow_rate(
        name: impl Into<String>,
        temperature: Real,
        flow_rate: Real,
    ) -> ComponentResult<Self> {
        check_finite(temperature, "source temperature")?;
        ensure_non_negative(flow_rate, "source flow rate")?;
        Ok(Self {
            name: name.into(),
            port: PortState::with_flow_rate(temperature, flow_rate),
        })
    }
}

impl FlowPort for ConstantSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ComponentKind {
        ComponentKind::ConstantSource
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

    fn update(&mut self, _upstream: Upstream) {}
}
