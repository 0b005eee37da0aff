//! Core traits for loop components.
//!
//! Every component carries fluid from an inlet to an outlet (`FlowPort`).
//! Components with an internal temperature profile also advance in time
//! (`TimeVarying`). Pumps and constant sources only implement the first.

use crate::error::ComponentResult;
use sl_core::LoopConfig;
use sl_core::numeric::Real;

/// Kind of loop element.
///
/// A loop must contain exactly one `Pump`; the simulation anchors its
/// propagate phase on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Pump,
    Pipe,
    Solar,
    Tank,
    ConstantSource,
}

/// Boundary values held by every component.
#[derive(Debug, Clone, PartialEq)]
pub struct PortState {
    /// Initial/reference temperature
    pub temp_init: Real,
    /// Temperature arriving from upstream; unset until attached or updated
    pub inlet_temperature: Option<Real>,
    /// Temperature leaving through the outlet
    pub outlet_temperature: Real,
    /// Mass flow through the component (kg/s); unset until known
    pub flow_rate: Option<Real>,
}

impl PortState {
    /// Unconnected port whose outlet starts at `temp_init`.
    pub fn new(temp_init: Real) -> Self {
        Self {
            temp_init,
            inlet_temperature: None,
            outlet_temperature: temp_init,
            flow_rate: None,
        }
    }

    /// Port of a component that originates its own flow.
    pub fn with_flow_rate(temp_init: Real, flow_rate: Real) -> Self {
        Self {
            flow_rate: Some(flow_rate),
            ..Self::new(temp_init)
        }
    }

    /// Copy upstream outlet values into this port's inlet side.
    pub fn receive(&mut self, upstream: Upstream) {
        self.inlet_temperature = Some(upstream.outlet_temperature);
        self.flow_rate = upstream.flow_rate;
    }
}

/// Outlet values of an upstream neighbour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Upstream {
    pub outlet_temperature: Real,
    pub flow_rate: Option<Real>,
}

/// Fluid-carrying element with one inlet and one outlet.
///
/// Neighbours are not stored here: the owning circuit keeps inlet/outlet
/// links by index and hands the upstream outlet values in.
pub trait FlowPort: std::fmt::Debug + Send {
    /// Component name for debugging and identification.
    fn name(&self) -> &str;

    fn kind(&self) -> ComponentKind;

    fn port(&self) -> &PortState;

    fn port_mut(&mut self) -> &mut PortState;

    fn temp_init(&self) -> Real {
        self.port().temp_init
    }

    fn inlet_temperature(&self) -> Option<Real> {
        self.port().inlet_temperature
    }

    fn outlet_temperature(&self) -> Real {
        self.port().outlet_temperature
    }

    fn flow_rate(&self) -> Option<Real> {
        self.port().flow_rate
    }

    /// Outlet values as seen by the downstream neighbour.
    fn upstream(&self) -> Upstream {
        Upstream {
            outlet_temperature: self.outlet_temperature(),
            flow_rate: self.flow_rate(),
        }
    }

    /// Downstream half of `attach`: record the upstream outlet temperature.
    ///
    /// A known upstream flow rate is seeded as well, so a component fed by a
    /// constant source can be stepped right after attachment.
    fn on_attach(&mut self, upstream: Upstream) {
        let port = self.port_mut();
        port.inlet_temperature = Some(upstream.outlet_temperature);
        if upstream.flow_rate.is_some() {
            port.flow_rate = upstream.flow_rate;
        }
    }

    /// Pull the upstream neighbour's outlet temperature and flow rate.
    fn update(&mut self, upstream: Upstream) {
        self.port_mut().receive(upstream);
    }

    fn as_time_varying(&self) -> Option<&dyn TimeVarying> {
        None
    }

    fn as_time_varying_mut(&mut self) -> Option<&mut dyn TimeVarying> {
        None
    }
}

/// Component whose internal temperature profile evolves in time.
pub trait TimeVarying {
    /// Human-readable label for observers.
    fn title(&self) -> &str;

    /// Time step fixed at construction (s).
    fn dt(&self) -> Real;

    /// Number of steps the component was set up for.
    fn t_max(&self) -> usize;

    /// One temperature per cell, index 0 nearest the inlet.
    fn temperature_profile(&self) -> &[Real];

    /// Advance the profile by one step using the current inlet values.
    ///
    /// Fails with `NotConnected` if no inlet temperature or flow rate has been
    /// received yet.
    fn time_step(&mut self, config: &LoopConfig) -> ComponentResult<()>;
}
