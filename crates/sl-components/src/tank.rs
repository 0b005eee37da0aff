//! Insulated storage tank with uniform flow distribution.

use crate::common::{check_cells, check_profile, circle_area};
use crate::error::{ComponentError, ComponentResult};
use crate::traits::{ComponentKind, FlowPort, PortState, TimeVarying, Upstream};
use crate::tridiagonal::TridiagonalSystem;
use sl_core::LoopConfig;
use sl_core::numeric::{Real, ensure_positive};
use sl_core::units::Length;

/// Vertical storage tank split into horizontal layers.
///
/// Fluid enters the first layer and is pushed through the stack as a plug
/// across the whole cross-section. Walls are ideal insulation, so unlike a
/// pipe there is no exchange term: the inlet and outlet rows of the linear
/// system are pure Dirichlet rows.
#[derive(Debug, Clone)]
pub struct Tank {
    name: String,
    port: PortState,
    /// Tank radius
    pub radius: Length,
    /// Tank height along the flow direction
    pub height: Length,
    dt: Real,
    t_max: usize,
    temperature: Vec<Real>,
}

impl Tank {
    /// Create a tank with `layers` cells along its height.
    ///
    /// Initial temperature, `dt` and `t_max` come from `config`.
    pub fn new(
        name: impl Into<String>,
        radius: Length,
        height: Length,
        layers: usize,
        config: &LoopConfig,
    ) -> ComponentResult<Self> {
        ensure_positive(radius.value, "tank radius")?;
        ensure_positive(height.value, "tank height")?;
        ensure_positive(config.dt, "dt")?;
        let layers = check_cells(layers)?;

        Ok(Self {
            name: name.into(),
            port: PortState::new(config.temp_init),
            radius,
            height,
            dt: config.dt,
            t_max: config.t_max,
            temperature: vec![config.temp_init; layers],
        })
    }

    pub fn layers(&self) -> usize {
        self.temperature.len()
    }

    /// Layer height (m).
    pub fn dy(&self) -> Real {
        self.height.value / self.layers() as Real
    }

    /// Plug-flow velocity through the tank cross-section.
    pub fn velocity(&self, config: &LoopConfig, flow_rate: Real) -> Real {
        flow_rate / (config.rho * circle_area(self.radius.value))
    }
}

impl FlowPort for Tank {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ComponentKind {
        ComponentKind::Tank
    }

    fn port(&self) -> &PortState {
        &self.port
    }

    fn port_mut(&mut self) -> &mut PortState {
        &mut self.port
    }

    fn update(&mut self, upstream: Upstream) {
        self.port.receive(upstream);
        if let Some(&last) = self.temperature.last() {
            self.port.outlet_temperature = last;
        }
    }

    fn as_time_varying(&self) -> Option<&dyn TimeVarying> {
        Some(self)
    }

    fn as_time_varying_mut(&mut self) -> Option<&mut dyn TimeVarying> {
        Some(self)
    }
}

impl TimeVarying for Tank {
    fn title(&self) -> &str {
        "Storage tank"
    }

    fn dt(&self) -> Real {
        self.dt
    }

    fn t_max(&self) -> usize {
        self.t_max
    }

    fn temperature_profile(&self) -> &[Real] {
        &self.temperature
    }

    fn time_step(&mut self, config: &LoopConfig) -> ComponentResult<()> {
        let not_connected = || ComponentError::NotConnected {
            name: self.name.clone(),
        };
        let t_in = self.port.inlet_temperature.ok_or_else(not_connected)?;
        let flow_rate = self.port.flow_rate.ok_or_else(not_connected)?;

        let courant = self.velocity(config, flow_rate) * self.dt / self.dy();
        let n = self.layers();

        let mut system = TridiagonalSystem::new(n + 2);
        system.set_row(0, 0.0, 1.0, 0.0, t_in);
        for (i, &t) in self.temperature.iter().enumerate() {
            system.set_row(i + 1, -courant, 1.0 + courant, 0.0, t);
        }
        system.set_row(n + 1, 0.0, 1.0, 0.0, 0.0);

        let solution = system.solve()?;
        check_profile(&solution[1..=n], "tank temperature")?;
        self.temperature.copy_from_slice(&solution[1..=n]);
        Ok(())
    }
}
