//! Pipe component with advection and convective wall exchange.

use crate::common::{check_cells, check_profile, circle_area};
use crate::error::{ComponentError, ComponentResult};
use crate::traits::{ComponentKind, FlowPort, PortState, TimeVarying, Upstream};
use crate::tridiagonal::TridiagonalSystem;
use sl_core::LoopConfig;
use sl_core::numeric::{Real, ensure_non_negative, ensure_positive};
use sl_core::units::Length;

/// Default pipe length (m).
pub const DEFAULT_PIPE_LENGTH_M: Real = 50.0;

/// Default number of cells along a pipe.
pub const DEFAULT_PIPE_CELLS: usize = 500;

/// Temperature the pipe wall exchanges heat with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundaryTemperature {
    /// Surrounding environment, `LoopConfig::t_env`.
    Environment,
    /// Fixed source temperature, e.g. a solar panel in thermal equilibrium.
    Fixed(Real),
}

impl BoundaryTemperature {
    pub fn temperature(&self, config: &LoopConfig) -> Real {
        match *self {
            BoundaryTemperature::Environment => config.t_env,
            BoundaryTemperature::Fixed(t) => t,
        }
    }
}

/// Thin straight conduit discretized into cells along its length.
///
/// The pipe radius is small enough that there is no radial temperature
/// gradient and the flow is frictionless. Each step solves
///
/// ```text
/// ∂T/∂t + a ∂T/∂x = b (T_b - T)
/// ```
///
/// with an implicit upwind scheme, where `a` is the fluid velocity and `b` the
/// wall exchange rate towards the boundary temperature `T_b`.
#[derive(Debug, Clone)]
pub struct Pipe {
    name: String,
    title: String,
    kind: ComponentKind,
    port: PortState,
    /// Pipe length
    pub length: Length,
    /// Pipe inner radius
    pub radius: Length,
    /// Wall-to-fluid heat transfer coefficient (W/(m²·K))
    pub heat_transfer: Real,
    boundary: BoundaryTemperature,
    dt: Real,
    t_max: usize,
    temperature: Vec<Real>,
}

impl Pipe {
    /// Create a pipe exchanging heat with the environment.
    ///
    /// Radius, initial temperature, `dt` and `t_max` come from `config`.
    ///
    /// # Errors
    /// Returns error if geometry is non-positive, `cells` is zero or the heat
    /// transfer coefficient is negative.
    pub fn new(
        name: impl Into<String>,
        length: Length,
        cells: usize,
        heat_transfer: Real,
        config: &LoopConfig,
    ) -> ComponentResult<Self> {
        Self::with_boundary(
            name,
            "Pipe",
            ComponentKind::Pipe,
            length,
            cells,
            heat_transfer,
            BoundaryTemperature::Environment,
            config,
        )
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn with_boundary(
        name: impl Into<String>,
        title: &str,
        kind: ComponentKind,
        length: Length,
        cells: usize,
        heat_transfer: Real,
        boundary: BoundaryTemperature,
        config: &LoopConfig,
    ) -> ComponentResult<Self> {
        ensure_positive(length.value, "pipe length")?;
        ensure_positive(config.port_radius, "pipe radius")?;
        ensure_non_negative(heat_transfer, "heat transfer coefficient")?;
        ensure_positive(config.dt, "dt")?;
        let cells = check_cells(cells)?;

        Ok(Self {
            name: name.into(),
            title: title.to_string(),
            kind,
            port: PortState::new(config.temp_init),
            length,
            radius: config.pipe_radius(),
            heat_transfer,
            boundary,
            dt: config.dt,
            t_max: config.t_max,
            temperature: vec![config.temp_init; cells],
        })
    }

    pub fn cells(&self) -> usize {
        self.temperature.len()
    }

    /// Cell length along the pipe (m).
    pub fn dl(&self) -> Real {
        self.length.value / self.cells() as Real
    }

    /// Temperature the wall exchanges heat with.
    pub fn rhs_temperature(&self, config: &LoopConfig) -> Real {
        self.boundary.temperature(config)
    }

    /// Advection coefficient `a` (fluid velocity) and wall exchange
    /// coefficient `b` for the given flow rate.
    pub fn coefficients(&self, config: &LoopConfig, flow_rate: Real) -> (Real, Real) {
        let r = self.radius.value;
        let dl = self.dl();
        let cross_section = circle_area(r);
        let lateral_area = 2.0 * std::f64::consts::PI * r * dl;
        let volume = cross_section * dl;

        let a = flow_rate / (config.rho * cross_section);
        let b = self.dt * self.heat_transfer * lateral_area / (config.rho * config.cp * volume);
        (a, b)
    }

    fn not_connected(&self) -> ComponentError {
        ComponentError::NotConnected {
            name: self.name.clone(),
        }
    }
}

impl FlowPort for Pipe {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ComponentKind {
        self.kind
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

impl TimeVarying for Pipe {
    fn title(&self) -> &str {
        &self.title
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
        let t_in = self
            .port
            .inlet_temperature
            .ok_or_else(|| self.not_connected())?;
        let flow_rate = self.port.flow_rate.ok_or_else(|| self.not_connected())?;

        let (a, b) = self.coefficients(config, flow_rate);
        let t_b = self.rhs_temperature(config);
        let courant = a * self.dt / self.dl();
        let n = self.cells();

        // Ghost rows 0 and n+1 carry the inlet value and a decoupled outlet.
        let mut system = TridiagonalSystem::new(n + 2);
        system.set_row(0, 0.0, 1.0 + b, 0.0, t_in + t_b * b);
        for (i, &t) in self.temperature.iter().enumerate() {
            system.set_row(i + 1, -courant, 1.0 + courant + b, 0.0, t + t_b * b);
        }
        system.set_row(n + 1, 0.0, 1.0 + b, 0.0, 0.0);

        let solution = system.solve()?;
        check_profile(&solution[1..=n], "pipe temperature")?;
        self.temperature.copy_from_slice(&solution[1..=n]);
        Ok(())
    }
}
