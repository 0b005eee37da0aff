//! Closed-loop simulation: propagate boundary values, then integrate.

use sl_components::{ComponentKind, FlowPort};
use sl_core::{CompId, LoopConfig, Real};
use sl_graph::validate_closed_cycle;

use crate::circuit::Circuit;
use crate::error::{SimError, SimResult};
use crate::observer::{Observer, ProfileSnapshot};

/// Options for simulation runs.
#[derive(Clone, Debug)]
pub struct SimOptions {
    /// Record every N-th iteration (decimation)
    pub record_every: usize,
    /// Hand snapshots to the observer every N-th iteration
    pub observe_every: usize,
    /// Log progress every N-th iteration
    pub progress_every: usize,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            record_every: 1,
            observe_every: 2,
            progress_every: 20,
        }
    }
}

impl SimOptions {
    fn validate(&self) -> SimResult<()> {
        if self.record_every == 0 {
            return Err(SimError::InvalidArg {
                what: "record_every must be positive",
            });
        }
        if self.observe_every == 0 {
            return Err(SimError::InvalidArg {
                what: "observe_every must be positive",
            });
        }
        if self.progress_every == 0 {
            return Err(SimError::InvalidArg {
                what: "progress_every must be positive",
            });
        }
        Ok(())
    }
}

/// Outlet temperatures of every component over time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SimRecord {
    /// Component names, in the order they were supplied
    pub names: Vec<String>,
    /// Time points (seconds)
    pub t: Vec<Real>,
    /// Outlet temperatures, one row per time point, one column per component
    pub outlet_temperatures: Vec<Vec<Real>>,
}

impl SimRecord {
    /// Last recorded outlet temperature of every component.
    pub fn final_outlets(&self) -> Option<&[Real]> {
        self.outlet_temperatures.last().map(Vec::as_slice)
    }
}

/// A single-pump heating loop stepped with a two-phase scheme.
///
/// Each iteration first propagates outlet temperatures and flow rates once
/// around the loop, starting downstream of the pump, and then advances every
/// time-varying component by `dt` in loop order starting at the first
/// component supplied.
#[derive(Debug)]
pub struct LoopSimulation {
    circuit: Circuit,
    config: LoopConfig,
    pump: CompId,
    root: CompId,
    iteration: usize,
}

impl LoopSimulation {
    /// Close `components` into a loop in the order given.
    ///
    /// # Errors
    /// - `Config` if `config` is not physical
    /// - `Topology` unless exactly one component is a pump
    pub fn new(components: Vec<Box<dyn FlowPort>>, config: LoopConfig) -> SimResult<Self> {
        config.validate()?;

        let pumps: Vec<usize> = components
            .iter()
            .enumerate()
            .filter(|(_, c)| c.kind() == ComponentKind::Pump)
            .map(|(i, _)| i)
            .collect();
        if pumps.len() != 1 {
            return Err(SimError::Topology { pumps: pumps.len() });
        }
        let pump = CompId::from_usize(pumps[0]);

        let mut circuit = Circuit::new();
        let ids: Vec<CompId> = components.into_iter().map(|c| circuit.add(c)).collect();
        let root = ids[0];
        for pair in ids.windows(2) {
            circuit.attach(pair[0], pair[1])?;
        }
        if let Some(&last) = ids.last() {
            circuit.attach(last, root)?;
        }
        validate_closed_cycle(circuit.topology())?;

        let mut sim = Self {
            circuit,
            config,
            pump,
            root,
            iteration: 0,
        };
        sim.propagate_until_pump()?;
        tracing::debug!(components = sim.circuit.len(), "loop closed");
        Ok(sim)
    }

    pub fn config(&self) -> &LoopConfig {
        &self.config
    }

    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    pub fn pump(&self) -> CompId {
        self.pump
    }

    pub fn root(&self) -> CompId {
        self.root
    }

    /// Iterations completed so far.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Simulated time so far (s).
    pub fn time(&self) -> Real {
        self.iteration as Real * self.config.dt
    }

    pub fn component(&self, id: CompId) -> SimResult<&dyn FlowPort> {
        self.circuit.component(id)
    }

    /// Snapshots of every time-varying component, in loop order from the root.
    pub fn snapshots(&self) -> SimResult<Vec<ProfileSnapshot<'_>>> {
        Ok(self
            .loop_order()?
            .into_iter()
            .filter_map(|id| self.circuit.snapshot(id))
            .collect())
    }

    /// Update every component from the pump's outlet back round to the pump,
    /// then the pump itself.
    pub fn propagate(&mut self) -> SimResult<()> {
        self.propagate_until_pump()?;
        self.circuit.update(self.pump)
    }

    fn propagate_until_pump(&mut self) -> SimResult<()> {
        let mut current = self.next(self.pump)?;
        let mut visited = 0;
        while current != self.pump {
            if visited >= self.circuit.len() {
                return Err(SimError::Invariant {
                    what: "propagation did not return to the pump",
                });
            }
            self.circuit.update(current)?;
            current = self.next(current)?;
            visited += 1;
        }
        Ok(())
    }

    /// Advance every component once, in loop order from the root.
    pub fn integrate(&mut self) -> SimResult<()> {
        for id in self.loop_order()? {
            self.circuit.time_step(id, &self.config)?;
        }
        Ok(())
    }

    /// One iteration without an observer.
    pub fn step(&mut self) -> SimResult<()> {
        self.propagate()?;
        self.integrate()?;
        self.iteration += 1;
        Ok(())
    }

    /// Run `t_max` iterations and record outlet temperatures every iteration.
    pub fn simulate(&mut self) -> SimResult<SimRecord> {
        let mut none = |_: usize, _: &[ProfileSnapshot<'_>]| {};
        self.run(&SimOptions::default(), &mut none, false)
    }

    /// Run `t_max` iterations, handing snapshots to `observer` as configured.
    pub fn simulate_with(
        &mut self,
        opts: &SimOptions,
        observer: &mut dyn Observer,
    ) -> SimResult<SimRecord> {
        self.run(opts, observer, true)
    }

    fn run(
        &mut self,
        opts: &SimOptions,
        observer: &mut dyn Observer,
        observe: bool,
    ) -> SimResult<SimRecord> {
        opts.validate()?;

        let mut record = SimRecord {
            names: self
                .circuit
                .ids()
                .map(|id| self.circuit.component(id).map(|c| c.name().to_string()))
                .collect::<SimResult<_>>()?,
            ..SimRecord::default()
        };
        self.record(&mut record)?;

        let t_max = self.config.t_max;
        for n in 0..t_max {
            self.propagate()?;
            if observe && n % opts.observe_every == 0 {
                let snapshots = self.snapshots()?;
                observer.observe(self.iteration, &snapshots);
            }
            self.integrate()?;
            self.iteration += 1;
            tracing::debug!(iteration = self.iteration, "step complete");

            if self.iteration % opts.progress_every == 0 {
                tracing::info!(iteration = self.iteration, t_max, "simulating");
            }
            if (n + 1) % opts.record_every == 0 {
                self.record(&mut record)?;
            }
        }

        // Always record final state
        if t_max % opts.record_every != 0 {
            self.record(&mut record)?;
        }
        Ok(record)
    }

    fn record(&self, record: &mut SimRecord) -> SimResult<()> {
        let outlets = self
            .circuit
            .ids()
            .map(|id| self.circuit.component(id).map(|c| c.outlet_temperature()))
            .collect::<SimResult<Vec<_>>>()?;
        record.t.push(self.time());
        record.outlet_temperatures.push(outlets);
        Ok(())
    }

    fn next(&self, id: CompId) -> SimResult<CompId> {
        self.circuit.outlet(id).ok_or(SimError::Invariant {
            what: "component without outlet inside the loop",
        })
    }

    fn loop_order(&self) -> SimResult<Vec<CompId>> {
        Ok(self.circuit.topology().cycle_from(self.root)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sl_components::{Pipe, Pump, Tank};
    use sl_core::m;

    fn config() -> LoopConfig {
        LoopConfig {
            cp: 1.0,
            rho: 1.0,
            t_env: 100.0,
            dt: 0.1,
            t_max: 5,
            temp_init: 100.0,
            flow_rate: 1.0,
            ..LoopConfig::default()
        }
    }

    fn small_loop(cfg: &LoopConfig) -> Vec<Box<dyn FlowPort>> {
        vec![
            Box::new(Pipe::new("a", m(1.0), 5, 0.0, cfg).unwrap()),
            Box::new(Pump::new("pump", cfg.flow_rate, cfg.temp_init).unwrap()),
            Box::new(Tank::new("tank", m(0.5), m(1.0), 5, cfg).unwrap()),
        ]
    }

    #[test]
    fn construction_closes_loop() {
        let cfg = config();
        let sim = LoopSimulation::new(small_loop(&cfg), cfg).unwrap();
        assert_eq!(sim.pump(), CompId::from_usize(1));
        assert_eq!(sim.root(), CompId::from_usize(0));
        assert_eq!(
            sim.circuit().outlet(CompId::from_usize(2)),
            Some(sim.root())
        );
        // the pump's flow reached everything downstream of it
        let tank = sim.component(CompId::from_usize(2)).unwrap();
        assert_eq!(tank.flow_rate(), Some(1.0));
    }

    #[test]
    fn no_pump_is_topology_error() {
        let cfg = config();
        let components: Vec<Box<dyn FlowPort>> =
            vec![Box::new(Pipe::new("a", m(1.0), 5, 0.0, &cfg).unwrap())];
        assert_eq!(
            LoopSimulation::new(components, cfg).unwrap_err(),
            SimError::Topology { pumps: 0 }
        );
    }

    #[test]
    fn invalid_config_is_rejected() {
        let cfg = config();
        let bad = LoopConfig {
            dt: -1.0,
            ..cfg.clone()
        };
        assert!(matches!(
            LoopSimulation::new(small_loop(&cfg), bad),
            Err(SimError::Config(_))
        ));
    }

    #[test]
    fn zero_record_interval_is_rejected() {
        let cfg = config();
        let mut sim = LoopSimulation::new(small_loop(&cfg), cfg).unwrap();
        let opts = SimOptions {
            record_every: 0,
            ..SimOptions::default()
        };
        let mut observer = |_: usize, _: &[ProfileSnapshot<'_>]| {};
        assert!(matches!(
            sim.simulate_with(&opts, &mut observer),
            Err(SimError::InvalidArg { .. })
        ));
    }

    #[test]
    fn simulate_records_every_iteration() {
        let cfg = config();
        let mut sim = LoopSimulation::new(small_loop(&cfg), cfg).unwrap();
        let record = sim.simulate().unwrap();
        assert_eq!(sim.iteration(), 5);
        assert_eq!(record.t.len(), 6);
        assert_eq!(record.names, vec!["a", "pump", "tank"]);
        assert!((record.t[5] - 0.5).abs() < 1e-12);
        assert_eq!(record.final_outlets().map(<[Real]>::len), Some(3));
    }
}
