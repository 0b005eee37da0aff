//! End-to-end runs of closed heating loops.

use proptest::prelude::*;
use sl_components::{ComponentKind, FlowPort, Pipe, Pump};
use sl_core::{CompId, LoopConfig, Real, m};
use sl_graph::hops_to_return;
use sl_sim::{
    LoopSimulation, ProfileSnapshot, SimError, SimOptions, TracingObserver, reference_loop,
};

fn short_run(t_max: usize) -> LoopConfig {
    LoopConfig {
        t_max,
        ..LoopConfig::default()
    }
}

#[test]
fn reference_loop_stays_within_boundary_temperatures() {
    let cfg = short_run(30);
    let mut sim = LoopSimulation::new(reference_loop(&cfg).unwrap(), cfg.clone()).unwrap();
    let record = sim.simulate().unwrap();

    assert_eq!(sim.iteration(), 30);
    assert_eq!(record.t.len(), 31);

    let lo = cfg.t_env.min(cfg.temp_init) - 1e-9;
    let hi = cfg.steady_temperature.max(cfg.temp_init) + 1e-9;
    for row in &record.outlet_temperatures {
        for &t in row {
            assert!(t.is_finite());
            assert!(t >= lo && t <= hi, "outlet {t} outside [{lo}, {hi}]");
        }
    }
    for snap in sim.snapshots().unwrap() {
        assert!(snap.profile.iter().all(|&t| t >= lo && t <= hi));
    }
}

#[test]
fn solar_outlet_heats_up() {
    let cfg = short_run(10);
    let mut sim = LoopSimulation::new(reference_loop(&cfg).unwrap(), cfg.clone()).unwrap();
    let record = sim.simulate().unwrap();
    let solar = record.final_outlets().unwrap()[0];
    assert!(solar > cfg.temp_init);
}

#[test]
fn one_step_propagates_before_integrating() {
    let cfg = short_run(1);
    let mut sim = LoopSimulation::new(reference_loop(&cfg).unwrap(), cfg).unwrap();
    let lengths: Vec<usize> = sim
        .snapshots()
        .unwrap()
        .iter()
        .map(|s| s.profile.len())
        .collect();

    sim.step().unwrap();

    let pump = sim.component(sim.pump()).unwrap();
    let upstream_id = sim.circuit().inlet(sim.pump()).unwrap();
    let upstream = sim.component(upstream_id).unwrap();
    assert_eq!(pump.kind(), ComponentKind::Pump);
    assert_eq!(pump.outlet_temperature(), upstream.outlet_temperature());
    assert_eq!(pump.flow_rate(), Some(sim.config().flow_rate));

    let after: Vec<usize> = sim
        .snapshots()
        .unwrap()
        .iter()
        .map(|s| s.profile.len())
        .collect();
    assert_eq!(lengths, after);
}

#[test]
fn outlets_lag_profiles_after_one_step() {
    let cfg = short_run(1);
    let mut sim = LoopSimulation::new(reference_loop(&cfg).unwrap(), cfg).unwrap();
    let before: Vec<(CompId, Real)> = sim
        .snapshots()
        .unwrap()
        .iter()
        .map(|s| (s.id, *s.profile.last().unwrap()))
        .collect();

    sim.step().unwrap();

    // outlets were set during propagate, so they report the profile as it
    // stood before integrate moved it
    for &(id, last) in &before {
        let outlet = sim.component(id).unwrap().outlet_temperature();
        assert_eq!(outlet, last, "component {id:?}");
    }
    let solar = sim.component(sim.root()).unwrap();
    let profile = solar.as_time_varying().unwrap().temperature_profile();
    assert!(*profile.last().unwrap() > solar.outlet_temperature());
}

#[test]
fn observer_follows_observe_interval() {
    let cfg = short_run(10);
    let mut sim = LoopSimulation::new(reference_loop(&cfg).unwrap(), cfg).unwrap();
    let opts = SimOptions {
        observe_every: 2,
        record_every: 5,
        ..SimOptions::default()
    };

    let temp_init = sim.config().temp_init;

    let mut calls = Vec::new();
    let mut observer = |iteration: usize, snaps: &[ProfileSnapshot<'_>]| {
        let names: Vec<String> = snaps.iter().map(|s| s.name.to_string()).collect();
        let lo = snaps.iter().map(ProfileSnapshot::min).reduce(Real::min);
        let hi = snaps.iter().map(ProfileSnapshot::max).reduce(Real::max);
        calls.push((iteration, names, lo, hi));
    };
    let record = sim.simulate_with(&opts, &mut observer).unwrap();

    let iterations: Vec<usize> = calls.iter().map(|c| c.0).collect();
    assert_eq!(iterations, vec![0, 2, 4, 6, 8]);
    assert_eq!(
        calls[0].1,
        vec!["solar", "pipe_1", "pipe_2", "tank", "pipe_3"]
    );
    // the first observation sees the initial profiles, before any integrate
    assert_eq!(calls[0].2, Some(temp_init));
    assert_eq!(calls[0].3, Some(temp_init));
    assert!(calls[1].3 > Some(temp_init));
    assert_eq!(record.t.len(), 3);
}

#[test]
fn observing_does_not_change_results() {
    let cfg = short_run(6);
    let mut plain = LoopSimulation::new(reference_loop(&cfg).unwrap(), cfg.clone()).unwrap();
    let mut observed = LoopSimulation::new(reference_loop(&cfg).unwrap(), cfg).unwrap();

    let opts = SimOptions {
        observe_every: 1,
        ..SimOptions::default()
    };
    let a = plain.simulate().unwrap();
    let b = observed.simulate_with(&opts, &mut TracingObserver).unwrap();
    assert_eq!(a, b);
}

#[test]
fn pump_only_loop_is_valid() {
    let cfg = short_run(3);
    let components: Vec<Box<dyn FlowPort>> =
        vec![Box::new(Pump::new("pump", 1.0, cfg.temp_init).unwrap())];
    let mut sim = LoopSimulation::new(components, cfg.clone()).unwrap();
    let record = sim.simulate().unwrap();
    assert_eq!(record.final_outlets(), Some([cfg.temp_init].as_slice()));
    let first = CompId::from_usize(0);
    assert_eq!(sim.circuit().outlet(sim.pump()), Some(first));
}

#[test]
fn two_pumps_are_rejected() {
    let cfg = short_run(1);
    let components: Vec<Box<dyn FlowPort>> = vec![
        Box::new(Pump::new("p1", 1.0, 300.0).unwrap()),
        Box::new(Pump::new("p2", 1.0, 300.0).unwrap()),
    ];
    assert_eq!(
        LoopSimulation::new(components, cfg).unwrap_err(),
        SimError::Topology { pumps: 2 }
    );
}

proptest! {
    #[test]
    fn exactly_one_pump_required(is_pump in prop::collection::vec(any::<bool>(), 0..8)) {
        let cfg = short_run(1);
        let components: Vec<Box<dyn FlowPort>> = is_pump
            .iter()
            .enumerate()
            .map(|(i, &pump)| -> Box<dyn FlowPort> {
                if pump {
                    let pump = Pump::new(format!("pump_{i}"), 1.0, cfg.temp_init);
                    Box::new(pump.unwrap())
                } else {
                    let pipe = Pipe::new(format!("pipe_{i}"), m(1.0), 4, 0.0, &cfg);
                    Box::new(pipe.unwrap())
                }
            })
            .collect();

        let pumps = is_pump.iter().filter(|&&p| p).count();
        let result = LoopSimulation::new(components, cfg);
        if pumps == 1 {
            let sim = result.unwrap();
            prop_assert_eq!(sim.circuit().len(), is_pump.len());
            for id in sim.circuit().ids() {
                let hops = hops_to_return(sim.circuit().topology(), id).unwrap();
                prop_assert_eq!(hops, is_pump.len());
            }
        } else {
            prop_assert_eq!(result.unwrap_err(), SimError::Topology { pumps });
        }
    }
}
