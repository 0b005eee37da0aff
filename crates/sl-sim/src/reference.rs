//! The demonstration loop: panel, pump, storage tank and connecting pipes.

use sl_components::{FlowPort, Pipe, Pump, Tank};
use sl_core::{LoopConfig, Real, m};

use crate::error::SimResult;

/// Length of each connecting pipe (m).
pub const CONNECTING_PIPE_LENGTH_M: Real = 0.3;
/// Cells per connecting pipe.
pub const CONNECTING_PIPE_CELLS: usize = 20;
/// Heat loss coefficient of the connecting pipes (W/(m²·K)).
pub const CONNECTING_PIPE_HEAT_TRANSFER: Real = 1000.0;
/// Storage tank radius (m).
pub const TANK_RADIUS_M: Real = 0.2;
/// Storage tank height (m).
pub const TANK_HEIGHT_M: Real = 50.0;
/// Layers in the storage tank.
pub const TANK_LAYERS: usize = 100;

/// `[solar, pipe_1, pump, pipe_2, tank, pipe_3]`, ready for `LoopSimulation::new`.
pub fn reference_loop(config: &LoopConfig) -> SimResult<Vec<Box<dyn FlowPort>>> {
    let pipe = |name: &str| {
        Pipe::new(
            name,
            m(CONNECTING_PIPE_LENGTH_M),
            CONNECTING_PIPE_CELLS,
            CONNECTING_PIPE_HEAT_TRANSFER,
            config,
        )
    };

    let components: Vec<Box<dyn FlowPort>> = vec![
        Box::new(Pipe::solar_panel("solar", config)?),
        Box::new(pipe("pipe_1")?),
        Box::new(Pump::new("pump", config.flow_rate, config.temp_init)?),
        Box::new(pipe("pipe_2")?),
        Box::new(Tank::new(
            "tank",
            m(TANK_RADIUS_M),
            m(TANK_HEIGHT_M),
            TANK_LAYERS,
            config,
        )?),
        Box::new(pipe("pipe_3")?),
    ];
    Ok(components)
}
