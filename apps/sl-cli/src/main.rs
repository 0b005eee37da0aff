use clap::Parser;
use serde::Serialize;
use sl_core::LoopConfig;
use sl_sim::{LoopSimulation, SimError, SimOptions, SimRecord, TracingObserver, reference_loop};
use std::path::PathBuf;
use std::time::Instant;
use thiserror::Error;

#[derive(Parser)]
#[command(name = "sl-cli")]
#[command(about = "SolarLoop CLI - solar heating loop simulator", long_about = None)]
struct Cli {
    /// YAML file with loop parameters; flags given on the command line win
    #[arg(long)]
    config: Option<PathBuf>,

    /// Fluid heat capacity (J/(kg·K)) [default: 4180]
    #[arg(long = "Cp", visible_alias = "cp")]
    cp: Option<f64>,
    /// Fluid density (kg/m³) [default: 1000]
    #[arg(long)]
    rho: Option<f64>,
    /// Environment temperature [default: 280]
    #[arg(long = "T_env", visible_alias = "t-env")]
    t_env: Option<f64>,
    /// Pipe and panel radius (m) [default: 0.1]
    #[arg(long = "port_radius", visible_alias = "port-radius")]
    port_radius: Option<f64>,
    /// Time step (s) [default: 1]
    #[arg(long)]
    dt: Option<f64>,
    /// Number of iterations [default: 800]
    #[arg(long = "t_max", visible_alias = "t-max")]
    t_max: Option<usize>,
    /// Solar panel equilibrium temperature [default: 600]
    #[arg(long = "steady_temperature", visible_alias = "steady-temperature")]
    steady_temperature: Option<f64>,
    /// Initial fluid temperature [default: 400]
    #[arg(long = "temp_init", visible_alias = "temp-init")]
    temp_init: Option<f64>,
    /// Pump flow rate (kg/s) [default: 20]
    #[arg(long = "flow_rate", visible_alias = "flow-rate")]
    flow_rate: Option<f64>,

    /// Log profile statistics every N iterations
    #[arg(long, default_value_t = 2)]
    observe_every: usize,
    /// Record outlet temperatures every N iterations
    #[arg(long, default_value_t = 1)]
    record_every: usize,
    /// Log progress every N iterations
    #[arg(long, default_value_t = 20)]
    progress_every: usize,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to write JSON summary: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Sim(#[from] SimError),
}

type CliResult<T> = Result<T, CliError>;

#[derive(Serialize)]
struct Summary<'a> {
    iterations: usize,
    time_s: f64,
    records: usize,
    outlets: Vec<OutletSummary<'a>>,
}

#[derive(Serialize)]
struct OutletSummary<'a> {
    name: &'a str,
    outlet_temperature: f64,
}

fn main() -> CliResult<()> {
    // Logs go to stderr so `--json` output stays parseable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let opts = SimOptions {
        record_every: cli.record_every,
        observe_every: cli.observe_every,
        progress_every: cli.progress_every,
    };

    if !cli.json {
        println!(
            "Running solar loop: dt = {:.3} s, t_max = {} iterations ({:.1} s simulated)",
            config.dt,
            config.t_max,
            config.duration().value
        );
    }

    let start = Instant::now();
    let mut sim = LoopSimulation::new(reference_loop(&config)?, config)?;
    let record = sim.simulate_with(&opts, &mut TracingObserver)?;
    tracing::info!(
        elapsed_ms = start.elapsed().as_millis() as u64,
        "simulation finished"
    );

    let summary = summarize(&sim, &record);
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }
    Ok(())
}

/// Defaults, overlaid by the config file, overlaid by explicit flags.
fn load_config(cli: &Cli) -> CliResult<LoopConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|source| CliError::Io {
                path: path.clone(),
                source,
            })?;
            serde_yaml::from_str(&text)?
        }
        None => LoopConfig::default(),
    };

    let overrides = [
        (cli.cp, &mut config.cp),
        (cli.rho, &mut config.rho),
        (cli.t_env, &mut config.t_env),
        (cli.port_radius, &mut config.port_radius),
        (cli.dt, &mut config.dt),
        (cli.steady_temperature, &mut config.steady_temperature),
        (cli.temp_init, &mut config.temp_init),
        (cli.flow_rate, &mut config.flow_rate),
    ];
    for (flag, field) in overrides {
        if let Some(value) = flag {
            *field = value;
        }
    }
    if let Some(t_max) = cli.t_max {
        config.t_max = t_max;
    }
    Ok(config)
}

fn summarize<'a>(sim: &LoopSimulation, record: &'a SimRecord) -> Summary<'a> {
    let outlets = record
        .names
        .iter()
        .zip(record.final_outlets().unwrap_or_default())
        .map(|(name, &outlet_temperature)| OutletSummary {
            name: name.as_str(),
            outlet_temperature,
        })
        .collect();
    Summary {
        iterations: sim.iteration(),
        time_s: sim.time(),
        records: record.t.len(),
        outlets,
    }
}

fn print_summary(summary: &Summary<'_>) {
    println!("✓ Simulation completed");
    println!("  Iterations: {}", summary.iterations);
    println!("  Simulated time: {:.1} s", summary.time_s);
    println!("  Time points: {}", summary.records);
    println!("  Final outlet temperatures:");
    for outlet in &summary.outlets {
        println!(
            "    {:<10} {:>10.3}",
            outlet.name, outlet.outlet_temperature
        );
    }
}
