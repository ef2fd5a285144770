//! neuromass-sim - Run the two-population behaviour model and plot it
//!
//! # Usage
//!
//! ```bash
//! # Reference run: 10 s, seed 1234, figure written to population_dynamics.svg
//! neuromass-sim
//!
//! # Load a TOML run description, override the noise level
//! neuromass-sim --config run.toml --sigma 0.2
//!
//! # Biased drive, no figure, debug logging
//! neuromass-sim --b1 1.0 --b2 0.6 --no-plot -v
//! ```
//!
//! # Exit Codes
//!
//! - 0: Simulation (and figure) completed
//! - 1: Simulation or rendering failed
//! - 2: Invalid arguments or configuration

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::filter::LevelFilter;

use neuromass::{render_svg, Integrator, Population, SeededNoise, SimulationConfig};

/// Stochastic two-population neural-mass simulator
#[derive(Parser, Debug)]
#[command(name = "neuromass-sim")]
#[command(version, about, long_about = None)]
struct Cli {
    /// TOML run description (flags below override it)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Simulated time (s)
    #[arg(short, long, allow_hyphen_values = true)]
    duration: Option<f64>,

    /// Integration step (s)
    #[arg(long, allow_hyphen_values = true)]
    dt: Option<f64>,

    /// Drive to the first population
    #[arg(long, allow_hyphen_values = true)]
    b1: Option<f64>,

    /// Drive to the second population
    #[arg(long, allow_hyphen_values = true)]
    b2: Option<f64>,

    /// Self-excitation weight
    #[arg(long = "w-ee", allow_hyphen_values = true)]
    w_ee: Option<f64>,

    /// Mutual inhibition weight
    #[arg(long, allow_hyphen_values = true)]
    alpha: Option<f64>,

    /// Noise intensity
    #[arg(long, allow_hyphen_values = true)]
    sigma: Option<f64>,

    /// Noise seed
    #[arg(long)]
    seed: Option<u64>,

    /// Figure path (SVG)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Skip rendering the figure
    #[arg(long)]
    no_plot: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { LevelFilter::DEBUG } else { LevelFilter::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::from(2);
        }
    };

    match run(&config, !cli.no_plot) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Config file (or defaults) with command-line overrides applied
fn build_config(cli: &Cli) -> anyhow::Result<SimulationConfig> {
    let mut config = match &cli.config {
        Some(path) => SimulationConfig::from_file(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => SimulationConfig::default(),
    };

    apply_overrides(cli, &mut config);
    config.validate().context("Invalid run configuration")?;
    Ok(config)
}

/// Copy every flag that was given onto `config`
fn apply_overrides(cli: &Cli, config: &mut SimulationConfig) {
    let model = &mut config.model;
    for (slot, value) in [
        (&mut model.dt, cli.dt),
        (&mut model.b1, cli.b1),
        (&mut model.b2, cli.b2),
        (&mut model.w_ee, cli.w_ee),
        (&mut model.alpha, cli.alpha),
        (&mut model.sigma, cli.sigma),
    ] {
        if let Some(value) = value {
            *slot = value;
        }
    }
    if let Some(duration) = cli.duration {
        config.duration = duration;
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(output) = &cli.output {
        config.plot.output = output.clone();
    }
}

fn run(config: &SimulationConfig, plot: bool) -> anyhow::Result<()> {
    let integrator = Integrator::new(config.model);
    let mut noise = SeededNoise::from_seed(config.seed);

    let history = integrator
        .simulate(config.duration, &mut noise)
        .context("Simulation failed")?;

    log::info!(
        "Simulated {} steps ({:.2}s at dt={}s, seed {})",
        history.len(),
        history.duration(),
        config.model.dt,
        config.seed
    );
    if let Some([h1, h2]) = history.final_state() {
        log::info!("Final state: h1={:.4}, h2={:.4}", h1, h2);
    }
    for population in Population::ALL {
        log::info!("Mean {}: {:.4}", population.label(), history.mean(population));
    }
    match history.dominant() {
        Some(population) => log::info!("Dominant: {}", population.label()),
        None => log::info!("Dominant: none (populations tied)"),
    }

    if plot {
        let path = &config.plot.output;
        render_svg(&history, &config.plot.style(), path)
            .with_context(|| format!("Failed to render {}", path.display()))?;
        log::info!("Figure written to {}", path.display());
    }

    Ok(())
}
