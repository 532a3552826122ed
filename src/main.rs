use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use gravity_sim::dynamics::relative_drift;
use gravity_sim::io;
use gravity_sim::presets;
use gravity_sim::sim::{self, RunParams, Simulation, SweepRange};
use gravity_sim::SimulationConfig;

const SECONDS_PER_DAY: f64 = 86_400.0;

#[derive(Parser, Debug)]
#[command(name = "gravity-sim", about = "Planar N-body gravity simulation (Beeman integrator)")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a scenario and write its energy log
    Run {
        /// Plain-text scenario file
        config: PathBuf,
        /// Index of the target body
        #[arg(long, default_value_t = 2)]
        target: usize,
        /// Index of the probe body
        #[arg(long, default_value_t = 5)]
        probe: usize,
        /// Override the scenario's iteration count
        #[arg(long)]
        iterations: Option<usize>,
        /// Energy log output, rewritten on every run
        #[arg(long, default_value = "energy.txt")]
        energy_log: PathBuf,
        /// Optional JSON run summary
        #[arg(long)]
        summary: Option<PathBuf>,
        /// Optional CSV of body tracks
        #[arg(long)]
        tracks: Option<PathBuf>,
        /// Record tracks every N steps
        #[arg(long, default_value_t = 50)]
        track_every: usize,
    },
    /// Sweep the probe's initial x-velocity and report closest approaches
    Sweep {
        config: PathBuf,
        #[arg(long, default_value_t = 2)]
        target: usize,
        #[arg(long, default_value_t = 5)]
        probe: usize,
        #[arg(long)]
        iterations: Option<usize>,
        /// Lowest x-velocity, m/s (inclusive)
        #[arg(long)]
        lower: f64,
        /// Highest x-velocity, m/s (exclusive)
        #[arg(long)]
        upper: f64,
        /// Increment, m/s
        #[arg(long)]
        step: f64,
        /// Fixed y-velocity, m/s
        #[arg(long)]
        vy: f64,
    },
    /// Report the percentage energy change recorded in an energy log
    Drift { energy_log: PathBuf },
    /// Print a built-in scenario in the plain-text format
    Preset {
        #[arg(value_parser = ["sun-earth", "inner-solar-system"])]
        name: String,
    },
}

fn load(path: &Path) -> Result<SimulationConfig> {
    io::load_config(path).with_context(|| format!("failed to load scenario {}", path.display()))
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match Cli::parse().command {
        Command::Run {
            config,
            target,
            probe,
            iterations,
            energy_log,
            summary,
            tracks,
            track_every,
        } => {
            let cfg = load(&config)?;
            let mut params = RunParams::new(target, probe);
            params.iterations = iterations;
            if tracks.is_some() {
                params = params.track_every(track_every);
            }

            info!(bodies = cfg.bodies.len(), "running {}", config.display());
            let report = Simulation::new(&cfg, &params)?.run().context("simulation failed")?;

            io::write_energy_log_file(&energy_log, &report.energy)
                .with_context(|| format!("failed to write {}", energy_log.display()))?;
            if let Some(path) = &summary {
                io::write_summary_file(path, &io::RunSummary::from_report(&report))
                    .with_context(|| format!("failed to write {}", path.display()))?;
            }
            if let Some(path) = &tracks {
                let names: Vec<&str> = report.bodies.iter().map(|b| b.name.as_str()).collect();
                io::csv::write_tracks_file(path, &names, &report.tracks)
                    .with_context(|| format!("failed to write {}", path.display()))?;
            }

            println!();
            for (name, period) in report.periods() {
                match period {
                    Some(years) => println!("  {name:<14} orbital period {years:>8.4} years"),
                    None => println!("  {name:<14} orbital period        -"),
                }
            }
            println!();
            match (report.closest_approach(), report.approach_time()) {
                (Some(d), Some(t)) => println!(
                    "  Closest approach {} -> {}: {:.0} km after {:.1} days",
                    report.bodies[report.probe].name,
                    report.bodies[report.target].name,
                    d / 1000.0,
                    t / SECONDS_PER_DAY
                ),
                _ => println!("  No approach recorded"),
            }
            if let Some(drift) = report.energy_drift() {
                println!("  Energy change over run: {drift:.6}%");
            }
            println!();
        }

        Command::Sweep { config, target, probe, iterations, lower, upper, step, vy } => {
            let cfg = load(&config)?;
            let mut params = RunParams::new(target, probe);
            params.iterations = iterations;

            let range = SweepRange::new(lower, upper, step);
            let points = sim::velocity_sweep(&cfg, &params, range, vy)?;
            let relative = sim::relative_distances(&points);

            println!(
                "{:>10}  {:>14}  {:>12}  {:>10}",
                "vx (m/s)", "distance (km)", "time (days)", "relative"
            );
            for (p, rel) in points.iter().zip(relative) {
                println!(
                    "{:>10.1}  {:>14}  {:>12}  {:>10}",
                    p.vx,
                    p.closest_distance.map_or("-".into(), |d| format!("{:.0}", d / 1000.0)),
                    p.approach_time.map_or("-".into(), |t| format!("{:.2}", t / SECONDS_PER_DAY)),
                    rel.map_or("-".into(), |r| format!("{r:.4}")),
                );
            }
        }

        Command::Drift { energy_log } => {
            let samples = io::read_energy_log_file(&energy_log)
                .with_context(|| format!("failed to read {}", energy_log.display()))?;
            match relative_drift(&samples) {
                Some(drift) => println!("Percentage change in energy: {drift}"),
                None => anyhow::bail!("{} holds fewer than two samples", energy_log.display()),
            }
        }

        Command::Preset { name } => {
            let cfg = match name.as_str() {
                "sun-earth" => presets::sun_earth(),
                _ => presets::inner_solar_system(),
            };
            let stdout = std::io::stdout();
            io::write_config(&mut stdout.lock(), &cfg)?;
        }
    }

    Ok(())
}
