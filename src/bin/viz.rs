use std::path::PathBuf;

use anyhow::{ensure, Context};
use clap::Parser;
use eframe::egui;
use egui_plot::{Line, Plot, PlotPoints};

use gravity_sim::io;
use gravity_sim::presets;
use gravity_sim::{RunParams, RunReport, Simulation, SimulationConfig};

const SECONDS_PER_DAY: f64 = 86_400.0;

#[derive(Parser, Debug)]
#[command(name = "gravity-viz", about = "Plot body tracks and total energy of one run")]
struct Args {
    /// Plain-text scenario file; the inner solar system preset when omitted
    config: Option<PathBuf>,
    /// Index of the target body [default: Mars if present, else 0]
    #[arg(long)]
    target: Option<usize>,
    /// Index of the probe body [default: the last body]
    #[arg(long)]
    probe: Option<usize>,
    /// Record tracks every N steps
    #[arg(long, default_value_t = 10)]
    track_every: usize,
}

impl Args {
    fn params(&self, config: &SimulationConfig) -> anyhow::Result<RunParams> {
        let count = config.bodies.len();
        ensure!(count >= 2, "need at least two bodies to track an approach, found {count}");
        let target = self
            .target
            .unwrap_or_else(|| config.index_of("Mars").unwrap_or(0));
        let probe = self.probe.unwrap_or(count - 1);
        Ok(RunParams::new(target, probe).track_every(self.track_every))
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = match &args.config {
        Some(path) => io::load_config(path)
            .with_context(|| format!("failed to load scenario {}", path.display()))?,
        None => presets::inner_solar_system(),
    };
    let params = args.params(&config)?;
    let report = Simulation::new(&config, &params)?
        .run()
        .context("simulation failed")?;

    let app = SimViz { report };
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1200.0, 800.0]),
        ..Default::default()
    };
    eframe::run_native("Gravity Simulator", options, Box::new(|_| Ok(Box::new(app))))
        .map_err(|e| anyhow::anyhow!("viewer failed: {e}"))
}

struct SimViz {
    report: RunReport,
}

impl eframe::App for SimViz {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let report = &self.report;

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.heading(format!(
                "{} bodies, {:.1} days simulated",
                report.bodies.len(),
                report.duration() / SECONDS_PER_DAY
            ));
            let approach = match (report.closest_approach(), report.approach_time()) {
                (Some(d), Some(t)) => format!(
                    "Closest approach {} -> {}: {:.0} km at day {:.1}",
                    report.bodies[report.probe].name,
                    report.bodies[report.target].name,
                    d / 1000.0,
                    t / SECONDS_PER_DAY
                ),
                _ => "No approach recorded".to_string(),
            };
            ui.label(format!(
                "{approach}  |  Energy change: {}",
                report.energy_drift().map_or("-".to_string(), |d| format!("{d:.6}%"))
            ));
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let available = ui.available_size();
            let half_w = available.x / 2.0 - 8.0;
            let height = available.y - 24.0;

            ui.horizontal(|ui| {
                // Body tracks in the orbital plane
                ui.vertical(|ui| {
                    ui.label("Tracks (AU)");
                    Plot::new("tracks")
                        .width(half_w)
                        .height(height)
                        .data_aspect(1.0)
                        .legend(Default::default())
                        .show(ui, |plot_ui| {
                            for (i, body) in report.bodies.iter().enumerate() {
                                let points: PlotPoints = report
                                    .tracks
                                    .iter()
                                    .map(|t| t.positions[i] / presets::AU)
                                    .map(|p| [p.x, p.y])
                                    .collect();
                                plot_ui.line(Line::new(body.name.clone(), points));
                            }
                        });
                });

                // Total energy vs time
                ui.vertical(|ui| {
                    ui.label("Total energy (J)");
                    let points: PlotPoints = report
                        .energy_samples()
                        .map(|s| [s.time / SECONDS_PER_DAY, s.energy])
                        .collect();
                    Plot::new("energy")
                        .width(half_w)
                        .height(height)
                        .x_axis_label("Time (days)")
                        .show(ui, |plot_ui| {
                            plot_ui.line(Line::new("Energy", points));
                        });
                });
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gravity_sim::BodyConfig;

    #[test]
    fn defaults_pick_mars_and_last_body() {
        let args = Args::parse_from(["gravity-viz"]);
        let params = args.params(&presets::inner_solar_system()).unwrap();
        assert_eq!((params.target, params.probe), (2, 5));
        assert_eq!(params.track_interval, Some(10));
    }

    #[test]
    fn single_body_scenario_rejected_up_front() {
        let config = SimulationConfig {
            iterations: 10,
            dt: 60.0,
            bodies: vec![BodyConfig::new("Sun", presets::SUN_MASS, [0.0, 0.0], [0.0, 0.0])],
        };
        let err = Args::parse_from(["gravity-viz"]).params(&config).unwrap_err();
        assert!(err.to_string().contains("at least two bodies"));
    }
}
