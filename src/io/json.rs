use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use crate::sim::{Approach, RunReport};

/// Per-body entry of a run summary.
#[derive(Debug, Clone, Serialize)]
pub struct BodySummary {
    pub name: String,
    pub mass: f64,
    pub final_position: [f64; 2],
    pub final_velocity: [f64; 2],
    pub period_years: Option<f64>,
}

/// Summary statistics of a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub steps: usize,
    pub dt: f64,
    pub duration_s: f64,
    pub target: String,
    pub probe: String,
    pub closest_approach: Option<Approach>,
    pub energy_samples: usize,
    pub energy_drift_percent: Option<f64>,
    pub bodies: Vec<BodySummary>,
}

impl RunSummary {
    pub fn from_report(report: &RunReport) -> Self {
        let bodies = report
            .bodies
            .iter()
            .map(|b| {
                let (p, v) = (b.position(), b.velocity());
                BodySummary {
                    name: b.name.clone(),
                    mass: b.mass(),
                    final_position: [p.x, p.y],
                    final_velocity: [v.x, v.y],
                    period_years: b.period(),
                }
            })
            .collect();

        RunSummary {
            steps: report.steps,
            dt: report.dt,
            duration_s: report.duration(),
            target: report.bodies[report.target].name.clone(),
            probe: report.bodies[report.probe].name.clone(),
            closest_approach: report.closest,
            energy_samples: report.energy.len(),
            energy_drift_percent: report.energy_drift(),
            bodies,
        }
    }
}

/// Write the run summary as pretty-printed JSON.
pub fn write_summary<W: Write>(writer: &mut W, summary: &RunSummary) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, summary).map_err(io::Error::from)?;
    writeln!(writer)
}

/// Write run summary JSON to a file.
pub fn write_summary_file(path: impl AsRef<Path>, summary: &RunSummary) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_summary(&mut file, summary)
}
