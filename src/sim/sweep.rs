use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::scenario::SimulationConfig;
use super::runner::{RunParams, Simulation};

/// Upper bound on the number of runs a single sweep may request.
pub const MAX_SWEEP_POINTS: usize = 100_000;

/// Range of initial probe x-velocities, `lower` inclusive, `upper` exclusive.
#[derive(Debug, Clone, Copy)]
pub struct SweepRange {
    pub lower: f64,
    pub upper: f64,
    pub step: f64,
}

impl SweepRange {
    pub fn new(lower: f64, upper: f64, step: f64) -> Self {
        Self { lower, upper, step }
    }

    pub fn values(&self) -> Result<Vec<f64>> {
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(Error::InvalidParam("sweep step must be finite and > 0".into()));
        }
        if !(self.lower.is_finite() && self.upper.is_finite()) || self.upper <= self.lower {
            return Err(Error::InvalidParam(format!(
                "empty sweep range [{}, {})",
                self.lower, self.upper
            )));
        }
        let count = ((self.upper - self.lower) / self.step).ceil();
        if count > MAX_SWEEP_POINTS as f64 {
            return Err(Error::InvalidParam(format!(
                "sweep of [{}, {}) by {} exceeds {MAX_SWEEP_POINTS} points",
                self.lower, self.upper, self.step
            )));
        }
        let count = count as usize;
        Ok((0..count)
            .map(|k| self.lower + k as f64 * self.step)
            .filter(|v| *v < self.upper)
            .collect())
    }
}

/// Outcome of one run in a velocity sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SweepPoint {
    pub vx: f64,
    pub approach_time: Option<f64>,
    pub closest_distance: Option<f64>,
}

/// Run the scenario once per initial probe x-velocity, keeping vy fixed.
///
/// Every run starts from its own copy of `config`, so runs never see each
/// other's state. Track recording is disabled for sweep runs.
pub fn velocity_sweep(
    config: &SimulationConfig,
    params: &RunParams,
    range: SweepRange,
    vy: f64,
) -> Result<Vec<SweepPoint>> {
    let probe = params.probe;
    if probe >= config.bodies.len() {
        return Err(Error::out_of_range("probe", probe, config.bodies.len()));
    }
    let params = RunParams { track_interval: None, ..params.clone() };

    range
        .values()?
        .into_iter()
        .map(|vx| -> Result<SweepPoint> {
            let mut cfg = config.clone();
            cfg.bodies[probe].velocity = [vx, vy];
            let report = Simulation::new(&cfg, &params)?.run()?;
            debug!(vx, closest = ?report.closest_approach(), "sweep point");
            Ok(SweepPoint {
                vx,
                approach_time: report.approach_time(),
                closest_distance: report.closest_approach(),
            })
        })
        .collect()
}

/// Closest distances divided by the smallest one in the sweep.
pub fn relative_distances(points: &[SweepPoint]) -> Vec<Option<f64>> {
    let min = points
        .iter()
        .filter_map(|p| p.closest_distance)
        .fold(f64::INFINITY, f64::min);
    points
        .iter()
        .map(|p| p.closest_distance.map(|d| d / min))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::{presets, BodyConfig, SimulationConfigBuilder};

    #[test]
    fn range_excludes_upper_bound() {
        let values = SweepRange::new(8_000.0, 10_000.0, 1_000.0).values().unwrap();
        assert_eq!(values, vec![8_000.0, 9_000.0]);
    }

    #[test]
    fn bad_ranges_rejected() {
        assert!(SweepRange::new(1.0, 1.0, 1.0).values().is_err());
        assert!(SweepRange::new(0.0, 10.0, 0.0).values().is_err());
    }

    #[test]
    fn oversized_sweep_rejected_before_allocating() {
        let res = SweepRange::new(8_000.0, 20_000.0, 1e-300).values();
        assert!(matches!(res, Err(Error::InvalidParam(_))));

        let at_cap = SweepRange::new(0.0, MAX_SWEEP_POINTS as f64, 1.0).values().unwrap();
        assert_eq!(at_cap.len(), MAX_SWEEP_POINTS);
    }

    #[test]
    fn sweep_runs_fresh_copies() {
        use presets::{AU, EARTH_MASS, SUN_MASS};

        let cfg = SimulationConfigBuilder::new(200, 3_600.0)
            .body(BodyConfig::new("Sun", SUN_MASS, [0.0, 0.0], [0.0, 0.0]))
            .body(BodyConfig::new("Earth", EARTH_MASS, [AU, 0.0], [0.0, 29_780.0]))
            .body(BodyConfig::new("Probe", 1_000.0, [AU + 1.0e9, 0.0], [0.0, 0.0]))
            .build()
            .unwrap();
        let params = RunParams::new(1, 2);
        let range = SweepRange::new(0.0, 300.0, 100.0);
        let points = velocity_sweep(&cfg, &params, range, 29_000.0).unwrap();

        assert_eq!(points.len(), 3);
        assert!(points.iter().all(|p| p.closest_distance.is_some()));
        // The caller's config is untouched
        assert_eq!(cfg.bodies[2].velocity, [0.0, 0.0]);

        // Same inputs, same answer
        let again = velocity_sweep(&cfg, &params, range, 29_000.0).unwrap();
        assert_eq!(points, again);

        let rel = relative_distances(&points);
        assert!(rel.iter().flatten().all(|r| *r >= 1.0));
        assert!(rel.iter().flatten().any(|r| *r == 1.0));
    }
}
