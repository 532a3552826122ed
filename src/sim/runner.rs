use nalgebra::Vector2;
use tracing::{debug, trace};

use crate::dynamics::{energy, Body, EnergySample};
use crate::error::{Error, Result};
use crate::scenario::SimulationConfig;
use super::event::{Approach, ApproachTracker, OrbitEvent, OrbitTracker};
use super::integrator::beeman_step;

/// Energy is sampled on every step index divisible by this.
pub const ENERGY_SAMPLE_INTERVAL: usize = 50;

// ---------------------------------------------------------------------------
// Run parameters
// ---------------------------------------------------------------------------

/// Which bodies to watch and how long to run.
#[derive(Debug, Clone)]
pub struct RunParams {
    pub target: usize,
    pub probe: usize,
    /// Overrides the configured iteration count when set.
    pub iterations: Option<usize>,
    /// Record every body's position every `k` steps.
    pub track_interval: Option<usize>,
}

impl RunParams {
    pub fn new(target: usize, probe: usize) -> Self {
        Self { target, probe, iterations: None, track_interval: None }
    }

    pub fn iterations(mut self, iterations: usize) -> Self {
        self.iterations = Some(iterations);
        self
    }

    pub fn track_every(mut self, steps: usize) -> Self {
        self.track_interval = Some(steps);
        self
    }
}

/// Positions of all bodies at one recorded step.
#[derive(Debug, Clone)]
pub struct TrackPoint {
    pub time: f64,
    pub positions: Vec<Vector2<f64>>,
}

// ---------------------------------------------------------------------------
// Simulation
// ---------------------------------------------------------------------------

/// A single run: owns its bodies and accumulates diagnostics step by step.
///
/// Built fresh from a `SimulationConfig`; nothing is shared between runs.
#[derive(Debug)]
pub struct Simulation {
    bodies: Vec<Body>,
    dt: f64,
    iterations: usize,
    step: usize,
    orbits: OrbitTracker,
    approach: ApproachTracker,
    energy: Vec<EnergySample>,
    events: Vec<OrbitEvent>,
    tracks: Vec<TrackPoint>,
    track_interval: Option<usize>,
    aborted: bool,
}

impl Simulation {
    /// Validate the configuration and indices; no step is taken here.
    pub fn new(config: &SimulationConfig, params: &RunParams) -> Result<Self> {
        config.validate()?;
        let iterations = params.iterations.unwrap_or(config.iterations);
        if iterations == 0 {
            return Err(Error::InvalidParam("iterations must be > 0".into()));
        }
        if params.track_interval == Some(0) {
            return Err(Error::InvalidParam("track interval must be > 0".into()));
        }

        let bodies = config
            .bodies
            .iter()
            .map(Body::from_config)
            .collect::<Result<Vec<_>>>()?;
        let approach = ApproachTracker::new(params.target, params.probe, bodies.len())?;

        Ok(Self {
            bodies,
            dt: config.dt,
            iterations,
            step: 0,
            orbits: OrbitTracker,
            approach,
            energy: Vec::with_capacity(iterations / ENERGY_SAMPLE_INTERVAL + 1),
            events: Vec::new(),
            tracks: Vec::new(),
            track_interval: params.track_interval,
            aborted: false,
        })
    }

    /// Current body states. Empty once the simulation has aborted, since a
    /// failed step can leave positions predicted but velocities uncorrected.
    pub fn bodies(&self) -> &[Body] {
        if self.aborted {
            return &[];
        }
        &self.bodies
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Number of steps completed so far.
    pub fn steps_taken(&self) -> usize {
        self.step
    }

    pub fn is_finished(&self) -> bool {
        self.step >= self.iterations
    }

    /// True once a step has failed. Results gathered so far are withheld.
    pub fn is_aborted(&self) -> bool {
        self.aborted
    }

    pub fn closest_approach(&self) -> Option<Approach> {
        if self.aborted {
            return None;
        }
        self.approach.closest()
    }

    pub fn energy_samples(&self) -> &[EnergySample] {
        if self.aborted {
            return &[];
        }
        &self.energy
    }

    pub fn total_energy(&self) -> Result<f64> {
        self.check_not_aborted()?;
        energy::total_energy(&self.bodies)
    }

    fn check_not_aborted(&self) -> Result<()> {
        if self.aborted {
            return Err(Error::InvalidParam("simulation was aborted by an earlier error".into()));
        }
        Ok(())
    }

    /// Take the next step. A failed step poisons the simulation.
    pub fn step(&mut self) -> Result<()> {
        self.check_not_aborted()?;
        if self.is_finished() {
            return Err(Error::InvalidParam(format!(
                "all {} iterations already taken",
                self.iterations
            )));
        }

        let n = self.step;
        match self.advance(n) {
            Ok(()) => {
                self.step += 1;
                Ok(())
            }
            Err(e) => {
                self.aborted = true;
                debug!(step = n, error = %e, "simulation aborted");
                Err(e)
            }
        }
    }

    /// Run the remaining steps and hand back the results.
    pub fn run(mut self) -> Result<RunReport> {
        debug!(
            bodies = self.bodies.len(),
            iterations = self.iterations,
            dt = self.dt,
            target = self.approach.target(),
            probe = self.approach.probe(),
            "starting run"
        );
        while !self.is_finished() {
            self.step()?;
        }
        debug!(
            steps = self.step,
            closest = ?self.approach.closest().map(|a| a.distance),
            "run complete"
        );
        Ok(self.into_report())
    }

    fn advance(&mut self, n: usize) -> Result<()> {
        let before: Vec<Vector2<f64>> = self.bodies.iter().map(Body::position).collect();

        beeman_step(&mut self.bodies, self.dt, n == 0)?;
        if !self.bodies.iter().all(Body::is_finite) {
            return Err(Error::NonFinite { quantity: "body state" });
        }

        for event in self.orbits.update(n, self.dt, &before, &mut self.bodies) {
            debug!(
                body = %self.bodies[event.body].name,
                step = event.step,
                period_years = event.period_years,
                "orbit completed"
            );
            self.events.push(event);
        }

        self.approach.update(n, self.dt, &self.bodies);

        let time = n as f64 * self.dt;
        if n % ENERGY_SAMPLE_INTERVAL == 0 {
            let energy = energy::total_energy(&self.bodies)?;
            trace!(step = n, time, energy, "energy sample");
            self.energy.push(EnergySample { time, energy });
        }

        if let Some(k) = self.track_interval {
            if n % k == 0 {
                self.tracks.push(TrackPoint {
                    time,
                    positions: self.bodies.iter().map(Body::position).collect(),
                });
            }
        }

        Ok(())
    }

    fn into_report(self) -> RunReport {
        RunReport {
            target: self.approach.target(),
            probe: self.approach.probe(),
            closest: self.approach.closest(),
            bodies: self.bodies,
            dt: self.dt,
            steps: self.step,
            energy: self.energy,
            orbit_events: self.events,
            tracks: self.tracks,
        }
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Outputs of a completed run. Only produced when every step succeeded.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub bodies: Vec<Body>,
    pub target: usize,
    pub probe: usize,
    pub dt: f64,
    pub steps: usize,
    pub closest: Option<Approach>,
    pub energy: Vec<EnergySample>,
    pub orbit_events: Vec<OrbitEvent>,
    pub tracks: Vec<TrackPoint>,
}

impl RunReport {
    /// Closest target/probe distance, m.
    pub fn closest_approach(&self) -> Option<f64> {
        self.closest.map(|a| a.distance)
    }

    /// Simulated time of the closest approach, s.
    pub fn approach_time(&self) -> Option<f64> {
        self.closest.map(|a| a.time)
    }

    /// Orbital period of body `idx` in Earth years.
    pub fn period(&self, idx: usize) -> Option<f64> {
        self.bodies.get(idx).and_then(Body::period)
    }

    pub fn periods(&self) -> impl Iterator<Item = (&str, Option<f64>)> + '_ {
        self.bodies.iter().map(|b| (b.name.as_str(), b.period()))
    }

    pub fn energy_samples(&self) -> impl Iterator<Item = &EnergySample> + '_ {
        self.energy.iter()
    }

    /// Percentage energy change between the first and last sample.
    pub fn energy_drift(&self) -> Option<f64> {
        energy::relative_drift(&self.energy)
    }

    pub fn duration(&self) -> f64 {
        self.steps as f64 * self.dt
    }
}
