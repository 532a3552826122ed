pub mod event;
pub mod integrator;
pub mod runner;
pub mod sweep;

pub use event::{Approach, ApproachTracker, OrbitEvent, OrbitTracker};
pub use integrator::beeman_step;
pub use runner::{RunParams, RunReport, Simulation, TrackPoint, ENERGY_SAMPLE_INTERVAL};
pub use sweep::{
    relative_distances, velocity_sweep, SweepPoint, SweepRange, MAX_SWEEP_POINTS,
};
