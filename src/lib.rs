pub mod dynamics;
pub mod error;
pub mod io;
pub mod physics;
pub mod scenario;
pub mod sim;

pub use dynamics::{Body, EnergySample};
pub use error::{Error, Result};
pub use scenario::{presets, BodyConfig, SimulationConfig, SimulationConfigBuilder};
pub use sim::{RunParams, RunReport, Simulation};
