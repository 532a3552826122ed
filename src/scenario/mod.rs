pub mod config;

pub use config::{presets, BodyConfig, SimulationConfig, SimulationConfigBuilder};
