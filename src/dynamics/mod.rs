pub mod body;
pub mod energy;

pub use body::Body;
pub use energy::{relative_drift, total_energy, total_kinetic, total_potential, EnergySample};
