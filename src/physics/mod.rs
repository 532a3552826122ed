pub mod gravity;

pub use gravity::{acceleration, accelerations, circular_speed, kepler_period, G};

/// Seconds in one Julian year (365.25 days); periods are reported in these.
pub const SECONDS_PER_YEAR: f64 = 31_557_600.0;
