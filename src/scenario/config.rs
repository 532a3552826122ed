use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Body descriptor
// ---------------------------------------------------------------------------

/// Initial state of one body as it appears in a scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyConfig {
    pub name: String,
    pub colour: String,        // display only
    pub size: f64,             // nominal display size
    pub mass: f64,             // kg
    pub position: [f64; 2],    // m
    pub velocity: [f64; 2],    // m/s
}

impl BodyConfig {
    pub fn new(name: impl Into<String>, mass: f64, position: [f64; 2], velocity: [f64; 2]) -> Self {
        Self {
            name: name.into(),
            colour: "white".into(),
            size: 1.0,
            mass,
            position,
            velocity,
        }
    }

    pub fn colour(mut self, colour: impl Into<String>) -> Self {
        self.colour = colour.into();
        self
    }

    pub fn size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    /// Check the physical invariants: finite state, strictly positive mass.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::InvalidParam("body name must not be empty".into()));
        }
        if !self.mass.is_finite() || self.mass <= 0.0 {
            return Err(Error::InvalidParam(format!(
                "mass of {} must be finite and > 0, got {}",
                self.name, self.mass
            )));
        }
        let finite = self
            .position
            .iter()
            .chain(self.velocity.iter())
            .all(|c| c.is_finite());
        if !finite {
            return Err(Error::InvalidParam(format!(
                "position and velocity of {} must be finite",
                self.name
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Simulation configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub iterations: usize,       // number of steps
    pub dt: f64,                 // timestep, s
    pub bodies: Vec<BodyConfig>, // order fixes body indices
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(Error::InvalidParam("iterations must be > 0".into()));
        }
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(Error::InvalidParam(format!(
                "dt must be finite and > 0, got {}",
                self.dt
            )));
        }
        if self.bodies.is_empty() {
            return Err(Error::InvalidParam("scenario has no bodies".into()));
        }
        let mut names = HashSet::new();
        for body in &self.bodies {
            body.validate()?;
            if !names.insert(body.name.as_str()) {
                return Err(Error::InvalidParam(format!("duplicate body name {}", body.name)));
            }
        }
        Ok(())
    }

    /// Simulated span covered by the configured iteration count, s.
    pub fn duration(&self) -> f64 {
        self.iterations as f64 * self.dt
    }

    /// Index of the body with the given name. Names are unique once validated.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.bodies.iter().position(|b| b.name == name)
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

pub struct SimulationConfigBuilder {
    iterations: usize,
    dt: f64,
    bodies: Vec<BodyConfig>,
}

impl SimulationConfigBuilder {
    pub fn new(iterations: usize, dt: f64) -> Self {
        Self { iterations, dt, bodies: vec![] }
    }

    pub fn body(mut self, body: BodyConfig) -> Self {
        self.bodies.push(body);
        self
    }

    pub fn build(self) -> Result<SimulationConfig> {
        let config = SimulationConfig {
            iterations: self.iterations,
            dt: self.dt,
            bodies: self.bodies,
        };
        config.validate()?;
        Ok(config)
    }
}

// ---------------------------------------------------------------------------
// Preset scenarios
// ---------------------------------------------------------------------------

pub mod presets {
    use super::*;
    use crate::physics::gravity::circular_speed;

    pub const SUN_MASS: f64 = 1.989e30;
    pub const EARTH_MASS: f64 = 5.972e24;
    pub const AU: f64 = 1.496e11;

    /// Earth on a circular orbit around the Sun for a little over one year
    /// at one-hour steps.
    pub fn sun_earth() -> SimulationConfig {
        SimulationConfig {
            iterations: 9_000,
            dt: 3_600.0,
            bodies: vec![
                BodyConfig::new("Sun", SUN_MASS, [0.0, 0.0], [0.0, 0.0])
                    .colour("yellow")
                    .size(2.0),
                BodyConfig::new("Earth", EARTH_MASS, [AU, 0.0], [0.0, 29_780.0])
                    .colour("blue")
                    .size(0.5),
            ],
        }
    }

    /// Sun, Earth, Mars, Mercury, Venus and a probe launched from near Earth.
    ///
    /// Mars (index 2) is the natural target and the probe (index 5) the
    /// natural probe for closest-approach studies.
    pub fn inner_solar_system() -> SimulationConfig {
        let planet = |name: &str, colour: &str, size: f64, mass: f64, r: f64| {
            BodyConfig::new(name, mass, [r, 0.0], [0.0, circular_speed(SUN_MASS, r)])
                .colour(colour)
                .size(size)
        };
        SimulationConfig {
            iterations: 20_000,
            dt: 3_600.0,
            bodies: vec![
                BodyConfig::new("Sun", SUN_MASS, [0.0, 0.0], [0.0, 0.0])
                    .colour("yellow")
                    .size(2.0),
                planet("Earth", "blue", 0.6, EARTH_MASS, AU),
                planet("Mars", "red", 0.5, 6.39e23, 2.279e11),
                planet("Mercury", "grey", 0.4, 3.285e23, 5.79e10),
                planet("Venus", "orange", 0.55, 4.867e24, 1.082e11),
                BodyConfig::new(
                    "Viking_Probe",
                    3_000.0,
                    [149_597_970_700.0, 384_400_000.0],
                    [10_650.0, 30_000.0],
                )
                .colour("black")
                .size(0.75),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_validates() {
        let ok = SimulationConfigBuilder::new(10, 60.0)
            .body(BodyConfig::new("A", 1.0, [0.0, 0.0], [0.0, 0.0]))
            .build();
        assert!(ok.is_ok());

        let bad_mass = SimulationConfigBuilder::new(10, 60.0)
            .body(BodyConfig::new("A", 0.0, [0.0, 0.0], [0.0, 0.0]))
            .build();
        assert!(matches!(bad_mass, Err(Error::InvalidParam(_))));

        let bad_dt = SimulationConfigBuilder::new(10, -1.0)
            .body(BodyConfig::new("A", 1.0, [0.0, 0.0], [0.0, 0.0]))
            .build();
        assert!(matches!(bad_dt, Err(Error::InvalidParam(_))));
    }

    #[test]
    fn zero_iterations_rejected() {
        let cfg = SimulationConfigBuilder::new(0, 1.0)
            .body(BodyConfig::new("A", 1.0, [0.0, 0.0], [0.0, 0.0]))
            .build();
        assert!(cfg.is_err());
    }

    #[test]
    fn duplicate_names_rejected() {
        let cfg = SimulationConfigBuilder::new(10, 60.0)
            .body(BodyConfig::new("Earth", 1.0e30, [0.0, 0.0], [0.0, 0.0]))
            .body(BodyConfig::new("Earth", 1.0e24, [1.0e11, 0.0], [0.0, 1.0]))
            .build();
        match cfg {
            Err(Error::InvalidParam(msg)) => assert!(msg.contains("Earth")),
            other => panic!("expected duplicate name error, got {other:?}"),
        }
    }

    #[test]
    fn non_finite_velocity_rejected() {
        let body = BodyConfig::new("A", 1.0, [0.0, 0.0], [f64::NAN, 0.0]);
        assert!(body.validate().is_err());
    }

    #[test]
    fn presets_are_valid() {
        presets::sun_earth().validate().unwrap();
        let inner = presets::inner_solar_system();
        inner.validate().unwrap();
        assert_eq!(inner.index_of("Mars"), Some(2));
        assert_eq!(inner.index_of("Viking_Probe"), Some(5));
    }

    #[test]
    fn duration_is_steps_times_dt() {
        let cfg = presets::sun_earth();
        assert!((cfg.duration() - 9_000.0 * 3_600.0).abs() < 1e-6);
    }
}
