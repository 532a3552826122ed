use nalgebra::Vector2;

use crate::error::Result;
use crate::scenario::BodyConfig;

// ---------------------------------------------------------------------------
// Body: one point mass in the plane
// ---------------------------------------------------------------------------

/// Mutable physical state of one mass point.
///
/// Mass is fixed at construction and always strictly positive. The two
/// stored accelerations are the two most recent force evaluations that fed
/// a position prediction; Beeman's scheme needs both.
#[derive(Debug, Clone)]
pub struct Body {
    pub name: String,
    pub colour: String,
    pub size: f64,
    mass: f64,                  // kg
    pos: Vector2<f64>,          // m
    vel: Vector2<f64>,          // m/s
    acc: Vector2<f64>,          // a_n, m/s^2
    prev_acc: Vector2<f64>,     // a_{n-1}, m/s^2
    period: Option<f64>,        // Earth years, set once
}

impl Body {
    pub fn from_config(config: &BodyConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            name: config.name.clone(),
            colour: config.colour.clone(),
            size: config.size,
            mass: config.mass,
            pos: Vector2::new(config.position[0], config.position[1]),
            vel: Vector2::new(config.velocity[0], config.velocity[1]),
            acc: Vector2::zeros(),
            prev_acc: Vector2::zeros(),
            period: None,
        })
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn position(&self) -> Vector2<f64> {
        self.pos
    }

    pub fn velocity(&self) -> Vector2<f64> {
        self.vel
    }

    /// a_n: the acceleration that drove the most recent position prediction.
    ///
    /// The history moves at the start of a step, so after step n completes
    /// this is still a_n, not the a_{n+1} its corrector used. The next step's
    /// first sweep sees the same positions and pushes that value in, so the
    /// pair the predictor reads is always the two most recent evaluations.
    pub fn acceleration(&self) -> Vector2<f64> {
        self.acc
    }

    /// a_{n-1}, equal to `acceleration()` after the first step.
    pub fn previous_acceleration(&self) -> Vector2<f64> {
        self.prev_acc
    }

    /// Orbital period in Earth years, if a full revolution has been seen.
    pub fn period(&self) -> Option<f64> {
        self.period
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.vel.norm_squared()
    }

    pub fn is_finite(&self) -> bool {
        self.pos.iter().chain(self.vel.iter()).all(|c| c.is_finite())
    }

    /// Shift the acceleration history and store `a` as the current value.
    /// On the first step there is no history, so a_{n-1} is seeded with `a`.
    pub(crate) fn push_acceleration(&mut self, a: Vector2<f64>, first: bool) {
        if first {
            self.acc = a;
        }
        self.prev_acc = self.acc;
        self.acc = a;
    }

    /// r_{n+1} = r_n + v_n dt + (4 a_n - a_{n-1}) dt^2 / 6
    pub(crate) fn predict_position(&mut self, dt: f64) {
        let a_term = 4.0 * self.acc - self.prev_acc;
        self.pos += self.vel * dt + a_term * (dt * dt / 6.0);
    }

    /// v_{n+1} = v_n + (2 a_{n+1} + 5 a_n - a_{n-1}) dt / 6
    pub(crate) fn correct_velocity(&mut self, next_acc: Vector2<f64>, dt: f64) {
        let a_term = 2.0 * next_acc + 5.0 * self.acc - self.prev_acc;
        self.vel += a_term * (dt / 6.0);
    }

    /// Returns false if the period was already set.
    pub(crate) fn record_period(&mut self, years: f64) -> bool {
        if self.period.is_some() {
            return false;
        }
        self.period = Some(years);
        true
    }
}
