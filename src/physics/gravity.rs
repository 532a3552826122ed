use nalgebra::Vector2;

use crate::dynamics::Body;
use crate::error::{Error, Result};

/// Universal gravitational constant, m^3 kg^-1 s^-2.
pub const G: f64 = 6.67e-11;

// ---------------------------------------------------------------------------
// Direct pairwise gravity
// ---------------------------------------------------------------------------

/// Acceleration of body `idx` due to every other body.
///
/// a = sum_{j != idx} G m_j (r_j - r_idx) / |r_j - r_idx|^3
///
/// Coincident positions are a configuration error, not something to soften.
pub fn acceleration(idx: usize, bodies: &[Body]) -> Result<Vector2<f64>> {
    let body = bodies
        .get(idx)
        .ok_or_else(|| Error::out_of_range("body", idx, bodies.len()))?;
    let here = body.position();

    let mut a = Vector2::zeros();
    for (j, other) in bodies.iter().enumerate() {
        if j == idx {
            continue;
        }
        let r = other.position() - here;
        let dist = r.norm();
        if dist == 0.0 {
            return Err(Error::DegenerateGeometry {
                a: idx.min(j),
                b: idx.max(j),
            });
        }
        a += r * (G * other.mass() / (dist * dist * dist));
    }

    if !a.iter().all(|c| c.is_finite()) {
        return Err(Error::NonFinite { quantity: "acceleration" });
    }
    Ok(a)
}

/// Accelerations of all bodies, evaluated against one positional snapshot.
///
/// Nothing is written back here; callers commit the returned buffer only
/// after the whole sweep has succeeded.
#[cfg(not(feature = "parallel"))]
pub fn accelerations(bodies: &[Body]) -> Result<Vec<Vector2<f64>>> {
    (0..bodies.len()).map(|i| acceleration(i, bodies)).collect()
}

/// Accelerations of all bodies, evaluated against one positional snapshot.
///
/// Each body's sum is independent, so the sweep fans out over rayon's pool;
/// `collect` is the barrier before anything is committed.
#[cfg(feature = "parallel")]
pub fn accelerations(bodies: &[Body]) -> Result<Vec<Vector2<f64>>> {
    use rayon::prelude::*;
    (0..bodies.len())
        .into_par_iter()
        .map(|i| acceleration(i, bodies))
        .collect()
}

/// Potential energy of one unordered pair, J.
pub fn pair_potential(a: &Body, b: &Body) -> Option<f64> {
    let dist = (b.position() - a.position()).norm();
    if dist == 0.0 {
        return None;
    }
    Some(-G * a.mass() * b.mass() / dist)
}

// ---------------------------------------------------------------------------
// Two-body helpers
// ---------------------------------------------------------------------------

/// Speed of a circular orbit of radius `r` around a central mass, m/s.
pub fn circular_speed(central_mass: f64, r: f64) -> f64 {
    (G * central_mass / r).sqrt()
}

/// Keplerian period of a test mass on an orbit of semi-major axis `a`, s.
pub fn kepler_period(central_mass: f64, a: f64) -> f64 {
    2.0 * std::f64::consts::PI * (a.powi(3) / (G * central_mass)).sqrt()
}
