use serde::{Deserialize, Serialize};

use crate::dynamics::Body;
use crate::error::{Error, Result};
use crate::physics::gravity::G;

/// One (time, total energy) point of the energy log.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergySample {
    pub time: f64,   // s
    pub energy: f64, // J
}

pub fn total_kinetic(bodies: &[Body]) -> f64 {
    bodies.iter().map(Body::kinetic_energy).sum()
}

/// Gravitational potential energy of the whole system, J.
///
/// Sums over ordered pairs, so every unordered pair is counted twice and the
/// total is halved.
pub fn total_potential(bodies: &[Body]) -> Result<f64> {
    let mut sum = 0.0;
    for (i, a) in bodies.iter().enumerate() {
        for (j, b) in bodies.iter().enumerate() {
            if i == j {
                continue;
            }
            let dist = (b.position() - a.position()).norm();
            if dist == 0.0 {
                return Err(Error::DegenerateGeometry { a: i.min(j), b: i.max(j) });
            }
            sum += G * a.mass() * b.mass() / dist;
        }
    }
    Ok(-0.5 * sum)
}

pub fn total_energy(bodies: &[Body]) -> Result<f64> {
    let e = total_kinetic(bodies) + total_potential(bodies)?;
    if !e.is_finite() {
        return Err(Error::NonFinite { quantity: "energy" });
    }
    Ok(e)
}

/// Percentage change in energy from the first sample to the last,
/// (E_first - E_last) / E_first * 100. `None` with fewer than two samples.
pub fn relative_drift(samples: &[EnergySample]) -> Option<f64> {
    match samples {
        [first, .., last] if first.energy != 0.0 => {
            Some((first.energy - last.energy) / first.energy * 100.0)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::gravity::pair_potential;
    use crate::scenario::BodyConfig;
    use approx::assert_relative_eq;

    fn make(mass: f64, pos: [f64; 2], vel: [f64; 2]) -> Body {
        Body::from_config(&BodyConfig::new("B", mass, pos, vel)).unwrap()
    }

    #[test]
    fn potential_counts_each_pair_once() {
        let bodies = vec![
            make(1.0e20, [0.0, 0.0], [0.0, 0.0]),
            make(2.0e20, [1.0e6, 0.0], [0.0, 0.0]),
            make(3.0e20, [0.0, 2.0e6], [0.0, 0.0]),
        ];
        let expected: f64 = [(0, 1), (0, 2), (1, 2)]
            .iter()
            .map(|&(i, j)| pair_potential(&bodies[i], &bodies[j]).unwrap())
            .sum();
        assert_relative_eq!(total_potential(&bodies).unwrap(), expected, max_relative = 1e-12);
    }

    #[test]
    fn kinetic_sums_bodies() {
        let bodies = vec![make(2.0, [0.0, 0.0], [1.0, 0.0]), make(4.0, [5.0, 0.0], [0.0, 3.0])];
        assert_relative_eq!(total_kinetic(&bodies), 1.0 + 18.0);
    }

    #[test]
    fn bound_circular_orbit_has_negative_energy() {
        let bodies = vec![
            make(1.989e30, [0.0, 0.0], [0.0, 0.0]),
            make(5.97e24, [1.496e11, 0.0], [0.0, 29_780.0]),
        ];
        assert!(total_energy(&bodies).unwrap() < 0.0);
    }

    #[test]
    fn coincident_bodies_have_no_potential() {
        let bodies = vec![make(1.0, [1.0, 1.0], [0.0, 0.0]), make(1.0, [1.0, 1.0], [0.0, 0.0])];
        assert!(matches!(
            total_energy(&bodies),
            Err(Error::DegenerateGeometry { a: 0, b: 1 })
        ));
    }

    #[test]
    fn drift_percentage() {
        let samples = [
            EnergySample { time: 0.0, energy: -200.0 },
            EnergySample { time: 50.0, energy: -199.0 },
            EnergySample { time: 100.0, energy: -198.0 },
        ];
        assert_relative_eq!(relative_drift(&samples).unwrap(), 1.0);
        assert_eq!(relative_drift(&samples[..1]), None);
    }
}
