use nalgebra::Vector2;
use serde::Serialize;

use crate::dynamics::Body;
use crate::error::{Error, Result};
use crate::physics::SECONDS_PER_YEAR;

// ---------------------------------------------------------------------------
// Simulation events
// ---------------------------------------------------------------------------

/// A body completed its first revolution during step `step`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrbitEvent {
    pub step: usize,
    pub body: usize,
    pub period_years: f64,
}

/// Closest target/probe separation seen so far.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Approach {
    pub distance: f64, // m
    pub time: f64,     // s
    pub step: usize,
}

// ---------------------------------------------------------------------------
// Orbit tracker
// ---------------------------------------------------------------------------

/// Detects each body's first upward crossing of the x-axis.
///
/// A crossing is previous y < 0 and new y >= 0. The period recorded is the
/// elapsed time at the end of the step, in Earth years.
#[derive(Debug, Default, Clone, Copy)]
pub struct OrbitTracker;

impl OrbitTracker {
    pub fn crossed(before: &Vector2<f64>, after: &Vector2<f64>) -> bool {
        before.y < 0.0 && after.y >= 0.0
    }

    /// Inspect step `step` (positions `before` it, bodies after it) and record
    /// periods for bodies that just closed their first orbit.
    pub fn update(
        &self,
        step: usize,
        dt: f64,
        before: &[Vector2<f64>],
        bodies: &mut [Body],
    ) -> Vec<OrbitEvent> {
        let years = (step + 1) as f64 * dt / SECONDS_PER_YEAR;
        let mut events = Vec::new();
        for (i, (b, prev)) in bodies.iter_mut().zip(before).enumerate() {
            if b.period().is_some() || !Self::crossed(prev, &b.position()) {
                continue;
            }
            if b.record_period(years) {
                events.push(OrbitEvent { step, body: i, period_years: years });
            }
        }
        events
    }
}

// ---------------------------------------------------------------------------
// Approach tracker
// ---------------------------------------------------------------------------

/// Running minimum of the distance between two designated bodies.
#[derive(Debug, Clone)]
pub struct ApproachTracker {
    target: usize,
    probe: usize,
    closest: Option<Approach>,
}

impl ApproachTracker {
    /// Rejects out-of-range indices and a probe that is its own target.
    pub fn new(target: usize, probe: usize, body_count: usize) -> Result<Self> {
        for (role, index) in [("target", target), ("probe", probe)] {
            if index >= body_count {
                return Err(Error::out_of_range(role, index, body_count));
            }
        }
        if target == probe {
            return Err(Error::InvalidIndex {
                role: "probe",
                index: probe,
                reason: "is also the target".into(),
            });
        }
        Ok(Self { target, probe, closest: None })
    }

    pub fn target(&self) -> usize {
        self.target
    }

    pub fn probe(&self) -> usize {
        self.probe
    }

    pub fn closest(&self) -> Option<Approach> {
        self.closest
    }

    pub fn separation(&self, bodies: &[Body]) -> f64 {
        (bodies[self.target].position() - bodies[self.probe].position()).norm()
    }

    /// Returns true when step `step` set a new minimum.
    pub fn update(&mut self, step: usize, dt: f64, bodies: &[Body]) -> bool {
        let distance = self.separation(bodies);
        let closer = match self.closest {
            Some(best) => distance < best.distance,
            None => true,
        };
        if closer {
            self.closest = Some(Approach {
                distance,
                time: step as f64 * dt,
                step,
            });
        }
        closer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::BodyConfig;

    fn at(name: &str, x: f64, y: f64) -> Body {
        Body::from_config(&BodyConfig::new(name, 1.0, [x, y], [0.0, 0.0])).unwrap()
    }

    #[test]
    fn crossing_requires_negative_then_non_negative() {
        let below = Vector2::new(1.0, -0.5);
        let on_axis = Vector2::new(1.0, 0.0);
        let above = Vector2::new(1.0, 0.5);
        assert!(OrbitTracker::crossed(&below, &on_axis));
        assert!(OrbitTracker::crossed(&below, &above));
        assert!(!OrbitTracker::crossed(&above, &below));
        assert!(!OrbitTracker::crossed(&on_axis, &above));
    }

    #[test]
    fn period_recorded_at_end_of_step() {
        let tracker = OrbitTracker;
        let mut bodies = vec![at("A", 1.0, 0.1), at("B", 1.0, -0.1)];
        let before = vec![Vector2::new(1.0, -0.1), Vector2::new(1.0, -0.2)];
        let events = tracker.update(9, SECONDS_PER_YEAR / 10.0, &before, &mut bodies);

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].body, 0);
        assert!((bodies[0].period().unwrap() - 1.0).abs() < 1e-12);
        assert_eq!(bodies[1].period(), None);
    }

    #[test]
    fn period_only_set_once() {
        let tracker = OrbitTracker;
        let mut bodies = vec![at("A", 1.0, 0.1)];
        let before = vec![Vector2::new(1.0, -0.1)];
        tracker.update(0, 10.0, &before, &mut bodies);
        let events = tracker.update(5, 10.0, &before, &mut bodies);
        assert!(events.is_empty());
        assert_eq!(bodies[0].period(), Some(10.0 / SECONDS_PER_YEAR));
    }

    #[test]
    fn approach_is_running_minimum() {
        let mut tracker = ApproachTracker::new(0, 1, 2).unwrap();
        let dt = 60.0;

        assert!(tracker.update(0, dt, &[at("T", 0.0, 0.0), at("P", 10.0, 0.0)]));
        assert!(tracker.update(1, dt, &[at("T", 0.0, 0.0), at("P", 4.0, 0.0)]));
        assert!(!tracker.update(2, dt, &[at("T", 0.0, 0.0), at("P", 7.0, 0.0)]));
        // Ties keep the earlier time
        assert!(!tracker.update(3, dt, &[at("T", 0.0, 0.0), at("P", 0.0, 4.0)]));

        let best = tracker.closest().unwrap();
        assert_eq!(best.distance, 4.0);
        assert_eq!(best.time, 60.0);
        assert_eq!(best.step, 1);
    }

    #[test]
    fn invalid_indices_rejected() {
        assert!(matches!(
            ApproachTracker::new(0, 3, 3),
            Err(Error::InvalidIndex { role: "probe", index: 3, .. })
        ));
        assert!(matches!(
            ApproachTracker::new(5, 0, 3),
            Err(Error::InvalidIndex { role: "target", .. })
        ));
        let same = ApproachTracker::new(1, 1, 3).unwrap_err();
        assert!(matches!(same, Error::InvalidIndex { role: "probe", index: 1, .. }));
        assert_eq!(same.to_string(), "probe index 1 is also the target");
    }
}
