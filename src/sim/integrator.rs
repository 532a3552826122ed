use crate::dynamics::Body;
use crate::error::Result;
use crate::physics::gravity;

// ---------------------------------------------------------------------------
// Beeman predictor-corrector, fixed step
// ---------------------------------------------------------------------------

/// Advance every body by one step of `dt`.
///
/// Each phase evaluates forces for all bodies from one snapshot before any
/// body is touched:
///   1. a_n from r_n (history shifts; a_{n-1} := a_n on the first step)
///   2. predict r_{n+1} from v_n, a_n, a_{n-1}
///   3. a_{n+1} from the predicted positions
///   4. correct v_{n+1} from a_{n+1}, a_n, a_{n-1}
///
/// Phase 3 is a full second sweep; it cannot reuse phase 1's values. On error
/// the bodies may be partially advanced and must not be trusted.
pub fn beeman_step(bodies: &mut [Body], dt: f64, first: bool) -> Result<()> {
    let a_now = gravity::accelerations(bodies)?;
    for (b, a) in bodies.iter_mut().zip(a_now) {
        b.push_acceleration(a, first);
    }

    for b in bodies.iter_mut() {
        b.predict_position(dt);
    }

    let a_next = gravity::accelerations(bodies)?;
    for (b, a) in bodies.iter_mut().zip(a_next) {
        b.correct_velocity(a, dt);
    }

    Ok(())
}
