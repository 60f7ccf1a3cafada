use nalgebra::Vector3;

use crate::dynamics::State;

// ---------------------------------------------------------------------------
// Classical 4th-order Runge-Kutta, fixed step
// ---------------------------------------------------------------------------

/// Advance `state` by `dt` given an acceleration field a(state).
///
/// `accel` is called five times: four RK4 stages plus one evaluation at the
/// result, stored in `State::accel` for reporting only. Mass is carried
/// through unchanged. `FnMut` so callers may account for per-evaluation
/// side effects.
pub fn rk4_step<F>(state: &State, dt: f64, mut accel: F) -> State
where
    F: FnMut(&State) -> Vector3<f64>,
{
    let half = dt * 0.5;

    let v1 = state.vel;
    let k1 = accel(state);

    let s2 = state.advanced(&v1, &k1, half);
    let v2 = s2.vel;
    let k2 = accel(&s2);

    let s3 = state.advanced(&v2, &k2, half);
    let v3 = s3.vel;
    let k3 = accel(&s3);

    let s4 = state.advanced(&v3, &k3, dt);
    let v4 = s4.vel;
    let k4 = accel(&s4);

    let mut next = State {
        time: state.time + dt,
        pos: state.pos + (v1 + 2.0 * v2 + 2.0 * v3 + v4) * (dt / 6.0),
        vel: state.vel + (k1 + 2.0 * k2 + 2.0 * k3 + k4) * (dt / 6.0),
        accel: Vector3::zeros(),
        mass: state.mass,
    };
    next.accel = accel(&next);
    next
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
