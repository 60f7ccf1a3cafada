use nalgebra::Vector3;
use serde::Serialize;

use crate::physics::constants::EARTH_RADIUS;

const KEPLER_TOL: f64 = 1e-14;
const KEPLER_MAX_ITER: usize = 50;

// ---------------------------------------------------------------------------
// Two-body reference propagation
// ---------------------------------------------------------------------------

/// Propagate a two-body elliptic trajectory by `dt` seconds using Lagrange
/// f and g coefficients. Returns `None` for parabolic/hyperbolic input or a
/// degenerate position.
pub fn propagate(
    pos: &Vector3<f64>,
    vel: &Vector3<f64>,
    dt: f64,
    mu: f64,
) -> Option<(Vector3<f64>, Vector3<f64>)> {
    let r0 = pos.norm();
    if r0 <= 0.0 {
        return None;
    }
    let inv_a = 2.0 / r0 - vel.norm_squared() / mu;
    if inv_a <= 0.0 {
        return None;
    }
    let a = 1.0 / inv_a;
    let n = (mu * inv_a.powi(3)).sqrt(); // mean motion

    // e*cos(E0), e*sin(E0)
    let ec = 1.0 - r0 * inv_a;
    let es = pos.dot(vel) / (mu * a).sqrt();

    // Kepler's equation in the eccentric-anomaly change dE:
    // dE - ec*sin(dE) + es*(1 - cos(dE)) = n*dt
    let m = n * dt;
    let mut de = m;
    for _ in 0..KEPLER_MAX_ITER {
        let (s, c) = de.sin_cos();
        let f = de - ec * s + es * (1.0 - c) - m;
        let fp = 1.0 - ec * c + es * s;
        let step = f / fp;
        de -= step;
        if step.abs() < KEPLER_TOL {
            break;
        }
    }

    let (s, _) = de.sin_cos();
    let one_minus_c = 2.0 * (0.5 * de).sin().powi(2);

    let f = 1.0 - a / r0 * one_minus_c;
    let g = dt - (de - s) / n;
    let r_new = f * pos + g * vel;
    let r = r_new.norm();
    let fdot = -(mu * a).sqrt() / (r * r0) * s;
    let gdot = 1.0 - a / r * one_minus_c;

    Some((r_new, fdot * pos + gdot * vel))
}

// ---------------------------------------------------------------------------
// Orbit shape summary
// ---------------------------------------------------------------------------

/// Osculating orbit shape for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OrbitSummary {
    pub sma: f64,                // m, negative for hyperbolic
    pub ecc: f64,
    pub apoapsis_altitude: f64,  // m, infinite when unbound
    pub periapsis_altitude: f64, // m
}

impl OrbitSummary {
    pub fn from_state(pos: &Vector3<f64>, vel: &Vector3<f64>, mu: f64) -> Self {
        let r = pos.norm();
        let v = vel.norm();

        let e_vec = ((v * v - mu / r) * pos - pos.dot(vel) * vel) / mu;
        let ecc = e_vec.norm();
        let energy = 0.5 * v * v - mu / r;
        let sma = -mu / (2.0 * energy);

        // Boundness from energy: a radial bound path has e == 1 up to rounding.
        let h = pos.cross(vel).norm();
        let periapsis = h * h / (mu * (1.0 + ecc));
        let apoapsis = if energy < 0.0 {
            2.0 * sma - periapsis
        } else {
            f64::INFINITY
        };

        OrbitSummary {
            sma,
            ecc,
            apoapsis_altitude: apoapsis - EARTH_RADIUS,
            periapsis_altitude: periapsis - EARTH_RADIUS,
        }
    }

    /// Negative specific energy, i.e. a finite positive semi-major axis.
    pub fn is_bound(&self) -> bool {
        self.sma > 0.0 && self.sma.is_finite()
    }
}
