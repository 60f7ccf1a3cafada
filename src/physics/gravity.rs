use nalgebra::Vector3;

use super::constants::MU_EARTH;
use crate::math::VectorExt;

/// Inverse-square gravity toward the planet center.
/// `pos` is measured from the center (m); result in m/s^2.
pub fn gravity_accel(pos: &Vector3<f64>) -> Vector3<f64> {
    let r = pos.norm();
    if r < 1.0 {
        return Vector3::zeros();
    }
    pos.unit_or_self() * (-MU_EARTH / (r * r))
}

/// Gravitational force on a body of the given mass (N).
pub fn gravity_force(pos: &Vector3<f64>, mass: f64) -> Vector3<f64> {
    gravity_accel(pos) * mass
}
