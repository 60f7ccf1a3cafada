use nalgebra::Vector3;

use crate::math::VectorExt;
use crate::physics::constants::{EARTH_RADIUS, MU_EARTH};

// ---------------------------------------------------------------------------
// Kinematic state: the integrator's unit of work
// ---------------------------------------------------------------------------

/// Snapshot of the point mass at one instant.
/// Frame: planet-centered, fixed orientation.
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    pub time: f64,            // s
    pub pos: Vector3<f64>,    // m, from planet center
    pub vel: Vector3<f64>,    // m/s
    pub accel: Vector3<f64>,  // m/s^2, last evaluated value (reporting only)
    pub mass: f64,            // kg, held constant across one integration step
}

impl State {
    /// Initial condition at t = 0 with no acceleration evaluated yet.
    pub fn new(pos: Vector3<f64>, vel: Vector3<f64>, mass: f64) -> Self {
        Self {
            time: 0.0,
            pos,
            vel,
            accel: Vector3::zeros(),
            mass,
        }
    }

    /// Trial state `h` seconds ahead: position advanced with `vel_sample`,
    /// velocity advanced with `accel`. Used to build the RK4 stages.
    pub fn advanced(&self, vel_sample: &Vector3<f64>, accel: &Vector3<f64>, h: f64) -> State {
        State {
            time: self.time + h,
            pos: self.pos + vel_sample * h,
            vel: self.vel + accel * h,
            accel: *accel,
            mass: self.mass,
        }
    }

    /// Height above the mean planet radius (may be negative).
    pub fn altitude(&self) -> f64 {
        self.pos.norm() - EARTH_RADIUS
    }

    pub fn speed(&self) -> f64 {
        self.vel.norm()
    }

    /// Velocity component along the local vertical (positive = climbing).
    pub fn radial_velocity(&self) -> f64 {
        self.vel.dot(&self.pos.unit_or_self())
    }

    /// Specific mechanical energy in the two-body field, J/kg.
    pub fn specific_energy(&self) -> f64 {
        0.5 * self.vel.norm_squared() - MU_EARTH / self.pos.norm()
    }

    /// Specific angular momentum r x v, m^2/s.
    pub fn angular_momentum(&self) -> Vector3<f64> {
        self.pos.cross(&self.vel)
    }
}
