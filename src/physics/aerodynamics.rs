use nalgebra::Vector3;

use super::atmosphere;
use super::constants::{EARTH_ANGULAR_VELOCITY, GAMMA};
use crate::dynamics::State;
use crate::math::VectorExt;
use crate::vehicle::RocketBody;

/// Below this relative airspeed (m/s) no aerodynamic force is produced.
const MIN_AIRSPEED: f64 = 1e-6;

// ---------------------------------------------------------------------------
// Coefficients
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AeroCoefficients {
    pub drag: f64,
    pub lift: f64,
}

impl AeroCoefficients {
    /// Coefficients for a given Mach number and angle of attack (rad).
    pub fn at(mach: f64, angle_of_attack: f64) -> Self {
        Self {
            drag: drag_coefficient(mach),
            lift: 0.1 * (2.0 * angle_of_attack).sin(),
        }
    }
}

/// Piecewise Cd: 0.2 subsonic, linear 0.2 -> 0.4 through the transonic band,
/// 0.4 supersonic.
pub fn drag_coefficient(mach: f64) -> f64 {
    if mach < 0.8 {
        0.2
    } else if mach < 1.2 {
        0.2 + 0.5 * (mach - 0.8)
    } else {
        0.4
    }
}

// ---------------------------------------------------------------------------
// Flight conditions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FlightConditions {
    pub mach: f64,
    pub angle_of_attack: f64,  // rad, against the fixed vertical axis
    pub dynamic_pressure: f64, // Pa, from relative airspeed
    pub wind: Vector3<f64>,    // m/s
}

/// Mach, angle of attack and dynamic pressure of the airflow relative to `wind`.
pub fn flight_conditions(state: &State, wind: &Vector3<f64>) -> FlightConditions {
    let rel = state.vel - wind;
    let airspeed = rel.norm();
    if airspeed < MIN_AIRSPEED {
        return FlightConditions { wind: *wind, ..Default::default() };
    }

    let atm = atmosphere::sample(state.altitude());
    let cos_aoa = (rel.dot(&Vector3::z()).abs() / airspeed).clamp(0.0, 1.0);

    FlightConditions {
        mach: airspeed / atm.sound_speed,
        angle_of_attack: cos_aoa.acos(),
        dynamic_pressure: 0.5 * atm.density * airspeed * airspeed,
        wind: *wind,
    }
}

// ---------------------------------------------------------------------------
// Forces
// ---------------------------------------------------------------------------

/// Result of one aerodynamic evaluation. The coefficients are the ones the
/// force was computed with; applying them to the rocket is the caller's call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AeroSample {
    pub force: Vector3<f64>,  // N
    pub coefficients: AeroCoefficients,
    pub conditions: FlightConditions,
}

/// Drag + lift + rotating-frame (Coriolis) correction, in newtons.
///
/// Coefficients are refreshed from the local Mach number and angle of attack
/// before the force is formed, so the result never depends on stale values
/// stored in `rocket`. `rocket` itself is not modified.
pub fn aerodynamic_forces(state: &State, rocket: &RocketBody, wind: &Vector3<f64>) -> AeroSample {
    let conditions = flight_conditions(state, wind);
    let rel = state.vel - wind;
    if rel.norm() < MIN_AIRSPEED {
        return AeroSample {
            force: Vector3::zeros(),
            coefficients: rocket.coefficients(),
            conditions,
        };
    }

    let coefficients = AeroCoefficients::at(conditions.mach, conditions.angle_of_attack);
    let q_area = conditions.dynamic_pressure * rocket.reference_area();

    let drag = -rel.unit_or_self() * (q_area * coefficients.drag);
    let lift = rel.cross(&Vector3::z()).unit_or_self() * (q_area * coefficients.lift);

    let omega = Vector3::new(0.0, 0.0, -EARTH_ANGULAR_VELOCITY);
    let coriolis = omega.cross(&state.vel) * (-2.0 * rocket.mass());

    AeroSample {
        force: drag + lift + coriolis,
        coefficients,
        conditions,
    }
}

/// 0.5 * rho * v^2 using the inertial velocity (no wind).
pub fn dynamic_pressure(state: &State) -> f64 {
    let speed = state.speed();
    0.5 * atmosphere::density(state.altitude()) * speed * speed
}

/// Isentropic stagnation temperature T0 = T * (1 + (gamma - 1)/2 * M^2).
pub fn stagnation_temperature(state: &State, ambient_temp: f64) -> f64 {
    let mach = state.speed() / atmosphere::sound_speed(ambient_temp);
    ambient_temp * (1.0 + 0.5 * (GAMMA - 1.0) * mach * mach)
}
