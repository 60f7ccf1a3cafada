use serde::Serialize;

use super::controller::Simulation;
use crate::physics::aerodynamics::{self, flight_conditions};
use crate::physics::atmosphere;

/// Pull-based snapshot of one simulation instant, in SI units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Telemetry {
    pub time: f64,                   // s, elapsed
    pub altitude: f64,               // m
    pub speed: f64,                  // m/s
    pub radial_velocity: f64,        // m/s
    pub acceleration: f64,           // m/s^2
    pub mass: f64,                   // kg
    pub fuel_ratio: f64,
    pub dynamic_pressure: f64,       // Pa, relative to the wind
    pub mach: f64,
    pub angle_of_attack: f64,        // rad
    pub drag_coefficient: f64,
    pub lift_coefficient: f64,
    pub temperature: f64,            // K
    pub pressure: f64,               // Pa
    pub stagnation_temperature: f64, // K
}

impl Telemetry {
    pub fn capture(sim: &Simulation) -> Self {
        let s = sim.state();
        let altitude = s.altitude();
        let atm = atmosphere::sample(altitude);
        let conditions = flight_conditions(s, &sim.wind());
        let rocket = sim.rocket();

        Telemetry {
            time: sim.elapsed(),
            altitude,
            speed: s.speed(),
            radial_velocity: s.radial_velocity(),
            acceleration: s.accel.norm(),
            mass: rocket.mass(),
            fuel_ratio: sim.remaining_fuel_ratio(),
            dynamic_pressure: conditions.dynamic_pressure,
            mach: conditions.mach,
            angle_of_attack: conditions.angle_of_attack,
            drag_coefficient: rocket.drag_coefficient(),
            lift_coefficient: rocket.lift_coefficient(),
            temperature: atm.temperature,
            pressure: atm.pressure,
            stagnation_temperature: aerodynamics::stagnation_temperature(s, atm.temperature),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::State;
    use crate::physics::constants::EARTH_RADIUS;
    use crate::vehicle::{PropulsionSystem, RocketBody};
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    #[test]
    fn snapshot_reflects_state() {
        let rocket = RocketBody::new(20.0, 2.0, 5000.0, 2000.0).unwrap();
        let propulsion = PropulsionSystem::new(3000.0, 5.0).unwrap();
        let state = State::new(
            Vector3::new(EARTH_RADIUS + 1000.0, 0.0, 0.0),
            Vector3::new(0.0, 100.0, 0.0),
            rocket.mass(),
        );
        let sim = Simulation::new(state, rocket, propulsion, 0.01).unwrap();
        let t = sim.telemetry();

        assert_relative_eq!(t.altitude, 1000.0, epsilon = 1e-6);
        assert_relative_eq!(t.speed, 100.0);
        assert_relative_eq!(t.temperature, 281.65, epsilon = 1e-9);
        assert_relative_eq!(t.fuel_ratio, 1.0);
        assert_relative_eq!(t.mass, 5000.0);
        assert_relative_eq!(t.mach, 100.0 / atmosphere::sound_speed(281.65), epsilon = 1e-12);
        assert!(t.stagnation_temperature > t.temperature);
        assert_eq!(t.time, 0.0);
    }
}
