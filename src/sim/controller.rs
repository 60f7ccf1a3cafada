use log::{debug, info, trace};
use nalgebra::Vector3;

use super::integrator::rk4_step;
use super::telemetry::Telemetry;
use crate::dynamics::State;
use crate::error::SimError;
use crate::physics::aerodynamics::aerodynamic_forces;
use crate::physics::atmosphere;
use crate::physics::constants::APPROX_SOUND_SPEED;
use crate::physics::gravity::{gravity_accel, gravity_force};
use crate::vehicle::{PropulsionSystem, RocketBody};

/// When propellant is drawn relative to the integrator's force evaluations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FuelAccounting {
    /// Thrust and fuel burn are computed once per tick and the thrust vector
    /// is held constant over every RK4 stage.
    #[default]
    PerTick,
    /// Legacy behaviour: every force evaluation (4 stages + 1 report) draws
    /// a full `dt` worth of propellant and re-samples the gimbal.
    PerEvaluation,
}

// ---------------------------------------------------------------------------
// Simulation controller
// ---------------------------------------------------------------------------

/// Owns the kinematic state, airframe and propulsion of one flight and
/// advances them one fixed tick at a time.
#[derive(Debug)]
pub struct Simulation {
    state: State,
    rocket: RocketBody,
    propulsion: PropulsionSystem,
    dt: f64,
    elapsed: f64,
    wind: Vector3<f64>,
    fuel_accounting: FuelAccounting,
}

impl Simulation {
    pub fn new(
        initial: State,
        rocket: RocketBody,
        propulsion: PropulsionSystem,
        dt: f64,
    ) -> Result<Self, SimError> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(SimError::InvalidTimeStep(dt));
        }
        if !(initial.mass.is_finite() && initial.mass > 0.0) {
            return Err(SimError::InvalidState(format!("mass must be > 0, got {}", initial.mass)));
        }
        if !(initial.pos.iter().all(|c| c.is_finite()) && initial.vel.iter().all(|c| c.is_finite())) {
            return Err(SimError::InvalidState("position and velocity must be finite".into()));
        }

        Ok(Self {
            state: initial,
            rocket,
            propulsion,
            dt,
            elapsed: 0.0,
            wind: Vector3::zeros(),
            fuel_accounting: FuelAccounting::default(),
        })
    }

    pub fn with_fuel_accounting(mut self, mode: FuelAccounting) -> Self {
        self.fuel_accounting = mode;
        self
    }

    pub fn with_wind(mut self, wind: Vector3<f64>) -> Self {
        self.wind = wind;
        self
    }

    // --- Commands ---

    pub fn start_engines(&mut self) {
        info!(
            "starting {} engine(s), {:.1} kg propellant",
            self.propulsion.engines().len(),
            self.propulsion.fuel_mass()
        );
        self.propulsion.start_engines();
    }

    pub fn set_throttle(&mut self, throttle: f64) {
        self.propulsion.set_throttle(throttle);
    }

    /// Radians; clamped to the configured gimbal range.
    pub fn set_gimbal_angles(&mut self, angle_x: f64, angle_y: f64) {
        self.propulsion.set_gimbal_angles(angle_x, angle_y);
    }

    pub fn set_wind(&mut self, wind: Vector3<f64>) {
        self.wind = wind;
    }

    /// Advance one tick of `dt` seconds.
    pub fn step(&mut self) {
        let dt = self.dt;
        let pressure = atmosphere::pressure(self.state.altitude());
        let was_depleted = self.propulsion.is_depleted();

        self.propulsion.update_thrust_direction(&self.state.pos);

        let rocket = &self.rocket;
        let wind = self.wind;
        let next = match self.fuel_accounting {
            FuelAccounting::PerTick => {
                let thrust = self.propulsion.update_thrust(pressure, dt);
                rk4_step(&self.state, dt, |s| net_acceleration(s, rocket, &wind, &thrust))
            }
            FuelAccounting::PerEvaluation => {
                let propulsion = &mut self.propulsion;
                rk4_step(&self.state, dt, |s| {
                    let thrust = propulsion.update_thrust(pressure, dt);
                    net_acceleration(s, rocket, &wind, &thrust)
                })
            }
        };

        if whole_second_crossed(self.elapsed, dt) {
            self.log_forces(pressure);
        }

        self.state = next;
        self.elapsed += dt;
        self.commit();

        if !was_depleted && self.propulsion.is_depleted() {
            info!(
                "propellant exhausted at t={:.2}s, alt={:.0}m, mass={:.1}kg",
                self.elapsed,
                self.state.altitude(),
                self.rocket.mass()
            );
        }
        trace!(
            "t={:.3}s alt={:.1}m v={:.2}m/s m={:.2}kg",
            self.elapsed,
            self.state.altitude(),
            self.state.speed(),
            self.state.mass
        );
    }

    /// Post-step mutations: mass from remaining fuel, center of mass, and a
    /// coarse coefficient refresh (Mach from a fixed sound speed, zero AoA).
    fn commit(&mut self) {
        let ratio = self.propulsion.remaining_fuel_ratio();
        self.rocket.update_mass(ratio);
        self.state.mass = self.rocket.mass();
        self.rocket.update_center_of_mass();

        let speed = self.state.speed();
        if speed > 0.0 {
            self.rocket.update_aero_coefficients(speed / APPROX_SOUND_SPEED, 0.0);
        }
    }

    fn log_forces(&self, pressure: f64) {
        let s = &self.state;
        let gravity = gravity_force(&s.pos, s.mass);
        let aero = aerodynamic_forces(s, &self.rocket, &self.wind).force;
        let thrust: f64 = self
            .propulsion
            .engines()
            .iter()
            .map(|e| e.thrust(pressure))
            .sum();
        debug!(
            "t={:.0}s forces (N): gravity={:.1} thrust={:.1} aero={:.1}",
            self.elapsed,
            gravity.norm(),
            thrust,
            aero.norm()
        );
    }

    // --- Queries ---

    pub fn state(&self) -> &State { &self.state }
    pub fn elapsed(&self) -> f64 { self.elapsed }
    pub fn dt(&self) -> f64 { self.dt }
    pub fn rocket(&self) -> &RocketBody { &self.rocket }
    pub fn propulsion(&self) -> &PropulsionSystem { &self.propulsion }
    pub fn wind(&self) -> Vector3<f64> { self.wind }
    pub fn fuel_accounting(&self) -> FuelAccounting { self.fuel_accounting }

    pub fn remaining_fuel_ratio(&self) -> f64 {
        self.propulsion.remaining_fuel_ratio()
    }

    pub fn telemetry(&self) -> Telemetry {
        Telemetry::capture(self)
    }
}

/// (gravity * m + aero + thrust) / m for a trial state.
fn net_acceleration(
    s: &State,
    rocket: &RocketBody,
    wind: &Vector3<f64>,
    thrust: &Vector3<f64>,
) -> Vector3<f64> {
    let gravity = gravity_accel(&s.pos) * s.mass;
    let aero = aerodynamic_forces(s, rocket, wind).force;
    (gravity + aero + thrust) / s.mass
}

/// True on the first tick at or after each whole simulated second.
fn whole_second_crossed(elapsed: f64, dt: f64) -> bool {
    elapsed % 1.0 < dt
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::constants::{EARTH_RADIUS, G0};
    use crate::vehicle::Engine;
    use approx::assert_relative_eq;

    fn reference_sim(mode: FuelAccounting) -> Simulation {
        let rocket = RocketBody::new(20.0, 2.0, 5000.0, 2000.0).unwrap();
        let mut propulsion = PropulsionSystem::new(3000.0, 5.0).unwrap();
        propulsion.add_engine(Engine::new(100_000.0, 300.0, 0.5, 20.0).unwrap());
        let initial = State::new(
            Vector3::new(EARTH_RADIUS + 100.0, 0.0, 0.0),
            Vector3::zeros(),
            rocket.mass(),
        );
        Simulation::new(initial, rocket, propulsion, 0.01)
            .unwrap()
            .with_fuel_accounting(mode)
    }

    #[test]
    fn rejects_bad_time_step_and_mass() {
        let rocket = RocketBody::new(20.0, 2.0, 5000.0, 2000.0).unwrap();
        let state = State::new(Vector3::new(EARTH_RADIUS, 0.0, 0.0), Vector3::zeros(), 5000.0);
        let p = PropulsionSystem::new(3000.0, 5.0).unwrap();
        assert_eq!(
            Simulation::new(state.clone(), rocket.clone(), p, 0.0).unwrap_err(),
            SimError::InvalidTimeStep(0.0)
        );

        let p = PropulsionSystem::new(3000.0, 5.0).unwrap();
        let massless = State { mass: 0.0, ..state };
        assert!(matches!(
            Simulation::new(massless, rocket, p, 0.01),
            Err(SimError::InvalidState(_))
        ));
    }

    #[test]
    fn engines_off_means_free_fall() {
        let mut sim = reference_sim(FuelAccounting::PerTick);
        sim.step();
        assert!(sim.state().radial_velocity() < 0.0);
        assert_eq!(sim.remaining_fuel_ratio(), 1.0);
        assert_eq!(sim.rocket().mass(), 5000.0);
    }

    #[test]
    fn one_tick_burns_one_tick_of_fuel() {
        let mut sim = reference_sim(FuelAccounting::PerTick);
        sim.start_engines();
        sim.set_throttle(1.0);
        sim.step();

        let mdot = 100_000.0 / (300.0 * G0);
        let burned = 3000.0 - sim.propulsion().fuel_mass();
        assert_relative_eq!(burned, mdot * 0.01, epsilon = 1e-9);
        assert_relative_eq!(sim.rocket().mass(), 5000.0 - burned, epsilon = 1e-9);
        assert_eq!(sim.state().mass, sim.rocket().mass());
        assert_relative_eq!(sim.elapsed(), 0.01);
        assert!(sim.state().radial_velocity() > 0.0, "TWR ~2 should climb");
    }

    #[test]
    fn legacy_accounting_burns_five_times_per_tick() {
        let mut per_tick = reference_sim(FuelAccounting::PerTick);
        let mut per_eval = reference_sim(FuelAccounting::PerEvaluation);
        for sim in [&mut per_tick, &mut per_eval] {
            sim.start_engines();
            sim.set_throttle(1.0);
            sim.step();
        }
        let a = 3000.0 - per_tick.propulsion().fuel_mass();
        let b = 3000.0 - per_eval.propulsion().fuel_mass();
        assert_relative_eq!(b, 5.0 * a, epsilon = 1e-9);
    }

    #[test]
    fn post_step_refresh_uses_coarse_mach() {
        let mut sim = reference_sim(FuelAccounting::PerTick);
        sim.start_engines();
        sim.set_throttle(1.0);
        for _ in 0..10 {
            sim.step();
        }
        let mach = sim.state().speed() / APPROX_SOUND_SPEED;
        assert!(mach < 0.8);
        assert_relative_eq!(sim.rocket().drag_coefficient(), 0.2);
        assert_relative_eq!(sim.rocket().lift_coefficient(), 0.0);
    }

    #[test]
    fn gimbal_command_is_clamped() {
        let mut sim = reference_sim(FuelAccounting::PerTick);
        sim.set_gimbal_angles(0.5, -0.5);
        let max = 5.0_f64.to_radians();
        assert_relative_eq!(sim.propulsion().gimbal_angles().0, max);
        assert_relative_eq!(sim.propulsion().gimbal_angles().1, -max);
    }

    #[test]
    fn headwind_changes_drag() {
        let mut calm = reference_sim(FuelAccounting::PerTick);
        let mut windy =
            reference_sim(FuelAccounting::PerTick).with_wind(Vector3::new(0.0, 30.0, 0.0));
        calm.step();
        windy.step();
        assert!(windy.state().vel.y.abs() > calm.state().vel.y.abs());
    }
}
