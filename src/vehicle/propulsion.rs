use nalgebra::{Rotation3, Vector3};

use super::engine::Engine;
use crate::error::SimError;
use crate::math::VectorExt;

pub const DEFAULT_MAX_GIMBAL_DEG: f64 = 5.0;

// ---------------------------------------------------------------------------
// Propulsion system: engines sharing one propellant reservoir
// ---------------------------------------------------------------------------

/// Engines, shared fuel and the thrust-vector gimbal. Not `Clone`: a
/// simulation takes it by value and is its only owner.
#[derive(Debug)]
pub struct PropulsionSystem {
    engines: Vec<Engine>,
    fuel_mass: f64,                 // kg, current
    initial_fuel_mass: f64,         // kg
    thrust_direction: Vector3<f64>, // unit, before gimbal
    gimbal_x: f64,                  // rad
    gimbal_y: f64,                  // rad
    max_gimbal: f64,                // rad
}

impl PropulsionSystem {
    /// `max_gimbal_deg` is configured in degrees and stored in radians.
    pub fn new(initial_fuel: f64, max_gimbal_deg: f64) -> Result<Self, SimError> {
        if !(initial_fuel.is_finite() && initial_fuel >= 0.0) {
            return Err(SimError::InvalidPropulsion(format!(
                "fuel mass must be >= 0, got {initial_fuel}"
            )));
        }
        if !(max_gimbal_deg.is_finite() && max_gimbal_deg >= 0.0) {
            return Err(SimError::InvalidPropulsion(format!(
                "max gimbal angle must be >= 0, got {max_gimbal_deg}"
            )));
        }

        Ok(Self {
            engines: Vec::new(),
            fuel_mass: initial_fuel,
            initial_fuel_mass: initial_fuel,
            thrust_direction: Vector3::z(),
            gimbal_x: 0.0,
            gimbal_y: 0.0,
            max_gimbal: max_gimbal_deg.to_radians(),
        })
    }

    pub fn add_engine(&mut self, engine: Engine) {
        self.engines.push(engine);
    }

    /// Thrust vector (N) for this evaluation, burning the propellant it costs.
    ///
    /// The draw that empties the reservoir still delivers its thrust, but
    /// every engine is shut down before returning. Later calls return the
    /// zero vector.
    pub fn update_thrust(&mut self, ambient_pressure: f64, dt: f64) -> Vector3<f64> {
        if self.fuel_mass <= 0.0 {
            self.shutdown_all_engines();
            return Vector3::zeros();
        }

        let (thrust, consumed) = self
            .engines
            .iter()
            .filter(|e| e.is_active())
            .fold((0.0, 0.0), |(f, m), e| {
                (f + e.thrust(ambient_pressure), m + e.fuel_consumption(dt))
            });

        self.fuel_mass = (self.fuel_mass - consumed).max(0.0);
        if self.fuel_mass <= 0.0 {
            self.shutdown_all_engines();
        }

        self.thrust_direction() * thrust
    }

    /// Both angles are clamped to +/- the configured maximum.
    pub fn set_gimbal_angles(&mut self, angle_x: f64, angle_y: f64) {
        self.gimbal_x = angle_x.clamp(-self.max_gimbal, self.max_gimbal);
        self.gimbal_y = angle_y.clamp(-self.max_gimbal, self.max_gimbal);
    }

    /// (x, y) in radians.
    pub fn gimbal_angles(&self) -> (f64, f64) {
        (self.gimbal_x, self.gimbal_y)
    }

    pub fn max_gimbal_angle(&self) -> f64 {
        self.max_gimbal
    }

    /// Point the base thrust axis radially away from the planet center.
    pub fn update_thrust_direction(&mut self, pos: &Vector3<f64>) {
        self.thrust_direction = pos.unit_or_self();
    }

    /// Base direction deflected by the gimbal: Ry(y) first, then Rx(x).
    pub fn thrust_direction(&self) -> Vector3<f64> {
        let rot = Rotation3::from_axis_angle(&Vector3::x_axis(), self.gimbal_x)
            * Rotation3::from_axis_angle(&Vector3::y_axis(), self.gimbal_y);
        (rot * self.thrust_direction).unit_or_self()
    }

    /// Fraction of the initial load still aboard, in [0, 1].
    pub fn remaining_fuel_ratio(&self) -> f64 {
        if self.initial_fuel_mass > 0.0 {
            self.fuel_mass / self.initial_fuel_mass
        } else {
            0.0
        }
    }

    pub fn fuel_mass(&self) -> f64 { self.fuel_mass }
    pub fn initial_fuel_mass(&self) -> f64 { self.initial_fuel_mass }
    pub fn engines(&self) -> &[Engine] { &self.engines }

    pub fn is_depleted(&self) -> bool {
        self.fuel_mass <= 0.0
    }

    pub fn start_engines(&mut self) {
        for engine in &mut self.engines {
            engine.start();
        }
    }

    pub fn shutdown_all_engines(&mut self) {
        for engine in &mut self.engines {
            engine.shutdown();
        }
    }

    /// Same throttle for every engine (clamped to [0, 1] by each engine).
    pub fn set_throttle(&mut self, throttle: f64) {
        for engine in &mut self.engines {
            engine.set_throttle(throttle);
        }
    }
}
