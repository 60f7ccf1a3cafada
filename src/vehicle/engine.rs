use crate::error::SimError;
use crate::physics::constants::{G0, SEA_LEVEL_PRESSURE};

/// Fractional thrust gain from sea level to vacuum (nozzle expansion).
const VACUUM_THRUST_GAIN: f64 = 0.3;

// ---------------------------------------------------------------------------
// Single throttleable engine
// ---------------------------------------------------------------------------

/// One thrust-producing unit. Owned by a `PropulsionSystem`; deliberately
/// not `Clone`.
#[derive(Debug)]
pub struct Engine {
    max_thrust: f64,        // N, sea level at full throttle
    isp: f64,               // s
    throat_area: f64,       // m^2
    expansion_ratio: f64,   // exit / throat area
    mass_flow_rate: f64,    // kg/s at full throttle
    throttle: f64,          // [0, 1]
    active: bool,
}

impl Engine {
    pub fn new(
        max_thrust: f64,
        isp: f64,
        throat_area: f64,
        expansion_ratio: f64,
    ) -> Result<Self, SimError> {
        if !(max_thrust.is_finite() && max_thrust >= 0.0) {
            return Err(SimError::InvalidEngine(format!("max thrust must be >= 0, got {max_thrust}")));
        }
        if !(isp.is_finite() && isp > 0.0) {
            return Err(SimError::InvalidEngine(format!("specific impulse must be > 0, got {isp}")));
        }
        if !(throat_area.is_finite() && throat_area > 0.0) {
            return Err(SimError::InvalidEngine(format!(
                "throat area must be > 0, got {throat_area}"
            )));
        }
        if !(expansion_ratio.is_finite() && expansion_ratio >= 1.0) {
            return Err(SimError::InvalidEngine(format!(
                "expansion ratio must be >= 1, got {expansion_ratio}"
            )));
        }

        Ok(Self {
            max_thrust,
            isp,
            throat_area,
            expansion_ratio,
            mass_flow_rate: max_thrust / (isp * G0),
            throttle: 0.0,
            active: false,
        })
    }

    pub fn start(&mut self) {
        self.active = true;
    }

    /// Deactivates and zeroes the throttle.
    pub fn shutdown(&mut self) {
        self.active = false;
        self.throttle = 0.0;
    }

    pub fn set_throttle(&mut self, throttle: f64) {
        self.throttle = throttle.clamp(0.0, 1.0);
    }

    /// Thrust (N) at the given ambient pressure. Grows as pressure drops:
    /// `max * throttle * (1 + (1 - p/p0) * 0.3)`.
    pub fn thrust(&self, ambient_pressure: f64) -> f64 {
        if !self.active {
            return 0.0;
        }
        let pressure_ratio = ambient_pressure / SEA_LEVEL_PRESSURE;
        let compensation = 1.0 + (1.0 - pressure_ratio) * VACUUM_THRUST_GAIN;
        self.max_thrust * self.throttle * compensation
    }

    /// Propellant burned over `dt` seconds at the current throttle (kg).
    pub fn fuel_consumption(&self, dt: f64) -> f64 {
        if !self.active {
            return 0.0;
        }
        self.mass_flow_rate * self.throttle * dt
    }

    pub fn is_active(&self) -> bool { self.active }
    pub fn throttle(&self) -> f64 { self.throttle }
    pub fn max_thrust(&self) -> f64 { self.max_thrust }
    pub fn isp(&self) -> f64 { self.isp }
    pub fn mass_flow_rate(&self) -> f64 { self.mass_flow_rate }
    pub fn throat_area(&self) -> f64 { self.throat_area }
    pub fn expansion_ratio(&self) -> f64 { self.expansion_ratio }

    /// Nozzle exit area, m^2.
    pub fn exit_area(&self) -> f64 {
        self.throat_area * self.expansion_ratio
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn engine() -> Engine {
        Engine::new(100_000.0, 300.0, 0.5, 20.0).unwrap()
    }

    #[test]
    fn mass_flow_from_isp() {
        let e = engine();
        assert_relative_eq!(e.mass_flow_rate(), 100_000.0 / (300.0 * 9.81));
        assert_relative_eq!(e.exit_area(), 10.0);
    }

    #[test]
    fn inactive_engine_produces_nothing() {
        let mut e = engine();
        e.set_throttle(1.0);
        assert_eq!(e.thrust(SEA_LEVEL_PRESSURE), 0.0);
        assert_eq!(e.fuel_consumption(1.0), 0.0);
    }

    #[test]
    fn thrust_compensates_for_altitude() {
        let mut e = engine();
        e.start();
        e.set_throttle(1.0);
        assert_relative_eq!(e.thrust(SEA_LEVEL_PRESSURE), 100_000.0);
        assert_relative_eq!(e.thrust(0.0), 130_000.0, epsilon = 1e-6);
        assert_relative_eq!(e.thrust(SEA_LEVEL_PRESSURE / 2.0), 115_000.0, epsilon = 1e-6);
    }

    #[test]
    fn throttle_is_clamped_and_scales_consumption() {
        let mut e = engine();
        e.start();
        e.set_throttle(2.0);
        assert_eq!(e.throttle(), 1.0);
        e.set_throttle(-1.0);
        assert_eq!(e.throttle(), 0.0);
        e.set_throttle(0.5);
        assert_relative_eq!(e.fuel_consumption(2.0), e.mass_flow_rate());
    }

    #[test]
    fn shutdown_zeroes_throttle() {
        let mut e = engine();
        e.start();
        e.set_throttle(0.8);
        e.shutdown();
        assert!(!e.is_active());
        assert_eq!(e.throttle(), 0.0);
    }

    #[test]
    fn rejects_bad_parameters() {
        assert!(Engine::new(-1.0, 300.0, 0.5, 20.0).is_err());
        assert!(Engine::new(1.0, 0.0, 0.5, 20.0).is_err());
        assert!(Engine::new(1.0, 300.0, 0.0, 20.0).is_err());
        assert!(Engine::new(1.0, 300.0, 0.5, 0.5).is_err());
    }
}
