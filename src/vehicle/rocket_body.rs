use nalgebra::Vector3;

use crate::error::SimError;
use crate::physics::AeroCoefficients;

/// Structure centroid, as a fraction of length measured from the tail.
const STRUCTURE_CENTROID: f64 = 0.5;
/// Propellant centroid, as a fraction of length measured from the tail.
const PROPELLANT_CENTROID: f64 = 0.35;

// ---------------------------------------------------------------------------
// Rigid-body mass and aerodynamic properties
// ---------------------------------------------------------------------------

/// Airframe properties. Mutated once per completed tick by the simulation,
/// never while the integrator is evaluating trial states.
#[derive(Debug, Clone)]
pub struct RocketBody {
    length: f64,                   // m
    diameter: f64,                 // m
    reference_area: f64,           // m^2
    coefficients: AeroCoefficients,
    center_of_mass: Vector3<f64>,  // m from the tail, along the body axis
    mass: f64,                     // kg, current
    wet_mass: f64,                 // kg, full tanks
    dry_mass: f64,                 // kg, empty tanks
}

impl RocketBody {
    /// Fails unless `0 < dry_mass < wet_mass` and the geometry is positive.
    pub fn new(length: f64, diameter: f64, wet_mass: f64, dry_mass: f64) -> Result<Self, SimError> {
        let masses_ok = wet_mass.is_finite()
            && dry_mass.is_finite()
            && dry_mass > 0.0
            && wet_mass > 0.0
            && dry_mass < wet_mass;
        if !masses_ok {
            return Err(SimError::InvalidMass { dry: dry_mass, wet: wet_mass });
        }
        if !(length.is_finite() && length > 0.0) {
            return Err(SimError::InvalidGeometry(format!("length must be > 0, got {length}")));
        }
        if !(diameter.is_finite() && diameter > 0.0) {
            return Err(SimError::InvalidGeometry(format!(
                "diameter must be > 0, got {diameter}"
            )));
        }

        let mut body = Self {
            length,
            diameter,
            reference_area: std::f64::consts::PI * diameter * diameter / 4.0,
            coefficients: AeroCoefficients::default(),
            center_of_mass: Vector3::zeros(),
            mass: wet_mass,
            wet_mass,
            dry_mass,
        };
        body.update_center_of_mass();
        Ok(body)
    }

    pub fn length(&self) -> f64 { self.length }
    pub fn diameter(&self) -> f64 { self.diameter }
    pub fn reference_area(&self) -> f64 { self.reference_area }
    pub fn coefficients(&self) -> AeroCoefficients { self.coefficients }
    pub fn drag_coefficient(&self) -> f64 { self.coefficients.drag }
    pub fn lift_coefficient(&self) -> f64 { self.coefficients.lift }
    pub fn center_of_mass(&self) -> Vector3<f64> { self.center_of_mass }
    pub fn mass(&self) -> f64 { self.mass }
    pub fn wet_mass(&self) -> f64 { self.wet_mass }
    pub fn dry_mass(&self) -> f64 { self.dry_mass }

    /// Propellant the tanks hold when full.
    pub fn fuel_capacity(&self) -> f64 {
        self.wet_mass - self.dry_mass
    }

    /// Propellant currently aboard.
    pub fn fuel_mass(&self) -> f64 {
        self.mass - self.dry_mass
    }

    /// Set mass from the remaining fuel fraction: dry + capacity * ratio.
    pub fn update_mass(&mut self, fuel_ratio: f64) {
        let ratio = fuel_ratio.clamp(0.0, 1.0);
        self.mass = self.dry_mass + self.fuel_capacity() * ratio;
    }

    /// Mass-weighted centroid of structure and remaining propellant.
    pub fn update_center_of_mass(&mut self) {
        let moment = self.dry_mass * STRUCTURE_CENTROID * self.length
            + self.fuel_mass() * PROPELLANT_CENTROID * self.length;
        self.center_of_mass = Vector3::new(0.0, 0.0, moment / self.mass);
    }

    pub fn update_aero_coefficients(&mut self, mach: f64, angle_of_attack: f64) {
        self.coefficients = AeroCoefficients::at(mach, angle_of_attack);
    }

    pub fn apply_coefficients(&mut self, coefficients: AeroCoefficients) {
        self.coefficients = coefficients;
    }
}
