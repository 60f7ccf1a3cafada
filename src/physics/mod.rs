pub mod aerodynamics;
pub mod atmosphere;
pub mod constants;
pub mod gravity;

pub use aerodynamics::{AeroCoefficients, AeroSample, FlightConditions};
pub use atmosphere::Atmo;
