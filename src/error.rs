use thiserror::Error;

/// Construction-time failures. Anything that reaches a running simulation
/// has already been validated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("invalid mass: dry {dry} kg, wet {wet} kg (require 0 < dry < wet)")]
    InvalidMass { dry: f64, wet: f64 },

    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("invalid engine: {0}")]
    InvalidEngine(String),

    #[error("invalid propulsion system: {0}")]
    InvalidPropulsion(String),

    #[error("invalid time step: {0} s (must be finite and > 0)")]
    InvalidTimeStep(f64),

    #[error("invalid initial state: {0}")]
    InvalidState(String),
}
