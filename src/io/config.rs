use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::SimError;
use crate::vehicle::{Engine, PropulsionSystem, RocketBody, DEFAULT_MAX_GIMBAL_DEG};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read vehicle config: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed vehicle config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid vehicle: {0}")]
    Invalid(#[from] SimError),
}

// ---------------------------------------------------------------------------
// Vehicle description
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RocketConfig {
    pub length: f64,   // m
    pub diameter: f64, // m
    pub wet_mass: f64, // kg
    pub dry_mass: f64, // kg
}

/// Engine entry. Also reads the older `thrust`/`burn_rate` files, whose
/// `efficiency` and `nozzle_diameter` keys have no counterpart and are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(alias = "thrust")]
    pub max_thrust: f64,       // N
    #[serde(alias = "burn_rate")]
    pub specific_impulse: f64, // s
    #[serde(default = "default_throat_area")]
    pub throat_area: f64,      // m^2
    #[serde(default = "default_expansion_ratio")]
    pub expansion_ratio: f64,
}

fn default_throat_area() -> f64 {
    0.5
}

fn default_expansion_ratio() -> f64 {
    20.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropulsionConfig {
    pub fuel_mass: f64, // kg
    #[serde(default = "default_max_gimbal_deg")]
    pub max_gimbal_deg: f64,
    pub engines: Vec<EngineConfig>,
}

fn default_max_gimbal_deg() -> f64 {
    DEFAULT_MAX_GIMBAL_DEG
}

/// Everything needed to assemble one vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleConfig {
    pub rocket: RocketConfig,
    pub propulsion: PropulsionConfig,
}

impl Default for VehicleConfig {
    /// 5 t single-engine reference vehicle, burnout near 88 s at full throttle.
    fn default() -> Self {
        Self {
            rocket: RocketConfig {
                length: 20.0,
                diameter: 2.0,
                wet_mass: 5000.0,
                dry_mass: 2000.0,
            },
            propulsion: PropulsionConfig {
                fuel_mass: 3000.0,
                max_gimbal_deg: DEFAULT_MAX_GIMBAL_DEG,
                engines: vec![EngineConfig {
                    max_thrust: 100_000.0,
                    specific_impulse: 300.0,
                    throat_area: default_throat_area(),
                    expansion_ratio: default_expansion_ratio(),
                }],
            },
        }
    }
}

impl VehicleConfig {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Validate and assemble the airframe and propulsion system.
    /// Engines are created inactive.
    pub fn build(&self) -> Result<(RocketBody, PropulsionSystem), SimError> {
        let r = &self.rocket;
        let rocket = RocketBody::new(r.length, r.diameter, r.wet_mass, r.dry_mass)?;

        let p = &self.propulsion;
        let mut propulsion = PropulsionSystem::new(p.fuel_mass, p.max_gimbal_deg)?;
        for e in &p.engines {
            propulsion.add_engine(Engine::new(
                e.max_thrust,
                e.specific_impulse,
                e.throat_area,
                e.expansion_ratio,
            )?);
        }
        Ok((rocket, propulsion))
    }
}
