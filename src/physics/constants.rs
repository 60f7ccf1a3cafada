// ---------------------------------------------------------------------------
// Physical constants
// ---------------------------------------------------------------------------

pub const G: f64 = 6.674_30e-11;              // gravitational constant, N·m^2/kg^2
pub const EARTH_MASS: f64 = 5.972e24;         // kg
pub const EARTH_RADIUS: f64 = 6_371_000.0;    // mean Earth radius, m
pub const MU_EARTH: f64 = G * EARTH_MASS;     // m^3/s^2
pub const EARTH_ANGULAR_VELOCITY: f64 = 7.9e-5; // rad/s, frame rotation rate

pub const G0: f64 = 9.81;                     // standard gravity for Isp, m/s^2

// ---------------------------------------------------------------------------
// Atmosphere
// ---------------------------------------------------------------------------

pub const SEA_LEVEL_DENSITY: f64 = 1.225;       // kg/m^3
pub const SEA_LEVEL_PRESSURE: f64 = 101_325.0;  // Pa
pub const SEA_LEVEL_TEMPERATURE: f64 = 288.15;  // K
pub const SCALE_HEIGHT: f64 = 7_400.0;          // m
pub const LAPSE_RATE: f64 = -0.0065;            // K/m

pub const AIR_GAS_CONSTANT: f64 = 287.05;       // J/(kg·K)
pub const GAMMA: f64 = 1.4;                     // ratio of specific heats

/// Floor applied to temperature before taking a square root for sound speed.
pub const MIN_TEMPERATURE: f64 = 186.87;        // K
/// Coarse sound speed used for the post-step coefficient refresh.
pub const APPROX_SOUND_SPEED: f64 = 340.0;      // m/s
