use super::constants::{
    AIR_GAS_CONSTANT, GAMMA, LAPSE_RATE, MIN_TEMPERATURE, SCALE_HEIGHT, SEA_LEVEL_DENSITY,
    SEA_LEVEL_PRESSURE, SEA_LEVEL_TEMPERATURE,
};

// ---------------------------------------------------------------------------
// Exponential atmosphere with a linear temperature lapse
// ---------------------------------------------------------------------------

/// Atmospheric properties at a given geometric altitude.
#[derive(Debug, Clone, Copy)]
pub struct Atmo {
    pub density: f64,      // kg/m^3
    pub pressure: f64,     // Pa
    pub temperature: f64,  // K
    pub sound_speed: f64,  // m/s
}

/// All properties at once. Negative altitudes are clamped to sea level.
pub fn sample(altitude_m: f64) -> Atmo {
    let temperature = temperature(altitude_m);
    Atmo {
        density: density(altitude_m),
        pressure: pressure(altitude_m),
        temperature,
        sound_speed: sound_speed(temperature),
    }
}

/// rho = rho0 * exp(-h / H)
pub fn density(altitude_m: f64) -> f64 {
    SEA_LEVEL_DENSITY * (-altitude_m.max(0.0) / SCALE_HEIGHT).exp()
}

/// p = p0 * exp(-h / H)
pub fn pressure(altitude_m: f64) -> f64 {
    SEA_LEVEL_PRESSURE * (-altitude_m.max(0.0) / SCALE_HEIGHT).exp()
}

/// T = T0 + L * h
pub fn temperature(altitude_m: f64) -> f64 {
    SEA_LEVEL_TEMPERATURE + LAPSE_RATE * altitude_m.max(0.0)
}

/// a = sqrt(gamma * R * T). The lapse turns negative above ~44 km, so the
/// temperature is floored first.
pub fn sound_speed(temperature: f64) -> f64 {
    (GAMMA * AIR_GAS_CONSTANT * temperature.max(MIN_TEMPERATURE)).sqrt()
}
