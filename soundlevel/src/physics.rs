//! Point-source sound model.
//!
//! An isotropic source spreads its power over a sphere, so the intensity at a
//! distance `r` is `P / (4πr²)`. Levels are expressed relative to the threshold
//! of hearing, `I0 = 1e-12 W/m²`.

use std::f64::consts::PI;

/// Reference intensity `I0` in W/m²
pub const REFERENCE_INTENSITY: f64 = 1e-12;

/// Lowest level shown on a chart, in dB
pub const LEVEL_FLOOR_DB: f64 = -20.0;

/// Highest level shown on a chart, in dB
pub const LEVEL_CEILING_DB: f64 = 140.0;

/// Intensity in W/m² at `distance` metres from a source radiating `power` watts.
///
/// A zero distance yields `+∞`; it is not guarded.
pub fn intensity(power: f64, distance: f64) -> f64 {
    power / (4.0 * PI * distance * distance)
}

/// Sound level in dB for an intensity in W/m².
///
/// Non-positive intensities have no level and return `-∞`. There is no epsilon
/// floor: a silent source must classify as undefined, not as a very quiet one.
pub fn level_db(intensity: f64) -> f64 {
    if intensity <= 0.0 {
        return f64::NEG_INFINITY;
    }
    10.0 * (intensity / REFERENCE_INTENSITY).log10()
}

/// Level in dB of `power` watts heard at `distance` metres.
pub fn level_at(power: f64, distance: f64) -> f64 {
    level_db(intensity(power, distance))
}

/// Clamp a level into the chart's display band.
///
/// `NaN` is passed through unchanged.
pub fn clamp_level(level: f64) -> f64 {
    level.clamp(LEVEL_FLOOR_DB, LEVEL_CEILING_DB)
}
