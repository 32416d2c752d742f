//! The quantities shown for one setting and their display text.

use crate::format::{SafetyBand, format_db, format_distance, format_sci, safety_summary};
use crate::physics::{intensity, level_db};
use serde::{Deserialize, Serialize};

/// Computed values for a power exponent and a distance.
///
/// Non-finite values are kept as they come out of the model; they only turn
/// into placeholders when formatted.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Readout {
    /// Source power in W
    pub power: f64,
    /// Distance in m
    pub distance: f64,
    /// Intensity in W/m²
    pub intensity: f64,
    /// Level in dB, unclamped
    pub level_db: f64,
    /// `None` when the level is not finite
    pub safety: Option<SafetyBand>,
}

impl Readout {
    /// Compute the readout for `P = 10^power_exponent` watts at `distance` metres
    pub fn compute(power_exponent: f64, distance: f64) -> Self {
        Self::for_power(10f64.powf(power_exponent), distance)
    }

    pub fn for_power(power: f64, distance: f64) -> Self {
        let intensity = intensity(power, distance);
        let level_db = level_db(intensity);
        Self {
            power,
            distance,
            intensity,
            level_db,
            safety: SafetyBand::classify(level_db),
        }
    }

    pub fn formatted(&self) -> FormattedReadout {
        FormattedReadout {
            power: format_sci(self.power),
            distance: format_distance(self.distance),
            intensity: format_sci(self.intensity),
            level: format_db(self.level_db),
            safety: safety_summary(self.level_db),
        }
    }
}

/// Display text for each readout field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FormattedReadout {
    pub power: String,
    pub distance: String,
    pub intensity: String,
    pub level: String,
    pub safety: String,
}

impl std::fmt::Display for FormattedReadout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Power:     {} W", self.power)?;
        writeln!(f, "Distance:  {} m", self.distance)?;
        writeln!(f, "Intensity: {} W/m²", self.intensity)?;
        writeln!(f, "Level:     {} dB", self.level)?;
        write!(f, "Safety:    {}", self.safety)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn one_watt_at_one_metre() {
        let readout = Readout::compute(0.0, 1.0);
        assert_eq!(readout.power, 1.0);
        assert_relative_eq!(readout.intensity, 0.0795775, epsilon = 1e-6);
        assert_relative_eq!(readout.level_db, 109.0079, epsilon = 1e-3);
        assert_eq!(readout.safety, Some(SafetyBand::Extreme));

        let text = readout.formatted();
        assert_eq!(text.power, "1");
        assert_eq!(text.distance, "1.0");
        assert_eq!(text.intensity, "0.0796");
        assert_eq!(text.level, "109.0");
        assert_eq!(text.safety, "extreme (hearing danger)");
    }

    #[test]
    fn zero_distance_formats_as_placeholders() {
        let readout = Readout::compute(0.0, 0.0);
        assert_eq!(readout.intensity, f64::INFINITY);
        assert_eq!(readout.safety, None);

        let text = readout.formatted();
        assert_eq!(text.intensity, "—");
        assert_eq!(text.level, "—");
        assert!(text.safety.starts_with("undefined"));
    }

    #[test]
    fn display_lists_every_field() {
        let shown = Readout::compute(-6.0, 10.0).formatted().to_string();
        assert!(shown.contains("Power:     1.000×10^-6 W"));
        assert!(shown.contains("Distance:  10.0 m"));
        assert!(shown.contains("Level:     29.0 dB"));
        assert!(shown.ends_with("Safety:    weak (quiet room)"));
    }
}
