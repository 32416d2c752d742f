//! Text formatting for readouts and the qualitative safety bands.
//!
//! Non-finite values never format as numbers: they show as a dash, and a
//! non-finite level has no safety band.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// Shown in place of a non-finite number
pub const PLACEHOLDER: &str = "—";

/// Shown in place of a safety band for a non-finite level
pub const UNDEFINED_LABEL: &str = "undefined";

/// Compact decimal or scientific notation.
///
/// Magnitudes in `[0.01, 10000)` get up to four decimals with trailing zeros
/// removed (`0.0796`, `12.5`, `3`). Everything else gets four significant
/// digits as `m×10^e` (`7.958×10^-10`).
pub fn format_sci(x: f64) -> String {
    if !x.is_finite() {
        return PLACEHOLDER.to_string();
    }
    if x == 0.0 {
        return "0".to_string();
    }
    if (0.01..10_000.0).contains(&x.abs()) {
        let fixed = format!("{x:.4}");
        return fixed
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string();
    }
    format!("{x:.3e}").replacen('e', "×10^", 1)
}

/// Level with one decimal, e.g. `109.0`
pub fn format_db(level: f64) -> String {
    if !level.is_finite() {
        return PLACEHOLDER.to_string();
    }
    format!("{level:.1}")
}

/// Distance in metres with one decimal
pub fn format_distance(distance: f64) -> String {
    if !distance.is_finite() {
        return PLACEHOLDER.to_string();
    }
    format!("{distance:.1}")
}

/// Rough loudness band of a level. Indicative only, not medical guidance.
#[derive(
    Display, EnumIter, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SafetyBand {
    /// Below 20 dB
    #[strum(to_string = "very weak")]
    VeryWeak,
    /// 20 dB up to 50 dB
    #[strum(to_string = "weak")]
    Weak,
    /// 50 dB up to 70 dB
    #[strum(to_string = "moderate")]
    Moderate,
    /// 70 dB up to 85 dB
    #[strum(to_string = "loud")]
    Loud,
    /// 85 dB up to 100 dB
    #[strum(to_string = "very loud")]
    VeryLoud,
    /// 100 dB and above
    #[strum(to_string = "extreme")]
    Extreme,
}

impl SafetyBand {
    /// Band containing `level`, or `None` for a non-finite level.
    ///
    /// Each boundary belongs to the band above it: 19.999 dB is very weak,
    /// 20 dB is weak.
    pub fn classify(level: f64) -> Option<Self> {
        if !level.is_finite() {
            return None;
        }
        let band = if level < 20.0 {
            Self::VeryWeak
        } else if level < 50.0 {
            Self::Weak
        } else if level < 70.0 {
            Self::Moderate
        } else if level < 85.0 {
            Self::Loud
        } else if level < 100.0 {
            Self::VeryLoud
        } else {
            Self::Extreme
        };
        Some(band)
    }

    /// Lowest level in the band; `None` for the open-ended bottom band
    pub const fn lower_bound(self) -> Option<f64> {
        match self {
            Self::VeryWeak => None,
            Self::Weak => Some(20.0),
            Self::Moderate => Some(50.0),
            Self::Loud => Some(70.0),
            Self::VeryLoud => Some(85.0),
            Self::Extreme => Some(100.0),
        }
    }

    /// Everyday comparison for the band
    pub const fn description(self) -> &'static str {
        match self {
            Self::VeryWeak => "calm",
            Self::Weak => "quiet room",
            Self::Moderate => "conversation or light city noise",
            Self::Loud => "take care with long exposure",
            Self::VeryLoud => "risky with sustained exposure",
            Self::Extreme => "hearing danger",
        }
    }
}

/// Band name for `level`, or `"undefined"` for a non-finite level
pub fn safety_label(level: f64) -> String {
    SafetyBand::classify(level)
        .map(|band| band.to_string())
        .unwrap_or_else(|| UNDEFINED_LABEL.to_string())
}

/// Band name with its everyday comparison, e.g. `weak (quiet room)`
pub fn safety_summary(level: f64) -> String {
    match SafetyBand::classify(level) {
        Some(band) => format!("{band} ({})", band.description()),
        None => format!("{UNDEFINED_LABEL} (no level)"),
    }
}
