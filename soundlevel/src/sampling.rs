//! Sweeps over distance or power and the curve samples they produce.
//!
//! Every sampling function returns its samples in ascending input order. The
//! polyline renderer relies on that order and never sorts.

use crate::error::{Error, Result};
use crate::physics::{clamp_level, level_at};
use crate::scale::AxisScale;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// One point of the level curve, in data space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Swept input: metres in a distance sweep, watts in a power sweep
    pub x: f64,
    /// Clamped level in dB
    pub y: f64,
}

impl Sample {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Which input the chart sweeps along its x axis.
#[derive(
    Default, Display, EnumString, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SweepMode {
    /// Distance on a linear axis, power held fixed
    #[default]
    Distance,
    /// Power on a logarithmic axis, distance held fixed
    Power,
}

impl SweepMode {
    /// Default sweep for this mode, in sweep space (metres or power exponents)
    pub const fn sweep(self) -> Sweep {
        match self {
            Self::Distance => Sweep::distance(),
            Self::Power => Sweep::power_exponent(),
        }
    }

    pub const fn x_scale(self) -> AxisScale {
        match self {
            Self::Distance => AxisScale::Linear,
            Self::Power => AxisScale::Logarithmic,
        }
    }

    pub const fn x_label(self) -> &'static str {
        match self {
            Self::Distance => "Distance r (m)",
            Self::Power => "Power P (W)",
        }
    }

    pub const fn y_label(self) -> &'static str {
        "Level L (dB)"
    }

    /// Fixed x domain of the chart in data space.
    ///
    /// For a power sweep the exponent bounds are mapped back to watts.
    pub fn x_domain(self) -> (f64, f64) {
        let sweep = self.sweep();
        match self {
            Self::Distance => (sweep.start, sweep.end),
            Self::Power => (10f64.powf(sweep.start), 10f64.powf(sweep.end)),
        }
    }
}

/// A closed interval walked at a fixed step.
///
/// Values are computed by index (`start + i * step`) rather than by repeated
/// addition, so the walk never drifts past `end`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sweep {
    pub start: f64,
    pub end: f64,
    pub step: f64,
}

/// Upper bound on the number of values a sweep may produce
pub const MAX_SWEEP_SAMPLES: usize = 1_000_000;

impl Sweep {
    pub const fn new(start: f64, end: f64, step: f64) -> Self {
        Self { start, end, step }
    }

    /// 0.2 m to 50 m every 0.25 m
    pub const fn distance() -> Self {
        Self::new(0.2, 50.0, 0.25)
    }

    /// Power exponents -8 to 2 every 0.05, i.e. 10 nW to 100 W
    pub const fn power_exponent() -> Self {
        Self::new(-8.0, 2.0, 0.05)
    }

    /// Number of values in the walk
    pub fn sample_count(&self) -> Result<usize> {
        if !(self.start.is_finite() && self.end.is_finite()) {
            return Err(Error::invalid_sweep(format!(
                "bounds must be finite, got [{}, {}]",
                self.start, self.end
            )));
        }
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(Error::invalid_sweep(format!(
                "step must be positive, got {}",
                self.step
            )));
        }
        if self.start > self.end {
            return Err(Error::invalid_sweep(format!(
                "start {} is past end {}",
                self.start, self.end
            )));
        }
        // The small slack absorbs representation error in steps like 0.05
        let intervals = ((self.end - self.start) / self.step + 1e-9).floor();
        if !intervals.is_finite() || intervals >= MAX_SWEEP_SAMPLES as f64 {
            return Err(Error::invalid_sweep(format!(
                "[{}, {}] every {} exceeds {} samples",
                self.start, self.end, self.step, MAX_SWEEP_SAMPLES
            )));
        }
        (intervals as usize)
            .checked_add(1)
            .ok_or_else(|| Error::invalid_sweep("sample count overflows"))
    }

    /// Walk values in ascending order
    pub fn values(&self) -> Result<impl Iterator<Item = f64> + use<>> {
        let len = self.sample_count()?;
        let Self { start, end, step } = *self;
        Ok((0..len).map(move |i| (start + i as f64 * step).min(end)))
    }
}

/// Level curve over distance for a source of fixed `power`.
pub fn sample_distance_sweep(power: f64, sweep: &Sweep) -> Result<Vec<Sample>> {
    Ok(sweep
        .values()?
        .map(|r| Sample::new(r, clamp_level(level_at(power, r))))
        .collect())
}

/// Level curve over power at a fixed `distance`, sampled geometrically.
///
/// The sweep walks exponents; each sample's `x` is `10^exponent` watts.
pub fn sample_power_sweep(distance: f64, sweep: &Sweep) -> Result<Vec<Sample>> {
    Ok(sweep
        .values()?
        .map(|e| {
            let p = 10f64.powf(e);
            Sample::new(p, clamp_level(level_at(p, distance)))
        })
        .collect())
}

/// Level curve for `mode` using its default sweep.
pub fn sample_curve(mode: SweepMode, power: f64, distance: f64) -> Result<Vec<Sample>> {
    let samples = match mode {
        SweepMode::Distance => sample_distance_sweep(power, &mode.sweep())?,
        SweepMode::Power => sample_power_sweep(distance, &mode.sweep())?,
    };
    tracing::trace!(%mode, count = samples.len(), "sampled level curve");
    Ok(samples)
}

/// The current setting as a sample on `mode`'s axes, level clamped like the curve.
pub fn marker_sample(mode: SweepMode, power: f64, distance: f64) -> Sample {
    let level = clamp_level(level_at(power, distance));
    match mode {
        SweepMode::Distance => Sample::new(distance, level),
        SweepMode::Power => Sample::new(power, level),
    }
}
