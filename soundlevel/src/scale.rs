//! View ranges: the data-space window a chart projects onto its rectangle.

use crate::error::{Error, Result};
use crate::sampling::Sample;
use serde::{Deserialize, Serialize};

/// Default padding added above and below the autoscaled y range, in data units
pub const AUTOSCALE_MARGIN: f64 = 5.0;

/// How values along an axis map to positions.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisScale {
    #[default]
    Linear,
    /// Positions follow `log10(value)`
    Logarithmic,
}

impl AxisScale {
    /// Value in the space where the axis is linear
    #[inline]
    pub fn transform(self, value: f64) -> f64 {
        match self {
            Self::Linear => value,
            Self::Logarithmic => value.log10(),
        }
    }
}

/// Projection window in data space.
///
/// The x axis may be linear or logarithmic; the y axis is always linear.
/// A `ViewRange` built through [`ViewRange::new`] or [`ViewRange::autoscaled`]
/// never has a zero-width or zero-height span, so projecting through it never
/// divides by zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewRange {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub x_scale: AxisScale,
}

impl ViewRange {
    /// Create a view range, rejecting bounds that cannot be projected
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64, x_scale: AxisScale) -> Result<Self> {
        check_span("x", x_min, x_max)?;
        check_span("y", y_min, y_max)?;
        if x_scale == AxisScale::Logarithmic && (x_min <= 0.0 || x_max <= 0.0) {
            return Err(Error::NonPositiveLogBound {
                axis: "x",
                min: x_min,
                max: x_max,
            });
        }
        Ok(Self {
            x_min,
            x_max,
            y_min,
            y_max,
            x_scale,
        })
    }

    /// View range with a fixed x domain and a y range fitted to `samples`.
    ///
    /// The y bounds are `min(y) - margin` and `max(y) + margin`, so even a flat
    /// curve gets a span of `2 * margin`.
    pub fn autoscaled(
        x_domain: (f64, f64),
        x_scale: AxisScale,
        samples: &[Sample],
        margin: f64,
    ) -> Result<Self> {
        if samples.is_empty() {
            return Err(Error::EmptySamples);
        }
        let (lo, hi) = samples
            .iter()
            .map(|s| s.y)
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| {
                (lo.min(y), hi.max(y))
            });
        Self::new(x_domain.0, x_domain.1, lo - margin, hi + margin, x_scale)
    }

    /// Width of the x span in the axis' linear space
    pub fn x_span(&self) -> f64 {
        self.x_scale.transform(self.x_max) - self.x_scale.transform(self.x_min)
    }

    pub fn y_span(&self) -> f64 {
        self.y_max - self.y_min
    }
}

fn check_span(axis: &'static str, min: f64, max: f64) -> Result<()> {
    if !(min.is_finite() && max.is_finite()) || min == max {
        return Err(Error::InvalidRange { axis, min, max });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(y: f64, n: usize) -> Vec<Sample> {
        (0..n).map(|i| Sample::new(i as f64, y)).collect()
    }

    #[test]
    fn autoscale_pads_min_and_max() {
        let samples = vec![
            Sample::new(1.0, 60.0),
            Sample::new(2.0, 80.0),
            Sample::new(3.0, 70.0),
        ];
        let view = ViewRange::autoscaled((1.0, 3.0), AxisScale::Linear, &samples, 5.0).unwrap();
        assert_eq!(view.y_min, 55.0);
        assert_eq!(view.y_max, 85.0);
        assert_eq!((view.x_min, view.x_max), (1.0, 3.0));
    }

    #[test]
    fn flat_curve_keeps_non_degenerate_height() {
        let view =
            ViewRange::autoscaled((0.2, 50.0), AxisScale::Linear, &flat(140.0, 10), AUTOSCALE_MARGIN)
                .unwrap();
        assert_eq!(view.y_span(), 2.0 * AUTOSCALE_MARGIN);
        assert_eq!(view.y_min, 135.0);
    }

    #[test]
    fn empty_samples_cannot_autoscale() {
        let err = ViewRange::autoscaled((0.0, 1.0), AxisScale::Linear, &[], 5.0).unwrap_err();
        assert!(matches!(err, Error::EmptySamples));
    }

    #[test]
    fn degenerate_ranges_are_rejected() {
        assert!(matches!(
            ViewRange::new(1.0, 1.0, 0.0, 1.0, AxisScale::Linear),
            Err(Error::InvalidRange { axis: "x", .. })
        ));
        assert!(matches!(
            ViewRange::new(0.0, 1.0, 2.0, 2.0, AxisScale::Linear),
            Err(Error::InvalidRange { axis: "y", .. })
        ));
        assert!(ViewRange::new(0.0, f64::NAN, 0.0, 1.0, AxisScale::Linear).is_err());
    }

    #[test]
    fn log_axis_needs_positive_bounds() {
        assert!(matches!(
            ViewRange::new(0.0, 100.0, 0.0, 1.0, AxisScale::Logarithmic),
            Err(Error::NonPositiveLogBound { .. })
        ));
        let view = ViewRange::new(1e-8, 1e2, 0.0, 1.0, AxisScale::Logarithmic).unwrap();
        assert!((view.x_span() - 10.0).abs() < 1e-9);
    }
}
