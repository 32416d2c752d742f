//! Data-space to pixel-space projection.

use crate::sampling::Sample;
use crate::scale::ViewRange;
use serde::{Deserialize, Serialize};

/// A point in pixel space; y grows downward.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Target rectangle of a projection, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlotRect {
    pub x0: f64,
    pub y0: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotRect {
    pub const fn new(x0: f64, y0: f64, width: f64, height: f64) -> Self {
        Self {
            x0,
            y0,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x0 + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y0 + self.height
    }
}

/// Maps data values through a [`ViewRange`] onto a [`PlotRect`].
///
/// Stateless: the same view, rectangle and value always give the same pixel.
/// Non-finite values project to non-finite pixels; nothing is guarded here.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projector {
    view: ViewRange,
    rect: PlotRect,
}

impl Projector {
    pub fn new(view: ViewRange, rect: PlotRect) -> Self {
        Self { view, rect }
    }

    pub fn view(&self) -> &ViewRange {
        &self.view
    }

    pub fn rect(&self) -> &PlotRect {
        &self.rect
    }

    /// Horizontal pixel for a data x, linear or logarithmic per the view
    pub fn project_x(&self, value: f64) -> f64 {
        let scale = self.view.x_scale;
        let lo = scale.transform(self.view.x_min);
        let hi = scale.transform(self.view.x_max);
        let ratio = (scale.transform(value) - lo) / (hi - lo);
        self.rect.x0 + ratio * self.rect.width
    }

    /// Vertical pixel for a data y, inverted so larger values sit higher
    pub fn project_y(&self, value: f64) -> f64 {
        let ratio = (value - self.view.y_min) / (self.view.y_max - self.view.y_min);
        self.rect.y0 + self.rect.height - ratio * self.rect.height
    }

    pub fn project(&self, sample: Sample) -> Point {
        Point::new(self.project_x(sample.x), self.project_y(sample.y))
    }

    /// Project samples in order; the output order matches the input order
    pub fn project_all(&self, samples: &[Sample]) -> Vec<Point> {
        samples.iter().map(|&s| self.project(s)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::AxisScale;
    use approx::assert_relative_eq;

    const RECT: PlotRect = PlotRect::new(55.0, 18.0, 647.0, 287.0);

    fn linear() -> Projector {
        let view = ViewRange::new(0.2, 50.0, 70.0, 130.0, AxisScale::Linear).unwrap();
        Projector::new(view, RECT)
    }

    fn logarithmic() -> Projector {
        let view = ViewRange::new(1e-8, 1e2, -20.0, 140.0, AxisScale::Logarithmic).unwrap();
        Projector::new(view, RECT)
    }

    #[test]
    fn linear_bounds_hit_rect_edges() {
        let p = linear();
        assert_relative_eq!(p.project_x(0.2), RECT.x0);
        assert_relative_eq!(p.project_x(50.0), RECT.right(), epsilon = 1e-9);
        assert_relative_eq!(p.project_y(70.0), RECT.bottom());
        assert_relative_eq!(p.project_y(130.0), RECT.y0, epsilon = 1e-9);
    }

    #[test]
    fn log_bounds_hit_rect_edges() {
        let p = logarithmic();
        assert_relative_eq!(p.project_x(1e-8), RECT.x0, epsilon = 1e-9);
        assert_relative_eq!(p.project_x(1e2), RECT.right(), epsilon = 1e-9);
        // One decade out of ten is a tenth of the width
        assert_relative_eq!(p.project_x(1e-7), RECT.x0 + RECT.width / 10.0, epsilon = 1e-9);
    }

    #[test]
    fn projection_is_monotonic() {
        let lin = linear();
        let log = logarithmic();
        let xs = [0.3, 1.0, 2.5, 10.0, 49.0];
        for w in xs.windows(2) {
            assert!(lin.project_x(w[0]) < lin.project_x(w[1]));
            assert!(log.project_x(w[0]) < log.project_x(w[1]));
        }
        let ys = [-20.0, 0.0, 70.0, 100.0, 140.0];
        for w in ys.windows(2) {
            // Screen y decreases as the value grows
            assert!(lin.project_y(w[0]) > lin.project_y(w[1]));
        }
    }

    #[test]
    fn projection_is_pure() {
        let p = linear();
        let s = Sample::new(12.3, 88.8);
        assert_eq!(p.project(s), p.project(s));
        assert_eq!(p.project(s), linear().project(s));
    }

    #[test]
    fn non_finite_values_are_not_guarded() {
        let p = linear();
        assert!(!p.project(Sample::new(1.0, f64::NAN)).is_finite());
        assert!(!logarithmic().project(Sample::new(0.0, 100.0)).is_finite());
    }

    #[test]
    fn project_all_keeps_order() {
        let p = linear();
        let samples = vec![Sample::new(1.0, 100.0), Sample::new(2.0, 90.0), Sample::new(3.0, 80.0)];
        let points = p.project_all(&samples);
        assert_eq!(points.len(), 3);
        assert!(points.windows(2).all(|w| w[0].x < w[1].x && w[0].y < w[1].y));
    }
}
