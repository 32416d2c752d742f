//! The level chart: layout options, the projected scene, and drawing it.
//!
//! Rendering happens in two steps. [`ChartScene::build`] samples the curve,
//! autoscales the view and projects everything into pixels; it is pure and
//! easy to inspect. [`LevelChart::draw`] then walks a scene and issues draw
//! calls against any [`DrawingSurface`].

use crate::error::{Error, Result};
use crate::projection::{PlotRect, Point, Projector};
use crate::sampling::{Sample, SweepMode, marker_sample, sample_curve};
use crate::scale::{AUTOSCALE_MARGIN, ViewRange};
use crate::surface::{DrawingSurface, Rgba, Stroke, TextAnchor, TextStyle};
use derive_builder::Builder;
use itertools::Itertools;

/// Layout and style of a level chart
///
/// # Example
///
/// ```rust,no_run
/// use soundlevel::chart::ChartOptions;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let options = ChartOptions::new()
///     .width(800u32)
///     .height(400u32)
///     .caption("Pink dot = current setting")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Builder, Clone, Debug)]
#[builder(setter(into, strip_option), default)]
pub struct ChartOptions {
    /// Surface width in pixels
    #[builder(default = "720")]
    pub width: u32,

    /// Surface height in pixels
    #[builder(default = "360")]
    pub height: u32,

    /// Space left of the plot area, holds the y axis label
    #[builder(default = "55")]
    pub padding_left: u32,

    #[builder(default = "18")]
    pub padding_top: u32,

    #[builder(default = "18")]
    pub padding_right: u32,

    /// Space below the plot area, holds the x axis label and caption
    #[builder(default = "55")]
    pub padding_bottom: u32,

    /// Background grid spacing in pixels, independent of the data
    #[builder(default = "40")]
    pub grid_step: u32,

    /// Padding above and below the autoscaled level range, in dB
    #[builder(default = "AUTOSCALE_MARGIN")]
    pub autoscale_margin: f64,

    #[builder(default = "5.0")]
    pub marker_radius: f64,

    #[builder(default = "10.0")]
    pub marker_ring_radius: f64,

    #[builder(default = "12")]
    pub font_size: u32,

    #[builder(default = "Rgba::opaque(11, 16, 32)")]
    pub background: Rgba,

    #[builder(default = "Rgba::new(255, 255, 255, 0.06)")]
    pub grid_color: Rgba,

    #[builder(default = "Rgba::new(255, 255, 255, 0.16)")]
    pub axis_color: Rgba,

    #[builder(default = "Rgba::new(255, 255, 255, 0.75)")]
    pub label_color: Rgba,

    #[builder(default = "Rgba::new(124, 240, 255, 0.9)")]
    pub curve_color: Rgba,

    #[builder(default = "Rgba::new(255, 124, 200, 0.95)")]
    pub marker_color: Rgba,

    #[builder(default = "Rgba::new(255, 124, 200, 0.35)")]
    pub marker_ring_color: Rgba,

    /// Text drawn under the chart
    #[builder(default = "Some(DEFAULT_CAPTION.to_string())")]
    pub caption: Option<String>,
}

const DEFAULT_CAPTION: &str = "Pink dot = current setting";

/// Largest accepted surface width or height in pixels
pub const MAX_CANVAS_SIDE: u32 = 8192;

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width: 720,
            height: 360,
            padding_left: 55,
            padding_top: 18,
            padding_right: 18,
            padding_bottom: 55,
            grid_step: 40,
            autoscale_margin: AUTOSCALE_MARGIN,
            marker_radius: 5.0,
            marker_ring_radius: 10.0,
            font_size: 12,
            background: Rgba::opaque(11, 16, 32),
            grid_color: Rgba::new(255, 255, 255, 0.06),
            axis_color: Rgba::new(255, 255, 255, 0.16),
            label_color: Rgba::new(255, 255, 255, 0.75),
            curve_color: Rgba::new(124, 240, 255, 0.9),
            marker_color: Rgba::new(255, 124, 200, 0.95),
            marker_ring_color: Rgba::new(255, 124, 200, 0.35),
            caption: Some(DEFAULT_CAPTION.to_string()),
        }
    }
}

impl ChartOptions {
    /// Create a new builder for ChartOptions
    pub fn new() -> ChartOptionsBuilder {
        ChartOptionsBuilder::default()
    }

    /// Check sizes and margins before anything is sampled or allocated
    pub fn validate(&self) -> Result<()> {
        if self.width == 0
            || self.height == 0
            || self.width > MAX_CANVAS_SIDE
            || self.height > MAX_CANVAS_SIDE
        {
            return Err(Error::invalid_options(format!(
                "{}x{} surface is outside 1..={} pixels per side",
                self.width, self.height, MAX_CANVAS_SIDE
            )));
        }
        if self.grid_step == 0 {
            return Err(Error::invalid_options("grid step must be positive"));
        }
        if !(self.autoscale_margin.is_finite() && self.autoscale_margin > 0.0) {
            return Err(Error::invalid_options(format!(
                "autoscale margin must be a positive number of dB, got {}",
                self.autoscale_margin
            )));
        }
        Ok(())
    }

    /// The plot area left after padding
    pub fn plot_rect(&self) -> Result<PlotRect> {
        self.validate()?;
        let (Some(horizontal), Some(vertical)) = (
            self.padding_left.checked_add(self.padding_right),
            self.padding_top.checked_add(self.padding_bottom),
        ) else {
            return Err(Error::invalid_options("padding overflows the surface size"));
        };
        if self.width <= horizontal || self.height <= vertical {
            return Err(Error::invalid_options(format!(
                "{}x{} surface leaves no room for the plot area after padding",
                self.width, self.height
            )));
        }
        Ok(PlotRect::new(
            self.padding_left as f64,
            self.padding_top as f64,
            (self.width - horizontal) as f64,
            (self.height - vertical) as f64,
        ))
    }

    fn axis_stroke(&self) -> Stroke {
        Stroke::line(self.axis_color, 1)
    }

    fn grid_stroke(&self) -> Stroke {
        Stroke::line(self.grid_color, 1)
    }

    pub(crate) fn curve_stroke(&self) -> Stroke {
        Stroke::line(self.curve_color, 2)
    }

    fn text_style(&self) -> TextStyle {
        TextStyle::new(self.label_color, self.font_size)
    }
}

/// Everything needed to draw one chart, already in pixel space.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartScene {
    pub mode: SweepMode,
    pub rect: PlotRect,
    pub view: ViewRange,
    /// Curve samples in ascending input order
    pub samples: Vec<Sample>,
    /// `samples` projected, same order
    pub curve: Vec<Point>,
    pub marker_sample: Sample,
    pub marker: Point,
    pub x_label: &'static str,
    pub y_label: &'static str,
}

impl ChartScene {
    /// Sample, autoscale and project the chart for one setting
    pub fn build(
        mode: SweepMode,
        power: f64,
        distance: f64,
        options: &ChartOptions,
    ) -> Result<Self> {
        let rect = options.plot_rect()?;
        let samples = sample_curve(mode, power, distance)?;
        let view = ViewRange::autoscaled(
            mode.x_domain(),
            mode.x_scale(),
            &samples,
            options.autoscale_margin,
        )?;
        let projector = Projector::new(view, rect);

        let curve = projector.project_all(&samples);
        let marker_sample = marker_sample(mode, power, distance);
        let marker = projector.project(marker_sample);

        tracing::trace!(
            %mode,
            y_min = view.y_min,
            y_max = view.y_max,
            marker_x = marker.x,
            marker_y = marker.y,
            "built chart scene"
        );

        Ok(Self {
            mode,
            rect,
            view,
            samples,
            curve,
            marker_sample,
            marker,
            x_label: mode.x_label(),
            y_label: mode.y_label(),
        })
    }
}

/// Draws level charts on a [`DrawingSurface`].
pub struct LevelChart<'a> {
    options: &'a ChartOptions,
}

impl<'a> LevelChart<'a> {
    pub fn new(options: &'a ChartOptions) -> Self {
        Self { options }
    }

    /// Build the scene for one setting and draw it
    pub fn render<S: DrawingSurface + ?Sized>(
        &self,
        surface: &mut S,
        mode: SweepMode,
        power: f64,
        distance: f64,
    ) -> Result<ChartScene> {
        let scene = ChartScene::build(mode, power, distance, self.options)?;
        self.draw(surface, &scene)?;
        Ok(scene)
    }

    /// Draw grid, axes, labels, curve, marker and caption, back to front
    pub fn draw<S: DrawingSurface + ?Sized>(&self, surface: &mut S, scene: &ChartScene) -> Result<()> {
        let start = std::time::Instant::now();

        self.draw_grid(surface, &scene.rect)?;
        self.draw_axes(surface, &scene.rect, scene.x_label, scene.y_label)?;

        let curve_stroke = self.options.curve_stroke();
        for (from, to) in scene.curve.iter().tuple_windows() {
            surface.draw_line(*from, *to, curve_stroke)?;
        }

        self.draw_marker(surface, scene.marker)?;

        if let Some(caption) = &self.options.caption {
            let (_, height) = surface.size();
            let at = Point::new(scene.rect.x0, height as f64 - 18.0);
            surface.draw_text(caption, at, self.options.text_style())?;
        }

        tracing::debug!(
            mode = %scene.mode,
            segments = scene.curve.len().saturating_sub(1),
            elapsed = ?start.elapsed(),
            "drew level chart"
        );
        Ok(())
    }

    fn draw_grid<S: DrawingSurface + ?Sized>(&self, surface: &mut S, rect: &PlotRect) -> Result<()> {
        let stroke = self.options.grid_stroke();
        let step = self.options.grid_step as f64;

        let columns = (rect.width / step).floor() as usize;
        for i in 0..=columns {
            let x = rect.x0 + i as f64 * step;
            surface.draw_line(Point::new(x, rect.y0), Point::new(x, rect.bottom()), stroke)?;
        }
        let rows = (rect.height / step).floor() as usize;
        for i in 0..=rows {
            let y = rect.y0 + i as f64 * step;
            surface.draw_line(Point::new(rect.x0, y), Point::new(rect.right(), y), stroke)?;
        }
        Ok(())
    }

    fn draw_axes<S: DrawingSurface + ?Sized>(
        &self,
        surface: &mut S,
        rect: &PlotRect,
        x_label: &str,
        y_label: &str,
    ) -> Result<()> {
        let stroke = self.options.axis_stroke();
        let origin = Point::new(rect.x0, rect.bottom());
        surface.draw_line(origin, Point::new(rect.right(), rect.bottom()), stroke)?;
        surface.draw_line(Point::new(rect.x0, rect.y0), origin, stroke)?;

        let style = self.options.text_style();
        surface.draw_text(
            x_label,
            Point::new(rect.right(), rect.bottom() + 22.0),
            style.anchored(TextAnchor::End),
        )?;
        // Reads bottom to top and ends just below the top of the plot area
        surface.draw_text(
            y_label,
            Point::new(rect.x0 - 28.0, rect.y0 + 10.0),
            style.anchored(TextAnchor::End).vertical(),
        )?;
        Ok(())
    }

    fn draw_marker<S: DrawingSurface + ?Sized>(&self, surface: &mut S, at: Point) -> Result<()> {
        surface.draw_circle(
            at,
            self.options.marker_radius,
            Stroke::fill(self.options.marker_color),
        )?;
        surface.draw_circle(
            at,
            self.options.marker_ring_radius,
            Stroke::line(self.options.marker_ring_color, 2),
        )
    }
}
