//! # soundlevel
//!
//! Sound intensity and decibel levels of an isotropic point source, and a chart
//! of the level across a sweep of distance or power.
//!
//! ## Overview
//!
//! A source of power `P` heard at distance `r` has intensity `P / (4πr²)` and
//! level `10·log10(I / 1e-12)` dB. The chart sweeps one input while holding the
//! other fixed, clamps the curve into a fixed display band, autoscales the level
//! axis and marks the current setting.
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use soundlevel::{ChartOptions, Readout, SweepMode, render_png};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let readout = Readout::compute(0.0, 1.0); // 1 W at 1 m
//! println!("{}", readout.formatted());
//!
//! let options = ChartOptions::new().width(800u32).height(400u32).build()?;
//! let png = render_png(SweepMode::Distance, readout.power, readout.distance, &options)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - `physics`: intensity and level model
//! - `sampling`: sweeps and curve samples
//! - `scale`: view ranges and autoscaling
//! - `projection`: data-to-pixel mapping
//! - `surface`: the drawing capability the chart draws through
//! - `chart`: chart options, scene building and drawing
//! - `render`: Plotters bitmap surface and PNG encoding
//! - `format`: number formatting and safety bands
//! - `readout`: the values and text shown for one setting

pub mod chart;
pub mod error;
pub mod format;
pub mod physics;
pub mod projection;
pub mod readout;
pub mod render;
pub mod sampling;
pub mod scale;
pub mod surface;

// Re-export commonly used types
pub use chart::{ChartOptions, ChartOptionsBuilder, ChartScene, LevelChart};
pub use error::{Error, Result};
pub use format::SafetyBand;
pub use projection::{PlotRect, Point, Projector};
pub use readout::{FormattedReadout, Readout};
pub use render::{BitmapSurface, render_png};
pub use sampling::{Sample, Sweep, SweepMode};
pub use scale::{AxisScale, ViewRange};
pub use surface::{DrawingSurface, RecordingSurface};

// Type aliases
pub type PlotBytes = Vec<u8>;
