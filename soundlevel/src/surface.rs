//! Drawing-surface capability used by the chart renderer.
//!
//! The chart only ever draws lines, circles and text. Anything that can do
//! those three things can show a chart: the bitmap backend in
//! [`crate::render`], or a [`RecordingSurface`] that keeps the calls for
//! inspection.

use crate::error::Result;
use crate::projection::Point;

/// An sRGB colour with alpha in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 1.0)
    }
}

/// Outline or fill for a shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub color: Rgba,
    /// Line width in pixels; ignored when `filled`
    pub width: u32,
    pub filled: bool,
}

impl Stroke {
    pub const fn line(color: Rgba, width: u32) -> Self {
        Self {
            color,
            width,
            filled: false,
        }
    }

    pub const fn fill(color: Rgba) -> Self {
        Self {
            color,
            width: 0,
            filled: true,
        }
    }
}

/// Which point of the text box sits at the anchor position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAnchor {
    /// Left edge, baseline
    #[default]
    Start,
    /// Right edge, baseline
    End,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub color: Rgba,
    /// Font size in pixels
    pub size: u32,
    pub anchor: TextAnchor,
    /// Rotate a quarter turn counter-clockwise so the text reads bottom to top
    pub vertical: bool,
}

impl TextStyle {
    pub const fn new(color: Rgba, size: u32) -> Self {
        Self {
            color,
            size,
            anchor: TextAnchor::Start,
            vertical: false,
        }
    }

    pub const fn anchored(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub const fn vertical(mut self) -> Self {
        self.vertical = true;
        self
    }
}

/// Something a chart can be drawn on.
///
/// Coordinates are pixels with the origin at the top-left corner. Points may
/// be non-finite when the data was; implementations decide where (or whether)
/// such shapes land.
pub trait DrawingSurface {
    /// Surface size in pixels (width, height)
    fn size(&self) -> (u32, u32);

    fn draw_line(&mut self, from: Point, to: Point, stroke: Stroke) -> Result<()>;

    fn draw_circle(&mut self, center: Point, radius: f64, stroke: Stroke) -> Result<()>;

    fn draw_text(&mut self, text: &str, at: Point, style: TextStyle) -> Result<()>;
}

/// A single call made against a [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Line {
        from: Point,
        to: Point,
        stroke: Stroke,
    },
    Circle {
        center: Point,
        radius: f64,
        stroke: Stroke,
    },
    Text {
        text: String,
        at: Point,
        style: TextStyle,
    },
}

/// Surface that records draw calls instead of rasterising them.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }

    /// Recorded lines drawn with exactly `stroke`, in call order
    pub fn lines_with(&self, stroke: Stroke) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.commands.iter().filter_map(move |c| match c {
            DrawCommand::Line { from, to, stroke: s } if *s == stroke => Some((*from, *to)),
            _ => None,
        })
    }

    pub fn circles(&self) -> impl Iterator<Item = (Point, f64, Stroke)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Circle {
                center,
                radius,
                stroke,
            } => Some((*center, *radius, *stroke)),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl DrawingSurface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn draw_line(&mut self, from: Point, to: Point, stroke: Stroke) -> Result<()> {
        self.commands.push(DrawCommand::Line { from, to, stroke });
        Ok(())
    }

    fn draw_circle(&mut self, center: Point, radius: f64, stroke: Stroke) -> Result<()> {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            stroke,
        });
        Ok(())
    }

    fn draw_text(&mut self, text: &str, at: Point, style: TextStyle) -> Result<()> {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            at,
            style,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_surface_keeps_call_order() {
        let mut surface = RecordingSurface::new(100, 50);
        let red = Stroke::line(Rgba::opaque(255, 0, 0), 1);
        let blue = Stroke::fill(Rgba::opaque(0, 0, 255));

        surface
            .draw_line(Point::new(0.0, 0.0), Point::new(10.0, 10.0), red)
            .unwrap();
        surface.draw_circle(Point::new(5.0, 5.0), 3.0, blue).unwrap();
        surface
            .draw_text("hi", Point::new(1.0, 2.0), TextStyle::new(Rgba::opaque(0, 0, 0), 12))
            .unwrap();

        assert_eq!(surface.size(), (100, 50));
        assert_eq!(surface.commands().len(), 3);
        assert!(matches!(surface.commands()[0], DrawCommand::Line { .. }));
        assert_eq!(surface.lines_with(red).count(), 1);
        assert_eq!(surface.lines_with(Stroke::line(Rgba::opaque(255, 0, 0), 2)).count(), 0);
        assert_eq!(surface.circles().next().map(|c| c.1), Some(3.0));
        assert_eq!(surface.texts().collect::<Vec<_>>(), vec!["hi"]);
    }
}
