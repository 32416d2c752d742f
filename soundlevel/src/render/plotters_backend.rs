use crate::error::{Error, Result};
use crate::projection::Point;
use crate::surface::{DrawingSurface, Rgba, Stroke, TextAnchor, TextStyle};
use plotters::{
    backend::BitMapBackend,
    coord::Shift,
    drawing::{DrawingArea, IntoDrawingArea},
    element::{Circle, PathElement, Text},
    style::{
        FontTransform, IntoFont, RGBAColor, ShapeStyle,
        text_anchor::{HPos, Pos, VPos},
    },
};

fn to_plotters_color(color: Rgba) -> RGBAColor {
    RGBAColor(color.r, color.g, color.b, color.a)
}

fn to_shape_style(stroke: Stroke) -> ShapeStyle {
    ShapeStyle {
        color: to_plotters_color(stroke.color),
        filled: stroke.filled,
        stroke_width: stroke.width,
    }
}

/// Bytes in an RGB buffer of `width` x `height` pixels
pub fn rgb_buffer_len(width: u32, height: u32) -> Result<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(3))
        .ok_or_else(|| Error::backend(format!("{width}x{height} RGB buffer overflows")))
}

/// [`DrawingSurface`] over an RGB pixel buffer, drawn with Plotters
///
/// The buffer is borrowed for the surface's lifetime. Call [`present`] before
/// dropping the surface, then read the pixels back out of the buffer.
///
/// [`present`]: BitmapSurface::present
pub struct BitmapSurface<'a> {
    area: DrawingArea<BitMapBackend<'a>, Shift>,
    width: u32,
    height: u32,
}

impl<'a> BitmapSurface<'a> {
    /// Wrap `buffer` (3 bytes per pixel) and fill it with `background`
    pub fn new(buffer: &'a mut [u8], width: u32, height: u32, background: Rgba) -> Result<Self> {
        let expected = rgb_buffer_len(width, height)?;
        if buffer.len() != expected {
            return Err(Error::backend(format!(
                "pixel buffer holds {} bytes, {}x{} RGB needs {}",
                buffer.len(),
                width,
                height,
                expected
            )));
        }

        let area = BitMapBackend::with_buffer(buffer, (width, height)).into_drawing_area();
        area.fill(&to_plotters_color(background))
            .map_err(|e| Error::backend(format!("failed to fill plot background: {e}")))?;

        Ok(Self {
            area,
            width,
            height,
        })
    }

    /// Flush drawn shapes into the pixel buffer
    pub fn present(&self) -> Result<()> {
        self.area
            .present()
            .map_err(|e| Error::backend(format!("failed to present plotters buffer: {e}")))
    }

    /// Pixel coordinates kept within a few surface sizes of the origin.
    ///
    /// Off-surface and infinite coordinates are pulled in to that bound and NaN
    /// lands on 0, so shapes from non-finite data are drawn somewhere harmless
    /// instead of being rejected.
    fn to_pixel(&self, point: Point) -> (i32, i32) {
        let limit = 4.0 * f64::from(self.width.max(self.height));
        let clamp = |v: f64| v.clamp(-limit, limit).round() as i32;
        (clamp(point.x), clamp(point.y))
    }
}

impl DrawingSurface for BitmapSurface<'_> {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn draw_line(&mut self, from: Point, to: Point, stroke: Stroke) -> Result<()> {
        self.area
            .draw(&PathElement::new(
                vec![self.to_pixel(from), self.to_pixel(to)],
                to_shape_style(stroke),
            ))
            .map_err(|e| Error::backend(format!("failed to draw line: {e}")))
    }

    fn draw_circle(&mut self, center: Point, radius: f64, stroke: Stroke) -> Result<()> {
        let radius = radius.max(0.0).round() as u32;
        self.area
            .draw(&Circle::new(self.to_pixel(center), radius, to_shape_style(stroke)))
            .map_err(|e| Error::backend(format!("failed to draw circle: {e}")))
    }

    fn draw_text(&mut self, text: &str, at: Point, style: TextStyle) -> Result<()> {
        let h_pos = match style.anchor {
            TextAnchor::Start => HPos::Left,
            TextAnchor::End => HPos::Right,
        };
        let mut font = ("sans-serif", f64::from(style.size))
            .into_font()
            .color(&to_plotters_color(style.color))
            .pos(Pos::new(h_pos, VPos::Bottom));
        if style.vertical {
            font = font.transform(FontTransform::Rotate270);
        }

        self.area
            .draw(&Text::new(text.to_string(), self.to_pixel(at), font))
            .map_err(|e| Error::backend(format!("failed to draw text {text:?}: {e}")))
    }
}

/// Whether Plotters can load a sans-serif face on this machine
#[cfg(test)]
pub(crate) fn sans_serif_available() -> bool {
    let mut buffer = vec![0u8; 16 * 16 * 3];
    let Ok(mut surface) = BitmapSurface::new(&mut buffer, 16, 16, Rgba::opaque(0, 0, 0)) else {
        return false;
    };
    let style = TextStyle::new(Rgba::opaque(255, 255, 255), 10);
    surface.draw_text("x", Point::new(2.0, 12.0), style).is_ok()
}
