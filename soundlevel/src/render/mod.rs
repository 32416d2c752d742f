pub mod plotters_backend;

pub use plotters_backend::{BitmapSurface, rgb_buffer_len};

use crate::PlotBytes;
use crate::chart::{ChartOptions, ChartScene, LevelChart};
use crate::error::{Error, Result};
use crate::sampling::SweepMode;
use image::{ExtendedColorType, ImageEncoder, RgbImage, codecs::png::PngEncoder};

/// Render the level chart for one setting to PNG bytes
///
/// Builds the scene, draws it on a Plotters bitmap and encodes the result.
///
/// # Example
///
/// ```rust,no_run
/// use soundlevel::{ChartOptions, SweepMode, render_png};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let options = ChartOptions::default();
/// let png = render_png(SweepMode::Power, 1.0, 10.0, &options)?;
/// std::fs::write("level.png", png)?;
/// # Ok(())
/// # }
/// ```
pub fn render_png(
    mode: SweepMode,
    power: f64,
    distance: f64,
    options: &ChartOptions,
) -> Result<PlotBytes> {
    let scene = ChartScene::build(mode, power, distance, options)?;
    render_scene_png(&scene, options)
}

/// Draw an already built scene and encode it to PNG
pub fn render_scene_png(scene: &ChartScene, options: &ChartOptions) -> Result<PlotBytes> {
    options.validate()?;
    let (width, height) = (options.width, options.height);
    let setup_start = std::time::Instant::now();
    let mut pixel_buffer = vec![0u8; rgb_buffer_len(width, height)?];

    {
        let mut surface = BitmapSurface::new(&mut pixel_buffer, width, height, options.background)?;
        LevelChart::new(options).draw(&mut surface, scene)?;
        surface.present()?;
    } // Plotters releases pixel_buffer here

    tracing::debug!(elapsed = ?setup_start.elapsed(), width, height, "rasterised chart");

    encode_png(pixel_buffer, width, height)
}

/// Encode an RGB buffer (3 bytes per pixel) as PNG
pub fn encode_png(pixel_buffer: Vec<u8>, width: u32, height: u32) -> Result<PlotBytes> {
    let encode_start = std::time::Instant::now();
    let img: RgbImage = image::ImageBuffer::from_vec(width, height, pixel_buffer)
        .ok_or_else(|| Error::backend("plot image buffer had unexpected size"))?;

    let mut encoded_data = Vec::new();
    PngEncoder::new(&mut encoded_data).write_image(
        img.as_raw(),
        width,
        height,
        ExtendedColorType::Rgb8,
    )?;

    tracing::debug!(
        elapsed = ?encode_start.elapsed(),
        bytes = encoded_data.len(),
        "encoded chart PNG"
    );
    Ok(encoded_data)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn encodes_png() {
        let bytes = encode_png(vec![128u8; 4 * 3 * 3], 4, 3).unwrap();
        assert_eq!(&bytes[..8], &PNG_SIGNATURE);

        let decoded = image::load_from_memory(&bytes).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (4, 3));
        assert_eq!(decoded.get_pixel(2, 1).0, [128, 128, 128]);
    }

    #[test]
    fn rejects_short_buffer() {
        assert!(matches!(
            encode_png(vec![0u8; 5], 4, 3),
            Err(Error::Backend { .. })
        ));
    }

    #[test]
    fn renders_full_chart() {
        if !plotters_backend::sans_serif_available() {
            eprintln!("skipping: no sans-serif font for Plotters");
            return;
        }
        let options = ChartOptions::new()
            .width(320u32)
            .height(200u32)
            .build()
            .unwrap();
        let bytes = render_png(SweepMode::Distance, 1.0, 1.0, &options).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (320, 200));
    }

    #[test]
    fn oversized_canvas_is_rejected_before_allocating() {
        let options = ChartOptions::new()
            .width(u32::MAX)
            .height(u32::MAX)
            .build()
            .unwrap();
        assert!(matches!(
            render_png(SweepMode::Distance, 1.0, 1.0, &options),
            Err(Error::InvalidOptions { .. })
        ));
    }
}
