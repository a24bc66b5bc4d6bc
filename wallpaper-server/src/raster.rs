//! SVG to PNG rasterization.

use std::io::Cursor;
use std::sync::Arc;

use calendar_core::PixelShape;
use image::{ImageFormat, RgbaImage};
use thiserror::Error;
use tiny_skia::{Pixmap, Transform};
use usvg::{fontdb, Options, Tree};

use crate::fonts::CAPTION_FAMILY;

#[derive(Error, Debug)]
pub enum RasterError {
    #[error("failed to parse SVG: {0}")]
    Parse(#[from] usvg::Error),

    #[error("failed to allocate a {width}x{height} pixmap")]
    Pixmap { width: u32, height: u32 },

    #[error("failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),
}

/// Render `svg` into an RGBA image of exactly `size` pixels.
///
/// The SVG is scaled to fill the target so a document authored at a
/// different size still covers the whole image.
pub fn rasterize(
    svg: &str,
    size: PixelShape,
    fonts: Arc<fontdb::Database>,
) -> Result<RgbaImage, RasterError> {
    let options = Options {
        fontdb: fonts,
        font_family: CAPTION_FAMILY.to_string(),
        text_rendering: usvg::TextRendering::GeometricPrecision,
        shape_rendering: usvg::ShapeRendering::GeometricPrecision,
        ..Default::default()
    };
    let tree = Tree::from_str(svg, &options)?;

    let (width, height) = size.to_tuple();
    let mut pixmap = Pixmap::new(width, height).ok_or(RasterError::Pixmap { width, height })?;

    let svg_size = tree.size();
    let transform = Transform::from_scale(
        width as f32 / svg_size.width(),
        height as f32 / svg_size.height(),
    );
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    // tiny-skia stores premultiplied alpha; PNG wants straight alpha.
    let mut data = Vec::with_capacity(pixmap.data().len());
    for pixel in pixmap.pixels() {
        let color = pixel.demultiply();
        data.extend_from_slice(&[color.red(), color.green(), color.blue(), color.alpha()]);
    }
    RgbaImage::from_raw(width, height, data).ok_or(RasterError::Pixmap { width, height })
}

pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, RasterError> {
    let mut png_bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut png_bytes), ImageFormat::Png)?;
    Ok(png_bytes)
}

/// Rasterize and encode in one step.
pub fn render_png(
    svg: &str,
    size: PixelShape,
    fonts: Arc<fontdb::Database>,
) -> Result<Vec<u8>, RasterError> {
    encode_png(&rasterize(svg, size, fonts)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use calendar_core::{CalendarConfig, HexColor, RenderProfile};
    use chrono::NaiveDate;

    fn no_fonts() -> Arc<fontdb::Database> {
        Arc::new(fontdb::Database::new())
    }

    #[test]
    fn test_rasterize_fills_background_and_dots() {
        let svg = concat!(
            r##"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="10" viewBox="0 0 20 10">"##,
            r##"<rect width="20" height="10" fill="#000000"/>"##,
            r##"<circle cx="15" cy="5" r="4" fill="#ff0000"/>"##,
            "</svg>"
        );
        let image = rasterize(svg, PixelShape::new(20, 10), no_fonts()).unwrap();
        assert_eq!(image.dimensions(), (20, 10));
        assert_eq!(image.get_pixel(1, 1).0, [0, 0, 0, 255]);
        assert_eq!(image.get_pixel(15, 5).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_scales_to_target_size() {
        let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"><rect width="10" height="10" fill="#ffffff"/></svg>"##;
        let image = rasterize(svg, PixelShape::new(40, 30), no_fonts()).unwrap();
        assert_eq!(image.dimensions(), (40, 30));
        assert_eq!(image.get_pixel(39, 29).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_invalid_svg() {
        let err = rasterize("<not-svg", PixelShape::new(10, 10), no_fonts()).unwrap_err();
        assert!(matches!(err, RasterError::Parse(_)));
    }

    #[test]
    fn test_calendar_png_is_decodable() {
        let size = PixelShape::new(129, 280);
        let now = NaiveDate::from_ymd_opt(2024, 7, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let svg = CalendarConfig::year(2024)
            .with_colors(HexColor::WHITE, HexColor::rgb(0x10, 0x20, 0x30))
            .render_svg(size.to_canvas().unwrap(), RenderProfile::Wallpaper, now)
            .unwrap();

        let png = render_png(&svg, size, no_fonts()).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

        let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (129, 280));
        assert_eq!(decoded.get_pixel(0, 0).0, [0x10, 0x20, 0x30, 255]);
    }
}
