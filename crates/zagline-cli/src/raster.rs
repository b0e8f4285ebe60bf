//! Raster mirror: the vector pattern drawn into a fixed-size bitmap.
//!
//! The pattern is serialized to a pixel-sized `<svg>`, wrapped in a base64
//! `data:` URI, and that URI is what gets decoded and rasterized. The TUI
//! runs this on a worker thread, so a raster may land a frame or two after
//! the parameters that produced it.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine};
use image::{DynamicImage, RgbaImage};
use tiny_skia::{Color, Pixmap, Transform};

use zagline::{render_svg, Pattern, SvgSize};

/// Width and height of the raster surface, in pixels.
pub const RASTER_SIZE: u32 = 500;

const DATA_URI_PREFIX: &str = "data:image/svg+xml;base64,";

/// Serialize a pattern as a base64 SVG data URI sized `size` x `size`.
pub fn svg_data_uri(pattern: &Pattern, size: u32) -> String {
    let svg = render_svg(pattern, SvgSize::Pixels(size, size));
    format!("{}{}", DATA_URI_PREFIX, STANDARD.encode(svg))
}

/// Decode the SVG bytes out of a data URI produced by [`svg_data_uri`].
pub fn decode_data_uri(uri: &str) -> Result<Vec<u8>> {
    let payload = uri
        .strip_prefix(DATA_URI_PREFIX)
        .ok_or_else(|| anyhow!("not a base64 SVG data URI"))?;
    STANDARD.decode(payload).context("invalid base64 in data URI")
}

/// Decode and rasterize a data URI onto a fresh `size` x `size` pixmap.
///
/// The surface starts cleared (transparent) unless a background is given.
pub fn rasterize_data_uri(uri: &str, size: u32, background: Option<Color>) -> Result<Pixmap> {
    let bytes = decode_data_uri(uri)?;

    let options = usvg::Options::default();
    let tree = usvg::Tree::from_data(&bytes, &options).context("failed to parse SVG")?;

    let mut pixmap = Pixmap::new(size, size)
        .ok_or_else(|| anyhow!("could not create {}x{} pixmap", size, size))?;

    if let Some(color) = background {
        pixmap.fill(color);
    }

    // Stretch whatever size the SVG claims onto the surface.
    let tree_size = tree.size();
    let transform = Transform::from_scale(
        size as f32 / tree_size.width(),
        size as f32 / tree_size.height(),
    );
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    Ok(pixmap)
}

/// Rasterize a pattern through its data URI.
pub fn rasterize_pattern(pattern: &Pattern, size: u32, background: Option<Color>) -> Result<Pixmap> {
    rasterize_data_uri(&svg_data_uri(pattern, size), size, background)
}

/// Convert a pixmap into an `image` crate image (for terminal display).
pub fn pixmap_to_image(pixmap: Pixmap) -> Result<DynamicImage> {
    let (width, height) = (pixmap.width(), pixmap.height());
    let rgba = RgbaImage::from_raw(width, height, pixmap.take())
        .ok_or_else(|| anyhow!("pixmap buffer does not match {}x{}", width, height))?;
    Ok(DynamicImage::ImageRgba8(rgba))
}

/// Rasterize a pattern and save it as PNG.
pub fn save_png(pattern: &Pattern, path: &Path, size: u32) -> Result<()> {
    let pixmap = rasterize_pattern(pattern, size, None)?;
    pixmap
        .save_png(path)
        .with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use zagline::{generate_pattern, Parameters, SimplexNoise};

    fn straight_line() -> Pattern {
        // One line at y = 50 units = 250 px, 5 px thick
        let params = Parameters {
            num_lines: 1,
            num_segments: 4,
            chaos_x: 0.0,
            chaos_y: 0.0,
            vpadding: 0.5,
            stroke_width: 1.0,
            ..Parameters::default()
        };
        generate_pattern(&params, &SimplexNoise::new(0))
    }

    #[test]
    fn data_uri_decodes_to_svg() {
        let pattern = straight_line();
        let uri = svg_data_uri(&pattern, RASTER_SIZE);
        assert!(uri.starts_with("data:image/svg+xml;base64,"));

        let bytes = decode_data_uri(&uri).unwrap();
        assert_eq!(bytes, render_svg(&pattern, SvgSize::Pixels(500, 500)).into_bytes());
    }

    #[test]
    fn rejects_foreign_uri() {
        assert!(decode_data_uri("data:image/png;base64,AAAA").is_err());
        assert!(decode_data_uri("data:image/svg+xml;base64,***").is_err());
    }

    #[test]
    fn draws_line_where_expected() {
        let pixmap = rasterize_pattern(&straight_line(), RASTER_SIZE, None).unwrap();
        assert_eq!((pixmap.width(), pixmap.height()), (500, 500));

        let on_line = pixmap.pixel(250, 250).unwrap();
        let off_line = pixmap.pixel(250, 100).unwrap();
        assert!(on_line.alpha() > 0);
        assert_eq!(off_line.alpha(), 0);
    }

    #[test]
    fn background_fills_surface() {
        let pixmap = rasterize_pattern(&straight_line(), 100, Some(Color::WHITE)).unwrap();
        let corner = pixmap.pixel(0, 0).unwrap();
        assert_eq!((corner.red(), corner.green(), corner.blue(), corner.alpha()), (255, 255, 255, 255));
    }

    #[test]
    fn image_conversion_keeps_size() {
        let pixmap = rasterize_pattern(&straight_line(), 64, Some(Color::WHITE)).unwrap();
        let image = pixmap_to_image(pixmap).unwrap();
        assert_eq!((image.width(), image.height()), (64, 64));
    }
}
