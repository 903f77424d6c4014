//! SVG rasterization using resvg/usvg.

use std::sync::Arc;

use image::{Rgba, RgbaImage};
use resvg::tiny_skia::{self, Pixmap, Transform};
use resvg::usvg::{Options, Tree, fontdb};
use thiserror::Error;

use crate::color::Color;

/// Errors from turning an SVG document into pixels.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to parse SVG: {0}")]
    SvgParse(#[from] resvg::usvg::Error),

    #[error("cannot allocate a {width}x{height} pixmap")]
    PixmapAllocation { width: u32, height: u32 },
}

// ============================================================================
// Rasterizer
// ============================================================================

/// Renders SVG documents to RGBA images.
///
/// Holds the font database text is shaped against. Loading system fonts is
/// slow, so build one rasterizer and share it.
#[derive(Clone)]
pub struct Rasterizer {
    fontdb: Arc<fontdb::Database>,
}

impl Rasterizer {
    /// Creates a rasterizer backed by the system fonts.
    pub fn new() -> Self {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        tracing::info!(font_count = db.len(), "Loaded fonts for SVG text rendering");
        Self {
            fontdb: Arc::new(db),
        }
    }

    /// Creates a rasterizer with an empty font database; text is skipped.
    pub fn without_system_fonts() -> Self {
        Self {
            fontdb: Arc::new(fontdb::Database::new()),
        }
    }

    /// Number of font faces available for text.
    pub fn font_count(&self) -> usize {
        self.fontdb.len()
    }

    /// Renders `svg` scaled by `scale`, over `background` when given.
    ///
    /// The output is `ceil(size * scale)` pixels on each side, where `size`
    /// is the document's declared size.
    pub fn rasterize(
        &self,
        svg: &str,
        scale: f32,
        background: Option<Color>,
    ) -> Result<RgbaImage, RenderError> {
        let opts = Options {
            fontdb: self.fontdb.clone(),
            ..Default::default()
        };
        let tree = Tree::from_str(svg, &opts)?;

        let svg_size = tree.size();
        let width = (svg_size.width() * scale).ceil() as u32;
        let height = (svg_size.height() * scale).ceil() as u32;
        let mut pixmap = Pixmap::new(width, height)
            .ok_or(RenderError::PixmapAllocation { width, height })?;

        if let Some(bg) = background {
            let (r, g, b, a) = bg.as_tuple();
            pixmap.fill(tiny_skia::Color::from_rgba8(r, g, b, a));
        }
        resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());

        tracing::debug!(width, height, scale, "Rasterized SVG");
        Ok(pixmap_to_rgba_image(&pixmap))
    }
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Rasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rasterizer")
            .field("font_count", &self.fontdb.len())
            .finish()
    }
}

// ============================================================================
// Pixel conversion
// ============================================================================

/// Converts a tiny_skia Pixmap to an image::RgbaImage.
fn pixmap_to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    let mut img = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in img.pixels_mut().zip(pixmap.pixels()) {
        // tiny_skia stores premultiplied alpha
        let (r, g, b, a) = unpremultiply(src.red(), src.green(), src.blue(), src.alpha());
        *dst = Rgba([r, g, b, a]);
    }
    img
}

/// Unpremultiplies a premultiplied alpha pixel.
fn unpremultiply(r: u8, g: u8, b: u8, a: u8) -> (u8, u8, u8, u8) {
    if a == 0 {
        (0, 0, 0, 0)
    } else {
        let a_f = a as f32 / 255.0;
        (
            (r as f32 / a_f).round().min(255.0) as u8,
            (g as f32 / a_f).round().min(255.0) as u8,
            (b as f32 / a_f).round().min(255.0) as u8,
            a,
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const DISC: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="6"><circle cx="5" cy="3" r="2" fill="#ff0000"/></svg>"##;

    #[test]
    fn scales_output_dimensions() {
        let img = Rasterizer::without_system_fonts()
            .rasterize(DISC, 2.0, None)
            .unwrap();
        assert_eq!(img.dimensions(), (20, 12));
    }

    #[test]
    fn background_fills_uncovered_pixels() {
        let raster = Rasterizer::without_system_fonts();

        let transparent = raster.rasterize(DISC, 1.0, None).unwrap();
        assert_eq!(transparent.get_pixel(0, 0).0, [0, 0, 0, 0]);

        let opaque = raster.rasterize(DISC, 1.0, Some(Color::WHITE)).unwrap();
        assert_eq!(opaque.get_pixel(0, 0).0, [255, 255, 255, 255]);
        assert_eq!(opaque.get_pixel(5, 3).0, [255, 0, 0, 255]);
    }

    #[test]
    fn rejects_malformed_svg() {
        let err = Rasterizer::without_system_fonts()
            .rasterize("<svg", 1.0, None)
            .unwrap_err();
        assert!(matches!(err, RenderError::SvgParse(_)));
    }

    #[test]
    fn unpremultiply_restores_channels() {
        assert_eq!(unpremultiply(0, 0, 0, 0), (0, 0, 0, 0));
        assert_eq!(unpremultiply(128, 0, 0, 128), (255, 0, 0, 128));
        assert_eq!(unpremultiply(255, 255, 255, 255), (255, 255, 255, 255));
    }
}
