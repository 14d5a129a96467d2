// src/core/visualization/text.rs
//
// Anti-aliased label text rasterized from an embedded TrueType font.

use ab_glyph::{point, Font, FontRef, GlyphId, PxScale, ScaleFont};
use image::Rgb;

use super::chart::{blend_pixel, Canvas};
use crate::error::{AnalysisError, Result};

/// DejaVu Sans, embedded so charts render the same on every machine
const FONT_DATA: &[u8] = include_bytes!("../../../assets/DejaVuSans.ttf");

/// Lays out and draws single-line labels at a fixed pixel size
pub struct TextRenderer {
    font: FontRef<'static>,
    scale: PxScale,
}

impl TextRenderer {
    /// Renderer for the embedded font
    pub fn new(size_px: f32) -> Result<Self> {
        Self::from_font_data(FONT_DATA, size_px)
    }

    pub fn from_font_data(font_data: &'static [u8], size_px: f32) -> Result<Self> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(AnalysisError::Render(format!(
                "font size must be positive, got {}",
                size_px
            )));
        }
        let font = FontRef::try_from_slice(font_data)
            .map_err(|e| AnalysisError::Render(format!("invalid font: {}", e)))?;

        Ok(Self {
            font,
            scale: PxScale::from(size_px),
        })
    }

    /// Ascent to descent, in pixels
    pub fn line_height(&self) -> u32 {
        let scaled = self.font.as_scaled(self.scale);
        (scaled.ascent() - scaled.descent()).ceil() as u32
    }

    /// Horizontal advance of `text`, kerning included
    pub fn text_width(&self, text: &str) -> u32 {
        let scaled = self.font.as_scaled(self.scale);
        let mut width = 0.0f32;
        let mut previous: Option<GlyphId> = None;
        for c in text.chars() {
            let id = scaled.glyph_id(c);
            if let Some(prev) = previous {
                width += scaled.kern(prev, id);
            }
            width += scaled.h_advance(id);
            previous = Some(id);
        }
        width.ceil() as u32
    }

    /// Draw `text` with the top of its line box at `(x, y)`.
    ///
    /// Glyph coverage becomes the blend alpha, so text anti-aliases against
    /// whatever is already on the canvas. Pixels off the canvas are dropped.
    pub fn draw_text(&self, img: &mut Canvas, x: i64, y: i64, text: &str, color: Rgb<u8>) {
        let scaled = self.font.as_scaled(self.scale);
        let baseline = y as f32 + scaled.ascent();
        let mut caret = x as f32;
        let mut previous: Option<GlyphId> = None;

        for c in text.chars() {
            let id = scaled.glyph_id(c);
            if let Some(prev) = previous {
                caret += scaled.kern(prev, id);
            }
            let glyph = id.with_scale_and_position(self.scale, point(caret, baseline));
            caret += scaled.h_advance(id);
            previous = Some(id);

            if let Some(outline) = self.font.outline_glyph(glyph) {
                let bounds = outline.px_bounds();
                let (left, top) = (bounds.min.x as i64, bounds.min.y as i64);
                outline.draw(|gx, gy, coverage| {
                    blend_pixel(img, left + gx as i64, top + gy as i64, color, coverage);
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::ImageBuffer;

    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

    #[test]
    fn test_embedded_font_loads() {
        let text = TextRenderer::new(18.0).unwrap();
        let height = text.line_height();
        assert!(height >= 18 && height <= 30, "line height {}", height);
    }

    #[test]
    fn test_text_width_grows_with_text() {
        let text = TextRenderer::new(18.0).unwrap();
        assert_eq!(text.text_width(""), 0);
        let one = text.text_width("8");
        let three = text.text_width("888");
        assert!(one > 0);
        assert!(three >= 3 * one - 2 && three <= 3 * one);
        assert!(text.text_width("-0.5") > text.text_width("0.5"));
    }

    #[test]
    fn test_width_scales_with_size() {
        let small = TextRenderer::new(12.0).unwrap();
        let large = TextRenderer::new(24.0).unwrap();
        let (s, l) = (small.text_width("HK 0.25"), large.text_width("HK 0.25"));
        assert!(l >= 2 * s - 2 && l <= 2 * s + 2, "{} vs {}", s, l);
    }

    #[test]
    fn test_draw_text_inks_inside_its_box() {
        let text = TextRenderer::new(20.0).unwrap();
        let mut img = ImageBuffer::from_pixel(120, 40, WHITE);
        text.draw_text(&mut img, 10, 5, "LP 1.0", BLACK);

        let width = text.text_width("LP 1.0") as u32;
        let height = text.line_height();
        let mut inked = 0;
        for (x, y, pixel) in img.enumerate_pixels() {
            if *pixel != WHITE {
                inked += 1;
                assert!(x >= 10 && x < 10 + width + 2, "stray pixel at x={}", x);
                assert!(y >= 5 && y < 5 + height + 2, "stray pixel at y={}", y);
            }
        }
        assert!(inked > 50);
        // Anti-aliased edges leave partially covered pixels
        assert!(img.pixels().any(|p| *p != WHITE && *p != BLACK));
    }

    #[test]
    fn test_text_off_canvas_is_clipped() {
        let text = TextRenderer::new(20.0).unwrap();
        let mut img = ImageBuffer::from_pixel(30, 30, WHITE);
        text.draw_text(&mut img, -200, -200, "0.0", BLACK);
        text.draw_text(&mut img, 500, 500, "0.0", BLACK);
        assert!(img.pixels().all(|p| *p == WHITE));
    }

    #[test]
    fn test_invalid_font_and_size_are_rejected() {
        assert!(matches!(
            TextRenderer::from_font_data(&[0u8; 16], 12.0),
            Err(AnalysisError::Render(_))
        ));
        assert!(TextRenderer::new(0.0).is_err());
        assert!(TextRenderer::new(f32::NAN).is_err());
    }
}
