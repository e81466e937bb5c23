//! Bitmap text for label canvases.
//!
//! Uses the Spleen bitmap font family, drawn at an integer scale so glyph
//! edges stay crisp after thresholding.

use image::{Rgb, RgbImage};
use spleen_font::{FONT_6X12, FONT_12X24, PSF2Font};

use crate::error::{PrintError, PrintResult};

const INK: Rgb<u8> = Rgb([0, 0, 0]);

/// Glyph sets available for labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelFont {
    /// Spleen 12×24, for price and product name
    Regular,
    /// Spleen 6×12, for barcode digits and dates
    Small,
}

impl LabelFont {
    /// Cell size (width, height) at scale 1
    pub fn cell(self) -> (u32, u32) {
        match self {
            Self::Regular => (12, 24),
            Self::Small => (6, 12),
        }
    }

    fn data(self) -> &'static [u8] {
        match self {
            Self::Regular => FONT_12X24,
            Self::Small => FONT_6X12,
        }
    }
}

/// Width in dots of `text` drawn with `font` at `scale`.
pub fn text_width(text: &str, font: LabelFont, scale: u32) -> u32 {
    text.chars().count() as u32 * font.cell().0 * scale
}

/// Number of characters that fit in `width` dots.
pub fn chars_that_fit(width: u32, font: LabelFont, scale: u32) -> usize {
    (width / (font.cell().0 * scale)) as usize
}

/// Draw `text` with its top-left corner at (`x`, `y`).
///
/// Pixels falling outside the canvas are clipped. Characters missing from
/// the font render as a box outline.
pub fn draw_text(
    canvas: &mut RgbImage,
    x: u32,
    y: u32,
    text: &str,
    font: LabelFont,
    scale: u32,
) -> PrintResult<()> {
    let mut spleen = PSF2Font::new(font.data())
        .map_err(|_| PrintError::Image("failed to load Spleen font".to_string()))?;
    let (cell_w, cell_h) = font.cell();

    for (i, ch) in text.chars().enumerate() {
        let origin_x = x + i as u32 * cell_w * scale;
        let utf8 = ch.to_string();

        match spleen.glyph_for_utf8(utf8.as_bytes()) {
            Some(glyph) => {
                for (row_y, row) in glyph.enumerate() {
                    for (col_x, on) in row.enumerate() {
                        if on {
                            fill_cell(canvas, origin_x, y, col_x as u32, row_y as u32, scale);
                        }
                    }
                }
            }
            None => {
                for col in 0..cell_w {
                    fill_cell(canvas, origin_x, y, col, 0, scale);
                    fill_cell(canvas, origin_x, y, col, cell_h - 1, scale);
                }
                for row in 0..cell_h {
                    fill_cell(canvas, origin_x, y, 0, row, scale);
                    fill_cell(canvas, origin_x, y, cell_w - 1, row, scale);
                }
            }
        }
    }

    Ok(())
}

/// Fill one scaled font pixel.
fn fill_cell(canvas: &mut RgbImage, origin_x: u32, origin_y: u32, col: u32, row: u32, scale: u32) {
    for dy in 0..scale {
        for dx in 0..scale {
            let px = origin_x + col * scale + dx;
            let py = origin_y + row * scale + dy;
            if px < canvas.width() && py < canvas.height() {
                canvas.put_pixel(px, py, INK);
            }
        }
    }
}
