//! # Shelf-Edge Label Composition
//!
//! Lays out price, product name, barcode and date on a white RGB canvas
//! sized for the printer's [`LabelClass`]. The canvas then goes straight to
//! [`RasterImage::from_rgb`](crate::raster::RasterImage::from_rgb).
//!
//! A barcode that cannot be rendered (unsupported characters, too many
//! modules for the box) is logged and the label is still produced, with
//! the barcode text in place of the bars.

use chrono::NaiveDate;
use image::{Rgb, RgbImage};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::barcode::{Symbology, render as barcode};
use crate::error::PrintResult;
use crate::layout::format_amount;
use crate::printer::LabelClass;
use crate::render::font::{LabelFont, chars_that_fit, draw_text, text_width};

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const INK: Rgb<u8> = Rgb([0, 0, 0]);

/// Gap between the barcode box and the text lines below it
const TEXT_GAP: u32 = 4;

/// One label to print.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelRequest {
    pub price: Decimal,
    pub name: String,
    pub barcode: String,
    pub date: NaiveDate,
}

impl LabelRequest {
    pub fn new(
        price: Decimal,
        name: impl Into<String>,
        barcode: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            price,
            name: name.into(),
            barcode: barcode.into(),
            date,
        }
    }
}

/// A composed label canvas.
#[derive(Debug, Clone)]
pub struct ComposedLabel {
    pub canvas: RgbImage,
    pub symbology: Symbology,
    /// False when the bars were skipped after a render failure
    pub barcode_rendered: bool,
}

/// Compose a label for the given printer class.
pub fn compose(request: &LabelRequest, class: LabelClass) -> PrintResult<ComposedLabel> {
    let width = class.width_dots();
    let height = class.height_dots();
    let margin = class.margin();
    let band = class.price_band();
    let (box_w, box_h) = class.barcode_box();

    let mut canvas = RgbImage::from_pixel(width, height, WHITE);

    // Price, centered in the top band
    let scale = class.price_scale();
    let (_, cell_h) = LabelFont::Regular.cell();
    let price = truncate_to(
        &format_price(request.price),
        chars_that_fit(width - 2 * margin, LabelFont::Regular, scale),
    );
    let price_w = text_width(&price, LabelFont::Regular, scale);
    let price_y = band.saturating_sub(cell_h * scale) / 2;
    draw_text(
        &mut canvas,
        (width - price_w) / 2,
        price_y,
        &price,
        LabelFont::Regular,
        scale,
    )?;
    fill_rect(&mut canvas, margin, band - 2, width - 2 * margin, 2);

    // Barcode box on the right
    let box_x = width - margin - box_w;
    let box_y = band + margin;
    let symbology = Symbology::select(&request.barcode);
    let barcode_rendered =
        match barcode::draw(&mut canvas, &symbology, box_x, box_y, box_w, box_h) {
            Ok(()) => true,
            Err(e) => {
                warn!(
                    barcode = %request.barcode,
                    symbology = symbology.name(),
                    error = %e,
                    "barcode not rendered, composing label without bars"
                );
                false
            }
        };

    // Name, wrapped into the region left of the barcode
    let name_w = box_x - 2 * margin;
    let per_line = chars_that_fit(name_w, LabelFont::Regular, 1);
    let max_lines = ((height - box_y - margin) / cell_h) as usize;
    for (i, line) in wrap_words(&request.name, per_line, max_lines)
        .iter()
        .enumerate()
    {
        draw_text(
            &mut canvas,
            margin,
            box_y + i as u32 * cell_h,
            line,
            LabelFont::Regular,
            1,
        )?;
    }

    // Barcode text and date, right-aligned under the box
    let (_, small_h) = LabelFont::Small.cell();
    let right = width - margin;
    let fit = chars_that_fit(box_w, LabelFont::Small, 1);
    let code_text = truncate_to(symbology.text(), fit);
    let date_text = request.date.format("%d/%m/%Y").to_string();
    let code_y = box_y + box_h + TEXT_GAP;
    for (i, text) in [code_text, date_text].iter().enumerate() {
        let w = text_width(text, LabelFont::Small, 1);
        let y = code_y + i as u32 * (small_h + 2);
        draw_text(&mut canvas, right - w, y, text, LabelFont::Small, 1)?;
    }

    debug!(
        name = %request.name,
        symbology = symbology.name(),
        width,
        height,
        "label composed"
    );

    Ok(ComposedLabel {
        canvas,
        symbology,
        barcode_rendered,
    })
}

/// Price with two decimal places.
pub fn format_price(price: Decimal) -> String {
    format_amount(price)
}

/// Greedy word wrap; words longer than a line are hard-cut.
fn wrap_words(text: &str, per_line: usize, max_lines: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    if per_line == 0 {
        return lines;
    }

    let mut current = String::new();
    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        loop {
            let used = current.chars().count();
            let needed = if used == 0 { word.len() } else { used + 1 + word.len() };
            if needed <= per_line {
                if used > 0 {
                    current.push(' ');
                }
                current.extend(word.iter());
                break;
            }
            if used > 0 {
                lines.push(std::mem::take(&mut current));
                continue;
            }
            // Word alone is too long
            let rest = word.split_off(per_line);
            lines.push(word.into_iter().collect());
            word = rest;
            if word.is_empty() {
                break;
            }
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines.truncate(max_lines);
    lines
}

fn truncate_to(text: &str, chars: usize) -> String {
    text.chars().take(chars).collect()
}

fn fill_rect(canvas: &mut RgbImage, x: u32, y: u32, w: u32, h: u32) {
    for py in y..(y + h).min(canvas.height()) {
        for px in x..(x + w).min(canvas.width()) {
            canvas.put_pixel(px, py, INK);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::RasterImage;

    fn request(barcode: &str) -> LabelRequest {
        LabelRequest::new(
            Decimal::new(199, 2),
            "Sparkling Water 500ml",
            barcode,
            NaiveDate::from_ymd_opt(2026, 10, 17).unwrap(),
        )
    }

    fn has_ink(canvas: &RgbImage, x0: u32, y0: u32, x1: u32, y1: u32) -> bool {
        (y0..y1).any(|y| (x0..x1).any(|x| *canvas.get_pixel(x, y) == INK))
    }

    #[test]
    fn test_canvas_matches_class() {
        for class in [LabelClass::Narrow, LabelClass::Wide] {
            let label = compose(&request("400638133393"), class).unwrap();
            assert_eq!(label.canvas.width(), class.width_dots());
            assert_eq!(label.canvas.height(), class.height_dots());
        }
    }

    #[test]
    fn test_barcode_drawn_in_right_box() {
        let class = LabelClass::Wide;
        let label = compose(&request("400638133393"), class).unwrap();
        assert!(label.barcode_rendered);
        assert_eq!(label.symbology, Symbology::Ean13("4006381333931".to_string()));

        let (bw, bh) = class.barcode_box();
        let bx = class.width_dots() - class.margin() - bw;
        let by = class.price_band() + class.margin();
        assert!(has_ink(&label.canvas, bx, by, bx + bw, by + bh));
    }

    #[test]
    fn test_price_in_top_band() {
        let class = LabelClass::Narrow;
        let label = compose(&request("12345678"), class).unwrap();
        let w = class.width_dots();
        assert!(has_ink(&label.canvas, w / 4, 0, 3 * w / 4, class.price_band() - 2));
    }

    #[test]
    fn test_unrenderable_barcode_still_composes() {
        // Non-ASCII falls back to Code-128, which cannot encode it
        let label = compose(&request("ÄÖÜ-ß"), LabelClass::Narrow).unwrap();
        assert!(!label.barcode_rendered);
        assert_eq!(label.symbology, Symbology::Code128("ÄÖÜ-ß".to_string()));
    }

    #[test]
    fn test_label_rasterizes_to_expected_size() {
        let label = compose(&request("9638507"), LabelClass::Narrow).unwrap();
        let raster = RasterImage::from_rgb(&label.canvas);
        assert_eq!(raster.data().len(), 48 * 200);
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(Decimal::new(199, 2)), "1.99");
        assert_eq!(format_price(Decimal::new(5, 0)), "5.00");
        assert_eq!(format_price(Decimal::new(12345, 3)), "12.35");
    }

    #[test]
    fn test_wrap_words() {
        assert_eq!(
            wrap_words("Sparkling Water 500ml", 10, 5),
            vec!["Sparkling", "Water", "500ml"]
        );
        assert_eq!(wrap_words("Sparkling Water", 16, 5), vec!["Sparkling Water"]);
        assert_eq!(wrap_words("Supercalifragilistic", 8, 5), vec![
            "Supercal", "ifragili", "stic"
        ]);
        assert_eq!(wrap_words("a b c d", 1, 2), vec!["a", "b"]);
        assert!(wrap_words("anything", 0, 3).is_empty());
    }
}
