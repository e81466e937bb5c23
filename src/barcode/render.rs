//! # Barcode Rendering
//!
//! Turns a [`Symbology`] into a module pattern (`true` = bar) and draws it
//! into a fixed pixel box on a label canvas.
//!
//! EAN patterns are built from the GS1 L/G/R code tables so the digits are
//! encoded exactly as selected. Code-128 uses the barcoders crate.
//!
//! ## EAN-13 Structure (95 modules)
//!
//! ```text
//! 101 | 6 digits (L/G by first digit) | 01010 | 6 digits (R) | 101
//! ```
//!
//! ## EAN-8 Structure (67 modules)
//!
//! ```text
//! 101 | 4 digits (L) | 01010 | 4 digits (R) | 101
//! ```

use barcoders::sym::code128::Code128;
use image::{Rgb, RgbImage};
use thiserror::Error;

use super::Symbology;

/// L-code patterns, 7 modules each, MSB first.
const L_CODES: [u8; 10] = [
    0b0001101, 0b0011001, 0b0010011, 0b0111101, 0b0100011, 0b0110001, 0b0101111, 0b0111011,
    0b0110111, 0b0001011,
];

/// Parity of the six left-hand digits of an EAN-13, selected by the first
/// digit. Bit 5 is the leftmost digit; a set bit means G-code.
const EAN13_PARITY: [u8; 10] = [
    0b000000, 0b001011, 0b001101, 0b001110, 0b010011, 0b011001, 0b011100, 0b010101, 0b010110,
    0b011010,
];

const GUARD: [bool; 3] = [true, false, true];
const CENTER_GUARD: [bool; 5] = [false, true, false, true, false];

const INK: Rgb<u8> = Rgb([0, 0, 0]);

/// Why a barcode could not be rendered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BarcodeError {
    /// The data is not valid for the symbology
    #[error("invalid barcode data: {0}")]
    InvalidData(String),
    /// The pattern does not fit the box at one dot per module
    #[error("barcode needs {modules} modules but the box is {box_width} dots wide")]
    TooWide { modules: usize, box_width: u32 },
}

fn r_code(digit: usize) -> u8 {
    !L_CODES[digit] & 0x7F
}

fn g_code(digit: usize) -> u8 {
    // G is R read right-to-left
    let r = r_code(digit);
    (0..7).fold(0u8, |acc, bit| (acc << 1) | ((r >> bit) & 1))
}

fn push_code(modules: &mut Vec<bool>, code: u8) {
    for bit in (0..7).rev() {
        modules.push((code >> bit) & 1 == 1);
    }
}

fn parse_digits(data: &str, expected: usize) -> Result<Vec<usize>, BarcodeError> {
    let digits: Option<Vec<usize>> = data
        .chars()
        .map(|c| c.to_digit(10).map(|d| d as usize))
        .collect();
    match digits {
        Some(d) if d.len() == expected => Ok(d),
        _ => Err(BarcodeError::InvalidData(format!(
            "expected {} digits, got {:?}",
            expected, data
        ))),
    }
}

/// Encode 13 digits as EAN-13 modules.
pub fn encode_ean13(data: &str) -> Result<Vec<bool>, BarcodeError> {
    let digits = parse_digits(data, 13)?;
    let parity = EAN13_PARITY[digits[0]];

    let mut modules = Vec::with_capacity(95);
    modules.extend_from_slice(&GUARD);
    for (i, &d) in digits[1..7].iter().enumerate() {
        let use_g = (parity >> (5 - i)) & 1 == 1;
        push_code(&mut modules, if use_g { g_code(d) } else { L_CODES[d] });
    }
    modules.extend_from_slice(&CENTER_GUARD);
    for &d in &digits[7..13] {
        push_code(&mut modules, r_code(d));
    }
    modules.extend_from_slice(&GUARD);
    Ok(modules)
}

/// Encode 8 digits as EAN-8 modules.
pub fn encode_ean8(data: &str) -> Result<Vec<bool>, BarcodeError> {
    let digits = parse_digits(data, 8)?;

    let mut modules = Vec::with_capacity(67);
    modules.extend_from_slice(&GUARD);
    for &d in &digits[..4] {
        push_code(&mut modules, L_CODES[d]);
    }
    modules.extend_from_slice(&CENTER_GUARD);
    for &d in &digits[4..] {
        push_code(&mut modules, r_code(d));
    }
    modules.extend_from_slice(&GUARD);
    Ok(modules)
}

/// Encode data as Code 128 modules.
pub fn encode_code128(data: &str) -> Result<Vec<bool>, BarcodeError> {
    if data.is_empty() {
        return Err(BarcodeError::InvalidData("empty Code-128 data".to_string()));
    }
    // Character set B (Ɓ) covers printable ASCII, which is what SKUs use.
    let prefixed_data = format!("\u{0181}{}", data);

    let barcode =
        Code128::new(&prefixed_data).map_err(|e| BarcodeError::InvalidData(format!("{e:?}")))?;

    Ok(barcode.encode().into_iter().map(|m| m == 1).collect())
}

/// Module pattern for any selected symbology.
pub fn modules(symbology: &Symbology) -> Result<Vec<bool>, BarcodeError> {
    match symbology {
        Symbology::Ean13(data) => encode_ean13(data),
        Symbology::Ean8(data) => encode_ean8(data),
        Symbology::Code128(data) => encode_code128(data),
    }
}

/// Draw the barcode into the box at (`x`, `y`) of size `width`×`height`.
///
/// Modules are scaled by the largest whole number of dots that fits and
/// the pattern is centered horizontally in the box.
pub fn draw(
    canvas: &mut RgbImage,
    symbology: &Symbology,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
) -> Result<(), BarcodeError> {
    let modules = modules(symbology)?;
    let module_px = width / modules.len() as u32;
    if module_px == 0 {
        return Err(BarcodeError::TooWide {
            modules: modules.len(),
            box_width: width,
        });
    }

    let offset = x + (width - module_px * modules.len() as u32) / 2;
    for (i, &bar) in modules.iter().enumerate() {
        if !bar {
            continue;
        }
        let bar_x = offset + i as u32 * module_px;
        for dx in 0..module_px {
            for dy in 0..height {
                let (px, py) = (bar_x + dx, y + dy);
                if px < canvas.width() && py < canvas.height() {
                    canvas.put_pixel(px, py, INK);
                }
            }
        }
    }
    Ok(())
}
