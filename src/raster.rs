//! # Monochrome Raster Encoding
//!
//! Converts an RGB canvas to the packed 1-bit-per-pixel format thermal
//! printers consume, and wraps it in a `GS v 0` command.
//!
//! ## Thresholding
//!
//! Each pixel is inked when its luminance is below the midpoint:
//!
//! ```text
//! luminance = 0.299·R + 0.587·G + 0.114·B
//! ink       = luminance < 128
//! ```
//!
//! The comparison is done in integer thousandths so mid-grey (128,128,128)
//! lands exactly on the threshold and stays white.
//!
//! ## Packing
//!
//! ```text
//! pixels:  █ █ ░ ░ █ ░ █ ░ | █ ░ ░
//! byte 0:  1 1 0 0 1 0 1 0  = 0xCA
//! byte 1:  1 0 0 0 0 0 0 0  = 0x80   (padding bits are white)
//! ```

use image::RgbImage;

use crate::error::{PrintError, PrintResult};
use crate::protocol::graphics;

/// A packed monochrome image.
///
/// `data.len()` is always `row_bytes() * height`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RasterImage {
    /// Threshold and pack an RGB canvas.
    ///
    /// ## Example
    ///
    /// ```
    /// use image::{Rgb, RgbImage};
    /// use tillroll::raster::RasterImage;
    ///
    /// let canvas = RgbImage::from_pixel(16, 2, Rgb([255, 255, 255]));
    /// let raster = RasterImage::from_rgb(&canvas);
    /// assert_eq!(raster.data(), &[0, 0, 0, 0]);
    /// ```
    pub fn from_rgb(canvas: &RgbImage) -> Self {
        let (width, height) = canvas.dimensions();
        let mut data = Vec::with_capacity(width.div_ceil(8) as usize * height as usize);
        let mut row = Vec::with_capacity(width as usize);

        for y in 0..height {
            row.clear();
            for x in 0..width {
                let [r, g, b] = canvas.get_pixel(x, y).0;
                row.push(is_ink(r, g, b));
            }
            data.extend(pack_row(&row));
        }

        Self {
            width,
            height,
            data,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per row: `ceil(width / 8)`
    #[inline]
    pub fn row_bytes(&self) -> u32 {
        self.width.div_ceil(8)
    }

    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Whether the pixel at (`x`, `y`) is inked.
    pub fn is_set(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let byte = self.data[(y * self.row_bytes() + x / 8) as usize];
        (byte >> (7 - (x % 8))) & 1 == 1
    }

    /// Build the `GS v 0` command for this image, consuming it.
    ///
    /// Fails when either dimension does not fit the command's 16-bit fields.
    pub fn into_command(self) -> PrintResult<Vec<u8>> {
        let row_bytes = u16::try_from(self.row_bytes()).map_err(|_| {
            PrintError::Image(format!("raster too wide: {} dots", self.width))
        })?;
        let height = u16::try_from(self.height).map_err(|_| {
            PrintError::Image(format!("raster too tall: {} rows", self.height))
        })?;
        Ok(graphics::raster_image(row_bytes, height, &self.data))
    }
}

/// Luminance threshold in thousandths: 0.299R + 0.587G + 0.114B < 128.
#[inline]
pub fn is_ink(r: u8, g: u8, b: u8) -> bool {
    let luma = 299 * u32::from(r) + 587 * u32::from(g) + 114 * u32::from(b);
    luma < 128_000
}

/// Pack a row of boolean pixels into bytes, MSB first.
///
/// ## Example
///
/// ```
/// use tillroll::raster::pack_row;
///
/// let row = vec![true, true, false, false, true, false, true, false];
/// assert_eq!(pack_row(&row), vec![0b11001010]);
/// ```
pub fn pack_row(pixels: &[bool]) -> Vec<u8> {
    let mut bytes = vec![0u8; pixels.len().div_ceil(8)];

    for (i, &pixel) in pixels.iter().enumerate() {
        if pixel {
            bytes[i / 8] |= 0x80 >> (i % 8);
        }
    }

    bytes
}
