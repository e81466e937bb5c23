//! # ESC/POS Raster Graphics
//!
//! This module implements the raster bit image command used to print
//! shelf-edge labels.
//!
//! ## Bit Packing
//!
//! Graphics data is packed as bytes where each bit represents one dot:
//! - Bit 7 (MSB) = leftmost dot
//! - Bit 0 (LSB) = rightmost dot
//! - 1 = black (print), 0 = white (no print)
//!
//! ```text
//! Byte value 0xF0 = 11110000 = ████░░░░
//! Byte value 0x0F = 00001111 = ░░░░████
//! Byte value 0xAA = 10101010 = █░█░█░█░
//! ```

use super::commands::{GS, u16_le};

/// Length of the `GS v 0` header preceding the bitmap.
pub const RASTER_HEADER_LEN: usize = 8;

/// # Print Raster Bit Image (GS v 0 m xL xH yL yH d1...dk)
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | GS v 0 m xL xH yL yH d1...dk |
/// | Hex     | 1D 76 30 m xL xH yL yH d1...dk |
/// | Decimal | 29 118 48 m xL xH yL yH d1...dk |
///
/// ## Parameters
///
/// - `m`: Mode (0 = normal density)
/// - `xL, xH`: Row width in bytes, little-endian
/// - `yL, yH`: Height in dots, little-endian
/// - `d1...dk`: Image data, k = row_bytes × height
///
/// ## Example
///
/// ```
/// use tillroll::protocol::graphics;
///
/// let data = vec![0xAA; 72 * 100];
/// let cmd = graphics::raster_image(72, 100, &data);
///
/// assert_eq!(&cmd[0..8], &[0x1D, 0x76, 0x30, 0x00, 72, 0, 100, 0]);
/// assert_eq!(cmd.len(), 8 + 72 * 100);
/// ```
pub fn raster_image(row_bytes: u16, height: u16, data: &[u8]) -> Vec<u8> {
    debug_assert!(
        data.len() == row_bytes as usize * height as usize,
        "Raster data length mismatch. Expected {} ({} bytes × {} rows), got {}",
        row_bytes as usize * height as usize,
        row_bytes,
        height,
        data.len()
    );

    let [xl, xh] = u16_le(row_bytes);
    let [yl, yh] = u16_le(height);

    let mut cmd = Vec::with_capacity(RASTER_HEADER_LEN + data.len());
    cmd.push(GS);
    cmd.push(b'v');
    cmd.push(b'0');
    cmd.push(0); // m = 0 (normal)
    cmd.push(xl);
    cmd.push(xh);
    cmd.push(yl);
    cmd.push(yh);
    cmd.extend_from_slice(data);
    cmd
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raster_header() {
        let data = vec![0xFF; 48 * 10];
        let cmd = raster_image(48, 10, &data);

        assert_eq!(cmd[0], 0x1D); // GS
        assert_eq!(cmd[1], 0x76); // 'v'
        assert_eq!(cmd[2], 0x30); // '0'
        assert_eq!(cmd[3], 0x00); // m
        assert_eq!(cmd[4], 48); // xL
        assert_eq!(cmd[5], 0); // xH
        assert_eq!(cmd[6], 10); // yL
        assert_eq!(cmd[7], 0); // yH
    }

    #[test]
    fn test_raster_large_height() {
        let height: u16 = 500;
        let data = vec![0x00; 72 * height as usize];
        let cmd = raster_image(72, height, &data);

        // 500 = 0x01F4 -> [0xF4, 0x01] in little-endian
        assert_eq!(cmd[6], 0xF4);
        assert_eq!(cmd[7], 0x01);
    }

    #[test]
    fn test_raster_preserves_data() {
        let data: Vec<u8> = (0..72 * 50).map(|i| (i % 256) as u8).collect();
        let cmd = raster_image(72, 50, &data);

        assert_eq!(&cmd[RASTER_HEADER_LEN..], &data[..]);
    }
}
