//! # GS1 Check Digits
//!
//! EAN-13 and EAN-8 both end in a modulo-10 check digit computed from
//! alternating 1/3 weights. The weights start from opposite ends:
//!
//! ```text
//! EAN-13 (12 data digits):  d0×1 + d1×3 + d2×1 + ... + d11×3
//! EAN-8  ( 7 data digits):  d0×3 + d1×1 + d2×3 + ... + d6×3
//!
//! check = (10 - sum mod 10) mod 10
//! ```
//!
//! Both functions are pure and return `None` for input of the wrong length
//! or containing non-digits.

/// Compute the EAN-13 check digit for exactly 12 data digits.
///
/// ## Example
///
/// ```
/// use tillroll::barcode::checksum::ean13_check_digit;
///
/// assert_eq!(ean13_check_digit("400638133393"), Some(1));
/// ```
pub fn ean13_check_digit(digits: &str) -> Option<u8> {
    weighted_check_digit(digits, 12, [1, 3])
}

/// Compute the EAN-8 check digit for exactly 7 data digits.
///
/// ## Example
///
/// ```
/// use tillroll::barcode::checksum::ean8_check_digit;
///
/// assert_eq!(ean8_check_digit("9638507"), Some(4));
/// ```
pub fn ean8_check_digit(digits: &str) -> Option<u8> {
    weighted_check_digit(digits, 7, [3, 1])
}

/// `weights[0]` applies to even indices, `weights[1]` to odd ones.
fn weighted_check_digit(digits: &str, len: usize, weights: [u32; 2]) -> Option<u8> {
    if digits.len() != len {
        return None;
    }
    let mut sum = 0u32;
    for (i, ch) in digits.chars().enumerate() {
        sum += ch.to_digit(10)? * weights[i % 2];
    }
    Some(((10 - sum % 10) % 10) as u8)
}
