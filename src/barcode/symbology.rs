//! # Symbology Selection
//!
//! Shelf labels carry whatever code the product record holds: a full
//! EAN, an EAN missing its check digit, or an internal SKU. The selector
//! looks at the digits only and decides:
//!
//! | Digits | Result |
//! |--------|--------|
//! | 12 | EAN-13, check digit appended |
//! | 13 | EAN-13 as given |
//! | 7  | EAN-8, check digit appended |
//! | 8  | EAN-8 as given |
//! | other | Code-128 of the original string |
//!
//! Full-length codes are never re-checked: a 13-digit code with a wrong
//! check digit still prints as EAN-13 so the label matches the record.

use super::checksum::{ean8_check_digit, ean13_check_digit};

/// A barcode ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Symbology {
    /// 13 digits including the check digit
    Ean13(String),
    /// 8 digits including the check digit
    Ean8(String),
    /// Original, unfiltered input
    Code128(String),
}

impl Symbology {
    /// Choose the symbology for an arbitrary barcode string.
    ///
    /// ## Example
    ///
    /// ```
    /// use tillroll::barcode::Symbology;
    ///
    /// assert_eq!(Symbology::select("123456789012"), Symbology::Ean13("1234567890128".into()));
    /// assert_eq!(Symbology::select("12345678"), Symbology::Ean8("12345678".into()));
    /// assert_eq!(Symbology::select("ABC123"), Symbology::Code128("ABC123".into()));
    /// ```
    pub fn select(input: &str) -> Self {
        let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();

        match digits.len() {
            12 => match ean13_check_digit(&digits) {
                Some(check) => Self::Ean13(format!("{digits}{check}")),
                None => Self::Code128(input.to_string()),
            },
            13 => Self::Ean13(digits),
            7 => match ean8_check_digit(&digits) {
                Some(check) => Self::Ean8(format!("{digits}{check}")),
                None => Self::Code128(input.to_string()),
            },
            8 => Self::Ean8(digits),
            _ => Self::Code128(input.to_string()),
        }
    }

    /// The human-readable text printed under the bars.
    pub fn text(&self) -> &str {
        match self {
            Self::Ean13(s) | Self::Ean8(s) | Self::Code128(s) => s,
        }
    }

    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ean13(_) => "EAN-13",
            Self::Ean8(_) => "EAN-8",
            Self::Code128(_) => "Code-128",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twelve_digits_get_check_digit() {
        assert_eq!(
            Symbology::select("123456789012"),
            Symbology::Ean13("1234567890128".to_string())
        );
        assert_eq!(
            Symbology::select("400638133393"),
            Symbology::Ean13("4006381333931".to_string())
        );
    }

    #[test]
    fn test_thirteen_digits_not_recomputed() {
        // Wrong check digit on purpose
        assert_eq!(
            Symbology::select("4006381333935"),
            Symbology::Ean13("4006381333935".to_string())
        );
    }

    #[test]
    fn test_seven_digits_get_check_digit() {
        assert_eq!(
            Symbology::select("9638507"),
            Symbology::Ean8("96385074".to_string())
        );
    }

    #[test]
    fn test_eight_digits_unchanged() {
        assert_eq!(
            Symbology::select("12345678"),
            Symbology::Ean8("12345678".to_string())
        );
    }

    #[test]
    fn test_digits_extracted_from_mixed_input() {
        // Separators are dropped before counting
        assert_eq!(
            Symbology::select("4006-3813-3393"),
            Symbology::Ean13("4006381333931".to_string())
        );
    }

    #[test]
    fn test_other_lengths_fall_back_to_code128_original() {
        assert_eq!(
            Symbology::select("ABC123"),
            Symbology::Code128("ABC123".to_string())
        );
        assert_eq!(
            Symbology::select("SKU-00042"),
            Symbology::Code128("SKU-00042".to_string())
        );
        assert_eq!(Symbology::select(""), Symbology::Code128(String::new()));
    }

    #[test]
    fn test_text_and_name() {
        let sym = Symbology::select("9638507");
        assert_eq!(sym.text(), "96385074");
        assert_eq!(sym.name(), "EAN-8");
    }
}
