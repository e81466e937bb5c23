//! # Fixed-Width Line Layout
//!
//! Receipts and reports are printed in the printer's built-in font, so every
//! line is a fixed number of characters. The layout derives three columns
//! from the paper width:
//!
//! ```text
//! 58mm (32 chars):  QQQ NNNNNNNNNNNNNNNNNNNN PPPPPPP
//! 80mm (48 chars):  QQQQ NNNNNNNNNNNNNNNNNNNNNNNNNNNNNNNN PPPPPPPPPP
//! ```
//!
//! Labels wider than their column are cut, never wrapped, so a report
//! row is always exactly one printed line.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::error::{PrintError, PrintResult};

/// Character budget used for paper widths between the two known classes.
pub const DEFAULT_MAX_CHARS: usize = 32;

/// Column widths for one printer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LayoutSpec {
    pub max_chars: usize,
    pub qty_width: usize,
    pub name_width: usize,
    pub price_width: usize,
}

impl LayoutSpec {
    /// Layout for 58mm paper and narrower.
    pub const NARROW: Self = Self {
        max_chars: 32,
        qty_width: 3,
        name_width: 20,
        price_width: 7,
    };

    /// Layout for 80mm paper and wider.
    pub const WIDE: Self = Self {
        max_chars: 48,
        qty_width: 4,
        name_width: 32,
        price_width: 10,
    };

    /// Derive the layout from the paper width in millimeters.
    ///
    /// ## Example
    ///
    /// ```
    /// use tillroll::layout::LayoutSpec;
    ///
    /// assert_eq!(LayoutSpec::for_paper_width(58).unwrap(), LayoutSpec::NARROW);
    /// assert_eq!(LayoutSpec::for_paper_width(80).unwrap(), LayoutSpec::WIDE);
    /// assert!(LayoutSpec::for_paper_width(0).is_err());
    /// ```
    pub fn for_paper_width(paper_width_mm: i32) -> PrintResult<Self> {
        Self::for_paper_width_with_max(paper_width_mm, None)
    }

    /// Like [`for_paper_width`](Self::for_paper_width), with an explicit
    /// character budget for the in-between widths.
    ///
    /// The budget is ignored for the two known paper classes.
    pub fn for_paper_width_with_max(
        paper_width_mm: i32,
        max_chars: Option<usize>,
    ) -> PrintResult<Self> {
        if paper_width_mm <= 0 {
            return Err(PrintError::Configuration(format!(
                "paper width must be positive, got {}mm",
                paper_width_mm
            )));
        }

        if paper_width_mm <= 58 {
            return Ok(Self::NARROW);
        }
        if paper_width_mm >= 80 {
            return Ok(Self::WIDE);
        }

        let max_chars = max_chars.unwrap_or(DEFAULT_MAX_CHARS);
        let qty_width = (max_chars / 12).max(1);
        let price_width = (max_chars / 6).max(1);
        let name_width = max_chars
            .saturating_sub(qty_width + price_width + 2)
            .max(1);

        Ok(Self {
            max_chars,
            qty_width,
            name_width,
            price_width,
        })
    }

    /// Format a `qty name price` row.
    ///
    /// ```
    /// use rust_decimal::Decimal;
    /// use tillroll::layout::LayoutSpec;
    ///
    /// let row = LayoutSpec::NARROW.format_row(Decimal::from(2), "Bakery", Decimal::new(300, 2));
    /// assert_eq!(row, format!("  2 Bakery{}3.00", " ".repeat(18)));
    /// ```
    pub fn format_row(&self, quantity: Decimal, label: &str, amount: Decimal) -> String {
        self.format_columns(&format_quantity(quantity), label, &format_amount(amount))
    }

    /// Three columns with arbitrary text in the quantity and price slots.
    ///
    /// Quantity and price are never cut. When either is wider than its
    /// column the label column gives up the difference, so the row keeps
    /// to `max_chars` and only the label is shortened.
    ///
    /// ```
    /// use tillroll::layout::LayoutSpec;
    ///
    /// let row = LayoutSpec::NARROW.format_columns("1234", "Beverages", "12345.67");
    /// assert_eq!(row, format!("1234 Beverages{}12345.67", " ".repeat(10)));
    /// ```
    pub fn format_columns(&self, left: &str, label: &str, right: &str) -> String {
        let qw = self.qty_width.max(left.chars().count());
        let pw = self.price_width.max(right.chars().count());
        let overflow = (qw - self.qty_width) + (pw - self.price_width);
        let nw = self.name_width.saturating_sub(overflow);

        format!(
            "{:>qw$} {:<nw$} {:>pw$}",
            left,
            truncate(label, nw),
            right,
        )
    }

    /// Left text with right text flush to the line end.
    ///
    /// The left text is cut when both do not fit.
    pub fn format_pair(&self, left: &str, right: &str) -> String {
        let right_len = right.chars().count();
        let room = self.max_chars.saturating_sub(right_len + 1);
        let left = truncate(left, room);
        let pad = self.max_chars.saturating_sub(left.chars().count() + right_len);
        format!("{}{}{}", left, " ".repeat(pad.max(1)), right)
    }
}

/// Cut `text` to at most `width` characters.
pub fn truncate(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

/// Money with exactly two decimal places, half away from zero.
pub fn format_amount(amount: Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded.to_string()
}

/// Quantity without trailing zeros (`2`, `1.5`).
pub fn format_quantity(quantity: Decimal) -> String {
    quantity.normalize().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_narrow_and_wide_classes() {
        assert_eq!(
            LayoutSpec::for_paper_width(58).unwrap(),
            LayoutSpec {
                max_chars: 32,
                qty_width: 3,
                name_width: 20,
                price_width: 7
            }
        );
        assert_eq!(LayoutSpec::for_paper_width(50).unwrap(), LayoutSpec::NARROW);
        assert_eq!(
            LayoutSpec::for_paper_width(80).unwrap(),
            LayoutSpec {
                max_chars: 48,
                qty_width: 4,
                name_width: 32,
                price_width: 10
            }
        );
        assert_eq!(LayoutSpec::for_paper_width(112).unwrap(), LayoutSpec::WIDE);
    }

    #[test]
    fn test_fallback_width_65() {
        // 32/12 = 2, 32/6 = 5, 32 - 2 - 5 - 2 = 23
        assert_eq!(
            LayoutSpec::for_paper_width(65).unwrap(),
            LayoutSpec {
                max_chars: 32,
                qty_width: 2,
                name_width: 23,
                price_width: 5
            }
        );
    }

    #[test]
    fn test_fallback_with_explicit_max() {
        let spec = LayoutSpec::for_paper_width_with_max(70, Some(42)).unwrap();
        assert_eq!(spec.qty_width, 3);
        assert_eq!(spec.price_width, 7);
        assert_eq!(spec.name_width, 30);
        // Known classes ignore the override
        assert_eq!(
            LayoutSpec::for_paper_width_with_max(80, Some(42)).unwrap(),
            LayoutSpec::WIDE
        );
    }

    #[test]
    fn test_fallback_tiny_budget_keeps_minimums() {
        let spec = LayoutSpec::for_paper_width_with_max(60, Some(4)).unwrap();
        assert_eq!(spec.qty_width, 1);
        assert_eq!(spec.price_width, 1);
        assert_eq!(spec.name_width, 1);
    }

    #[test]
    fn test_columns_fit_budget() {
        for mm in [1, 30, 58, 59, 65, 72, 79, 80, 104] {
            let spec = LayoutSpec::for_paper_width(mm).unwrap();
            assert!(spec.qty_width + spec.name_width + spec.price_width + 2 <= spec.max_chars);
        }
    }

    #[test]
    fn test_non_positive_width_is_configuration_error() {
        assert!(matches!(
            LayoutSpec::for_paper_width(0),
            Err(PrintError::Configuration(_))
        ));
        assert!(matches!(
            LayoutSpec::for_paper_width(-80),
            Err(PrintError::Configuration(_))
        ));
    }

    #[test]
    fn test_format_row_truncates_label() {
        let spec = LayoutSpec::NARROW;
        let row = spec.format_row(dec("12"), "Extremely Long Department Name", dec("1234.5"));
        assert_eq!(row, " 12 Extremely Long Depar 1234.50");
        assert_eq!(row.chars().count(), 3 + 1 + 20 + 1 + 7);
    }

    #[test]
    fn test_format_row_wide() {
        let row = LayoutSpec::WIDE.format_row(dec("1.5"), "Cheddar", dec("-4.2"));
        assert_eq!(row.chars().count(), 48);
        assert!(row.starts_with(" 1.5 Cheddar"));
        assert!(row.ends_with("     -4.20"));
    }

    #[test]
    fn test_wide_quantity_printed_in_full() {
        let narrow = LayoutSpec::NARROW;
        let row = narrow.format_row(dec("1234"), "Beverages", dec("1234"));
        assert_eq!(row, format!("1234 Beverages{}1234.00", " ".repeat(11)));
        assert_eq!(row.chars().count(), narrow.max_chars);

        let row = narrow.format_row(dec("1.255"), "Bananas", dec("2.51"));
        assert!(row.starts_with("1.255 Bananas"));
        assert_eq!(row.chars().count(), narrow.max_chars);

        // 65mm: qty column 2, price column 5
        let mid = LayoutSpec::for_paper_width(65).unwrap();
        let row = mid.format_row(dec("150"), "Snacks", dec("150"));
        assert!(row.starts_with("150 Snacks"));
        assert!(row.ends_with(" 150.00"));
        assert_eq!(row.chars().count(), mid.max_chars);
    }

    #[test]
    fn test_wide_amount_shortens_label_not_line() {
        let spec = LayoutSpec::NARROW;
        let row = spec.format_row(dec("2"), "Beverages and soft drinks", dec("12345.67"));
        assert_eq!(row, "  2 Beverages and soft  12345.67");
        assert!(row.chars().count() <= spec.max_chars);
    }

    #[test]
    fn test_format_pair() {
        let spec = LayoutSpec::NARROW;
        assert_eq!(spec.format_pair("Net Total", "18.00"), format!("Net Total{}18.00", " ".repeat(18)));
        let long = spec.format_pair("A label that is far too long for the line", "18.00");
        assert_eq!(long.chars().count(), 32);
        assert!(long.ends_with(" 18.00"));
    }

    #[test]
    fn test_format_amount_rounding() {
        assert_eq!(format_amount(dec("18")), "18.00");
        assert_eq!(format_amount(dec("2.345")), "2.35");
        assert_eq!(format_amount(dec("-2.345")), "-2.35");
        assert_eq!(format_amount(dec("0.1")), "0.10");
    }

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(dec("2.000")), "2");
        assert_eq!(format_quantity(dec("1.50")), "1.5");
        assert_eq!(format_quantity(dec("-3")), "-3");
    }

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("Café au lait", 4), "Café");
        assert_eq!(truncate("Tea", 10), "Tea");
    }
}
