//! # Customer Receipts
//!
//! One completed sale printed as a fixed-width text document:
//!
//! ```text
//!           Corner Shop
//!         1 High Street
//!        Tel: 01234 567890
//! --------------------------------
//! 17/10/2026                 14:05
//! Transaction #1042
//! --------------------------------
//!   2 Cola                    3.00
//!   1 Bread                   1.20
//! --------------------------------
//! TOTAL                       4.20
//! Cash                        5.00
//! Change                      0.80
//!         Thank you!
//! ```
//!
//! A receipt is all-or-nothing: a malformed line fails the whole document.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::driver::PrinterDriver;
use crate::error::{PrintError, PrintResult};
use crate::layout::{LayoutSpec, format_amount};
use crate::printer::Site;

const OPERATION: &str = "print_receipt";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptLine {
    pub quantity: Decimal,
    pub description: String,
    pub amount: Decimal,
}

impl ReceiptLine {
    pub fn new(quantity: Decimal, description: impl Into<String>, amount: Decimal) -> Self {
        Self {
            quantity,
            description: description.into(),
            amount,
        }
    }
}

/// A completed sale.
///
/// `change` follows the till convention of being negative when change
/// was handed back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    pub transaction_id: u64,
    pub timestamp: NaiveDateTime,
    pub lines: Vec<ReceiptLine>,
    #[serde(default)]
    pub cash: Decimal,
    #[serde(default)]
    pub card: Decimal,
    #[serde(default)]
    pub change: Decimal,
}

impl Receipt {
    /// Sum of the line amounts.
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(|l| l.amount).sum()
    }

    /// Reject receipts that would print a nameless line.
    pub fn validate(&self) -> PrintResult<()> {
        if let Some(index) = self
            .lines
            .iter()
            .position(|l| l.description.trim().is_empty())
        {
            return Err(PrintError::item(
                OPERATION,
                format!("transaction {} line {}", self.transaction_id, index + 1),
                "line has no description",
            ));
        }
        Ok(())
    }
}

// ============================================================================
// COMPOSITION
// ============================================================================

/// Write the receipt through the driver. Does not cut.
pub fn write_receipt<D: PrinterDriver>(
    driver: &mut D,
    receipt: &Receipt,
    layout: &LayoutSpec,
    site: &Site,
) -> PrintResult<()> {
    receipt.validate()?;

    write_site_header(driver, site);

    driver.separator();
    driver.append_line(&layout.format_pair(
        &receipt.timestamp.format("%d/%m/%Y").to_string(),
        &receipt.timestamp.format("%H:%M").to_string(),
    ));
    driver.append_line(&format!("Transaction #{}", receipt.transaction_id));
    driver.separator();

    for line in &receipt.lines {
        driver.append_line(&layout.format_row(line.quantity, &line.description, line.amount));
    }
    driver.separator();

    driver.bold(&layout.format_pair("TOTAL", &format_amount(receipt.total())));
    if !receipt.cash.is_zero() {
        driver.append_line(&layout.format_pair("Cash", &format_amount(receipt.cash)));
    }
    if !receipt.card.is_zero() {
        driver.append_line(&layout.format_pair("Card", &format_amount(receipt.card)));
    }
    if !receipt.change.is_zero() {
        // Stored negative, printed as the amount handed back
        driver.append_line(&layout.format_pair("Change", &format_amount(receipt.change.abs())));
    }

    if let Some(footer) = &site.footer {
        driver.new_line();
        driver.align_center();
        driver.append_line(footer);
        driver.align_left();
    }

    Ok(())
}

/// Centered shop name, address, phone and VAT number.
pub fn write_site_header<D: PrinterDriver>(driver: &mut D, site: &Site) {
    driver.align_center();
    driver.bold(&site.name);
    for line in &site.address_lines {
        driver.append_line(line);
    }
    if let Some(phone) = &site.phone {
        driver.append_line(&format!("Tel: {}", phone));
    }
    if let Some(vat) = &site.vat_number {
        driver.append_line(&format!("VAT No: {}", vat));
    }
    driver.align_left();
}
