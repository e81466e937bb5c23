//! Input snapshots for a sales report.
//!
//! Everything here is read-only to the report engine and usually arrives
//! from the back office as JSON.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// What a sale line represents on the till.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// A scanned or looked-up product
    #[default]
    Product,
    /// Open-priced "unscanned" item keyed against a department
    Misc,
    Service,
    Promotion,
    Discount,
    /// Cash taken out of the drawer through the sale screen
    Payout,
}

/// One line of a sale transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleItem {
    pub transaction_id: u64,
    pub product_name: String,
    pub department_id: u32,
    #[serde(default)]
    pub vat_id: Option<u32>,
    #[serde(default)]
    pub kind: ItemKind,
    #[serde(default)]
    pub is_refund: bool,
    pub quantity: Decimal,
    pub amount: Decimal,
}

impl SaleItem {
    /// A plain product sale.
    pub fn product(
        transaction_id: u64,
        product_name: impl Into<String>,
        department_id: u32,
        quantity: Decimal,
        amount: Decimal,
    ) -> Self {
        Self {
            transaction_id,
            product_name: product_name.into(),
            department_id,
            vat_id: None,
            kind: ItemKind::Product,
            is_refund: false,
            quantity,
            amount,
        }
    }

    pub fn with_kind(mut self, kind: ItemKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_vat(mut self, vat_id: u32) -> Self {
        self.vat_id = Some(vat_id);
        self
    }

    pub fn refund(mut self) -> Self {
        self.is_refund = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: u32,
    pub name: String,
    /// Print this department's sales in a section of its own
    #[serde(default)]
    pub separate_in_reports: bool,
}

impl Department {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            separate_in_reports: false,
        }
    }

    pub fn separate(mut self) -> Self {
        self.separate_in_reports = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VatRate {
    pub id: u32,
    /// Percentage, e.g. `20` for 20%
    pub rate: Decimal,
}

/// Cash paid out of the drawer (supplier, petty cash).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payout {
    pub description: String,
    pub amount: Decimal,
}

/// Stock booked in, written off or adjusted during the period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockTransaction {
    /// Movement type label, e.g. "Delivery" or "Wastage"
    pub kind: String,
    #[serde(default)]
    pub product_name: String,
    pub quantity: Decimal,
    pub amount: Decimal,
}

/// A line removed from a sale before it was tendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoidedProduct {
    pub department_id: u32,
    pub product_name: String,
    pub quantity: Decimal,
    pub amount: Decimal,
}

/// Tender totals for one completed transaction.
///
/// `change` is stored negative when change was given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: u64,
    pub total: Decimal,
    #[serde(default)]
    pub cash: Decimal,
    #[serde(default)]
    pub card: Decimal,
    #[serde(default)]
    pub change: Decimal,
}

/// Everything a sales report is built from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportData {
    pub report_date: Option<NaiveDate>,
    pub sale_items: Vec<SaleItem>,
    pub departments: Vec<Department>,
    pub vat_rates: Vec<VatRate>,
    pub payouts: Vec<Payout>,
    pub stock_transactions: Vec<StockTransaction>,
    pub voided_products: Vec<VoidedProduct>,
    pub transactions: Vec<Transaction>,
    /// Opening cash in the drawer
    pub float_amount: Decimal,
}

impl ReportData {
    /// Department lookup by id.
    pub fn department_index(&self) -> HashMap<u32, &Department> {
        self.departments.iter().map(|d| (d.id, d)).collect()
    }

    /// VAT percentage lookup by id.
    pub fn vat_index(&self) -> HashMap<u32, Decimal> {
        self.vat_rates.iter().map(|v| (v.id, v.rate)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_data_from_json() {
        let json = r#"{
            "sale_items": [
                {"transaction_id": 1, "product_name": "Cola", "department_id": 2,
                 "vat_id": 1, "quantity": "2", "amount": "3.00"},
                {"transaction_id": 1, "product_name": "Petty cash", "department_id": 9,
                 "kind": "payout", "quantity": "1", "amount": "-5.00"}
            ],
            "departments": [{"id": 2, "name": "Beverages"}],
            "vat_rates": [{"id": 1, "rate": "20"}],
            "transactions": [{"id": 1, "total": "3.00", "cash": "5.00", "change": "-2.00"}],
            "float_amount": "50.00"
        }"#;

        let data: ReportData = serde_json::from_str(json).unwrap();
        assert_eq!(data.sale_items.len(), 2);
        assert_eq!(data.sale_items[0].kind, ItemKind::Product);
        assert!(!data.sale_items[0].is_refund);
        assert_eq!(data.sale_items[1].kind, ItemKind::Payout);
        assert!(!data.departments[0].separate_in_reports);
        assert_eq!(data.transactions[0].card, Decimal::ZERO);
        assert_eq!(data.float_amount, Decimal::new(5000, 2));
        assert!(data.payouts.is_empty());
    }

    #[test]
    fn test_indexes() {
        let data = ReportData {
            departments: vec![Department::new(1, "Bakery"), Department::new(2, "Snacks")],
            vat_rates: vec![VatRate {
                id: 3,
                rate: Decimal::new(5, 0),
            }],
            ..Default::default()
        };
        assert_eq!(data.department_index()[&2].name, "Snacks");
        assert_eq!(data.vat_index()[&3], Decimal::new(5, 0));
    }
}
