//! # Stock Lists
//!
//! Short working documents for the shop floor:
//!
//! - **Refill**: what sold today, per product, so shelves can be refilled
//! - **Shortage**: products whose stock is below the minimum level
//! - **Expiry**: products expiring on or before a cutoff date
//!
//! Lists are best-effort. An item that cannot be printed (no name) is
//! recorded as failed and the rest of the list still prints.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::batch::ItemOutcome;
use crate::driver::PrinterDriver;
use crate::error::PrintError;
use crate::layout::{LayoutSpec, format_quantity};
use crate::printer::Site;
use crate::report::model::{ItemKind, SaleItem};

pub const REFILL_TITLE: &str = "REFILL LIST";
pub const SHORTAGE_TITLE: &str = "SHORTAGE LIST";
pub const EXPIRY_TITLE: &str = "EXPIRY LIST";

/// Current stock of one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockLevel {
    pub product_name: String,
    pub on_hand: Decimal,
    pub minimum: Decimal,
}

/// A batch of stock with a use-by date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpiringItem {
    pub product_name: String,
    pub expiry_date: NaiveDate,
    pub quantity: Decimal,
}

/// One printed list line.
#[derive(Debug, Clone, PartialEq)]
pub struct ListRow {
    pub quantity: Decimal,
    pub label: String,
    /// Right-hand column (e.g. the expiry date)
    pub detail: Option<String>,
}

/// A composed list with the outcome of every input item.
#[derive(Debug)]
pub struct ListDocument {
    pub title: &'static str,
    pub rows: Vec<ListRow>,
    pub outcomes: Vec<ItemOutcome>,
}

fn missing_name(operation: &'static str, index: usize) -> ItemOutcome {
    let key = format!("item {}", index + 1);
    ItemOutcome::failed(
        key.clone(),
        PrintError::item(operation, key, "product has no name"),
    )
}

/// Products sold, summed per product name. Refunds and non-product lines
/// are left out.
pub fn refill_list(items: &[SaleItem]) -> ListDocument {
    let mut outcomes = Vec::new();
    let mut sold: BTreeMap<&str, Decimal> = BTreeMap::new();

    for (index, item) in items.iter().enumerate() {
        if item.kind != ItemKind::Product || item.is_refund {
            continue;
        }
        if item.product_name.trim().is_empty() {
            outcomes.push(missing_name("print_refill_list", index));
            continue;
        }
        *sold.entry(item.product_name.as_str()).or_insert(Decimal::ZERO) += item.quantity;
    }

    let rows = sold
        .into_iter()
        .map(|(name, quantity)| {
            outcomes.push(ItemOutcome::ok(name));
            ListRow {
                quantity,
                label: name.to_string(),
                detail: None,
            }
        })
        .collect();

    ListDocument {
        title: REFILL_TITLE,
        rows,
        outcomes,
    }
}

/// Products below their minimum, with the quantity needed to reach it.
pub fn shortage_list(levels: &[StockLevel]) -> ListDocument {
    let mut outcomes = Vec::new();
    let mut rows = Vec::new();

    for (index, level) in levels.iter().enumerate() {
        if level.on_hand >= level.minimum {
            continue;
        }
        if level.product_name.trim().is_empty() {
            outcomes.push(missing_name("print_shortage_list", index));
            continue;
        }
        outcomes.push(ItemOutcome::ok(&level.product_name));
        rows.push(ListRow {
            quantity: level.minimum - level.on_hand,
            label: level.product_name.clone(),
            detail: None,
        });
    }

    rows.sort_by(|a, b| a.label.cmp(&b.label));

    ListDocument {
        title: SHORTAGE_TITLE,
        rows,
        outcomes,
    }
}

/// Items expiring on or before `cutoff`, soonest first, then by name.
pub fn expiry_list(items: &[ExpiringItem], cutoff: NaiveDate) -> ListDocument {
    let mut outcomes = Vec::new();
    let mut due: Vec<&ExpiringItem> = Vec::new();

    for (index, item) in items.iter().enumerate() {
        if item.expiry_date > cutoff {
            continue;
        }
        if item.product_name.trim().is_empty() {
            outcomes.push(missing_name("print_expiry_list", index));
            continue;
        }
        outcomes.push(ItemOutcome::ok(&item.product_name));
        due.push(item);
    }

    due.sort_by(|a, b| {
        a.expiry_date
            .cmp(&b.expiry_date)
            .then_with(|| a.product_name.cmp(&b.product_name))
    });

    let rows = due
        .into_iter()
        .map(|item| ListRow {
            quantity: item.quantity,
            label: item.product_name.clone(),
            detail: Some(item.expiry_date.format("%d %b").to_string()),
        })
        .collect();

    ListDocument {
        title: EXPIRY_TITLE,
        rows,
        outcomes,
    }
}

/// Write the list through the driver. Does not cut.
pub fn write_list<D: PrinterDriver>(
    driver: &mut D,
    list: &ListDocument,
    layout: &LayoutSpec,
    site: &Site,
    date: Option<NaiveDate>,
) {
    driver.align_center();
    driver.bold(list.title);
    driver.append_line(&site.name);
    if let Some(date) = date {
        driver.append_line(&date.format("%d/%m/%Y").to_string());
    }
    driver.align_left();
    driver.separator();

    for row in &list.rows {
        let detail = row.detail.as_deref().unwrap_or("");
        driver.append_line(
            layout
                .format_columns(&format_quantity(row.quantity), &row.label, detail)
                .trim_end(),
        );
    }
    if list.rows.is_empty() {
        driver.append_line("Nothing to list");
    }
}
