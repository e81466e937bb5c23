//! # Report Aggregation
//!
//! Turns a [`ReportData`] snapshot into ordered report sections.
//!
//! ## Section Order
//!
//! ```text
//! Net Sales            always
//! <separate depts>     one per flagged department, rows by product
//! Misc (Unscanned)     by department
//! Services             by department
//! Promotions           by department
//! Discounts            by department
//! Refunds              by department, then product
//! Payouts              by description
//! Stock Movements      by movement type
//! Voids                by department
//! VAT                  by rate
//! Tenders              always
//! ```
//!
//! followed by the drawer reconciliation and the summary block. Rows are
//! ordered by label (byte order). All sums are exact; rounding to two
//! places happens only when a line is printed.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, warn};

use super::classify::{Category, classify};
use super::model::{Department, ReportData};

/// Label used for department references that match no department.
pub const UNKNOWN_DEPARTMENT: &str = "Unknown";

pub const NET_SALES: &str = "Net Sales";
pub const MISC: &str = "Misc (Unscanned)";
pub const SERVICES: &str = "Services";
pub const PROMOTIONS: &str = "Promotions";
pub const DISCOUNTS: &str = "Discounts";
pub const REFUNDS: &str = "Refunds";
pub const PAYOUTS: &str = "Payouts";
pub const STOCK_MOVEMENTS: &str = "Stock Movements";
pub const VOIDS: &str = "Voids";
pub const VAT: &str = "VAT";
pub const TENDERS: &str = "Tenders";

/// One printed row: quantity, label, amount.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupRow {
    pub quantity: Decimal,
    pub label: String,
    pub total: Decimal,
}

/// A titled block of rows with its total.
///
/// `total` is always the exact sum of the row totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSection {
    pub header: String,
    pub rows: Vec<GroupRow>,
    pub total: Decimal,
}

impl ReportSection {
    pub fn new(header: impl Into<String>, rows: Vec<GroupRow>) -> Self {
        let total = rows.iter().map(|r| r.total).sum();
        Self {
            header: header.into(),
            rows,
            total,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Cash expected in the drawer at close.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawerReconciliation {
    pub float_amount: Decimal,
    pub cash_total: Decimal,
    pub payout_total: Decimal,
    /// Negative when refunds were given
    pub refund_total: Decimal,
    pub drawer_cash: Decimal,
}

impl DrawerReconciliation {
    pub fn new(
        cash_total: Decimal,
        payout_total: Decimal,
        refund_total: Decimal,
        float_amount: Decimal,
    ) -> Self {
        Self {
            float_amount,
            cash_total,
            payout_total,
            refund_total,
            drawer_cash: cash_total + payout_total + refund_total + float_amount,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub customer_count: usize,
    pub total_sales: Decimal,
    pub payout_total: Decimal,
    pub average_spend: Decimal,
}

impl Summary {
    pub fn new(customer_count: usize, total_sales: Decimal, payout_total: Decimal) -> Self {
        let average_spend = if customer_count == 0 {
            Decimal::ZERO
        } else {
            (total_sales + payout_total) / Decimal::from(customer_count)
        };
        Self {
            customer_count,
            total_sales,
            payout_total,
            average_spend,
        }
    }
}

/// A fully aggregated sales report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesReport {
    pub report_date: Option<NaiveDate>,
    pub sections: Vec<ReportSection>,
    pub drawer: DrawerReconciliation,
    pub summary: Summary,
}

impl SalesReport {
    /// Find a section by its header.
    pub fn section(&self, header: &str) -> Option<&ReportSection> {
        self.sections.iter().find(|s| s.header == header)
    }
}

/// Quantity and amount accumulated per group key.
///
/// The `BTreeMap` keeps groups in key order, which is the print order.
struct Groups<K: Ord> {
    groups: BTreeMap<K, (Decimal, Decimal)>,
}

impl<K: Ord> Groups<K> {
    fn new() -> Self {
        Self {
            groups: BTreeMap::new(),
        }
    }

    fn add(&mut self, key: K, quantity: Decimal, amount: Decimal) {
        let entry = self
            .groups
            .entry(key)
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        entry.0 += quantity;
        entry.1 += amount;
    }

    fn into_section(self, header: &str, label: impl Fn(&K) -> String) -> ReportSection {
        let rows = self
            .groups
            .iter()
            .map(|(key, &(quantity, total))| GroupRow {
                quantity,
                label: label(key),
                total,
            })
            .collect();
        ReportSection::new(header, rows)
    }
}

fn department_name<'a>(departments: &HashMap<u32, &'a Department>, id: u32) -> &'a str {
    departments
        .get(&id)
        .map(|d| d.name.as_str())
        .unwrap_or(UNKNOWN_DEPARTMENT)
}

/// Aggregate a report snapshot.
pub fn build(data: &ReportData) -> SalesReport {
    let departments = data.department_index();
    let vat_rates = data.vat_index();

    let mut net = Groups::new();
    let mut separate: BTreeMap<(String, u32), Groups<String>> = BTreeMap::new();
    let mut misc = Groups::new();
    let mut services = Groups::new();
    let mut promotions = Groups::new();
    let mut discounts = Groups::new();
    let mut refunds: Groups<(String, String)> = Groups::new();
    let mut vat: Groups<Decimal> = Groups::new();

    let mut total_sales = Decimal::ZERO;
    let mut refund_total = Decimal::ZERO;

    for item in &data.sale_items {
        let category = classify(item, &departments);
        if category != Category::Payout {
            total_sales += item.amount;
        }

        let dept = department_name(&departments, item.department_id).to_string();
        let (qty, amount) = (item.quantity, item.amount);

        match category {
            // Payouts are reported from the payout ledger
            Category::Payout => {}
            Category::Refund => {
                refund_total += amount;
                refunds.add((dept, item.product_name.clone()), qty, amount);
            }
            Category::Misc => misc.add(dept, qty, amount),
            Category::Service => services.add(dept, qty, amount),
            Category::Promotion => promotions.add(dept, qty, amount),
            Category::Discount => discounts.add(dept, qty, amount),
            Category::Separate(id) => separate
                .entry((dept, id))
                .or_insert_with(Groups::new)
                .add(item.product_name.clone(), qty, amount),
            Category::Net => {
                net.add(dept, qty, amount);
                match item.vat_id.map(|id| (id, vat_rates.get(&id))) {
                    Some((_, Some(&rate))) => {
                        vat.add(rate, qty, amount * rate / Decimal::ONE_HUNDRED);
                    }
                    Some((id, None)) => {
                        warn!(vat_id = id, product = %item.product_name, "unknown VAT rate, line left out of VAT");
                    }
                    None => {}
                }
            }
        }
    }

    let mut payouts = Groups::new();
    let mut payout_total = Decimal::ZERO;
    for payout in &data.payouts {
        payout_total += payout.amount;
        payouts.add(payout.description.clone(), Decimal::ONE, payout.amount);
    }

    let mut stock = Groups::new();
    for movement in &data.stock_transactions {
        stock.add(movement.kind.clone(), movement.quantity, movement.amount);
    }

    let mut voids = Groups::new();
    for void in &data.voided_products {
        let dept = department_name(&departments, void.department_id).to_string();
        voids.add(dept, void.quantity, void.amount);
    }

    let tenders = tender_section(data);
    let cash_total = tenders
        .rows
        .first()
        .map(|r| r.total)
        .unwrap_or(Decimal::ZERO);

    let by_label = |k: &String| k.clone();
    let mut sections = vec![net.into_section(NET_SALES, by_label)];
    for ((dept, _), groups) in separate {
        sections.push(groups.into_section(&dept, by_label));
    }

    let optional = [
        misc.into_section(MISC, by_label),
        services.into_section(SERVICES, by_label),
        promotions.into_section(PROMOTIONS, by_label),
        discounts.into_section(DISCOUNTS, by_label),
        refunds.into_section(REFUNDS, |(dept, product)| format!("{}/{}", dept, product)),
        payouts.into_section(PAYOUTS, by_label),
        stock.into_section(STOCK_MOVEMENTS, by_label),
        voids.into_section(VOIDS, by_label),
        vat.into_section(VAT, |rate| format!("{}%", rate.normalize())),
    ];
    sections.extend(optional.into_iter().filter(|s| !s.is_empty()));
    sections.push(tenders);

    let report = SalesReport {
        report_date: data.report_date,
        sections,
        drawer: DrawerReconciliation::new(cash_total, payout_total, refund_total, data.float_amount),
        summary: Summary::new(data.transactions.len(), total_sales, payout_total),
    };

    debug!(
        sections = report.sections.len(),
        customers = report.summary.customer_count,
        "sales report aggregated"
    );

    report
}

/// Cash, card and change rows; quantity is the number of transactions.
fn tender_section(data: &ReportData) -> ReportSection {
    let mut cash = (Decimal::ZERO, Decimal::ZERO);
    let mut card = (Decimal::ZERO, Decimal::ZERO);
    let mut change = (Decimal::ZERO, Decimal::ZERO);

    for t in &data.transactions {
        if t.cash > Decimal::ZERO {
            cash.0 += Decimal::ONE;
            cash.1 += t.cash;
        }
        if t.card > Decimal::ZERO {
            card.0 += Decimal::ONE;
            card.1 += t.card;
        }
        if t.change < Decimal::ZERO {
            change.0 += Decimal::ONE;
            change.1 += t.change;
        }
    }

    let rows = [("Cash", cash), ("Card", card), ("Change", change)]
        .into_iter()
        .map(|(label, (quantity, total))| GroupRow {
            quantity,
            label: label.to_string(),
            total,
        })
        .collect();
    ReportSection::new(TENDERS, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::model::{
        ItemKind, Payout, SaleItem, StockTransaction, Transaction, VatRate, VoidedProduct,
    };
    use pretty_assertions::assert_eq;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn sale(dept: u32, name: &str, qty: &str, amount: &str) -> SaleItem {
        SaleItem::product(1, name, dept, dec(qty), dec(amount))
    }

    fn departments() -> Vec<Department> {
        vec![
            Department::new(1, "Beverages"),
            Department::new(2, "Snacks"),
            Department::new(3, "Bakery"),
            Department::new(4, "Lottery").separate(),
        ]
    }

    fn transaction(id: u64, cash: &str, card: &str, change: &str) -> Transaction {
        Transaction {
            id,
            total: dec(cash) + dec(card) + dec(change),
            cash: dec(cash),
            card: dec(card),
            change: dec(change),
        }
    }

    #[test]
    fn test_net_sales_alphabetical_with_total() {
        let data = ReportData {
            departments: departments(),
            sale_items: vec![
                sale(1, "Cola", "4", "10.00"),
                sale(2, "Crisps", "5", "5.00"),
                sale(3, "Bread", "2", "3.00"),
            ],
            ..Default::default()
        };

        let report = build(&data);
        let net = report.section(NET_SALES).unwrap();
        let labels: Vec<&str> = net.rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["Bakery", "Beverages", "Snacks"]);
        assert_eq!(net.total, dec("18.00"));
    }

    #[test]
    fn test_rows_grouped_and_summed() {
        let data = ReportData {
            departments: departments(),
            sale_items: vec![
                sale(1, "Cola", "1", "1.50"),
                sale(1, "Water", "2", "2.00"),
                sale(1, "Cola", "1", "1.50"),
            ],
            ..Default::default()
        };

        let net = build(&data).section(NET_SALES).unwrap().clone();
        assert_eq!(
            net.rows,
            vec![GroupRow {
                quantity: dec("4"),
                label: "Beverages".to_string(),
                total: dec("5.00"),
            }]
        );
    }

    #[test]
    fn test_empty_report_keeps_net_sales_and_tenders() {
        let report = build(&ReportData::default());
        let headers: Vec<&str> = report.sections.iter().map(|s| s.header.as_str()).collect();
        assert_eq!(headers, vec![NET_SALES, TENDERS]);
        assert_eq!(report.section(NET_SALES).unwrap().total, Decimal::ZERO);
        assert_eq!(report.section(TENDERS).unwrap().rows.len(), 3);
        assert_eq!(report.summary.average_spend, Decimal::ZERO);
    }

    #[test]
    fn test_section_order_and_classification() {
        let data = ReportData {
            departments: departments(),
            sale_items: vec![
                sale(4, "Scratchcard", "1", "2.00"),
                sale(1, "Open price", "1", "0.99").with_kind(ItemKind::Misc),
                sale(2, "Delivery", "1", "3.00").with_kind(ItemKind::Service),
                sale(2, "Meal deal", "1", "-0.50").with_kind(ItemKind::Promotion),
                sale(2, "Staff", "1", "-0.20").with_kind(ItemKind::Discount),
                sale(3, "Bread", "-1", "-1.20").refund(),
                sale(1, "Cola", "1", "1.00"),
            ],
            payouts: vec![Payout {
                description: "Milkman".to_string(),
                amount: dec("-12.00"),
            }],
            stock_transactions: vec![StockTransaction {
                kind: "Delivery".to_string(),
                product_name: "Cola".to_string(),
                quantity: dec("24"),
                amount: dec("12.00"),
            }],
            voided_products: vec![VoidedProduct {
                department_id: 2,
                product_name: "Crisps".to_string(),
                quantity: dec("1"),
                amount: dec("0.80"),
            }],
            ..Default::default()
        };

        let report = build(&data);
        let headers: Vec<&str> = report.sections.iter().map(|s| s.header.as_str()).collect();
        assert_eq!(
            headers,
            vec![
                NET_SALES,
                "Lottery",
                MISC,
                SERVICES,
                PROMOTIONS,
                DISCOUNTS,
                REFUNDS,
                PAYOUTS,
                STOCK_MOVEMENTS,
                VOIDS,
                TENDERS
            ]
        );

        assert_eq!(report.section("Lottery").unwrap().rows[0].label, "Scratchcard");
        assert_eq!(report.section(REFUNDS).unwrap().rows[0].label, "Bakery/Bread");
        assert_eq!(report.section(NET_SALES).unwrap().total, dec("1.00"));
        assert_eq!(report.drawer.refund_total, dec("-1.20"));
        assert_eq!(report.drawer.payout_total, dec("-12.00"));
    }

    #[test]
    fn test_same_named_separate_departments_stay_apart() {
        let data = ReportData {
            departments: vec![
                Department::new(5, "Lottery").separate(),
                Department::new(6, "Lottery").separate(),
            ],
            sale_items: vec![
                sale(5, "Scratchcard", "1", "2.00"),
                sale(6, "Draw ticket", "3", "6.00"),
            ],
            ..Default::default()
        };

        let report = build(&data);
        let lottery: Vec<&ReportSection> = report
            .sections
            .iter()
            .filter(|s| s.header == "Lottery")
            .collect();
        assert_eq!(lottery.len(), 2);
        assert_eq!(lottery[0].rows[0].label, "Scratchcard");
        assert_eq!(lottery[0].total, dec("2.00"));
        assert_eq!(lottery[1].rows[0].label, "Draw ticket");
        assert_eq!(lottery[1].total, dec("6.00"));
    }

    #[test]
    fn test_payout_sale_items_excluded_from_sales() {
        let data = ReportData {
            departments: departments(),
            sale_items: vec![
                sale(1, "Cola", "1", "1.00"),
                sale(1, "Till payout", "1", "-5.00").with_kind(ItemKind::Payout),
            ],
            transactions: vec![transaction(1, "1.00", "0", "0")],
            ..Default::default()
        };

        let report = build(&data);
        assert_eq!(report.sections.len(), 2);
        assert_eq!(report.summary.total_sales, dec("1.00"));
    }

    #[test]
    fn test_refunds_ordered_by_department_then_product() {
        let data = ReportData {
            departments: departments(),
            sale_items: vec![
                sale(2, "Apple crisps", "-1", "-1.00").refund(),
                sale(3, "Rolls", "-1", "-2.00").refund(),
                sale(3, "Bread", "-1", "-1.20").refund(),
            ],
            ..Default::default()
        };

        let refunds = build(&data).section(REFUNDS).unwrap().clone();
        let labels: Vec<&str> = refunds.rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["Bakery/Bread", "Bakery/Rolls", "Snacks/Apple crisps"]);
        assert_eq!(refunds.total, dec("-4.20"));
    }

    #[test]
    fn test_vat_grouped_by_rate_unrounded() {
        let data = ReportData {
            departments: departments(),
            vat_rates: vec![
                VatRate { id: 1, rate: dec("20") },
                VatRate { id: 2, rate: dec("5") },
                VatRate { id: 3, rate: dec("20.0") },
            ],
            sale_items: vec![
                sale(1, "Cola", "1", "1.99").with_vat(1),
                sale(1, "Juice", "1", "2.49").with_vat(3),
                sale(3, "Bread", "1", "1.10").with_vat(2),
                sale(3, "Cake", "1", "4.00"),
                sale(3, "Pie", "1", "3.00").with_vat(42),
            ],
            ..Default::default()
        };

        let vat = build(&data).section(VAT).unwrap().clone();
        assert_eq!(vat.rows.len(), 2);
        assert_eq!(vat.rows[0].label, "5%");
        assert_eq!(vat.rows[0].total, dec("0.055"));
        assert_eq!(vat.rows[1].label, "20%");
        // 1.99 × 0.2 + 2.49 × 0.2, kept exact
        assert_eq!(vat.rows[1].total, dec("0.896"));
        assert_eq!(vat.total, dec("0.951"));
    }

    #[test]
    fn test_tenders_preserve_change_sign() {
        let data = ReportData {
            transactions: vec![
                transaction(1, "20.00", "0", "-4.50"),
                transaction(2, "0", "12.00", "0"),
                transaction(3, "5.00", "0", "0"),
            ],
            ..Default::default()
        };

        let tenders = build(&data).section(TENDERS).unwrap().clone();
        assert_eq!(
            tenders.rows,
            vec![
                GroupRow { quantity: dec("2"), label: "Cash".into(), total: dec("25.00") },
                GroupRow { quantity: dec("1"), label: "Card".into(), total: dec("12.00") },
                GroupRow { quantity: dec("1"), label: "Change".into(), total: dec("-4.50") },
            ]
        );
        assert_eq!(tenders.total, dec("32.50"));
    }

    #[test]
    fn test_drawer_reconciliation() {
        let drawer = DrawerReconciliation::new(dec("100"), dec("20"), dec("-15"), dec("50"));
        assert_eq!(drawer.drawer_cash, dec("155"));
    }

    #[test]
    fn test_drawer_from_report_data() {
        let data = ReportData {
            departments: departments(),
            sale_items: vec![sale(3, "Bread", "-1", "-15").refund()],
            payouts: vec![Payout {
                description: "Window cleaner".to_string(),
                amount: dec("20"),
            }],
            transactions: vec![transaction(1, "100", "0", "0")],
            float_amount: dec("50"),
            ..Default::default()
        };

        assert_eq!(build(&data).drawer.drawer_cash, dec("155"));
    }

    #[test]
    fn test_summary_average_spend() {
        let summary = Summary::new(4, dec("100.00"), dec("-20.00"));
        assert_eq!(summary.average_spend, dec("20"));
        assert_eq!(Summary::new(0, dec("10"), dec("0")).average_spend, Decimal::ZERO);
    }

    #[test]
    fn test_unknown_department_label() {
        let data = ReportData {
            sale_items: vec![sale(77, "Mystery", "1", "1.00")],
            ..Default::default()
        };
        let net = build(&data).section(NET_SALES).unwrap().clone();
        assert_eq!(net.rows[0].label, UNKNOWN_DEPARTMENT);
    }

    #[test]
    fn test_section_totals_equal_row_sums() {
        let data = ReportData {
            departments: departments(),
            sale_items: vec![
                sale(1, "Cola", "3", "0.333"),
                sale(2, "Crisps", "3", "0.333"),
                sale(3, "Bread", "3", "0.334"),
            ],
            ..Default::default()
        };
        for section in build(&data).sections {
            let sum: Decimal = section.rows.iter().map(|r| r.total).sum();
            assert_eq!(section.total, sum);
        }
    }
}
