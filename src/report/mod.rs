//! # Sales Reports
//!
//! End-of-day reporting in three steps:
//!
//! 1. [`classify`]: put each sale line in exactly one [`Category`]
//! 2. [`aggregate`]: group, sum and order lines into [`ReportSection`]s,
//!    then reconcile the drawer and summarize
//! 3. [`render`]: write the sections through a printer driver
//!
//! ## Example
//!
//! ```
//! use rust_decimal::Decimal;
//! use tillroll::report::{self, model::{Department, ReportData, SaleItem}};
//!
//! let data = ReportData {
//!     departments: vec![Department::new(1, "Bakery")],
//!     sale_items: vec![SaleItem::product(1, "Bread", 1, Decimal::ONE, Decimal::new(120, 2))],
//!     ..Default::default()
//! };
//!
//! let report = report::build(&data);
//! assert_eq!(report.sections[0].header, "Net Sales");
//! assert_eq!(report.sections[0].total, Decimal::new(120, 2));
//! ```

pub mod aggregate;
pub mod classify;
pub mod model;
pub mod render;

pub use aggregate::{DrawerReconciliation, GroupRow, ReportSection, SalesReport, Summary, build};
pub use classify::{Category, classify};
pub use model::ReportData;
