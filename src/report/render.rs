//! Writing an aggregated report through a [`PrinterDriver`].
//!
//! ```text
//!          Corner Shop
//!         SALES REPORT
//!          17/10/2026
//! --------------------------------
//! Net Sales
//!   2 Bakery                  3.00
//!   4 Beverages              10.00
//! Total                      13.00
//! --------------------------------
//! ```

use crate::driver::PrinterDriver;
use crate::layout::{LayoutSpec, format_amount};
use crate::printer::Site;

use super::aggregate::{DrawerReconciliation, ReportSection, SalesReport, Summary};

pub const TITLE: &str = "SALES REPORT";

/// Write the whole report, header to summary. Does not cut.
pub fn write_report<D: PrinterDriver>(
    driver: &mut D,
    report: &SalesReport,
    layout: &LayoutSpec,
    site: &Site,
) {
    driver.align_center();
    driver.bold(&site.name);
    driver.append_line(TITLE);
    if let Some(date) = report.report_date {
        driver.append_line(&date.format("%d/%m/%Y").to_string());
    }
    driver.align_left();
    driver.separator();

    for section in &report.sections {
        write_section(driver, section, layout);
    }

    write_drawer(driver, &report.drawer, layout);
    write_summary(driver, &report.summary, layout);
}

pub fn write_section<D: PrinterDriver>(driver: &mut D, section: &ReportSection, layout: &LayoutSpec) {
    driver.bold(&section.header);
    for row in &section.rows {
        driver.append_line(&layout.format_row(row.quantity, &row.label, row.total));
    }
    driver.append_line(&layout.format_pair("Total", &format_amount(section.total)));
    driver.separator();
}

fn write_drawer<D: PrinterDriver>(driver: &mut D, drawer: &DrawerReconciliation, layout: &LayoutSpec) {
    driver.bold("Drawer");
    for (label, amount) in [
        ("Float", drawer.float_amount),
        ("Cash", drawer.cash_total),
        ("Payouts", drawer.payout_total),
        ("Refunds", drawer.refund_total),
    ] {
        driver.append_line(&layout.format_pair(label, &format_amount(amount)));
    }
    driver.append_line(&layout.format_pair("Drawer Cash", &format_amount(drawer.drawer_cash)));
    driver.separator();
}

fn write_summary<D: PrinterDriver>(driver: &mut D, summary: &Summary, layout: &LayoutSpec) {
    driver.bold("Summary");
    driver.append_line(&layout.format_pair("Customers", &summary.customer_count.to_string()));
    driver.append_line(&layout.format_pair("Total Sales", &format_amount(summary.total_sales)));
    driver.append_line(&layout.format_pair("Average Spend", &format_amount(summary.average_spend)));
}
