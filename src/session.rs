//! # Print Session
//!
//! A [`PrintSession`] owns one printer's driver and transport and tracks
//! whether it has been configured.
//!
//! ## States
//!
//! ```text
//!                initialize(profile, site)
//! Uninitialized ──────────────────────────▶ Initialized(profile, site, layout)
//!                                                │        ▲
//!                                                └────────┘
//!                                       set_printer / refresh_layout
//! ```
//!
//! Every entry point checks the state first; calling one before
//! [`initialize`](PrintSession::initialize) fails with
//! [`PrintError::NotInitialized`].
//!
//! ## Documents and Batches
//!
//! Receipts and reports are single documents: the first error aborts the
//! job and nothing is sent. Labels and stock lists are batches: each item
//! gets an [`ItemOutcome`] and failures do not stop the rest.
//!
//! ## Concurrency
//!
//! All methods take `&mut self`. A physical printer is a serial resource,
//! so keep one session per printer and put it behind your own lock when
//! several workers share it.

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::batch::{BatchReport, ItemOutcome};
use crate::driver::PrinterDriver;
use crate::error::{PrintError, PrintResult};
use crate::label::{LabelRequest, compose};
use crate::layout::LayoutSpec;
use crate::lists::{self, ExpiringItem, ListDocument, StockLevel};
use crate::printer::{PrinterProfile, Site};
use crate::protocol::commands;
use crate::raster::RasterImage;
use crate::receipt::{Receipt, write_receipt};
use crate::report::model::{ReportData, SaleItem};
use crate::report::{SalesReport, aggregate, render};
use crate::transport::Transport;

/// Configuration of an initialized session.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivePrinter {
    pub profile: PrinterProfile,
    pub site: Site,
    pub layout: LayoutSpec,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    #[default]
    Uninitialized,
    Initialized(ActivePrinter),
}

/// A session bound to one printer.
pub struct PrintSession<D: PrinterDriver, T: Transport> {
    driver: D,
    transport: T,
    state: SessionState,
}

impl<D: PrinterDriver, T: Transport> PrintSession<D, T> {
    /// Create an uninitialized session.
    pub fn new(driver: D, transport: T) -> Self {
        Self {
            driver,
            transport,
            state: SessionState::Uninitialized,
        }
    }

    // ========================================================================
    // STATE
    // ========================================================================

    /// Configure the session for a printer and site.
    ///
    /// Both are required and the paper width must be positive. On error
    /// the session keeps its previous state.
    pub fn initialize(
        &mut self,
        profile: Option<PrinterProfile>,
        site: Option<Site>,
    ) -> PrintResult<()> {
        let profile = profile.ok_or_else(|| {
            PrintError::Configuration("no printer profile supplied".to_string())
        })?;
        let site =
            site.ok_or_else(|| PrintError::Configuration("no site supplied".to_string()))?;
        let layout = LayoutSpec::for_paper_width(profile.paper_width_mm)?;

        info!(
            printer = %profile.id,
            device = %profile.address,
            paper_width_mm = profile.paper_width_mm,
            max_chars = layout.max_chars,
            "print session initialized"
        );

        self.driver.set_line_width(layout.max_chars);
        self.state = SessionState::Initialized(ActivePrinter {
            profile,
            site,
            layout,
        });
        Ok(())
    }

    /// Switch an initialized session to another printer, keeping the site.
    pub fn set_printer(&mut self, profile: PrinterProfile) -> PrintResult<()> {
        let site = match &self.state {
            SessionState::Initialized(active) => active.site.clone(),
            SessionState::Uninitialized => {
                return Err(PrintError::Configuration(
                    "no site configured; initialize the session first".to_string(),
                ));
            }
        };
        self.initialize(Some(profile), Some(site))
    }

    /// Recompute the layout from the current profile.
    pub fn refresh_layout(&mut self) -> PrintResult<()> {
        let SessionState::Initialized(active) = &mut self.state else {
            return Err(PrintError::NotInitialized {
                operation: "refresh_layout",
            });
        };
        active.layout = LayoutSpec::for_paper_width(active.profile.paper_width_mm)?;
        self.driver.set_line_width(active.layout.max_chars);
        debug!(max_chars = active.layout.max_chars, "layout refreshed");
        Ok(())
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_initialized(&self) -> bool {
        matches!(self.state, SessionState::Initialized(_))
    }

    /// Current layout, if initialized.
    pub fn layout(&self) -> Option<&LayoutSpec> {
        match &self.state {
            SessionState::Initialized(active) => Some(&active.layout),
            SessionState::Uninitialized => None,
        }
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn into_parts(self) -> (D, T) {
        (self.driver, self.transport)
    }

    /// Fail unless initialized; otherwise reset the driver for a new document.
    pub fn ensure_initialized(&mut self, operation: &'static str) -> PrintResult<()> {
        prepare(&self.state, &mut self.driver, operation).map(|_| ())
    }

    // ========================================================================
    // DOCUMENTS
    // ========================================================================

    /// Print a customer receipt.
    pub fn print_receipt(&mut self, receipt: &Receipt) -> PrintResult<()> {
        self.print_text("print_receipt", |driver, active| {
            write_receipt(driver, receipt, &active.layout, &active.site)
        })
    }

    /// Aggregate and print a sales report, returning the aggregation.
    pub fn print_sales_report(&mut self, data: &ReportData) -> PrintResult<SalesReport> {
        let report = aggregate::build(data);
        self.print_text("print_sales_report", |driver, active| {
            render::write_report(driver, &report, &active.layout, &active.site);
            Ok(())
        })?;
        Ok(report)
    }

    /// Fire the cash drawer.
    pub fn open_drawer(&mut self) -> PrintResult<()> {
        const OPERATION: &str = "open_drawer";
        let active = prepare(&self.state, &mut self.driver, OPERATION)?;
        send(
            &mut self.transport,
            OPERATION,
            &active.profile.address,
            &commands::drawer_kick(),
        )
    }

    // ========================================================================
    // BATCHES
    // ========================================================================

    /// Print shelf-edge labels, one raster job per label.
    ///
    /// Only a missing initialization fails the call; every per-label
    /// failure is recorded in the report.
    pub fn print_labels(&mut self, labels: &[LabelRequest]) -> PrintResult<BatchReport> {
        const OPERATION: &str = "print_labels";
        let active = prepare(&self.state, &mut self.driver, OPERATION)?;
        let class = active.profile.label_class();
        let device = active.profile.address.as_str();

        let mut report = BatchReport::new();
        for label in labels {
            let result = compose(label, class)
                .and_then(|composed| RasterImage::from_rgb(&composed.canvas).into_command())
                .map_err(|e| label_failure(OPERATION, &label.name, e))
                .and_then(|mut bytes| {
                    bytes.extend(commands::page_cut());
                    send(&mut self.transport, OPERATION, device, &bytes)
                });

            if let Err(e) = &result {
                warn!(label = %label.name, error = %e, "label skipped");
            }
            report.push(ItemOutcome {
                key: label.name.clone(),
                result,
            });
        }

        let summary = report.summary();
        info!(printed = summary.printed, failed = summary.failed, "label batch done");
        Ok(report)
    }

    /// Products sold, for refilling shelves.
    pub fn print_refill_list(&mut self, items: &[SaleItem]) -> PrintResult<BatchReport> {
        self.print_list("print_refill_list", lists::refill_list(items), None)
    }

    /// Products below their minimum stock level.
    pub fn print_shortage_list(&mut self, levels: &[StockLevel]) -> PrintResult<BatchReport> {
        self.print_list("print_shortage_list", lists::shortage_list(levels), None)
    }

    /// Products expiring on or before `cutoff`.
    pub fn print_expiry_list(
        &mut self,
        items: &[ExpiringItem],
        cutoff: NaiveDate,
    ) -> PrintResult<BatchReport> {
        self.print_list(
            "print_expiry_list",
            lists::expiry_list(items, cutoff),
            Some(cutoff),
        )
    }

    fn print_list(
        &mut self,
        operation: &'static str,
        list: ListDocument,
        date: Option<NaiveDate>,
    ) -> PrintResult<BatchReport> {
        self.print_text(operation, |driver, active| {
            lists::write_list(driver, &list, &active.layout, &active.site, date);
            Ok(())
        })?;

        for (key, error) in list.outcomes.iter().filter_map(|o| {
            o.result.as_ref().err().map(|e| (o.key.as_str(), e))
        }) {
            warn!(operation, key, error = %error, "list item skipped");
        }

        Ok(BatchReport {
            outcomes: list.outcomes,
        })
    }

    /// ensure, compose, cut, send
    fn print_text<F>(&mut self, operation: &'static str, compose: F) -> PrintResult<()>
    where
        F: FnOnce(&mut D, &ActivePrinter) -> PrintResult<()>,
    {
        let active = prepare(&self.state, &mut self.driver, operation)?;

        if let Err(e) = compose(&mut self.driver, active) {
            self.driver.clear();
            return Err(e);
        }
        self.driver.full_cut();
        let bytes = self.driver.print_document();

        send(&mut self.transport, operation, &active.profile.address, &bytes)
    }
}

/// Check the state and reset the driver.
fn prepare<'a, D: PrinterDriver>(
    state: &'a SessionState,
    driver: &mut D,
    operation: &'static str,
) -> PrintResult<&'a ActivePrinter> {
    match state {
        SessionState::Uninitialized => Err(PrintError::NotInitialized { operation }),
        SessionState::Initialized(active) => {
            driver.clear();
            driver.initialize_print();
            Ok(active)
        }
    }
}

/// Report a composition failure against one label, without nesting an
/// existing item error inside another.
fn label_failure(operation: &'static str, key: &str, error: PrintError) -> PrintError {
    match error {
        PrintError::ItemRender { .. } => error,
        PrintError::Image(reason) => PrintError::item(operation, key, reason),
        other => PrintError::item(operation, key, other),
    }
}

fn send<T: Transport>(
    transport: &mut T,
    operation: &'static str,
    device: &str,
    data: &[u8],
) -> PrintResult<()> {
    let failure = |reason: String| PrintError::Transport {
        operation,
        device: device.to_string(),
        reason,
    };

    match transport.send_bytes(device, data) {
        Ok(true) => {
            info!(operation, device, bytes = data.len(), "sent to printer");
            Ok(())
        }
        Ok(false) => Err(failure("device reported failure".to_string())),
        Err(e) => Err(failure(e.to_string())),
    }
}
