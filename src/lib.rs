//! # Tillroll - Point-of-Sale Printing Library
//!
//! Tillroll composes receipts, sales reports, stock lists and shelf-edge
//! labels for ESC/POS thermal printers and encodes them to the exact bytes
//! the printer expects. It provides:
//!
//! - **Layout**: fixed-width columns derived from the paper width
//! - **Reports**: classification, grouping and drawer reconciliation
//! - **Labels**: price, name, barcode and date rasterized to 1-bit images
//! - **Protocol**: ESC/POS commands (raster image, page cut, drawer kick)
//! - **Sessions**: a per-printer state machine over a driver and a transport
//!
//! ## Quick Start
//!
//! ```
//! use tillroll::{
//!     driver::EscPosDriver,
//!     printer::{PrinterProfile, Site},
//!     session::PrintSession,
//!     transport::MemoryTransport,
//! };
//!
//! let mut session = PrintSession::new(EscPosDriver::new(), MemoryTransport::new());
//! session.initialize(
//!     Some(PrinterProfile::new("till-1", "Front till", "/dev/usb/lp0", 80)),
//!     Some(Site::new("Corner Shop")),
//! )?;
//!
//! session.open_drawer()?;
//! assert_eq!(session.transport().bytes(), vec![0x1B, 0x70, 0x00, 0x19, 0xFA]);
//!
//! # Ok::<(), tillroll::PrintError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`layout`] | Column widths and row formatting |
//! | [`report`] | Sales report aggregation |
//! | [`receipt`] | Customer receipts |
//! | [`lists`] | Refill, shortage and expiry lists |
//! | [`label`] | Shelf-edge label composition |
//! | [`barcode`] | Check digits, symbology selection, bar patterns |
//! | [`raster`] | Monochrome raster encoding |
//! | [`protocol`] | ESC/POS command builders |
//! | [`driver`] | Line-oriented driver trait and ESC/POS driver |
//! | [`transport`] | Communication backends |
//! | [`session`] | Print session state machine |
//! | [`printer`] | Printer profiles and station configuration |
//! | [`error`] | Error types |

pub mod barcode;
pub mod batch;
pub mod driver;
pub mod error;
pub mod label;
pub mod layout;
pub mod lists;
pub mod printer;
pub mod protocol;
pub mod raster;
pub mod receipt;
pub mod render;
pub mod report;
pub mod session;
pub mod transport;

// Re-exports for convenience
pub use batch::{BatchReport, ItemOutcome};
pub use error::{PrintError, PrintResult};
pub use layout::LayoutSpec;
pub use printer::{PrinterProfile, Site, StationConfig};
pub use session::PrintSession;
