//! # Printer Configuration
//!
//! This module defines the printer profiles, the site descriptor printed in
//! document headers, and the hardware classes used for label rasters.
//!
//! ## Paper Classes
//!
//! | Class  | Paper width | Print width (dots) | Resolution |
//! |--------|-------------|--------------------|------------|
//! | Narrow | 58mm        | 384                | 203 DPI    |
//! | Wide   | 80mm        | 576                | 203 DPI    |
//!
//! ## Usage
//!
//! ```
//! use tillroll::printer::{LabelClass, PrinterProfile};
//!
//! let profile = PrinterProfile::new("till-1", "Front till", "/dev/usb/lp0", 80);
//! assert_eq!(LabelClass::for_paper_width(profile.paper_width_mm), LabelClass::Wide);
//! assert_eq!(LabelClass::Wide.width_dots(), 576);
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PrintError, PrintResult};

/// A configured receipt printer.
///
/// Owned by the station configuration and read-only to the rest of the
/// crate. `address` is the device name handed to the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrinterProfile {
    /// Stable identifier (e.g. "till-1")
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Transport address (device path or spooler queue name)
    pub address: String,
    /// Physical paper width in millimeters
    pub paper_width_mm: i32,
    /// Whether the printer may be used at all
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Whether this is the station's default printer
    #[serde(default)]
    pub is_primary: bool,
}

fn default_true() -> bool {
    true
}

impl PrinterProfile {
    /// Create an active, non-primary profile.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        address: impl Into<String>,
        paper_width_mm: i32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            address: address.into(),
            paper_width_mm,
            is_active: true,
            is_primary: false,
        }
    }

    /// Mark the profile as the station's primary printer.
    pub fn primary(mut self) -> Self {
        self.is_primary = true;
        self
    }

    /// Label raster class matching this printer's paper.
    pub fn label_class(&self) -> LabelClass {
        LabelClass::for_paper_width(self.paper_width_mm)
    }
}

/// The shop printed at the top of receipts and reports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    pub name: String,
    #[serde(default)]
    pub address_lines: Vec<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub vat_number: Option<String>,
    /// Closing line on customer receipts
    #[serde(default)]
    pub footer: Option<String>,
}

impl Site {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// # Label Raster Class
///
/// Shelf-edge labels are rendered as raster images whose pixel width
/// depends on the print head. Only two classes are supported.
///
/// ## Label Geometry
///
/// ```text
/// ├──────────────── width_dots ─────────────────┤
/// ┌─────────────────────────────────────────────┐ ─┬─
/// │                 £1.99 (price)               │  price_band
/// ├─────────────────────────┬───────────────────┤ ─┼─
/// │ Product name            │ ▌▌▐▌▐▐▌▌▐▌ barcode│  barcode_box
/// │ wraps here              │       5012345678900│
/// │                         │          17/10/2026│
/// └─────────────────────────┴───────────────────┘ ─┴─
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelClass {
    /// 58mm printers (384 dots)
    Narrow,
    /// 80mm printers (576 dots)
    Wide,
}

impl LabelClass {
    /// Pick the class for a paper width: 58mm and below is narrow.
    pub fn for_paper_width(paper_width_mm: i32) -> Self {
        if paper_width_mm <= 58 {
            Self::Narrow
        } else {
            Self::Wide
        }
    }

    /// Print width in dots
    #[inline]
    pub fn width_dots(self) -> u32 {
        match self {
            Self::Narrow => 384,
            Self::Wide => 576,
        }
    }

    /// Total label height in dots
    #[inline]
    pub fn height_dots(self) -> u32 {
        match self {
            Self::Narrow => 200,
            Self::Wide => 240,
        }
    }

    /// Height of the price band at the top of the label
    #[inline]
    pub fn price_band(self) -> u32 {
        match self {
            Self::Narrow => 56,
            Self::Wide => 64,
        }
    }

    /// Integer glyph scale used for the price
    #[inline]
    pub fn price_scale(self) -> u32 {
        2
    }

    /// Size (width, height) of the barcode box reserved on the right
    #[inline]
    pub fn barcode_box(self) -> (u32, u32) {
        match self {
            Self::Narrow => (200, 80),
            Self::Wide => (256, 96),
        }
    }

    /// Horizontal margin around the label content
    #[inline]
    pub fn margin(self) -> u32 {
        8
    }
}

/// # Station Configuration
///
/// Loaded from a JSON file by the CLI:
///
/// ```json
/// {
///   "site": { "name": "Corner Shop", "address_lines": ["1 High St"] },
///   "printers": [
///     { "id": "till-1", "name": "Till", "address": "/dev/usb/lp0",
///       "paper_width_mm": 80, "is_primary": true }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationConfig {
    pub site: Site,
    #[serde(default)]
    pub printers: Vec<PrinterProfile>,
}

impl StationConfig {
    /// Load a station configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> PrintResult<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| {
            PrintError::Configuration(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&raw)
    }

    /// Parse a station configuration from JSON text.
    pub fn from_json(raw: &str) -> PrintResult<Self> {
        serde_json::from_str(raw)
            .map_err(|e| PrintError::Configuration(format!("Invalid station config: {}", e)))
    }

    /// The active primary printer, falling back to the first active one.
    pub fn primary_printer(&self) -> Option<&PrinterProfile> {
        let mut active = self.printers.iter().filter(|p| p.is_active);
        self.printers
            .iter()
            .find(|p| p.is_active && p.is_primary)
            .or_else(|| active.next())
    }

    /// Look up an active printer by id.
    pub fn printer(&self, id: &str) -> Option<&PrinterProfile> {
        self.printers.iter().find(|p| p.is_active && p.id == id)
    }
}
