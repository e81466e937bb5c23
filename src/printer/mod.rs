//! # Printer Module
//!
//! This module provides printer profiles and station configuration.
//!
//! ## Modules
//!
//! - [`config`]: Printer profiles, site descriptor, label classes

pub mod config;

pub use config::{LabelClass, PrinterProfile, Site, StationConfig};
