//! # ESC/POS Protocol Implementation
//!
//! This module provides low-level command builders for the ESC/POS command
//! family understood by most thermal receipt printers.
//!
//! ## Module Structure
//!
//! - [`commands`]: Init, alignment, emphasis, page cut, drawer kick
//! - [`graphics`]: `GS v 0` raster bit images
//! - [`cp437`]: Text encoding for the printer's default code page
//!
//! ## Usage Example
//!
//! ```
//! use tillroll::protocol::{commands, cp437};
//!
//! let mut data = Vec::new();
//! data.extend(commands::init());
//! data.extend(commands::align(commands::Alignment::Center));
//! data.extend(cp437::encode("CORNER SHOP\n"));
//! data.extend(commands::page_cut());
//!
//! assert_eq!(&data[data.len() - 4..], &[0x1D, 0x56, 0x42, 0x03]);
//! ```

pub mod commands;
pub mod cp437;
pub mod graphics;
