//! # Barcodes
//!
//! - [`checksum`]: EAN-13 / EAN-8 check digits
//! - [`symbology`]: Picks EAN-13, EAN-8 or Code-128 from the input
//! - [`render`]: Module patterns and drawing into a label canvas

pub mod checksum;
pub mod render;
pub mod symbology;

pub use render::BarcodeError;
pub use symbology::Symbology;
