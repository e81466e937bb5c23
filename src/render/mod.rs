//! # Canvas Rendering
//!
//! Drawing helpers for label canvases.

pub mod font;
