//! # ESC/POS Protocol Commands
//!
//! This module implements the handful of ESC/POS commands the composer
//! needs: initialization, alignment, emphasis, paper cut and the cash
//! drawer pulse.
//!
//! ## Escape Sequence Structure
//!
//! Commands follow these patterns:
//! - Single byte: `LF`
//! - Two bytes: `ESC @`
//! - Multi-byte with parameters: `ESC a n`, `ESC p m t1 t2`, `GS V m n`
//!
//! ## Byte Order
//!
//! Multi-byte integers use **little-endian** encoding:
//! - `u16` value 0x1234 is sent as bytes `[0x34, 0x12]`

// ============================================================================
// ESCAPE SEQUENCE CONSTANTS
// ============================================================================

/// ESC (Escape) - Command prefix byte
pub const ESC: u8 = 0x1B;

/// GS (Group Separator) - Extended command prefix
///
/// Used for graphics, character size and the cutter.
/// - Hex: 0x1D, Decimal: 29
pub const GS: u8 = 0x1D;

/// LF (Line Feed) - Print and advance one line
pub const LF: u8 = 0x0A;

/// # Drawer Kick (ESC p 0 25 250)
///
/// Pulses drawer connector pin 2 for 25×2ms on, 250×2ms off. This exact
/// sequence is what the till's cash drawers are wired for.
///
/// | Format  | Bytes          |
/// |---------|----------------|
/// | ASCII   | ESC p NUL EM ú |
/// | Hex     | 1B 70 00 19 FA |
pub const DRAWER_KICK: [u8; 5] = [ESC, b'p', 0x00, 0x19, 0xFA];

/// # Page Cut (GS V 66 3)
///
/// Feeds 3 lines past the cutter then performs a full cut, letting the
/// printer account for the head-to-cutter distance.
///
/// | Format  | Bytes       |
/// |---------|-------------|
/// | ASCII   | GS V B ETX  |
/// | Hex     | 1D 56 42 03 |
pub const PAGE_CUT: [u8; 4] = [GS, b'V', 0x42, 0x03];

// ============================================================================
// INITIALIZATION COMMANDS
// ============================================================================

/// # Initialize Printer (ESC @)
///
/// Resets the printer to its power-on default state: print buffer
/// cleared, emphasis off, alignment left.
///
/// ## Example
///
/// ```
/// use tillroll::protocol::commands;
///
/// assert_eq!(commands::init(), vec![0x1B, 0x40]);
/// ```
#[inline]
pub fn init() -> Vec<u8> {
    vec![ESC, b'@']
}

// ============================================================================
// TEXT STYLE COMMANDS
// ============================================================================

/// Justification for `ESC a n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left = 0,
    Center = 1,
    Right = 2,
}

/// # Select Justification (ESC a n)
///
/// | Format  | Bytes    |
/// |---------|----------|
/// | ASCII   | ESC a n  |
/// | Hex     | 1B 61 n  |
#[inline]
pub fn align(alignment: Alignment) -> Vec<u8> {
    vec![ESC, b'a', alignment as u8]
}

/// # Emphasized Mode On (ESC E 1)
#[inline]
pub fn bold_on() -> Vec<u8> {
    vec![ESC, b'E', 1]
}

/// # Emphasized Mode Off (ESC E 0)
#[inline]
pub fn bold_off() -> Vec<u8> {
    vec![ESC, b'E', 0]
}

// ============================================================================
// PAPER AND DRAWER COMMANDS
// ============================================================================

/// Page cut command bytes (see [`PAGE_CUT`]).
#[inline]
pub fn page_cut() -> Vec<u8> {
    PAGE_CUT.to_vec()
}

/// Drawer kick command bytes (see [`DRAWER_KICK`]).
#[inline]
pub fn drawer_kick() -> Vec<u8> {
    DRAWER_KICK.to_vec()
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Encode a u16 value as little-endian bytes [low, high]
///
/// ## Example
///
/// ```
/// use tillroll::protocol::commands::u16_le;
///
/// assert_eq!(u16_le(0x1234), [0x34, 0x12]);
/// assert_eq!(u16_le(576), [0x40, 0x02]); // 576 = 0x0240
/// ```
#[inline]
pub const fn u16_le(value: u16) -> [u8; 2] {
    [value as u8, (value >> 8) as u8]
}

// ============================================================================
// TESTS
// ============================================================================
