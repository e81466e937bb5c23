//! # Printer Driver
//!
//! The formatting capability sessions write documents through. A driver
//! accumulates one document at a time; [`PrinterDriver::print_document`]
//! hands the finished bytes back for the transport.
//!
//! [`EscPosDriver`] renders straight to ESC/POS:
//!
//! ```text
//! initialize_print   ESC @
//! align_left         ESC a 0
//! align_center       ESC a 1
//! bold(text)         ESC E 1, text, LF, ESC E 0
//! append_line(text)  text, LF
//! separator          "-" × width, LF
//! new_line           LF
//! full_cut           GS V 66 3
//! ```

use crate::layout::DEFAULT_MAX_CHARS;
use crate::protocol::commands::{self, Alignment, LF};
use crate::protocol::cp437;

/// Simple line-oriented formatting commands.
pub trait PrinterDriver {
    /// Characters per line, used for separators.
    fn set_line_width(&mut self, chars: usize);

    fn align_left(&mut self);

    fn align_center(&mut self);

    /// Print `text` as an emphasized line.
    fn bold(&mut self, text: &str);

    fn append_line(&mut self, text: &str);

    /// A full-width rule.
    fn separator(&mut self);

    fn new_line(&mut self);

    fn full_cut(&mut self);

    /// Reset the printer's format state at the start of a document.
    fn initialize_print(&mut self);

    /// Take the accumulated document, leaving the driver empty.
    fn print_document(&mut self) -> Vec<u8>;

    /// Drop anything accumulated so far.
    fn clear(&mut self);
}

/// ESC/POS driver with CP437 text.
#[derive(Debug, Clone)]
pub struct EscPosDriver {
    buf: Vec<u8>,
    width: usize,
}

impl EscPosDriver {
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(4096),
            width: DEFAULT_MAX_CHARS,
        }
    }

    /// Characters per line.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Bytes accumulated so far.
    pub fn buffer(&self) -> &[u8] {
        &self.buf
    }

    fn text(&mut self, s: &str) {
        self.buf.extend(cp437::encode(s));
    }
}

impl Default for EscPosDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl PrinterDriver for EscPosDriver {
    fn set_line_width(&mut self, chars: usize) {
        self.width = chars;
    }

    fn align_left(&mut self) {
        self.buf.extend(commands::align(Alignment::Left));
    }

    fn align_center(&mut self) {
        self.buf.extend(commands::align(Alignment::Center));
    }

    fn bold(&mut self, text: &str) {
        self.buf.extend(commands::bold_on());
        self.text(text);
        self.buf.push(LF);
        self.buf.extend(commands::bold_off());
    }

    fn append_line(&mut self, text: &str) {
        self.text(text);
        self.buf.push(LF);
    }

    fn separator(&mut self) {
        let rule = "-".repeat(self.width);
        self.append_line(&rule);
    }

    fn new_line(&mut self) {
        self.buf.push(LF);
    }

    fn full_cut(&mut self) {
        self.buf.extend(commands::page_cut());
    }

    fn initialize_print(&mut self) {
        self.buf.extend(commands::init());
    }

    fn print_document(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.buf)
    }

    fn clear(&mut self) {
        self.buf.clear();
    }
}
