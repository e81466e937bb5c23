//! # Printer Transport Layer
//!
//! Sessions hand finished byte buffers to a [`Transport`] together with
//! the printer's device name. What the transport does with them (device
//! node, spooler, memory) is its own business.
//!
//! ## Available Transports
//!
//! - [`DeviceTransport`]: writes to a device node, raw TTY mode for serial ports
//! - [`MemoryTransport`]: records every send, for tests and `--out` dumps

pub mod device;

use std::io;

pub use device::DeviceTransport;

/// Delivers bytes to a named printer.
pub trait Transport {
    /// Send `data` to `device`.
    ///
    /// `Ok(false)` means the device refused the job without an I/O error
    /// (e.g. a spooler rejecting it).
    fn send_bytes(&mut self, device: &str, data: &[u8]) -> io::Result<bool>;
}

/// One recorded send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentJob {
    pub device: String,
    pub data: Vec<u8>,
}

/// Keeps every send in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryTransport {
    pub jobs: Vec<SentJob>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// All sent bytes concatenated in send order.
    pub fn bytes(&self) -> Vec<u8> {
        self.jobs.iter().flat_map(|j| j.data.iter().copied()).collect()
    }
}

impl Transport for MemoryTransport {
    fn send_bytes(&mut self, device: &str, data: &[u8]) -> io::Result<bool> {
        self.jobs.push(SentJob {
            device: device.to_string(),
            data: data.to_vec(),
        });
        Ok(true)
    }
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn send_bytes(&mut self, device: &str, data: &[u8]) -> io::Result<bool> {
        (**self).send_bytes(device, data)
    }
}
