//! # Device File Transport
//!
//! Writes ESC/POS bytes to a printer device node: a USB line printer
//! (`/dev/usb/lp0`), a USB or Bluetooth serial port (`/dev/ttyUSB0`,
//! `/dev/rfcomm0`), or a spooler FIFO.
//!
//! ## TTY Configuration
//!
//! Serial devices are switched to raw mode so binary data is transmitted
//! without modification:
//!
//! - **No input processing**: Disable IGNBRK, BRKINT, PARMRK, ISTRIP, etc.
//! - **No output processing**: Disable OPOST (no CR/LF translation)
//! - **8-bit characters**: CS8 (8 data bits, no parity)
//! - **No echo**: Disable ECHO, ECHONL
//! - **Non-canonical mode**: Disable ICANON (no line buffering)
//!
//! Non-TTY devices (line printers, plain files) are written as-is.
//!
//! ## Chunked Writes
//!
//! Raster labels are tens of kilobytes. Large writes are split into 4096
//! byte chunks with a small delay between them so the printer's input
//! buffer keeps up.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::os::unix::io::AsRawFd;
use std::thread;
use std::time::Duration;

use tracing::{debug, instrument};

use super::Transport;

/// Default chunk size for writes (bytes)
const CHUNK_SIZE: usize = 4096;

/// Delay between chunks (milliseconds)
const CHUNK_DELAY_MS: u64 = 2;

/// # Device Transport
///
/// Opens the device named by the printer profile's address for every
/// send, so a printer that was unplugged and replugged is picked up again.
///
/// ## Example
///
/// ```no_run
/// use tillroll::protocol::commands;
/// use tillroll::transport::{DeviceTransport, Transport};
///
/// let mut transport = DeviceTransport::new();
/// transport.send_bytes("/dev/usb/lp0", &commands::drawer_kick())?;
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct DeviceTransport {
    chunk_size: usize,
    chunk_delay: Duration,
}

impl DeviceTransport {
    pub fn new() -> Self {
        Self {
            chunk_size: CHUNK_SIZE,
            chunk_delay: Duration::from_millis(CHUNK_DELAY_MS),
        }
    }

    /// Set the chunk size for large writes.
    ///
    /// Larger chunks are faster but may overflow a serial link's buffer.
    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size.max(1);
        self
    }

    /// Set the delay between chunks.
    pub fn with_chunk_delay(mut self, delay: Duration) -> Self {
        self.chunk_delay = delay;
        self
    }

    fn write_chunked<W: Write>(&self, out: &mut W, data: &[u8]) -> io::Result<()> {
        if data.len() <= self.chunk_size {
            out.write_all(data)?;
        } else {
            for chunk in data.chunks(self.chunk_size) {
                out.write_all(chunk)?;
                if !self.chunk_delay.is_zero() {
                    thread::sleep(self.chunk_delay);
                }
            }
        }
        out.flush()
    }
}

impl Default for DeviceTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for DeviceTransport {
    #[instrument(skip(self, data), fields(bytes = data.len()))]
    fn send_bytes(&mut self, device: &str, data: &[u8]) -> io::Result<bool> {
        let mut file = OpenOptions::new().write(true).open(device)?;

        let fd = file.as_raw_fd();
        // SAFETY: fd belongs to `file`, which is open for the whole call
        if unsafe { libc::isatty(fd) } == 1 {
            configure_tty_raw(fd)?;
        }

        self.write_chunked(&mut file, data)?;
        debug!("bytes written to device");
        Ok(true)
    }
}

/// Configure a file descriptor for raw TTY mode.
///
/// Note: IXON/IXOFF/IXANY disable XON/XOFF software flow control. This is
/// required because 0x11 (XON) and 0x13 (XOFF) appear in raster data.
fn configure_tty_raw(fd: i32) -> io::Result<()> {
    use std::mem::MaybeUninit;

    let mut termios = MaybeUninit::uninit();
    // SAFETY: tcgetattr fully initializes termios when it returns 0
    if unsafe { libc::tcgetattr(fd, termios.as_mut_ptr()) } != 0 {
        return Err(io::Error::last_os_error());
    }
    let mut termios = unsafe { termios.assume_init() };

    termios.c_iflag &= !(libc::IGNBRK
        | libc::BRKINT
        | libc::PARMRK
        | libc::ISTRIP
        | libc::INLCR
        | libc::IGNCR
        | libc::ICRNL
        | libc::IXON
        | libc::IXOFF
        | libc::IXANY);

    termios.c_oflag &= !libc::OPOST;

    termios.c_lflag &= !(libc::ECHO | libc::ECHONL | libc::ICANON | libc::ISIG | libc::IEXTEN);

    termios.c_cflag &= !(libc::CSIZE | libc::PARENB);
    termios.c_cflag |= libc::CS8;

    if unsafe { libc::tcsetattr(fd, libc::TCSANOW, &termios) } != 0 {
        return Err(io::Error::last_os_error());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// Records each write call separately.
    #[derive(Default)]
    struct Writes(Vec<Vec<u8>>);

    impl Write for Writes {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.push(buf.to_vec());
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_small_write_is_single_chunk() {
        let transport = DeviceTransport::new();
        let mut out = Writes::default();
        transport.write_chunked(&mut out, &[1, 2, 3]).unwrap();
        assert_eq!(out.0, vec![vec![1, 2, 3]]);
    }

    #[test]
    fn test_large_write_is_chunked() {
        let transport = DeviceTransport::new()
            .with_chunk_size(4)
            .with_chunk_delay(Duration::ZERO);
        let mut out = Writes::default();
        transport.write_chunked(&mut out, &[0u8; 10]).unwrap();
        let sizes: Vec<usize> = out.0.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![4, 4, 2]);
    }

    #[test]
    fn test_send_to_plain_file() {
        let path = std::env::temp_dir().join(format!("tillroll-device-{}", std::process::id()));
        fs::write(&path, b"").unwrap();

        let mut transport = DeviceTransport::new();
        let sent = transport
            .send_bytes(path.to_str().unwrap(), &[0x1B, 0x40])
            .unwrap();
        assert!(sent);
        assert_eq!(fs::read(&path).unwrap(), vec![0x1B, 0x40]);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_device_is_error() {
        let mut transport = DeviceTransport::new();
        assert!(transport.send_bytes("/nonexistent/lp9", &[0x0A]).is_err());
    }
}
