//! # Serial TTY Transport
//!
//! This module provides communication with thermal printers over a serial
//! port: a native RS-232 port (`/dev/ttyS0`, `COM1`) or a USB-serial
//! adapter (`/dev/ttyUSB0`).
//!
//! ## Finding the Port (Linux)
//!
//! ```bash
//! $ sudo dmesg | grep tty
//! [1537133.727889] usb 2-1: pl2303 converter now attached to ttyUSB0
//! ```
//!
//! shows that `/dev/ttyUSB0` is the device to open. The user needs write
//! access to it, which usually means membership in the `dialout` group.
//!
//! ## TTY Configuration
//!
//! The device is opened in raw mode so control bytes are transmitted
//! without modification:
//!
//! - **Baud rate**: the configured rate for both directions
//! - **No input processing**: Disable IGNBRK, BRKINT, PARMRK, ISTRIP, etc.
//! - **No output processing**: Disable OPOST (no CR/LF translation)
//! - **8N1**: CS8, no parity
//! - **No echo, non-canonical**: Disable ECHO, ECHONL, ICANON
//!
//! There is no write timeout beyond what the driver imposes: a write blocks
//! until the kernel accepts the bytes or fails.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;

use log::debug;

use super::Transport;
use crate::error::LinePrinterError;
use crate::protocol::commands::hex;

/// Baud rates the transport knows how to configure.
pub const SUPPORTED_BAUD_RATES: &[u32] = &[1200, 2400, 4800, 9600, 19200, 38400, 57600, 115200];

/// # Serial Printer Transport
///
/// Opening is lazy and repeatable: the session reopens the port whenever it
/// finds it closed.
///
/// ## Example
///
/// ```no_run
/// use lineprinter::transport::{SerialTransport, Transport};
/// use lineprinter::protocol::commands;
///
/// let mut transport = SerialTransport::new("/dev/ttyUSB0", 19200)?;
/// transport.open()?;
/// transport.write(&commands::init())?;
/// transport.close()?;
/// # Ok::<(), lineprinter::LinePrinterError>(())
/// ```
#[derive(Debug)]
pub struct SerialTransport {
    path: PathBuf,
    port: String,
    baud: u32,
    file: Option<File>,
}

impl SerialTransport {
    /// Describe a serial port without opening it.
    ///
    /// ## Errors
    ///
    /// Returns [`LinePrinterError::InvalidArgument`] if `baud` is not one of
    /// [`SUPPORTED_BAUD_RATES`].
    pub fn new(port: impl Into<String>, baud: u32) -> Result<Self, LinePrinterError> {
        if !SUPPORTED_BAUD_RATES.contains(&baud) {
            return Err(LinePrinterError::InvalidArgument(format!(
                "unsupported baud rate {} (expected one of {:?})",
                baud, SUPPORTED_BAUD_RATES
            )));
        }
        let port = port.into();
        Ok(Self {
            path: PathBuf::from(&port),
            port,
            baud,
            file: None,
        })
    }

    /// Describe and immediately open a serial port.
    pub fn open_port(port: impl Into<String>, baud: u32) -> Result<Self, LinePrinterError> {
        let mut transport = Self::new(port, baud)?;
        transport.open()?;
        Ok(transport)
    }

    pub fn baud(&self) -> u32 {
        self.baud
    }
}

impl Transport for SerialTransport {
    fn open(&mut self) -> Result<(), LinePrinterError> {
        if self.file.is_some() {
            return Ok(());
        }

        let file = OpenOptions::new()
            .write(true)
            .open(&self.path)
            .map_err(|e| LinePrinterError::unavailable(&self.port, e.to_string()))?;

        configure_tty_raw(&file, self.baud)
            .map_err(|e| LinePrinterError::unavailable(&self.port, e.to_string()))?;

        debug!("opened {} at {} baud", self.port, self.baud);
        self.file = Some(file);
        Ok(())
    }

    fn close(&mut self) -> Result<(), LinePrinterError> {
        if let Some(mut file) = self.file.take() {
            file.flush()?;
            debug!("closed {}", self.port);
        }
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.file.is_some()
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), LinePrinterError> {
        let file = self
            .file
            .as_mut()
            .ok_or_else(|| LinePrinterError::unavailable(&self.port, "port is closed"))?;
        debug!("{} <- {}", self.port, hex(bytes));
        file.write_all(bytes)?;
        file.flush()?;
        Ok(())
    }

    fn port(&self) -> &str {
        &self.port
    }
}

#[cfg(unix)]
fn baud_constant(baud: u32) -> io::Result<libc::speed_t> {
    let speed = match baud {
        1200 => libc::B1200,
        2400 => libc::B2400,
        4800 => libc::B4800,
        9600 => libc::B9600,
        19200 => libc::B19200,
        38400 => libc::B38400,
        57600 => libc::B57600,
        115200 => libc::B115200,
        other => {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("unsupported baud rate {}", other),
            ));
        }
    };
    Ok(speed)
}

/// Configure a serial device for raw 8N1 mode at the given baud rate.
///
/// Note: IXON/IXOFF/IXANY are cleared because 0x11 and 0x13 are valid
/// parameter bytes and must not be swallowed as flow control.
#[cfg(unix)]
fn configure_tty_raw(file: &File, baud: u32) -> io::Result<()> {
    use std::mem::MaybeUninit;
    use std::os::unix::io::AsRawFd;

    let fd = file.as_raw_fd();
    let speed = baud_constant(baud)?;

    let mut termios = MaybeUninit::uninit();
    let result = unsafe { libc::tcgetattr(fd, termios.as_mut_ptr()) };
    if result != 0 {
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

    // 8 data bits, no parity, one stop bit
    termios.c_cflag &= !(libc::CSIZE | libc::PARENB | libc::CSTOPB);
    termios.c_cflag |= libc::CS8 | libc::CREAD | libc::CLOCAL;

    let result = unsafe { libc::cfsetispeed(&mut termios, speed) };
    if result != 0 {
        return Err(io::Error::last_os_error());
    }
    let result = unsafe { libc::cfsetospeed(&mut termios, speed) };
    if result != 0 {
        return Err(io::Error::last_os_error());
    }

    let result = unsafe { libc::tcsetattr(fd, libc::TCSANOW, &termios) };
    if result != 0 {
        return Err(io::Error::last_os_error());
    }

    Ok(())
}

#[cfg(not(unix))]
fn configure_tty_raw(_file: &File, _baud: u32) -> io::Result<()> {
    // Windows COM ports keep the settings made with `mode COMn: BAUD=...`
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
