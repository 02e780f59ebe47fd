//! Serial-port verification link.
//!
//! The verification host is attached over a USB serial adapter. Diagnostic
//! lines go out as ASCII terminated by `\n`; the host's answer comes back on
//! the same port.
//!
//! Reads never wait: [`SerialLink::try_read_byte`] first asks the driver how
//! many bytes are buffered and only reads when at least one is available, so
//! the gate's own poll window stays the single timing authority.

use std::io::{Read, Write};
use std::time::Duration;

use serialport::SerialPort;
use tracing::{debug, info, trace};

use crate::error::Result;
use crate::traits::VerificationLink;

/// Line terminator written after every diagnostic line.
const LINE_TERMINATOR: &[u8] = b"\n";

/// Configuration for a serial verification link
///
/// # Example
///
/// ```
/// use helmgate_hardware::serial::SerialLinkConfig;
///
/// let config = SerialLinkConfig::new("/dev/ttyUSB0");
/// assert_eq!(config.baud_rate, 115_200);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialLinkConfig {
    /// Device path, e.g. `/dev/ttyUSB0` or `COM5`
    pub path: String,

    /// Line speed in bits per second
    pub baud_rate: u32,

    /// Driver-level timeout for writes
    pub write_timeout: Duration,
}

impl SerialLinkConfig {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            baud_rate: 115_200,
            write_timeout: Duration::from_millis(1000),
        }
    }

    pub fn with_baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }
}

/// Verification link over a serial port.
pub struct SerialLink {
    port: Box<dyn SerialPort>,
    path: String,
}

impl SerialLink {
    /// Open the port described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the device does not exist or cannot be configured.
    pub fn open(config: &SerialLinkConfig) -> Result<Self> {
        info!(
            "Opening verification link on {} at {} baud",
            config.path, config.baud_rate
        );

        let port = serialport::new(&config.path, config.baud_rate)
            .timeout(config.write_timeout)
            .open()?;

        Ok(Self {
            port,
            path: config.path.clone(),
        })
    }

    /// Device path this link was opened on.
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl std::fmt::Debug for SerialLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerialLink")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl VerificationLink for SerialLink {
    async fn send_line(&mut self, line: &str) -> Result<()> {
        debug!("Serial TX: {}", line);
        self.port.write_all(line.as_bytes())?;
        self.port.write_all(LINE_TERMINATOR)?;
        self.port.flush()?;
        Ok(())
    }

    async fn try_read_byte(&mut self) -> Result<Option<u8>> {
        if self.port.bytes_to_read()? == 0 {
            return Ok(None);
        }

        let mut byte = [0u8; 1];
        let read = self.port.read(&mut byte)?;
        if read == 0 {
            return Ok(None);
        }

        trace!("Serial RX: {:#04x}", byte[0]);
        Ok(Some(byte[0]))
    }
}
