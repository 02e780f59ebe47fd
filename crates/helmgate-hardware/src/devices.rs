//! Enum wrappers for hardware device dispatch.
//!
//! Native `async fn` in traits (RPITIT - Rust Edition 2024) are not
//! object-safe, so we cannot use `Box<dyn VerificationLink>`. The gate is
//! generic over its collaborators; when the concrete device is only known at
//! runtime (serial port present or not), these enums provide concrete type
//! dispatch instead.
//!
//! # Examples
//!
//! ```
//! use helmgate_hardware::devices::AnyVerificationLink;
//! use helmgate_hardware::mock::MockLink;
//!
//! let (link, _handle) = MockLink::new();
//! let any_link = AnyVerificationLink::Mock(link);
//! ```

use crate::Result;
use crate::mock::MockLink;
#[cfg(feature = "hardware-serial")]
use crate::serial::SerialLink;
use crate::traits::VerificationLink;

/// Enum wrapper for verification link dispatch.
#[derive(Debug)]
#[non_exhaustive]
pub enum AnyVerificationLink {
    /// In-process link for development and testing.
    Mock(MockLink),

    /// Serial port to the verification host.
    #[cfg(feature = "hardware-serial")]
    Serial(SerialLink),
}

impl VerificationLink for AnyVerificationLink {
    async fn send_line(&mut self, line: &str) -> Result<()> {
        match self {
            Self::Mock(link) => link.send_line(line).await,
            #[cfg(feature = "hardware-serial")]
            Self::Serial(link) => link.send_line(line).await,
        }
    }

    async fn try_read_byte(&mut self) -> Result<Option<u8>> {
        match self {
            Self::Mock(link) => link.try_read_byte().await,
            #[cfg(feature = "hardware-serial")]
            Self::Serial(link) => link.try_read_byte().await,
        }
    }
}
