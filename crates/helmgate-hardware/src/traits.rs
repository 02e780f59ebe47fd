//! Hardware device trait definitions.
//!
//! This module defines trait interfaces for the gate's collaborators. These
//! traits establish the contract between the access-control core and its
//! peripherals (status display, keypad, motion sensor, relay output,
//! verification link, power controller), enabling easy substitution between
//! mock and real hardware implementations.
//!
//! All traits use native `async fn` methods (Rust 1.90 + Edition 2024 RPITIT),
//! eliminating the need for the `async_trait` macro.
//!
//! Polling traits never block waiting for data: they report "nothing yet" as
//! `Ok(None)` and leave the timing policy to the caller.

#![allow(async_fn_in_trait)]

use crate::error::{HardwareError, Result};
use crate::types::{SignalLevel, WakeTrigger};

/// Input from a keypad device.
///
/// The gate uses a 12-key matrix: digits `0`-`9` plus the `*` and `#`
/// symbols, both of which clear the entry buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeypadInput {
    /// Numeric digit (0-9).
    Digit(u8),

    /// Star key (*).
    Star,

    /// Hash/pound key (#).
    Hash,
}

impl KeypadInput {
    /// Create a digit input.
    ///
    /// # Errors
    ///
    /// Returns an error if the digit is greater than 9.
    ///
    /// # Examples
    ///
    /// ```
    /// use helmgate_hardware::traits::KeypadInput;
    ///
    /// let input = KeypadInput::digit(5).unwrap();
    /// assert_eq!(input.as_digit(), Some(5));
    ///
    /// assert!(KeypadInput::digit(10).is_err());
    /// ```
    pub fn digit(d: u8) -> Result<Self> {
        if d > 9 {
            return Err(HardwareError::invalid_data(format!(
                "Digit must be 0-9, got {}",
                d
            )));
        }
        Ok(Self::Digit(d))
    }

    /// Map a key cap symbol to an input.
    ///
    /// # Errors
    ///
    /// Returns an error for any symbol not printed on the keypad.
    ///
    /// # Examples
    ///
    /// ```
    /// use helmgate_hardware::traits::KeypadInput;
    ///
    /// assert_eq!(KeypadInput::from_symbol('7').unwrap(), KeypadInput::Digit(7));
    /// assert_eq!(KeypadInput::from_symbol('#').unwrap(), KeypadInput::Hash);
    /// assert!(KeypadInput::from_symbol('A').is_err());
    /// ```
    pub fn from_symbol(symbol: char) -> Result<Self> {
        match symbol {
            '*' => Ok(Self::Star),
            '#' => Ok(Self::Hash),
            c => c
                .to_digit(10)
                .map(|d| Self::Digit(d as u8))
                .ok_or_else(|| HardwareError::invalid_data(format!("Unknown key symbol: {c:?}"))),
        }
    }

    /// The symbol printed on the key.
    pub fn symbol(&self) -> char {
        match self {
            Self::Digit(d) => char::from(b'0' + d),
            Self::Star => '*',
            Self::Hash => '#',
        }
    }

    /// Check if this input is a digit.
    pub fn is_digit(&self) -> bool {
        matches!(self, Self::Digit(_))
    }

    /// Check if this input clears the entry buffer.
    pub fn is_clear(&self) -> bool {
        matches!(self, Self::Star | Self::Hash)
    }

    /// Get the digit value if this is a digit input.
    pub fn as_digit(&self) -> Option<u8> {
        match self {
            Self::Digit(d) => Some(*d),
            _ => None,
        }
    }
}

/// Single-line status display.
///
/// Each `render` call replaces whatever was shown before.
pub trait StatusDisplay: Send {
    /// Bring the display up.
    ///
    /// # Errors
    ///
    /// Returns an error if the display does not respond. The gate treats
    /// this as fatal.
    async fn init(&mut self) -> Result<()>;

    /// Show `text`, overwriting the previous message.
    async fn render(&mut self, text: &str) -> Result<()>;
}

/// Keypad device abstraction.
///
/// # Examples
///
/// ```no_run
/// use helmgate_hardware::traits::{KeypadDevice, KeypadInput};
/// use helmgate_hardware::error::Result;
///
/// async fn next_digit<K: KeypadDevice>(keypad: &mut K) -> Result<Option<u8>> {
///     Ok(keypad.poll_key().await?.and_then(|key| key.as_digit()))
/// }
/// ```
pub trait KeypadDevice: Send {
    /// Poll the keypad once.
    ///
    /// Returns `Ok(None)` when no key is pressed, or exactly one key.
    ///
    /// # Errors
    ///
    /// Returns an error if the device is disconnected.
    async fn poll_key(&mut self) -> Result<Option<KeypadInput>>;
}

/// Motion sensor (PIR) input.
pub trait MotionSensor: Send {
    /// Current "motion present" reading.
    async fn is_motion_present(&mut self) -> Result<bool>;
}

/// Digital output line driving an actuator.
///
/// Implementations only move the line; polarity is handled by
/// [`Relay`](crate::relay::Relay).
pub trait DigitalOutput: Send {
    /// Drive the line to `level`.
    async fn set_level(&mut self, level: SignalLevel) -> Result<()>;
}

/// Byte-oriented duplex channel to the verification host.
///
/// Diagnostic lines and verification answers share this channel.
pub trait VerificationLink: Send {
    /// Write `line` followed by a line terminator.
    async fn send_line(&mut self, line: &str) -> Result<()>;

    /// Read one byte if one is available, without waiting.
    async fn try_read_byte(&mut self) -> Result<Option<u8>>;
}

/// Low-power suspend/resume control.
pub trait PowerController: Send {
    /// Register the wake source and its trigger condition.
    async fn enable_wake(&mut self, trigger: WakeTrigger) -> Result<()>;

    /// Suspend until the wake condition is met.
    ///
    /// There is no timer wake source: this may never return.
    async fn suspend(&mut self) -> Result<()>;
}
