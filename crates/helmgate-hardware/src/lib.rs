//! Hardware device abstraction layer for the helmgate access controller.
//!
//! This crate provides trait-based abstractions for the peripherals wired to
//! the gate: a single-line status display, a 12-key matrix keypad, a PIR
//! motion sensor, the lock relay, the serial link to the helmet-detection
//! host and the power controller that suspends the gate between visitors.
//!
//! # Design Philosophy
//!
//! - **Async-first**: All I/O operations are asynchronous using native `async fn`
//!   in traits (Rust 1.90 + Edition 2024 RPITIT).
//! - **Poll, don't block**: Input traits report "nothing yet" as `Ok(None)`;
//!   waiting policy belongs to the caller.
//! - **Polarity hidden**: The relay is driven through [`Relay`], which maps
//!   [`ActuatorState`] to a [`SignalLevel`] so callers never see active-low logic.
//! - **Error-aware**: All operations return `Result<T>` with detailed error information.
//!
//! # Example
//!
//! ```no_run
//! use helmgate_hardware::traits::{KeypadDevice, StatusDisplay};
//! use helmgate_hardware::error::Result;
//!
//! async fn echo_key<K: KeypadDevice, D: StatusDisplay>(keypad: &mut K, display: &mut D) -> Result<()> {
//!     if let Some(key) = keypad.poll_key().await? {
//!         display.render(&key.symbol().to_string()).await?;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Mock Implementations
//!
//! The [`mock`] module provides an implementation of every trait, each paired
//! with a handle for driving and inspecting it from tests.

pub mod devices;
pub mod error;
pub mod mock;
pub mod relay;
#[cfg(feature = "hardware-serial")]
pub mod serial;
pub mod traits;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{HardwareError, Result};
pub use relay::Relay;
pub use traits::{
    DigitalOutput, KeypadDevice, KeypadInput, MotionSensor, PowerController, StatusDisplay,
    VerificationLink,
};
pub use types::{ActuatorState, Polarity, SignalLevel, WakeTrigger};
