//! Mock device implementations for testing and development.
//!
//! This module provides simulated device implementations that can be controlled
//! programmatically without requiring physical hardware. Every mock comes with
//! a cloneable handle that stays with the test while the device itself is
//! moved into the gate.

pub mod display;
pub mod keypad;
pub mod link;
pub mod motion;
pub mod output;
pub mod power;

// Re-export commonly used types
pub use display::{MockDisplay, MockDisplayHandle};
pub use keypad::{MockKeypad, MockKeypadHandle};
pub use link::{MockLink, MockLinkHandle, Responder};
pub use motion::{MockMotionHandle, MockMotionSensor};
pub use output::{MockOutputHandle, MockOutputPin};
pub use power::{MockPowerController, MockPowerHandle};

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Lock shared mock state, recovering from a poisoned mutex.
///
/// A panicking test thread must not cascade into unrelated assertions.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
