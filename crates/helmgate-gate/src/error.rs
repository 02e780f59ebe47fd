//! Error types for the access-control gate.

use helmgate_hardware::HardwareError;
use thiserror::Error;

/// Result type alias for gate operations.
pub type Result<T> = std::result::Result<T, GateError>;

/// Errors raised by the gate.
///
/// Only [`GateError::DisplayInit`] and [`GateError::Config`] ever leave the
/// gate; everything that happens inside a cycle is absorbed and logged.
#[derive(Debug, Error)]
pub enum GateError {
    /// The status display did not come up. Fatal at startup.
    #[error("Display initialization failed: {0}")]
    DisplayInit(#[source] HardwareError),

    /// A peripheral failed during a cycle.
    #[error("Hardware error: {0}")]
    Hardware(#[from] HardwareError),

    /// The configuration was rejected.
    #[error("Invalid configuration: {0}")]
    Config(#[from] helmgate_core::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_init_message() {
        let error = GateError::DisplayInit(HardwareError::initialization_failed("no ack"));
        assert_eq!(
            error.to_string(),
            "Display initialization failed: Initialization failed: no ack"
        );
    }

    #[test]
    fn test_hardware_conversion() {
        let error: GateError = HardwareError::disconnected("Keypad").into();
        assert!(matches!(error, GateError::Hardware(_)));
    }
}
