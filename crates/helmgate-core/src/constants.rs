//! Core constants for the helmgate access controller.
//!
//! This module collects every protocol marker, timing value and status text
//! used by the gate. Keeping them in one place gives the state machine, the
//! mock devices and the tests a single source of truth.
//!
//! # Cycle Timing
//!
//! ```text
//! Sleeping ──100ms──> suspend ──motion──> ID capture ──> verification ──2s──> Sleeping
//!                                              │               │
//!                                        invalid: 2s      granted: 3s relay
//!                                                         denied: 3s
//!                                                         timeout: 10s window + 2s
//! ```
//!
//! # Usage
//!
//! ```
//! use helmgate_core::constants::*;
//! use std::time::Duration;
//!
//! assert_eq!(IDENTIFIER_LENGTH, 4);
//! assert_eq!(Duration::from_millis(VERIFICATION_WINDOW_MS).as_secs(), 10);
//! assert_eq!(GRANTED_MARKER, b'1');
//! ```

// ============================================================================
// Identifier Format
// ============================================================================

/// Number of digits in an access identifier.
///
/// The keypad buffer transitions out of input as soon as it holds this many
/// characters; there is no Enter key.
pub const IDENTIFIER_LENGTH: usize = 4;

/// Identifiers preloaded into the default identifier set.
///
/// The set is compiled in and never changes at runtime.
pub const DEFAULT_IDENTIFIERS: [&str; 4] = ["0001", "0002", "0003", "0004"];

// ============================================================================
// Remote Verification Protocol
// ============================================================================

/// Result byte meaning "granted".
///
/// Any other byte received from the host denies access (fail closed).
///
/// # Examples
///
/// ```
/// use helmgate_core::constants::GRANTED_MARKER;
///
/// assert_eq!(GRANTED_MARKER as char, '1');
/// ```
pub const GRANTED_MARKER: u8 = b'1';

/// Number of bytes in a host response (result byte + terminator).
///
/// The terminator is discarded without being checked.
pub const RESPONSE_LENGTH: usize = 2;

/// Line terminator appended to every diagnostic line.
pub const LINE_TERMINATOR: &str = "\n";

/// Default serial baud rate for the verification link.
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

// ============================================================================
// Diagnostic Lines
// ============================================================================

/// Sent when the motion sensor confirms presence after a wake.
pub const DIAG_MOTION_DETECTED: &str = "Motion detected!";

/// Sent when a valid identifier was entered.
///
/// This line doubles as the verification request: the host answers within
/// [`VERIFICATION_WINDOW_MS`].
pub const DIAG_ID_OK: &str = "ID_OK";

/// Prefix of the line sent when an identifier is rejected.
///
/// # Examples
///
/// ```
/// use helmgate_core::constants::DIAG_INVALID_ID_PREFIX;
///
/// let line = format!("{DIAG_INVALID_ID_PREFIX}{}", "9999");
/// assert_eq!(line, "Invalid ID: 9999");
/// ```
pub const DIAG_INVALID_ID_PREFIX: &str = "Invalid ID: ";

// ============================================================================
// Timing (milliseconds)
// ============================================================================

/// Pause between rendering "Sleeping" and suspending.
pub const SLEEP_SETTLE_MS: u64 = 100;

/// Cooldown after a completed authentication attempt.
pub const CYCLE_COOLDOWN_MS: u64 = 2_000;

/// Hold after an invalid identifier.
pub const INVALID_HOLD_MS: u64 = 2_000;

/// Window in which the host must answer after `ID_OK`.
pub const VERIFICATION_WINDOW_MS: u64 = 10_000;

/// Time the relay stays engaged after a grant.
pub const GRANT_HOLD_MS: u64 = 3_000;

/// Time "Helmet Missing" stays on screen before "Access Denied".
pub const DENIAL_HOLD_MS: u64 = 3_000;

/// Hold after a verification timeout.
pub const TIMEOUT_HOLD_MS: u64 = 2_000;

/// Interval between keypad polls.
pub const KEY_POLL_INTERVAL_MS: u64 = 20;

/// Interval between verification link polls.
pub const LINK_POLL_INTERVAL_MS: u64 = 10;

// ============================================================================
// Display
// ============================================================================

/// Column count of the single-line status display.
pub const DISPLAY_COLUMNS: usize = 16;

// ============================================================================
// Status Messages
// ============================================================================

/// Rendered right before suspension.
pub const MSG_SLEEPING: &str = "Sleeping";

/// Prefix of the running identifier echo (`ID: 00`).
pub const MSG_ID_PREFIX: &str = "ID: ";

/// Rendered when either clear key is pressed.
pub const MSG_CLEARED: &str = "Cleared";

/// Rendered when the identifier is not in the set.
pub const MSG_INVALID_ID: &str = "Invalid ID";

/// Rendered while waiting for the host.
pub const MSG_CHECKING: &str = "Checking...";

/// Rendered when the host grants access.
pub const MSG_ACCESS_GRANTED: &str = "Access Granted";

/// Rendered first when the host denies access.
pub const MSG_HELMET_MISSING: &str = "Helmet Missing";

/// Rendered after [`MSG_HELMET_MISSING`] has been held.
pub const MSG_ACCESS_DENIED: &str = "Access Denied";

/// Rendered when the host does not answer in time.
pub const MSG_PC_TIMEOUT: &str = "PC Timeout";
