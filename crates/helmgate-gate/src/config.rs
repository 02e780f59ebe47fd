//! Gate configuration.
//!
//! Every value is compiled in through [`GateConfig::default`]; there is no
//! configuration file. Tests shorten or reshape the timings with the `with_*`
//! methods.

use std::time::Duration;

use helmgate_core::constants::{
    CYCLE_COOLDOWN_MS, DENIAL_HOLD_MS, GRANT_HOLD_MS, INVALID_HOLD_MS, KEY_POLL_INTERVAL_MS,
    LINK_POLL_INTERVAL_MS, SLEEP_SETTLE_MS, TIMEOUT_HOLD_MS, VERIFICATION_WINDOW_MS,
};
use helmgate_core::{Error, IdentifierSet};
use helmgate_hardware::{Polarity, WakeTrigger};
use serde::{Deserialize, Serialize};

/// Configuration for the access-control gate
///
/// # Example
///
/// ```
/// use helmgate_gate::GateConfig;
/// use std::time::Duration;
///
/// let config = GateConfig::default();
/// assert_eq!(config.verification_window, Duration::from_secs(10));
/// assert_eq!(config.grant_hold, Duration::from_secs(3));
/// assert!(config.identifiers.contains_str("0002"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateConfig {
    /// Identifiers accepted at the keypad
    pub identifiers: IdentifierSet,

    /// Pause between rendering "Sleeping" and suspending
    pub sleep_settle: Duration,

    /// Pause after a completed authentication attempt
    pub cooldown: Duration,

    /// Hold after an invalid identifier
    pub invalid_hold: Duration,

    /// Window in which the host must answer
    pub verification_window: Duration,

    /// Time the relay stays engaged after a grant
    pub grant_hold: Duration,

    /// Time "Helmet Missing" stays up before "Access Denied"
    pub denial_hold: Duration,

    /// Hold after the host failed to answer
    pub timeout_hold: Duration,

    /// Interval between keypad polls
    pub key_poll_interval: Duration,

    /// Interval between verification link polls
    pub link_poll_interval: Duration,

    /// Which level energises the lock relay
    pub relay_polarity: Polarity,

    /// Wake condition on the motion sensor line
    pub wake_trigger: WakeTrigger,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            identifiers: IdentifierSet::default(),
            sleep_settle: Duration::from_millis(SLEEP_SETTLE_MS),
            cooldown: Duration::from_millis(CYCLE_COOLDOWN_MS),
            invalid_hold: Duration::from_millis(INVALID_HOLD_MS),
            verification_window: Duration::from_millis(VERIFICATION_WINDOW_MS),
            grant_hold: Duration::from_millis(GRANT_HOLD_MS),
            denial_hold: Duration::from_millis(DENIAL_HOLD_MS),
            timeout_hold: Duration::from_millis(TIMEOUT_HOLD_MS),
            key_poll_interval: Duration::from_millis(KEY_POLL_INTERVAL_MS),
            link_poll_interval: Duration::from_millis(LINK_POLL_INTERVAL_MS),
            relay_polarity: Polarity::ActiveLow,
            wake_trigger: WakeTrigger::default(),
        }
    }
}

impl GateConfig {
    pub fn with_identifiers(mut self, identifiers: IdentifierSet) -> Self {
        self.identifiers = identifiers;
        self
    }

    pub fn with_verification_window(mut self, window: Duration) -> Self {
        self.verification_window = window;
        self
    }

    pub fn with_relay_polarity(mut self, polarity: Polarity) -> Self {
        self.relay_polarity = polarity;
        self
    }

    pub fn with_poll_intervals(mut self, key: Duration, link: Duration) -> Self {
        self.key_poll_interval = key;
        self.link_poll_interval = link;
        self
    }

    /// Check the configuration for values the gate cannot run with.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` for a zero poll interval or a zero
    /// verification window.
    pub fn validate(&self) -> helmgate_core::Result<()> {
        if self.key_poll_interval.is_zero() {
            return Err(Error::Config("key poll interval must be non-zero".into()));
        }
        if self.link_poll_interval.is_zero() {
            return Err(Error::Config("link poll interval must be non-zero".into()));
        }
        if self.verification_window.is_zero() {
            return Err(Error::Config("verification window must be non-zero".into()));
        }
        if self.identifiers.is_empty() {
            return Err(Error::EmptyIdentifierSet);
        }
        Ok(())
    }
}
