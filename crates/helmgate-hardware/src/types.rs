//! Common types shared across hardware device implementations.
//!
//! This module defines the electrical vocabulary of the gate (signal levels,
//! output polarity, wake triggers) and the logical actuator state that the
//! state machine reasons about instead of raw levels.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Electrical level of a digital line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalLevel {
    /// Line driven or read low.
    Low,
    /// Line driven or read high.
    High,
}

impl SignalLevel {
    /// The opposite level.
    pub fn inverted(self) -> Self {
        match self {
            Self::Low => Self::High,
            Self::High => Self::Low,
        }
    }

    pub fn is_high(self) -> bool {
        matches!(self, Self::High)
    }
}

impl fmt::Display for SignalLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::High => write!(f, "HIGH"),
        }
    }
}

/// Logical state of the lock relay.
///
/// The relay starts and defaults to `Released`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActuatorState {
    /// Lock energised, entry unlocked.
    Engaged,
    /// Lock at rest, entry locked.
    #[default]
    Released,
}

impl fmt::Display for ActuatorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Engaged => write!(f, "Engaged"),
            Self::Released => write!(f, "Released"),
        }
    }
}

/// Which level energises an output.
///
/// # Examples
///
/// ```
/// use helmgate_hardware::types::{ActuatorState, Polarity, SignalLevel};
///
/// assert_eq!(Polarity::ActiveLow.level_for(ActuatorState::Engaged), SignalLevel::Low);
/// assert_eq!(Polarity::ActiveLow.level_for(ActuatorState::Released), SignalLevel::High);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    /// Driving the line low engages the actuator.
    #[default]
    ActiveLow,
    /// Driving the line high engages the actuator.
    ActiveHigh,
}

impl Polarity {
    /// Physical level that puts the actuator in `state`.
    pub fn level_for(self, state: ActuatorState) -> SignalLevel {
        let active = match self {
            Self::ActiveLow => SignalLevel::Low,
            Self::ActiveHigh => SignalLevel::High,
        };
        match state {
            ActuatorState::Engaged => active,
            ActuatorState::Released => active.inverted(),
        }
    }

    /// Logical state implied by a physical level.
    pub fn state_for(self, level: SignalLevel) -> ActuatorState {
        if self.level_for(ActuatorState::Engaged) == level {
            ActuatorState::Engaged
        } else {
            ActuatorState::Released
        }
    }
}

/// Condition under which a suspended controller resumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WakeTrigger {
    /// Sustained level on the wake line that resumes execution.
    pub level: SignalLevel,
}

impl WakeTrigger {
    /// Wake when the line is held at `level`.
    pub fn level(level: SignalLevel) -> Self {
        Self { level }
    }
}

impl Default for WakeTrigger {
    fn default() -> Self {
        Self::level(SignalLevel::High)
    }
}
