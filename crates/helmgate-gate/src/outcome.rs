//! Cycle outcomes and running statistics.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How one pass through the sleep/wake cycle ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum CycleOutcome {
    /// Woke but the motion sensor read clear.
    SpuriousWake,

    /// Four digits that are not in the identifier set.
    Invalid { value: String },

    /// Host answered with the granted marker; the relay was engaged.
    Granted,

    /// Host answered with any other byte.
    Denied { byte: u8 },

    /// Host did not answer within the verification window.
    TimedOut,

    /// A peripheral failed; the error was logged and absorbed.
    Faulted { error: String },
}

impl CycleOutcome {
    /// Whether this outcome ended an authentication attempt and so earns the
    /// cooldown.
    pub fn is_attempt(&self) -> bool {
        !matches!(self, Self::SpuriousWake)
    }

    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }
}

impl fmt::Display for CycleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SpuriousWake => write!(f, "spurious wake"),
            Self::Invalid { value } => write!(f, "invalid identifier {}", value),
            Self::Granted => write!(f, "granted"),
            Self::Denied { byte } => write!(f, "denied ({:#04x})", byte),
            Self::TimedOut => write!(f, "timed out"),
            Self::Faulted { error } => write!(f, "faulted: {}", error),
        }
    }
}

/// Counters across every cycle since start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateStats {
    pub cycles: u64,
    pub spurious_wakes: u64,
    pub invalid: u64,
    pub granted: u64,
    pub denied: u64,
    pub timed_out: u64,
    pub faults: u64,
}

impl GateStats {
    pub fn record(&mut self, outcome: &CycleOutcome) {
        self.cycles += 1;
        let counter = match outcome {
            CycleOutcome::SpuriousWake => &mut self.spurious_wakes,
            CycleOutcome::Invalid { .. } => &mut self.invalid,
            CycleOutcome::Granted => &mut self.granted,
            CycleOutcome::Denied { .. } => &mut self.denied,
            CycleOutcome::TimedOut => &mut self.timed_out,
            CycleOutcome::Faulted { .. } => &mut self.faults,
        };
        *counter += 1;
    }

    /// Attempts that reached a verdict, excluding spurious wakes and faults.
    pub fn attempts(&self) -> u64 {
        self.invalid + self.granted + self.denied + self.timed_out
    }
}
