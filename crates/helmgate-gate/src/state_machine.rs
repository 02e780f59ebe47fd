//! Identifier capture state machine.
//!
//! Keypad input is folded into an explicit [`CaptureState`] one key at a time.
//! The state owns the input buffer and the current [`CapturePhase`]; the set
//! of accepted identifiers is passed in read-only on every step.
//!
//! # Phases
//!
//! - `AwaitingInput`: collecting digits
//! - `Cleared`: a clear key emptied the buffer; behaves as `AwaitingInput`
//! - `CompleteValid`: four digits that match the identifier set
//! - `CompleteInvalid`: four digits that match nothing
//!
//! # Valid Transitions
//!
//! - AwaitingInput/Cleared → AwaitingInput (digit)
//! - AwaitingInput/Cleared → Cleared (`*` or `#`)
//! - AwaitingInput/Cleared → CompleteValid/CompleteInvalid (fourth digit)
//! - any → AwaitingInput (reset)
//!
//! # Examples
//!
//! ```
//! use helmgate_core::IdentifierSet;
//! use helmgate_gate::{CapturePhase, CaptureState, CaptureStep, CaptureVerdict};
//! use helmgate_hardware::KeypadInput;
//!
//! let identifiers = IdentifierSet::default();
//! let mut state = CaptureState::new();
//!
//! for digit in [0, 0, 0] {
//!     state.apply(KeypadInput::Digit(digit), &identifiers);
//! }
//! let step = state.apply(KeypadInput::Digit(2), &identifiers);
//!
//! assert!(matches!(
//!     step,
//!     CaptureStep::Appended { verdict: Some(CaptureVerdict::Valid(_)), .. }
//! ));
//! assert_eq!(state.phase(), CapturePhase::CompleteValid);
//! ```

use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

use helmgate_core::constants::IDENTIFIER_LENGTH;
use helmgate_core::{Identifier, IdentifierSet};
use helmgate_hardware::KeypadInput;
use serde::{Deserialize, Serialize};
use tokio::time::Instant;

/// Maximum number of phase changes kept for diagnostics.
///
/// A full attempt with one clear is about six changes, so this covers the
/// last few attempts.
const MAX_HISTORY_SIZE: usize = 32;

/// Phase of identifier capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapturePhase {
    #[default]
    AwaitingInput,
    Cleared,
    CompleteValid,
    CompleteInvalid,
}

impl CapturePhase {
    /// Whether capture has finished with four digits.
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::CompleteValid | Self::CompleteInvalid)
    }
}

impl fmt::Display for CapturePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phase_str = match self {
            CapturePhase::AwaitingInput => "AwaitingInput",
            CapturePhase::Cleared => "Cleared",
            CapturePhase::CompleteValid => "CompleteValid",
            CapturePhase::CompleteInvalid => "CompleteInvalid",
        };
        write!(f, "{}", phase_str)
    }
}

/// Result of validating a complete buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureVerdict {
    /// The buffer matched a member of the identifier set.
    Valid(Identifier),

    /// The buffer matched nothing; carries the rejected value.
    Invalid(String),
}

/// What a single key did to the capture state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureStep {
    /// A digit was appended. `verdict` is set once the buffer is full.
    Appended {
        buffer: String,
        verdict: Option<CaptureVerdict>,
    },

    /// A clear key emptied the buffer.
    Cleared,

    /// Capture is already complete; the key had no effect.
    Ignored,
}

/// A recorded phase change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseTransition {
    pub from: CapturePhase,
    pub to: CapturePhase,

    /// Not serialized; set to the deserialization time when read back.
    #[serde(skip, default = "Instant::now")]
    pub timestamp: Instant,
}

impl PhaseTransition {
    pub fn new(from: CapturePhase, to: CapturePhase) -> Self {
        Self {
            from,
            to,
            timestamp: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.timestamp.elapsed()
    }
}

/// Input buffer and phase of identifier capture.
///
/// Not shared: the gate owns one and threads it through each key.
#[derive(Debug, Clone)]
pub struct CaptureState {
    buffer: String,
    phase: CapturePhase,
    history: VecDeque<PhaseTransition>,
}

impl CaptureState {
    /// Empty buffer in `AwaitingInput`.
    pub fn new() -> Self {
        Self {
            buffer: String::with_capacity(IDENTIFIER_LENGTH),
            phase: CapturePhase::AwaitingInput,
            history: VecDeque::with_capacity(MAX_HISTORY_SIZE),
        }
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn phase(&self) -> CapturePhase {
        self.phase
    }

    /// Phase changes, oldest first.
    pub fn history(&self) -> &VecDeque<PhaseTransition> {
        &self.history
    }

    /// Get the last N transitions from history.
    pub fn last_transitions(&self, count: usize) -> Vec<PhaseTransition> {
        self.history.iter().rev().take(count).rev().cloned().collect()
    }

    /// Fold one key into the state.
    ///
    /// Digits append until the buffer holds four characters, at which point
    /// the buffer is checked against `identifiers`. Both clear keys empty the
    /// buffer. Once complete, keys are ignored until [`reset`](Self::reset).
    pub fn apply(&mut self, key: KeypadInput, identifiers: &IdentifierSet) -> CaptureStep {
        if self.phase.is_complete() {
            return CaptureStep::Ignored;
        }

        let digit = match key {
            KeypadInput::Star | KeypadInput::Hash => {
                self.buffer.clear();
                self.change_phase(CapturePhase::Cleared);
                return CaptureStep::Cleared;
            }
            KeypadInput::Digit(digit) => digit,
        };
        let Some(symbol) = char::from_digit(u32::from(digit), 10) else {
            return CaptureStep::Ignored;
        };

        self.buffer.push(symbol);
        if self.buffer.len() < IDENTIFIER_LENGTH {
            self.change_phase(CapturePhase::AwaitingInput);
            return CaptureStep::Appended {
                buffer: self.buffer.clone(),
                verdict: None,
            };
        }

        let verdict = match Identifier::new(&self.buffer) {
            Ok(identifier) if identifiers.contains(&identifier) => {
                self.change_phase(CapturePhase::CompleteValid);
                CaptureVerdict::Valid(identifier)
            }
            _ => {
                self.change_phase(CapturePhase::CompleteInvalid);
                CaptureVerdict::Invalid(self.buffer.clone())
            }
        };

        CaptureStep::Appended {
            buffer: self.buffer.clone(),
            verdict: Some(verdict),
        }
    }

    /// Empty the buffer and return to `AwaitingInput`.
    ///
    /// History is kept across resets.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.change_phase(CapturePhase::AwaitingInput);
    }

    fn change_phase(&mut self, to: CapturePhase) {
        if self.phase == to {
            return;
        }
        let transition = PhaseTransition::new(self.phase, to);
        self.phase = to;
        self.history.push_back(transition);
        if self.history.len() > MAX_HISTORY_SIZE {
            self.history.pop_front();
        }
    }
}

impl Default for CaptureState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn feed(state: &mut CaptureState, symbols: &str, identifiers: &IdentifierSet) -> CaptureStep {
        let mut last = CaptureStep::Ignored;
        for symbol in symbols.chars() {
            let key = KeypadInput::from_symbol(symbol).unwrap();
            last = state.apply(key, identifiers);
        }
        last
    }

    #[test]
    fn test_new_state_is_empty() {
        let state = CaptureState::new();
        assert_eq!(state.buffer(), "");
        assert_eq!(state.phase(), CapturePhase::AwaitingInput);
        assert!(state.history().is_empty());
    }

    #[test]
    fn test_digits_accumulate() {
        let identifiers = IdentifierSet::default();
        let mut state = CaptureState::new();

        let step = feed(&mut state, "12", &identifiers);

        assert_eq!(
            step,
            CaptureStep::Appended {
                buffer: "12".into(),
                verdict: None
            }
        );
        assert_eq!(state.phase(), CapturePhase::AwaitingInput);
    }

    #[rstest]
    #[case("0001")]
    #[case("0002")]
    #[case("0003")]
    #[case("0004")]
    fn test_member_is_valid(#[case] entry: &str) {
        let identifiers = IdentifierSet::default();
        let mut state = CaptureState::new();

        let step = feed(&mut state, entry, &identifiers);

        let expected = Identifier::new(entry).unwrap();
        assert_eq!(
            step,
            CaptureStep::Appended {
                buffer: entry.into(),
                verdict: Some(CaptureVerdict::Valid(expected))
            }
        );
        assert_eq!(state.phase(), CapturePhase::CompleteValid);
    }

    #[rstest]
    #[case("9999")]
    #[case("0000")]
    #[case("1000")]
    #[case("0010")]
    fn test_non_member_is_invalid(#[case] entry: &str) {
        let identifiers = IdentifierSet::default();
        let mut state = CaptureState::new();

        let step = feed(&mut state, entry, &identifiers);

        assert_eq!(
            step,
            CaptureStep::Appended {
                buffer: entry.into(),
                verdict: Some(CaptureVerdict::Invalid(entry.into()))
            }
        );
        assert_eq!(state.phase(), CapturePhase::CompleteInvalid);
    }

    #[rstest]
    #[case('*')]
    #[case('#')]
    fn test_clear_keys_reset_buffer(#[case] clear: char) {
        let identifiers = IdentifierSet::default();
        let mut state = CaptureState::new();

        feed(&mut state, "000", &identifiers);
        let step = state.apply(KeypadInput::from_symbol(clear).unwrap(), &identifiers);

        assert_eq!(step, CaptureStep::Cleared);
        assert_eq!(state.buffer(), "");
        assert_eq!(state.phase(), CapturePhase::Cleared);
    }

    #[test]
    fn test_no_carry_over_after_clear() {
        let identifiers = IdentifierSet::default();
        let mut state = CaptureState::new();

        // "000" then clear then "2": a carried-over prefix would make "0002".
        feed(&mut state, "000#2", &identifiers);

        assert_eq!(state.buffer(), "2");
        assert_eq!(state.phase(), CapturePhase::AwaitingInput);
    }

    #[test]
    fn test_keys_ignored_when_complete() {
        let identifiers = IdentifierSet::default();
        let mut state = CaptureState::new();

        feed(&mut state, "9999", &identifiers);

        assert_eq!(state.apply(KeypadInput::Digit(1), &identifiers), CaptureStep::Ignored);
        assert_eq!(state.apply(KeypadInput::Star, &identifiers), CaptureStep::Ignored);
        assert_eq!(state.buffer(), "9999");
    }

    #[test]
    fn test_reset_returns_to_awaiting_input() {
        let identifiers = IdentifierSet::default();
        let mut state = CaptureState::new();

        feed(&mut state, "0001", &identifiers);
        state.reset();

        assert_eq!(state.buffer(), "");
        assert_eq!(state.phase(), CapturePhase::AwaitingInput);
    }

    #[test]
    fn test_history_records_phase_changes_only() {
        let identifiers = IdentifierSet::default();
        let mut state = CaptureState::new();

        feed(&mut state, "12*0001", &identifiers);

        let phases: Vec<_> = state.history().iter().map(|t| (t.from, t.to)).collect();
        assert_eq!(
            phases,
            vec![
                (CapturePhase::AwaitingInput, CapturePhase::Cleared),
                (CapturePhase::Cleared, CapturePhase::AwaitingInput),
                (CapturePhase::AwaitingInput, CapturePhase::CompleteValid),
            ]
        );
    }

    #[test]
    fn test_history_is_bounded() {
        let identifiers = IdentifierSet::default();
        let mut state = CaptureState::new();

        for _ in 0..40 {
            feed(&mut state, "1*", &identifiers);
        }

        assert_eq!(state.history().len(), MAX_HISTORY_SIZE);
        assert_eq!(state.last_transitions(1)[0].to, CapturePhase::Cleared);
    }

    #[test]
    fn test_custom_identifier_set() {
        let identifiers = IdentifierSet::parse(["4321"]).unwrap();
        let mut state = CaptureState::new();

        feed(&mut state, "0001", &identifiers);
        assert_eq!(state.phase(), CapturePhase::CompleteInvalid);

        state.reset();
        feed(&mut state, "4321", &identifiers);
        assert_eq!(state.phase(), CapturePhase::CompleteValid);
    }

    #[test]
    fn test_phase_display_formatting() {
        assert_eq!(CapturePhase::AwaitingInput.to_string(), "AwaitingInput");
        assert_eq!(CapturePhase::CompleteInvalid.to_string(), "CompleteInvalid");
    }

    #[test]
    fn test_phase_serialization() {
        let json = serde_json::to_string(&CapturePhase::CompleteValid).unwrap();
        assert_eq!(json, "\"complete_valid\"");
    }
}
