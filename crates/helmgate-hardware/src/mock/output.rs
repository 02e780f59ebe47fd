//! Mock digital output for testing relay behaviour.
//!
//! Every level change is recorded with the tokio clock, so tests running on a
//! paused runtime can assert exact engagement durations.

use super::lock;
use crate::{HardwareError, Result, traits::DigitalOutput, types::SignalLevel};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Default)]
struct OutputState {
    history: Vec<(Instant, SignalLevel)>,
    failing: bool,
}

/// Mock output pin.
///
/// # Examples
///
/// ```
/// use helmgate_hardware::mock::MockOutputPin;
/// use helmgate_hardware::traits::DigitalOutput;
/// use helmgate_hardware::types::SignalLevel;
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() -> helmgate_hardware::Result<()> {
///     let (mut pin, handle) = MockOutputPin::new();
///
///     pin.set_level(SignalLevel::Low).await?;
///     assert_eq!(handle.level(), Some(SignalLevel::Low));
///
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct MockOutputPin {
    state: Arc<Mutex<OutputState>>,
}

impl MockOutputPin {
    /// Create a new mock pin that has never been driven.
    pub fn new() -> (Self, MockOutputHandle) {
        let state = Arc::new(Mutex::new(OutputState::default()));
        (
            Self {
                state: Arc::clone(&state),
            },
            MockOutputHandle { state },
        )
    }
}

impl DigitalOutput for MockOutputPin {
    async fn set_level(&mut self, level: SignalLevel) -> Result<()> {
        let mut state = lock(&self.state);
        if state.failing {
            return Err(HardwareError::communication("Output pin write failed"));
        }
        state.history.push((Instant::now(), level));
        Ok(())
    }
}

/// Handle for inspecting a mock output pin.
#[derive(Debug, Clone)]
pub struct MockOutputHandle {
    state: Arc<Mutex<OutputState>>,
}

impl MockOutputHandle {
    /// Last level driven, `None` if the pin was never written.
    pub fn level(&self) -> Option<SignalLevel> {
        lock(&self.state).history.last().map(|(_, level)| *level)
    }

    /// Every level written, oldest first.
    pub fn levels(&self) -> Vec<SignalLevel> {
        lock(&self.state)
            .history
            .iter()
            .map(|(_, level)| *level)
            .collect()
    }

    /// Every write with its timestamp, oldest first.
    pub fn history(&self) -> Vec<(Instant, SignalLevel)> {
        lock(&self.state).history.clone()
    }

    /// Whether `level` was ever written.
    pub fn was_driven(&self, level: SignalLevel) -> bool {
        lock(&self.state).history.iter().any(|(_, l)| *l == level)
    }

    /// Durations of every interval spent at `level`, closed by a write of a
    /// different level. An interval still open is not reported.
    pub fn intervals_at(&self, level: SignalLevel) -> Vec<Duration> {
        let state = lock(&self.state);
        let mut intervals = Vec::new();
        let mut entered: Option<Instant> = None;

        for (at, l) in &state.history {
            match (entered, *l == level) {
                (None, true) => entered = Some(*at),
                (Some(start), false) => {
                    intervals.push(at.duration_since(start));
                    entered = None;
                }
                _ => {}
            }
        }

        intervals
    }

    /// Make subsequent writes fail.
    pub fn set_failing(&self, failing: bool) {
        lock(&self.state).failing = failing;
    }
}
