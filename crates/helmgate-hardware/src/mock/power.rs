//! Mock power controller.
//!
//! `suspend` parks until the handle delivers a wake event. Each
//! [`MockPowerHandle::wake`] releases exactly one suspension, whatever the
//! motion sensor reads, so tests can produce spurious wakes.

use super::lock;
use crate::{
    HardwareError, Result,
    traits::PowerController,
    types::WakeTrigger,
};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

#[derive(Debug, Default)]
struct PowerState {
    trigger: Option<WakeTrigger>,
    suspensions: u32,
    suspended: bool,
}

/// Mock power controller.
#[derive(Debug)]
pub struct MockPowerController {
    wake_rx: mpsc::UnboundedReceiver<()>,
    state: Arc<Mutex<PowerState>>,
}

impl MockPowerController {
    pub fn new() -> (Self, MockPowerHandle) {
        let (wake_tx, wake_rx) = mpsc::unbounded_channel();
        let state = Arc::new(Mutex::new(PowerState::default()));
        (
            Self {
                wake_rx,
                state: Arc::clone(&state),
            },
            MockPowerHandle { wake_tx, state },
        )
    }
}

impl PowerController for MockPowerController {
    async fn enable_wake(&mut self, trigger: WakeTrigger) -> Result<()> {
        lock(&self.state).trigger = Some(trigger);
        Ok(())
    }

    async fn suspend(&mut self) -> Result<()> {
        {
            let mut state = lock(&self.state);
            if state.trigger.is_none() {
                return Err(HardwareError::communication(
                    "Suspend requested without a wake source",
                ));
            }
            state.suspensions += 1;
            state.suspended = true;
        }

        let woke = self.wake_rx.recv().await;
        lock(&self.state).suspended = false;

        woke.ok_or_else(|| HardwareError::disconnected("Wake source channel closed"))
    }
}

/// Handle for waking a mock power controller.
#[derive(Debug, Clone)]
pub struct MockPowerHandle {
    wake_tx: mpsc::UnboundedSender<()>,
    state: Arc<Mutex<PowerState>>,
}

impl MockPowerHandle {
    /// Deliver one wake event.
    ///
    /// # Errors
    ///
    /// Returns an error if the controller has been dropped.
    pub fn wake(&self) -> Result<()> {
        self.wake_tx
            .send(())
            .map_err(|_| HardwareError::disconnected("Power controller dropped"))
    }

    /// Trigger registered by the last `enable_wake` call.
    pub fn trigger(&self) -> Option<WakeTrigger> {
        lock(&self.state).trigger
    }

    /// Number of times the controller entered suspension.
    pub fn suspension_count(&self) -> u32 {
        lock(&self.state).suspensions
    }

    /// Whether the controller is suspended right now.
    pub fn is_suspended(&self) -> bool {
        lock(&self.state).suspended
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SignalLevel;

    #[tokio::test]
    async fn test_suspend_requires_wake_source() {
        let (mut power, _handle) = MockPowerController::new();
        assert!(power.suspend().await.is_err());
    }

    #[tokio::test]
    async fn test_each_wake_releases_one_suspension() {
        let (mut power, handle) = MockPowerController::new();
        power
            .enable_wake(WakeTrigger::level(SignalLevel::High))
            .await
            .unwrap();

        handle.wake().unwrap();
        handle.wake().unwrap();
        power.suspend().await.unwrap();
        power.suspend().await.unwrap();

        assert_eq!(handle.suspension_count(), 2);
        assert!(!handle.is_suspended());
        assert_eq!(handle.trigger(), Some(WakeTrigger::level(SignalLevel::High)));
    }

    #[tokio::test]
    async fn test_suspend_fails_when_handle_dropped() {
        let (mut power, handle) = MockPowerController::new();
        power.enable_wake(WakeTrigger::default()).await.unwrap();
        drop(handle);

        assert!(power.suspend().await.is_err());
    }
}
