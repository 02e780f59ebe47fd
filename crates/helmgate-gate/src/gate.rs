//! The access-control gate.
//!
//! [`Gate`] owns every peripheral and drives the cycle:
//!
//! 1. arm the motion wake source, show "Sleeping", settle, suspend
//! 2. on resume, read the motion sensor; a clear reading is a spurious wake
//! 3. capture four digits from the keypad and check them against the
//!    identifier set
//! 4. for a known identifier, ask the verification host and act on its byte
//! 5. cool down and start over
//!
//! Errors inside a cycle never escape it. They are logged, the relay is
//! forced released and the cycle ends as [`CycleOutcome::Faulted`].

use std::convert::Infallible;

use helmgate_core::constants::{
    DIAG_ID_OK, DIAG_INVALID_ID_PREFIX, DIAG_MOTION_DETECTED, MSG_ACCESS_DENIED,
    MSG_ACCESS_GRANTED, MSG_CHECKING, MSG_CLEARED, MSG_HELMET_MISSING, MSG_ID_PREFIX,
    MSG_INVALID_ID, MSG_PC_TIMEOUT, MSG_SLEEPING,
};
use helmgate_core::{VerificationOutcome, VerificationResult};
use helmgate_hardware::{
    ActuatorState, DigitalOutput, KeypadDevice, MotionSensor, PowerController, Relay,
    StatusDisplay, VerificationLink,
};
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use crate::config::GateConfig;
use crate::error::{GateError, Result};
use crate::outcome::{CycleOutcome, GateStats};
use crate::poll::{PollOutcome, PollWindow};
use crate::state_machine::{CaptureState, CaptureStep, CaptureVerdict};

/// The peripherals a gate is assembled from.
#[derive(Debug)]
pub struct Peripherals<D, K, M, O, L, P> {
    pub display: D,
    pub keypad: K,
    pub motion: M,
    /// Control line of the lock relay.
    pub relay_output: O,
    pub link: L,
    pub power: P,
}

/// Access-control gate over a set of peripherals.
///
/// # Examples
///
/// ```
/// use helmgate_gate::{CycleOutcome, Gate, GateConfig, Peripherals};
/// use helmgate_hardware::mock::{
///     MockDisplay, MockKeypad, MockLink, MockMotionSensor, MockOutputPin,
///     MockPowerController,
/// };
///
/// # #[tokio::main(flavor = "current_thread", start_paused = true)]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let (display, _display) = MockDisplay::new();
/// let (keypad, keys) = MockKeypad::new();
/// let (motion, motion_handle) = MockMotionSensor::new();
/// let (relay_output, _relay) = MockOutputPin::new();
/// let (link, _link) = MockLink::with_responder(Box::new(|line: &str| {
///     (line == "ID_OK").then(|| b"1\n".to_vec())
/// }));
/// let (power, power_handle) = MockPowerController::new();
///
/// let peripherals = Peripherals { display, keypad, motion, relay_output, link, power };
/// let mut gate = Gate::start(GateConfig::default(), peripherals).await?;
///
/// motion_handle.set_present(true);
/// power_handle.wake()?;
/// keys.send_symbols("0002").await?;
///
/// assert_eq!(gate.run_cycle().await, CycleOutcome::Granted);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Gate<D, K, M, O, L, P> {
    config: GateConfig,
    display: D,
    keypad: K,
    motion: M,
    relay: Relay<O>,
    link: L,
    power: P,
    capture: CaptureState,
    stats: GateStats,
    last_outcome: Option<CycleOutcome>,
}

impl<D, K, M, O, L, P> Gate<D, K, M, O, L, P>
where
    D: StatusDisplay,
    K: KeypadDevice,
    M: MotionSensor,
    O: DigitalOutput,
    L: VerificationLink,
    P: PowerController,
{
    /// Validate the configuration, bring up the display and release the relay.
    ///
    /// # Errors
    ///
    /// - `GateError::Config` if the configuration is rejected
    /// - `GateError::DisplayInit` if the display does not initialise; the gate
    ///   must not run without status feedback
    /// - `GateError::Hardware` if the relay line cannot be driven
    pub async fn start(config: GateConfig, peripherals: Peripherals<D, K, M, O, L, P>) -> Result<Self> {
        config.validate()?;

        let Peripherals {
            mut display,
            keypad,
            motion,
            relay_output,
            link,
            power,
        } = peripherals;

        if let Err(e) = display.init().await {
            error!("Display initialization failed, gate halted: {}", e);
            return Err(GateError::DisplayInit(e));
        }

        let relay = Relay::new(relay_output, config.relay_polarity).await?;

        info!(
            "Gate started: {} identifiers, relay {:?}, verification window {:?}",
            config.identifiers.len(),
            config.relay_polarity,
            config.verification_window
        );

        Ok(Self {
            config,
            display,
            keypad,
            motion,
            relay,
            link,
            power,
            capture: CaptureState::new(),
            stats: GateStats::default(),
            last_outcome: None,
        })
    }

    /// Run cycles forever.
    pub async fn run(&mut self) -> Infallible {
        loop {
            self.run_cycle().await;
        }
    }

    /// Run one pass of the cycle: sleep, wake, authenticate, cool down.
    ///
    /// A spurious wake returns immediately; every other outcome, faults
    /// included, is followed by the cooldown.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        let outcome = match self.try_cycle().await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Cycle aborted: {}", e);
                self.recover().await;
                CycleOutcome::Faulted {
                    error: e.to_string(),
                }
            }
        };

        self.capture.reset();
        self.stats.record(&outcome);
        info!("Cycle {} ended: {}", self.stats.cycles, outcome);

        if outcome.is_attempt() {
            sleep(self.config.cooldown).await;
        }

        self.last_outcome = Some(outcome.clone());
        outcome
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    pub fn stats(&self) -> GateStats {
        self.stats
    }

    pub fn last_outcome(&self) -> Option<&CycleOutcome> {
        self.last_outcome.as_ref()
    }

    pub fn relay_state(&self) -> ActuatorState {
        self.relay.state()
    }

    /// Capture state, with its phase history.
    pub fn capture(&self) -> &CaptureState {
        &self.capture
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    async fn try_cycle(&mut self) -> Result<CycleOutcome> {
        self.sleep_until_woken().await?;

        if !self.motion.is_motion_present().await? {
            debug!("Woke without motion");
            return Ok(CycleOutcome::SpuriousWake);
        }
        self.diagnostic(DIAG_MOTION_DETECTED).await?;

        match self.capture_identifier().await? {
            CaptureVerdict::Valid(identifier) => {
                debug!("Identifier {} accepted", identifier);
                self.diagnostic(DIAG_ID_OK).await?;
                self.verify().await
            }
            CaptureVerdict::Invalid(value) => {
                self.display.render(MSG_INVALID_ID).await?;
                self.diagnostic(&format!("{}{}", DIAG_INVALID_ID_PREFIX, value))
                    .await?;
                sleep(self.config.invalid_hold).await;
                Ok(CycleOutcome::Invalid { value })
            }
        }
    }

    async fn sleep_until_woken(&mut self) -> Result<()> {
        self.power.enable_wake(self.config.wake_trigger).await?;
        self.display.render(MSG_SLEEPING).await?;
        sleep(self.config.sleep_settle).await;

        debug!("Suspending until {:?}", self.config.wake_trigger);
        self.power.suspend().await?;
        debug!("Resumed");
        Ok(())
    }

    /// Poll the keypad until four digits are in. No deadline.
    async fn capture_identifier(&mut self) -> Result<CaptureVerdict> {
        let window = PollWindow::unbounded(self.config.key_poll_interval);

        loop {
            let reading = self.keypad.poll_key().await?;
            let PollOutcome::Ready(key) = window.check(reading) else {
                window.backoff().await;
                continue;
            };

            debug!("Key {}", key.symbol());
            match self.capture.apply(key, &self.config.identifiers) {
                CaptureStep::Appended { buffer, verdict } => {
                    self.display
                        .render(&format!("{}{}", MSG_ID_PREFIX, buffer))
                        .await?;
                    if let Some(verdict) = verdict {
                        debug!("Capture complete: {}", self.capture.phase());
                        return Ok(verdict);
                    }
                }
                CaptureStep::Cleared => self.display.render(MSG_CLEARED).await?,
                CaptureStep::Ignored => {}
            }
        }
    }

    /// Wait for the host's answer and act on it.
    async fn verify(&mut self) -> Result<CycleOutcome> {
        self.display.render(MSG_CHECKING).await?;
        let window = PollWindow::new(
            self.config.verification_window,
            self.config.link_poll_interval,
        );

        let outcome = match self.poll_link(&window).await? {
            Some(byte) => {
                // Terminator: read and dropped without inspection.
                if self.poll_link(&window).await?.is_none() {
                    debug!("Window closed before the response terminator");
                }
                VerificationOutcome::Answered(VerificationResult::from_byte(byte))
            }
            None => VerificationOutcome::TimedOut,
        };

        match outcome {
            VerificationOutcome::Answered(VerificationResult::Granted) => {
                info!("Verification host granted access");
                self.display.render(MSG_ACCESS_GRANTED).await?;
                self.relay.engage().await?;
                sleep(self.config.grant_hold).await;
                self.relay.release().await?;
                Ok(CycleOutcome::Granted)
            }
            VerificationOutcome::Answered(VerificationResult::Denied { byte }) => {
                info!("Verification host denied access ({:#04x})", byte);
                self.display.render(MSG_HELMET_MISSING).await?;
                sleep(self.config.denial_hold).await;
                self.display.render(MSG_ACCESS_DENIED).await?;
                Ok(CycleOutcome::Denied { byte })
            }
            VerificationOutcome::TimedOut => {
                warn!(
                    "Verification host silent for {:?}",
                    self.config.verification_window
                );
                self.display.render(MSG_PC_TIMEOUT).await?;
                sleep(self.config.timeout_hold).await;
                Ok(CycleOutcome::TimedOut)
            }
        }
    }

    async fn poll_link(&mut self, window: &PollWindow) -> Result<Option<u8>> {
        loop {
            let reading = self.link.try_read_byte().await?;
            match window.check(reading) {
                PollOutcome::Ready(byte) => return Ok(Some(byte)),
                PollOutcome::Pending => window.backoff().await,
                PollOutcome::DeadlineExceeded => return Ok(None),
            }
        }
    }

    /// Send a diagnostic line to the host and log it.
    async fn diagnostic(&mut self, line: &str) -> Result<()> {
        info!(target: "helmgate::diag", "{}", line);
        self.link.send_line(line).await?;
        Ok(())
    }

    async fn recover(&mut self) {
        if let Err(e) = self.relay.release().await {
            warn!("Could not release relay after fault: {}", e);
        }
    }
}
