//! Mock keypad implementation for testing and development.
//!
//! This module provides a simulated keypad device that can be controlled
//! programmatically for testing without requiring physical hardware.

use crate::{
    HardwareError, Result,
    traits::{KeypadDevice, KeypadInput},
};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;

/// Mock keypad device for testing and development.
///
/// This device simulates a matrix keypad by receiving key presses through
/// an internal channel. Each poll yields at most one queued key. Tests and
/// applications queue key presses using a `MockKeypadHandle`.
///
/// # Examples
///
/// ```
/// use helmgate_hardware::mock::MockKeypad;
/// use helmgate_hardware::traits::{KeypadDevice, KeypadInput};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() -> helmgate_hardware::Result<()> {
///     let (mut keypad, handle) = MockKeypad::new();
///
///     assert_eq!(keypad.poll_key().await?, None);
///
///     handle.send_input(KeypadInput::Digit(1)).await?;
///     handle.send_input(KeypadInput::Star).await?;
///
///     assert_eq!(keypad.poll_key().await?, Some(KeypadInput::Digit(1)));
///     assert_eq!(keypad.poll_key().await?, Some(KeypadInput::Star));
///     assert_eq!(keypad.poll_key().await?, None);
///
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct MockKeypad {
    /// Channel receiver for simulated key presses
    input_rx: mpsc::Receiver<KeypadInput>,
}

impl MockKeypad {
    /// Create a new mock keypad.
    ///
    /// Returns a tuple of (MockKeypad, MockKeypadHandle) where the handle
    /// can be used to simulate key presses.
    pub fn new() -> (Self, MockKeypadHandle) {
        let (input_tx, input_rx) = mpsc::channel(32);
        (Self { input_rx }, MockKeypadHandle { input_tx })
    }
}

impl Default for MockKeypad {
    fn default() -> Self {
        Self::new().0
    }
}

impl KeypadDevice for MockKeypad {
    async fn poll_key(&mut self) -> Result<Option<KeypadInput>> {
        match self.input_rx.try_recv() {
            Ok(input) => Ok(Some(input)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => {
                Err(HardwareError::disconnected("Keypad input channel closed"))
            }
        }
    }
}

/// Handle for controlling a mock keypad.
///
/// This handle allows programmatic control of the mock keypad by queueing
/// key presses. It can be cloned and shared across tasks. Dropping every
/// handle makes further polls fail with a disconnection once the queue is
/// drained.
#[derive(Debug, Clone)]
pub struct MockKeypadHandle {
    /// Channel sender for simulated key presses
    input_tx: mpsc::Sender<KeypadInput>,
}

impl MockKeypadHandle {
    /// Queue a key press.
    ///
    /// # Errors
    ///
    /// Returns an error if the keypad has been dropped and the channel is closed.
    pub async fn send_input(&self, input: KeypadInput) -> Result<()> {
        self.input_tx
            .send(input)
            .await
            .map_err(|_| HardwareError::disconnected("Keypad input channel closed"))
    }

    /// Queue a sequence of digit presses.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Any digit is greater than 9
    /// - The keypad has been dropped and the channel is closed
    ///
    /// # Examples
    ///
    /// ```
    /// use helmgate_hardware::mock::MockKeypad;
    ///
    /// #[tokio::main(flavor = "current_thread")]
    /// async fn main() -> helmgate_hardware::Result<()> {
    ///     let (_keypad, handle) = MockKeypad::new();
    ///
    ///     // Enter identifier "0002"
    ///     handle.send_digits(&[0, 0, 0, 2]).await?;
    ///
    ///     Ok(())
    /// }
    /// ```
    pub async fn send_digits(&self, digits: &[u8]) -> Result<()> {
        for &digit in digits {
            let input = KeypadInput::digit(digit)?;
            self.send_input(input).await?;
        }
        Ok(())
    }

    /// Queue key presses given as key cap symbols, e.g. `"12*0002"`.
    ///
    /// # Errors
    ///
    /// Returns an error if a symbol is not on the keypad or the channel is closed.
    pub async fn send_symbols(&self, symbols: &str) -> Result<()> {
        for symbol in symbols.chars() {
            self.send_input(KeypadInput::from_symbol(symbol)?).await?;
        }
        Ok(())
    }
}
