//! Mock status display that records every rendered message.

use super::lock;
use crate::{HardwareError, Result, traits::StatusDisplay};
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct DisplayState {
    rendered: Vec<String>,
    initialized: bool,
    fail_init: bool,
}

/// Mock display.
///
/// # Examples
///
/// ```
/// use helmgate_hardware::mock::MockDisplay;
/// use helmgate_hardware::traits::StatusDisplay;
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() -> helmgate_hardware::Result<()> {
///     let (mut display, handle) = MockDisplay::new();
///
///     display.init().await?;
///     display.render("Sleeping").await?;
///
///     assert_eq!(handle.current().as_deref(), Some("Sleeping"));
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct MockDisplay {
    state: Arc<Mutex<DisplayState>>,
}

impl MockDisplay {
    /// Create a working mock display.
    pub fn new() -> (Self, MockDisplayHandle) {
        let state = Arc::new(Mutex::new(DisplayState::default()));
        (
            Self {
                state: Arc::clone(&state),
            },
            MockDisplayHandle { state },
        )
    }

    /// Create a mock display whose initialization always fails.
    pub fn failing() -> (Self, MockDisplayHandle) {
        let (display, handle) = Self::new();
        lock(&display.state).fail_init = true;
        (display, handle)
    }
}

impl StatusDisplay for MockDisplay {
    async fn init(&mut self) -> Result<()> {
        let mut state = lock(&self.state);
        if state.fail_init {
            return Err(HardwareError::initialization_failed(
                "Display did not acknowledge",
            ));
        }
        state.initialized = true;
        Ok(())
    }

    async fn render(&mut self, text: &str) -> Result<()> {
        let mut state = lock(&self.state);
        if !state.initialized {
            return Err(HardwareError::communication("Display not initialized"));
        }
        state.rendered.push(text.to_string());
        Ok(())
    }
}

/// Handle for inspecting a mock display.
#[derive(Debug, Clone)]
pub struct MockDisplayHandle {
    state: Arc<Mutex<DisplayState>>,
}

impl MockDisplayHandle {
    /// Message currently shown.
    pub fn current(&self) -> Option<String> {
        lock(&self.state).rendered.last().cloned()
    }

    /// Every message rendered, oldest first.
    pub fn rendered(&self) -> Vec<String> {
        lock(&self.state).rendered.clone()
    }

    /// Whether `init` succeeded.
    pub fn is_initialized(&self) -> bool {
        lock(&self.state).initialized
    }

    /// Forget rendered messages, keeping the initialization state.
    pub fn clear_history(&self) {
        lock(&self.state).rendered.clear();
    }
}
