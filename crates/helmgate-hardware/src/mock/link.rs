//! Mock verification link.
//!
//! Outgoing lines are recorded; incoming bytes are queued through the handle
//! or produced by an optional [`Responder`] reacting to outgoing lines.

use super::lock;
use crate::{HardwareError, Result, traits::VerificationLink};
use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex};

/// Produces reply bytes for an outgoing line, e.g. answer `ID_OK` with `b"1\n"`.
pub type Responder = Box<dyn FnMut(&str) -> Option<Vec<u8>> + Send>;

#[derive(Debug, Default)]
struct LinkState {
    sent: Vec<String>,
    inbound: VecDeque<u8>,
    bytes_read: usize,
    closed: bool,
}

/// Mock verification link.
///
/// # Examples
///
/// ```
/// use helmgate_hardware::mock::MockLink;
/// use helmgate_hardware::traits::VerificationLink;
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() -> helmgate_hardware::Result<()> {
///     let (mut link, handle) = MockLink::new();
///
///     link.send_line("ID_OK").await?;
///     handle.push_bytes(b"1\n");
///
///     assert_eq!(handle.sent(), vec!["ID_OK"]);
///     assert_eq!(link.try_read_byte().await?, Some(b'1'));
///     assert_eq!(link.try_read_byte().await?, Some(b'\n'));
///     assert_eq!(link.try_read_byte().await?, None);
///     Ok(())
/// }
/// ```
pub struct MockLink {
    state: Arc<Mutex<LinkState>>,
    responder: Option<Responder>,
}

impl MockLink {
    /// Create a silent link: nothing arrives unless pushed through the handle.
    pub fn new() -> (Self, MockLinkHandle) {
        let state = Arc::new(Mutex::new(LinkState::default()));
        (
            Self {
                state: Arc::clone(&state),
                responder: None,
            },
            MockLinkHandle { state },
        )
    }

    /// Create a link that answers outgoing lines through `responder`.
    ///
    /// # Examples
    ///
    /// ```
    /// use helmgate_hardware::mock::MockLink;
    ///
    /// let (link, handle) = MockLink::with_responder(Box::new(|line: &str| {
    ///     (line == "ID_OK").then(|| b"1\n".to_vec())
    /// }));
    /// ```
    pub fn with_responder(responder: Responder) -> (Self, MockLinkHandle) {
        let (mut link, handle) = Self::new();
        link.responder = Some(responder);
        (link, handle)
    }
}

impl fmt::Debug for MockLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockLink")
            .field("state", &self.state)
            .field("has_responder", &self.responder.is_some())
            .finish()
    }
}

impl VerificationLink for MockLink {
    async fn send_line(&mut self, line: &str) -> Result<()> {
        let reply = self.responder.as_mut().and_then(|respond| respond(line));

        let mut state = lock(&self.state);
        if state.closed {
            return Err(HardwareError::disconnected("Verification link closed"));
        }
        state.sent.push(line.to_string());
        if let Some(bytes) = reply {
            state.inbound.extend(bytes);
        }
        Ok(())
    }

    async fn try_read_byte(&mut self) -> Result<Option<u8>> {
        let mut state = lock(&self.state);
        if state.closed {
            return Err(HardwareError::disconnected("Verification link closed"));
        }
        let byte = state.inbound.pop_front();
        if byte.is_some() {
            state.bytes_read += 1;
        }
        Ok(byte)
    }
}

/// Handle for driving and inspecting a mock link.
#[derive(Debug, Clone)]
pub struct MockLinkHandle {
    state: Arc<Mutex<LinkState>>,
}

impl MockLinkHandle {
    /// Queue bytes as if the host had sent them.
    pub fn push_bytes(&self, bytes: &[u8]) {
        lock(&self.state).inbound.extend(bytes.iter().copied());
    }

    /// Lines written by the gate, oldest first.
    pub fn sent(&self) -> Vec<String> {
        lock(&self.state).sent.clone()
    }

    /// Bytes queued but not yet read by the gate.
    pub fn pending(&self) -> usize {
        lock(&self.state).inbound.len()
    }

    /// Total bytes the gate has read.
    pub fn bytes_read(&self) -> usize {
        lock(&self.state).bytes_read
    }

    /// Make every further operation fail as disconnected.
    pub fn close(&self) {
        lock(&self.state).closed = true;
    }
}
