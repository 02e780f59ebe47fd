//! Poll-with-deadline primitive.
//!
//! The keypad and the verification link are both polled sources that answer
//! "nothing yet" as `None`. [`PollWindow`] keeps the waiting policy apart from
//! the source: it classifies each poll as [`PollOutcome::Ready`],
//! [`PollOutcome::Pending`] or [`PollOutcome::DeadlineExceeded`] and sleeps one
//! interval between polls.
//!
//! Time is read from the tokio clock, so a runtime started with
//! `start_paused = true` drives every window deterministically.
//!
//! # Examples
//!
//! ```
//! use helmgate_gate::poll::{PollOutcome, PollWindow};
//! use std::time::Duration;
//!
//! # #[tokio::main(flavor = "current_thread", start_paused = true)]
//! # async fn main() {
//! let mut window = PollWindow::new(Duration::from_millis(50), Duration::from_millis(10));
//! let mut polls = 0;
//!
//! let outcome = loop {
//!     polls += 1;
//!     let reading = (polls == 3).then_some(42);
//!     match window.check(reading) {
//!         PollOutcome::Pending => window.backoff().await,
//!         done => break done,
//!     }
//! };
//!
//! assert_eq!(outcome, PollOutcome::Ready(42));
//! # }
//! ```

use std::time::Duration;

use tokio::time::{Instant, sleep};

/// Classification of a single poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome<T> {
    /// The source produced a value.
    Ready(T),

    /// Nothing yet and the window is still open.
    Pending,

    /// Nothing yet and the window has closed.
    DeadlineExceeded,
}

impl<T> PollOutcome<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// The ready value, if any.
    pub fn ready(self) -> Option<T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Pending | Self::DeadlineExceeded => None,
        }
    }
}

/// A deadline plus the interval between polls.
#[derive(Debug, Clone, Copy)]
pub struct PollWindow {
    deadline: Option<Instant>,
    interval: Duration,
}

impl PollWindow {
    /// Open a window that closes `window` from now.
    pub fn new(window: Duration, interval: Duration) -> Self {
        Self {
            deadline: Some(Instant::now() + window),
            interval,
        }
    }

    /// Open a window that never closes.
    pub fn unbounded(interval: Duration) -> Self {
        Self {
            deadline: None,
            interval,
        }
    }

    /// Classify one poll result.
    ///
    /// A value that arrives is `Ready` even when the deadline has just passed.
    pub fn check<T>(&self, reading: Option<T>) -> PollOutcome<T> {
        match reading {
            Some(value) => PollOutcome::Ready(value),
            None if self.is_expired() => PollOutcome::DeadlineExceeded,
            None => PollOutcome::Pending,
        }
    }

    /// Sleep one poll interval, never past the deadline.
    pub async fn backoff(&self) {
        let pause = match self.remaining() {
            Some(remaining) => self.interval.min(remaining),
            None => self.interval,
        };
        sleep(pause).await;
    }

    pub fn is_expired(&self) -> bool {
        self.deadline
            .is_some_and(|deadline| Instant::now() >= deadline)
    }

    /// Time left before the deadline; `None` for an unbounded window.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}
