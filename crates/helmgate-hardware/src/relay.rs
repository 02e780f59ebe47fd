//! Lock relay with polarity translation.
//!
//! The relay board on the gate is active-low: pulling the control line low
//! energises the lock. [`Relay`] hides that behind [`ActuatorState`] so the
//! access-control core only ever asks to engage or release.

use crate::error::Result;
use crate::traits::DigitalOutput;
use crate::types::{ActuatorState, Polarity};

/// A lock relay driven through a [`DigitalOutput`].
#[derive(Debug)]
pub struct Relay<O> {
    output: O,
    polarity: Polarity,
    state: ActuatorState,
}

impl<O: DigitalOutput> Relay<O> {
    /// Wrap `output` and immediately drive it to the released level.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be driven.
    pub async fn new(output: O, polarity: Polarity) -> Result<Self> {
        let mut relay = Self {
            output,
            polarity,
            state: ActuatorState::Released,
        };
        relay.set(ActuatorState::Released).await?;
        Ok(relay)
    }

    /// Energise the lock.
    pub async fn engage(&mut self) -> Result<()> {
        self.set(ActuatorState::Engaged).await
    }

    /// Return the lock to rest.
    pub async fn release(&mut self) -> Result<()> {
        self.set(ActuatorState::Released).await
    }

    /// Drive the relay to `state`.
    ///
    /// The cached state only changes once the output accepted the level.
    pub async fn set(&mut self, state: ActuatorState) -> Result<()> {
        self.output.set_level(self.polarity.level_for(state)).await?;
        self.state = state;
        Ok(())
    }

    /// Last state successfully driven.
    pub fn state(&self) -> ActuatorState {
        self.state
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Access the underlying output.
    pub fn output(&self) -> &O {
        &self.output
    }
}
