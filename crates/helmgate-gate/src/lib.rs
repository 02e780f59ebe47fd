//! Access-control core of the helmgate.
//!
//! This crate holds the sleep/wake/authenticate/actuate cycle. [`Gate`] is
//! generic over the peripheral traits from `helmgate-hardware`, so the same
//! code drives real devices, the desktop emulator and the mocks used in tests.

pub mod config;
pub mod display;
pub mod error;
pub mod gate;
pub mod outcome;
pub mod poll;
pub mod state_machine;

pub use config::GateConfig;
pub use display::{Alignment, VirtualDisplay, VirtualDisplayBuilder, align_text, truncate_text};
pub use error::{GateError, Result};
pub use gate::{Gate, Peripherals};
pub use outcome::{CycleOutcome, GateStats};
pub use poll::{PollOutcome, PollWindow};
pub use state_machine::{CapturePhase, CaptureState, CaptureStep, CaptureVerdict, PhaseTransition};
