//! Shared rig for gate integration tests.
//!
//! A [`Rig`] is a gate wired to mock peripherals plus the handle for each of
//! them. Tests queue a visitor (motion, wake, keys) and then run cycles on the
//! paused tokio clock.

#![allow(dead_code)]

use helmgate_gate::{Gate, GateConfig, Peripherals};
use helmgate_hardware::mock::{
    MockDisplay, MockDisplayHandle, MockKeypad, MockKeypadHandle, MockLink, MockLinkHandle,
    MockMotionHandle, MockMotionSensor, MockOutputHandle, MockOutputPin, MockPowerController,
    MockPowerHandle,
};

pub type MockGate =
    Gate<MockDisplay, MockKeypad, MockMotionSensor, MockOutputPin, MockLink, MockPowerController>;

pub type MockPeripherals = Peripherals<
    MockDisplay,
    MockKeypad,
    MockMotionSensor,
    MockOutputPin,
    MockLink,
    MockPowerController,
>;

pub struct Rig {
    pub gate: MockGate,
    pub display: MockDisplayHandle,
    pub keys: MockKeypadHandle,
    pub motion: MockMotionHandle,
    pub relay: MockOutputHandle,
    pub link: MockLinkHandle,
    pub power: MockPowerHandle,
}

/// Handles for peripherals that have not been handed to a gate yet.
pub struct Handles {
    pub display: MockDisplayHandle,
    pub keys: MockKeypadHandle,
    pub motion: MockMotionHandle,
    pub relay: MockOutputHandle,
    pub link: MockLinkHandle,
    pub power: MockPowerHandle,
}

/// Build mock peripherals around the given display and link.
pub fn peripherals(
    (display, display_handle): (MockDisplay, MockDisplayHandle),
    (link, link_handle): (MockLink, MockLinkHandle),
) -> (MockPeripherals, Handles) {
    let (keypad, keys) = MockKeypad::new();
    let (motion, motion_handle) = MockMotionSensor::new();
    let (relay_output, relay) = MockOutputPin::new();
    let (power, power_handle) = MockPowerController::new();

    (
        Peripherals {
            display,
            keypad,
            motion,
            relay_output,
            link,
            power,
        },
        Handles {
            display: display_handle,
            keys,
            motion: motion_handle,
            relay,
            link: link_handle,
            power: power_handle,
        },
    )
}

/// Start a gate with `config` over `link`.
pub async fn rig_with(config: GateConfig, link: (MockLink, MockLinkHandle)) -> Rig {
    let (peripherals, handles) = peripherals(MockDisplay::new(), link);
    let gate = Gate::start(config, peripherals).await.unwrap();

    Rig {
        gate,
        display: handles.display,
        keys: handles.keys,
        motion: handles.motion,
        relay: handles.relay,
        link: handles.link,
        power: handles.power,
    }
}

/// Gate whose host never answers.
pub async fn silent_rig() -> Rig {
    rig_with(GateConfig::default(), MockLink::new()).await
}

/// Gate whose host answers `ID_OK` with `reply`.
pub async fn answering_rig(reply: &'static [u8]) -> Rig {
    let link = MockLink::with_responder(Box::new(move |line: &str| {
        (line == "ID_OK").then(|| reply.to_vec())
    }));
    rig_with(GateConfig::default(), link).await
}

impl Rig {
    /// Someone walks up and types `symbols`.
    pub async fn visitor(&self, symbols: &str) {
        self.motion.set_present(true);
        self.power.wake().unwrap();
        self.keys.send_symbols(symbols).await.unwrap();
    }

    /// The sensor fires the wake line but reads clear afterwards.
    pub fn spurious_wake(&self) {
        self.motion.set_present(false);
        self.power.wake().unwrap();
    }
}
