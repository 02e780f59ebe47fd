//! helmgate desktop emulator.
//!
//! Runs the real gate cycle against emulated peripherals driven from the
//! console. The display is a 16-column virtual panel logged through
//! `tracing`; the relay line is logged on every change.
//!
//! # Usage
//!
//! ```bash
//! # Loopback host that grants every request
//! helmgate
//!
//! # Real helmet-detection host on a serial port
//! HELMGATE_SERIAL_PORT=/dev/ttyUSB0 helmgate
//!
//! # More detail
//! RUST_LOG=debug helmgate
//! ```

mod console;

use anyhow::Context;
use helmgate_core::constants::{DEFAULT_BAUD_RATE, DIAG_ID_OK};
use helmgate_gate::{Gate, GateConfig, Peripherals, VirtualDisplay};
use helmgate_hardware::devices::AnyVerificationLink;
use helmgate_hardware::mock::{MockKeypad, MockLink, MockMotionSensor, MockPowerController};
use helmgate_hardware::serial::{SerialLink, SerialLinkConfig};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use console::{ConsoleRelay, FrontPanel};

/// Environment variable naming the serial port of the verification host.
const SERIAL_PORT_ENV: &str = "HELMGATE_SERIAL_PORT";

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

    info!("helmgate {} starting", helmgate_core::VERSION);

    let (keypad, keys) = MockKeypad::new();
    let (motion, motion_handle) = MockMotionSensor::new();
    let (power, power_handle) = MockPowerController::new();

    let peripherals = Peripherals {
        display: VirtualDisplay::new(),
        keypad,
        motion,
        relay_output: ConsoleRelay::default(),
        link: open_link()?,
        power,
    };

    let mut gate = Gate::start(GateConfig::default(), peripherals)
        .await
        .context("gate failed to start")?;

    let panel = FrontPanel {
        keys,
        motion: motion_handle,
        power: power_handle,
    };

    tokio::select! {
        _ = gate.run() => {}
        result = panel.run() => result?,
    }

    info!("Console closed after {} cycles", gate.stats().cycles);
    Ok(())
}

fn open_link() -> anyhow::Result<AnyVerificationLink> {
    match std::env::var(SERIAL_PORT_ENV) {
        Ok(path) => {
            let config = SerialLinkConfig::new(path).with_baud_rate(DEFAULT_BAUD_RATE);
            let link = SerialLink::open(&config)
                .with_context(|| format!("cannot open verification link {}", config.path))?;
            Ok(AnyVerificationLink::Serial(link))
        }
        Err(_) => {
            info!(
                "{} not set, using loopback host that grants every request",
                SERIAL_PORT_ENV
            );
            let (link, _handle) = MockLink::with_responder(Box::new(|line: &str| {
                (line == DIAG_ID_OK).then(|| b"1\n".to_vec())
            }));
            Ok(AnyVerificationLink::Mock(link))
        }
    }
}
