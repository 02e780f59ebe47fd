//! Console front panel for the emulator.
//!
//! Each line typed on stdin is one command:
//!
//! | Input      | Effect                                        |
//! |------------|-----------------------------------------------|
//! | `m`        | motion present, fire the wake line            |
//! | `w`        | fire the wake line with no motion             |
//! | `c`        | motion gone                                   |
//! | `0`-`9*#`  | key presses, in order (`0002`, `12*0001`, ...) |
//! | `q`        | quit                                          |

use helmgate_hardware::mock::{MockKeypadHandle, MockMotionHandle, MockPowerHandle};
use helmgate_hardware::{DigitalOutput, KeypadInput, Result, SignalLevel};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Motion,
    SpuriousWake,
    MotionGone,
    Keys(Vec<KeypadInput>),
    Quit,
}

impl ConsoleCommand {
    /// Parse one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let command = match line.trim() {
            "" => return Ok(None),
            "m" => Self::Motion,
            "w" => Self::SpuriousWake,
            "c" => Self::MotionGone,
            "q" => Self::Quit,
            keys => Self::Keys(
                keys.chars()
                    .filter(|c| !c.is_whitespace())
                    .map(KeypadInput::from_symbol)
                    .collect::<Result<_>>()?,
            ),
        };
        Ok(Some(command))
    }
}

/// Handles the console drives.
#[derive(Debug, Clone)]
pub struct FrontPanel {
    pub keys: MockKeypadHandle,
    pub motion: MockMotionHandle,
    pub power: MockPowerHandle,
}

impl FrontPanel {
    /// Apply a command. Returns `false` once the user asked to quit.
    pub async fn apply(&self, command: ConsoleCommand) -> Result<bool> {
        match command {
            ConsoleCommand::Motion => {
                self.motion.set_present(true);
                self.power.wake()?;
            }
            ConsoleCommand::SpuriousWake => {
                self.motion.set_present(false);
                self.power.wake()?;
            }
            ConsoleCommand::MotionGone => self.motion.set_present(false),
            ConsoleCommand::Keys(keys) => {
                for key in keys {
                    self.keys.send_input(key).await?;
                }
            }
            ConsoleCommand::Quit => return Ok(false),
        }
        Ok(true)
    }

    /// Read commands from stdin until `q` or end of input.
    pub async fn run(self) -> anyhow::Result<()> {
        info!("Console ready: m = motion, w = spurious wake, c = motion gone, digits/*/# = keys, q = quit");
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        while let Some(line) = lines.next_line().await? {
            let command = match ConsoleCommand::parse(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(e) => {
                    warn!("Ignoring '{}': {}", line.trim(), e);
                    continue;
                }
            };
            debug!("Console command {:?}", command);
            if !self.apply(command).await? {
                break;
            }
        }

        Ok(())
    }
}

/// Relay line that reports level changes to the log.
#[derive(Debug, Default)]
pub struct ConsoleRelay {
    level: Option<SignalLevel>,
}

impl ConsoleRelay {
    pub fn level(&self) -> Option<SignalLevel> {
        self.level
    }
}

impl DigitalOutput for ConsoleRelay {
    async fn set_level(&mut self, level: SignalLevel) -> Result<()> {
        if self.level != Some(level) {
            info!(target: "helmgate::relay", "Relay line {}", level);
        }
        self.level = Some(level);
        Ok(())
    }
}
