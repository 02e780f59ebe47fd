//! Virtual single-line status display.
//!
//! The gate's physical display shows one line of 16 characters that is
//! overwritten on every update. [`VirtualDisplay`] emulates it for the desktop
//! build: each frame is sanitized, fitted to the column width and emitted
//! through `tracing` so it shows up in the emulator's console.
//!
//! # Character Encoding - ASCII Only
//!
//! The panel's character ROM covers printable ASCII (0x20-0x7E). Anything
//! else is replaced with `?` before the frame is stored.
//!
//! # Examples
//!
//! ```
//! use helmgate_gate::VirtualDisplay;
//! use helmgate_hardware::StatusDisplay;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> helmgate_hardware::Result<()> {
//! let mut display = VirtualDisplay::new();
//! display.init().await?;
//! display.render("Checking...").await?;
//!
//! assert_eq!(display.frame(), "Checking...     ");
//! assert_eq!(display.text(), "Checking...");
//! # Ok(())
//! # }
//! ```

use helmgate_core::constants::DISPLAY_COLUMNS;
use helmgate_hardware::{HardwareError, Result, StatusDisplay};
use tracing::{debug, info};

/// Text alignment within the display line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    /// Text starts at column 0, padded with spaces on the right.
    #[default]
    Left,
    /// Extra space goes on the right when the padding is odd.
    Center,
    /// Text ends at the last column, padded with spaces on the left.
    Right,
}

/// Emulated single-line display.
#[derive(Debug, Clone)]
pub struct VirtualDisplay {
    columns: usize,
    alignment: Alignment,
    frame: String,
    initialized: bool,
    updates: usize,
}

impl VirtualDisplay {
    /// Blank 16-column display, left aligned.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> VirtualDisplayBuilder {
        VirtualDisplayBuilder::default()
    }

    /// The full padded line as the panel would show it.
    pub fn frame(&self) -> &str {
        &self.frame
    }

    /// The shown text without padding.
    pub fn text(&self) -> &str {
        self.frame.trim()
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Number of frames rendered since init.
    pub fn updates(&self) -> usize {
        self.updates
    }
}

impl Default for VirtualDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusDisplay for VirtualDisplay {
    async fn init(&mut self) -> Result<()> {
        if self.columns == 0 {
            return Err(HardwareError::initialization_failed(
                "Display has zero columns",
            ));
        }
        self.frame = " ".repeat(self.columns);
        self.initialized = true;
        self.updates = 0;
        debug!("Virtual display ready ({} columns)", self.columns);
        Ok(())
    }

    async fn render(&mut self, text: &str) -> Result<()> {
        if !self.initialized {
            return Err(HardwareError::communication("Display not initialized"));
        }

        let clean = sanitize_text(text);
        self.frame = align_text(&clean, self.columns, self.alignment);
        self.updates += 1;
        info!(target: "helmgate::display", "[{}]", self.frame);
        Ok(())
    }
}

/// Builder for [`VirtualDisplay`].
#[derive(Debug, Clone)]
pub struct VirtualDisplayBuilder {
    columns: usize,
    alignment: Alignment,
}

impl VirtualDisplayBuilder {
    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn build(self) -> VirtualDisplay {
        VirtualDisplay {
            columns: self.columns,
            alignment: self.alignment,
            frame: " ".repeat(self.columns),
            initialized: false,
            updates: 0,
        }
    }
}

impl Default for VirtualDisplayBuilder {
    fn default() -> Self {
        Self {
            columns: DISPLAY_COLUMNS,
            alignment: Alignment::Left,
        }
    }
}

/// Truncate text to a maximum number of characters.
///
/// ```
/// use helmgate_gate::truncate_text;
///
/// assert_eq!(truncate_text("Access Granted!!!", 16), "Access Granted!!");
/// assert_eq!(truncate_text("ID: 12", 16), "ID: 12");
/// ```
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Align text within a fixed width, padding with spaces.
///
/// ```
/// use helmgate_gate::{align_text, Alignment};
///
/// assert_eq!(align_text("OK", 6, Alignment::Left), "OK    ");
/// assert_eq!(align_text("OK", 6, Alignment::Center), "  OK  ");
/// assert_eq!(align_text("OK", 6, Alignment::Right), "    OK");
/// ```
pub fn align_text(text: &str, width: usize, alignment: Alignment) -> String {
    let char_count = text.chars().count();

    if char_count >= width {
        return truncate_text(text, width);
    }

    let padding = width - char_count;

    match alignment {
        Alignment::Left => format!("{}{}", text, " ".repeat(padding)),
        Alignment::Right => format!("{}{}", " ".repeat(padding), text),
        Alignment::Center => {
            let left_pad = padding / 2;
            let right_pad = padding - left_pad;
            format!("{}{}{}", " ".repeat(left_pad), text, " ".repeat(right_pad))
        }
    }
}

/// Drop control characters, replace non-ASCII with `?`, trim.
fn sanitize_text(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control())
        .map(|c| if c.is_ascii() { c } else { '?' })
        .collect::<String>()
        .trim()
        .to_string()
}
