//! Mock PIR motion sensor.

use crate::{Result, traits::MotionSensor};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

/// Mock motion sensor whose reading is set through a handle.
#[derive(Debug)]
pub struct MockMotionSensor {
    present: Arc<AtomicBool>,
    reads: Arc<AtomicU32>,
}

impl MockMotionSensor {
    /// Create a sensor that starts with no motion.
    pub fn new() -> (Self, MockMotionHandle) {
        let present = Arc::new(AtomicBool::new(false));
        let reads = Arc::new(AtomicU32::new(0));
        (
            Self {
                present: Arc::clone(&present),
                reads: Arc::clone(&reads),
            },
            MockMotionHandle { present, reads },
        )
    }
}

impl MotionSensor for MockMotionSensor {
    async fn is_motion_present(&mut self) -> Result<bool> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.present.load(Ordering::SeqCst))
    }
}

/// Handle for driving a mock motion sensor.
#[derive(Debug, Clone)]
pub struct MockMotionHandle {
    present: Arc<AtomicBool>,
    reads: Arc<AtomicU32>,
}

impl MockMotionHandle {
    /// Set the sensor reading.
    pub fn set_present(&self, present: bool) {
        self.present.store(present, Ordering::SeqCst);
    }

    pub fn is_present(&self) -> bool {
        self.present.load(Ordering::SeqCst)
    }

    /// Number of times the sensor was read.
    pub fn read_count(&self) -> u32 {
        self.reads.load(Ordering::SeqCst)
    }
}
