use serde::Serialize;

use crate::types::WindowError;

/// A brush-selected `[start, end]` range of timestamps, `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TimeWindow {
    start: u64,
    end: u64,
}

impl TimeWindow {
    pub fn new(start: u64, end: u64) -> Result<Self, WindowError> {
        if start > end {
            return Err(WindowError::Inverted { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn end(&self) -> u64 {
        self.end
    }

    /// Strict on both bounds: events sitting exactly on a brush handle are
    /// outside the window.
    pub fn contains(&self, timestamp: u64) -> bool {
        self.start < timestamp && timestamp < self.end
    }
}
