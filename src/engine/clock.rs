//! Virtual clock.
//!
//! Time only moves when the host says so. The clock never runs backwards.

use serde::{Deserialize, Serialize};

use crate::engine::SimTime;

/// Monotonic virtual clock.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VirtualClock {
    current: SimTime,
}

impl VirtualClock {
    /// Create a clock at time zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            current: SimTime::ZERO,
        }
    }

    /// Get current virtual time.
    #[must_use]
    pub const fn current_time(&self) -> SimTime {
        self.current
    }

    /// Move the clock to `target`.
    ///
    /// Targets in the past are ignored. Returns the resulting time.
    pub fn advance_to(&mut self, target: SimTime) -> SimTime {
        if target > self.current {
            self.current = target;
        }
        self.current
    }
}
