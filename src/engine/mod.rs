//! Deterministic interaction engine.
//!
//! Everything the widgets need from the outside world that involves time or
//! chance lives here:
//! - Fixed-point virtual time
//! - A timer capability with scoped (cancel-on-drop) timers
//! - A deterministic scheduler implementing that capability
//! - Seeded PCG randomness

pub mod clock;
pub mod rng;
pub mod scheduler;
pub mod timer;

use serde::{Deserialize, Serialize};

pub use clock::VirtualClock;
pub use rng::SimRng;
pub use scheduler::{ScheduledTimer, VirtualScheduler};
pub use timer::{FiredTimer, ScopedTimer, TimerHost, TimerToken};

/// Virtual time representation.
///
/// Fixed-point nanoseconds, used both as an instant (time since mount) and as
/// a duration (timer delay). Integer arithmetic keeps timer ordering exact.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct SimTime {
    /// Time in nanoseconds.
    nanos: u64,
}

impl SimTime {
    /// Zero time (mount instant).
    pub const ZERO: Self = Self { nanos: 0 };

    /// Create time from milliseconds.
    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        Self {
            nanos: millis.saturating_mul(1_000_000),
        }
    }

    /// Create time from nanoseconds.
    #[must_use]
    pub const fn from_nanos(nanos: u64) -> Self {
        Self { nanos }
    }

    /// Get time as whole milliseconds (truncating).
    #[must_use]
    pub const fn as_millis(&self) -> u64 {
        self.nanos / 1_000_000
    }

    /// Get time as nanoseconds.
    #[must_use]
    pub const fn as_nanos(&self) -> u64 {
        self.nanos
    }

    /// Get time as seconds (f64).
    #[must_use]
    pub fn as_secs_f64(&self) -> f64 {
        self.nanos as f64 / 1_000_000_000.0
    }

    /// Add a duration, saturating at the representable maximum.
    #[must_use]
    pub const fn saturating_add(self, rhs: Self) -> Self {
        Self {
            nanos: self.nanos.saturating_add(rhs.nanos),
        }
    }
}

impl std::ops::Add for SimTime {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.saturating_add(rhs)
    }
}

impl std::ops::Sub for SimTime {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            nanos: self.nanos.saturating_sub(rhs.nanos),
        }
    }
}

impl std::fmt::Display for SimTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}ms", self.as_millis())
    }
}
