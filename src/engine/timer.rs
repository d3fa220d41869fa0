//! Timer capability.
//!
//! Widgets never touch a wall clock. They ask a [`TimerHost`] to schedule a
//! one-shot timer and receive a [`TimerToken`]; when the timer comes due the
//! host hands a [`FiredTimer`] carrying that token back to the widget.
//!
//! A [`ScopedTimer`] owns one scheduled timer and cancels it when dropped, so
//! a widget that is unmounted, reset or simply dropped can never be reached by
//! a stale timer.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::engine::SimTime;

/// Cancellation token identifying one scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimerToken(u64);

impl TimerToken {
    /// Wrap a raw host-assigned identifier.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw identifier.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// A timer that came due and was removed from its host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FiredTimer {
    /// Token returned when the timer was scheduled.
    pub token: TimerToken,
    /// Virtual time at which it fired.
    pub due: SimTime,
    /// Label given at scheduling time (diagnostics only).
    pub label: &'static str,
}

/// Capability for scheduling one-shot timers.
///
/// Methods take `&self`: a host is shared by every widget mounted on the same
/// page and manages its own interior state.
pub trait TimerHost {
    /// Current time as seen by the host.
    fn now(&self) -> SimTime;

    /// Schedule a timer `delay` from now.
    fn schedule(&self, delay: SimTime, label: &'static str) -> TimerToken;

    /// Cancel a pending timer.
    ///
    /// Returns `false` if the token already fired or was already cancelled.
    fn cancel(&self, token: TimerToken) -> bool;
}

/// A scheduled timer that is cancelled when dropped.
pub struct ScopedTimer {
    host: Rc<dyn TimerHost>,
    token: TimerToken,
    due: SimTime,
}

impl ScopedTimer {
    /// Schedule a timer on `host` and take ownership of it.
    #[must_use]
    pub fn arm(host: &Rc<dyn TimerHost>, delay: SimTime, label: &'static str) -> Self {
        let due = host.now() + delay;
        let token = host.schedule(delay, label);
        Self {
            host: Rc::clone(host),
            token,
            due,
        }
    }

    /// Token of the owned timer.
    #[must_use]
    pub const fn token(&self) -> TimerToken {
        self.token
    }

    /// Virtual time at which the timer is due.
    #[must_use]
    pub const fn due(&self) -> SimTime {
        self.due
    }

    /// Whether `fired` refers to this timer.
    #[must_use]
    pub fn matches(&self, fired: &FiredTimer) -> bool {
        self.token == fired.token
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        // No-op for a timer that already fired.
        self.host.cancel(self.token);
    }
}

impl fmt::Debug for ScopedTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopedTimer")
            .field("token", &self.token)
            .field("due", &self.due)
            .finish_non_exhaustive()
    }
}
