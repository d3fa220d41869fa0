//! Deterministic timer scheduler.
//!
//! Implements [`TimerHost`] over a virtual clock with a priority queue that
//! ensures:
//! - Timers fire in due-time order
//! - Ties are broken by scheduling order
//! - Cancelled timers never fire
//! - Reproducible across runs

use std::cell::RefCell;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};

use crate::engine::clock::VirtualClock;
use crate::engine::timer::{FiredTimer, TimerHost, TimerToken};
use crate::engine::SimTime;

/// A timer waiting in the queue.
#[derive(Debug, Clone)]
pub struct ScheduledTimer {
    /// Due time.
    pub due: SimTime,
    /// Token, also the tie-breaking sequence number.
    pub token: TimerToken,
    /// Diagnostic label.
    pub label: &'static str,
}

// Min-heap ordering by (due, token)
impl PartialEq for ScheduledTimer {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.token == other.token
    }
}

impl Eq for ScheduledTimer {}

impl PartialOrd for ScheduledTimer {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScheduledTimer {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.due
            .cmp(&other.due)
            .then_with(|| self.token.cmp(&other.token))
    }
}

#[derive(Debug, Default)]
struct SchedulerState {
    clock: VirtualClock,
    queue: BinaryHeap<Reverse<ScheduledTimer>>,
    /// Tokens still live. Cancelled entries stay in the heap and are skipped.
    pending: HashSet<TimerToken>,
    next_token: u64,
}

impl SchedulerState {
    /// Drop cancelled entries from the top of the heap.
    fn purge_cancelled(&mut self) {
        while let Some(Reverse(top)) = self.queue.peek() {
            if self.pending.contains(&top.token) {
                break;
            }
            self.queue.pop();
        }
    }
}

/// Virtual-time [`TimerHost`].
///
/// Time advances only through [`pop_due`](Self::pop_due) and
/// [`advance_to`](Self::advance_to). The host loop pops due timers one at a
/// time and dispatches each before popping the next, so a widget that re-arms
/// from inside its handler is seen by the same loop.
///
/// # Example
///
/// ```rust
/// use landing_sim::engine::{SimTime, TimerHost, VirtualScheduler};
///
/// let scheduler = VirtualScheduler::new();
/// let token = scheduler.schedule(SimTime::from_millis(5000), "autoplay");
///
/// assert!(scheduler.pop_due(SimTime::from_millis(4999)).is_none());
/// let fired = scheduler.pop_due(SimTime::from_millis(5000));
/// assert_eq!(fired.map(|f| f.token), Some(token));
/// ```
#[derive(Debug, Default)]
pub struct VirtualScheduler {
    state: RefCell<SchedulerState>,
}

impl VirtualScheduler {
    /// Create a scheduler at time zero with no timers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pop the earliest live timer due at or before `until`.
    ///
    /// The clock moves to the timer's due time.
    #[must_use]
    pub fn pop_due(&self, until: SimTime) -> Option<FiredTimer> {
        let mut state = self.state.borrow_mut();
        state.purge_cancelled();

        let due = state.queue.peek().map(|Reverse(t)| t.due)?;
        if due > until {
            return None;
        }

        let Reverse(timer) = state.queue.pop()?;
        state.pending.remove(&timer.token);
        state.clock.advance_to(timer.due);

        Some(FiredTimer {
            token: timer.token,
            due: timer.due,
            label: timer.label,
        })
    }

    /// Move the clock to `target` without firing anything.
    ///
    /// Callers normally drain [`pop_due`](Self::pop_due) first.
    pub fn advance_to(&self, target: SimTime) -> SimTime {
        self.state.borrow_mut().clock.advance_to(target)
    }

    /// Number of live (scheduled and not cancelled) timers.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.state.borrow().pending.len()
    }

    /// Due time of the earliest live timer.
    #[must_use]
    pub fn next_due(&self) -> Option<SimTime> {
        let mut state = self.state.borrow_mut();
        state.purge_cancelled();
        state.queue.peek().map(|Reverse(t)| t.due)
    }

    /// Whether no live timers remain.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.pending_count() == 0
    }

    /// Cancel every pending timer.
    pub fn clear(&self) {
        let mut state = self.state.borrow_mut();
        state.queue.clear();
        state.pending.clear();
    }
}

impl TimerHost for VirtualScheduler {
    fn now(&self) -> SimTime {
        self.state.borrow().clock.current_time()
    }

    fn schedule(&self, delay: SimTime, label: &'static str) -> TimerToken {
        let mut state = self.state.borrow_mut();
        let token = TimerToken::from_raw(state.next_token);
        state.next_token += 1;

        let due = state.clock.current_time() + delay;
        state.queue.push(Reverse(ScheduledTimer { due, token, label }));
        state.pending.insert(token);
        token
    }

    fn cancel(&self, token: TimerToken) -> bool {
        self.state.borrow_mut().pending.remove(&token)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn ms(v: u64) -> SimTime {
        SimTime::from_millis(v)
    }

    #[test]
    fn test_scheduler_time_ordering() {
        let scheduler = VirtualScheduler::new();
        let c = scheduler.schedule(ms(3000), "c");
        let a = scheduler.schedule(ms(1000), "a");
        let b = scheduler.schedule(ms(2000), "b");

        let order: Vec<TimerToken> = std::iter::from_fn(|| scheduler.pop_due(ms(10_000)))
            .map(|f| f.token)
            .collect();
        assert_eq!(order, vec![a, b, c]);
        assert!(scheduler.is_idle());
    }

    #[test]
    fn test_scheduler_ties_follow_scheduling_order() {
        let scheduler = VirtualScheduler::new();
        let first = scheduler.schedule(ms(500), "first");
        let second = scheduler.schedule(ms(500), "second");

        assert_eq!(scheduler.pop_due(ms(500)).unwrap().token, first);
        assert_eq!(scheduler.pop_due(ms(500)).unwrap().token, second);
    }

    #[test]
    fn test_pop_due_respects_horizon() {
        let scheduler = VirtualScheduler::new();
        scheduler.schedule(ms(2000), "x");

        assert!(scheduler.pop_due(ms(1999)).is_none());
        assert_eq!(scheduler.now(), SimTime::ZERO);

        let fired = scheduler.pop_due(ms(2000)).unwrap();
        assert_eq!(fired.due, ms(2000));
        assert_eq!(fired.label, "x");
        assert_eq!(scheduler.now(), ms(2000));
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let scheduler = VirtualScheduler::new();
        let doomed = scheduler.schedule(ms(100), "doomed");
        let kept = scheduler.schedule(ms(200), "kept");

        assert!(scheduler.cancel(doomed));
        assert!(!scheduler.cancel(doomed));
        assert_eq!(scheduler.pending_count(), 1);
        assert_eq!(scheduler.next_due(), Some(ms(200)));
        assert_eq!(scheduler.pop_due(ms(1000)).unwrap().token, kept);
        assert!(scheduler.pop_due(ms(1000)).is_none());
    }

    #[test]
    fn test_cancel_after_fire_returns_false() {
        let scheduler = VirtualScheduler::new();
        let token = scheduler.schedule(ms(10), "x");
        let _ = scheduler.pop_due(ms(10));
        assert!(!scheduler.cancel(token));
    }

    #[test]
    fn test_schedule_relative_to_now() {
        let scheduler = VirtualScheduler::new();
        scheduler.advance_to(ms(1000));
        scheduler.schedule(ms(500), "x");
        assert_eq!(scheduler.next_due(), Some(ms(1500)));
    }

    #[test]
    fn test_clear() {
        let scheduler = VirtualScheduler::new();
        scheduler.schedule(ms(1), "a");
        scheduler.schedule(ms(2), "b");
        scheduler.clear();
        assert!(scheduler.is_idle());
        assert!(scheduler.next_due().is_none());
    }

    #[test]
    fn test_tokens_are_unique() {
        let scheduler = VirtualScheduler::new();
        let a = scheduler.schedule(ms(1), "a");
        scheduler.cancel(a);
        let b = scheduler.schedule(ms(1), "b");
        assert_ne!(a, b);
    }
}
