//! Showcase carousel controller.
//!
//! A cursor over a fixed, ordered list of scenarios plus the direction of the
//! last move. Autoplay advances the cursor every interval. The autoplay timer
//! is re-armed on every move, so a manual click always buys a full interval
//! before the next automatic advance.

use std::num::NonZeroUsize;
use std::rc::Rc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::content::scenario::Scenario;
use crate::engine::{FiredTimer, ScopedTimer, SimTime, TimerHost};
use crate::error::{LandingError, LandingResult};
use crate::widgets::{Rejection, Transition, Widget};

/// Horizontal distance a slide travels when entering or leaving, px.
pub const SLIDE_OFFSET_PX: i32 = 300;

/// Length of the slide transition.
pub const SLIDE_TRANSITION_MS: u64 = 500;

const AUTOPLAY_LABEL: &str = "carousel.autoplay";

/// Direction of the last move. Only affects the transition animation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

impl Direction {
    /// Where the incoming slide starts.
    #[must_use]
    pub const fn enter_offset(self) -> i32 {
        match self {
            Self::Forward => SLIDE_OFFSET_PX,
            Self::Backward => -SLIDE_OFFSET_PX,
        }
    }

    /// Where the outgoing slide ends.
    #[must_use]
    pub const fn exit_offset(self) -> i32 {
        -self.enter_offset()
    }
}

/// Cursor state. `active_index < len` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CarouselState {
    active_index: usize,
    direction: Direction,
    len: NonZeroUsize,
}

impl CarouselState {
    /// Cursor at the first of `len` slides, facing forward.
    #[must_use]
    pub const fn new(len: NonZeroUsize) -> Self {
        Self {
            active_index: 0,
            direction: Direction::Forward,
            len,
        }
    }

    #[must_use]
    pub const fn active_index(&self) -> usize {
        self.active_index
    }

    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub const fn slide_count(&self) -> usize {
        self.len.get()
    }

    /// Next slide, wrapping to the first.
    pub fn advance(&mut self) {
        self.direction = Direction::Forward;
        self.active_index = (self.active_index + 1) % self.len.get();
    }

    /// Previous slide, wrapping to the last.
    pub fn retreat(&mut self) {
        let len = self.len.get();
        self.direction = Direction::Backward;
        self.active_index = (self.active_index + len - 1) % len;
    }

    /// Go to `index`, keeping the direction.
    ///
    /// # Errors
    ///
    /// Returns `Rejection::OutOfRange` without moving if `index >= len`.
    pub fn jump_to(&mut self, index: usize) -> Result<(), Rejection> {
        if index >= self.len.get() {
            return Err(Rejection::OutOfRange {
                index,
                len: self.len.get(),
            });
        }
        self.active_index = index;
        Ok(())
    }
}

/// Snapshot for the rendering surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CarouselView {
    pub active_index: usize,
    /// Two-digit slide number, `"01"` for the first slide.
    pub slide_label: String,
    pub total: usize,
    pub direction: Direction,
    pub enter_offset: i32,
    pub exit_offset: i32,
    pub transition_ms: u64,
    pub scenario: Scenario,
    /// Background gradient stops.
    pub backdrop: (String, String),
    /// One entry per navigation dot; `true` marks the active slide.
    pub dots: Vec<bool>,
    /// When autoplay will next advance, if armed.
    pub next_autoplay_at_ms: Option<u64>,
    pub mounted: bool,
}

/// Carousel widget.
pub struct Carousel {
    scenarios: Vec<Scenario>,
    state: CarouselState,
    interval: SimTime,
    autoplay: bool,
    host: Rc<dyn TimerHost>,
    timer: Option<ScopedTimer>,
    autoplay_count: u64,
    mounted: bool,
}

impl Carousel {
    /// Mount over `scenarios`, arming autoplay if enabled.
    ///
    /// # Errors
    ///
    /// Returns `LandingError::EmptyCarousel` if `scenarios` is empty and
    /// `LandingError::Config` if autoplay is enabled with a zero interval.
    pub fn mount(
        scenarios: Vec<Scenario>,
        interval: SimTime,
        autoplay: bool,
        host: Rc<dyn TimerHost>,
    ) -> LandingResult<Self> {
        let len = NonZeroUsize::new(scenarios.len()).ok_or(LandingError::EmptyCarousel)?;
        if autoplay && interval == SimTime::ZERO {
            return Err(LandingError::config("autoplay interval must be positive"));
        }

        let mut carousel = Self {
            scenarios,
            state: CarouselState::new(len),
            interval,
            autoplay,
            host,
            timer: None,
            autoplay_count: 0,
            mounted: true,
        };
        carousel.rearm();

        info!(
            slides = len.get(),
            interval_ms = interval.as_millis(),
            autoplay,
            "carousel mounted"
        );
        Ok(carousel)
    }

    /// Cursor state.
    #[must_use]
    pub const fn state(&self) -> &CarouselState {
        &self.state
    }

    /// The slide on screen.
    #[must_use]
    pub fn active(&self) -> &Scenario {
        &self.scenarios[self.state.active_index]
    }

    /// All slides in traversal order.
    #[must_use]
    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    /// When the armed autoplay timer is due.
    #[must_use]
    pub fn next_autoplay_at(&self) -> Option<SimTime> {
        self.timer.as_ref().map(ScopedTimer::due)
    }

    /// Number of autoplay advances so far.
    #[must_use]
    pub const fn autoplay_count(&self) -> u64 {
        self.autoplay_count
    }

    /// Manual next. Re-arms autoplay only if the slide changes.
    pub fn advance(&mut self) -> Transition {
        if !self.mounted {
            return self.reject("advance", Rejection::Unmounted);
        }
        let before = self.state.active_index;
        self.state.advance();
        if self.state.active_index != before {
            self.rearm();
        }
        debug!(index = self.state.active_index, "carousel advanced");
        Transition::Applied
    }

    /// Manual previous.
    pub fn retreat(&mut self) -> Transition {
        if !self.mounted {
            return self.reject("retreat", Rejection::Unmounted);
        }
        let before = self.state.active_index;
        self.state.retreat();
        if self.state.active_index != before {
            self.rearm();
        }
        debug!(index = self.state.active_index, "carousel retreated");
        Transition::Applied
    }

    /// Dot click. Re-arms autoplay only if the slide changes.
    pub fn jump_to(&mut self, index: usize) -> Transition {
        if !self.mounted {
            return self.reject("jump_to", Rejection::Unmounted);
        }
        let before = self.state.active_index;
        match self.state.jump_to(index) {
            Ok(()) => {
                if before != index {
                    self.rearm();
                }
                debug!(from = before, to = index, "carousel jumped");
                Transition::Applied
            }
            Err(rejection) => {
                warn!(index, len = self.state.slide_count(), "carousel jump out of range");
                Transition::Rejected(rejection)
            }
        }
    }

    fn rearm(&mut self) {
        // Cancel before scheduling so at most one autoplay timer is live.
        self.timer = None;
        if self.mounted && self.autoplay {
            self.timer = Some(ScopedTimer::arm(&self.host, self.interval, AUTOPLAY_LABEL));
        }
    }

    fn reject(&self, action: &'static str, rejection: Rejection) -> Transition {
        debug!(action, %rejection, "carousel intent rejected");
        Transition::Rejected(rejection)
    }
}

impl Widget for Carousel {
    type View = CarouselView;

    fn name(&self) -> &'static str {
        "carousel"
    }

    fn view(&self) -> CarouselView {
        let scenario = self.active().clone();
        let direction = self.state.direction;
        CarouselView {
            active_index: self.state.active_index,
            slide_label: format!("{:02}", self.state.active_index + 1),
            total: self.state.slide_count(),
            direction,
            enter_offset: direction.enter_offset(),
            exit_offset: direction.exit_offset(),
            transition_ms: SLIDE_TRANSITION_MS,
            backdrop: scenario.backdrop(),
            scenario,
            dots: (0..self.state.slide_count())
                .map(|i| i == self.state.active_index)
                .collect(),
            next_autoplay_at_ms: self.next_autoplay_at().map(|t| t.as_millis()),
            mounted: self.mounted,
        }
    }

    fn owns(&self, fired: &FiredTimer) -> bool {
        self.timer.as_ref().is_some_and(|t| t.matches(fired))
    }

    fn on_timer(&mut self, fired: &FiredTimer) -> Transition {
        if !self.mounted {
            return self.reject("autoplay", Rejection::Unmounted);
        }
        if !self.owns(fired) {
            return self.reject("autoplay", Rejection::StaleTimer);
        }

        self.state.advance();
        self.autoplay_count += 1;
        self.rearm();
        debug!(
            index = self.state.active_index,
            at_ms = fired.due.as_millis(),
            "carousel autoplay"
        );
        Transition::Applied
    }

    fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.timer = None;
        info!(autoplay_count = self.autoplay_count, "carousel unmounted");
    }

    fn is_mounted(&self) -> bool {
        self.mounted
    }
}

impl std::fmt::Debug for Carousel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Carousel")
            .field("state", &self.state)
            .field("interval", &self.interval)
            .field("timer", &self.timer)
            .field("mounted", &self.mounted)
            .finish_non_exhaustive()
    }
}
