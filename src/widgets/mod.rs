//! Interactive widgets.
//!
//! Each widget owns its state exclusively and is driven by two kinds of
//! input: intents forwarded from the rendering surface and timers handed
//! back by the host. Every operation is total. An intent whose precondition
//! does not hold leaves the state untouched and reports a [`Rejection`].

pub mod carousel;
pub mod simulator;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::engine::FiredTimer;

pub use carousel::{Carousel, CarouselState, CarouselView, Direction};
pub use simulator::{GenerationPhase, Simulator, SimulatorInput, SimulatorView, TagSelection};

/// Why an intent or timer did not change state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Rejection {
    /// `jump_to` past the last slide.
    OutOfRange {
        /// Requested index.
        index: usize,
        /// Number of slides.
        len: usize,
    },
    /// Tag selection is full.
    AtCapacity,
    /// A generation is already in flight.
    Pending,
    /// Required input is missing.
    InputNotReady,
    /// `reset` outside the completed phase.
    NotCompleted,
    /// The widget is unmounted.
    Unmounted,
    /// The fired timer is not the one the widget currently holds.
    StaleTimer,
    /// The intent targets the other simulator variant.
    WrongVariant,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { index, len } => {
                write!(f, "index {index} out of range for {len} slides")
            }
            Self::AtCapacity => f.write_str("selection at capacity"),
            Self::Pending => f.write_str("generation pending"),
            Self::InputNotReady => f.write_str("input not ready"),
            Self::NotCompleted => f.write_str("nothing to reset"),
            Self::Unmounted => f.write_str("widget unmounted"),
            Self::StaleTimer => f.write_str("stale timer"),
            Self::WrongVariant => f.write_str("not available in this variant"),
        }
    }
}

/// Outcome of delivering an intent or timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Transition {
    /// State changed.
    Applied,
    /// State unchanged.
    Rejected(Rejection),
}

impl Transition {
    /// Whether the state changed.
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }

    /// The rejection reason, if any.
    #[must_use]
    pub const fn rejection(&self) -> Option<Rejection> {
        match self {
            Self::Applied => None,
            Self::Rejected(r) => Some(*r),
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Applied => f.write_str("applied"),
            Self::Rejected(reason) => write!(f, "rejected: {reason}"),
        }
    }
}

/// User intents emitted by the rendering surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Intent {
    /// Carousel: next slide.
    Advance,
    /// Carousel: previous slide.
    Retreat,
    /// Carousel: go to a slide (dot click).
    JumpTo { index: usize },
    /// Simulator: mark the photo as uploaded.
    Upload,
    /// Simulator: select or deselect a style tag.
    ToggleTag { tag: String },
    /// Simulator: replace the prompt text.
    SetPrompt { text: String },
    /// Simulator: start a generation.
    Generate,
    /// Simulator: clear a completed result.
    Reset,
    /// Tear down the whole page.
    Unmount,
}

impl Intent {
    /// Short name used in logs and timelines.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Advance => "advance",
            Self::Retreat => "retreat",
            Self::JumpTo { .. } => "jump_to",
            Self::Upload => "upload",
            Self::ToggleTag { .. } => "toggle_tag",
            Self::SetPrompt { .. } => "set_prompt",
            Self::Generate => "generate",
            Self::Reset => "reset",
            Self::Unmount => "unmount",
        }
    }

    /// Whether the intent is handled by the carousel.
    #[must_use]
    pub const fn targets_carousel(&self) -> bool {
        matches!(self, Self::Advance | Self::Retreat | Self::JumpTo { .. })
    }
}

/// A timer-driven widget mounted on a page.
pub trait Widget {
    /// Serializable snapshot consumed by the rendering surface.
    type View: Serialize;

    /// Name used in logs and timelines.
    fn name(&self) -> &'static str;

    /// Current snapshot.
    fn view(&self) -> Self::View;

    /// Whether `fired` is a timer this widget currently holds.
    fn owns(&self, fired: &FiredTimer) -> bool;

    /// Deliver a fired timer.
    fn on_timer(&mut self, fired: &FiredTimer) -> Transition;

    /// Cancel outstanding timers and stop accepting input.
    fn unmount(&mut self);

    /// Whether the widget still accepts input.
    fn is_mounted(&self) -> bool;
}
