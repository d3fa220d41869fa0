//! Page host.
//!
//! A [`Stage`] mounts the carousel and the simulator on one virtual
//! scheduler, forwards intents to the widget they target, and advances
//! virtual time by handing each fired timer to the widget holding it.
//! Every delivery is appended to a [`Timeline`].
//!
//! When an intent and a timer fall on the same instant, the timer is
//! delivered first.

use std::rc::Rc;

use serde::Serialize;
use tracing::{debug, info, trace, warn};

use crate::config::{LandingConfig, ScriptStep};
use crate::content::assets::{AssetRef, AssetResolver};
use crate::content::i18n::LocaleBundle;
use crate::content::motion::{FloatMotion, Pose};
use crate::content::page::PageContent;
use crate::content::scenario::load_scenarios;
use crate::engine::{FiredTimer, SimRng, SimTime, TimerHost, VirtualScheduler};
use crate::error::{LandingError, LandingResult};
use crate::widgets::{
    Carousel, CarouselView, GenerationPhase, Intent, Rejection, Simulator, SimulatorView,
    Transition, Widget,
};

/// One delivered intent or timer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageEvent {
    /// Delivery order.
    pub sequence: u64,
    pub at_ms: u64,
    /// `"carousel"`, `"simulator"` or `"stage"`.
    pub widget: &'static str,
    /// Intent name, or the timer label for timer deliveries.
    pub action: String,
    pub outcome: Transition,
    /// State after delivery, for reading timelines.
    pub detail: String,
}

/// Ordered record of everything delivered to a stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Timeline {
    events: Vec<StageEvent>,
}

impl Timeline {
    fn record(
        &mut self,
        at: SimTime,
        widget: &'static str,
        action: impl Into<String>,
        outcome: Transition,
        detail: String,
    ) {
        let event = StageEvent {
            sequence: self.events.len() as u64,
            at_ms: at.as_millis(),
            widget,
            action: action.into(),
            outcome,
            detail,
        };
        trace!(?event, "timeline event");
        self.events.push(event);
    }

    #[must_use]
    pub fn events(&self) -> &[StageEvent] {
        &self.events
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events from one widget.
    pub fn for_widget<'a>(&'a self, widget: &'a str) -> impl Iterator<Item = &'a StageEvent> + 'a {
        self.events.iter().filter(move |e| e.widget == widget)
    }

    /// Number of rejected deliveries.
    #[must_use]
    pub fn rejected_count(&self) -> usize {
        self.events.iter().filter(|e| !e.outcome.is_applied()).count()
    }

    /// BLAKE3 digest of the serialized timeline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn checksum(&self) -> LandingResult<String> {
        let bytes = serde_json::to_vec(&self.events)?;
        Ok(blake3::hash(&bytes).to_hex().to_string())
    }
}

/// A decorative image and its motion.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatingImage {
    pub image: AssetRef,
    pub motion: FloatMotion,
}

/// Sampled decorative image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FloatingPose {
    pub image: AssetRef,
    pub pose: Pose,
}

/// Everything the rendering surface needs at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageSnapshot {
    pub at_ms: u64,
    pub locale: String,
    pub carousel: CarouselView,
    pub simulator: SimulatorView,
    pub floating: Vec<FloatingPose>,
    pub pending_timers: usize,
}

/// Mounted page.
pub struct Stage {
    scheduler: Rc<VirtualScheduler>,
    page: PageContent,
    carousel: Carousel,
    simulator: Simulator,
    floating: Vec<FloatingImage>,
    timeline: Timeline,
    seed: u64,
    mounted: bool,
}

impl Stage {
    /// Build content for `locale` and mount both widgets at time zero.
    ///
    /// # Errors
    ///
    /// Returns an error if content is missing or a widget's construction
    /// contract does not hold.
    pub fn mount(
        config: &LandingConfig,
        bundle: &LocaleBundle,
        locale: &str,
        assets: &dyn AssetResolver,
    ) -> LandingResult<Self> {
        let provider = bundle.localize(locale);
        let page = PageContent::load(&provider)?;
        let scenarios = load_scenarios(
            &config.carousel.scenarios,
            &config.carousel.translation_prefix,
            &provider,
            assets,
        )?;
        let floating = config
            .floating
            .iter()
            .map(|motion| {
                Ok(FloatingImage {
                    image: assets.resolve(&motion.image)?,
                    motion: motion.clone(),
                })
            })
            .collect::<LandingResult<Vec<_>>>()?;

        let scheduler = Rc::new(VirtualScheduler::new());
        let host: Rc<dyn TimerHost> = scheduler.clone();

        let mut rng = SimRng::new(config.seed);
        let simulator_rng = rng
            .partition(1)
            .pop()
            .ok_or_else(|| LandingError::config("rng partition produced no stream"))?;

        let carousel = Carousel::mount(
            scenarios,
            SimTime::from_millis(config.carousel.autoplay_interval_ms),
            config.carousel.autoplay,
            Rc::clone(&host),
        )?;
        let simulator = Simulator::mount(
            page.simulator.clone(),
            &config.simulator,
            simulator_rng,
            host,
        )?;

        info!(
            locale = %page.locale,
            seed = config.seed,
            floating = floating.len(),
            "stage mounted"
        );
        Ok(Self {
            scheduler,
            page,
            carousel,
            simulator,
            floating,
            timeline: Timeline::default(),
            seed: config.seed,
            mounted: true,
        })
    }

    #[must_use]
    pub fn now(&self) -> SimTime {
        self.scheduler.now()
    }

    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    #[must_use]
    pub const fn page(&self) -> &PageContent {
        &self.page
    }

    #[must_use]
    pub const fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    #[must_use]
    pub const fn simulator(&self) -> &Simulator {
        &self.simulator
    }

    #[must_use]
    pub const fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Live timers on the page.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending_count()
    }

    /// Deliver an intent at the current time.
    pub fn dispatch(&mut self, intent: &Intent) -> Transition {
        let now = self.now();
        let (widget, outcome) = match intent {
            Intent::Advance => ("carousel", self.carousel.advance()),
            Intent::Retreat => ("carousel", self.carousel.retreat()),
            Intent::JumpTo { index } => ("carousel", self.carousel.jump_to(*index)),
            Intent::Upload => ("simulator", self.simulator.upload()),
            Intent::ToggleTag { tag } => ("simulator", self.simulator.toggle_tag(tag)),
            Intent::SetPrompt { text } => ("simulator", self.simulator.set_prompt(text)),
            Intent::Generate => ("simulator", self.simulator.generate()),
            Intent::Reset => ("simulator", self.simulator.reset()),
            Intent::Unmount => {
                let outcome = if self.mounted {
                    self.unmount();
                    Transition::Applied
                } else {
                    Transition::Rejected(Rejection::Unmounted)
                };
                self.timeline
                    .record(now, "stage", intent.name(), outcome, "unmounted".to_string());
                return outcome;
            }
        };

        let detail = self.describe(widget);
        debug!(at_ms = now.as_millis(), widget, action = intent.name(), %outcome, "intent delivered");
        self.timeline.record(now, widget, intent.name(), outcome, detail);
        outcome
    }

    /// Fire every timer due up to `target`, then move the clock there.
    ///
    /// Returns the number of timers delivered.
    pub fn advance_to(&mut self, target: SimTime) -> usize {
        let mut delivered = 0;
        while let Some(fired) = self.scheduler.pop_due(target) {
            self.deliver(&fired);
            delivered += 1;
        }
        self.scheduler.advance_to(target);
        delivered
    }

    /// [`advance_to`](Self::advance_to) relative to now.
    pub fn advance_by(&mut self, delta: SimTime) -> usize {
        let target = self.now() + delta;
        self.advance_to(target)
    }

    /// Replay scripted intents in time order, then run to `until`.
    ///
    /// Steps after `until` are skipped.
    pub fn run_script(&mut self, steps: &[ScriptStep], until: SimTime) {
        for step in steps {
            let at = SimTime::from_millis(step.at_ms);
            if at > until {
                debug!(at_ms = step.at_ms, "script step past horizon skipped");
                break;
            }
            self.advance_to(at);
            self.dispatch(&step.intent);
        }
        self.advance_to(until);
    }

    /// Current view of the whole page.
    #[must_use]
    pub fn snapshot(&self) -> PageSnapshot {
        let now = self.now();
        PageSnapshot {
            at_ms: now.as_millis(),
            locale: self.page.locale.clone(),
            carousel: self.carousel.view(),
            simulator: self.simulator.view(),
            floating: self
                .floating
                .iter()
                .map(|f| FloatingPose {
                    image: f.image.clone(),
                    pose: f.motion.pose_at(now),
                })
                .collect(),
            pending_timers: self.pending_timers(),
        }
    }

    /// Unmount both widgets, cancelling every timer.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.carousel.unmount();
        self.simulator.unmount();
        let leaked = self.scheduler.pending_count();
        if leaked > 0 {
            warn!(leaked, "timers outlived their widgets");
            self.scheduler.clear();
        }
        debug_assert!(self.scheduler.is_idle());
        self.mounted = false;
        info!(
            at_ms = self.now().as_millis(),
            events = self.timeline.len(),
            "stage unmounted"
        );
    }

    /// Consume the stage, keeping its timeline.
    #[must_use]
    pub fn into_timeline(mut self) -> Timeline {
        self.unmount();
        std::mem::take(&mut self.timeline)
    }

    fn deliver(&mut self, fired: &FiredTimer) {
        let (widget, outcome) = if self.carousel.owns(fired) {
            ("carousel", self.carousel.on_timer(fired))
        } else if self.simulator.owns(fired) {
            ("simulator", self.simulator.on_timer(fired))
        } else {
            ("stage", Transition::Rejected(Rejection::StaleTimer))
        };

        let detail = if widget == "stage" {
            fired.token.to_string()
        } else {
            self.describe(widget)
        };
        self.timeline
            .record(fired.due, widget, fired.label, outcome, detail);
    }

    fn describe(&self, widget: &str) -> String {
        match widget {
            "carousel" => format!("slide {}", self.carousel.view().slide_label),
            "simulator" => match self.simulator.phase() {
                GenerationPhase::Idle => {
                    let summary = self
                        .simulator
                        .selection()
                        .and_then(|s| s.summary())
                        .unwrap_or_default();
                    format!("idle [{summary}]")
                }
                GenerationPhase::Pending { timer, .. } => {
                    format!("pending until {}", timer.due())
                }
                GenerationPhase::Completed { output } => format!("completed: {output}"),
            },
            _ => String::new(),
        }
    }
}

impl std::fmt::Debug for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stage")
            .field("now", &self.now())
            .field("carousel", &self.carousel)
            .field("simulator", &self.simulator)
            .field("events", &self.timeline.len())
            .field("mounted", &self.mounted)
            .finish_non_exhaustive()
    }
}
