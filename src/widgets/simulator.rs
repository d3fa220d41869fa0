//! Demo generation simulator.
//!
//! Stands in for a generation backend: the user provides input (a photo plus
//! up to two style tags, or a free-text prompt), presses generate, and after
//! a simulated latency one entry of the canned catalog comes back.
//!
//! ```text
//! Idle --generate--> Pending --timer--> Completed --reset--> Idle
//!                       ^                   |
//!                       +-----generate------+
//! ```
//!
//! At most one generation is in flight. The pending timer is owned by the
//! phase itself, so leaving `Pending` by any path cancels it.

use std::rc::Rc;

use serde::Serialize;
use tracing::{debug, info};

use crate::config::{LatencyConfig, SimulatorConfig, SimulatorVariant};
use crate::content::page::SimulatorTexts;
use crate::engine::{FiredTimer, ScopedTimer, SimRng, SimTime, TimerHost};
use crate::error::{LandingError, LandingResult};
use crate::widgets::{Rejection, Transition, Widget};

const GENERATION_LABEL: &str = "simulator.generation";

/// Separator between tags in the selection summary.
const SUMMARY_SEPARATOR: &str = " + ";

/// Ordered tag selection with a fixed capacity.
///
/// Click order is kept because the summary renders tags in that order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagSelection {
    tags: Vec<String>,
    capacity: usize,
}

impl TagSelection {
    #[must_use]
    pub const fn new(capacity: usize) -> Self {
        Self {
            tags: Vec::new(),
            capacity,
        }
    }

    /// Remove `tag` if selected, otherwise append it if there is room.
    pub fn toggle(&mut self, tag: &str) -> Transition {
        if let Some(pos) = self.tags.iter().position(|t| t == tag) {
            self.tags.remove(pos);
            return Transition::Applied;
        }
        if self.tags.len() >= self.capacity {
            return Transition::Rejected(Rejection::AtCapacity);
        }
        self.tags.push(tag.to_string());
        Transition::Applied
    }

    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.tags
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.tags.len() >= self.capacity
    }

    pub fn clear(&mut self) {
        self.tags.clear();
    }

    /// Tags in click order joined by `" + "`, or `None` when empty.
    #[must_use]
    pub fn summary(&self) -> Option<String> {
        (!self.tags.is_empty()).then(|| self.tags.join(SUMMARY_SEPARATOR))
    }
}

/// What the user has provided so far.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum SimulatorInput {
    /// Photo upload plus style tags.
    Tags {
        uploaded: bool,
        selection: TagSelection,
    },
    /// Free-text prompt.
    Prompt { text: String },
}

impl SimulatorInput {
    /// Empty input for `variant`.
    #[must_use]
    pub const fn new(variant: SimulatorVariant, capacity: usize) -> Self {
        match variant {
            SimulatorVariant::Tags => Self::Tags {
                uploaded: false,
                selection: TagSelection::new(capacity),
            },
            SimulatorVariant::Prompt => Self::Prompt {
                text: String::new(),
            },
        }
    }

    /// Whether the input allows a generation.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        match self {
            Self::Tags {
                uploaded,
                selection,
            } => *uploaded && !selection.is_empty(),
            Self::Prompt { text } => !text.trim().is_empty(),
        }
    }

    fn clear(&mut self) {
        match self {
            Self::Tags {
                uploaded,
                selection,
            } => {
                *uploaded = false;
                selection.clear();
            }
            Self::Prompt { text } => text.clear(),
        }
    }
}

/// Inputs captured when a generation starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationRequest {
    /// Selected tags at start, in click order.
    pub tags: Vec<String>,
    /// Prompt at start (prompt variant).
    pub prompt: Option<String>,
    pub started_at: SimTime,
    /// Drawn latency.
    pub latency: SimTime,
}

/// Single-slot generation cell.
#[derive(Debug, Default)]
pub enum GenerationPhase {
    #[default]
    Idle,
    /// A generation is in flight; dropping the timer cancels it.
    Pending {
        request: GenerationRequest,
        timer: ScopedTimer,
    },
    Completed { output: String },
}

impl GenerationPhase {
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }

    /// The completed output, if any.
    #[must_use]
    pub fn output(&self) -> Option<&str> {
        match self {
            Self::Completed { output } => Some(output),
            _ => None,
        }
    }
}

/// Phase as seen by the rendering surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum PhaseView {
    Idle,
    Pending {
        started_at_ms: u64,
        completes_at_ms: u64,
    },
    Completed {
        output: String,
    },
}

/// One style tag button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagChip {
    pub label: String,
    pub selected: bool,
    /// Tag buttons stay greyed out until a photo is uploaded.
    pub enabled: bool,
}

/// Snapshot for the rendering surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimulatorView {
    pub variant: SimulatorVariant,
    pub uploaded: bool,
    pub tags: Vec<TagChip>,
    pub selection_summary: Option<String>,
    pub prompt: Option<String>,
    pub can_generate: bool,
    pub phase: PhaseView,
    pub mounted: bool,
}

/// Generation simulator widget.
pub struct Simulator {
    texts: SimulatorTexts,
    input: SimulatorInput,
    phase: GenerationPhase,
    latency: LatencyConfig,
    rng: SimRng,
    host: Rc<dyn TimerHost>,
    completed_count: u64,
    mounted: bool,
}

impl Simulator {
    /// Mount with idle state and empty input.
    ///
    /// # Errors
    ///
    /// Returns `LandingError::EmptyCatalog` if `texts.results` is empty and
    /// `LandingError::Config` for a zero tag capacity or an inverted latency
    /// range.
    pub fn mount(
        texts: SimulatorTexts,
        config: &SimulatorConfig,
        rng: SimRng,
        host: Rc<dyn TimerHost>,
    ) -> LandingResult<Self> {
        if texts.results.is_empty() {
            return Err(LandingError::EmptyCatalog);
        }
        if config.max_tags == 0 {
            return Err(LandingError::config("tag capacity must be at least 1"));
        }
        if config.latency.min_ms > config.latency.max_ms {
            return Err(LandingError::config("latency min exceeds max"));
        }

        info!(
            variant = ?config.variant,
            catalog = texts.results.len(),
            min_ms = config.latency.min_ms,
            max_ms = config.latency.max_ms,
            "simulator mounted"
        );
        Ok(Self {
            input: SimulatorInput::new(config.variant, config.max_tags),
            texts,
            phase: GenerationPhase::Idle,
            latency: config.latency,
            rng,
            host,
            completed_count: 0,
            mounted: true,
        })
    }

    #[must_use]
    pub const fn input(&self) -> &SimulatorInput {
        &self.input
    }

    #[must_use]
    pub const fn phase(&self) -> &GenerationPhase {
        &self.phase
    }

    /// Canned outputs a generation can produce.
    #[must_use]
    pub fn catalog(&self) -> &[String] {
        &self.texts.results
    }

    /// Number of generations that reached `Completed`.
    #[must_use]
    pub const fn completed_count(&self) -> u64 {
        self.completed_count
    }

    /// Tag selection (tag variant only).
    #[must_use]
    pub fn selection(&self) -> Option<&TagSelection> {
        match &self.input {
            SimulatorInput::Tags { selection, .. } => Some(selection),
            SimulatorInput::Prompt { .. } => None,
        }
    }

    /// Mark the photo as uploaded.
    pub fn upload(&mut self) -> Transition {
        if !self.mounted {
            return reject("upload", Rejection::Unmounted);
        }
        match &mut self.input {
            SimulatorInput::Tags { uploaded, .. } => {
                *uploaded = true;
                debug!("simulator photo uploaded");
                Transition::Applied
            }
            SimulatorInput::Prompt { .. } => reject("upload", Rejection::WrongVariant),
        }
    }

    /// Replace the prompt text.
    pub fn set_prompt(&mut self, value: &str) -> Transition {
        if !self.mounted {
            return reject("set_prompt", Rejection::Unmounted);
        }
        match &mut self.input {
            SimulatorInput::Prompt { text } => {
                value.clone_into(text);
                debug!(chars = text.chars().count(), "simulator prompt set");
                Transition::Applied
            }
            SimulatorInput::Tags { .. } => reject("set_prompt", Rejection::WrongVariant),
        }
    }

    /// Select or deselect a style tag. Legal in every phase.
    pub fn toggle_tag(&mut self, tag: &str) -> Transition {
        if !self.mounted {
            return reject("toggle_tag", Rejection::Unmounted);
        }
        let SimulatorInput::Tags { selection, .. } = &mut self.input else {
            return reject("toggle_tag", Rejection::WrongVariant);
        };
        let transition = selection.toggle(tag);
        match transition {
            Transition::Applied => debug!(tag, selected = ?selection.as_slice(), "tag toggled"),
            Transition::Rejected(rejection) => {
                debug!(tag, %rejection, "tag toggle rejected");
            }
        }
        transition
    }

    /// Whether `generate` would be accepted now.
    #[must_use]
    pub fn can_generate(&self) -> bool {
        self.mounted && self.input.is_ready() && !self.phase.is_pending()
    }

    /// Start a generation.
    ///
    /// Accepted from `Idle` or `Completed` when the input is ready. The
    /// previous result is discarded.
    pub fn generate(&mut self) -> Transition {
        if !self.mounted {
            return reject("generate", Rejection::Unmounted);
        }
        if self.phase.is_pending() {
            return reject("generate", Rejection::Pending);
        }
        if !self.input.is_ready() {
            return reject("generate", Rejection::InputNotReady);
        }

        let latency = SimTime::from_millis(
            self.rng
                .gen_range_u64(self.latency.min_ms, self.latency.max_ms),
        );
        let request = match &self.input {
            SimulatorInput::Tags { selection, .. } => GenerationRequest {
                tags: selection.as_slice().to_vec(),
                prompt: None,
                started_at: self.host.now(),
                latency,
            },
            SimulatorInput::Prompt { text } => GenerationRequest {
                tags: Vec::new(),
                prompt: Some(text.clone()),
                started_at: self.host.now(),
                latency,
            },
        };
        let timer = ScopedTimer::arm(&self.host, latency, GENERATION_LABEL);
        debug!(
            latency_ms = latency.as_millis(),
            due_ms = timer.due().as_millis(),
            tags = ?request.tags,
            "generation started"
        );
        self.phase = GenerationPhase::Pending { request, timer };
        Transition::Applied
    }

    /// Clear a completed result and all input.
    pub fn reset(&mut self) -> Transition {
        if !self.mounted {
            return reject("reset", Rejection::Unmounted);
        }
        if !matches!(self.phase, GenerationPhase::Completed { .. }) {
            return reject("reset", Rejection::NotCompleted);
        }
        self.phase = GenerationPhase::Idle;
        self.input.clear();
        debug!("simulator reset");
        Transition::Applied
    }

    fn compose_output(&mut self, request: &GenerationRequest) -> String {
        let base = self
            .rng
            .choose(&self.texts.results)
            .cloned()
            .unwrap_or_default();
        if request.tags.is_empty() {
            return base;
        }
        format!(
            "{base}\n\n🎯 {}: {}",
            self.texts.applied_styles,
            request.tags.join(SUMMARY_SEPARATOR)
        )
    }
}

fn reject(action: &'static str, rejection: Rejection) -> Transition {
    debug!(action, %rejection, "simulator intent rejected");
    Transition::Rejected(rejection)
}

impl Widget for Simulator {
    type View = SimulatorView;

    fn name(&self) -> &'static str {
        "simulator"
    }

    fn view(&self) -> SimulatorView {
        let (uploaded, selection, prompt) = match &self.input {
            SimulatorInput::Tags {
                uploaded,
                selection,
            } => (*uploaded, Some(selection), None),
            SimulatorInput::Prompt { text } => (false, None, Some(text.clone())),
        };
        let tags = selection
            .map(|s| {
                self.texts
                    .tags
                    .iter()
                    .map(|label| TagChip {
                        label: label.clone(),
                        selected: s.contains(label),
                        enabled: uploaded,
                    })
                    .collect()
            })
            .unwrap_or_default();
        let phase = match &self.phase {
            GenerationPhase::Idle => PhaseView::Idle,
            GenerationPhase::Pending { request, timer } => PhaseView::Pending {
                started_at_ms: request.started_at.as_millis(),
                completes_at_ms: timer.due().as_millis(),
            },
            GenerationPhase::Completed { output } => PhaseView::Completed {
                output: output.clone(),
            },
        };

        SimulatorView {
            variant: match self.input {
                SimulatorInput::Tags { .. } => SimulatorVariant::Tags,
                SimulatorInput::Prompt { .. } => SimulatorVariant::Prompt,
            },
            uploaded,
            tags,
            selection_summary: selection.and_then(TagSelection::summary),
            prompt,
            can_generate: self.can_generate(),
            phase,
            mounted: self.mounted,
        }
    }

    fn owns(&self, fired: &FiredTimer) -> bool {
        match &self.phase {
            GenerationPhase::Pending { timer, .. } => timer.matches(fired),
            _ => false,
        }
    }

    fn on_timer(&mut self, fired: &FiredTimer) -> Transition {
        if !self.mounted {
            return reject("complete", Rejection::Unmounted);
        }
        if !self.owns(fired) {
            return reject("complete", Rejection::StaleTimer);
        }

        let GenerationPhase::Pending { request, .. } = std::mem::take(&mut self.phase) else {
            return reject("complete", Rejection::StaleTimer);
        };
        let output = self.compose_output(&request);
        self.completed_count += 1;
        debug!(
            at_ms = fired.due.as_millis(),
            completed = self.completed_count,
            "generation completed"
        );
        self.phase = GenerationPhase::Completed { output };
        Transition::Applied
    }

    fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        let was_pending = self.phase.is_pending();
        self.phase = GenerationPhase::Idle;
        self.mounted = false;
        info!(was_pending, completed = self.completed_count, "simulator unmounted");
    }

    fn is_mounted(&self) -> bool {
        self.mounted
    }
}

impl std::fmt::Debug for Simulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulator")
            .field("input", &self.input)
            .field("phase", &self.phase)
            .field("latency", &self.latency)
            .field("mounted", &self.mounted)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use super::*;
    use crate::engine::VirtualScheduler;

    pub(crate) fn texts() -> SimulatorTexts {
        SimulatorTexts {
            title: "Simulador".into(),
            subtitle: String::new(),
            tags: ["Anime", "Retro", "Cyberpunk", "Fantasía"]
                .map(String::from)
                .to_vec(),
            generate: "Generar".into(),
            result: "Resultado".into(),
            continue_story: "Continuar".into(),
            generate_another: "Generar otra".into(),
            upload_photo: "Sube tu foto".into(),
            select_style: "Elige estilo".into(),
            applied_styles: "Estilos aplicados".into(),
            results: ["uno", "dos", "tres"].map(String::from).to_vec(),
        }
    }

    fn ms(v: u64) -> SimTime {
        SimTime::from_millis(v)
    }

    fn mount_with(config: &SimulatorConfig) -> (Rc<VirtualScheduler>, Simulator) {
        let scheduler = Rc::new(VirtualScheduler::new());
        let host: Rc<dyn TimerHost> = scheduler.clone();
        let sim = Simulator::mount(texts(), config, SimRng::new(42), host).unwrap();
        (scheduler, sim)
    }

    fn mount() -> (Rc<VirtualScheduler>, Simulator) {
        mount_with(&SimulatorConfig::default())
    }

    fn fire_all(scheduler: &VirtualScheduler, sim: &mut Simulator, until: SimTime) -> usize {
        let mut applied = 0;
        while let Some(timer) = scheduler.pop_due(until) {
            if sim.on_timer(&timer).is_applied() {
                applied += 1;
            }
        }
        scheduler.advance_to(until);
        applied
    }

    #[test]
    fn test_selection_capacity_scenario() {
        let mut sel = TagSelection::new(2);
        assert!(sel.toggle("Anime").is_applied());
        assert_eq!(sel.as_slice(), ["Anime"]);
        assert!(sel.toggle("Retro").is_applied());
        assert_eq!(sel.as_slice(), ["Anime", "Retro"]);
        assert_eq!(
            sel.toggle("Cyberpunk"),
            Transition::Rejected(Rejection::AtCapacity)
        );
        assert_eq!(sel.as_slice(), ["Anime", "Retro"]);
        assert!(sel.is_full());
        assert_eq!(sel.summary().as_deref(), Some("Anime + Retro"));
    }

    #[test]
    fn test_selection_toggle_removes_and_keeps_order() {
        let mut sel = TagSelection::new(2);
        sel.toggle("Anime");
        sel.toggle("Retro");
        sel.toggle("Anime");
        assert_eq!(sel.as_slice(), ["Retro"]);
        sel.toggle("Anime");
        assert_eq!(sel.summary().as_deref(), Some("Retro + Anime"));
        sel.clear();
        assert_eq!(sel.summary(), None);
    }

    #[test]
    fn test_mount_rejects_empty_catalog() {
        let mut t = texts();
        t.results.clear();
        let host: Rc<dyn TimerHost> = Rc::new(VirtualScheduler::new());
        let err = Simulator::mount(t, &SimulatorConfig::default(), SimRng::new(1), host).unwrap_err();
        assert!(matches!(err, LandingError::EmptyCatalog));
    }

    #[test]
    fn test_generate_requires_input() {
        let (scheduler, mut sim) = mount();
        assert!(!sim.can_generate());
        assert_eq!(sim.generate(), Transition::Rejected(Rejection::InputNotReady));

        sim.toggle_tag("Anime");
        assert_eq!(sim.generate(), Transition::Rejected(Rejection::InputNotReady));

        sim.upload();
        assert!(sim.can_generate());
        assert!(sim.generate().is_applied());
        assert_eq!(scheduler.pending_count(), 1);
    }

    #[test]
    fn test_upload_without_tags_not_ready() {
        let (_scheduler, mut sim) = mount();
        sim.upload();
        assert!(!sim.can_generate());
    }

    #[test]
    fn test_full_lifecycle() {
        let (scheduler, mut sim) = mount();
        sim.upload();
        sim.toggle_tag("Anime");
        sim.toggle_tag("Retro");
        assert!(sim.generate().is_applied());
        assert!(sim.phase().is_pending());

        let GenerationPhase::Pending { request, timer } = sim.phase() else {
            panic!("expected pending");
        };
        assert_eq!(request.latency, ms(2500));
        assert_eq!(timer.due(), ms(2500));

        assert_eq!(fire_all(&scheduler, &mut sim, ms(2499)), 0);
        assert!(sim.phase().is_pending());
        assert_eq!(fire_all(&scheduler, &mut sim, ms(2500)), 1);

        let output = sim.phase().output().unwrap();
        let (base, summary) = output.split_once("\n\n").unwrap();
        assert!(sim.catalog().iter().any(|c| c == base));
        assert_eq!(summary, "🎯 Estilos aplicados: Anime + Retro");
        assert_eq!(sim.completed_count(), 1);
        assert!(scheduler.is_idle());
    }

    #[test]
    fn test_double_generate_schedules_once() {
        let (scheduler, mut sim) = mount();
        sim.upload();
        sim.toggle_tag("Anime");
        assert!(sim.generate().is_applied());
        assert_eq!(sim.generate(), Transition::Rejected(Rejection::Pending));
        assert_eq!(scheduler.pending_count(), 1);
        assert_eq!(fire_all(&scheduler, &mut sim, ms(10_000)), 1);
        assert_eq!(sim.completed_count(), 1);
    }

    #[test]
    fn test_summary_uses_inputs_at_start() {
        let (scheduler, mut sim) = mount();
        sim.upload();
        sim.toggle_tag("Anime");
        sim.generate();
        // Still legal while pending, but does not affect the running request.
        assert!(sim.toggle_tag("Retro").is_applied());
        fire_all(&scheduler, &mut sim, ms(3000));
        assert!(sim.phase().output().unwrap().ends_with(": Anime"));
    }

    #[test]
    fn test_generate_another_from_completed() {
        let (scheduler, mut sim) = mount();
        sim.upload();
        sim.toggle_tag("Retro");
        sim.generate();
        fire_all(&scheduler, &mut sim, ms(3000));
        assert!(sim.can_generate());
        assert!(sim.generate().is_applied());
        assert!(sim.phase().output().is_none());
        fire_all(&scheduler, &mut sim, ms(6000));
        assert_eq!(sim.completed_count(), 2);
    }

    #[test]
    fn test_reset_only_from_completed() {
        let (scheduler, mut sim) = mount();
        assert_eq!(sim.reset(), Transition::Rejected(Rejection::NotCompleted));
        sim.upload();
        sim.toggle_tag("Anime");
        sim.generate();
        assert_eq!(sim.reset(), Transition::Rejected(Rejection::NotCompleted));
        fire_all(&scheduler, &mut sim, ms(3000));

        assert!(sim.reset().is_applied());
        assert!(matches!(sim.phase(), GenerationPhase::Idle));
        assert!(sim.selection().unwrap().is_empty());
        assert!(!sim.view().uploaded);
        assert!(!sim.can_generate());
    }

    #[test]
    fn test_unmount_while_pending_fires_nothing() {
        let (scheduler, mut sim) = mount();
        sim.upload();
        sim.toggle_tag("Anime");
        sim.generate();
        sim.unmount();

        assert!(scheduler.is_idle());
        assert!(scheduler.pop_due(ms(60_000)).is_none());
        assert!(sim.phase().output().is_none());
        assert_eq!(sim.completed_count(), 0);
        assert_eq!(sim.generate(), Transition::Rejected(Rejection::Unmounted));
        assert_eq!(sim.toggle_tag("Retro"), Transition::Rejected(Rejection::Unmounted));
    }

    #[test]
    fn test_stale_timer_after_unmount() {
        let (scheduler, mut sim) = mount();
        sim.upload();
        sim.toggle_tag("Anime");
        sim.generate();
        let fired = scheduler.pop_due(ms(3000)).unwrap();
        sim.unmount();
        assert_eq!(sim.on_timer(&fired), Transition::Rejected(Rejection::Unmounted));
        assert!(sim.phase().output().is_none());
    }

    #[test]
    fn test_prompt_variant() {
        let config = SimulatorConfig {
            variant: SimulatorVariant::Prompt,
            ..SimulatorConfig::default()
        };
        let (scheduler, mut sim) = mount_with(&config);
        assert_eq!(sim.upload(), Transition::Rejected(Rejection::WrongVariant));
        assert_eq!(sim.toggle_tag("Anime"), Transition::Rejected(Rejection::WrongVariant));

        sim.set_prompt("   \t");
        assert!(!sim.can_generate());
        sim.set_prompt("una noche en la ciudad");
        assert!(sim.can_generate());
        assert!(sim.generate().is_applied());
        fire_all(&scheduler, &mut sim, ms(3000));

        let output = sim.phase().output().unwrap();
        assert!(sim.catalog().iter().any(|c| c == output));

        sim.reset();
        assert_eq!(sim.view().prompt.as_deref(), Some(""));
    }

    #[test]
    fn test_set_prompt_rejected_in_tag_variant() {
        let (_scheduler, mut sim) = mount();
        assert_eq!(sim.set_prompt("x"), Transition::Rejected(Rejection::WrongVariant));
    }

    #[test]
    fn test_latency_range_opts_into_jitter() {
        let config = SimulatorConfig {
            latency: LatencyConfig {
                min_ms: 2000,
                max_ms: 2500,
            },
            ..SimulatorConfig::default()
        };
        let (scheduler, mut sim) = mount_with(&config);
        sim.upload();
        sim.toggle_tag("Anime");
        for _ in 0..20 {
            let start = scheduler.now();
            sim.generate();
            let due = scheduler.next_due().unwrap();
            let latency = (due - start).as_millis();
            assert!((2000..=2500).contains(&latency), "{latency}");
            fire_all(&scheduler, &mut sim, due);
        }
        assert_eq!(sim.completed_count(), 20);
    }

    #[test]
    fn test_view_chips() {
        let (_scheduler, mut sim) = mount();
        let view = sim.view();
        assert_eq!(view.tags.len(), 4);
        assert!(view.tags.iter().all(|c| !c.enabled && !c.selected));

        sim.upload();
        sim.toggle_tag("Retro");
        let view = sim.view();
        assert!(view.tags.iter().all(|c| c.enabled));
        assert!(view.tags[1].selected);
        assert_eq!(view.selection_summary.as_deref(), Some("Retro"));
        assert!(view.can_generate);
        assert_eq!(view.phase, PhaseView::Idle);
    }
}
