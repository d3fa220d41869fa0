//! # landing-sim
//!
//! Deterministic interaction core for a product landing page.
//!
//! The page's two interactive pieces are modeled as owned state machines
//! driven by intents and by timers on a virtual clock:
//! - A showcase carousel with autoplay and manual navigation
//! - A generation simulator that fakes a backend with a fixed latency
//!
//! Around them sit the static-content plumbing (message catalogs with locale
//! fallback, an asset resolver, the scenario table) and a headless stage
//! that replays scripted sessions reproducibly.
//!
//! ## Example
//!
//! ```rust
//! use landing_sim::prelude::*;
//!
//! let config = LandingConfig::builder()
//!     .seed(42)
//!     .step(1_000, Intent::Advance)
//!     .build();
//! assert!(config.check().is_ok());
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::suboptimal_flops,
    clippy::too_many_lines,
    clippy::missing_const_for_fn,
)]

pub mod cli;
pub mod config;
pub mod content;
pub mod engine;
pub mod error;
pub mod session;
pub mod stage;
pub mod widgets;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{LandingConfig, LandingConfigBuilder, ScriptStep, SimulatorVariant};
    pub use crate::content::{
        AssetResolver, LocaleBundle, MessageCatalog, Scenario, StaticAssets, TranslationProvider,
    };
    pub use crate::engine::rng::SimRng;
    pub use crate::engine::{ScopedTimer, SimTime, TimerHost, VirtualScheduler};
    pub use crate::error::{LandingError, LandingResult};
    pub use crate::session::{RunOptions, Session, SessionReport};
    pub use crate::stage::{PageSnapshot, Stage, StageEvent, Timeline};
    pub use crate::widgets::{Carousel, Intent, Rejection, Simulator, Transition, Widget};
}

/// Re-export for public API
pub use error::{LandingError, LandingResult};
