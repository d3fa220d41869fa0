//! Shared fixtures for integration tests.

#![allow(dead_code, clippy::unwrap_used)]

use landing_sim::prelude::*;

pub const ES: &str = include_str!("../../configs/locales/es.yaml");
pub const EN: &str = include_str!("../../configs/locales/en.yaml");

pub fn bundle() -> LocaleBundle {
    LocaleBundle::new(
        "es",
        [
            MessageCatalog::from_yaml("es", ES).unwrap(),
            MessageCatalog::from_yaml("en", EN).unwrap(),
        ],
    )
    .unwrap()
}

pub fn stage(config: &LandingConfig) -> Stage {
    Stage::mount(config, &bundle(), "es", &StaticAssets::new("/static")).unwrap()
}

pub fn ms(v: u64) -> SimTime {
    SimTime::from_millis(v)
}
