//! Localized content, locale fallback and asset resolution.

#![allow(clippy::unwrap_used)]

mod common;

use common::{bundle, stage, EN, ES};
use landing_sim::content::{AssetRef, PageContent};
use landing_sim::prelude::*;

#[test]
fn both_catalogs_load_a_full_page() {
    for (locale, yaml) in [("es", ES), ("en", EN)] {
        let catalog = MessageCatalog::from_yaml(locale, yaml).unwrap();
        let page = PageContent::load(&catalog).unwrap();
        assert_eq!(page.locale, locale);
        assert_eq!(page.features.items.len(), 5);
        assert_eq!(page.pricing.tiers.len(), 2);
        assert_eq!(page.pricing.tiers[0].price, "0");
        assert!(page.pricing.highlighted().is_some());
        assert_eq!(page.simulator.results.len(), 5);
        assert!(page.simulator.tags.len() >= 3);
        assert_eq!(page.testimonials.items.len(), 3);
    }
}

#[test]
fn hero_headline_split() {
    let bundle = bundle();
    let page = PageContent::load(&bundle.localize("es")).unwrap();
    assert_eq!(page.hero.headline(), ("Tu historia", Some("tu estilo")));
    let page = PageContent::load(&bundle.localize("en")).unwrap();
    assert_eq!(page.hero.headline(), ("Your story", Some("your style")));
}

#[test]
fn locale_negotiation() {
    let bundle = bundle();
    assert_eq!(bundle.negotiate("es-MX"), "es");
    assert_eq!(bundle.negotiate("en_GB"), "en");
    assert_eq!(bundle.negotiate("fr"), "es");
    assert_eq!(bundle.locales().collect::<Vec<_>>(), vec!["en", "es"]);
}

#[test]
fn missing_keys_fall_back_to_default_locale() {
    let partial = MessageCatalog::from_yaml("pt", "hero:\n  title: \"Sua história, seu estilo\"\n").unwrap();
    let bundle = LocaleBundle::new(
        "es",
        [MessageCatalog::from_yaml("es", ES).unwrap(), partial],
    )
    .unwrap();

    let page = PageContent::load(&bundle.localize("pt-BR")).unwrap();
    assert_eq!(page.locale, "pt");
    assert_eq!(page.hero.title, "Sua história, seu estilo");
    assert_eq!(page.hero.cta, "Empieza gratis");
}

#[test]
fn missing_translation_is_a_load_error() {
    let bundle = LocaleBundle::new(
        "es",
        [MessageCatalog::from_yaml("es", "hero:\n  title: x\n").unwrap()],
    )
    .unwrap();
    let err = PageContent::load(&bundle.localize("es")).unwrap_err();
    assert!(err.is_content_error());
    assert!(matches!(err, LandingError::MissingTranslation { .. }));
}

#[test]
fn stage_uses_localized_scenarios() {
    let config = LandingConfig::default();
    let es = stage(&config);
    let en = Stage::mount(&config, &bundle(), "en", &StaticAssets::new("/static")).unwrap();

    let es_view = es.carousel().view();
    let en_view = en.carousel().view();
    assert_ne!(es_view.scenario.title, en_view.scenario.title);
    assert_eq!(es_view.scenario.image, en_view.scenario.image);
    assert_eq!(es_view.scenario.theme_color, en_view.scenario.theme_color);
    assert_eq!(es_view.scenario.id, 1);
}

#[test]
fn asset_urls_and_manifest() {
    let assets = StaticAssets::new("https://cdn.example.com/");
    let image: AssetRef = assets.resolve("/images/showcase/Escena1.png").unwrap();
    assert_eq!(image.url(), "https://cdn.example.com/images/showcase/Escena1.png");

    let restricted = StaticAssets::new("").with_manifest(["/images/showcase/Escena1.png"]);
    assert!(restricted.resolve("/images/showcase/Escena1.png").is_ok());
    assert!(matches!(
        restricted.resolve("/images/showcase/Escena9.png"),
        Err(LandingError::UnknownAsset(_))
    ));
}

#[test]
fn floating_images_move() {
    let mut stage = stage(&LandingConfig::default());
    let start = stage.snapshot().floating;
    stage.advance_to(SimTime::from_millis(2_750));
    let later = stage.snapshot().floating;

    assert_eq!(start.len(), later.len());
    assert!(start.iter().zip(&later).any(|(a, b)| a.pose != b.pose));
    for pose in &later {
        assert!((0.0..=1.0).contains(&pose.pose.opacity));
    }
}
