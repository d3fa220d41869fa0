//! Carousel behaviour driven through a mounted stage.

#![allow(clippy::unwrap_used)]

mod common;

use common::{ms, stage};
use landing_sim::content::scenario::{Color, ScenarioSpec};
use landing_sim::prelude::*;
use landing_sim::widgets::Direction;
use proptest::prelude::*;

fn index(stage: &Stage) -> usize {
    stage.carousel().state().active_index()
}

#[test]
fn six_slides_wrap_both_ways() {
    let mut stage = stage(&LandingConfig::builder().autoplay(false).build());
    assert_eq!(index(&stage), 0);

    assert!(stage.dispatch(&Intent::Retreat).is_applied());
    assert_eq!(index(&stage), 5);
    assert_eq!(stage.carousel().state().direction(), Direction::Backward);
    assert_eq!(stage.carousel().view().slide_label, "06");

    assert!(stage.dispatch(&Intent::Advance).is_applied());
    assert_eq!(index(&stage), 0);
    assert_eq!(stage.carousel().state().direction(), Direction::Forward);
    assert_eq!(stage.carousel().view().slide_label, "01");
}

#[test]
fn autoplay_fires_once_per_interval() {
    let mut stage = stage(&LandingConfig::default());

    assert_eq!(stage.advance_to(ms(4_999)), 0);
    assert_eq!(index(&stage), 0);
    assert_eq!(stage.advance_to(ms(5_000)), 1);
    assert_eq!(index(&stage), 1);

    // Thirty seconds later the carousel has wrapped back to the start.
    stage.advance_to(ms(30_000));
    assert_eq!(stage.carousel().autoplay_count(), 6);
    assert_eq!(index(&stage), 0);
    assert_eq!(stage.pending_timers(), 1);
}

#[test]
fn manual_interaction_restarts_countdown() {
    let mut stage = stage(&LandingConfig::default());
    stage.advance_to(ms(3_000));
    stage.dispatch(&Intent::Advance);
    assert_eq!(stage.carousel().next_autoplay_at(), Some(ms(8_000)));

    // The timer armed at mount would have fired at 5000.
    assert_eq!(stage.advance_to(ms(7_999)), 0);
    assert_eq!(index(&stage), 1);
    assert_eq!(stage.advance_to(ms(8_000)), 1);
    assert_eq!(index(&stage), 2);
    assert_eq!(stage.pending_timers(), 1);
}

#[test]
fn jump_to_rearms_only_when_slide_changes() {
    let mut stage = stage(&LandingConfig::default());
    stage.advance_to(ms(2_000));

    assert!(stage.dispatch(&Intent::JumpTo { index: 0 }).is_applied());
    assert_eq!(stage.carousel().next_autoplay_at(), Some(ms(5_000)));

    assert!(stage.dispatch(&Intent::JumpTo { index: 4 }).is_applied());
    assert_eq!(index(&stage), 4);
    assert_eq!(stage.carousel().next_autoplay_at(), Some(ms(7_000)));
    assert_eq!(stage.carousel().state().direction(), Direction::Forward);
}

#[test]
fn out_of_range_jump_is_a_no_op() {
    let mut stage = stage(&LandingConfig::default());
    stage.dispatch(&Intent::JumpTo { index: 2 });
    let before = stage.carousel().view();

    let outcome = stage.dispatch(&Intent::JumpTo { index: 6 });
    assert_eq!(
        outcome,
        Transition::Rejected(Rejection::OutOfRange { index: 6, len: 6 })
    );
    assert_eq!(stage.carousel().view(), before);
    assert_eq!(stage.timeline().rejected_count(), 1);
}

#[test]
fn single_slide_manual_steps_keep_autoplay_countdown() {
    let config = LandingConfig::builder()
        .scenarios(vec![ScenarioSpec {
            image: "/images/showcase/Escena1.png".into(),
            theme_color: Color::from_rgb(0x83_18_43),
            accent_color: Color::from_rgb(0xec_48_99),
        }])
        .build();
    let mut stage = stage(&config);

    stage.advance_to(ms(1_000));
    assert!(stage.dispatch(&Intent::Advance).is_applied());
    assert_eq!(index(&stage), 0);
    assert_eq!(stage.carousel().next_autoplay_at(), Some(ms(5_000)));

    stage.advance_to(ms(2_000));
    assert!(stage.dispatch(&Intent::Retreat).is_applied());
    assert_eq!(index(&stage), 0);
    assert_eq!(stage.carousel().next_autoplay_at(), Some(ms(5_000)));
    assert_eq!(stage.carousel().view().dots, vec![true]);

    assert_eq!(stage.advance_to(ms(5_000)), 1);
    assert_eq!(stage.carousel().next_autoplay_at(), Some(ms(10_000)));
}

#[test]
fn empty_scenario_table_fails_at_mount() {
    let config = LandingConfig::builder().scenarios(Vec::new()).build();
    assert!(matches!(config.check(), Err(LandingError::EmptyCarousel)));

    let err = Stage::mount(
        &config,
        &common::bundle(),
        "es",
        &StaticAssets::new("/static"),
    )
    .unwrap_err();
    assert!(matches!(err, LandingError::EmptyCarousel));
}

#[test]
fn autoplay_disabled_never_advances() {
    let mut stage = stage(&LandingConfig::builder().autoplay(false).build());
    assert_eq!(stage.pending_timers(), 0);
    assert_eq!(stage.advance_to(ms(60_000)), 0);
    stage.dispatch(&Intent::Advance);
    assert_eq!(stage.pending_timers(), 0);
    assert_eq!(stage.carousel().next_autoplay_at(), None);
}

#[test]
fn unmount_stops_autoplay() {
    let mut stage = stage(&LandingConfig::default());
    stage.advance_to(ms(5_000));
    stage.unmount();

    assert_eq!(stage.pending_timers(), 0);
    assert_eq!(stage.advance_to(ms(60_000)), 0);
    assert_eq!(index(&stage), 1);
    assert!(!stage.carousel().view().mounted);
}

fn carousel_intent() -> impl Strategy<Value = Intent> {
    prop_oneof![
        Just(Intent::Advance),
        Just(Intent::Retreat),
        (0usize..10).prop_map(|index| Intent::JumpTo { index }),
    ]
}

proptest! {
    #[test]
    fn prop_index_stays_in_range(
        steps in prop::collection::vec((0u64..7_000, carousel_intent()), 0..40)
    ) {
        let mut stage = stage(&LandingConfig::default());
        for (gap, intent) in &steps {
            stage.advance_by(ms(*gap));
            stage.dispatch(intent);
            let view = stage.carousel().view();
            prop_assert!(view.active_index < view.total);
            prop_assert_eq!(view.dots.iter().filter(|d| **d).count(), 1);
            prop_assert!(stage.pending_timers() <= 1);
        }
    }

    #[test]
    fn prop_advance_retreat_inverse(start in 0usize..6) {
        let mut stage = stage(&LandingConfig::builder().autoplay(false).build());
        stage.dispatch(&Intent::JumpTo { index: start });
        stage.dispatch(&Intent::Advance);
        stage.dispatch(&Intent::Retreat);
        prop_assert_eq!(index(&stage), start);
        stage.dispatch(&Intent::Retreat);
        stage.dispatch(&Intent::Advance);
        prop_assert_eq!(index(&stage), start);
    }
}
