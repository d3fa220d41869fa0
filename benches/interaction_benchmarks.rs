//! Interaction core benchmarks.
//!
//! Measures the cost of mounting a page, of advancing virtual time through
//! long autoplay runs, and of replaying a scripted session end to end.
//!
//! Run with: cargo bench --bench interaction_benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use landing_sim::content::FloatMotion;
use landing_sim::prelude::*;

const ES: &str = include_str!("../configs/locales/es.yaml");
const EN: &str = include_str!("../configs/locales/en.yaml");

fn bundle() -> LocaleBundle {
    let catalogs = [("es", ES), ("en", EN)]
        .into_iter()
        .filter_map(|(locale, yaml)| MessageCatalog::from_yaml(locale, yaml).ok());
    match LocaleBundle::new("es", catalogs) {
        Ok(bundle) => bundle,
        Err(e) => panic!("bundled catalogs must load: {e}"),
    }
}

fn mount(config: &LandingConfig, bundle: &LocaleBundle) -> Stage {
    match Stage::mount(config, bundle, "es", &StaticAssets::new("/static")) {
        Ok(stage) => stage,
        Err(e) => panic!("default page must mount: {e}"),
    }
}

fn bench_mount(c: &mut Criterion) {
    let bundle = bundle();
    let config = LandingConfig::default();
    c.bench_function("stage_mount", |b| {
        b.iter(|| black_box(mount(&config, &bundle)));
    });
}

/// Autoplay over long virtual spans; one timer fire every five seconds.
fn bench_autoplay(c: &mut Criterion) {
    let mut group = c.benchmark_group("autoplay");
    let bundle = bundle();
    let config = LandingConfig::default();

    for minutes in [1u64, 10, 60] {
        group.bench_with_input(BenchmarkId::new("virtual_minutes", minutes), &minutes, |b, &m| {
            b.iter(|| {
                let mut stage = mount(&config, &bundle);
                black_box(stage.advance_to(SimTime::from_millis(m * 60_000)))
            });
        });
    }
    group.finish();
}

/// Repeated generate/complete cycles on one simulator.
fn bench_generation_cycles(c: &mut Criterion) {
    let bundle = bundle();
    let config = LandingConfig::builder().autoplay(false).build();
    let tag = Intent::ToggleTag {
        tag: "Anime".to_string(),
    };

    c.bench_function("generation_cycles_100", |b| {
        b.iter(|| {
            let mut stage = mount(&config, &bundle);
            stage.dispatch(&Intent::Upload);
            stage.dispatch(&tag);
            for _ in 0..100 {
                stage.dispatch(&Intent::Generate);
                stage.advance_by(SimTime::from_millis(2_500));
            }
            black_box(stage.simulator().completed_count())
        });
    });
}

fn bench_scripted_session(c: &mut Criterion) {
    let bundle = bundle();
    let config = LandingConfig::builder()
        .step(1_000, Intent::Advance)
        .step(2_000, Intent::JumpTo { index: 4 })
        .step(3_000, Intent::Upload)
        .step(3_100, Intent::ToggleTag { tag: "Anime".into() })
        .step(3_200, Intent::ToggleTag { tag: "Retro".into() })
        .step(3_300, Intent::Generate)
        .step(9_000, Intent::Reset)
        .step(20_000, Intent::Unmount)
        .build();
    let until = SimTime::from_millis(30_000);

    c.bench_function("scripted_session_with_checksum", |b| {
        b.iter(|| {
            let mut stage = mount(&config, &bundle);
            stage.run_script(&config.script, until);
            black_box(stage.timeline().checksum().ok())
        });
    });
}

fn bench_pose_sampling(c: &mut Criterion) {
    let motions: Vec<FloatMotion> = landing_sim::content::default_floating();
    c.bench_function("floating_pose_1000_frames", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for frame in 0..1_000u64 {
                let t = SimTime::from_millis(frame * 16);
                for motion in &motions {
                    acc += motion.pose_at(t).x;
                }
            }
            black_box(acc)
        });
    });
}

criterion_group!(
    benches,
    bench_mount,
    bench_autoplay,
    bench_generation_cycles,
    bench_scripted_session,
    bench_pose_sampling
);
criterion_main!(benches);
