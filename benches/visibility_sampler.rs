use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use obsplan::events::night_window;
use obsplan::sampler::{airmass_series, altaz_track};
use obsplan::{observatory, CelestialTarget, PlannerConfig};

/// Random target uniform on the sphere.
#[inline]
fn random_target(rng: &mut StdRng) -> CelestialTarget {
    let ra = rng.random::<f64>() * std::f64::consts::TAU;
    let dec = (rng.random_range(-1.0..=1.0_f64)).asin();
    CelestialTarget::new("bench", ra, dec, None).unwrap()
}

fn bench_airmass_series(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0xDEADBEEF);
    let site = observatory("Mount Graham").unwrap();
    let config = PlannerConfig::default().with_date("2020-06-21");
    let window = night_window(&site, config.resolve_date().unwrap(), &config).unwrap();

    c.bench_function("airmass_series/100_samples", |b| {
        b.iter_batched(
            || random_target(&mut rng),
            |target| {
                let series = airmass_series(&site, &target, black_box(&window), 100, 3.5).unwrap();
                black_box(series);
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_altaz_track(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0xBADF00D);
    let site = observatory("Paranal").unwrap();
    let config = PlannerConfig::default().with_date("2020-06-21");
    let window = night_window(&site, config.resolve_date().unwrap(), &config).unwrap();

    c.bench_function("altaz_track/one_minute_step", |b| {
        b.iter_batched(
            || random_target(&mut rng),
            |target| {
                let track =
                    altaz_track(&site, &target, black_box(&window), config.track_step()).unwrap();
                black_box(track);
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_airmass_series, bench_altaz_track);
criterion_main!(benches);
