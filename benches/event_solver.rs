use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use hifitime::Unit;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use obsplan::events::night_window;
use obsplan::time::parse_date;
use obsplan::{Observer, PlannerConfig};

/// Random mid-latitude site, where the Sun sets every day of the year.
#[inline]
fn random_site(rng: &mut StdRng) -> Observer {
    let lon = rng.random_range(-180.0..180.0);
    let lat = rng.random_range(-55.0..=55.0);
    Observer::new(lon, lat, 0.0, None).unwrap()
}

fn bench_night_window(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0xDEADBEEF);
    let config = PlannerConfig::default();
    let first_day = parse_date("2020-01-01").unwrap();

    c.bench_function("night_window/random_site_and_day", |b| {
        b.iter_batched(
            || {
                let site = random_site(&mut rng);
                let date = first_day + Unit::Day * rng.random_range(0..366_i64);
                (site, date)
            },
            |(site, date)| {
                let window = night_window(&site, black_box(date), &config).unwrap();
                black_box(window);
            },
            BatchSize::SmallInput,
        )
    });
}

/// Same sites with a tight tolerance: cost of the Brent refinement.
fn bench_tight_tolerance(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0xBADF00D);
    let mut config = PlannerConfig::default();
    config.solver.tolerance_seconds = 1e-3;
    let date = parse_date("2020-06-21").unwrap();

    c.bench_function("night_window/tolerance_1ms", |b| {
        b.iter_batched(
            || random_site(&mut rng),
            |site| {
                let window = night_window(&site, black_box(date), &config).unwrap();
                black_box(window);
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_night_window, bench_tight_tolerance);
criterion_main!(benches);
