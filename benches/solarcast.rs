use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use solarcast::{rank, LatLon, Place, SolarEstimator, WeatherSample};

fn synthetic_samples(count: usize) -> Vec<WeatherSample> {
    (0..count)
        .map(|i| {
            let lat = -60.0 + (i as f64 * 0.137).rem_euclid(120.0);
            let lon = -180.0 + (i as f64 * 1.73).rem_euclid(360.0);
            let cloud = (i as f64 * 7.3).rem_euclid(100.0);
            WeatherSample::new(Place::named(LatLon(lat, lon), format!("r{}", i)), cloud, 25.0)
        })
        .collect()
}

fn bench_solarcast(c: &mut Criterion) {
    let estimator = SolarEstimator::for_date(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
    let one = synthetic_samples(1);
    let thousand = synthetic_samples(1000);

    c.bench_function("estimate", |b| {
        b.iter(|| estimator.estimate(black_box(&one[0])))
    });
    c.bench_function("rank_1000", |b| {
        b.iter(|| rank(&estimator, black_box(&thousand)))
    });
}

criterion_group!(benches, bench_solarcast);
criterion_main!(benches);
