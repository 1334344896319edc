use chrono::{DateTime, Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use urania::ephemeris::{EphemerisError, Position, PositionProvider};
use urania::search::{find_next_aspect, transiting_coordinates, SearchConfig};
use urania::{BatchSampler, Body};

/// One degree a day from 0 Aries at J2000 midnight.
struct SteadyBody;

impl PositionProvider for SteadyBody {
    fn position(&self, _body: Body, instant: DateTime<Utc>) -> Result<Position, EphemerisError> {
        let days = (instant - epoch()).num_seconds() as f64 / 86_400.0;
        Ok(Position {
            longitude: days.rem_euclid(360.0),
            latitude: 0.0,
            distance: 1.0,
            speed_longitude: 1.0,
            speed_latitude: 0.0,
            speed_distance: 0.0,
        })
    }
}

fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap()
}

fn bench_sampler(c: &mut Criterion) {
    c.bench_function("sample_one_day_by_minute", |b| {
        b.iter(|| {
            BatchSampler::new(&SteadyBody, Body::Mars, epoch(), epoch() + Duration::days(1), Duration::minutes(1))
                .unwrap()
                .collect_samples()
        })
    });
}

fn bench_searches(c: &mut Criterion) {
    let config = SearchConfig::default();

    c.bench_function("find_next_aspect", |b| {
        b.iter(|| find_next_aspect(&SteadyBody, Body::Mars, &black_box(200.0), epoch(), 2.0, &config))
    });

    let seed = epoch() + Duration::days(100);
    c.bench_function("transiting_coordinates", |b| {
        b.iter(|| transiting_coordinates(&SteadyBody, Body::Mars, &black_box(100.0), seed, 2.5, &config))
    });
}

criterion_group!(benches, bench_sampler, bench_searches);
criterion_main!(benches);
