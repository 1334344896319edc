mod common;

use chrono::Duration;
use common::{epoch, FakeSky};
use urania::{BatchSampler, Body};

#[test]
fn test_sampler_follows_the_provider() {
    let sky = FakeSky::new().linear(Body::Moon, 350.0, 12.0);
    let samples = BatchSampler::new(&sky, Body::Moon, epoch(), epoch() + Duration::days(2), Duration::hours(6))
        .unwrap()
        .collect_samples()
        .unwrap();

    assert_eq!(samples.len(), 8);
    assert_eq!(samples[0].longitude(), 350.0);
    // 350 + 12 * 0.75 wraps past 0 Aries
    assert!((samples[3].longitude() - 359.0).abs() < 1e-9);
    assert!((samples[4].longitude() - 2.0).abs() < 1e-9);
    assert!(samples.iter().all(|c| c.body == Body::Moon));
}

#[test]
fn test_sampler_stops_on_provider_error() {
    let sky = FakeSky::new();
    let mut sampler =
        BatchSampler::new(&sky, Body::Pluto, epoch(), epoch() + Duration::days(1), Duration::hours(1)).unwrap();
    assert!(sampler.next().unwrap().is_err());
}

#[cfg(feature = "parallel")]
#[test]
fn test_parallel_matches_sequential() {
    use urania::sampler::sample_parallel;

    let sky = FakeSky::new().oscillating(Body::Mercury, 100.0, 15.0, 116.0);
    let end = epoch() + Duration::days(30);
    let sequential = BatchSampler::new(&sky, Body::Mercury, epoch(), end, Duration::hours(1))
        .unwrap()
        .collect_samples()
        .unwrap();
    let parallel = sample_parallel(&sky, Body::Mercury, epoch(), end, Duration::hours(1)).unwrap();

    assert_eq!(parallel.len(), 720);
    assert_eq!(sequential, parallel);
}
