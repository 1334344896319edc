mod common;

use chrono::Duration;
use common::{days, epoch, init_logging, FakeSky};
use urania::aspects::{Aspect, AspectKind};
use urania::search::{
    find_next_aspect, transiting_coordinates, CancelToken, SearchConfig, SearchError,
};
use urania::Body;

#[test]
fn test_window_edges_resolve_to_the_minute() {
    init_logging();
    let sky = FakeSky::new().linear(Body::Mars, 0.0, 1.0);
    let config = SearchConfig::default();
    let seed = epoch() + days(100.0);

    let window = transiting_coordinates(&sky, Body::Mars, &100.0, seed, 2.5, &config)
        .unwrap()
        .unwrap();

    assert_eq!(window.open.instant, epoch() + days(97.5));
    assert_eq!(window.close.instant, epoch() + days(102.5));
    assert!(window.contains(seed));
    assert_eq!(window.duration(), Duration::days(5));
}

#[test]
fn test_window_with_seed_off_midnight() {
    let sky = FakeSky::new().linear(Body::Mars, 0.0, 1.0);
    let config = SearchConfig::default();
    let seed = epoch() + days(100.0) + Duration::minutes(390);

    let window = transiting_coordinates(&sky, Body::Mars, &100.0, seed, 2.5, &config)
        .unwrap()
        .unwrap();

    assert_eq!(window.open.instant, epoch() + days(97.5));
    assert_eq!(window.close.instant, epoch() + days(102.5));
    assert!(window.open.instant <= seed && seed <= window.close.instant);
}

#[test]
fn test_window_edges_are_active() {
    let sky = FakeSky::new().linear(Body::Venus, 10.0, 1.2);
    let config = SearchConfig::default();
    let target = 130.0;
    // Venus reaches 130 - 60 = 70 (sextile) on day 50
    let seed = epoch() + days(50.0);

    let window = transiting_coordinates(&sky, Body::Venus, &target, seed, 3.0, &config)
        .unwrap()
        .unwrap();

    for edge in [window.open, window.close] {
        let aspect = Aspect::between(edge.longitude(), target, 3.0).unwrap();
        assert_eq!(aspect.kind(), AspectKind::Sextile);
    }
    let before = sky_longitude(&sky, Body::Venus, window.open.instant - Duration::minutes(1));
    assert!(Aspect::between(before, target, 3.0).is_none());
    let after = sky_longitude(&sky, Body::Venus, window.close.instant + Duration::minutes(1));
    assert!(Aspect::between(after, target, 3.0).is_none());
}

fn sky_longitude(sky: &FakeSky, body: Body, instant: chrono::DateTime<chrono::Utc>) -> f64 {
    use urania::PositionProvider;
    sky.position(body, instant).unwrap().longitude
}

#[test]
fn test_retrograde_window() {
    // Longitude swings around 100 with a 40-day period, moving backwards
    // through 100 on day 20
    let sky = FakeSky::new().oscillating(Body::Mercury, 100.0, 10.0, 40.0);
    let config = SearchConfig::default();
    let seed = epoch() + days(20.0);

    let window = transiting_coordinates(&sky, Body::Mercury, &100.0, seed, 2.5, &config)
        .unwrap()
        .unwrap();

    assert!(window.open.instant > epoch() + days(18.0));
    assert!(window.open.instant < epoch() + days(19.0));
    assert!(window.close.instant > epoch() + days(21.0));
    assert!(window.close.instant < epoch() + days(22.0));
    assert!(window.contains(seed));
    assert!(window.open.is_retrograde());
}

#[test]
fn test_no_window_when_not_in_aspect() {
    let sky = FakeSky::new().linear(Body::Mars, 0.0, 1.0);
    let config = SearchConfig::default();
    let seed = epoch() + days(50.0);

    let window = transiting_coordinates(&sky, Body::Mars, &100.0, seed, 2.5, &config).unwrap();
    assert!(window.is_none());
}

#[test]
fn test_find_next_aspect_scans_forward() {
    let sky = FakeSky::new().linear(Body::Mars, 0.0, 1.0);
    let config = SearchConfig::default();

    // Square to 100 opens once Mars reaches 7.5
    let hit = find_next_aspect(&sky, Body::Mars, &100.0, epoch(), 2.5, &config).unwrap();
    assert_eq!(hit.steps, 8);
    assert_eq!(hit.instant(), epoch() + days(8.0));
    assert_eq!(hit.aspect, Aspect::Square(2.0));
}

#[test]
fn test_find_next_aspect_is_idempotent() {
    let sky = FakeSky::new().linear(Body::Mars, 0.0, 1.0);
    let config = SearchConfig::default();

    let first = find_next_aspect(&sky, Body::Mars, &100.0, epoch(), 2.5, &config).unwrap();
    let again = find_next_aspect(&sky, Body::Mars, &100.0, first.instant(), 2.5, &config).unwrap();

    assert_eq!(again.steps, 0);
    assert_eq!(again.aspect, first.aspect);
    assert_eq!(again.instant(), first.instant());
}

#[test]
fn test_searches_are_bounded() {
    init_logging();
    let parked = FakeSky::new().linear(Body::Saturn, 45.0, 0.0);
    let config = SearchConfig::default().with_max_day_steps(30);

    let err = find_next_aspect(&parked, Body::Saturn, &100.0, epoch(), 2.0, &config).unwrap_err();
    assert_eq!(err, SearchError::SearchExhausted { steps: 30 });

    // Permanently in aspect: the backward walk never finds an edge
    let err = transiting_coordinates(&parked, Body::Saturn, &45.0, epoch(), 2.0, &config).unwrap_err();
    assert_eq!(err, SearchError::SearchExhausted { steps: 30 });
}

#[test]
fn test_sentinel_bodies_are_rejected() {
    let sky = FakeSky::new().linear(Body::Mars, 0.0, 1.0);
    let config = SearchConfig::default();

    let err = find_next_aspect(&sky, Body::All, &100.0, epoch(), 2.0, &config).unwrap_err();
    assert_eq!(err, SearchError::InvalidBody(Body::All));
    let err = transiting_coordinates(&sky, Body::NoBody, &100.0, epoch(), 2.0, &config).unwrap_err();
    assert_eq!(err, SearchError::InvalidBody(Body::NoBody));
}

#[test]
fn test_invalid_orb_and_cancellation() {
    let sky = FakeSky::new().linear(Body::Mars, 0.0, 1.0);
    let config = SearchConfig::default();
    assert!(matches!(
        find_next_aspect(&sky, Body::Mars, &100.0, epoch(), 0.0, &config),
        Err(SearchError::InvalidConfig(_))
    ));

    let token = CancelToken::new();
    token.cancel();
    let cancelled = SearchConfig::default().with_cancel_token(token);
    assert_eq!(
        find_next_aspect(&sky, Body::Mars, &100.0, epoch(), 2.0, &cancelled).unwrap_err(),
        SearchError::Cancelled
    );
}

#[test]
fn test_provider_errors_propagate() {
    let sky = FakeSky::new();
    let config = SearchConfig::default();
    let err = find_next_aspect(&sky, Body::Pluto, &100.0, epoch(), 2.0, &config).unwrap_err();
    assert!(matches!(err, SearchError::Ephemeris(_)));
}
