//! Fixed-interval position sampling over a time range.
//!
//! Every sample is its own provider query. Nothing is cached, and a
//! sampler cannot be rewound; build a new one to sample again.

use crate::body::Body;
use crate::coordinate::Coordinate;
use crate::ephemeris::{EphemerisError, PositionProvider};
use crate::search::error::{ensure_concrete, SearchError};
use chrono::{DateTime, Duration, Utc};

/// Iterator over `start, start + interval, ...` strictly before `end`.
pub struct BatchSampler<'p, P: ?Sized> {
    provider: &'p P,
    body: Body,
    next: DateTime<Utc>,
    end: DateTime<Utc>,
    interval: Duration,
}

impl<'p, P: PositionProvider + ?Sized> BatchSampler<'p, P> {
    pub fn new(
        provider: &'p P,
        body: Body,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        interval: Duration,
    ) -> Result<Self, SearchError> {
        ensure_concrete(body)?;
        if interval <= Duration::zero() {
            return Err(SearchError::InvalidConfig("sampling interval must be positive"));
        }
        Ok(Self {
            provider,
            body,
            next: start,
            end,
            interval,
        })
    }

    /// Run every query, stopping at the first failure.
    pub fn collect_samples(self) -> Result<Vec<Coordinate>, EphemerisError> {
        self.collect()
    }
}

impl<P: PositionProvider + ?Sized> Iterator for BatchSampler<'_, P> {
    type Item = Result<Coordinate, EphemerisError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let instant = self.next;
        self.next = instant + self.interval;
        Some(Coordinate::query(self.provider, self.body, instant))
    }
}

/// The instants a sampler over the same range would visit.
pub fn sample_instants(start: DateTime<Utc>, end: DateTime<Utc>, interval: Duration) -> Vec<DateTime<Utc>> {
    let mut instants = Vec::new();
    if interval <= Duration::zero() {
        return instants;
    }
    let mut instant = start;
    while instant < end {
        instants.push(instant);
        instant = instant + interval;
    }
    instants
}

/// Sample the range on the rayon pool. The result is in chronological
/// order regardless of which query finished first.
#[cfg(feature = "parallel")]
pub fn sample_parallel<P: PositionProvider + Sync + ?Sized>(
    provider: &P,
    body: Body,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    interval: Duration,
) -> Result<Vec<Coordinate>, SearchError> {
    use rayon::prelude::*;

    ensure_concrete(body)?;
    if interval <= Duration::zero() {
        return Err(SearchError::InvalidConfig("sampling interval must be positive"));
    }

    let instants = sample_instants(start, end, interval);
    log::debug!("sampling {} {} positions in parallel", instants.len(), body);
    let samples = instants
        .par_iter()
        .map(|instant| Coordinate::query(provider, body, *instant))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(samples)
}
