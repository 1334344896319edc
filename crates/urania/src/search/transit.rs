//! Transit searches against a fixed reference longitude.
//!
//! Both searches walk in whole day steps and then resolve the edges of the
//! active interval by sampling each one-day bracket at the refinement
//! interval. Precision stops at that interval: there is no sub-sample
//! interpolation.
//!
//! Near a station the body can leave orb and come back within the span of
//! a single day step. The day walk cannot see that, so the bracket it
//! produces may belong to the wrong crossing. This is a known limit of the
//! method and is not corrected here.

use crate::aspects::{Aspect, AspectKind};
use crate::body::Body;
use crate::coordinate::Coordinate;
use crate::ephemeris::PositionProvider;
use crate::sampler::BatchSampler;
use crate::search::config::SearchConfig;
use crate::search::error::{ensure_concrete, SearchError};
use crate::search::AspectTarget;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Result of [`find_next_aspect`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NextAspect {
    /// Where the body was on the day the aspect was found
    pub coordinate: Coordinate,
    pub aspect: Aspect,
    /// Day steps taken past the seed
    pub steps: usize,
}

impl NextAspect {
    pub fn instant(&self) -> DateTime<Utc> {
        self.coordinate.instant
    }
}

/// Minute-resolved edges of an active aspect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitWindow {
    pub open: Coordinate,
    pub close: Coordinate,
}

impl TransitWindow {
    pub fn duration(&self) -> Duration {
        self.close.instant - self.open.instant
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.open.instant <= instant && instant <= self.close.instant
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    First,
    Last,
}

fn validate(body: Body, orb: f64, config: &SearchConfig) -> Result<(), SearchError> {
    ensure_concrete(body)?;
    config.validate().map_err(SearchError::InvalidConfig)?;
    if !(orb > 0.0) {
        return Err(SearchError::InvalidConfig("orb must be positive"));
    }
    Ok(())
}

/// Find the first day, starting at `seed`, on which `body` aspects the
/// reference.
///
/// If an aspect already holds at `seed` it is returned with zero steps.
/// Otherwise the scan moves forward one day step at a time and reports the
/// first day that matches, without refining further.
pub fn find_next_aspect<P, T>(
    provider: &P,
    body: Body,
    reference: &T,
    seed: DateTime<Utc>,
    orb: f64,
    config: &SearchConfig,
) -> Result<NextAspect, SearchError>
where
    P: PositionProvider + ?Sized,
    T: AspectTarget + ?Sized,
{
    validate(body, orb, config)?;
    let target = reference.target_longitude();

    let mut instant = seed;
    for steps in 0..=config.max_day_steps {
        config.check_cancelled()?;
        let coordinate = Coordinate::query(provider, body, instant)?;
        if let Some(aspect) = Aspect::between(coordinate.longitude(), target, orb) {
            log::debug!(
                "{} {} to {:.2} found at {} after {} steps",
                body,
                aspect.kind(),
                target,
                instant,
                steps
            );
            return Ok(NextAspect {
                coordinate,
                aspect,
                steps,
            });
        }
        instant = instant + config.day_step;
    }

    log::warn!(
        "no aspect of {} to {:.2} within {} days of {}",
        body,
        target,
        config.max_day_steps,
        seed
    );
    Err(SearchError::SearchExhausted {
        steps: config.max_day_steps,
    })
}

/// Bracket the aspect active at `seed` and resolve when it opened and
/// when it will close.
///
/// Returns `Ok(None)` when no aspect holds at `seed`. The window follows the
/// aspect kind found at `seed`; a neighbouring kind picked up under a wide
/// orb ends the window.
pub fn transiting_coordinates<P, T>(
    provider: &P,
    body: Body,
    reference: &T,
    seed: DateTime<Utc>,
    orb: f64,
    config: &SearchConfig,
) -> Result<Option<TransitWindow>, SearchError>
where
    P: PositionProvider + ?Sized,
    T: AspectTarget + ?Sized,
{
    validate(body, orb, config)?;
    let target = reference.target_longitude();

    let seeded = Coordinate::query(provider, body, seed)?;
    let kind = match Aspect::between(seeded.longitude(), target, orb) {
        Some(aspect) => aspect.kind(),
        None => return Ok(None),
    };
    let holds = |c: &Coordinate| active_kind(c, target, orb) == Some(kind);

    let day_before = walk_while_active(provider, body, seed, -config.day_step, &holds, config)?;
    let day_after = walk_while_active(provider, body, seed, config.day_step, &holds, config)?;
    log::debug!(
        "{} {} to {:.2}: day bracket {} .. {}",
        body,
        kind,
        target,
        day_before,
        day_after
    );

    let open = refine(
        provider,
        body,
        day_before,
        day_before + config.day_step,
        Edge::First,
        &holds,
        config,
    )?;
    let close = refine(
        provider,
        body,
        day_after - config.day_step,
        day_after,
        Edge::Last,
        &holds,
        config,
    )?;

    Ok(Some(TransitWindow { open, close }))
}

fn active_kind(coordinate: &Coordinate, target: f64, orb: f64) -> Option<AspectKind> {
    Aspect::between(coordinate.longitude(), target, orb).map(|aspect| aspect.kind())
}

/// Step from `start` until `holds` fails and return that instant.
fn walk_while_active<P, F>(
    provider: &P,
    body: Body,
    start: DateTime<Utc>,
    step: Duration,
    holds: &F,
    config: &SearchConfig,
) -> Result<DateTime<Utc>, SearchError>
where
    P: PositionProvider + ?Sized,
    F: Fn(&Coordinate) -> bool,
{
    let mut instant = start;
    for _ in 0..config.max_day_steps {
        config.check_cancelled()?;
        instant = instant + step;
        let coordinate = Coordinate::query(provider, body, instant)?;
        if !holds(&coordinate) {
            return Ok(instant);
        }
    }

    log::warn!(
        "{} still in aspect after {} steps from {}",
        body,
        config.max_day_steps,
        start
    );
    Err(SearchError::SearchExhausted {
        steps: config.max_day_steps,
    })
}

/// Sample `[from, to]` at the refinement interval and pick the first or
/// last sample for which `holds` is true.
fn refine<P, F>(
    provider: &P,
    body: Body,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    edge: Edge,
    holds: &F,
    config: &SearchConfig,
) -> Result<Coordinate, SearchError>
where
    P: PositionProvider + ?Sized,
    F: Fn(&Coordinate) -> bool,
{
    config.check_cancelled()?;
    let samples = BatchSampler::new(provider, body, from, to, config.refine_interval)?
        .chain(std::iter::once_with(|| Coordinate::query(provider, body, to)));

    let mut found = None;
    for sample in samples {
        let sample = sample?;
        if holds(&sample) {
            match edge {
                Edge::First => return Ok(sample),
                Edge::Last => found = Some(sample),
            }
        }
    }
    found.ok_or(SearchError::InconsistentProvider(
        "bracket endpoint was active during the day scan but not during refinement",
    ))
}
