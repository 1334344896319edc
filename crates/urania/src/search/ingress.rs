//! Boundary crossings: sign and house ingresses.

use crate::body::Body;
use crate::boundaries::{cusp_for_longitude, Cusp};
use crate::coordinate::Coordinate;
use crate::ephemeris::PositionProvider;
use crate::sampler::BatchSampler;
use crate::search::config::SearchConfig;
use crate::search::error::{ensure_concrete, SearchError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A body crossing from one sector into the next.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingress {
    /// First refinement sample inside the new sector
    pub coordinate: Coordinate,
    pub from: Cusp,
    pub to: Cusp,
}

/// Find the next time `body` leaves the sector it occupies at `seed`.
///
/// Scans in day steps until the enclosing cusp changes, then samples that
/// day at the refinement interval and returns the first sample in a new
/// sector. A retrograde body may leave backwards, so `to` is not always the
/// following cusp.
pub fn find_next_ingress<P>(
    provider: &P,
    body: Body,
    boundaries: &[Cusp],
    seed: DateTime<Utc>,
    config: &SearchConfig,
) -> Result<Ingress, SearchError>
where
    P: PositionProvider + ?Sized,
{
    ensure_concrete(body)?;
    config.validate().map_err(SearchError::InvalidConfig)?;

    let locate = |c: &Coordinate| {
        cusp_for_longitude(boundaries, c.longitude())
            .ok_or(SearchError::InvalidConfig("boundaries do not cover the circle"))
    };

    let start = Coordinate::query(provider, body, seed)?;
    let from = locate(&start)?;

    let mut previous = seed;
    for _ in 0..config.max_day_steps {
        config.check_cancelled()?;
        let instant = previous + config.day_step;
        let coordinate = Coordinate::query(provider, body, instant)?;
        if locate(&coordinate)?.number != from.number {
            log::debug!("{} leaves {} between {} and {}", body, from.name, previous, instant);
            let samples = BatchSampler::new(provider, body, previous, instant, config.refine_interval)?
                .chain(std::iter::once(Ok(coordinate)));
            for sample in samples {
                let sample = sample?;
                let to = locate(&sample)?;
                if to.number != from.number {
                    return Ok(Ingress {
                        coordinate: sample,
                        from: from.clone(),
                        to: to.clone(),
                    });
                }
            }
        }
        previous = instant;
    }

    log::warn!("{} stayed in {} for {} steps", body, from.name, config.max_day_steps);
    Err(SearchError::SearchExhausted {
        steps: config.max_day_steps,
    })
}
