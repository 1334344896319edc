use crate::body::Body;
use crate::ephemeris::EphemerisError;
use thiserror::Error;

/// Errors from the temporal searches.
///
/// "Not in aspect" and "no relationship" are not errors; they come back as
/// `None`. These variants mean the search could not give a confirmed answer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    #[error("{0} is not a concrete body")]
    InvalidBody(Body),
    #[error("{0} is not part of this chart")]
    BodyNotInChart(Body),
    #[error("chart has no house cusps")]
    MissingHouses,
    #[error("search gave up after {steps} day steps")]
    SearchExhausted { steps: usize },
    #[error("search cancelled")]
    Cancelled,
    #[error("invalid search configuration: {0}")]
    InvalidConfig(&'static str),
    #[error("position provider returned inconsistent results: {0}")]
    InconsistentProvider(&'static str),
    #[error(transparent)]
    Ephemeris(#[from] EphemerisError),
}

/// Reject the `all`/`none` sentinels where a real body is needed.
pub fn ensure_concrete(body: Body) -> Result<Body, SearchError> {
    if body.is_sentinel() {
        return Err(SearchError::InvalidBody(body));
    }
    Ok(body)
}
