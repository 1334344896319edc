//! Immutable position snapshots of one body at one instant.

use crate::body::Body;
use crate::ephemeris::{EphemerisError, Position, PositionProvider};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub body: Body,
    pub instant: DateTime<Utc>,
    pub position: Position,
}

impl Coordinate {
    pub fn new(body: Body, instant: DateTime<Utc>, position: Position) -> Self {
        Self {
            body,
            instant,
            position,
        }
    }

    /// Ask the provider where `body` is at `instant`.
    pub fn query<P: PositionProvider + ?Sized>(
        provider: &P,
        body: Body,
        instant: DateTime<Utc>,
    ) -> Result<Self, EphemerisError> {
        let position = provider.position(body, instant)?;
        Ok(Self::new(body, instant, position))
    }

    pub fn longitude(&self) -> f64 {
        self.position.longitude
    }

    pub fn speed(&self) -> f64 {
        self.position.speed_longitude
    }

    pub fn is_retrograde(&self) -> bool {
        self.position.is_retrograde()
    }
}
