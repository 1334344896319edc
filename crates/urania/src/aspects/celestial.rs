use crate::aspects::types::{Aspect, AspectKind};
use crate::body::Body;
use crate::coordinate::Coordinate;
use crate::ephemeris::{EphemerisError, PositionProvider};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// An aspect bound to the ordered pair of bodies that formed it.
///
/// `(sun, moon)` and `(moon, sun)` are different values: equality and
/// hashing follow the order in which the bodies were given.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CelestialAspect {
    pub kind: AspectKind,
    pub body1: Body,
    pub body2: Body,
    /// `anchor(kind) + remainder`
    pub angle: f64,
}

impl CelestialAspect {
    pub fn new(body1: Body, body2: Body, aspect: Aspect) -> Self {
        Self {
            kind: aspect.kind(),
            body1,
            body2,
            angle: aspect.angle(),
        }
    }

    pub fn from_longitudes(body1: Body, body2: Body, lon1: f64, lon2: f64, orb: f64) -> Option<Self> {
        Aspect::between(lon1, lon2, orb).map(|aspect| Self::new(body1, body2, aspect))
    }

    pub fn from_coordinates(first: &Coordinate, second: &Coordinate, orb: f64) -> Option<Self> {
        Self::from_longitudes(first.body, second.body, first.longitude(), second.longitude(), orb)
    }

    /// Query both bodies at `instant` and classify their separation.
    pub fn between_bodies<P: PositionProvider + ?Sized>(
        provider: &P,
        body1: Body,
        body2: Body,
        instant: DateTime<Utc>,
        orb: f64,
    ) -> Result<Option<Self>, EphemerisError> {
        let first = Coordinate::query(provider, body1, instant)?;
        let second = Coordinate::query(provider, body2, instant)?;
        Ok(Self::from_coordinates(&first, &second, orb))
    }

    /// Recover the angular relationship this value was built from.
    pub fn aspect(&self) -> Aspect {
        Aspect::from_angle(self.kind, self.angle)
    }

    pub fn remainder(&self) -> f64 {
        self.aspect().remainder()
    }
}

impl PartialEq for CelestialAspect {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.body1 == other.body1
            && self.body2 == other.body2
            && self.angle.to_bits() == other.angle.to_bits()
    }
}

impl Eq for CelestialAspect {}

impl Hash for CelestialAspect {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.body1.hash(state);
        self.body2.hash(state);
        self.angle.to_bits().hash(state);
    }
}

/// Whether two bodies are moving towards exactness of `anchor`.
///
/// Projects the signed separation a tenth of a day ahead using the
/// longitude speeds and compares distances from the anchor.
pub fn is_applying(lon1: f64, lon2: f64, speed1: f64, speed2: f64, anchor: f64) -> bool {
    let relative_speed = speed1 - speed2;
    let current_angle = crate::aspects::types::separation(lon1, lon2);

    if relative_speed.abs() < 0.01 {
        return current_angle < anchor + 0.5;
    }

    let signed_diff = normalize_pm180(lon1 - lon2);
    let current_distance = (current_angle - anchor).abs();

    let time_step = 0.1;
    let future_angle = normalize_pm180(signed_diff + relative_speed * time_step).abs();
    let future_distance = (future_angle - anchor).abs();

    future_distance < current_distance
}

fn normalize_pm180(deg: f64) -> f64 {
    let d = deg.rem_euclid(360.0);
    if d > 180.0 {
        d - 360.0
    } else {
        d
    }
}
