//! Sector lookup over a circular list of boundaries.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A boundary on the ecliptic: a house cusp or the start of a sign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cusp {
    /// Longitude in degrees, [0, 360)
    pub value: f64,
    pub name: String,
    /// 1..=12
    pub number: u8,
}

impl Cusp {
    pub fn new(value: f64, name: impl Into<String>, number: u8) -> Self {
        Self {
            value: value.rem_euclid(360.0),
            name: name.into(),
            number,
        }
    }
}

impl PartialOrd for Cusp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.value.partial_cmp(&other.value)? {
            Ordering::Equal => Some(self.number.cmp(&other.number)),
            ord => Some(ord),
        }
    }
}

/// Find the cusp whose sector contains `longitude`.
///
/// `cusps` are in natural order; each cusp owns the half-open sector up to
/// the next one, and the last owns the sector back to the first. A sector
/// whose start is numerically above its end straddles 0° and is treated as
/// `[start - 360, end)`. Two adjacent cusps at the same longitude (a house
/// collapsed at high latitude) give the first of them an empty sector.
/// Longitudes outside [0, 360) have no cusp.
pub fn cusp_for_longitude(cusps: &[Cusp], longitude: f64) -> Option<&Cusp> {
    if cusps.is_empty() || !(0.0..360.0).contains(&longitude) {
        return None;
    }

    for (i, current) in cusps.iter().enumerate() {
        let next = &cusps[(i + 1) % cusps.len()];
        if cusps.len() > 1 && current.value == next.value {
            log::debug!("cusp {} has an empty sector at {}", current.number, current.value);
            continue;
        }
        let wraps = current.value >= next.value;
        let (start, end) = if wraps {
            (current.value - 360.0, next.value)
        } else {
            (current.value, next.value)
        };
        let q = if wraps && longitude >= current.value {
            longitude - 360.0
        } else {
            longitude
        };
        if start <= q && q < end {
            return Some(current);
        }
    }

    log::warn!(
        "no sector contains longitude {longitude}; cusps are not monotonic: {:?}",
        cusps.iter().map(|c| c.value).collect::<Vec<_>>()
    );
    None
}
