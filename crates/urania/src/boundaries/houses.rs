use crate::boundaries::cusp::{cusp_for_longitude, Cusp};
use crate::ephemeris::{EphemerisError, GeoLocation, HouseAngles, HouseSystem, HouseSystemProvider};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const HOUSE_NAMES: [&str; 12] = [
    "first", "second", "third", "fourth", "fifth", "sixth",
    "seventh", "eighth", "ninth", "tenth", "eleventh", "twelfth",
];

/// House cusps and angles for one place, time and house system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseCusps {
    pub instant: DateTime<Utc>,
    pub location: GeoLocation,
    pub system: HouseSystem,
    pub ascendant: f64,
    pub midheaven: f64,
    cusps: [Cusp; 12],
}

impl HouseCusps {
    /// Compute houses through the provider
    pub fn new<H: HouseSystemProvider + ?Sized>(
        provider: &H,
        instant: DateTime<Utc>,
        location: GeoLocation,
        system: HouseSystem,
    ) -> Result<Self, EphemerisError> {
        let angles = provider.houses(instant, location, system)?;
        Ok(Self::from_angles(instant, location, system, angles))
    }

    /// Compute houses in the provider's default house system
    pub fn with_default_system<H: HouseSystemProvider + ?Sized>(
        provider: &H,
        instant: DateTime<Utc>,
        location: GeoLocation,
    ) -> Result<Self, EphemerisError> {
        Self::new(provider, instant, location, provider.default_system())
    }

    pub fn from_angles(
        instant: DateTime<Utc>,
        location: GeoLocation,
        system: HouseSystem,
        angles: HouseAngles,
    ) -> Self {
        let cusps = std::array::from_fn(|i| Cusp::new(angles.cusps[i], HOUSE_NAMES[i], i as u8 + 1));
        Self {
            instant,
            location,
            system,
            ascendant: angles.ascendant.rem_euclid(360.0),
            midheaven: angles.midheaven.rem_euclid(360.0),
            cusps,
        }
    }

    /// Cusps in house order, first house first
    pub fn cusps(&self) -> &[Cusp; 12] {
        &self.cusps
    }

    /// House number 1..=12
    pub fn cusp(&self, number: u8) -> Option<&Cusp> {
        self.cusps.get(usize::from(number).checked_sub(1)?)
    }

    /// The house containing `longitude`
    pub fn cusp_for_longitude(&self, longitude: f64) -> Option<&Cusp> {
        cusp_for_longitude(&self.cusps, longitude)
    }

    pub fn descendant(&self) -> f64 {
        (self.ascendant + 180.0).rem_euclid(360.0)
    }

    pub fn imum_coeli(&self) -> f64 {
        (self.midheaven + 180.0).rem_euclid(360.0)
    }
}
