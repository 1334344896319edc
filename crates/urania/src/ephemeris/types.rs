use serde::{Deserialize, Serialize};

/// Geographic location coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub lat: f64,
    pub lon: f64,
}

/// Ecliptic position of a body at one instant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Longitude in degrees (0-360)
    pub longitude: f64,
    /// Latitude in degrees
    pub latitude: f64,
    /// Distance in AU
    pub distance: f64,
    /// Speed in longitude (degrees per day)
    pub speed_longitude: f64,
    /// Speed in latitude (degrees per day)
    pub speed_latitude: f64,
    /// Speed in distance (AU per day)
    pub speed_distance: f64,
}

impl Position {
    /// Build a position from the six values Swiss Ephemeris writes for a body.
    pub fn from_array(out: [f64; 6]) -> Self {
        Self {
            longitude: out[0].rem_euclid(360.0),
            latitude: out[1],
            distance: out[2],
            speed_longitude: out[3],
            speed_latitude: out[4],
            speed_distance: out[5],
        }
    }

    /// Whether the body is moving backwards along the ecliptic
    pub fn is_retrograde(&self) -> bool {
        self.speed_longitude < 0.0
    }
}

/// Zodiac reference frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zodiac {
    Tropical,
    Sidereal,
}

/// House systems supported by the adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HouseSystem {
    Placidus,
    WholeSign,
    Koch,
    Equal,
    Regiomontanus,
    Campanus,
    Alcabitius,
    Morinus,
}

/// House system mapping
const HOUSE_SYSTEMS: &[(&str, HouseSystem, u8)] = &[
    ("placidus", HouseSystem::Placidus, b'P'),
    ("whole_sign", HouseSystem::WholeSign, b'W'),
    ("koch", HouseSystem::Koch, b'K'),
    ("equal", HouseSystem::Equal, b'E'),
    ("regiomontanus", HouseSystem::Regiomontanus, b'R'),
    ("campanus", HouseSystem::Campanus, b'C'),
    ("alcabitius", HouseSystem::Alcabitius, b'A'),
    ("morinus", HouseSystem::Morinus, b'M'),
];

impl HouseSystem {
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.to_lowercase();
        HOUSE_SYSTEMS
            .iter()
            .find(|(n, _, _)| *n == name)
            .map(|(_, system, _)| *system)
    }

    pub fn name(&self) -> &'static str {
        HOUSE_SYSTEMS
            .iter()
            .find(|(_, system, _)| system == self)
            .map(|(n, _, _)| *n)
            .unwrap_or("placidus")
    }

    /// Single-letter code Swiss Ephemeris expects
    pub fn code(&self) -> u8 {
        HOUSE_SYSTEMS
            .iter()
            .find(|(_, system, _)| system == self)
            .map(|(_, _, byte)| *byte)
            .unwrap_or(b'P')
    }

    pub fn valid_names() -> Vec<String> {
        HOUSE_SYSTEMS.iter().map(|(n, _, _)| n.to_string()).collect()
    }
}

/// Raw output of a house system computation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HouseAngles {
    pub ascendant: f64,
    pub midheaven: f64,
    /// Cusps of houses 1..12 in house order
    pub cusps: [f64; 12],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_from_array_normalizes_longitude() {
        let pos = Position::from_array([365.5, 1.0, 0.98, -0.5, 0.01, 0.0001]);
        assert!((pos.longitude - 5.5).abs() < 1e-12);
        assert!(pos.is_retrograde());
        assert!((pos.distance - 0.98).abs() < 1e-12);
    }

    #[test]
    fn test_house_system_lookup() {
        assert_eq!(HouseSystem::from_name("Placidus"), Some(HouseSystem::Placidus));
        assert_eq!(HouseSystem::from_name("whole_sign"), Some(HouseSystem::WholeSign));
        assert_eq!(HouseSystem::from_name("topocentric"), None);
        assert_eq!(HouseSystem::Koch.code(), b'K');
        assert_eq!(HouseSystem::Equal.name(), "equal");
        assert_eq!(HouseSystem::valid_names().len(), 8);
    }
}
