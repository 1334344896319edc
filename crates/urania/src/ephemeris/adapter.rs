use crate::body::Body;
use crate::ephemeris::types::{GeoLocation, HouseAngles, HouseSystem, Position, Zodiac};
use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};
use std::path::{Path, PathBuf};
use swisseph::swe::{calc_ut, julday, revjul, set_ephe_path};
use thiserror::Error;
use urania_config::EphemerisSettings;

/// Errors that can occur during ephemeris calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EphemerisError {
    #[error("Ephemeris file not found at path: {path}. {message}")]
    FileNotFound { path: String, message: String },
    #[error("Invalid house system: {system}. Valid systems: {valid:?}")]
    InvalidHouseSystem { system: String, valid: Vec<String> },
    #[error("Invalid zodiac: {zodiac}. Expected \"tropical\" or \"sidereal\"")]
    InvalidZodiac { zodiac: String },
    #[error("Invalid ayanamsa: {ayanamsa}. Valid ayanamsas: {valid:?}")]
    InvalidAyanamsa { ayanamsa: String, valid: Vec<String> },
    #[error("Failed to calculate position for {body} at {datetime}: {message}")]
    CalculationFailed {
        body: Body,
        datetime: DateTime<Utc>,
        message: String,
    },
    #[error("House calculation failed: {message}")]
    HouseCalculationFailed { message: String },
}

/// Source of body positions. Implementations must be pure for a fixed
/// ephemeris configuration: the same query always yields the same answer.
pub trait PositionProvider {
    fn position(&self, body: Body, instant: DateTime<Utc>) -> Result<Position, EphemerisError>;
}

/// Source of house cusps and angles for a place and time.
pub trait HouseSystemProvider {
    fn houses(
        &self,
        instant: DateTime<Utc>,
        location: GeoLocation,
        system: HouseSystem,
    ) -> Result<HouseAngles, EphemerisError>;

    /// House system used when the caller does not name one
    fn default_system(&self) -> HouseSystem {
        HouseSystem::Placidus
    }
}

impl<P: PositionProvider + ?Sized> PositionProvider for &P {
    fn position(&self, body: Body, instant: DateTime<Utc>) -> Result<Position, EphemerisError> {
        (**self).position(body, instant)
    }
}

impl<H: HouseSystemProvider + ?Sized> HouseSystemProvider for &H {
    fn houses(
        &self,
        instant: DateTime<Utc>,
        location: GeoLocation,
        system: HouseSystem,
    ) -> Result<HouseAngles, EphemerisError> {
        (**self).houses(instant, location, system)
    }

    fn default_system(&self) -> HouseSystem {
        (**self).default_system()
    }
}

/// Ayanamsa names and their `SE_SIDM_*` ids from swephexp.h
const AYANAMSAS: &[(&str, i32)] = &[
    ("fagan_bradley", 0),
    ("lahiri", 1),
    ("chitrapaksha", 1),
    ("de_luce", 2),
    ("raman", 3),
    ("ushashashi", 4),
    ("krishnamurti", 5),
    ("djwhal_khul", 6),
    ("yukteshwar", 7),
    ("jn_bhasin", 8),
    ("aryabhata", 23),
    ("aryabhata_mean_sun", 24),
    ("true_citra", 27),
    ("true_revati", 28),
    ("true_pushya", 29),
];

const FLG_SWIEPH: i32 = 2;
const FLG_SPEED: i32 = 256;
const FLG_SIDEREAL: i32 = 64;
// swe_julday and swe_revjul take the calendar flag with different integer types
const JULDAY_GREG_CAL: u32 = 1;
const REVJUL_GREG_CAL: i32 = 1;

/// Immutable ephemeris configuration, built once and shared by reference.
#[derive(Debug, Clone, PartialEq)]
pub struct EphemerisConfig {
    path: PathBuf,
    zodiac: Zodiac,
    sidereal_mode: Option<i32>,
    house_system: HouseSystem,
}

impl EphemerisConfig {
    /// Tropical zodiac, Placidus houses, data files under `path`
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, EphemerisError> {
        let path = path.into();
        if !path.exists() {
            return Err(EphemerisError::FileNotFound {
                path: path.display().to_string(),
                message: "Ephemeris path does not exist. Please ensure Swiss Ephemeris data files are installed.".to_string(),
            });
        }
        if path.to_str().map_or(true, |p| p.contains('\0')) {
            return Err(EphemerisError::FileNotFound {
                path: path.display().to_string(),
                message: "Ephemeris path must be valid UTF-8 without NUL bytes.".to_string(),
            });
        }
        Ok(Self {
            path,
            zodiac: Zodiac::Tropical,
            sidereal_mode: None,
            house_system: HouseSystem::Placidus,
        })
    }

    pub fn from_settings(settings: &EphemerisSettings) -> Result<Self, EphemerisError> {
        let mut config = Self::new(settings.path.clone())?;
        config.house_system = HouseSystem::from_name(&settings.house_system).ok_or_else(|| {
            EphemerisError::InvalidHouseSystem {
                system: settings.house_system.clone(),
                valid: HouseSystem::valid_names(),
            }
        })?;
        match settings.zodiac.to_lowercase().as_str() {
            "tropical" => {}
            "sidereal" => {
                config.zodiac = Zodiac::Sidereal;
                config.sidereal_mode = Some(resolve_ayanamsa(settings.ayanamsa.as_deref())?);
            }
            other => {
                return Err(EphemerisError::InvalidZodiac {
                    zodiac: other.to_string(),
                })
            }
        }
        Ok(config)
    }

    pub fn with_house_system(mut self, system: HouseSystem) -> Self {
        self.house_system = system;
        self
    }

    pub fn with_sidereal(mut self, ayanamsa: Option<&str>) -> Result<Self, EphemerisError> {
        self.sidereal_mode = Some(resolve_ayanamsa(ayanamsa)?);
        self.zodiac = Zodiac::Sidereal;
        Ok(self)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn zodiac(&self) -> Zodiac {
        self.zodiac
    }

    pub fn sidereal_mode(&self) -> Option<i32> {
        self.sidereal_mode
    }

    pub fn house_system(&self) -> HouseSystem {
        self.house_system
    }

    /// Swiss Ephemeris calculation flags for this configuration
    pub fn flags(&self) -> i32 {
        let mut flags = FLG_SWIEPH | FLG_SPEED;
        if self.zodiac == Zodiac::Sidereal {
            flags |= FLG_SIDEREAL;
        }
        flags
    }
}

/// Map ayanamsa name to Swiss constant
fn resolve_ayanamsa(ayanamsa: Option<&str>) -> Result<i32, EphemerisError> {
    let ayanamsa = ayanamsa.unwrap_or("lahiri");
    AYANAMSAS
        .iter()
        .find(|(name, _)| *name == ayanamsa.to_lowercase())
        .map(|(_, mode)| *mode)
        .ok_or_else(|| EphemerisError::InvalidAyanamsa {
            ayanamsa: ayanamsa.to_string(),
            valid: AYANAMSAS.iter().map(|(name, _)| name.to_string()).collect(),
        })
}

/// Swiss Ephemeris adapter implementation
pub struct SwissEphemerisAdapter<'c> {
    config: &'c EphemerisConfig,
}

impl<'c> SwissEphemerisAdapter<'c> {
    /// Point Swiss Ephemeris at the configured data files.
    ///
    /// The data path is process-wide state inside the C library, so the most
    /// recently created adapter decides it.
    pub fn new(config: &'c EphemerisConfig) -> Self {
        // EphemerisConfig::new only accepts UTF-8 paths
        set_ephe_path(&config.path().to_string_lossy());
        log::info!(
            "Swiss Ephemeris adapter using {} ({:?})",
            config.path().display(),
            config.zodiac()
        );
        Self { config }
    }

    /// Select this config's ayanamsa before a sidereal computation. The
    /// mode is global in the C library, so it is set on every call.
    fn apply_sidereal_mode(&self) {
        if let Some(mode) = self.config.sidereal_mode() {
            // SAFETY: swe_set_sid_mode only stores its scalar arguments
            unsafe { libswisseph_sys::tuple_result::swe_set_sid_mode(mode, 0.0, 0.0) };
        }
    }

    pub fn config(&self) -> &EphemerisConfig {
        self.config
    }

    fn calc_body(&self, body: Body, instant: DateTime<Utc>) -> Result<Position, EphemerisError> {
        let planet_code = body.swiss_id().ok_or_else(|| EphemerisError::CalculationFailed {
            body,
            datetime: instant,
            message: format!("{} is not a concrete body", body),
        })?;
        let jd = datetime_to_julian_day(instant);
        self.apply_sidereal_mode();

        let result = calc_ut(jd, planet_code as u32, self.config.flags() as u32).map_err(|e| {
            EphemerisError::CalculationFailed {
                body,
                datetime: instant,
                message: format!("Swiss Ephemeris error: {}", e),
            }
        })?;

        let out = result.out;
        Ok(Position::from_array([out[0], out[1], out[2], out[3], out[4], out[5]]))
    }
}

impl PositionProvider for SwissEphemerisAdapter<'_> {
    fn position(&self, body: Body, instant: DateTime<Utc>) -> Result<Position, EphemerisError> {
        match body {
            Body::SouthNode => {
                let north = self.calc_body(Body::NorthNode, instant)?;
                Ok(Position {
                    longitude: (north.longitude + 180.0).rem_euclid(360.0),
                    latitude: -north.latitude,
                    ..north
                })
            }
            _ => self.calc_body(body, instant),
        }
    }
}

impl HouseSystemProvider for SwissEphemerisAdapter<'_> {
    fn houses(
        &self,
        instant: DateTime<Utc>,
        location: GeoLocation,
        system: HouseSystem,
    ) -> Result<HouseAngles, EphemerisError> {
        use swisseph::swe::houses_ex;
        use swisseph::{AscMc, Cusp};

        if !(-90.0..=90.0).contains(&location.lat) {
            return Err(EphemerisError::HouseCalculationFailed {
                message: format!("latitude out of range: {}", location.lat),
            });
        }

        let jd = datetime_to_julian_day(instant);
        self.apply_sidereal_mode();
        let (c, a) = houses_ex(jd, self.config.flags(), location.lat, location.lon, system.code() as i32);
        let cusps = Cusp::from_array(c);
        let ascmc = AscMc::from_array(a);

        let cusp_values = [
            cusps.first, cusps.second, cusps.third, cusps.fourth,
            cusps.fifth, cusps.sixth, cusps.seventh, cusps.eighth,
            cusps.ninth, cusps.tenth, cusps.eleventh, cusps.twelfth,
        ];

        Ok(HouseAngles {
            ascendant: ascmc.ascendant.rem_euclid(360.0),
            midheaven: ascmc.mc.rem_euclid(360.0),
            cusps: cusp_values.map(|c| c.rem_euclid(360.0)),
        })
    }

    fn default_system(&self) -> HouseSystem {
        self.config.house_system()
    }
}

/// Convert UTC datetime to Julian Day
pub fn datetime_to_julian_day(dt: DateTime<Utc>) -> f64 {
    let hour = dt.hour() as f64;
    let minute = dt.minute() as f64;
    let second = dt.second() as f64 + dt.nanosecond() as f64 / 1e9;
    let hour_decimal = hour + minute / 60.0 + second / 3600.0;

    julday(dt.year(), dt.month() as i32, dt.day() as i32, hour_decimal, JULDAY_GREG_CAL)
}

/// Convert Julian Day to UTC datetime, truncated to the second
pub fn julian_day_to_datetime(jd: f64) -> Option<DateTime<Utc>> {
    let (year, month, day, hour_decimal) = revjul(jd, REVJUL_GREG_CAL);
    let total_seconds = (hour_decimal * 3600.0).round() as i64;
    let midnight = Utc
        .with_ymd_and_hms(year, month as u32, day as u32, 0, 0, 0)
        .single()?;
    Some(midnight + chrono::Duration::seconds(total_seconds))
}
