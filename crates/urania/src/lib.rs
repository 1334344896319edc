pub mod aspects;
pub mod body;
pub mod boundaries;
pub mod chart;
pub mod coordinate;
pub mod ephemeris;
pub mod sampler;
pub mod search;

pub use aspects::{Aspect, AspectKind, CelestialAspect};
pub use body::Body;
pub use boundaries::{Cusp, HouseCusps};
pub use chart::BirthChart;
pub use coordinate::Coordinate;
pub use ephemeris::{EphemerisConfig, EphemerisError, PositionProvider, SwissEphemerisAdapter};
pub use sampler::BatchSampler;
pub use search::{SearchConfig, SearchError, TransitWindow};

use aspects::OrbSettings;
use urania_config::UraniaSettings;

/// Everything a caller needs from a loaded `urania.toml`.
#[derive(Debug, Clone)]
pub struct Setup {
    pub ephemeris: EphemerisConfig,
    pub search: SearchConfig,
    pub orbs: OrbSettings,
}

impl Setup {
    pub fn from_settings(settings: &UraniaSettings) -> Result<Self, EphemerisError> {
        Ok(Self {
            ephemeris: EphemerisConfig::from_settings(&settings.ephemeris)?,
            search: SearchConfig::from_settings(&settings.search),
            orbs: OrbSettings::uniform(settings.search.default_orb),
        })
    }
}
