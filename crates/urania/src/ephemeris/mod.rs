pub mod adapter;
pub mod types;

pub use adapter::{
    datetime_to_julian_day, julian_day_to_datetime, EphemerisConfig, EphemerisError,
    HouseSystemProvider, PositionProvider, SwissEphemerisAdapter,
};
pub use types::{GeoLocation, HouseAngles, HouseSystem, Position, Zodiac};
