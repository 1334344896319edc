pub mod cusp;
pub mod houses;
pub mod zodiac;

pub use cusp::{cusp_for_longitude, Cusp};
pub use houses::HouseCusps;
pub use zodiac::{sign_for_longitude, zodiac_signs};
