//! Zodiac sign boundaries, twelve equal sectors starting at 0° Aries.

use crate::boundaries::cusp::{cusp_for_longitude, Cusp};

const SIGN_NAMES: [&str; 12] = [
    "aries", "taurus", "gemini", "cancer",
    "leo", "virgo", "libra", "scorpio",
    "sagittarius", "capricorn", "aquarius", "pisces",
];

lazy_static::lazy_static! {
    static ref SIGNS: Vec<Cusp> = SIGN_NAMES
        .iter()
        .enumerate()
        .map(|(i, name)| Cusp::new(30.0 * i as f64, *name, i as u8 + 1))
        .collect();
}

/// The twelve sign boundaries in zodiac order
pub fn zodiac_signs() -> &'static [Cusp] {
    &SIGNS
}

/// The sign containing `longitude`
pub fn sign_for_longitude(longitude: f64) -> Option<&'static Cusp> {
    cusp_for_longitude(zodiac_signs(), longitude)
}
