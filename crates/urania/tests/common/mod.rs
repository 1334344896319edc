#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use std::collections::HashMap;
use std::f64::consts::PI;
use urania::ephemeris::{
    EphemerisError, GeoLocation, HouseAngles, HouseSystem, HouseSystemProvider, Position,
    PositionProvider,
};
use urania::Body;

/// Route `log` output through the test harness. Safe to call repeatedly.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap()
}

pub fn days(d: f64) -> Duration {
    Duration::seconds((d * 86_400.0).round() as i64)
}

fn days_since_epoch(instant: DateTime<Utc>) -> f64 {
    (instant - epoch()).num_seconds() as f64 / 86_400.0
}

fn position(longitude: f64, speed: f64) -> Position {
    Position {
        longitude: longitude.rem_euclid(360.0),
        latitude: 0.0,
        distance: 1.0,
        speed_longitude: speed,
        speed_latitude: 0.0,
        speed_distance: 0.0,
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Motion {
    /// Longitude at the epoch and degrees per day
    Linear { start: f64, speed: f64 },
    /// `center + amplitude * sin(2π t / period)`, t in days
    Oscillating {
        center: f64,
        amplitude: f64,
        period: f64,
    },
}

impl Motion {
    fn at(&self, t: f64) -> Position {
        match *self {
            Motion::Linear { start, speed } => position(start + speed * t, speed),
            Motion::Oscillating {
                center,
                amplitude,
                period,
            } => {
                let phase = 2.0 * PI * t / period;
                let speed = amplitude * 2.0 * PI / period * phase.cos();
                position(center + amplitude * phase.sin(), speed)
            }
        }
    }
}

/// Deterministic provider: each body follows a fixed motion from the epoch.
#[derive(Debug, Clone, Default)]
pub struct FakeSky {
    motions: HashMap<Body, Motion>,
}

impl FakeSky {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn linear(mut self, body: Body, start: f64, speed: f64) -> Self {
        self.motions.insert(body, Motion::Linear { start, speed });
        self
    }

    pub fn oscillating(mut self, body: Body, center: f64, amplitude: f64, period: f64) -> Self {
        self.motions.insert(
            body,
            Motion::Oscillating {
                center,
                amplitude,
                period,
            },
        );
        self
    }
}

impl PositionProvider for FakeSky {
    fn position(&self, body: Body, instant: DateTime<Utc>) -> Result<Position, EphemerisError> {
        let motion = self
            .motions
            .get(&body)
            .ok_or_else(|| EphemerisError::CalculationFailed {
                body,
                datetime: instant,
                message: "body not in fake sky".to_string(),
            })?;
        Ok(motion.at(days_since_epoch(instant)))
    }
}

/// Equal houses of 30 degrees starting at a fixed ascendant.
pub struct EqualHouses {
    pub ascendant: f64,
}

impl HouseSystemProvider for EqualHouses {
    fn houses(
        &self,
        _instant: DateTime<Utc>,
        _location: GeoLocation,
        _system: HouseSystem,
    ) -> Result<HouseAngles, EphemerisError> {
        Ok(HouseAngles {
            ascendant: self.ascendant,
            midheaven: (self.ascendant + 270.0) % 360.0,
            cusps: std::array::from_fn(|i| (self.ascendant + 30.0 * i as f64) % 360.0),
        })
    }

    fn default_system(&self) -> HouseSystem {
        HouseSystem::Equal
    }
}
