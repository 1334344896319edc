//! Celestial bodies known to the engine.
//!
//! `All` and `NoBody` are selector sentinels; they are accepted by parsing
//! but rejected wherever a concrete body is needed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    Chiron,
    NorthNode,
    SouthNode,
    All,
    #[serde(rename = "none")]
    NoBody,
}

// Swiss Ephemeris planet IDs; SUN=0 .. PLUTO=9, TRUE_NODE=11, CHIRON=15
const BODY_IDS: &[(Body, &str, i32)] = &[
    (Body::Sun, "sun", 0),
    (Body::Moon, "moon", 1),
    (Body::Mercury, "mercury", 2),
    (Body::Venus, "venus", 3),
    (Body::Mars, "mars", 4),
    (Body::Jupiter, "jupiter", 5),
    (Body::Saturn, "saturn", 6),
    (Body::Uranus, "uranus", 7),
    (Body::Neptune, "neptune", 8),
    (Body::Pluto, "pluto", 9),
    (Body::Chiron, "chiron", 15),
    (Body::NorthNode, "north_node", 11),
    // Derived from the north node by the adapter
    (Body::SouthNode, "south_node", 11),
];

impl Body {
    /// Every concrete body, in traditional order
    pub const CONCRETE: [Body; 13] = [
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Pluto,
        Body::Chiron,
        Body::NorthNode,
        Body::SouthNode,
    ];

    pub fn is_sentinel(&self) -> bool {
        matches!(self, Body::All | Body::NoBody)
    }

    /// Swiss Ephemeris planet number, `None` for sentinels
    pub fn swiss_id(&self) -> Option<i32> {
        BODY_IDS
            .iter()
            .find(|(body, _, _)| body == self)
            .map(|(_, _, id)| *id)
    }

    pub fn id(&self) -> &'static str {
        match self {
            Body::All => "all",
            Body::NoBody => "none",
            concrete => BODY_IDS
                .iter()
                .find(|(body, _, _)| body == concrete)
                .map(|(_, id, _)| *id)
                .unwrap_or("none"),
        }
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown body: {0}")]
pub struct UnknownBody(pub String);

impl FromStr for Body {
    type Err = UnknownBody;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        match lower.as_str() {
            "all" => return Ok(Body::All),
            "none" => return Ok(Body::NoBody),
            _ => {}
        }
        BODY_IDS
            .iter()
            .find(|(_, id, _)| *id == lower)
            .map(|(body, _, _)| *body)
            .ok_or(UnknownBody(s.to_string()))
    }
}
