use serde::{Deserialize, Serialize};
use std::fmt;

/// The five major aspects, in classification order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectKind {
    Conjunction,
    Sextile,
    Square,
    Trine,
    Opposition,
}

impl AspectKind {
    /// Classification order. When the orb is wide enough for two anchors to
    /// match, the earlier kind here wins.
    pub const ALL: [AspectKind; 5] = [
        AspectKind::Conjunction,
        AspectKind::Sextile,
        AspectKind::Square,
        AspectKind::Trine,
        AspectKind::Opposition,
    ];

    /// Exact separation in degrees
    pub fn anchor(&self) -> f64 {
        match self {
            AspectKind::Conjunction => 0.0,
            AspectKind::Sextile => 60.0,
            AspectKind::Square => 90.0,
            AspectKind::Trine => 120.0,
            AspectKind::Opposition => 180.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AspectKind::Conjunction => "conjunction",
            AspectKind::Sextile => "sextile",
            AspectKind::Square => "square",
            AspectKind::Trine => "trine",
            AspectKind::Opposition => "opposition",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.to_lowercase();
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Attach a remainder to this kind
    pub fn with_remainder(self, remainder: f64) -> Aspect {
        match self {
            AspectKind::Conjunction => Aspect::Conjunction(remainder),
            AspectKind::Sextile => Aspect::Sextile(remainder),
            AspectKind::Square => Aspect::Square(remainder),
            AspectKind::Trine => Aspect::Trine(remainder),
            AspectKind::Opposition => Aspect::Opposition(remainder),
        }
    }
}

impl fmt::Display for AspectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Angular relationship between two longitudes, carrying the signed
/// distance in degrees from exactness.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "remainder", rename_all = "lowercase")]
pub enum Aspect {
    Conjunction(f64),
    Sextile(f64),
    Square(f64),
    Trine(f64),
    Opposition(f64),
}

impl Aspect {
    /// Classify the separation of `a` and `b` against a single orb.
    pub fn between(a: f64, b: f64, orb: f64) -> Option<Aspect> {
        Self::between_with(a, b, |_| orb)
    }

    /// Classify with a per-kind orb.
    ///
    /// The shortest circular separation is tested against each anchor in
    /// [`AspectKind::ALL`] order and the first one within its orb wins.
    /// Conjunction keeps the raw separation as remainder; the other kinds
    /// report `separation - anchor` rounded to two decimals.
    pub fn between_with<F>(a: f64, b: f64, orb_for: F) -> Option<Aspect>
    where
        F: Fn(AspectKind) -> f64,
    {
        let delta = separation(a, b);
        if delta.is_nan() {
            return None;
        }

        for kind in AspectKind::ALL {
            let anchor = kind.anchor();
            if (delta - anchor).abs() <= orb_for(kind) {
                let remainder = match kind {
                    AspectKind::Conjunction => delta,
                    _ => round_hundredths(delta - anchor),
                };
                return Some(kind.with_remainder(remainder));
            }
        }
        None
    }

    /// Rebuild an aspect from a nominal angle produced by [`Aspect::angle`].
    pub fn from_angle(kind: AspectKind, angle: f64) -> Aspect {
        let remainder = match kind {
            AspectKind::Conjunction => angle,
            _ => round_hundredths(angle - kind.anchor()),
        };
        kind.with_remainder(remainder)
    }

    pub fn kind(&self) -> AspectKind {
        match self {
            Aspect::Conjunction(_) => AspectKind::Conjunction,
            Aspect::Sextile(_) => AspectKind::Sextile,
            Aspect::Square(_) => AspectKind::Square,
            Aspect::Trine(_) => AspectKind::Trine,
            Aspect::Opposition(_) => AspectKind::Opposition,
        }
    }

    pub fn remainder(&self) -> f64 {
        match *self {
            Aspect::Conjunction(r)
            | Aspect::Sextile(r)
            | Aspect::Square(r)
            | Aspect::Trine(r)
            | Aspect::Opposition(r) => r,
        }
    }

    /// `anchor + remainder`
    pub fn angle(&self) -> f64 {
        self.kind().anchor() + self.remainder()
    }
}

/// Shortest circular distance between two longitudes, in [0, 180].
pub fn separation(a: f64, b: f64) -> f64 {
    let delta = (b.rem_euclid(360.0) - a.rem_euclid(360.0)).abs();
    if delta >= 180.0 {
        (delta - 360.0).abs()
    } else {
        delta
    }
}

fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_longitude_is_exact_conjunction() {
        for lon in [0.0, 45.5, 179.99, 359.9] {
            assert_eq!(Aspect::between(lon, lon, 1.0), Some(Aspect::Conjunction(0.0)));
        }
    }

    #[test]
    fn test_conjunction_across_zero() {
        let aspect = Aspect::between(1.0, 359.0, 5.0).unwrap();
        assert_eq!(aspect.kind(), AspectKind::Conjunction);
        assert!((aspect.remainder() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_sixty_one_degrees_is_sextile_within_two_degree_orb() {
        // |61 - 60| = 1 is inside a 2 degree orb
        assert_eq!(Aspect::between(0.0, 61.0, 2.0), Some(Aspect::Sextile(1.0)));
        assert_eq!(Aspect::between(0.0, 62.0, 2.0), Some(Aspect::Sextile(2.0)));
        assert_eq!(Aspect::between(0.0, 59.0, 2.0), Some(Aspect::Sextile(-1.0)));
        assert_eq!(Aspect::between(0.0, 63.0, 2.0), None);
    }

    #[test]
    fn test_enumeration_order_breaks_ties() {
        // 75 degrees is 15 from both sextile and square
        assert_eq!(Aspect::between(0.0, 75.0, 15.0), Some(Aspect::Sextile(15.0)));
        // 30 degrees is within 30 of conjunction and of sextile
        assert_eq!(Aspect::between(10.0, 40.0, 30.0), Some(Aspect::Conjunction(30.0)));
    }

    #[test]
    fn test_remainder_rounding() {
        let aspect = Aspect::between(0.0, 120.456, 3.0).unwrap();
        assert_eq!(aspect, Aspect::Trine(0.46));
        let opposition = Aspect::between(10.0, 187.0, 5.0).unwrap();
        assert_eq!(opposition, Aspect::Opposition(-3.0));
    }

    #[test]
    fn test_from_angle_round_trip() {
        let aspect = Aspect::between(12.0, 102.37, 4.0).unwrap();
        assert_eq!(Aspect::from_angle(aspect.kind(), aspect.angle()), aspect);
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(AspectKind::from_name("Trine"), Some(AspectKind::Trine));
        assert_eq!(AspectKind::from_name("quincunx"), None);
        assert_eq!(AspectKind::Opposition.to_string(), "opposition");
    }
}
