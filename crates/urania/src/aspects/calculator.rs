use crate::aspects::celestial::{is_applying, CelestialAspect};
use crate::aspects::types::{Aspect, AspectKind};
use crate::coordinate::Coordinate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Orbs per aspect kind, with a fallback for kinds not listed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrbSettings {
    pub orbs: HashMap<AspectKind, f64>,
    pub default_orb: f64,
}

impl OrbSettings {
    /// Same orb for every kind
    pub fn uniform(orb: f64) -> Self {
        Self {
            orbs: HashMap::new(),
            default_orb: orb,
        }
    }

    pub fn with_orb(mut self, kind: AspectKind, orb: f64) -> Self {
        self.orbs.insert(kind, orb);
        self
    }

    pub fn orb_for(&self, kind: AspectKind) -> f64 {
        self.orbs.get(&kind).copied().unwrap_or(self.default_orb)
    }
}

impl Default for OrbSettings {
    fn default() -> Self {
        Self::uniform(8.0)
    }
}

/// An aspect found between two coordinates, with its motion flags.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AspectPair {
    pub aspect: CelestialAspect,
    /// Approaching exactness
    pub is_applying: bool,
    /// Within 0.1 degrees of exact
    pub is_exact: bool,
    /// Either body retrograde
    pub is_retrograde: bool,
}

/// Aspect calculator
pub struct AspectCalculator {
    orbs: OrbSettings,
}

impl AspectCalculator {
    pub fn new(orbs: OrbSettings) -> Self {
        Self { orbs }
    }

    pub fn orbs(&self) -> &OrbSettings {
        &self.orbs
    }

    /// Calculate the aspect between two coordinates, if any
    pub fn calculate_aspect(&self, first: &Coordinate, second: &Coordinate) -> Option<AspectPair> {
        let aspect = Aspect::between_with(first.longitude(), second.longitude(), |kind| {
            self.orbs.orb_for(kind)
        })?;

        let is_exact = aspect.remainder().abs() < 0.1;
        let applying = is_applying(
            first.longitude(),
            second.longitude(),
            first.speed(),
            second.speed(),
            aspect.kind().anchor(),
        );

        Some(AspectPair {
            aspect: CelestialAspect::new(first.body, second.body, aspect),
            is_applying: applying,
            is_exact,
            is_retrograde: first.is_retrograde() || second.is_retrograde(),
        })
    }

    /// Aspects between every unordered pair within one set
    pub fn compute_intra_aspects(&self, coordinates: &[Coordinate]) -> Vec<AspectPair> {
        let mut pairs = Vec::new();
        for i in 0..coordinates.len() {
            for j in (i + 1)..coordinates.len() {
                if let Some(pair) = self.calculate_aspect(&coordinates[i], &coordinates[j]) {
                    pairs.push(pair);
                }
            }
        }
        pairs
    }

    /// Aspects from each coordinate of `moving` to each of `fixed`.
    ///
    /// Pairs of the same body are skipped.
    pub fn compute_inter_aspects(&self, moving: &[Coordinate], fixed: &[Coordinate]) -> Vec<AspectPair> {
        let mut pairs = Vec::new();
        for from in moving {
            for to in fixed {
                if from.body == to.body {
                    continue;
                }
                if let Some(pair) = self.calculate_aspect(from, to) {
                    pairs.push(pair);
                }
            }
        }
        pairs
    }
}

impl Default for AspectCalculator {
    fn default() -> Self {
        Self::new(OrbSettings::default())
    }
}
