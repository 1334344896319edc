pub mod calculator;
pub mod celestial;
pub mod types;

pub use calculator::{AspectCalculator, AspectPair, OrbSettings};
pub use celestial::{is_applying, CelestialAspect};
pub use types::{separation, Aspect, AspectKind};
