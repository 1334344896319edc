//! Temporal searches: when an aspect or a boundary crossing happens.
//!
//! Every scan is bounded by [`SearchConfig::max_day_steps`] and reports
//! [`SearchError::SearchExhausted`] past it.

pub mod config;
pub mod error;
pub mod ingress;
pub mod transit;

pub use config::{CancelToken, SearchConfig};
pub use error::{ensure_concrete, SearchError};
pub use ingress::{find_next_ingress, Ingress};
pub use transit::{find_next_aspect, transiting_coordinates, NextAspect, TransitWindow};

use crate::boundaries::Cusp;
use crate::coordinate::Coordinate;

/// Something a moving body can aspect: a fixed longitude.
pub trait AspectTarget {
    fn target_longitude(&self) -> f64;
}

impl AspectTarget for f64 {
    fn target_longitude(&self) -> f64 {
        *self
    }
}

impl AspectTarget for Coordinate {
    fn target_longitude(&self) -> f64 {
        self.longitude()
    }
}

impl AspectTarget for Cusp {
    fn target_longitude(&self) -> f64 {
        self.value
    }
}
