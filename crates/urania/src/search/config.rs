use crate::search::error::SearchError;
use chrono::Duration;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use urania_config::SearchSettings;

/// Shared flag a caller can raise to stop a running search.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Bounds and resolution of the day-step searches.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Most day steps any single scan may take.
    pub max_day_steps: usize,
    /// Coarse scan step, one day unless overridden.
    pub day_step: Duration,
    /// Resolution of the refinement pass.
    pub refine_interval: Duration,
    pub cancel: Option<CancelToken>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_day_steps: 3660,
            day_step: Duration::days(1),
            refine_interval: Duration::minutes(1),
            cancel: None,
        }
    }
}

impl SearchConfig {
    pub fn from_settings(settings: &SearchSettings) -> Self {
        Self {
            max_day_steps: settings.max_day_steps,
            refine_interval: Duration::minutes(i64::from(settings.refine_minutes)),
            ..Self::default()
        }
    }

    pub fn with_max_day_steps(mut self, steps: usize) -> Self {
        self.max_day_steps = steps;
        self
    }

    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if self.max_day_steps == 0 {
            return Err("max_day_steps must be at least 1");
        }
        if self.day_step <= Duration::zero() {
            return Err("day_step must be positive");
        }
        if self.refine_interval <= Duration::zero() {
            return Err("refine_interval must be positive");
        }
        if self.refine_interval > self.day_step {
            return Err("refine_interval must not exceed day_step");
        }
        Ok(())
    }

    pub(crate) fn check_cancelled(&self) -> Result<(), SearchError> {
        match &self.cancel {
            Some(token) if token.is_cancelled() => Err(SearchError::Cancelled),
            _ => Ok(()),
        }
    }
}
