//! Composer tunables.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::MondrianError;

/// Regions with either side below this are not subdivided.
pub const MIN_SIDE: f64 = 80.0;

/// Regions with either side above this must be split, never left as a circle.
pub const OVERSIZE_THRESHOLD: f64 = 800.0;

/// Delay before each emitted primitive is revealed, in milliseconds.
pub const PER_PRIMITIVE_DELAY_MS: u64 = 100;

/// [`PER_PRIMITIVE_DELAY_MS`] as a `Duration`.
pub const PER_PRIMITIVE_DELAY: Duration = Duration::from_millis(PER_PRIMITIVE_DELAY_MS);

/// Thresholds and reveal timing for a composition run.
///
/// Missing fields deserialize to their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposerConfig {
    pub min_side: f64,
    pub oversize_threshold: f64,
    pub delay_ms: u64,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            min_side: MIN_SIDE,
            oversize_threshold: OVERSIZE_THRESHOLD,
            delay_ms: PER_PRIMITIVE_DELAY_MS,
        }
    }
}

impl ComposerConfig {
    /// Default thresholds with no reveal delay, for headless rendering and tests.
    pub fn instant() -> Self {
        Self {
            delay_ms: 0,
            ..Self::default()
        }
    }

    pub fn with_delay_ms(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// Rejects thresholds that are not positive and finite.
    pub fn validate(&self) -> Result<(), MondrianError> {
        if !(self.min_side.is_finite() && self.min_side > 0.0) {
            return Err(MondrianError::InvalidConfig(format!(
                "min_side must be positive and finite, got {}",
                self.min_side
            )));
        }
        if !(self.oversize_threshold.is_finite() && self.oversize_threshold > 0.0) {
            return Err(MondrianError::InvalidConfig(format!(
                "oversize_threshold must be positive and finite, got {}",
                self.oversize_threshold
            )));
        }
        Ok(())
    }

    /// True if the region is too small to subdivide.
    pub fn is_too_small(&self, width: f64, height: f64) -> bool {
        height < self.min_side || width < self.min_side
    }

    /// True if the region must be split rather than capped with a circle.
    pub fn is_oversize(&self, width: f64, height: f64) -> bool {
        height > self.oversize_threshold || width > self.oversize_threshold
    }
}
