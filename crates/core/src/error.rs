//! Error types for mondrian.

use thiserror::Error;

/// Errors produced while composing, rasterizing, or saving a composition.
///
/// The composer itself is infallible once its root region and config have
/// been accepted; every variant here is terminal for the operation that
/// raised it.
#[derive(Debug, Error)]
pub enum MondrianError {
    /// The root region had a non-positive or non-finite side, or a non-finite origin.
    #[error("invalid region ({x}, {y}, {width}x{height}): width and height must be positive and finite")]
    InvalidRegion {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },

    /// A composer tunable was out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A palette could not be constructed or looked up.
    #[error("invalid palette: {0}")]
    InvalidPalette(String),

    /// The render surface could not be turned into a PNG.
    #[error("rasterization failed: {0}")]
    Rasterization(String),

    /// The PNG bytes could not be written to storage.
    #[error("persist failed: {0}")]
    Persist(String),
}

impl MondrianError {
    /// Builds a [`MondrianError::InvalidRegion`] from raw bounds.
    pub fn invalid_region(x: f64, y: f64, width: f64, height: f64) -> Self {
        MondrianError::InvalidRegion {
            x,
            y,
            width,
            height,
        }
    }

    /// True for the failures that come from the sink (rasterizing or writing),
    /// as opposed to bad input.
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            MondrianError::Rasterization(_) | MondrianError::Persist(_)
        )
    }
}
