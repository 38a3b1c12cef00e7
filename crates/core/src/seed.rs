//! Reproducible recipe for a composition.
//!
//! A [`Seed`] captures everything needed to recreate a composition: canvas
//! size, palette name, composer config, and PRNG seed.

use crate::composer::{compose, Composer};
use crate::config::ComposerConfig;
use crate::error::MondrianError;
use crate::palette::Palette;
use crate::prng::Xorshift64;
use crate::region::Region;
use serde::{Deserialize, Serialize};

/// Palette used when a recipe does not name one.
pub const DEFAULT_PALETTE: &str = "named";

fn default_palette() -> String {
    DEFAULT_PALETTE.to_string()
}

/// Reproducible recipe for a composition.
///
/// Two identical `Seed` values always produce the same primitive sequence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Seed {
    pub width: f64,
    pub height: f64,
    pub seed: u64,
    #[serde(default = "default_palette")]
    pub palette: String,
    #[serde(default)]
    pub config: ComposerConfig,
}

impl Seed {
    /// Creates a recipe with the default palette and config.
    pub fn new(width: f64, height: f64, seed: u64) -> Self {
        Self {
            width,
            height,
            seed,
            palette: default_palette(),
            config: ComposerConfig::default(),
        }
    }

    /// Creates a recipe with a fresh high-entropy PRNG seed.
    pub fn random(width: f64, height: f64) -> Self {
        Self::new(width, height, Xorshift64::entropy_seed())
    }

    /// Root region: the full canvas anchored at the origin.
    pub fn region(&self) -> Region {
        Region::from_size(self.width, self.height)
    }

    /// Checks the canvas size, palette name, and config.
    pub fn validate(&self) -> Result<(), MondrianError> {
        self.region().validate()?;
        Palette::from_name(&self.palette)?;
        self.config.validate()
    }

    /// Starts the composition this recipe describes.
    pub fn composer(&self) -> Result<Composer<Xorshift64>, MondrianError> {
        let palette = Palette::from_name(&self.palette)?;
        compose(
            self.region(),
            Xorshift64::new(self.seed),
            palette,
            self.config,
        )
    }
}
