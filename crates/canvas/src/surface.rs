//! In-memory render surface.

use mondrian_core::error::MondrianError;
use mondrian_core::primitive::Primitive;
use mondrian_core::Color;
use std::path::{Path, PathBuf};

use crate::persist::{default_storage_dir, write_unique};
use crate::raster::{pixel_size, rasterize};
use crate::Sink;

/// Ordered list of primitives over a solid background.
///
/// Snapshots are written to `storage_dir`, which defaults to the user's
/// pictures folder.
#[derive(Debug, Clone)]
pub struct Surface {
    width: f64,
    height: f64,
    background: Color,
    primitives: Vec<Primitive>,
    storage_dir: PathBuf,
}

impl Surface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            background: Color::WHITE,
            primitives: Vec::new(),
            storage_dir: default_storage_dir(),
        }
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn with_storage_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage_dir = dir.into();
        self
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Rasterizes at native size, returning `(width_px, height_px, rgba)`.
    pub fn to_rgba(&self) -> Result<(u32, u32, Vec<u8>), MondrianError> {
        let (w, h) = pixel_size(self.width, self.height)?;
        Ok((w, h, rasterize(&self.primitives, w, h, self.background)))
    }
}

impl Sink for Surface {
    fn clear(&mut self) {
        self.primitives.clear();
    }

    fn add(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    #[cfg(feature = "png")]
    fn snapshot(&self) -> Result<Vec<u8>, MondrianError> {
        crate::snapshot::snapshot_png(&self.primitives, self.width, self.height, self.background)
    }

    #[cfg(not(feature = "png"))]
    fn snapshot(&self) -> Result<Vec<u8>, MondrianError> {
        Err(MondrianError::Rasterization(
            "built without the `png` feature".into(),
        ))
    }

    fn persist(&self, bytes: &[u8]) -> Result<PathBuf, MondrianError> {
        write_unique(&self.storage_dir, bytes)
    }
}
