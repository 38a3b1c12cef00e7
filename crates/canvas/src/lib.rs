#![deny(unsafe_code)]
//! Canvas side of mondrian: the render surface that collects primitives, a CPU
//! rasterizer, PNG snapshots, snapshot persistence, and the [`Stage`] that
//! reveals a composition onto a sink one primitive at a time.

pub mod persist;
pub mod raster;
#[cfg(feature = "png")]
pub mod snapshot;
pub mod stage;
pub mod surface;

use mondrian_core::error::MondrianError;
use mondrian_core::primitive::Primitive;
use std::path::PathBuf;

pub use stage::Stage;
pub use surface::Surface;

/// Consumer of emitted primitives.
///
/// Implementations keep primitives in insertion order; later primitives are
/// drawn over earlier ones.
pub trait Sink {
    /// Removes every primitive added so far.
    fn clear(&mut self);

    /// Appends a primitive to the surface.
    fn add(&mut self, primitive: Primitive);

    /// Rasterizes the current surface to PNG bytes.
    fn snapshot(&self) -> Result<Vec<u8>, MondrianError>;

    /// Writes snapshot bytes to durable storage and returns where they went.
    fn persist(&self, bytes: &[u8]) -> Result<PathBuf, MondrianError>;
}
