//! PNG encoding of a rasterized surface.
//!
//! This module is feature-gated behind `png` (default on). The pixel work
//! itself lives in [`crate::raster`] and is always available.

use mondrian_core::error::MondrianError;
use mondrian_core::primitive::Primitive;
use mondrian_core::Color;
use std::io::Cursor;
use tracing::debug;

use crate::raster::{pixel_size, rasterize};

/// Encodes an RGBA8 buffer as PNG bytes.
///
/// Returns `MondrianError::Rasterization` for a zero-size image, a buffer
/// whose length does not match `width * height * 4`, or an encoder failure.
pub fn encode_png(rgba: Vec<u8>, width: u32, height: u32) -> Result<Vec<u8>, MondrianError> {
    if width == 0 || height == 0 {
        return Err(MondrianError::Rasterization(
            "cannot encode a zero-size surface".into(),
        ));
    }
    let img = image::RgbaImage::from_raw(width, height, rgba)
        .ok_or_else(|| MondrianError::Rasterization("RGBA buffer size mismatch".into()))?;
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .map_err(|e| MondrianError::Rasterization(e.to_string()))?;
    Ok(bytes)
}

/// Rasterizes primitives on a `width x height` surface and encodes the result.
///
/// The pixel size is the surface size rounded up on each side.
pub fn snapshot_png(
    primitives: &[Primitive],
    width: f64,
    height: f64,
    background: Color,
) -> Result<Vec<u8>, MondrianError> {
    let (w, h) = pixel_size(width, height)?;
    let bytes = encode_png(rasterize(primitives, w, h, background), w, h)?;
    debug!(width = w, height = h, primitives = primitives.len(), bytes = bytes.len(), "encoded snapshot");
    Ok(bytes)
}
