//! Pure-computation rasterization of primitives into an RGBA8 buffer.
//!
//! This module is always available (no feature gate); only PNG encoding in
//! [`crate::snapshot`] needs the `image` crate.
//!
//! Coverage is decided per pixel center: a pixel belongs to a shape when the
//! point `(i + 0.5, j + 0.5)` lies inside it. Shapes are painted in order with
//! source-over compositing, so later primitives cover earlier ones.

use mondrian_core::error::MondrianError;
use mondrian_core::primitive::{Primitive, SEPARATOR_COLOR, SEPARATOR_THICKNESS};
use mondrian_core::Color;
use std::ops::Range;

/// Largest side accepted for a snapshot, in pixels.
pub const MAX_SIDE_PX: u32 = 16_384;

/// Native pixel size of a surface: each side rounded up.
///
/// Returns `MondrianError::Rasterization` for a zero, negative, non-finite,
/// or oversized side.
pub fn pixel_size(width: f64, height: f64) -> Result<(u32, u32), MondrianError> {
    let side = |v: f64, name: &str| -> Result<u32, MondrianError> {
        let px = v.ceil();
        if !px.is_finite() || px < 1.0 || px > f64::from(MAX_SIDE_PX) {
            return Err(MondrianError::Rasterization(format!(
                "surface {name} {v} does not map to 1..={MAX_SIDE_PX} pixels"
            )));
        }
        Ok(px as u32)
    };
    Ok((side(width, "width")?, side(height, "height")?))
}

/// Paints `primitives` over `background` and returns `width * height * 4` bytes.
///
/// The alpha channel is always 255; a translucent background is first
/// composited over white.
pub fn rasterize(primitives: &[Primitive], width: u32, height: u32, background: Color) -> Vec<u8> {
    let base = background.over([0xff, 0xff, 0xff]);
    let mut rgb: Vec<[u8; 3]> = vec![base; width as usize * height as usize];
    let mut canvas = Canvas {
        rgb: &mut rgb,
        width,
        height,
    };
    for p in primitives {
        canvas.paint(p);
    }
    rgb.iter().flat_map(|&[r, g, b]| [r, g, b, 255u8]).collect()
}

struct Canvas<'a> {
    rgb: &'a mut [[u8; 3]],
    width: u32,
    height: u32,
}

impl Canvas<'_> {
    fn paint(&mut self, primitive: &Primitive) {
        match *primitive {
            Primitive::FilledRect { x, y, w, h, color } => self.fill_rect(x, y, w, h, color),
            Primitive::FilledCircle {
                x,
                y,
                diameter,
                color,
            } => self.fill_circle(x, y, diameter, color),
            Primitive::SeparatorLine { x1, y1, x2, y2 } => {
                let half = SEPARATOR_THICKNESS / 2.0;
                let (left, right) = (x1.min(x2), x1.max(x2));
                let (top, bottom) = (y1.min(y2), y1.max(y2));
                if left == right {
                    self.fill_rect(left - half, top, SEPARATOR_THICKNESS, bottom - top, SEPARATOR_COLOR);
                } else if top == bottom {
                    self.fill_rect(left, top - half, right - left, SEPARATOR_THICKNESS, SEPARATOR_COLOR);
                } else {
                    self.fill_rect(left, top, right - left, bottom - top, SEPARATOR_COLOR);
                }
            }
        }
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color) {
        let cols = span(x, w, self.width);
        for j in span(y, h, self.height) {
            for i in cols.clone() {
                self.blend(i, j, color);
            }
        }
    }

    fn fill_circle(&mut self, x: f64, y: f64, diameter: f64, color: Color) {
        let r = diameter / 2.0;
        let (cx, cy) = (x + r, y + r);
        let cols = span(x, diameter, self.width);
        for j in span(y, diameter, self.height) {
            let dy = f64::from(j) + 0.5 - cy;
            for i in cols.clone() {
                let dx = f64::from(i) + 0.5 - cx;
                if dx * dx + dy * dy <= r * r {
                    self.blend(i, j, color);
                }
            }
        }
    }

    fn blend(&mut self, i: u32, j: u32, color: Color) {
        let idx = j as usize * self.width as usize + i as usize;
        self.rgb[idx] = color.over(self.rgb[idx]);
    }
}

/// Pixel indices whose centers fall in `[start, start + len)`, clipped to `0..limit`.
fn span(start: f64, len: f64, limit: u32) -> Range<u32> {
    let lo = (start - 0.5).ceil().max(0.0);
    let hi = (start + len - 0.5).ceil().min(f64::from(limit));
    if hi <= lo {
        return 0..0;
    }
    lo as u32..hi as u32
}
