//! Drawable primitives emitted by the composer.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::color::Color;
use crate::region::Region;

/// Stroke width of a separator line, in canvas units.
pub const SEPARATOR_THICKNESS: f64 = 1.0;

/// Stroke color of a separator line.
pub const SEPARATOR_COLOR: Color = Color::BLACK;

/// One drawable element of a composition.
///
/// Primitives are painted in emission order; later ones cover earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    /// Solid rectangle with its top-left corner at `(x, y)`.
    FilledRect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        color: Color,
    },
    /// Solid circle whose bounding square has its top-left corner at `(x, y)`.
    FilledCircle {
        x: f64,
        y: f64,
        diameter: f64,
        color: Color,
    },
    /// Axis-aligned black line marking a split.
    SeparatorLine { x1: f64, y1: f64, x2: f64, y2: f64 },
}

impl Primitive {
    /// A rectangle covering `region`.
    pub fn fill(region: &Region, color: Color) -> Self {
        Primitive::FilledRect {
            x: region.x,
            y: region.y,
            w: region.width,
            h: region.height,
            color,
        }
    }

    /// The circle inscribed in `region`, see [`Region::inscribed_square`].
    pub fn circle_in(region: &Region, color: Color) -> Self {
        let sq = region.inscribed_square();
        Primitive::FilledCircle {
            x: sq.x,
            y: sq.y,
            diameter: sq.width,
            color,
        }
    }

    /// A vertical line at `x` from `y` down `length` units.
    pub fn vertical_line(x: f64, y: f64, length: f64) -> Self {
        Primitive::SeparatorLine {
            x1: x,
            y1: y,
            x2: x,
            y2: y + length,
        }
    }

    /// A horizontal line at `y` from `x` right `length` units.
    pub fn horizontal_line(x: f64, y: f64, length: f64) -> Self {
        Primitive::SeparatorLine {
            x1: x,
            y1: y,
            x2: x + length,
            y2: y,
        }
    }

    /// Axis-aligned bounding box. Lines have zero extent across their axis.
    pub fn bounds(&self) -> Region {
        match *self {
            Primitive::FilledRect { x, y, w, h, .. } => Region::new(x, y, w, h),
            Primitive::FilledCircle { x, y, diameter, .. } => {
                Region::new(x, y, diameter, diameter)
            }
            Primitive::SeparatorLine { x1, y1, x2, y2 } => Region::new(
                x1.min(x2),
                y1.min(y2),
                (x2 - x1).abs(),
                (y2 - y1).abs(),
            ),
        }
    }

    /// Fill color, or the separator color for lines.
    pub fn color(&self) -> Color {
        match *self {
            Primitive::FilledRect { color, .. } | Primitive::FilledCircle { color, .. } => color,
            Primitive::SeparatorLine { .. } => SEPARATOR_COLOR,
        }
    }

    /// Short name of the variant, matching the serialized `kind` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Primitive::FilledRect { .. } => "filled_rect",
            Primitive::FilledCircle { .. } => "filled_circle",
            Primitive::SeparatorLine { .. } => "separator_line",
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Primitive::FilledRect { x, y, w, h, color } => {
                write!(f, "rect {color} at ({x:.1}, {y:.1}) size {w:.1}x{h:.1}")
            }
            Primitive::FilledCircle {
                x,
                y,
                diameter,
                color,
            } => write!(f, "circle {color} at ({x:.1}, {y:.1}) diameter {diameter:.1}"),
            Primitive::SeparatorLine { x1, y1, x2, y2 } => {
                write!(f, "line ({x1:.1}, {y1:.1}) -> ({x2:.1}, {y2:.1})")
            }
        }
    }
}
