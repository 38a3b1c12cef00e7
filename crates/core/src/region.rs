//! Axis-aligned rectangles that the composer subdivides.

use serde::{Deserialize, Serialize};

use crate::error::MondrianError;

/// An axis-aligned rectangle `(x, y, width, height)` in canvas units.
///
/// Regions are plain values: splitting returns two new regions that exactly
/// partition the parent and leaves the parent untouched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Region {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A region anchored at the origin.
    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Checks that the region can serve as the root of a composition run:
    /// finite origin, positive and finite sides.
    ///
    /// Returns `MondrianError::InvalidRegion` otherwise.
    pub fn validate(&self) -> Result<(), MondrianError> {
        let finite = self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite();
        if !finite || self.width <= 0.0 || self.height <= 0.0 {
            return Err(MondrianError::invalid_region(
                self.x,
                self.y,
                self.width,
                self.height,
            ));
        }
        Ok(())
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn shorter_side(&self) -> f64 {
        self.width.min(self.height)
    }

    pub fn longer_side(&self) -> f64 {
        self.width.max(self.height)
    }

    /// Splits at `offset` from the left edge into `(left, right)`.
    ///
    /// The right child starts at `x + offset` and takes the remaining width,
    /// so the two widths always sum to the parent's.
    pub fn split_vertical(&self, offset: f64) -> (Region, Region) {
        let left = Region::new(self.x, self.y, offset, self.height);
        let right = Region::new(self.x + offset, self.y, self.width - offset, self.height);
        (left, right)
    }

    /// Splits at `offset` from the top edge into `(top, bottom)`.
    pub fn split_horizontal(&self, offset: f64) -> (Region, Region) {
        let top = Region::new(self.x, self.y, self.width, offset);
        let bottom = Region::new(self.x, self.y + offset, self.width, self.height - offset);
        (top, bottom)
    }

    /// The square that bounds the circle inscribed in this region.
    ///
    /// Its side is the shorter side; it is flush with both shorter edges and
    /// centered along the longer axis.
    pub fn inscribed_square(&self) -> Region {
        let d = self.shorter_side();
        if self.height > self.width {
            Region::new(self.x, self.y + (self.height - self.width) / 2.0, d, d)
        } else {
            Region::new(self.x + (self.width - self.height) / 2.0, self.y, d, d)
        }
    }

    /// Area of the overlap between two regions (0 when they only touch).
    pub fn intersection_area(&self, other: &Region) -> f64 {
        let w = self.right().min(other.right()) - self.x.max(other.x);
        let h = self.bottom().min(other.bottom()) - self.y.max(other.y);
        if w <= 0.0 || h <= 0.0 {
            0.0
        } else {
            w * h
        }
    }

    /// True if `other` lies within this region, allowing `epsilon` of slack.
    pub fn contains_region(&self, other: &Region, epsilon: f64) -> bool {
        other.x >= self.x - epsilon
            && other.y >= self.y - epsilon
            && other.right() <= self.right() + epsilon
            && other.bottom() <= self.bottom() + epsilon
    }
}
